//! `Single`, an observable restricted to exactly one result.
//!
//! A `Single` either succeeds with one value or fails with one error. There is
//! no separate completion: success carries the value and ends the sequence at
//! the same time.

use std::sync::{Arc, Mutex};

use crate::errors::ProducerError;
use crate::observable::Observable;
use crate::observer::Observer;
use crate::subscription::{
    lock,
    subscribe::{Subscribeable, Subscriber, Subscription},
};

/// Result delivered by a `Single`.
pub type SingleResult<T> = Result<T, ProducerError>;

/// The sink handed to a `Single` producer.
///
/// Only the first call to `success`, `error` or `emit` has an effect.
pub struct SingleObserver<T> {
    subscriber: Subscriber<T>,
}

impl<T> SingleObserver<T> {
    /// Delivers `result`.
    pub fn emit(&mut self, result: SingleResult<T>) {
        match result {
            Ok(v) => self.success(v),
            Err(e) => self.error(e),
        }
    }

    /// Delivers `value` and ends the sequence.
    pub fn success(&mut self, value: T) {
        self.subscriber.next(value);
        self.subscriber.complete();
    }

    /// Fails with `error`.
    pub fn error(&mut self, error: ProducerError) {
        self.subscriber.error(error);
    }

    /// Returns `true` once a result was delivered or the subscription disposed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.subscriber.is_closed()
    }

    pub(crate) fn subscriber(&self) -> &Subscriber<T> {
        &self.subscriber
    }
}

/// An observable that delivers exactly one success value or one error.
///
/// ```
/// use rxlite::{Disposable, DisposeBag, ProducerError, Single, Subscription};
///
/// #[derive(Debug, thiserror::Error)]
/// enum FileReadError {
///     #[error("file not found")]
///     FileNotFound,
/// }
///
/// fn load_text(name: &'static str) -> Single<String> {
///     Single::create(move |mut single| {
///         if name.is_empty() {
///             single.error(ProducerError::new(FileReadError::FileNotFound));
///         } else {
///             single.success(format!("contents of {}", name));
///         }
///         Subscription::empty()
///     })
/// }
///
/// let bag = DisposeBag::new();
/// load_text("Copyright")
///     .subscribe(|result| match result {
///         Ok(text) => println!("{}", text),
///         Err(e) => println!("{}", e),
///     })
///     .disposed_by(&bag);
/// ```
pub struct Single<T> {
    source: Observable<T>,
}

impl<T: 'static> Single<T> {
    /// Creates a `Single` from a producer that reports its result through a
    /// `SingleObserver` and returns its cleanup.
    pub fn create<F>(mut producer: F) -> Self
    where
        F: FnMut(SingleObserver<T>) -> Subscription + Send + Sync + 'static,
    {
        Single {
            source: Observable::create(move |subscriber| producer(SingleObserver { subscriber })),
        }
    }

    /// Fails with `error` on every subscription.
    pub fn error(error: impl Into<ProducerError>) -> Self {
        Single {
            source: Observable::error(error),
        }
    }

    /// Creates a new `Single` from `factory` on every subscription.
    pub fn deferred<F>(mut factory: F) -> Self
    where
        F: FnMut() -> Single<T> + Send + Sync + 'static,
    {
        Single {
            source: Observable::deferred(move || factory().source),
        }
    }

    /// Subscribes with a handler receiving the single result.
    pub fn subscribe<F>(&mut self, on_result: F) -> Subscription
    where
        F: FnMut(SingleResult<T>) + Send + 'static,
    {
        let on_result = Arc::new(Mutex::new(on_result));
        let on_result_e = Arc::clone(&on_result);

        self.source.subscribe(Subscriber::new(
            move |v| {
                let mut on_result = lock(&on_result);
                (*on_result)(Ok(v));
            },
            move |e| {
                let mut on_result = lock(&on_result_e);
                (*on_result)(Err(e));
            },
            || {},
        ))
    }

    /// The underlying sequence: one `next` followed by completion, or one error.
    #[must_use]
    pub fn into_observable(self) -> Observable<T> {
        self.source
    }
}

impl<T: Clone + Send + Sync + 'static> Single<T> {
    /// Succeeds with `value` on every subscription.
    pub fn just(value: T) -> Self {
        Single {
            source: Observable::just(value),
        }
    }
}
