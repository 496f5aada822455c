//! The `observable` module provides the building blocks for creating observables
//! and subscribing to them.

use std::sync::{Arc, Mutex};

use crate::errors::{ObservableError, ProducerError};
use crate::observer::Observer;
use crate::single::Single;
use crate::subscription::{
    lock,
    subscribe::{DisposeLogic, Subscribeable, Subscriber, Subscription},
};

/// The `Observable` struct describes a producer of values that can be observed.
///
/// An `Observable` is inert: nothing happens until it is subscribed, and every
/// subscription runs the producer again from the start. All events are delivered
/// synchronously on the thread that calls `subscribe`.
///
/// # Example: custom `Observable`
///
/// The producer receives a `Subscriber` and returns a `Subscription` describing
/// its cleanup. Events emitted after a terminal event are ignored.
///
/// ```
/// use std::sync::{Arc, Mutex};
///
/// use rxlite::{Observable, Observer, Subscribeable, Subscriber, Subscription};
///
/// let seen = Arc::new(Mutex::new(Vec::new()));
/// let seen_c = Arc::clone(&seen);
///
/// let mut observable = Observable::create(|mut subscriber| {
///     subscriber.next("1");
///     subscriber.complete();
///     // Ignored, the sequence already completed.
///     subscriber.next("?");
///     Subscription::empty()
/// });
///
/// let mut observer = Subscriber::on_next(move |v: &'static str| seen_c.lock().unwrap().push(v));
/// observer.on_complete(|| println!("Completed"));
/// observer.on_disposed(|| println!("Disposed"));
///
/// observable.subscribe(observer);
///
/// assert_eq!(*seen.lock().unwrap(), vec!["1"]);
/// ```
///
/// # Example: `Observable` with error handling
///
/// ```
/// use rxlite::{Observable, Observer, ProducerError, Subscribeable, Subscriber, Subscription};
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("an error")]
/// struct AnError;
///
/// let mut observable = Observable::create(|mut subscriber| {
///     subscriber.next(1);
///     subscriber.error(ProducerError::new(AnError));
///     Subscription::empty()
/// });
///
/// observable.subscribe(Subscriber::new(
///     |v| println!("Emitted {}", v),
///     |e| eprintln!("{}", e),
///     || println!("Completed"),
/// ));
/// ```
pub struct Observable<T> {
    subscribe_fn: Box<dyn FnMut(Subscriber<T>) -> Subscription + Send + Sync>,
}

impl<T: 'static> Observable<T> {
    /// Creates a new `Observable` with the provided subscribe function.
    ///
    /// The function is invoked on every subscription with a `Subscriber` to emit
    /// to. It may call `next` any number of times followed by at most one `error`
    /// or `complete`, and returns the `Subscription` that releases whatever it
    /// holds. That cleanup runs when the subscription is disposed or reaches a
    /// terminal event.
    pub fn create(sf: impl FnMut(Subscriber<T>) -> Subscription + Send + Sync + 'static) -> Self {
        Observable {
            subscribe_fn: Box::new(sf),
        }
    }

    /// Completes immediately without emitting.
    #[must_use]
    pub fn empty() -> Self {
        Observable::create(|mut o| {
            o.complete();
            Subscription::empty()
        })
    }

    /// Never emits and never terminates.
    ///
    /// Its subscriptions are only released by disposing them; forgetting to do so
    /// leaks them.
    #[must_use]
    pub fn never() -> Self {
        Observable::create(|_| Subscription::empty())
    }

    /// Terminates immediately with `error`.
    pub fn error(error: impl Into<ProducerError>) -> Self {
        let error = error.into();
        Observable::create(move |mut o| {
            o.error(error.clone());
            Subscription::empty()
        })
    }

    /// Creates a new observable from `factory` on every subscription and
    /// subscribes to that one instead.
    ///
    /// The factory runs exactly once per `subscribe` call, before anything is
    /// emitted, so it can keep state of its own to vary the sequence between
    /// subscriptions.
    ///
    /// ```
    /// use std::sync::{Arc, Mutex};
    ///
    /// use rxlite::{Observable, Subscribeable};
    ///
    /// let mut flip = false;
    /// let mut factory = Observable::deferred(move || {
    ///     flip = !flip;
    ///     if flip {
    ///         Observable::of([1, 2, 3])
    ///     } else {
    ///         Observable::of([4, 5, 6])
    ///     }
    /// });
    ///
    /// let seen = Arc::new(Mutex::new(Vec::new()));
    /// for _ in 0..2 {
    ///     let seen = Arc::clone(&seen);
    ///     factory.subscribe_next(move |v| seen.lock().unwrap().push(v));
    /// }
    /// assert_eq!(*seen.lock().unwrap(), vec![1, 2, 3, 4, 5, 6]);
    /// ```
    pub fn deferred<F>(mut factory: F) -> Self
    where
        F: FnMut() -> Observable<T> + Send + Sync + 'static,
    {
        Observable::create(move |subscriber| {
            let mut observable = factory();
            observable.subscribe(subscriber)
        })
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    /// Emits `value` once, then completes.
    pub fn just(value: T) -> Self {
        Observable::create(move |mut o| {
            o.next(value.clone());
            o.complete();
            Subscription::empty()
        })
    }

    /// Emits each of `values` in order, then completes.
    pub fn of<const N: usize>(values: [T; N]) -> Self {
        Observable::from(values)
    }

    /// Emits the elements of `items` in iteration order, then completes.
    ///
    /// The elements are collected once, when the observable is created.
    pub fn from<I>(items: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let items: Vec<T> = items.into_iter().collect();
        Observable::create(move |mut o| {
            for item in &items {
                if o.is_closed() {
                    break;
                }
                o.next(item.clone());
            }
            o.complete();
            Subscription::empty()
        })
    }
}

impl Observable<i64> {
    /// Emits `count` sequential integers starting at `start`, then completes.
    ///
    /// A `count` of zero produces an empty sequence.
    ///
    /// # Errors
    ///
    /// Fails with `ObservableError::NegativeCount` if `count` is negative and with
    /// `ObservableError::RangeOverflow` if the last element does not fit in `i64`.
    pub fn range(start: i64, count: i64) -> Result<Self, ObservableError> {
        if count < 0 {
            return Err(ObservableError::NegativeCount(count));
        }
        if count > 0 && start.checked_add(count - 1).is_none() {
            return Err(ObservableError::RangeOverflow { start, count });
        }

        Ok(Observable::create(move |mut o| {
            for i in 0..count {
                if o.is_closed() {
                    break;
                }
                o.next(start + i);
            }
            o.complete();
            Subscription::empty()
        }))
    }
}

impl<T: 'static> Subscribeable for Observable<T> {
    type ObsType = T;

    fn subscribe(&mut self, mut s: Subscriber<Self::ObsType>) -> Subscription {
        let subscription = Subscription::pending(s.tracks_leaks());
        s.attach(subscription.clone());

        let cleanup = (self.subscribe_fn)(s);
        subscription.set_logic(DisposeLogic::Wrapped(cleanup));
        subscription
    }
}

/// The `ObservableExt` trait provides extension methods applied to observables.
pub trait ObservableExt<T: 'static>: Subscribeable<ObsType = T> {
    /// Transforms the items emitted by the observable using a transformation
    /// function.
    fn map<U, F>(mut self, f: F) -> Observable<U>
    where
        Self: Sized + Send + Sync + 'static,
        F: FnMut(T) -> U + Clone + Send + Sync + 'static,
        U: 'static,
    {
        Observable::create(move |o| {
            let o_shared = Arc::new(Mutex::new(o));
            let o_cloned_e = Arc::clone(&o_shared);
            let o_cloned_c = Arc::clone(&o_shared);
            let o_shared_d = Arc::clone(&o_shared);
            let mut f = f.clone();

            let u = Subscriber::new(
                move |v| {
                    let t = f(v);
                    lock(&o_shared).next(t);
                },
                move |observable_error| {
                    lock(&o_cloned_e).error(observable_error);
                },
                move || {
                    lock(&o_cloned_c).complete();
                },
            );
            let u = u.upstream_of(&lock(&o_shared_d));
            self.subscribe(u)
        })
    }

    /// Filters the items emitted by the observable based on a predicate function.
    ///
    /// Only items for which the predicate function returns `true` will be emitted
    /// by the resulting observable.
    fn filter<P>(mut self, predicate: P) -> Observable<T>
    where
        Self: Sized + Send + Sync + 'static,
        P: FnMut(&T) -> bool + Clone + Send + Sync + 'static,
    {
        Observable::create(move |o| {
            let o_shared = Arc::new(Mutex::new(o));
            let o_cloned_e = Arc::clone(&o_shared);
            let o_cloned_c = Arc::clone(&o_shared);
            let o_shared_d = Arc::clone(&o_shared);
            let mut predicate = predicate.clone();

            let u = Subscriber::new(
                move |v| {
                    if predicate(&v) {
                        lock(&o_shared).next(v);
                    }
                },
                move |observable_error| {
                    lock(&o_cloned_e).error(observable_error);
                },
                move || {
                    lock(&o_cloned_c).complete();
                },
            );
            let u = u.upstream_of(&lock(&o_shared_d));
            self.subscribe(u)
        })
    }

    /// Converts the observable into a `Single`.
    ///
    /// The single succeeds with the only element once the source completes. It
    /// fails with `ObservableError::NoElements` if the source completes without
    /// an element and with `ObservableError::MoreThanOneElement` as soon as a
    /// second element arrives, which also closes the source. Source errors are
    /// passed through.
    fn as_single(mut self) -> Single<T>
    where
        Self: Sized + Send + Sync + 'static,
        T: Send,
    {
        Single::create(move |single| {
            let single = Arc::new(Mutex::new(single));
            let single_e = Arc::clone(&single);
            let single_c = Arc::clone(&single);
            let single_d = Arc::clone(&single);
            let element: Arc<Mutex<Option<T>>> = Arc::new(Mutex::new(None));
            let element_c = Arc::clone(&element);

            let u = Subscriber::new(
                move |v: T| {
                    let mut element = lock(&element);
                    if element.is_some() {
                        drop(element);
                        lock(&single).error(ObservableError::MoreThanOneElement.into());
                        return;
                    }
                    *element = Some(v);
                },
                move |observable_error| {
                    lock(&single_e).error(observable_error);
                },
                move || {
                    let element = lock(&element_c).take();
                    let mut single = lock(&single_c);
                    match element {
                        Some(v) => single.success(v),
                        None => single.error(ObservableError::NoElements.into()),
                    }
                },
            );
            let u = u.upstream_of(lock(&single_d).subscriber());
            self.subscribe(u)
        })
    }
}

impl<O, T: 'static> ObservableExt<T> for O where O: Subscribeable<ObsType = T> {}
