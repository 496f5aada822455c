use std::{
    fmt,
    future::Future,
    pin::Pin,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex,
    },
};

use log::{debug, error, trace};
use tokio::runtime;

use super::{dispose_bag::DisposeBag, lock, registry};
use crate::{config, errors::ProducerError, event::Event, observer::Observer};

static NEXT_SUBSCRIPTION_ID: AtomicU64 = AtomicU64::new(1);

/// A trait for types that can be subscribed to, allowing consumers to receive
/// values emitted by an observable stream.
pub trait Subscribeable {
    /// The type of items emitted by the observable stream.
    type ObsType;

    /// Subscribes to the observable stream and specifies how to handle emitted values.
    ///
    /// The producer runs synchronously on the calling thread, so by the time this
    /// method returns a finite synchronous sequence has already delivered all of
    /// its events.
    ///
    /// The returned `Subscription` releases the producer's resources when
    /// disposed. It is disposed automatically once a terminal event is delivered.
    fn subscribe(&mut self, s: Subscriber<Self::ObsType>) -> Subscription;

    /// Subscribes with a single handler that receives every notification as an
    /// [`Event`].
    fn subscribe_event<F>(&mut self, handler: F) -> Subscription
    where
        F: FnMut(Event<Self::ObsType>) + Send + 'static,
        Self::ObsType: 'static,
    {
        self.subscribe(Subscriber::from_event(handler))
    }

    /// Subscribes with only a `next` handler. Errors are logged and otherwise
    /// ignored.
    fn subscribe_next<F>(&mut self, next_fn: F) -> Subscription
    where
        F: FnMut(Self::ObsType) + Send + 'static,
    {
        self.subscribe(Subscriber::on_next(next_fn))
    }
}

/// A handle to a releasable resource.
///
/// Disposing is idempotent: only the first call has an effect.
pub trait Disposable {
    /// Releases the resource and stops any further event delivery.
    fn dispose(&self);

    /// Returns `true` once `dispose` was called.
    fn is_disposed(&self) -> bool;

    /// Hands the disposable over to `bag`, which disposes it together with every
    /// other member.
    fn disposed_by(self, bag: &DisposeBag)
    where
        Self: Sized + Send + 'static,
    {
        bag.add(self);
    }
}

type NextFn<T> = Box<dyn FnMut(T) + Send>;
type CompleteFn = Box<dyn FnMut() + Send>;
type ErrorFn = Box<dyn FnMut(ProducerError) + Send>;
type DisposedFn = Box<dyn FnOnce() + Send>;

/// A type that acts as an observer, allowing users to handle emitted values, errors,
/// and completion when subscribing to an `Observable`.
///
/// A `Subscriber` is a latch: the first `error` or `complete` call closes it and
/// every call after that is ignored, as is every call made after the subscription
/// was disposed. Producers can therefore emit freely without tracking the
/// subscription state themselves, and can use `is_closed` to stop early.
pub struct Subscriber<NextFnType> {
    next_fn: Option<NextFn<NextFnType>>,
    complete_fn: Option<CompleteFn>,
    error_fn: Option<ErrorFn>,
    disposed_fn: Option<DisposedFn>,
    subscriptions: Vec<Subscription>,
    terminated: bool,
    track_leaks: bool,
}

impl<NextFnType> Subscriber<NextFnType> {
    /// Creates a new `Subscriber` instance with custom handling functions for emitted
    /// values, errors, and completion.
    pub fn new(
        next_fn: impl FnMut(NextFnType) + 'static + Send,
        error_fn: impl FnMut(ProducerError) + 'static + Send,
        complete_fn: impl FnMut() + 'static + Send,
    ) -> Self {
        Subscriber {
            next_fn: Some(Box::new(next_fn)),
            complete_fn: Some(Box::new(complete_fn)),
            error_fn: Some(Box::new(error_fn)),
            ..Subscriber::empty()
        }
    }

    /// Create a new Subscriber with the provided `next` function.
    ///
    /// The `next` closure is called when the observable emits a new item. It takes
    /// a parameter of type `NextFnType`, which is an item emitted by the observable.
    pub fn on_next(next_fn: impl FnMut(NextFnType) + 'static + Send) -> Self {
        Subscriber {
            next_fn: Some(Box::new(next_fn)),
            ..Subscriber::empty()
        }
    }

    /// Creates a `Subscriber` without any handlers. Subscribing with it still runs
    /// the producer and its side effects.
    #[must_use]
    pub fn empty() -> Self {
        Subscriber {
            next_fn: None,
            complete_fn: None,
            error_fn: None,
            disposed_fn: None,
            subscriptions: Vec::new(),
            terminated: false,
            track_leaks: true,
        }
    }

    /// Creates a `Subscriber` that forwards every notification to `handler` as an
    /// [`Event`].
    pub fn from_event(handler: impl FnMut(Event<NextFnType>) + 'static + Send) -> Self
    where
        NextFnType: 'static,
    {
        let handler = Arc::new(Mutex::new(handler));
        let handler_e = Arc::clone(&handler);
        let handler_c = Arc::clone(&handler);

        Subscriber::new(
            move |v| {
                let mut handler = lock(&handler);
                (*handler)(Event::Next(v));
            },
            move |e| {
                let mut handler = lock(&handler_e);
                (*handler)(Event::Error(e));
            },
            move || {
                let mut handler = lock(&handler_c);
                (*handler)(Event::Completed);
            },
        )
    }

    /// Set the completion function for the Subscriber.
    ///
    /// The provided closure will be called when the observable completes its
    /// emission sequence.
    pub fn on_complete(&mut self, complete_fn: impl FnMut() + 'static + Send) {
        self.complete_fn = Some(Box::new(complete_fn));
    }

    /// Set the error-handling function for the Subscriber.
    ///
    /// The provided closure will be called when the observable emits an error.
    pub fn on_error(&mut self, error_fn: impl FnMut(ProducerError) + 'static + Send) {
        self.error_fn = Some(Box::new(error_fn));
    }

    /// Set the function called once the subscription is released.
    ///
    /// It runs exactly once, on the first of a terminal event or an explicit
    /// dispose, after the producer's cleanup. A subscription that is never
    /// released never calls it.
    pub fn on_disposed(&mut self, disposed_fn: impl FnOnce() + 'static + Send) {
        self.disposed_fn = Some(Box::new(disposed_fn));
    }

    /// Returns `true` after a terminal event was delivered or the subscription was
    /// disposed. Further events will be ignored, so long running producers should
    /// check this and stop.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.terminated || self.subscriptions.iter().any(Subscription::is_disposed)
    }

    // Subscribers wrapped by operators are released through the downstream
    // subscription, so they are not tracked on their own. They share the
    // downstream subscriptions and close as soon as the downstream does.
    pub(crate) fn upstream_of<U>(mut self, downstream: &Subscriber<U>) -> Self {
        self.track_leaks = false;
        self.subscriptions.extend(downstream.subscriptions.iter().cloned());
        self
    }

    pub(crate) fn tracks_leaks(&self) -> bool {
        self.track_leaks && self.subscriptions.is_empty()
    }

    pub(crate) fn attach(&mut self, subscription: Subscription) {
        if let Some(disposed_fn) = self.disposed_fn.take() {
            subscription.set_disposed_fn(disposed_fn);
        }
        self.subscriptions.push(subscription);
    }

    fn dropped(&self, kind: &str) {
        if config::current().log_dropped_events {
            debug!("dropping `{}` emitted on a closed subscription", kind);
        }
    }

    // Innermost subscription first.
    fn release(&mut self) {
        for subscription in self.subscriptions.iter().rev() {
            subscription.dispose();
        }
    }
}

impl<T> Observer for Subscriber<T> {
    type NextFnType = T;

    fn next(&mut self, v: Self::NextFnType) {
        if self.is_closed() {
            self.dropped("next");
            return;
        }
        if let Some(nfn) = &mut self.next_fn {
            (nfn)(v);
        }
    }

    fn complete(&mut self) {
        if self.is_closed() {
            self.dropped("complete");
            return;
        }
        self.terminated = true;
        if let Some(cfn) = &mut self.complete_fn {
            (cfn)();
        }
        self.release();
    }

    fn error(&mut self, observable_error: ProducerError) {
        if self.is_closed() {
            self.dropped("error");
            return;
        }
        self.terminated = true;
        match &mut self.error_fn {
            Some(efn) => (efn)(observable_error),
            None => debug!("unhandled observable error: {}", observable_error),
        }
        self.release();
    }
}

/// Enumerates the cleanup a producer hands back when it is subscribed.
pub enum DisposeLogic {
    /// Nothing to release.
    Nil,

    /// Another subscription this one depends on. It is disposed together with
    /// this one.
    Wrapped(Subscription),

    /// Cleanup defined by a function.
    Logic(Box<dyn FnOnce() + Send>),

    /// Asynchronous cleanup represented by a future. It is spawned on the `Tokio`
    /// runtime that was current when the `Subscription` was created.
    Future(Pin<Box<dyn Future<Output = ()> + Send>>),
}

impl DisposeLogic {
    fn run(self, runtime_handle: Option<&runtime::Handle>) {
        match self {
            DisposeLogic::Nil => (),
            DisposeLogic::Logic(fnc) => fnc(),
            DisposeLogic::Wrapped(subscription) => subscription.dispose(),
            DisposeLogic::Future(future) => {
                let handle = runtime_handle
                    .cloned()
                    .or_else(|| runtime::Handle::try_current().ok());
                match handle {
                    Some(handle) => {
                        handle.spawn(future);
                    }
                    None => {
                        error!("asynchronous dispose logic needs a Tokio runtime, dropping it");
                    }
                }
            }
        }
    }
}

impl fmt::Debug for DisposeLogic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisposeLogic::Nil => write!(f, "Nil"),
            DisposeLogic::Wrapped(s) => f.debug_tuple("Wrapped").field(s).finish(),
            DisposeLogic::Logic(_) => write!(f, "Logic(..)"),
            DisposeLogic::Future(_) => write!(f, "Future(..)"),
        }
    }
}

struct SubscriptionState {
    id: u64,
    disposed: AtomicBool,
    logic: Mutex<Option<DisposeLogic>>,
    disposed_fn: Mutex<Option<DisposedFn>>,
    runtime_handle: Option<runtime::Handle>,
    tracked: bool,
}

impl Drop for SubscriptionState {
    fn drop(&mut self) {
        if self.tracked && !*self.disposed.get_mut() {
            registry::leak(self.id);
        }
    }
}

/// Represents a subscription to an observable, allowing control over the
/// subscription.
///
/// `Subscription` is the disposable of this crate. It is returned from every
/// `subscribe` call, and producers return one to describe their own cleanup.
/// Clones are handles to the same subscription.
///
/// A dispose request made while the producer is still running (for example the
/// implicit dispose of a terminal event) stops event delivery at once. The
/// producer's cleanup, followed by the subscriber's `on_disposed` function, runs
/// as soon as the producer hands the cleanup back, before `subscribe` returns.
#[derive(Clone)]
pub struct Subscription {
    state: Arc<SubscriptionState>,
}

impl Subscription {
    /// Creates a new Subscription with the specified dispose logic.
    #[must_use]
    pub fn new(dispose_logic: DisposeLogic) -> Self {
        Subscription::with_state(Some(dispose_logic), false)
    }

    /// A subscription without anything to release.
    #[must_use]
    pub fn empty() -> Self {
        Subscription::new(DisposeLogic::Nil)
    }

    /// A subscription that runs `f` when disposed.
    pub fn from_fn(f: impl FnOnce() + Send + 'static) -> Self {
        Subscription::new(DisposeLogic::Logic(Box::new(f)))
    }

    // Subscription handed out by `subscribe` before the producer has run.
    pub(crate) fn pending(track_leaks: bool) -> Self {
        Subscription::with_state(None, track_leaks && config::current().track_leaks)
    }

    fn with_state(logic: Option<DisposeLogic>, tracked: bool) -> Self {
        let id = NEXT_SUBSCRIPTION_ID.fetch_add(1, Ordering::Relaxed);
        if tracked {
            registry::track(id);
        }
        Subscription {
            state: Arc::new(SubscriptionState {
                id,
                disposed: AtomicBool::new(false),
                logic: Mutex::new(logic),
                disposed_fn: Mutex::new(None),
                runtime_handle: runtime::Handle::try_current().ok(),
                tracked,
            }),
        }
    }

    /// Identifier used in log messages.
    #[must_use]
    pub fn id(&self) -> u64 {
        self.state.id
    }

    pub(crate) fn set_logic(&self, logic: DisposeLogic) {
        let mut slot = lock(&self.state.logic);
        if self.is_disposed() {
            drop(slot);
            trace!(
                "subscription #{} was disposed while subscribing, running cleanup",
                self.state.id
            );
            logic.run(self.state.runtime_handle.as_ref());
            self.run_disposed_fn();
            return;
        }
        *slot = Some(logic);
    }

    fn run_disposed_fn(&self) {
        let disposed_fn = lock(&self.state.disposed_fn).take();
        if let Some(disposed_fn) = disposed_fn {
            disposed_fn();
        }
    }

    pub(crate) fn set_disposed_fn(&self, disposed_fn: DisposedFn) {
        if self.is_disposed() {
            disposed_fn();
            return;
        }
        *lock(&self.state.disposed_fn) = Some(disposed_fn);
    }
}

impl Disposable for Subscription {
    fn dispose(&self) {
        if self.state.disposed.swap(true, Ordering::AcqRel) {
            return;
        }
        trace!("disposing subscription #{}", self.state.id);
        if self.state.tracked {
            registry::release(self.state.id);
        }

        // Without logic the producer is still running; `set_logic` finishes the
        // release once the producer returns its cleanup.
        let logic = lock(&self.state.logic).take();
        if let Some(logic) = logic {
            logic.run(self.state.runtime_handle.as_ref());
            self.run_disposed_fn();
        }
    }

    fn is_disposed(&self) -> bool {
        self.state.disposed.load(Ordering::Acquire)
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.state.id)
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
