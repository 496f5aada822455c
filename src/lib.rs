//! `rxlite` is a small, synchronous observable engine.
//!
//! An [`Observable`] describes a producer of values. Subscribing runs the producer
//! on the calling thread and delivers zero or more `next` notifications followed by
//! at most one terminal notification, either `error` or `complete`. Every
//! `subscribe` call returns a [`Subscription`] that releases the producer's
//! resources when disposed, and stops any further delivery.
//!
//! Main building blocks:
//!
//! - [`Observable`] constructors: `just`, `of`, `from`, `empty`, `never`, `range`,
//!   `error`, `create` and `deferred`.
//! - [`Subscriber`], the observer a producer emits to. It latches on the first
//!   terminal event, so anything a producer emits afterwards is dropped.
//! - [`Subscription`] and the [`Disposable`] trait, with idempotent `dispose`.
//! - [`DisposeBag`], which releases many disposables together, in the order they
//!   were added.
//! - [`Single`], a sequence that produces exactly one value or one error.
//!
//! # Example
//!
//! ```
//! use std::sync::{Arc, Mutex};
//!
//! use rxlite::{Disposable, DisposeBag, Observable, Subscribeable};
//!
//! let bag = DisposeBag::new();
//! let events = Arc::new(Mutex::new(Vec::new()));
//! let events_c = Arc::clone(&events);
//!
//! Observable::of(["A", "B", "C"])
//!     .subscribe_event(move |event| events_c.lock().unwrap().push(event.to_string()))
//!     .disposed_by(&bag);
//!
//! assert_eq!(
//!     *events.lock().unwrap(),
//!     vec!["next(A)", "next(B)", "next(C)", "completed"]
//! );
//! ```
//!
//! # Diagnostics
//!
//! Subscriptions to sequences that never terminate have to be disposed. With leak
//! tracking enabled (see [`config`]), subscriptions dropped while still live are
//! reported through the `log` facade and counted by [`registry`].

pub mod config;
mod errors;
pub mod event;
pub mod observable;
pub mod observer;
pub mod single;
pub mod subscription;

pub use errors::*;
pub use event::Event;
pub use observable::{Observable, ObservableExt};
pub use observer::Observer;
pub use single::{Single, SingleObserver, SingleResult};
pub use subscription::{dispose_bag::DisposeBag, registry, subscribe};
pub use subscription::subscribe::{
    Disposable, DisposeLogic, Subscribeable, Subscriber, Subscription,
};
