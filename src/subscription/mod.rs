//! Provides structures and traits related to subscription management.
//!
//! This module includes `Subscriber`, the observer adapter handed to producers,
//! `Subscription`, the disposable handle returned from every `subscribe` call,
//! and `DisposeBag` for releasing many subscriptions together.
//!
//! The `registry` module keeps count of subscriptions that are still live, so
//! leaked subscriptions of sequences that never terminate can be detected.
use std::sync::{Mutex, MutexGuard, PoisonError};

pub mod dispose_bag;
pub mod registry;
pub mod subscribe;

// Callbacks never run while an engine lock is held, so a poisoned lock still
// guards consistent data.
pub(crate) fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
