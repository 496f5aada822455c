//! Debug registry of undisposed subscriptions.
//!
//! While [`DiagnosticsConfig::track_leaks`] is on, every subscription created by
//! `subscribe` is counted as live until it is disposed, either explicitly, by a
//! `DisposeBag` or by a terminal event. A subscription whose last handle is
//! dropped while it is still live can never be released anymore; it is counted
//! as leaked and reported with a warning.
//!
//! Counts are kept per thread.
//!
//! [`DiagnosticsConfig::track_leaks`]: crate::config::DiagnosticsConfig::track_leaks
use std::cell::Cell;

use log::{trace, warn};

thread_local! {
    static LIVE: Cell<usize> = Cell::new(0);
    static LEAKED: Cell<usize> = Cell::new(0);
}

/// Number of tracked subscriptions on this thread that are neither disposed nor
/// dropped.
#[must_use]
pub fn live_subscriptions() -> usize {
    LIVE.try_with(Cell::get).unwrap_or(0)
}

/// Number of tracked subscriptions on this thread that were dropped without
/// being disposed.
#[must_use]
pub fn leaked_subscriptions() -> usize {
    LEAKED.try_with(Cell::get).unwrap_or(0)
}

pub(crate) fn track(id: u64) {
    let _ = LIVE.try_with(|live| live.set(live.get() + 1));
    trace!("subscription #{} is live", id);
}

pub(crate) fn release(id: u64) {
    let _ = LIVE.try_with(|live| live.set(live.get().saturating_sub(1)));
    trace!("subscription #{} released", id);
}

pub(crate) fn leak(id: u64) {
    let _ = LIVE.try_with(|live| live.set(live.get().saturating_sub(1)));
    let _ = LEAKED.try_with(|leaked| leaked.set(leaked.get() + 1));
    warn!(
        "subscription #{} was dropped without being disposed and without a terminal event",
        id
    );
}
