//! Error types produced by observables and by the engine itself.
//!
//! `ProducerError` is the terminal error value carried by `Event::Error` and
//! delivered to a subscriber's `error` function. `ObservableError` describes the
//! failures the engine reports on its own: invalid construction arguments and
//! broken single-element contracts.

mod observable_errors;
mod producer_error;

pub use observable_errors::*;
pub use producer_error::*;
