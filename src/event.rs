//! The event model: every notification an observable delivers is one `Event`.

use std::fmt;

use crate::errors::ProducerError;

/// A single notification delivered to a subscriber.
///
/// After `Error` or `Completed` no other event is delivered on the same
/// subscription.
#[derive(Debug, Clone)]
pub enum Event<T> {
    Next(T),
    Error(ProducerError),
    Completed,
}

impl<T> Event<T> {
    /// Returns the element carried by a `Next` event.
    pub fn element(&self) -> Option<&T> {
        match self {
            Event::Next(v) => Some(v),
            _ => None,
        }
    }

    /// Consumes the event and returns the element carried by a `Next` event.
    pub fn into_element(self) -> Option<T> {
        match self {
            Event::Next(v) => Some(v),
            _ => None,
        }
    }

    /// Returns the error carried by an `Error` event.
    pub fn error(&self) -> Option<&ProducerError> {
        match self {
            Event::Error(e) => Some(e),
            _ => None,
        }
    }

    /// `true` for `Error` and `Completed`.
    pub fn is_stop_event(&self) -> bool {
        !matches!(self, Event::Next(_))
    }

    /// `true` only for `Completed`.
    pub fn is_completed(&self) -> bool {
        matches!(self, Event::Completed)
    }
}

impl<T: fmt::Display> fmt::Display for Event<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Next(v) => write!(f, "next({v})"),
            Event::Error(e) => write!(f, "error({e})"),
            Event::Completed => write!(f, "completed"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_event_kind() {
        assert_eq!(Event::Next(1).to_string(), "next(1)");
        assert_eq!(Event::<i32>::Completed.to_string(), "completed");
        assert_eq!(
            Event::<i32>::Error(ProducerError::msg("anError")).to_string(),
            "error(anError)"
        );
    }

    #[test]
    fn element_only_for_next() {
        assert_eq!(Event::Next("A").element(), Some(&"A"));
        assert_eq!(Event::<&str>::Completed.element(), None);
        assert!(Event::<&str>::Completed.is_stop_event());
        assert!(!Event::Next("A").is_stop_event());
        assert!(Event::<()>::Error(ProducerError::msg("e")).error().is_some());
    }
}
