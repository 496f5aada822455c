use thiserror::Error;

/// Errors raised by the engine rather than by a user supplied producer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObservableError {
    /// `range` was asked for a negative number of elements.
    #[error("range count must not be negative, got {0}")]
    NegativeCount(i64),

    /// The last element of a `range` does not fit into `i64`.
    #[error("range starting at {start} with {count} elements overflows i64")]
    RangeOverflow { start: i64, count: i64 },

    /// A sequence converted into a `Single` completed without an element.
    #[error("sequence completed without emitting an element")]
    NoElements,

    /// A sequence converted into a `Single` emitted a second element.
    #[error("sequence emitted more than one element")]
    MoreThanOneElement,
}
