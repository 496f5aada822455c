use crate::errors::ProducerError;

/// Sink for the three kinds of notifications an observable can deliver.
///
/// A producer calls `next` any number of times, followed by at most one call to
/// either `error` or `complete`.
pub trait Observer {
    type NextFnType;

    fn next(&mut self, _: Self::NextFnType);
    fn complete(&mut self);
    fn error(&mut self, _: ProducerError);
}
