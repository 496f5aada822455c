use std::{error::Error, sync::Arc};

use thiserror::Error;

use super::ObservableError;

/// Terminal error emitted by an observable.
///
/// Wraps the producer's own error value in an `Arc` so the same error can be
/// cloned into an `Event` or handed to several handlers. Use `downcast_ref` to
/// get the application defined payload back.
///
/// ```
/// use rxlite::ProducerError;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("file not found")]
/// struct FileNotFound;
///
/// let e = ProducerError::new(FileNotFound);
/// assert!(e.downcast_ref::<FileNotFound>().is_some());
/// assert_eq!(e.to_string(), "file not found");
/// ```
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct ProducerError(Arc<dyn Error + Send + Sync>);

impl ProducerError {
    /// Wraps an application error.
    pub fn new(error: impl Error + Send + Sync + 'static) -> Self {
        ProducerError(Arc::new(error))
    }

    /// Creates an error carrying only a message.
    pub fn msg(message: impl Into<String>) -> Self {
        ProducerError(Arc::new(Message(message.into())))
    }

    /// Returns the wrapped error if it is of type `E`.
    #[must_use]
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }

    /// Shared handle to the wrapped error.
    #[must_use]
    pub fn payload(&self) -> Arc<dyn Error + Send + Sync> {
        Arc::clone(&self.0)
    }
}

impl From<ObservableError> for ProducerError {
    fn from(error: ObservableError) -> Self {
        ProducerError::new(error)
    }
}

impl From<Arc<dyn Error + Send + Sync>> for ProducerError {
    fn from(error: Arc<dyn Error + Send + Sync>) -> Self {
        ProducerError(error)
    }
}

impl From<String> for ProducerError {
    fn from(message: String) -> Self {
        ProducerError::msg(message)
    }
}

impl From<&str> for ProducerError {
    fn from(message: &str) -> Self {
        ProducerError::msg(message)
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
struct Message(String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_error_displays_text() {
        let e = ProducerError::msg("boom");
        assert_eq!(e.to_string(), "boom");
        assert!(e.downcast_ref::<ObservableError>().is_none());
    }

    #[test]
    fn clones_share_payload() {
        let e = ProducerError::from(ObservableError::NoElements);
        let c = e.clone();
        assert!(Arc::ptr_eq(&e.payload(), &c.payload()));
        assert_eq!(
            c.downcast_ref::<ObservableError>(),
            Some(&ObservableError::NoElements)
        );
    }
}
