//! Error types for the queue layer.

use thiserror::Error;

/// Errors raised by queues and their relays.
#[derive(Debug, Error)]
pub enum Error {
    /// A constructor or composition received a malformed argument.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A value was added to a queue that has been closed.
    #[error("the queue is closed")]
    ClosedQueue,

    /// A task registered with a [`Group`](crate::Group) panicked.
    #[error("task panicked: {name}")]
    TaskPanicked { name: String },

    /// The operating system refused to start a task thread.
    #[error("failed to spawn task: {0}")]
    Spawn(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Result type alias for queue operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    #[test]
    fn error_display() {
        assert_eq!(format!("{}", Error::ClosedQueue), "the queue is closed");

        let e = Error::invalid_argument("count must be greater than one");
        assert!(format!("{}", e).contains("count must be greater than one"));

        let e = Error::TaskPanicked {
            name: "componentry-fork".to_string(),
        };
        assert!(format!("{}", e).contains("componentry-fork"));
    }

    #[test]
    fn io_error_converts() {
        let io_err = std::io::Error::new(std::io::ErrorKind::OutOfMemory, "no threads left");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Spawn(_)));
        assert!(StdError::source(&e).is_some());
    }
}
