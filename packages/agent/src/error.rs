//! Error types for the agent layer.

use thiserror::Error;

/// Errors raised by the collation and sorting agents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A constructor or operation received a malformed argument.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// A recursive traversal descended past the configured bound.
    ///
    /// Cyclic values always end up here, as do acyclic values nested
    /// deeper than the bound.
    #[error("maximum traversal depth was exceeded: {maximum_depth}")]
    MaximumDepthExceeded { maximum_depth: usize },
}

impl Error {
    pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
        Error::InvalidArgument {
            message: message.into(),
        }
    }
}

/// Result type alias for agent operations.
pub type Result<T> = std::result::Result<T, Error>;
