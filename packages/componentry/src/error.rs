//! Errors surfaced by the framework facade.

use thiserror::Error;

/// Any failure raised by the framework.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Agent(#[from] componentry_agent::Error),

    #[error(transparent)]
    Queue(#[from] componentry_queue::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

/// Result type alias for framework operations.
pub type Result<T> = std::result::Result<T, Error>;
