//! Configuration for the agent layer.

use serde::{Deserialize, Serialize};

use crate::collator::DEFAULT_MAXIMUM_DEPTH;

/// Configuration for a [`Collator`](crate::Collator).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollatorConfig {
    /// Maximum traversal depth before collation fails.
    pub maximum_depth: usize,
}

impl Default for CollatorConfig {
    fn default() -> Self {
        Self {
            maximum_depth: DEFAULT_MAXIMUM_DEPTH,
        }
    }
}
