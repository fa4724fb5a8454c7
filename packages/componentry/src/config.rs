//! Framework-wide configuration.

use serde::{Deserialize, Serialize};

use componentry_agent::{Collator, CollatorConfig};
use componentry_queue::{Queue, QueueConfig};

use crate::error::Result;

/// Settings for every layer of the framework.
///
/// Missing sections and fields fall back to their defaults.
///
/// # Example
///
/// ```rust
/// use componentry::FrameworkConfig;
///
/// let config = FrameworkConfig::from_json(r#"{"collator": {"maximum_depth": 8}}"#).unwrap();
/// assert_eq!(config.collator().unwrap().maximum_depth(), 8);
/// assert_eq!(config.queue::<u32>().unwrap().capacity(), 16);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrameworkConfig {
    pub collator: CollatorConfig,
    pub queue: QueueConfig,
}

impl FrameworkConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Build a collator from the collator section.
    pub fn collator(&self) -> Result<Collator> {
        Ok(Collator::from_config(&self.collator)?)
    }

    /// Build an empty queue from the queue section.
    pub fn queue<T>(&self) -> Result<Queue<T>> {
        Ok(Queue::from_config(&self.queue)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn empty_json_is_default() {
        let config = FrameworkConfig::from_json("{}").unwrap();
        assert_eq!(config, FrameworkConfig::default());
        assert_eq!(config.collator.maximum_depth, 16);
        assert_eq!(config.queue.capacity, 16);
    }

    #[test]
    fn json_round_trip() {
        let mut config = FrameworkConfig::default();
        config.queue.capacity = 2;
        let parsed = FrameworkConfig::from_json(&config.to_json().unwrap()).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        assert!(matches!(
            FrameworkConfig::from_json(r#"{"queue": {"capacity": "many"}}"#),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn invalid_values_surface_layer_errors() {
        let config = FrameworkConfig::from_json(
            r#"{"collator": {"maximum_depth": 0}, "queue": {"capacity": 0}}"#,
        )
        .unwrap();
        assert!(matches!(config.collator(), Err(Error::Agent(_))));
        assert!(matches!(config.queue::<u8>(), Err(Error::Queue(_))));
    }
}
