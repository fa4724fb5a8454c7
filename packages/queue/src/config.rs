//! Configuration for the queue layer.

use serde::{Deserialize, Serialize};

use crate::queue::DEFAULT_CAPACITY;

/// Configuration for a [`Queue`](crate::Queue).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Maximum number of values buffered at once.
    pub capacity: usize,
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: DEFAULT_CAPACITY,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Error, Queue};

    #[test]
    fn queue_config_default() {
        assert_eq!(QueueConfig::default().capacity, 16);
    }

    #[test]
    fn queue_config_from_json() {
        let config: QueueConfig = serde_json::from_str(r#"{"capacity": 3}"#).unwrap();
        let queue = Queue::<i64>::from_config(&config).unwrap();
        assert_eq!(queue.capacity(), 3);
    }

    #[test]
    fn zero_capacity_config_is_rejected() {
        let config = QueueConfig { capacity: 0 };
        assert!(matches!(
            Queue::<i64>::from_config(&config),
            Err(Error::InvalidArgument { .. })
        ));
    }
}
