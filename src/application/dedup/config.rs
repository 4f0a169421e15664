//! Delivery dedup configuration.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// What to do once more than `capacity` ids are remembered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EvictionPolicy {
    /// Forget the oldest ids first; the most recent `capacity` ids are
    /// always remembered.
    #[default]
    Fifo,
    /// Forget every id at once. Keeps memory trivially bounded but reopens
    /// the window for redelivered ids right after the purge.
    ClearAll,
}

/// Configuration for the delivery dedup guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DedupConfig {
    /// Maximum number of remembered ids.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
    /// Eviction policy applied when the capacity is exceeded.
    #[serde(default)]
    pub eviction: EvictionPolicy,
}

const fn default_capacity() -> usize {
    1000
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            eviction: EvictionPolicy::default(),
        }
    }
}

impl DedupConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::InvalidValue {
                field: "dedup.capacity",
                reason: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
