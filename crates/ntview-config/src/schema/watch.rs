//! Visibility watcher configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchConfig {
    /// Quiet period after the last scroll event before a check runs
    /// (valid range: 1-10000).
    pub debounce_ms: u64,
}

impl WatchConfig {
    pub fn debounce(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 20 }
    }
}
