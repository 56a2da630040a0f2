//! Offline plugin configuration.

use serde::{Deserialize, Serialize};

/// Offline (local cache) plugin settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OfflineConfig {
    /// Minimum interval between two typing start events on one channel.
    #[serde(default = "default_typing_start_throttle_ms")]
    pub typing_start_throttle_ms: u64,
}

impl Default for OfflineConfig {
    fn default() -> Self {
        Self {
            typing_start_throttle_ms: default_typing_start_throttle_ms(),
        }
    }
}

fn default_typing_start_throttle_ms() -> u64 {
    3_000
}
