//! Plugin system configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// What a composite does when a listener panics while handling a hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaultPolicy {
    /// Log the fault and keep invoking the remaining listeners.
    #[default]
    Isolate,
    /// Log the fault and resume unwinding on the caller.
    Propagate,
}

/// Plugin system configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Per-hook timeout in milliseconds. `0` disables the timeout.
    #[serde(default = "default_hook_timeout_ms")]
    pub hook_timeout_ms: u64,
    /// Fault handling for panicking listeners.
    #[serde(default)]
    pub fault_policy: FaultPolicy,
    /// Plugin ids that must not be loaded.
    #[serde(default)]
    pub disabled: Vec<String>,
}

impl PluginConfig {
    /// Returns the hook timeout, or `None` when disabled.
    pub fn hook_timeout(&self) -> Option<Duration> {
        (self.hook_timeout_ms > 0).then(|| Duration::from_millis(self.hook_timeout_ms))
    }

    /// Returns whether the given plugin id is disabled by configuration.
    pub fn is_disabled(&self, plugin_id: &str) -> bool {
        self.disabled.iter().any(|id| id == plugin_id)
    }
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self {
            hook_timeout_ms: default_hook_timeout_ms(),
            fault_policy: FaultPolicy::default(),
            disabled: Vec::new(),
        }
    }
}

fn default_hook_timeout_ms() -> u64 {
    30_000
}
