//! The plugin contract.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use chatkit_core::ChatResult;

use crate::listeners::{QueryChannelsListener, ThreadQueryListener, TypingEventListener};

/// Metadata about a plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PluginInfo {
    /// Unique plugin identifier.
    pub id: String,
    /// Human-readable plugin name.
    pub name: String,
    /// Plugin version string.
    pub version: String,
    /// Plugin description.
    pub description: String,
}

/// Trait that all plugins implement.
///
/// A plugin owns its listeners and hands out shared references to them.
/// Capabilities a plugin does not provide are left at their `None`
/// defaults and the plugin is skipped when composites for them are built.
#[async_trait]
pub trait Plugin: Send + Sync + std::fmt::Debug {
    /// Returns plugin metadata.
    fn info(&self) -> PluginInfo;

    /// Called once before the plugin is registered.
    async fn on_load(&self) -> ChatResult<()> {
        Ok(())
    }

    /// Called once after the plugin is unregistered.
    async fn on_unload(&self) -> ChatResult<()> {
        Ok(())
    }

    /// Thread query listener provided by this plugin, if any.
    fn thread_query_listener(&self) -> Option<Arc<dyn ThreadQueryListener>> {
        None
    }

    /// Channel query listener provided by this plugin, if any.
    fn query_channels_listener(&self) -> Option<Arc<dyn QueryChannelsListener>> {
        None
    }

    /// Typing event listener provided by this plugin, if any.
    fn typing_event_listener(&self) -> Option<Arc<dyn TypingEventListener>> {
        None
    }
}
