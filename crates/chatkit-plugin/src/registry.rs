//! Plugin registry - stores plugins in registration order.
//!
//! Registration order is the order in which listeners are invoked.
//! Unregistering a plugin keeps the relative order of the others; a plugin
//! registered again is placed at the end. Disabling a plugin removes it
//! from listener collections without giving up its position.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use chatkit_core::{ChatError, ChatResult};

use crate::listeners::{QueryChannelsListener, ThreadQueryListener, TypingEventListener};
use crate::plugin::{Plugin, PluginInfo};

#[derive(Debug)]
struct PluginEntry {
    info: PluginInfo,
    plugin: Arc<dyn Plugin>,
    enabled: bool,
}

/// Ordered registry of loaded plugins.
#[derive(Debug, Default)]
pub struct PluginRegistry {
    entries: RwLock<Vec<PluginEntry>>,
}

impl PluginRegistry {
    /// Creates a new empty plugin registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a plugin. Fails if a plugin with the same id is registered.
    pub async fn register(&self, plugin: Arc<dyn Plugin>) -> ChatResult<()> {
        let info = plugin.info();
        let mut entries = self.entries.write().await;

        if entries.iter().any(|entry| entry.info.id == info.id) {
            return Err(ChatError::plugin(format!(
                "Plugin '{}' is already registered",
                info.id
            )));
        }

        info!(
            plugin_id = %info.id,
            name = %info.name,
            version = %info.version,
            position = entries.len(),
            "Registering plugin"
        );

        entries.push(PluginEntry {
            info,
            plugin,
            enabled: true,
        });

        Ok(())
    }

    /// Removes a plugin by id.
    pub async fn unregister(&self, plugin_id: &str) -> ChatResult<Arc<dyn Plugin>> {
        let mut entries = self.entries.write().await;

        let position = entries
            .iter()
            .position(|entry| entry.info.id == plugin_id)
            .ok_or_else(|| ChatError::not_found(format!("Plugin '{}' not found", plugin_id)))?;

        let entry = entries.remove(position);
        info!(plugin_id = %plugin_id, "Plugin unregistered");

        Ok(entry.plugin)
    }

    /// Gets a plugin by id.
    pub async fn get(&self, plugin_id: &str) -> Option<Arc<dyn Plugin>> {
        let entries = self.entries.read().await;
        entries
            .iter()
            .find(|entry| entry.info.id == plugin_id)
            .map(|entry| entry.plugin.clone())
    }

    /// Checks whether a plugin is registered.
    pub async fn contains(&self, plugin_id: &str) -> bool {
        self.get(plugin_id).await.is_some()
    }

    /// Lists plugin metadata in registration order.
    pub async fn list(&self) -> Vec<PluginInfo> {
        let entries = self.entries.read().await;
        entries.iter().map(|entry| entry.info.clone()).collect()
    }

    /// Returns plugin count.
    pub async fn count(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Enables a plugin by id.
    pub async fn enable(&self, plugin_id: &str) -> ChatResult<()> {
        self.set_enabled(plugin_id, true).await
    }

    /// Disables a plugin by id.
    pub async fn disable(&self, plugin_id: &str) -> ChatResult<()> {
        self.set_enabled(plugin_id, false).await
    }

    async fn set_enabled(&self, plugin_id: &str, enabled: bool) -> ChatResult<()> {
        let mut entries = self.entries.write().await;
        let entry = entries
            .iter_mut()
            .find(|entry| entry.info.id == plugin_id)
            .ok_or_else(|| ChatError::not_found(format!("Plugin '{}' not found", plugin_id)))?;

        entry.enabled = enabled;
        info!(plugin_id = %plugin_id, enabled, "Plugin toggled");
        Ok(())
    }

    /// Checks whether a plugin is registered and enabled.
    pub async fn is_enabled(&self, plugin_id: &str) -> bool {
        let entries = self.entries.read().await;
        entries
            .iter()
            .any(|entry| entry.info.id == plugin_id && entry.enabled)
    }

    /// Thread query listeners of enabled plugins, in registration order.
    pub async fn thread_query_listeners(&self) -> Vec<Arc<dyn ThreadQueryListener>> {
        self.collect(|plugin| plugin.thread_query_listener()).await
    }

    /// Channel query listeners of enabled plugins, in registration order.
    pub async fn query_channels_listeners(&self) -> Vec<Arc<dyn QueryChannelsListener>> {
        self.collect(|plugin| plugin.query_channels_listener()).await
    }

    /// Typing event listeners of enabled plugins, in registration order.
    pub async fn typing_event_listeners(&self) -> Vec<Arc<dyn TypingEventListener>> {
        self.collect(|plugin| plugin.typing_event_listener()).await
    }

    async fn collect<T, F>(&self, listener: F) -> Vec<T>
    where
        F: Fn(&dyn Plugin) -> Option<T>,
    {
        let entries = self.entries.read().await;
        entries
            .iter()
            .filter(|entry| entry.enabled)
            .filter_map(|entry| listener(entry.plugin.as_ref()))
            .collect()
    }
}
