//! Plugin manager - lifecycle management and composite construction.

use std::sync::Arc;

use tracing::{error, info, warn};

use chatkit_core::config::plugin::PluginConfig;
use chatkit_core::{ChatError, ChatResult};

use crate::composite::{
    DispatchPolicy, QueryChannelsListenerComposite, ThreadQueryListenerComposite,
    TypingEventListenerComposite,
};
use crate::plugin::{Plugin, PluginInfo};
use crate::registry::PluginRegistry;

/// Loads and unloads plugins and builds listener composites from the
/// currently registered ones.
#[derive(Debug)]
pub struct PluginManager {
    /// Plugin registry.
    registry: Arc<PluginRegistry>,
    /// Plugin configuration.
    config: PluginConfig,
}

impl PluginManager {
    /// Creates a new plugin manager.
    pub fn new(config: PluginConfig) -> Self {
        Self {
            registry: Arc::new(PluginRegistry::new()),
            config,
        }
    }

    /// Loads and registers a plugin.
    ///
    /// Returns `Ok(false)` when the plugin is disabled by configuration and
    /// was therefore not loaded. A plugin whose id is already registered is
    /// rejected before `on_load` runs.
    pub async fn load_plugin(&self, plugin: Arc<dyn Plugin>) -> ChatResult<bool> {
        let info = plugin.info();
        let plugin_id = info.id.clone();

        if self.config.is_disabled(&plugin_id) {
            info!(plugin_id = %plugin_id, "Plugin disabled by configuration, skipping");
            return Ok(false);
        }

        if self.registry.contains(&plugin_id).await {
            return Err(ChatError::plugin(format!(
                "Plugin '{}' is already registered",
                plugin_id
            )));
        }

        plugin.on_load().await.map_err(|e| {
            error!(plugin_id = %plugin_id, error = %e, "Plugin load failed");
            ChatError::plugin(format!("Plugin '{}' load failed: {}", plugin_id, e))
        })?;

        self.registry.register(plugin).await?;

        info!(
            plugin_id = %plugin_id,
            name = %info.name,
            version = %info.version,
            "Plugin loaded"
        );

        Ok(true)
    }

    /// Unregisters and unloads a plugin.
    pub async fn unload_plugin(&self, plugin_id: &str) -> ChatResult<()> {
        let plugin = self.registry.unregister(plugin_id).await?;

        if let Err(e) = plugin.on_unload().await {
            warn!(
                plugin_id = %plugin_id,
                error = %e,
                "Plugin unload returned error"
            );
        }

        info!(plugin_id = %plugin_id, "Plugin unloaded");

        Ok(())
    }

    /// Unloads all plugins, most recently registered first.
    pub async fn unload_all(&self) {
        let plugins = self.registry.list().await;

        for info in plugins.iter().rev() {
            if let Err(e) = self.unload_plugin(&info.id).await {
                error!(
                    plugin_id = %info.id,
                    error = %e,
                    "Error unloading plugin"
                );
            }
        }

        info!("All plugins unloaded");
    }

    /// The dispatch policy applied to composites built by this manager.
    pub fn policy(&self) -> DispatchPolicy {
        DispatchPolicy::from_config(&self.config)
    }

    /// Builds a composite over the current thread query listeners.
    pub async fn thread_query_listener(&self) -> ThreadQueryListenerComposite {
        ThreadQueryListenerComposite::with_policy(
            self.registry.thread_query_listeners().await,
            self.policy(),
        )
    }

    /// Builds a composite over the current channel query listeners.
    pub async fn query_channels_listener(&self) -> QueryChannelsListenerComposite {
        QueryChannelsListenerComposite::with_policy(
            self.registry.query_channels_listeners().await,
            self.policy(),
        )
    }

    /// Builds a composite over the current typing event listeners.
    pub async fn typing_event_listener(&self) -> TypingEventListenerComposite {
        TypingEventListenerComposite::with_policy(
            self.registry.typing_event_listeners().await,
            self.policy(),
        )
    }

    /// Returns the plugin registry.
    pub fn registry(&self) -> &Arc<PluginRegistry> {
        &self.registry
    }

    /// Lists all loaded plugins in registration order.
    pub async fn list_plugins(&self) -> Vec<PluginInfo> {
        self.registry.list().await
    }
}

impl Default for PluginManager {
    fn default() -> Self {
        Self::new(PluginConfig::default())
    }
}
