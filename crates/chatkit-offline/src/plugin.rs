//! The offline plugin.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use chatkit_core::ChatResult;
use chatkit_core::config::offline::OfflineConfig;
use chatkit_core::models::Channel;
use chatkit_plugin::listeners::{QueryChannelsListener, ThreadQueryListener, TypingEventListener};
use chatkit_plugin::plugin::{Plugin, PluginInfo};
use chatkit_plugin::plugin_info;

use crate::channels::QueryChannelsListenerState;
use crate::state::OfflineState;
use crate::threads::ThreadQueryListenerState;
use crate::typing::TypingEventListenerState;

/// Plugin id of the offline plugin.
pub const OFFLINE_PLUGIN_ID: &str = "offline";

/// Keeps chat state locally and vetoes redundant requests.
#[derive(Debug)]
pub struct OfflinePlugin {
    state: Arc<OfflineState>,
    threads: Arc<ThreadQueryListenerState>,
    channels: Arc<QueryChannelsListenerState>,
    typing: Arc<TypingEventListenerState>,
}

impl OfflinePlugin {
    /// Creates the plugin with empty state.
    pub fn new(config: &OfflineConfig) -> Self {
        let state = Arc::new(OfflineState::new());
        Self {
            threads: Arc::new(ThreadQueryListenerState::new(state.clone())),
            channels: Arc::new(QueryChannelsListenerState::new(state.clone())),
            typing: Arc::new(TypingEventListenerState::new(
                state.clone(),
                config.typing_start_throttle_ms,
            )),
            state,
        }
    }

    /// The shared offline state.
    pub fn state(&self) -> &Arc<OfflineState> {
        &self.state
    }

    /// See [`QueryChannelsListenerState::add_channel_if_filter_matches`].
    pub async fn add_channel_if_filter_matches(&self, channel: &Channel) -> usize {
        self.channels.add_channel_if_filter_matches(channel).await
    }
}

#[async_trait]
impl Plugin for OfflinePlugin {
    fn info(&self) -> PluginInfo {
        plugin_info!(
            id: OFFLINE_PLUGIN_ID,
            name: "Offline Support",
            version: env!("CARGO_PKG_VERSION"),
            description: "Caches threads, channel lists, and typing state locally"
        )
    }

    async fn on_load(&self) -> ChatResult<()> {
        info!("Offline plugin ready");
        Ok(())
    }

    async fn on_unload(&self) -> ChatResult<()> {
        self.state.threads.write().await.clear();
        self.state.queries.write().await.clear();
        self.state.typing.write().await.clear();
        info!("Offline state cleared");
        Ok(())
    }

    fn thread_query_listener(&self) -> Option<Arc<dyn ThreadQueryListener>> {
        Some(self.threads.clone())
    }

    fn query_channels_listener(&self) -> Option<Arc<dyn QueryChannelsListener>> {
        Some(self.channels.clone())
    }

    fn typing_event_listener(&self) -> Option<Arc<dyn TypingEventListener>> {
        Some(self.typing.clone())
    }
}
