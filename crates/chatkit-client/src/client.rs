//! The chat client.

use std::sync::Arc;

use tracing::{debug, info};

use chatkit_core::config::client::ClientConfig;
use chatkit_core::models::{Channel, Message, QueryChannelsRequest};
use chatkit_core::{ChatError, ChatResult, FilterObject};
use chatkit_plugin::PluginManager;
use chatkit_plugin::listeners::{QueryChannelsListener, ThreadQueryListener};

use crate::api::ChatApi;

/// Chat client routing every call through the registered plugins.
#[derive(Debug, Clone)]
pub struct ChatClient {
    pub(crate) api: Arc<dyn ChatApi>,
    pub(crate) plugins: Arc<PluginManager>,
    config: ClientConfig,
}

impl ChatClient {
    /// Creates a client over a transport and a plugin manager.
    pub fn new(api: Arc<dyn ChatApi>, plugins: Arc<PluginManager>, config: ClientConfig) -> Self {
        info!(
            replies_page_size = config.replies_page_size,
            channels_page_size = config.channels_page_size,
            "Chat client created"
        );
        Self {
            api,
            plugins,
            config,
        }
    }

    /// The plugin manager.
    pub fn plugins(&self) -> &Arc<PluginManager> {
        &self.plugins
    }

    /// Loads the newest `limit` replies of a thread.
    pub async fn get_replies(&self, message_id: &str, limit: usize) -> ChatResult<Vec<Message>> {
        require_id("message_id", message_id)?;

        let listener = self.plugins.thread_query_listener().await;
        listener
            .on_get_replies_precondition(message_id, limit)
            .await
            .inspect_err(|e| debug!(message_id, error = %e, "get_replies vetoed"))?;

        listener.on_get_replies_request(message_id, limit).await;
        let result = self.api.get_replies(message_id, limit).await;
        listener.on_get_replies_result(&result, message_id, limit).await;

        result
    }

    /// Loads the first page of replies using the configured page size.
    pub async fn replies(&self, message_id: &str) -> ChatResult<Vec<Message>> {
        self.get_replies(message_id, self.config.replies_page_size).await
    }

    /// Loads up to `limit` replies older than `first_id`.
    pub async fn get_replies_more(
        &self,
        message_id: &str,
        first_id: &str,
        limit: usize,
    ) -> ChatResult<Vec<Message>> {
        require_id("message_id", message_id)?;
        require_id("first_id", first_id)?;

        let listener = self.plugins.thread_query_listener().await;
        listener
            .on_get_replies_more_precondition(message_id, first_id, limit)
            .await
            .inspect_err(|e| debug!(message_id, first_id, error = %e, "get_replies_more vetoed"))?;

        listener
            .on_get_replies_more_request(message_id, first_id, limit)
            .await;
        let result = self.api.get_replies_more(message_id, first_id, limit).await;
        listener
            .on_get_replies_more_result(&result, message_id, first_id, limit)
            .await;

        result
    }

    /// Loads one page of channels.
    pub async fn query_channels(&self, request: &QueryChannelsRequest) -> ChatResult<Vec<Channel>> {
        if request.limit == 0 {
            return Err(ChatError::validation("limit must be greater than zero"));
        }

        let listener = self.plugins.query_channels_listener().await;
        listener
            .on_query_channels_precondition(request)
            .await
            .inspect_err(|e| debug!(offset = request.offset, error = %e, "query_channels vetoed"))?;

        listener.on_query_channels_request(request).await;
        let result = self.api.query_channels(request).await;
        listener.on_query_channels_result(&result, request).await;

        result
    }

    /// Builds a first-page request for `filter` with the configured page
    /// size.
    pub fn channels_request(&self, filter: FilterObject) -> QueryChannelsRequest {
        QueryChannelsRequest::new(filter, self.config.channels_page_size)
    }
}

fn require_id(field: &str, value: &str) -> ChatResult<()> {
    if value.is_empty() {
        return Err(ChatError::validation(format!("{field} can't be empty")));
    }
    Ok(())
}
