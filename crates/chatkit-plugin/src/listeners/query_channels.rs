//! Hooks around channel list queries.

use async_trait::async_trait;

use chatkit_core::ChatResult;
use chatkit_core::models::{Channel, QueryChannelsRequest};

use super::Listener;

/// Observes and gates channel list queries.
#[async_trait]
pub trait QueryChannelsListener: Listener {
    /// Runs before the query is sent.
    async fn on_query_channels_precondition(&self, request: &QueryChannelsRequest)
    -> ChatResult<()>;

    /// Runs when the query is sent.
    async fn on_query_channels_request(&self, request: &QueryChannelsRequest);

    /// Runs with the query outcome.
    async fn on_query_channels_result(
        &self,
        result: &ChatResult<Vec<Channel>>,
        request: &QueryChannelsRequest,
    );
}
