//! Transport abstraction.

pub mod memory;

use async_trait::async_trait;

use chatkit_core::ChatResult;
use chatkit_core::models::{Channel, ChatEvent, Cid, Message, QueryChannelsRequest};

/// The chat backend as seen by the client.
#[async_trait]
pub trait ChatApi: Send + Sync + std::fmt::Debug {
    /// Newest `limit` replies of a thread, oldest first.
    async fn get_replies(&self, message_id: &str, limit: usize) -> ChatResult<Vec<Message>>;

    /// Up to `limit` replies older than `first_id`, oldest first.
    async fn get_replies_more(
        &self,
        message_id: &str,
        first_id: &str,
        limit: usize,
    ) -> ChatResult<Vec<Message>>;

    /// One page of channels matching the request.
    async fn query_channels(&self, request: &QueryChannelsRequest) -> ChatResult<Vec<Channel>>;

    /// Sends a channel event such as `typing.start`.
    async fn send_event(&self, event_type: &str, cid: &Cid) -> ChatResult<ChatEvent>;
}
