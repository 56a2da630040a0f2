//! Hooks around loading thread replies.

use async_trait::async_trait;

use chatkit_core::ChatResult;
use chatkit_core::models::Message;

use super::Listener;

/// Observes and gates requests for the replies of a thread.
#[async_trait]
pub trait ThreadQueryListener: Listener {
    /// Runs before the first page of replies is requested.
    async fn on_get_replies_precondition(&self, message_id: &str, limit: usize) -> ChatResult<()>;

    /// Runs when the first page of replies is requested.
    async fn on_get_replies_request(&self, message_id: &str, limit: usize);

    /// Runs with the outcome of the first page request.
    async fn on_get_replies_result(
        &self,
        result: &ChatResult<Vec<Message>>,
        message_id: &str,
        limit: usize,
    );

    /// Runs before replies older than `first_id` are requested.
    async fn on_get_replies_more_precondition(
        &self,
        message_id: &str,
        first_id: &str,
        limit: usize,
    ) -> ChatResult<()>;

    /// Runs when replies older than `first_id` are requested.
    async fn on_get_replies_more_request(&self, message_id: &str, first_id: &str, limit: usize);

    /// Runs with the outcome of the older-replies request.
    async fn on_get_replies_more_result(
        &self,
        result: &ChatResult<Vec<Message>>,
        message_id: &str,
        first_id: &str,
        limit: usize,
    );
}
