//! Thread replies kept offline.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use chatkit_core::models::Message;
use chatkit_core::{ChatError, ChatResult};
use chatkit_plugin::listeners::{Listener, ThreadQueryListener};

use crate::state::OfflineState;

/// Tracks loading flags and caches replies for every thread queried.
#[derive(Debug)]
pub struct ThreadQueryListenerState {
    state: Arc<OfflineState>,
}

impl ThreadQueryListenerState {
    pub fn new(state: Arc<OfflineState>) -> Self {
        Self { state }
    }

    async fn store_replies(&self, message_id: &str, replies: &[Message], limit: usize) {
        self.state
            .upsert_users(replies.iter().map(|reply| &reply.user))
            .await;
        let users = self.state.users.read().await.clone();

        let mut threads = self.state.threads.write().await;
        let thread = threads.entry(message_id.to_string()).or_default();
        thread.upsert(replies);
        thread.refresh_authors(&users);
        thread.end_of_older_messages = replies.len() < limit;

        debug!(
            message_id,
            received = replies.len(),
            cached = thread.messages.len(),
            "Thread replies cached"
        );
    }
}

impl Listener for ThreadQueryListenerState {
    fn name(&self) -> &str {
        "offline.threads"
    }
}

#[async_trait]
impl ThreadQueryListener for ThreadQueryListenerState {
    async fn on_get_replies_precondition(&self, _message_id: &str, _limit: usize) -> ChatResult<()> {
        Ok(())
    }

    async fn on_get_replies_request(&self, message_id: &str, _limit: usize) {
        let mut threads = self.state.threads.write().await;
        threads.entry(message_id.to_string()).or_default().loading = true;
    }

    async fn on_get_replies_result(
        &self,
        result: &ChatResult<Vec<Message>>,
        message_id: &str,
        limit: usize,
    ) {
        match result {
            Ok(replies) => self.store_replies(message_id, replies, limit).await,
            Err(e) => warn!(message_id, error = %e, "Loading thread replies failed"),
        }

        if let Some(thread) = self.state.threads.write().await.get_mut(message_id) {
            thread.loading = false;
        }
    }

    async fn on_get_replies_more_precondition(
        &self,
        message_id: &str,
        _first_id: &str,
        _limit: usize,
    ) -> ChatResult<()> {
        let threads = self.state.threads.read().await;
        match threads.get(message_id) {
            Some(thread) if thread.loading_older => Err(ChatError::precondition(format!(
                "Already loading older replies for thread '{message_id}'"
            ))),
            _ => Ok(()),
        }
    }

    async fn on_get_replies_more_request(&self, message_id: &str, _first_id: &str, _limit: usize) {
        let mut threads = self.state.threads.write().await;
        threads.entry(message_id.to_string()).or_default().loading_older = true;
    }

    async fn on_get_replies_more_result(
        &self,
        result: &ChatResult<Vec<Message>>,
        message_id: &str,
        first_id: &str,
        limit: usize,
    ) {
        match result {
            Ok(replies) => self.store_replies(message_id, replies, limit).await,
            Err(e) => warn!(message_id, first_id, error = %e, "Loading older thread replies failed"),
        }

        if let Some(thread) = self.state.threads.write().await.get_mut(message_id) {
            thread.loading_older = false;
        }
    }
}
