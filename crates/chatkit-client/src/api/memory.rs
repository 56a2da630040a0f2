//! In-memory chat backend.
//!
//! Serves seeded channels and messages and records sent events. Useful for
//! demos and tests; it can be switched offline to simulate transport
//! failures.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use tracing::debug;

use chatkit_core::models::{Channel, ChatEvent, Cid, Message, QueryChannelsRequest};
use chatkit_core::{ChatError, ChatResult};

use super::ChatApi;

#[derive(Debug, Default)]
pub struct InMemoryChatApi {
    user_id: Option<String>,
    channels: RwLock<Vec<Channel>>,
    messages: RwLock<Vec<Message>>,
    events: RwLock<Vec<ChatEvent>>,
    offline: AtomicBool,
    requests: AtomicUsize,
}

impl InMemoryChatApi {
    /// Creates an empty backend acting on behalf of `user_id`.
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: Some(user_id.into()),
            ..Self::default()
        }
    }

    pub async fn add_channel(&self, channel: Channel) {
        self.channels.write().await.push(channel);
    }

    pub async fn add_message(&self, message: Message) {
        self.messages.write().await.push(message);
    }

    /// Makes every following call fail with a network error until reset.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    /// Number of calls that reached the backend.
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Events sent so far.
    pub async fn sent_events(&self) -> Vec<ChatEvent> {
        self.events.read().await.clone()
    }

    fn begin(&self, call: &'static str) -> ChatResult<()> {
        self.requests.fetch_add(1, Ordering::SeqCst);
        debug!(call, "In-memory API call");
        if self.offline.load(Ordering::SeqCst) {
            return Err(ChatError::network(format!("{call}: backend unreachable")));
        }
        Ok(())
    }

    async fn thread_replies(&self, message_id: &str) -> ChatResult<Vec<Message>> {
        let messages = self.messages.read().await;
        if !messages.iter().any(|m| m.id == message_id) {
            return Err(ChatError::not_found(format!(
                "Message '{message_id}' not found"
            )));
        }

        let mut replies: Vec<Message> = messages
            .iter()
            .filter(|m| m.parent_id.as_deref() == Some(message_id))
            .cloned()
            .collect();
        replies.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(replies)
    }
}

fn newest(mut replies: Vec<Message>, limit: usize) -> Vec<Message> {
    let skip = replies.len().saturating_sub(limit);
    replies.drain(..skip);
    replies
}

#[async_trait]
impl ChatApi for InMemoryChatApi {
    async fn get_replies(&self, message_id: &str, limit: usize) -> ChatResult<Vec<Message>> {
        self.begin("get_replies")?;
        let replies = self.thread_replies(message_id).await?;
        Ok(newest(replies, limit))
    }

    async fn get_replies_more(
        &self,
        message_id: &str,
        first_id: &str,
        limit: usize,
    ) -> ChatResult<Vec<Message>> {
        self.begin("get_replies_more")?;
        let replies = self.thread_replies(message_id).await?;

        let position = replies
            .iter()
            .position(|m| m.id == first_id)
            .ok_or_else(|| ChatError::not_found(format!("Reply '{first_id}' not found")))?;

        Ok(newest(replies[..position].to_vec(), limit))
    }

    async fn query_channels(&self, request: &QueryChannelsRequest) -> ChatResult<Vec<Channel>> {
        self.begin("query_channels")?;
        let channels = self.channels.read().await;

        Ok(channels
            .iter()
            .filter(|channel| request.filter.matches(&channel.as_document()))
            .skip(request.offset)
            .take(request.limit)
            .cloned()
            .collect())
    }

    async fn send_event(&self, event_type: &str, cid: &Cid) -> ChatResult<ChatEvent> {
        self.begin("send_event")?;
        let cid = cid.to_string();

        if !self.channels.read().await.iter().any(|c| c.cid == cid) {
            return Err(ChatError::not_found(format!("Channel '{cid}' not found")));
        }

        let event = ChatEvent {
            event_type: event_type.to_string(),
            cid,
            user_id: self.user_id.clone(),
            created_at: Utc::now(),
        };
        self.events.write().await.push(event.clone());
        Ok(event)
    }
}
