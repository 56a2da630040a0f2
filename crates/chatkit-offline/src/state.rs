//! In-memory state shared by the offline listeners.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;

use chatkit_core::FilterObject;
use chatkit_core::models::{Channel, Cid, Message, User, update_users};

/// Cached replies of one thread.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ThreadState {
    /// Replies ordered by creation time.
    pub messages: Vec<Message>,
    /// Whether the first page is being loaded.
    pub loading: bool,
    /// Whether older replies are being loaded.
    pub loading_older: bool,
    /// Whether the oldest reply has been reached.
    pub end_of_older_messages: bool,
}

impl ThreadState {
    /// Inserts or replaces replies by id, keeping creation order.
    pub(crate) fn upsert(&mut self, replies: &[Message]) {
        for reply in replies {
            match self.messages.iter_mut().find(|m| m.id == reply.id) {
                Some(existing) => *existing = reply.clone(),
                None => self.messages.push(reply.clone()),
            }
        }
        self.messages
            .sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
    }

    /// Replaces every author with the freshest known copy.
    pub(crate) fn refresh_authors(&mut self, users: &HashMap<String, User>) {
        let authors = update_users(self.messages.iter().map(|m| &m.user), users);
        for (message, author) in self.messages.iter_mut().zip(authors) {
            message.user = author;
        }
    }
}

/// Cached state of one logical channel list query.
#[derive(Debug, Clone, Serialize)]
pub struct QueryChannelsState {
    /// The query's filter.
    pub filter: FilterObject,
    /// Matching channel ids in result order.
    pub cids: Vec<String>,
    /// Whether the first page is being loaded.
    pub loading: bool,
    /// Whether a further page is being loaded.
    pub loading_more: bool,
    /// Whether the last page has been reached.
    pub end_of_channels: bool,
    /// Whether the last request failed and the query must be rerun.
    pub recovery_needed: bool,
}

impl QueryChannelsState {
    pub(crate) fn new(filter: FilterObject) -> Self {
        Self {
            filter,
            cids: Vec::new(),
            loading: false,
            loading_more: false,
            end_of_channels: false,
            recovery_needed: false,
        }
    }

    pub(crate) fn is_busy(&self) -> bool {
        self.loading || self.loading_more
    }
}

/// Typing bookkeeping for one channel.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct TypingState {
    pub(crate) last_start_at: Option<DateTime<Utc>>,
}

/// All offline state, shared by the plugin's listeners.
#[derive(Debug, Default)]
pub struct OfflineState {
    pub(crate) threads: RwLock<HashMap<String, ThreadState>>,
    pub(crate) queries: RwLock<HashMap<String, QueryChannelsState>>,
    pub(crate) channels: RwLock<HashMap<String, Channel>>,
    pub(crate) users: RwLock<HashMap<String, User>>,
    pub(crate) typing: RwLock<HashMap<Cid, TypingState>>,
}

impl OfflineState {
    /// Creates empty state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of a thread.
    pub async fn thread(&self, parent_id: &str) -> Option<ThreadState> {
        self.threads.read().await.get(parent_id).cloned()
    }

    /// Snapshot of a channel query by its query key.
    pub async fn query(&self, query_key: &str) -> Option<QueryChannelsState> {
        self.queries.read().await.get(query_key).cloned()
    }

    /// A cached channel.
    pub async fn channel(&self, cid: &str) -> Option<Channel> {
        self.channels.read().await.get(cid).cloned()
    }

    /// A cached user.
    pub async fn user(&self, user_id: &str) -> Option<User> {
        self.users.read().await.get(user_id).cloned()
    }

    /// Records fresher copies of users.
    pub async fn upsert_users<'a, I>(&self, users: I)
    where
        I: IntoIterator<Item = &'a User>,
    {
        let mut cache = self.users.write().await;
        for user in users {
            cache.insert(user.id.clone(), user.clone());
        }
    }

    /// Records channels.
    pub(crate) async fn upsert_channels(&self, channels: &[Channel]) {
        let mut cache = self.channels.write().await;
        for channel in channels {
            cache.insert(channel.cid.clone(), channel.clone());
        }
    }
}
