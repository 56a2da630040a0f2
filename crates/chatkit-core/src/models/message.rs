//! Chat messages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::User;

/// A message in a channel or a thread.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Unique message id.
    pub id: String,
    /// Channel the message belongs to.
    pub cid: String,
    /// Message text.
    #[serde(default)]
    pub text: String,
    /// Parent message id when this message is a thread reply.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    /// Author.
    pub user: User,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Creates a top-level message with a generated id.
    pub fn new(cid: impl Into<String>, user: User, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            cid: cid.into(),
            text: text.into(),
            parent_id: None,
            user,
            created_at: Utc::now(),
        }
    }

    /// Turns this message into a reply to `parent_id`.
    pub fn in_thread(mut self, parent_id: impl Into<String>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Sets the creation time.
    pub fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = created_at;
        self
    }

    /// Returns whether this message is a thread reply.
    pub fn is_reply(&self) -> bool {
        self.parent_id.is_some()
    }
}
