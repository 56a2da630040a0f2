//! Channel events sent by the client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Typing indicator events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypingEvent {
    /// The user started typing.
    #[serde(rename = "typing.start")]
    Start,
    /// The user stopped typing.
    #[serde(rename = "typing.stop")]
    Stop,
}

impl TypingEvent {
    /// Returns the wire name of this event.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "typing.start",
            Self::Stop => "typing.stop",
        }
    }
}

impl std::fmt::Display for TypingEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An event acknowledged by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatEvent {
    /// Event type, e.g. `typing.start`.
    #[serde(rename = "type")]
    pub event_type: String,
    /// Channel the event was sent to.
    pub cid: String,
    /// Sender.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    /// Time the event was created.
    pub created_at: DateTime<Utc>,
}
