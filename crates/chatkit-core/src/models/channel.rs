//! Chat channels.

use serde::{Deserialize, Serialize};

/// A channel, serialized in the shape channel filters address: `type`,
/// `id`, `cid`, `members` (user ids) and every custom field at the top
/// level.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Channel {
    /// Channel type, e.g. `messaging`.
    #[serde(rename = "type")]
    pub channel_type: String,
    /// Channel id within its type.
    pub id: String,
    /// Full `type:id` identifier.
    pub cid: String,
    /// Ids of member users.
    #[serde(default)]
    pub members: Vec<String>,
    /// Custom fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Channel {
    /// Creates a channel with no members and no custom fields.
    pub fn new(channel_type: impl Into<String>, id: impl Into<String>) -> Self {
        let channel_type = channel_type.into();
        let id = id.into();
        Self {
            cid: format!("{channel_type}:{id}"),
            channel_type,
            id,
            members: Vec::new(),
            extra: serde_json::Map::new(),
        }
    }

    /// Adds member user ids.
    pub fn with_members<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.members.extend(members.into_iter().map(Into::into));
        self
    }

    /// Sets a custom field.
    pub fn with_extra(mut self, key: &str, value: serde_json::Value) -> Self {
        self.extra.insert(key.to_string(), value);
        self
    }

    /// Returns the JSON document filters are evaluated against.
    pub fn as_document(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}
