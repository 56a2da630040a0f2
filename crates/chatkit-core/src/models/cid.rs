//! Channel identifiers of the form `"<type>:<id>"`.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChatError;

/// A parsed channel identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Cid {
    channel_type: String,
    channel_id: String,
}

impl Cid {
    /// Builds a cid from its two parts.
    pub fn new(channel_type: &str, channel_id: &str) -> Result<Self, ChatError> {
        if channel_type.is_empty() || channel_id.is_empty() {
            return Err(ChatError::validation(format!(
                "cid needs a type and an id, got '{channel_type}:{channel_id}'"
            )));
        }
        Ok(Self {
            channel_type: channel_type.to_string(),
            channel_id: channel_id.to_string(),
        })
    }

    /// Parses a `"<type>:<id>"` string.
    pub fn parse(raw: &str) -> Result<Self, ChatError> {
        if raw.is_empty() {
            return Err(ChatError::validation("cid can't be empty"));
        }
        let (channel_type, channel_id) = raw.split_once(':').ok_or_else(|| {
            ChatError::validation(format!("cid '{raw}' is not in the format type:id"))
        })?;
        Self::new(channel_type, channel_id)
    }

    /// Channel type, e.g. `messaging`.
    pub fn channel_type(&self) -> &str {
        &self.channel_type
    }

    /// Channel id within its type.
    pub fn channel_id(&self) -> &str {
        &self.channel_id
    }
}

impl fmt::Display for Cid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.channel_type, self.channel_id)
    }
}

impl FromStr for Cid {
    type Err = ChatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Cid {
    type Error = ChatError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Cid> for String {
    fn from(cid: Cid) -> Self {
        cid.to_string()
    }
}
