//! Chat users.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A chat user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user id.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Avatar URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Whether the user is currently online.
    #[serde(default)]
    pub online: bool,
    /// Custom fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl User {
    /// Creates a user with the given id and name.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            image: None,
            online: false,
            extra: serde_json::Map::new(),
        }
    }
}

/// Replaces every user that has a fresher copy in `fresh`, keyed by id.
///
/// Users without a fresher copy are kept as they are and the input order is
/// preserved.
pub fn update_users<'a, I>(users: I, fresh: &HashMap<String, User>) -> Vec<User>
where
    I: IntoIterator<Item = &'a User>,
{
    users
        .into_iter()
        .map(|user| fresh.get(&user.id).unwrap_or(user).clone())
        .collect()
}
