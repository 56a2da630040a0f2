//! Channel filter builder and evaluator.
//!
//! Filters serialize to the backend's query document shape, e.g.
//! `{"$and": [{"type": {"$eq": "messaging"}}, {"members": {"$in": ["u1"]}}]}`,
//! and can also be evaluated locally against a channel document so cached
//! queries can decide whether a newly seen channel belongs to them.

use serde::{Serialize, Serializer};
use serde_json::{Value, json};

use crate::models::user::User;

/// A composable channel filter.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterObject {
    /// Matches everything.
    Neutral,
    /// Field equals value (or, for array fields, contains it).
    Eq { field: String, value: Value },
    /// Negation of [`FilterObject::Eq`].
    Ne { field: String, value: Value },
    /// Field equals one of the values (or, for array fields, shares one).
    In { field: String, values: Vec<Value> },
    /// Field is present and not null.
    Exists { field: String },
    /// Field is absent or null.
    NotExists { field: String },
    /// Every sub-filter matches.
    And(Vec<FilterObject>),
    /// At least one sub-filter matches.
    Or(Vec<FilterObject>),
    /// No sub-filter matches.
    Nor(Vec<FilterObject>),
}

impl FilterObject {
    pub fn neutral() -> Self {
        Self::Neutral
    }

    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self::Eq {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn ne(field: &str, value: impl Into<Value>) -> Self {
        Self::Ne {
            field: field.to_string(),
            value: value.into(),
        }
    }

    pub fn is_in<I, V>(field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Self::In {
            field: field.to_string(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    pub fn exists(field: &str) -> Self {
        Self::Exists {
            field: field.to_string(),
        }
    }

    pub fn not_exists(field: &str) -> Self {
        Self::NotExists {
            field: field.to_string(),
        }
    }

    pub fn and(filters: Vec<FilterObject>) -> Self {
        Self::And(filters)
    }

    pub fn or(filters: Vec<FilterObject>) -> Self {
        Self::Or(filters)
    }

    pub fn nor(filters: Vec<FilterObject>) -> Self {
        Self::Nor(filters)
    }

    /// Renders the backend query document.
    pub fn to_json(&self) -> Value {
        match self {
            Self::Neutral => json!({}),
            Self::Eq { field, value } => json!({ field: { "$eq": value } }),
            Self::Ne { field, value } => json!({ field: { "$ne": value } }),
            Self::In { field, values } => json!({ field: { "$in": values } }),
            Self::Exists { field } => json!({ field: { "$exists": true } }),
            Self::NotExists { field } => json!({ field: { "$exists": false } }),
            Self::And(filters) => json!({ "$and": Self::render_all(filters) }),
            Self::Or(filters) => json!({ "$or": Self::render_all(filters) }),
            Self::Nor(filters) => json!({ "$nor": Self::render_all(filters) }),
        }
    }

    fn render_all(filters: &[FilterObject]) -> Vec<Value> {
        filters.iter().map(Self::to_json).collect()
    }

    /// Evaluates the filter against a document.
    pub fn matches(&self, document: &Value) -> bool {
        match self {
            Self::Neutral => true,
            Self::Eq { field, value } => field_equals(document.get(field), value),
            Self::Ne { field, value } => !field_equals(document.get(field), value),
            Self::In { field, values } => values
                .iter()
                .any(|value| field_equals(document.get(field), value)),
            Self::Exists { field } => document.get(field).is_some_and(|v| !v.is_null()),
            Self::NotExists { field } => document.get(field).is_none_or(Value::is_null),
            Self::And(filters) => filters.iter().all(|f| f.matches(document)),
            Self::Or(filters) => filters.iter().any(|f| f.matches(document)),
            Self::Nor(filters) => !filters.iter().any(|f| f.matches(document)),
        }
    }
}

fn field_equals(actual: Option<&Value>, expected: &Value) -> bool {
    match actual {
        Some(Value::Array(items)) if !expected.is_array() => items.contains(expected),
        Some(actual) => actual == expected,
        None => false,
    }
}

impl Serialize for FilterObject {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// The filter used by channel lists: messaging channels the user is a
/// member of, excluding drafts. Without a user the membership clause is
/// neutral.
pub fn default_channel_list_filter(user: Option<&User>) -> FilterObject {
    let membership = match user {
        Some(user) => FilterObject::is_in("members", [user.id.as_str()]),
        None => FilterObject::neutral(),
    };

    FilterObject::and(vec![
        FilterObject::eq("type", "messaging"),
        membership,
        FilterObject::or(vec![
            FilterObject::not_exists("draft"),
            FilterObject::ne("draft", true),
        ]),
    ])
}
