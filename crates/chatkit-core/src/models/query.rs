//! Channel list queries.

use serde::{Deserialize, Serialize};

use crate::filter::FilterObject;

/// Sort direction for a query field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortDirection {
    /// Smallest first.
    Ascending,
    /// Largest first.
    Descending,
}

/// One sort clause on a named field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    /// The field to sort on.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

/// An ordered list of sort fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuerySort {
    /// Sort fields, most significant first.
    pub fields: Vec<SortField>,
}

impl QuerySort {
    /// An empty sort.
    pub fn new() -> Self {
        Self { fields: Vec::new() }
    }

    /// Appends an ascending field.
    pub fn asc(mut self, field: &str) -> Self {
        self.fields.push(SortField {
            field: field.to_string(),
            direction: SortDirection::Ascending,
        });
        self
    }

    /// Appends a descending field.
    pub fn desc(mut self, field: &str) -> Self {
        self.fields.push(SortField {
            field: field.to_string(),
            direction: SortDirection::Descending,
        });
        self
    }
}

impl Default for QuerySort {
    fn default() -> Self {
        Self::new().desc("last_message_at")
    }
}

/// A request for one page of channels.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryChannelsRequest {
    /// Which channels to return.
    pub filter: FilterObject,
    /// How to order them.
    pub sort: QuerySort,
    /// Number of channels to skip.
    pub offset: usize,
    /// Page size.
    pub limit: usize,
    /// Number of messages to include per channel.
    pub message_limit: usize,
}

impl QueryChannelsRequest {
    /// Creates a first-page request.
    pub fn new(filter: FilterObject, limit: usize) -> Self {
        Self {
            filter,
            sort: QuerySort::default(),
            offset: 0,
            limit,
            message_limit: 0,
        }
    }

    /// Sets the offset.
    pub fn with_offset(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }

    /// Sets the sort.
    pub fn with_sort(mut self, sort: QuerySort) -> Self {
        self.sort = sort;
        self
    }

    /// Returns whether this request asks for a page after the first one.
    pub fn is_next_page(&self) -> bool {
        self.offset > 0
    }

    /// A stable key identifying the logical query (filter and sort),
    /// independent of paging.
    pub fn query_key(&self) -> String {
        let filter = serde_json::to_string(&self.filter).unwrap_or_default();
        let sort = serde_json::to_string(&self.sort).unwrap_or_default();
        format!("{filter}|{sort}")
    }
}
