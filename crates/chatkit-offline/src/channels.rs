//! Channel list queries kept offline.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use chatkit_core::models::{Channel, QueryChannelsRequest};
use chatkit_core::{ChatError, ChatResult};
use chatkit_plugin::listeners::{Listener, QueryChannelsListener};

use crate::state::{OfflineState, QueryChannelsState};

/// Tracks every channel list query and the channels it returned.
#[derive(Debug)]
pub struct QueryChannelsListenerState {
    state: Arc<OfflineState>,
}

impl QueryChannelsListenerState {
    pub fn new(state: Arc<OfflineState>) -> Self {
        Self { state }
    }

    /// Adds `channel` to every cached query whose filter matches it and that
    /// does not list it yet. Returns how many queries were updated.
    pub async fn add_channel_if_filter_matches(&self, channel: &Channel) -> usize {
        self.state.upsert_channels(std::slice::from_ref(channel)).await;

        let document = channel.as_document();
        let mut queries = self.state.queries.write().await;
        let mut updated = 0;

        for query in queries.values_mut() {
            if query.filter.matches(&document) && !query.cids.contains(&channel.cid) {
                query.cids.push(channel.cid.clone());
                updated += 1;
            }
        }

        if updated > 0 {
            info!(cid = %channel.cid, queries = updated, "Channel added to cached queries");
        }
        updated
    }
}

impl Listener for QueryChannelsListenerState {
    fn name(&self) -> &str {
        "offline.channels"
    }
}

#[async_trait]
impl QueryChannelsListener for QueryChannelsListenerState {
    async fn on_query_channels_precondition(
        &self,
        request: &QueryChannelsRequest,
    ) -> ChatResult<()> {
        let queries = self.state.queries.read().await;
        match queries.get(&request.query_key()) {
            Some(query) if query.is_busy() => Err(ChatError::precondition(
                "Another request for the same channel query is in progress",
            )),
            _ => Ok(()),
        }
    }

    async fn on_query_channels_request(&self, request: &QueryChannelsRequest) {
        let mut queries = self.state.queries.write().await;
        let query = queries
            .entry(request.query_key())
            .or_insert_with(|| QueryChannelsState::new(request.filter.clone()));

        if request.is_next_page() {
            query.loading_more = true;
        } else {
            query.loading = true;
        }
    }

    async fn on_query_channels_result(
        &self,
        result: &ChatResult<Vec<Channel>>,
        request: &QueryChannelsRequest,
    ) {
        if let Ok(channels) = result {
            self.state.upsert_channels(channels).await;
        }

        let mut queries = self.state.queries.write().await;
        let query = queries
            .entry(request.query_key())
            .or_insert_with(|| QueryChannelsState::new(request.filter.clone()));
        query.loading = false;
        query.loading_more = false;

        match result {
            Ok(channels) => {
                if !request.is_next_page() {
                    query.cids.clear();
                }
                for channel in channels {
                    if !query.cids.contains(&channel.cid) {
                        query.cids.push(channel.cid.clone());
                    }
                }
                query.end_of_channels = channels.len() < request.limit;
                query.recovery_needed = false;

                debug!(
                    received = channels.len(),
                    cached = query.cids.len(),
                    end_of_channels = query.end_of_channels,
                    "Channel query cached"
                );
            }
            Err(e) => {
                query.recovery_needed = true;
                warn!(error = %e, "Channel query failed, marked for recovery");
            }
        }
    }
}
