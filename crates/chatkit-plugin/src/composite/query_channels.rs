//! Composite over [`QueryChannelsListener`]s.

use std::sync::Arc;

use async_trait::async_trait;

use chatkit_core::ChatResult;
use chatkit_core::models::{Channel, QueryChannelsRequest};

use super::{DispatchPolicy, FanOut};
use crate::listeners::{Listener, QueryChannelsListener};

/// Presents an ordered list of channel query listeners as one listener.
#[derive(Debug)]
pub struct QueryChannelsListenerComposite {
    inner: FanOut<dyn QueryChannelsListener>,
}

impl QueryChannelsListenerComposite {
    /// Creates a composite with the default dispatch policy.
    pub fn new(listeners: Vec<Arc<dyn QueryChannelsListener>>) -> Self {
        Self::with_policy(listeners, DispatchPolicy::default())
    }

    /// Creates a composite with an explicit dispatch policy.
    pub fn with_policy(
        listeners: Vec<Arc<dyn QueryChannelsListener>>,
        policy: DispatchPolicy,
    ) -> Self {
        Self {
            inner: FanOut::new(listeners, policy),
        }
    }

    /// Number of wrapped listeners.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns whether the composite wraps no listeners.
    pub fn is_empty(&self) -> bool {
        self.inner.len() == 0
    }
}

impl Listener for QueryChannelsListenerComposite {
    fn name(&self) -> &str {
        "QueryChannelsListenerComposite"
    }
}

#[async_trait]
impl QueryChannelsListener for QueryChannelsListenerComposite {
    async fn on_query_channels_precondition(
        &self,
        request: &QueryChannelsRequest,
    ) -> ChatResult<()> {
        self.inner
            .precondition("on_query_channels_precondition", |listener| {
                listener.on_query_channels_precondition(request)
            })
            .await
    }

    async fn on_query_channels_request(&self, request: &QueryChannelsRequest) {
        self.inner
            .notify("on_query_channels_request", |listener| {
                listener.on_query_channels_request(request)
            })
            .await
    }

    async fn on_query_channels_result(
        &self,
        result: &ChatResult<Vec<Channel>>,
        request: &QueryChannelsRequest,
    ) {
        self.inner
            .notify("on_query_channels_result", |listener| {
                listener.on_query_channels_result(result, request)
            })
            .await
    }
}
