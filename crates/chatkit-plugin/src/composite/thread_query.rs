//! Composite over [`ThreadQueryListener`]s.

use std::sync::Arc;

use async_trait::async_trait;

use chatkit_core::ChatResult;
use chatkit_core::models::Message;

use super::{DispatchPolicy, FanOut};
use crate::listeners::{Listener, ThreadQueryListener};

/// Presents an ordered list of thread query listeners as one listener.
#[derive(Debug)]
pub struct ThreadQueryListenerComposite {
    inner: FanOut<dyn ThreadQueryListener>,
}

impl ThreadQueryListenerComposite {
    /// Creates a composite with the default dispatch policy.
    pub fn new(listeners: Vec<Arc<dyn ThreadQueryListener>>) -> Self {
        Self::with_policy(listeners, DispatchPolicy::default())
    }

    /// Creates a composite with an explicit dispatch policy.
    pub fn with_policy(listeners: Vec<Arc<dyn ThreadQueryListener>>, policy: DispatchPolicy) -> Self {
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

    /// The dispatch policy in effect.
    pub fn policy(&self) -> DispatchPolicy {
        self.inner.policy()
    }
}

impl Listener for ThreadQueryListenerComposite {
    fn name(&self) -> &str {
        "ThreadQueryListenerComposite"
    }
}

#[async_trait]
impl ThreadQueryListener for ThreadQueryListenerComposite {
    async fn on_get_replies_precondition(&self, message_id: &str, limit: usize) -> ChatResult<()> {
        self.inner
            .precondition("on_get_replies_precondition", |listener| {
                listener.on_get_replies_precondition(message_id, limit)
            })
            .await
    }

    async fn on_get_replies_request(&self, message_id: &str, limit: usize) {
        self.inner
            .notify("on_get_replies_request", |listener| {
                listener.on_get_replies_request(message_id, limit)
            })
            .await
    }

    async fn on_get_replies_result(
        &self,
        result: &ChatResult<Vec<Message>>,
        message_id: &str,
        limit: usize,
    ) {
        self.inner
            .notify("on_get_replies_result", |listener| {
                listener.on_get_replies_result(result, message_id, limit)
            })
            .await
    }

    async fn on_get_replies_more_precondition(
        &self,
        message_id: &str,
        first_id: &str,
        limit: usize,
    ) -> ChatResult<()> {
        self.inner
            .precondition("on_get_replies_more_precondition", |listener| {
                listener.on_get_replies_more_precondition(message_id, first_id, limit)
            })
            .await
    }

    async fn on_get_replies_more_request(&self, message_id: &str, first_id: &str, limit: usize) {
        self.inner
            .notify("on_get_replies_more_request", |listener| {
                listener.on_get_replies_more_request(message_id, first_id, limit)
            })
            .await
    }

    async fn on_get_replies_more_result(
        &self,
        result: &ChatResult<Vec<Message>>,
        message_id: &str,
        first_id: &str,
        limit: usize,
    ) {
        self.inner
            .notify("on_get_replies_more_result", |listener| {
                listener.on_get_replies_more_result(result, message_id, first_id, limit)
            })
            .await
    }
}
