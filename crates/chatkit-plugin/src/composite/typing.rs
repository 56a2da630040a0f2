//! Composite over [`TypingEventListener`]s.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use chatkit_core::ChatResult;
use chatkit_core::models::{ChatEvent, Cid, TypingEvent};

use super::{DispatchPolicy, FanOut};
use crate::listeners::{Listener, TypingEventListener};

/// Presents an ordered list of typing event listeners as one listener.
#[derive(Debug)]
pub struct TypingEventListenerComposite {
    inner: FanOut<dyn TypingEventListener>,
}

impl TypingEventListenerComposite {
    /// Creates a composite with the default dispatch policy.
    pub fn new(listeners: Vec<Arc<dyn TypingEventListener>>) -> Self {
        Self::with_policy(listeners, DispatchPolicy::default())
    }

    /// Creates a composite with an explicit dispatch policy.
    pub fn with_policy(listeners: Vec<Arc<dyn TypingEventListener>>, policy: DispatchPolicy) -> Self {
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

impl Listener for TypingEventListenerComposite {
    fn name(&self) -> &str {
        "TypingEventListenerComposite"
    }
}

#[async_trait]
impl TypingEventListener for TypingEventListenerComposite {
    async fn on_typing_event_precondition(
        &self,
        event: TypingEvent,
        cid: &Cid,
        at: DateTime<Utc>,
    ) -> ChatResult<()> {
        self.inner
            .precondition("on_typing_event_precondition", |listener| {
                listener.on_typing_event_precondition(event, cid, at)
            })
            .await
    }

    async fn on_typing_event_request(&self, event: TypingEvent, cid: &Cid, at: DateTime<Utc>) {
        self.inner
            .notify("on_typing_event_request", |listener| {
                listener.on_typing_event_request(event, cid, at)
            })
            .await
    }

    async fn on_typing_event_result(
        &self,
        result: &ChatResult<ChatEvent>,
        event: TypingEvent,
        cid: &Cid,
        at: DateTime<Utc>,
    ) {
        self.inner
            .notify("on_typing_event_result", |listener| {
                listener.on_typing_event_result(result, event, cid, at)
            })
            .await
    }
}
