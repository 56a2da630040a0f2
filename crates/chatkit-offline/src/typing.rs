//! Typing indicator throttling.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tracing::debug;

use chatkit_core::models::{ChatEvent, Cid, TypingEvent};
use chatkit_core::{ChatError, ChatResult};
use chatkit_plugin::listeners::{Listener, TypingEventListener};

use crate::state::OfflineState;

/// Skips `typing.start` events sent too close to the previous one and
/// `typing.stop` events with no matching start.
#[derive(Debug)]
pub struct TypingEventListenerState {
    state: Arc<OfflineState>,
    start_throttle: TimeDelta,
}

impl TypingEventListenerState {
    pub fn new(state: Arc<OfflineState>, start_throttle_ms: u64) -> Self {
        Self {
            state,
            start_throttle: TimeDelta::milliseconds(start_throttle_ms as i64),
        }
    }
}

impl Listener for TypingEventListenerState {
    fn name(&self) -> &str {
        "offline.typing"
    }
}

#[async_trait]
impl TypingEventListener for TypingEventListenerState {
    async fn on_typing_event_precondition(
        &self,
        event: TypingEvent,
        cid: &Cid,
        at: DateTime<Utc>,
    ) -> ChatResult<()> {
        let typing = self.state.typing.read().await;
        let last_start_at = typing.get(cid).and_then(|state| state.last_start_at);

        match (event, last_start_at) {
            (TypingEvent::Start, Some(last)) if at - last < self.start_throttle => Err(
                ChatError::precondition(format!("typing.start on '{cid}' was sent recently")),
            ),
            (TypingEvent::Stop, None) => Err(ChatError::precondition(format!(
                "no typing.start to stop on '{cid}'"
            ))),
            _ => Ok(()),
        }
    }

    async fn on_typing_event_request(&self, event: TypingEvent, cid: &Cid, _at: DateTime<Utc>) {
        debug!(event = %event, cid = %cid, "Sending typing event");
    }

    async fn on_typing_event_result(
        &self,
        result: &ChatResult<ChatEvent>,
        event: TypingEvent,
        cid: &Cid,
        at: DateTime<Utc>,
    ) {
        if result.is_err() {
            return;
        }

        let mut typing = self.state.typing.write().await;
        match event {
            TypingEvent::Start => {
                typing.entry(cid.clone()).or_default().last_start_at = Some(at);
            }
            TypingEvent::Stop => {
                typing.remove(cid);
            }
        }
    }
}
