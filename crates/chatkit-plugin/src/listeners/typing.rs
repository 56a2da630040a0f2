//! Hooks around typing indicator events.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use chatkit_core::ChatResult;
use chatkit_core::models::{ChatEvent, Cid, TypingEvent};

use super::Listener;

/// Observes and gates typing start/stop events.
#[async_trait]
pub trait TypingEventListener: Listener {
    /// Runs before the event is sent. A failure means the event is skipped,
    /// not that the keystroke was invalid.
    async fn on_typing_event_precondition(
        &self,
        event: TypingEvent,
        cid: &Cid,
        at: DateTime<Utc>,
    ) -> ChatResult<()>;

    /// Runs when the event is sent.
    async fn on_typing_event_request(&self, event: TypingEvent, cid: &Cid, at: DateTime<Utc>);

    /// Runs with the send outcome.
    async fn on_typing_event_result(
        &self,
        result: &ChatResult<ChatEvent>,
        event: TypingEvent,
        cid: &Cid,
        at: DateTime<Utc>,
    );
}
