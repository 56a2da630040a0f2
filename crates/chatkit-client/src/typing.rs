//! Keystroke use case: typing indicators.

use chrono::Utc;
use tracing::{debug, warn};

use chatkit_core::{ChatResult, ErrorKind};
use chatkit_core::models::{Cid, TypingEvent};
use chatkit_plugin::listeners::TypingEventListener;

use crate::client::ChatClient;

impl ChatClient {
    /// Signals that the user is typing in `cid`.
    ///
    /// Returns `Ok(true)` when a `typing.start` event was sent and
    /// `Ok(false)` when a plugin skipped it (for example because one was
    /// sent moments ago). An empty or malformed cid is an error.
    pub async fn keystroke(&self, cid: &str) -> ChatResult<bool> {
        let cid = Cid::parse(cid)?;
        self.send_typing_event(TypingEvent::Start, &cid).await
    }

    /// Signals that the user stopped typing in `cid`.
    pub async fn stop_typing(&self, cid: &str) -> ChatResult<bool> {
        let cid = Cid::parse(cid)?;
        self.send_typing_event(TypingEvent::Stop, &cid).await
    }

    async fn send_typing_event(&self, event: TypingEvent, cid: &Cid) -> ChatResult<bool> {
        let at = Utc::now();
        let listener = self.plugins.typing_event_listener().await;

        if let Err(e) = listener.on_typing_event_precondition(event, cid, at).await {
            if e.kind == ErrorKind::Precondition {
                debug!(event = %event, cid = %cid, reason = %e, "Typing event skipped");
            } else {
                warn!(event = %event, cid = %cid, error = %e, "Typing listener faulted, event skipped");
            }
            return Ok(false);
        }

        listener.on_typing_event_request(event, cid, at).await;
        let result = self.api.send_event(event.as_str(), cid).await;
        listener.on_typing_event_result(&result, event, cid, at).await;

        result.map(|_| true)
    }
}
