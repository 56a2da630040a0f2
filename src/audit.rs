//! Audit plugin: logs every thread, channel, and typing hook it sees.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use tracing::info;

use chatkit_plugin::prelude::*;

/// Counts and logs hook invocations. Never vetoes anything.
#[derive(Debug, Default)]
pub struct AuditListener {
    seen: AtomicUsize,
}

impl AuditListener {
    fn record(&self, hook: &str, detail: &str) {
        let seen = self.seen.fetch_add(1, Ordering::SeqCst) + 1;
        info!(hook, detail, seen, "audit");
    }

    pub fn seen(&self) -> usize {
        self.seen.load(Ordering::SeqCst)
    }
}

fn outcome<T>(result: &ChatResult<T>) -> &'static str {
    if result.is_ok() { "ok" } else { "failed" }
}

impl Listener for AuditListener {
    fn name(&self) -> &str {
        "audit"
    }
}

#[async_trait]
impl ThreadQueryListener for AuditListener {
    async fn on_get_replies_precondition(&self, message_id: &str, _limit: usize) -> ChatResult<()> {
        self.record("get_replies_precondition", message_id);
        Ok(())
    }

    async fn on_get_replies_request(&self, message_id: &str, _limit: usize) {
        self.record("get_replies_request", message_id);
    }

    async fn on_get_replies_result(
        &self,
        result: &ChatResult<Vec<Message>>,
        message_id: &str,
        _limit: usize,
    ) {
        self.record("get_replies_result", &format!("{message_id} {}", outcome(result)));
    }

    async fn on_get_replies_more_precondition(
        &self,
        message_id: &str,
        first_id: &str,
        _limit: usize,
    ) -> ChatResult<()> {
        self.record("get_replies_more_precondition", &format!("{message_id} < {first_id}"));
        Ok(())
    }

    async fn on_get_replies_more_request(&self, message_id: &str, first_id: &str, _limit: usize) {
        self.record("get_replies_more_request", &format!("{message_id} < {first_id}"));
    }

    async fn on_get_replies_more_result(
        &self,
        result: &ChatResult<Vec<Message>>,
        message_id: &str,
        _first_id: &str,
        _limit: usize,
    ) {
        self.record("get_replies_more_result", &format!("{message_id} {}", outcome(result)));
    }
}

#[async_trait]
impl QueryChannelsListener for AuditListener {
    async fn on_query_channels_precondition(
        &self,
        request: &QueryChannelsRequest,
    ) -> ChatResult<()> {
        self.record("query_channels_precondition", &format!("offset {}", request.offset));
        Ok(())
    }

    async fn on_query_channels_request(&self, request: &QueryChannelsRequest) {
        self.record("query_channels_request", &format!("offset {}", request.offset));
    }

    async fn on_query_channels_result(
        &self,
        result: &ChatResult<Vec<Channel>>,
        _request: &QueryChannelsRequest,
    ) {
        self.record("query_channels_result", outcome(result));
    }
}

#[async_trait]
impl TypingEventListener for AuditListener {
    async fn on_typing_event_precondition(
        &self,
        event: TypingEvent,
        cid: &Cid,
        _at: DateTime<Utc>,
    ) -> ChatResult<()> {
        self.record("typing_event_precondition", &format!("{event} {cid}"));
        Ok(())
    }

    async fn on_typing_event_request(&self, event: TypingEvent, cid: &Cid, _at: DateTime<Utc>) {
        self.record("typing_event_request", &format!("{event} {cid}"));
    }

    async fn on_typing_event_result(
        &self,
        result: &ChatResult<ChatEvent>,
        event: TypingEvent,
        cid: &Cid,
        _at: DateTime<Utc>,
    ) {
        self.record("typing_event_result", &format!("{event} {cid} {}", outcome(result)));
    }
}

#[derive(Debug, Default)]
pub struct AuditPlugin {
    listener: Arc<AuditListener>,
}

impl AuditPlugin {
    pub fn listener(&self) -> &Arc<AuditListener> {
        &self.listener
    }
}

#[async_trait]
impl Plugin for AuditPlugin {
    fn info(&self) -> PluginInfo {
        plugin_info!(
            id: "audit",
            name: "Audit Log",
            version: env!("CARGO_PKG_VERSION"),
            description: "Logs every listener hook"
        )
    }

    async fn on_unload(&self) -> ChatResult<()> {
        info!(hooks_seen = self.listener.seen(), "Audit plugin unloaded");
        Ok(())
    }

    fn thread_query_listener(&self) -> Option<Arc<dyn ThreadQueryListener>> {
        Some(self.listener.clone())
    }

    fn query_channels_listener(&self) -> Option<Arc<dyn QueryChannelsListener>> {
        Some(self.listener.clone())
    }

    fn typing_event_listener(&self) -> Option<Arc<dyn TypingEventListener>> {
        Some(self.listener.clone())
    }
}
