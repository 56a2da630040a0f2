//! Recording listeners shared by the composite tests.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use chatkit_core::models::{Channel, ChatEvent, Cid, Message, QueryChannelsRequest, TypingEvent};
use chatkit_core::{ChatError, ChatResult};

use crate::listeners::{Listener, QueryChannelsListener, ThreadQueryListener, TypingEventListener};

/// Shared, ordered record of hook invocations.
#[derive(Debug, Clone, Default)]
pub(crate) struct CallLog(Arc<Mutex<Vec<String>>>);

impl CallLog {
    pub(crate) fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub(crate) fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub(crate) fn count(&self, pattern: &str) -> usize {
        self.0
            .lock()
            .unwrap()
            .iter()
            .filter(|entry| entry.contains(pattern))
            .count()
    }
}

#[derive(Debug, Clone)]
pub(crate) enum Behavior {
    Succeed,
    Fail(&'static str),
    /// Fails the first precondition, succeeds afterwards.
    FailOnce(&'static str),
    Panic,
    Stall(Duration),
}

#[derive(Debug)]
pub(crate) struct Recorder {
    label: String,
    log: CallLog,
    behavior: Behavior,
    failed_once: AtomicBool,
}

impl Recorder {
    pub(crate) fn new(label: &str, log: CallLog, behavior: Behavior) -> Self {
        Self {
            label: label.to_string(),
            log,
            behavior,
            failed_once: AtomicBool::new(false),
        }
    }

    async fn act(&self, entry: String) -> ChatResult<()> {
        match &self.behavior {
            Behavior::Panic => panic!("listener exploded"),
            Behavior::Stall(duration) => tokio::time::sleep(*duration).await,
            _ => {}
        }

        self.log.push(format!("{}:{}", self.label, entry));

        match &self.behavior {
            Behavior::Fail(reason) => Err(ChatError::precondition(*reason)),
            Behavior::FailOnce(reason) if !self.failed_once.swap(true, Ordering::SeqCst) => {
                Err(ChatError::precondition(*reason))
            }
            _ => Ok(()),
        }
    }
}

fn outcome<T>(result: &ChatResult<T>) -> &'static str {
    if result.is_ok() { "ok" } else { "err" }
}

impl Listener for Recorder {
    fn name(&self) -> &str {
        &self.label
    }
}

#[async_trait]
impl ThreadQueryListener for Recorder {
    async fn on_get_replies_precondition(&self, message_id: &str, limit: usize) -> ChatResult<()> {
        self.act(format!("on_get_replies_precondition:{message_id}:{limit}"))
            .await
    }

    async fn on_get_replies_request(&self, message_id: &str, limit: usize) {
        let _ = self
            .act(format!("on_get_replies_request:{message_id}:{limit}"))
            .await;
    }

    async fn on_get_replies_result(
        &self,
        result: &ChatResult<Vec<Message>>,
        message_id: &str,
        limit: usize,
    ) {
        let _ = self
            .act(format!(
                "on_get_replies_result:{message_id}:{limit}:{}",
                outcome(result)
            ))
            .await;
    }

    async fn on_get_replies_more_precondition(
        &self,
        message_id: &str,
        first_id: &str,
        limit: usize,
    ) -> ChatResult<()> {
        self.act(format!(
            "on_get_replies_more_precondition:{message_id}:{first_id}:{limit}"
        ))
        .await
    }

    async fn on_get_replies_more_request(&self, message_id: &str, first_id: &str, limit: usize) {
        let _ = self
            .act(format!(
                "on_get_replies_more_request:{message_id}:{first_id}:{limit}"
            ))
            .await;
    }

    async fn on_get_replies_more_result(
        &self,
        result: &ChatResult<Vec<Message>>,
        message_id: &str,
        first_id: &str,
        limit: usize,
    ) {
        let _ = self
            .act(format!(
                "on_get_replies_more_result:{message_id}:{first_id}:{limit}:{}",
                outcome(result)
            ))
            .await;
    }
}

#[async_trait]
impl QueryChannelsListener for Recorder {
    async fn on_query_channels_precondition(
        &self,
        request: &QueryChannelsRequest,
    ) -> ChatResult<()> {
        self.act(format!(
            "on_query_channels_precondition:{}:{}",
            request.offset, request.limit
        ))
        .await
    }

    async fn on_query_channels_request(&self, request: &QueryChannelsRequest) {
        let _ = self
            .act(format!(
                "on_query_channels_request:{}:{}",
                request.offset, request.limit
            ))
            .await;
    }

    async fn on_query_channels_result(
        &self,
        result: &ChatResult<Vec<Channel>>,
        request: &QueryChannelsRequest,
    ) {
        let _ = self
            .act(format!(
                "on_query_channels_result:{}:{}:{}",
                request.offset,
                request.limit,
                outcome(result)
            ))
            .await;
    }
}

#[async_trait]
impl TypingEventListener for Recorder {
    async fn on_typing_event_precondition(
        &self,
        event: TypingEvent,
        cid: &Cid,
        _at: DateTime<Utc>,
    ) -> ChatResult<()> {
        self.act(format!("on_typing_event_precondition:{event}:{cid}"))
            .await
    }

    async fn on_typing_event_request(&self, event: TypingEvent, cid: &Cid, _at: DateTime<Utc>) {
        let _ = self
            .act(format!("on_typing_event_request:{event}:{cid}"))
            .await;
    }

    async fn on_typing_event_result(
        &self,
        result: &ChatResult<ChatEvent>,
        event: TypingEvent,
        cid: &Cid,
        _at: DateTime<Utc>,
    ) {
        let _ = self
            .act(format!(
                "on_typing_event_result:{event}:{cid}:{}",
                outcome(result)
            ))
            .await;
    }
}
