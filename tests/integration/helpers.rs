//! Shared test helpers for integration tests.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use chatkit_client::{ChatClient, InMemoryChatApi};
use chatkit_core::config::AppConfig;
use chatkit_core::models::User;
use chatkit_offline::OfflinePlugin;
use chatkit_plugin::PluginManager;
use chatkit_plugin::prelude::*;

pub const PARENT_ID: &str = "parent-1";
pub const GENERAL: &str = "messaging:general";

/// Test application context
pub struct TestApp {
    /// In-memory transport, for seeding and inspecting requests
    pub api: Arc<InMemoryChatApi>,
    /// Plugin manager shared with the client
    pub plugins: Arc<PluginManager>,
    /// The offline plugin, already loaded
    pub offline: Arc<OfflinePlugin>,
    /// Client under test
    pub client: ChatClient,
    /// The acting user
    pub me: User,
}

impl TestApp {
    /// Create a test application with default configuration
    pub async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Create a test application from an inline TOML configuration
    pub async fn from_toml(source: &str) -> Self {
        let config = AppConfig::from_toml(source).expect("Failed to parse test config");
        Self::with_config(config).await
    }

    /// Create a test application with an explicit configuration
    pub async fn with_config(config: AppConfig) -> Self {
        let me = User::new("u1", "Ann");
        let api = Arc::new(InMemoryChatApi::new(me.id.clone()));
        seed(&api, &me).await;

        let plugins = Arc::new(PluginManager::new(config.plugins.clone()));
        let offline = Arc::new(OfflinePlugin::new(&config.offline));
        plugins
            .load_plugin(offline.clone())
            .await
            .expect("Failed to load offline plugin");

        let client = ChatClient::new(api.clone(), plugins.clone(), config.client.clone());

        Self {
            api,
            plugins,
            offline,
            client,
            me,
        }
    }

    /// Load an extra plugin after the offline one
    pub async fn load(&self, plugin: Arc<dyn Plugin>) -> bool {
        self.plugins
            .load_plugin(plugin)
            .await
            .expect("Failed to load plugin")
    }
}

async fn seed(api: &InMemoryChatApi, me: &User) {
    let friend = User::new("u2", "Bob");

    api.add_channel(Channel::new("messaging", "general").with_members([&me.id, &friend.id]))
        .await;
    api.add_channel(Channel::new("messaging", "random").with_members([&me.id]))
        .await;
    api.add_channel(Channel::new("messaging", "private").with_members([&friend.id]))
        .await;

    let mut parent = Message::new(GENERAL, friend.clone(), "parent");
    parent.id = PARENT_ID.to_string();
    api.add_message(parent).await;

    for i in 0..5 {
        let author = if i % 2 == 0 { me.clone() } else { friend.clone() };
        let mut reply = Message::new(GENERAL, author, format!("reply {i}"))
            .in_thread(PARENT_ID)
            .created_at(DateTime::from_timestamp(1_700_000_000 + i * 60, 0).unwrap());
        reply.id = format!("r{i}");
        api.add_message(reply).await;
    }
}

pub fn ids(messages: &[Message]) -> Vec<&str> {
    messages.iter().map(|m| m.id.as_str()).collect()
}

/// Ordered log of hook invocations shared across journal plugins.
#[derive(Debug, Clone, Default)]
pub struct Journal(Arc<Mutex<Vec<String>>>);

impl Journal {
    pub fn push(&self, entry: String) {
        self.0.lock().unwrap().push(entry);
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    /// Entries produced by hooks whose name contains `hook`.
    pub fn of(&self, hook: &str) -> Vec<String> {
        self.entries()
            .into_iter()
            .filter(|e| e.contains(hook))
            .collect()
    }
}

/// Plugin that records every hook into a [`Journal`] and optionally vetoes
/// every precondition with a fixed reason.
#[derive(Debug)]
pub struct JournalPlugin {
    id: &'static str,
    journal: Journal,
    veto: Option<&'static str>,
}

impl JournalPlugin {
    pub fn new(id: &'static str, journal: &Journal) -> Arc<Self> {
        Arc::new(Self {
            id,
            journal: journal.clone(),
            veto: None,
        })
    }

    pub fn vetoing(id: &'static str, journal: &Journal, reason: &'static str) -> Arc<Self> {
        Arc::new(Self {
            id,
            journal: journal.clone(),
            veto: Some(reason),
        })
    }

    fn record(&self, hook: &str) {
        self.journal.push(format!("{}:{hook}", self.id));
    }

    fn gate(&self, hook: &str) -> ChatResult<()> {
        self.record(hook);
        match self.veto {
            Some(reason) => Err(ChatError::precondition(reason)),
            None => Ok(()),
        }
    }
}

impl Listener for JournalPlugin {
    fn name(&self) -> &str {
        self.id
    }
}

#[async_trait]
impl ThreadQueryListener for JournalPlugin {
    async fn on_get_replies_precondition(&self, _message_id: &str, _limit: usize) -> ChatResult<()> {
        self.gate("replies_precondition")
    }

    async fn on_get_replies_request(&self, _message_id: &str, _limit: usize) {
        self.record("replies_request");
    }

    async fn on_get_replies_result(
        &self,
        _result: &ChatResult<Vec<Message>>,
        _message_id: &str,
        _limit: usize,
    ) {
        self.record("replies_result");
    }

    async fn on_get_replies_more_precondition(
        &self,
        _message_id: &str,
        _first_id: &str,
        _limit: usize,
    ) -> ChatResult<()> {
        self.gate("replies_more_precondition")
    }

    async fn on_get_replies_more_request(&self, _message_id: &str, _first_id: &str, _limit: usize) {
        self.record("replies_more_request");
    }

    async fn on_get_replies_more_result(
        &self,
        _result: &ChatResult<Vec<Message>>,
        _message_id: &str,
        _first_id: &str,
        _limit: usize,
    ) {
        self.record("replies_more_result");
    }
}

#[async_trait]
impl QueryChannelsListener for JournalPlugin {
    async fn on_query_channels_precondition(
        &self,
        _request: &QueryChannelsRequest,
    ) -> ChatResult<()> {
        self.gate("channels_precondition")
    }

    async fn on_query_channels_request(&self, _request: &QueryChannelsRequest) {
        self.record("channels_request");
    }

    async fn on_query_channels_result(
        &self,
        _result: &ChatResult<Vec<Channel>>,
        _request: &QueryChannelsRequest,
    ) {
        self.record("channels_result");
    }
}

#[async_trait]
impl TypingEventListener for JournalPlugin {
    async fn on_typing_event_precondition(
        &self,
        _event: TypingEvent,
        _cid: &Cid,
        _at: DateTime<Utc>,
    ) -> ChatResult<()> {
        self.gate("typing_precondition")
    }

    async fn on_typing_event_request(&self, _event: TypingEvent, _cid: &Cid, _at: DateTime<Utc>) {
        self.record("typing_request");
    }

    async fn on_typing_event_result(
        &self,
        _result: &ChatResult<ChatEvent>,
        _event: TypingEvent,
        _cid: &Cid,
        _at: DateTime<Utc>,
    ) {
        self.record("typing_result");
    }
}

#[async_trait]
impl Plugin for JournalPlugin {
    fn info(&self) -> PluginInfo {
        plugin_info!(id: self.id, name: self.id, version: "0.0.1")
    }

    fn thread_query_listener(&self) -> Option<Arc<dyn ThreadQueryListener>> {
        Some(self.clone_arc())
    }

    fn query_channels_listener(&self) -> Option<Arc<dyn QueryChannelsListener>> {
        Some(self.clone_arc())
    }

    fn typing_event_listener(&self) -> Option<Arc<dyn TypingEventListener>> {
        Some(self.clone_arc())
    }
}

impl JournalPlugin {
    fn clone_arc(&self) -> Arc<Self> {
        Arc::new(Self {
            id: self.id,
            journal: self.journal.clone(),
            veto: self.veto,
        })
    }
}
