//! ChatKit demo: wires the plugin layer, the offline plugin and the client
//! together and runs a short chat session against the in-memory backend.

mod audit;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing_subscriber::{EnvFilter, fmt};

use chatkit_client::{ChatClient, InMemoryChatApi};
use chatkit_core::config::AppConfig;
use chatkit_core::error::ChatError;
use chatkit_core::filter::default_channel_list_filter;
use chatkit_core::models::{Channel, Message, User};
use chatkit_offline::OfflinePlugin;
use chatkit_plugin::PluginManager;

use crate::audit::AuditPlugin;

const PARENT_ID: &str = "welcome";

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Demo failed: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, ChatError> {
    let env = std::env::var("CHATKIT_ENV").unwrap_or_else(|_| "development".to_string());
    AppConfig::load(&env)
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_thread_ids(true)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
    }
}

/// Seed the in-memory backend with a few channels and a thread.
async fn seed(api: &InMemoryChatApi, me: &User) {
    let friend = User::new("friend", "Friend");

    api.add_channel(Channel::new("messaging", "general").with_members([&me.id, &friend.id]))
        .await;
    api.add_channel(Channel::new("messaging", "random").with_members([&me.id]))
        .await;
    api.add_channel(Channel::new("messaging", "elsewhere").with_members([&friend.id]))
        .await;

    let mut parent = Message::new("messaging:general", friend.clone(), "Welcome aboard!");
    parent.id = PARENT_ID.to_string();
    api.add_message(parent).await;

    for i in 0..5 {
        let author = if i % 2 == 0 { me.clone() } else { friend.clone() };
        let reply = Message::new("messaging:general", author, format!("reply #{i}"))
            .in_thread(PARENT_ID)
            .created_at(DateTime::<Utc>::from_timestamp(1_700_000_000 + i * 60, 0).unwrap_or_default());
        api.add_message(reply).await;
    }
}

/// Main demo run function
async fn run(config: AppConfig) -> Result<(), ChatError> {
    tracing::info!("Starting ChatKit demo v{}", env!("CARGO_PKG_VERSION"));

    let me = User::new("me", "Me");
    let api = Arc::new(InMemoryChatApi::new(me.id.clone()));
    seed(&api, &me).await;

    let plugins = Arc::new(PluginManager::new(config.plugins.clone()));
    let offline = Arc::new(OfflinePlugin::new(&config.offline));
    let audit = Arc::new(AuditPlugin::default());
    plugins.load_plugin(audit.clone()).await?;
    plugins.load_plugin(offline.clone()).await?;

    let client = ChatClient::new(api.clone(), plugins.clone(), config.client.clone());

    let request = client.channels_request(default_channel_list_filter(Some(&me)));
    let channels = client.query_channels(&request).await?;
    tracing::info!(count = channels.len(), "Channels loaded");

    let created = Channel::new("messaging", "new-project").with_members([&me.id]);
    api.add_channel(created.clone()).await;
    let joined = offline.add_channel_if_filter_matches(&created).await;
    tracing::info!(cid = %created.cid, queries = joined, "Channel pushed to cached queries");

    let page = client.get_replies(PARENT_ID, 3).await?;
    tracing::info!(count = page.len(), "Newest replies loaded");

    if let Some(first) = page.first() {
        let older = client.get_replies_more(PARENT_ID, &first.id, 3).await?;
        tracing::info!(count = older.len(), "Older replies loaded");
    }

    let sent = client.keystroke("messaging:general").await?;
    let throttled = client.keystroke("messaging:general").await?;
    let stopped = client.stop_typing("messaging:general").await?;
    tracing::info!(sent, throttled, stopped, "Typing indicators");

    if let Some(thread) = offline.state().thread(PARENT_ID).await {
        tracing::info!(
            cached = thread.messages.len(),
            end_of_older_messages = thread.end_of_older_messages,
            "Offline thread state"
        );
    }
    if let Some(query) = offline.state().query(&request.query_key()).await {
        tracing::info!(state = %serde_json::to_string(&query)?, "Offline channel query state");
    }

    tracing::info!(hooks = audit.listener().seen(), "Audit summary");
    plugins.unload_all().await;
    Ok(())
}
