//! Listener ordering and precondition aggregation across plugins.

use chatkit_core::ErrorKind;

use crate::helpers::{Journal, JournalPlugin, PARENT_ID, TestApp};

#[tokio::test]
async fn test_hooks_run_in_registration_order_per_phase() {
    let app = TestApp::new().await;
    let journal = Journal::default();
    app.load(JournalPlugin::new("a", &journal)).await;
    app.load(JournalPlugin::new("b", &journal)).await;

    app.client.get_replies(PARENT_ID, 2).await.unwrap();

    assert_eq!(
        journal.entries(),
        vec![
            "a:replies_precondition",
            "b:replies_precondition",
            "a:replies_request",
            "b:replies_request",
            "a:replies_result",
            "b:replies_result",
        ]
    );
}

#[tokio::test]
async fn test_first_veto_wins_and_every_precondition_runs() {
    let app = TestApp::new().await;
    let journal = Journal::default();
    app.load(JournalPlugin::new("a", &journal)).await;
    app.load(JournalPlugin::vetoing("b", &journal, "x")).await;
    app.load(JournalPlugin::vetoing("c", &journal, "y")).await;

    let err = app.client.get_replies(PARENT_ID, 2).await.unwrap_err();

    assert_eq!(err.kind, ErrorKind::Precondition);
    assert_eq!(err.message, "x");
    assert_eq!(
        journal.entries(),
        vec![
            "a:replies_precondition",
            "b:replies_precondition",
            "c:replies_precondition",
        ]
    );
}

#[tokio::test]
async fn test_veto_leaves_transport_and_state_untouched() {
    let app = TestApp::new().await;
    let journal = Journal::default();
    app.load(JournalPlugin::vetoing("gate", &journal, "closed")).await;

    let request = app.client.channels_request(chatkit_core::FilterObject::neutral());
    assert!(app.client.query_channels(&request).await.is_err());
    assert!(app.client.get_replies_more(PARENT_ID, "r2", 2).await.is_err());

    assert_eq!(app.api.request_count(), 0);
    assert!(journal.of("request").is_empty());
    assert!(journal.of("result").is_empty());
    assert!(app.offline.state().query(&request.query_key()).await.is_none());
    assert!(app.offline.state().thread(PARENT_ID).await.is_none());
}

#[tokio::test]
async fn test_plugin_disabled_by_config_sees_nothing() {
    let app = TestApp::from_toml(
        r#"
        [plugins]
        disabled = ["muted"]
        "#,
    )
    .await;
    let journal = Journal::default();

    assert!(!app.load(JournalPlugin::vetoing("muted", &journal, "never")).await);
    assert!(app.client.get_replies(PARENT_ID, 2).await.is_ok());
    assert!(journal.entries().is_empty());
}

#[tokio::test]
async fn test_unloaded_plugin_leaves_the_fan_out() {
    let app = TestApp::new().await;
    let journal = Journal::default();
    app.load(JournalPlugin::new("a", &journal)).await;
    app.load(JournalPlugin::new("b", &journal)).await;

    app.plugins.unload_plugin("a").await.unwrap();
    app.client.keystroke("messaging:general").await.unwrap();

    assert_eq!(
        journal.entries(),
        vec!["b:typing_precondition", "b:typing_request", "b:typing_result"]
    );
}

#[tokio::test]
async fn test_unload_all_clears_offline_state() {
    let app = TestApp::new().await;
    app.client.get_replies(PARENT_ID, 2).await.unwrap();
    assert!(app.offline.state().thread(PARENT_ID).await.is_some());

    app.plugins.unload_all().await;

    assert!(app.plugins.list_plugins().await.is_empty());
    assert!(app.offline.state().thread(PARENT_ID).await.is_none());
}
