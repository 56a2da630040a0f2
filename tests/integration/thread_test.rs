//! Thread replies through the offline plugin.

use chatkit_core::ErrorKind;

use crate::helpers::{PARENT_ID, TestApp, ids};

#[tokio::test]
async fn test_replies_are_cached_page_by_page() {
    let app = TestApp::new().await;

    let newest = app.client.get_replies(PARENT_ID, 3).await.unwrap();
    assert_eq!(ids(&newest), vec!["r2", "r3", "r4"]);

    let thread = app.offline.state().thread(PARENT_ID).await.unwrap();
    assert_eq!(ids(&thread.messages), vec!["r2", "r3", "r4"]);
    assert!(!thread.loading);
    assert!(!thread.end_of_older_messages);

    let older = app.client.get_replies_more(PARENT_ID, "r2", 3).await.unwrap();
    assert_eq!(ids(&older), vec!["r0", "r1"]);

    let thread = app.offline.state().thread(PARENT_ID).await.unwrap();
    assert_eq!(ids(&thread.messages), vec!["r0", "r1", "r2", "r3", "r4"]);
    assert!(!thread.loading_older);
    assert!(thread.end_of_older_messages);
    assert!(app.offline.state().user("u2").await.is_some());
}

#[tokio::test]
async fn test_failed_request_still_clears_loading() {
    let app = TestApp::new().await;

    let err = app.client.get_replies("missing", 3).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::NotFound);

    let thread = app.offline.state().thread("missing").await.unwrap();
    assert!(!thread.loading);
    assert!(thread.messages.is_empty());
}

#[tokio::test]
async fn test_empty_ids_are_rejected_before_plugins_run() {
    let app = TestApp::new().await;

    let err = app.client.get_replies("", 3).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(err.message, "message_id can't be empty");

    let err = app.client.get_replies_more(PARENT_ID, "", 3).await.unwrap_err();
    assert_eq!(err.message, "first_id can't be empty");
    assert_eq!(app.api.request_count(), 0);
}

#[tokio::test]
async fn test_first_page_uses_configured_size() {
    let app = TestApp::from_toml(
        r#"
        [client]
        replies_page_size = 2
        "#,
    )
    .await;

    let page = app.client.replies(PARENT_ID).await.unwrap();

    assert_eq!(ids(&page), vec!["r3", "r4"]);
}
