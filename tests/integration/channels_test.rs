//! Channel list queries through the offline plugin.

use chatkit_core::filter::default_channel_list_filter;
use chatkit_core::models::{Channel, QueryChannelsRequest};
use chatkit_core::{ErrorKind, FilterObject};

use crate::helpers::TestApp;

fn cids(channels: &[Channel]) -> Vec<&str> {
    channels.iter().map(|c| c.cid.as_str()).collect()
}

#[tokio::test]
async fn test_default_list_holds_my_channels() {
    let app = TestApp::new().await;
    let request = app
        .client
        .channels_request(default_channel_list_filter(Some(&app.me)));

    let channels = app.client.query_channels(&request).await.unwrap();

    assert_eq!(cids(&channels), vec!["messaging:general", "messaging:random"]);
    let query = app.offline.state().query(&request.query_key()).await.unwrap();
    assert_eq!(query.cids, vec!["messaging:general", "messaging:random"]);
    assert!(query.end_of_channels);
    assert!(!query.recovery_needed);
}

#[tokio::test]
async fn test_pages_share_one_cached_query() {
    let app = TestApp::from_toml(
        r#"
        [client]
        channels_page_size = 1
        "#,
    )
    .await;
    let first = app
        .client
        .channels_request(FilterObject::eq("type", "messaging"));

    app.client.query_channels(&first).await.unwrap();
    app.client
        .query_channels(&first.clone().with_offset(1))
        .await
        .unwrap();

    let query = app.offline.state().query(&first.query_key()).await.unwrap();
    assert_eq!(query.cids, vec!["messaging:general", "messaging:random"]);
    assert!(!query.end_of_channels);

    let last = app
        .client
        .query_channels(&first.clone().with_offset(3))
        .await
        .unwrap();
    assert!(last.is_empty());
    let query = app.offline.state().query(&first.query_key()).await.unwrap();
    assert!(query.end_of_channels);
    assert_eq!(query.cids.len(), 2);
}

#[tokio::test]
async fn test_transport_failure_marks_recovery() {
    let app = TestApp::new().await;
    let request = app.client.channels_request(FilterObject::neutral());
    app.api.set_offline(true);

    let err = app.client.query_channels(&request).await.unwrap_err();
    assert_eq!(err.kind, ErrorKind::Network);
    assert!(
        app.offline
            .state()
            .query(&request.query_key())
            .await
            .unwrap()
            .recovery_needed
    );

    app.api.set_offline(false);
    app.client.query_channels(&request).await.unwrap();
    let query = app.offline.state().query(&request.query_key()).await.unwrap();
    assert!(!query.recovery_needed);
    assert_eq!(query.cids.len(), 3);
}

#[tokio::test]
async fn test_new_channel_is_pushed_into_matching_lists() {
    let app = TestApp::new().await;
    let request = app
        .client
        .channels_request(default_channel_list_filter(Some(&app.me)));
    app.client.query_channels(&request).await.unwrap();

    let mine = Channel::new("messaging", "new").with_members([&app.me.id]);
    let theirs = Channel::new("messaging", "theirs").with_members(["u2"]);

    assert_eq!(app.offline.add_channel_if_filter_matches(&mine).await, 1);
    assert_eq!(app.offline.add_channel_if_filter_matches(&theirs).await, 0);

    let query = app.offline.state().query(&request.query_key()).await.unwrap();
    assert_eq!(
        query.cids,
        vec!["messaging:general", "messaging:random", "messaging:new"]
    );
}

#[tokio::test]
async fn test_zero_limit_is_rejected() {
    let app = TestApp::new().await;

    let err = app
        .client
        .query_channels(&QueryChannelsRequest::new(FilterObject::neutral(), 0))
        .await
        .unwrap_err();

    assert_eq!(err.kind, ErrorKind::Validation);
    assert_eq!(app.api.request_count(), 0);
}
