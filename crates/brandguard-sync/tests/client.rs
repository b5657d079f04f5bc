//! Integration tests for `DashboardClient` using wiremock HTTP mocks.

mod common;

use brandguard_core::NewMention;
use brandguard_sync::{DashboardClient, SyncError};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> DashboardClient {
    DashboardClient::new(&format!("{}/api", server.uri()), "brandguard-test/0.1")
        .expect("client construction should not fail")
}

#[tokio::test]
async fn list_mentions_parses_nullable_fields() {
    let server = MockServer::start().await;
    let body = json!([{
        "id": 12,
        "source": "reddit",
        "source_id": "t3_abc",
        "author": null,
        "text": "BrandGuard could improve its mobile interface",
        "url": null,
        "published_at": "2025-11-14T18:30:00.123456",
        "sentiment": "negative",
        "reach": 80.0,
        "cluster_id": 4
    }]);
    Mock::given(method("GET"))
        .and(path("/api/mentions"))
        .and(header("user-agent", "brandguard-test/0.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let mentions = test_client(&server)
        .list_mentions()
        .await
        .expect("should parse mentions");

    assert_eq!(mentions.len(), 1);
    assert_eq!(mentions[0].id, 12);
    assert_eq!(mentions[0].author, "");
    assert_eq!(mentions[0].url, "");
    assert_eq!(mentions[0].cluster_id, Some(4));
}

#[tokio::test]
async fn list_alerts_returns_parsed_alerts() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/alerts"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            common::alert_json(2),
            common::alert_json(1)
        ])))
        .mount(&server)
        .await;

    let alerts = test_client(&server)
        .list_alerts()
        .await
        .expect("should parse alerts");

    assert_eq!(common::alert_ids(&alerts), vec![2, 1]);
    assert_eq!(alerts[0].alert_type, "volume_spike");
}

#[tokio::test]
async fn non_success_status_is_unexpected_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/alerts"))
        .respond_with(ResponseTemplate::new(502))
        .mount(&server)
        .await;

    let result = test_client(&server).list_alerts().await;

    assert!(
        matches!(result, Err(SyncError::UnexpectedStatus { status: 502, ref url }) if url.ends_with("/api/alerts")),
        "expected UnexpectedStatus(502), got: {result:?}"
    );
}

#[tokio::test]
async fn wrong_body_shape_is_deserialize_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/mentions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "detail": "Not Found" })))
        .mount(&server)
        .await;

    let result = test_client(&server).list_mentions().await;

    assert!(
        matches!(result, Err(SyncError::Deserialize { .. })),
        "expected Deserialize error, got: {result:?}"
    );
}

#[tokio::test]
async fn unreachable_server_is_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind probe listener");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    let client = DashboardClient::new(&format!("http://{addr}/api"), "brandguard-test/0.1")
        .expect("client construction should not fail");

    let result = client.list_mentions().await;

    assert!(
        matches!(result, Err(SyncError::Http(_))),
        "expected Http error, got: {result:?}"
    );
}

#[tokio::test]
async fn create_mention_posts_body_and_returns_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/mentions"))
        .and(body_partial_json(json!({
            "source": "cli",
            "text": "live test mention",
            "sentiment": "positive"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "status": "ok", "id": 41 })))
        .expect(1)
        .mount(&server)
        .await;

    let created = test_client(&server)
        .create_mention(&NewMention {
            source: "cli".to_string(),
            source_id: "cli-1".to_string(),
            author: "tester".to_string(),
            text: "live test mention".to_string(),
            url: String::new(),
            published_at: None,
            sentiment: Some("positive".to_string()),
            reach: Some(100.0),
        })
        .await
        .expect("should create mention");

    assert_eq!(created.id, 41);
    assert_eq!(created.status, "ok");
}
