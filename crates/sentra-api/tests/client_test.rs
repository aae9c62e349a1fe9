#![allow(clippy::unwrap_used)]
// Integration tests for `ActivityClient` using wiremock.

use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

use sentra_api::{ActivityClient, Error, HistoricalQuery, Severity};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ActivityClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ActivityClient::from_reqwest(reqwest::Client::new(), base_url);
    (server, client)
}

fn sample_activity(id: i64, status: &str) -> serde_json::Value {
    json!({
        "id": id,
        "message": format!("Connection attempt blocked (#{id})"),
        "timestamp": "2025-06-15T10:30:00-06:00",
        "source": "fortigate",
        "threat_score": 7.5,
        "status": status,
        "alert_level": "alert",
        "src_ip": "203.0.113.7",
        "dst_port": "443",
        "protocol": "tcp"
    })
}

// ── Historical endpoint ─────────────────────────────────────────────

#[tokio::test]
async fn test_historical_page() {
    let (server, client) = setup().await;

    let body = json!({
        "data": [sample_activity(1, "high"), sample_activity(2, "low")],
        "total": 45,
        "page": 1,
        "limit": 10,
        "pages": 5,
        "source": "database",
        "timestamp": "2025-06-15T10:30:05-06:00",
        "stats": { "high": 1, "medium": 0, "low": 1 }
    });

    Mock::given(method("GET"))
        .and(path("/api/activities/historical"))
        .and(query_param("days", "7"))
        .and(query_param("page", "1"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let page = client
        .historical(&HistoricalQuery::page(7, 1, 10))
        .await
        .unwrap();

    assert_eq!(page.data.len(), 2);
    assert_eq!(page.total, 45);
    assert_eq!(page.pages, 5);
    assert_eq!(page.source, "database");
    assert_eq!(page.data[0].status, Severity::High);
    assert_eq!(page.data[0].src_ip.as_deref(), Some("203.0.113.7"));
    assert_eq!(page.stats.unwrap().high, 1);
}

#[tokio::test]
async fn test_historical_sends_filters() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/activities/historical"))
        .and(query_param("status", "high"))
        .and(query_param("source", "fortigate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [], "total": 0, "page": 1, "limit": 10, "pages": 0
        })))
        .mount(&server)
        .await;

    let query = HistoricalQuery::page(7, 1, 10)
        .with_status(Some(Severity::High))
        .with_source(Some("fortigate".into()));

    client.historical(&query).await.unwrap();
}

#[tokio::test]
async fn test_historical_omits_empty_filters() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/activities/historical"))
        .and(query_param_is_missing("status"))
        .and(query_param_is_missing("source"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "data": [] })))
        .expect(1)
        .mount(&server)
        .await;

    client
        .historical(&HistoricalQuery::page(7, 1, 10))
        .await
        .unwrap();
}

#[tokio::test]
async fn test_historical_partial_body_defaults() {
    let (server, client) = setup().await;

    // Envelope with everything missing: defaults, not a parse failure.
    Mock::given(method("GET"))
        .and(path("/api/activities/historical"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let page = client
        .historical(&HistoricalQuery::page(7, 1, 10))
        .await
        .unwrap();

    assert!(page.data.is_empty());
    assert_eq!(page.total, 0);
    assert_eq!(page.pages, 0);
}

#[tokio::test]
async fn test_historical_http_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/activities/historical"))
        .respond_with(
            ResponseTemplate::new(500)
                .set_body_json(json!({ "error": "Failed to retrieve historical activities" })),
        )
        .mount(&server)
        .await;

    let result = client.historical(&HistoricalQuery::page(7, 1, 10)).await;

    match result {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("Failed to retrieve"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_historical_error_without_body_uses_status_text() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/activities/historical"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = client
        .historical(&HistoricalQuery::page(7, 1, 10))
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(503));
    assert!(err.is_transient());
    assert!(err.to_string().contains("503"));
}

#[tokio::test]
async fn test_historical_non_json_body_is_deserialization_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/activities/historical"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy error</html>"))
        .mount(&server)
        .await;

    let result = client.historical(&HistoricalQuery::page(7, 1, 10)).await;
    assert!(matches!(result, Err(Error::Deserialization { .. })));
}

// ── Stats endpoint ──────────────────────────────────────────────────

#[tokio::test]
async fn test_stats() {
    let (server, client) = setup().await;

    let body = json!({
        "total_activities": 128,
        "status_distribution": { "high": 12, "medium": 40, "low": 76 },
        "days_range": 7,
        "daily_stats": [
            { "date": "2025-06-14", "high_threats": 5, "medium_threats": 20,
              "low_threats": 40, "total_logs": 65 },
            { "date": "2025-06-15", "high_threats": 7, "medium_threats": 20,
              "low_threats": 36, "total_logs": 63 }
        ],
        "database_stats": { "total": 128, "high": 12, "medium": 40, "low": 76 },
        "last_sync": 1750000000
    });

    Mock::given(method("GET"))
        .and(path("/api/activities/stats"))
        .and(query_param("days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let stats = client.stats(7).await.unwrap();

    assert_eq!(stats.total_activities, 128);
    assert_eq!(stats.status_distribution.unwrap().medium, 40);
    assert_eq!(stats.daily_stats.len(), 2);
    assert_eq!(stats.daily_stats[1].high_threats, 7);
    assert_eq!(stats.last_sync, Some(1_750_000_000));
}

#[tokio::test]
async fn test_stats_http_error() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/activities/stats"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert!(client.stats(7).await.is_err());
}
