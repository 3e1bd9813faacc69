//! Health endpoint and preflight integration tests
//!
//! - GET / - Health check
//! - OPTIONS * - CORS preflight

use axum::http::Method;
use serde_json::Value;

use crate::common::{assert_fixed_headers, TestHarness};

#[tokio::test]
async fn test_health_endpoint_returns_ok() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/").await;

    response.assert_status_ok();
    assert_fixed_headers(response.headers());
    assert_eq!(response.header("content-type"), "application/json");

    let body: Value = response.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["service"], "AI Proxy Worker");
    let timestamp = body["timestamp"].as_str().expect("timestamp should be a string");
    assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn test_health_does_not_require_auth() {
    let harness = TestHarness::with_auth().await;

    let response = harness.server.get("/").await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_health_does_not_call_upstream() {
    let harness = TestHarness::new().await;

    harness.server.get("/").await.assert_status_ok();

    assert!(harness.upstream.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_preflight_on_any_path() {
    let harness = TestHarness::with_auth().await;

    for path in ["/", "/chat", "/does/not/exist"] {
        let response = harness.server.method(Method::OPTIONS, path).await;

        response.assert_status_ok();
        assert_fixed_headers(response.headers());
        assert!(response.text().is_empty(), "preflight body for {path} not empty");
    }
}
