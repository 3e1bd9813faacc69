//! Routing integration tests
//!
//! Everything other than `GET /`, `POST /chat` and `OPTIONS *` is a 404.

use axum::http::{Method, StatusCode};

use crate::common::{assert_error, TestHarness};

#[tokio::test]
async fn test_unknown_routes_return_not_found() {
    let harness = TestHarness::new().await;

    let cases = [
        (Method::GET, "/chat"),
        (Method::PUT, "/chat"),
        (Method::DELETE, "/chat"),
        (Method::POST, "/"),
        (Method::GET, "/health"),
        (Method::POST, "/v1/chat/completions"),
        (Method::POST, "/chat/"),
        (Method::PATCH, "/anything"),
    ];

    for (method, path) in cases {
        let response = harness.server.method(method.clone(), path).await;
        let body = assert_error(&response, StatusCode::NOT_FOUND, "not_found");
        assert_eq!(body["details"], "Endpoint not found", "{method} {path}");
    }
}

#[tokio::test]
async fn test_not_found_is_not_gated_by_auth() {
    let harness = TestHarness::with_auth().await;

    let response = harness.server.get("/chat").await;

    assert_error(&response, StatusCode::NOT_FOUND, "not_found");
}

#[tokio::test]
async fn test_not_found_never_reaches_upstream() {
    let harness = TestHarness::new().await;
    harness.upstream.mock_chat_completion_success().await;

    harness.server.post("/v1/chat/completions").await;

    assert!(harness.upstream.received_requests().await.is_empty());
}
