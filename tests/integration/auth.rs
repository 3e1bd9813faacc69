//! Authentication integration tests
//!
//! POST /chat requires `Authorization: Bearer <PROXY_KEY>` when a secret is set.

use axum::http::{header, HeaderValue, StatusCode};

use crate::common::{assert_error, auth_header, constants, test_data, TestHarness};

#[tokio::test]
async fn test_missing_authorization_is_rejected() {
    let harness = TestHarness::with_auth().await;
    harness.upstream.mock_chat_completion_success().await;

    let response = harness
        .server
        .post("/chat")
        .json(&test_data::chat_request_without_model())
        .await;

    let body = assert_error(&response, StatusCode::UNAUTHORIZED, "unauthorized");
    assert_eq!(body["details"], "Invalid or missing authorization");
    assert!(harness.upstream.received_requests().await.is_empty());
}

#[tokio::test]
async fn test_wrong_secret_is_rejected() {
    let harness = TestHarness::with_auth().await;

    for value in ["Bearer wrong", "bearer test-proxy-key", "test-proxy-key", "Bearer "] {
        let response = harness
            .server
            .post("/chat")
            .add_header(header::AUTHORIZATION, HeaderValue::from_static(value))
            .json(&test_data::chat_request_without_model())
            .await;

        assert_error(&response, StatusCode::UNAUTHORIZED, "unauthorized");
    }
}

#[tokio::test]
async fn test_auth_runs_before_validation() {
    let harness = TestHarness::with_auth().await;

    let response = harness
        .server
        .post("/chat")
        .text("not json at all")
        .await;

    assert_error(&response, StatusCode::UNAUTHORIZED, "unauthorized");
}

#[tokio::test]
async fn test_valid_secret_is_accepted() {
    let harness = TestHarness::with_auth().await;
    harness.upstream.mock_chat_completion_success().await;

    let response = harness
        .server
        .post("/chat")
        .add_header(header::AUTHORIZATION, auth_header().parse().unwrap())
        .json(&test_data::chat_request_without_model())
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_no_secret_means_open_access() {
    let harness = TestHarness::new().await;
    harness.upstream.mock_chat_completion_success().await;

    let response = harness
        .server
        .post("/chat")
        .json(&test_data::chat_request_without_model())
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_caller_token_is_not_forwarded() {
    let harness = TestHarness::with_auth().await;
    harness
        .upstream
        .mock_chat_completion_requiring_key(constants::TEST_UPSTREAM_API_KEY)
        .await;

    let response = harness
        .server
        .post("/chat")
        .add_header(header::AUTHORIZATION, auth_header().parse().unwrap())
        .json(&test_data::chat_request_without_model())
        .await;

    response.assert_status_ok();

    let requests = harness.upstream.received_requests().await;
    assert_eq!(requests.len(), 1);
    let sent = requests[0]
        .headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(sent, format!("Bearer {}", constants::TEST_UPSTREAM_API_KEY));
}
