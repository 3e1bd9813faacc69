//! Mock upstream chat-completion API
//!
//! Wraps a wiremock server that answers `POST /chat/completions`.
//!
//! # Example
//!
//! ```rust,ignore
//! let upstream = MockUpstream::start().await;
//! upstream.mock_chat_completion_success().await;
//! // point UPSTREAM_API_URL at upstream.chat_url()
//! ```

#![allow(dead_code)]

use std::time::Duration;

use serde_json::{json, Value};
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Path the proxy posts to on the mock server
pub const CHAT_PATH: &str = "/chat/completions";

/// Mock upstream server wrapper
pub struct MockUpstream {
    server: MockServer,
}

impl MockUpstream {
    /// Start a new mock upstream server
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Full URL of the chat endpoint, suitable for `Config::upstream_url`
    pub fn chat_url(&self) -> String {
        format!("{}{}", self.server.uri(), CHAT_PATH)
    }

    /// Get all received requests (for assertion in tests)
    pub async fn received_requests(&self) -> Vec<wiremock::Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    /// Body of the most recent request, parsed as JSON
    pub async fn last_request_json(&self) -> Value {
        let requests = self.received_requests().await;
        let last = requests.last().expect("upstream received no requests");
        serde_json::from_slice(&last.body).expect("upstream request body is not JSON")
    }

    /// Sample non-streaming chat completion
    pub fn completion_body() -> Value {
        json!({
            "id": "chatcmpl-test123",
            "object": "chat.completion",
            "created": 1706745600,
            "model": "deepseek-chat",
            "choices": [{
                "index": 0,
                "message": {"role": "assistant", "content": "Hello! How can I help you today?"},
                "finish_reason": "stop"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 8, "total_tokens": 18}
        })
    }

    /// Mock a successful non-streaming completion
    pub async fn mock_chat_completion_success(&self) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(Self::completion_body()))
            .mount(&self.server)
            .await;
    }

    /// Mock a completion that only matches when the server API key is sent
    pub async fn mock_chat_completion_requiring_key(&self, api_key: &str) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .and(header("Authorization", format!("Bearer {}", api_key).as_str()))
            .and(header("User-Agent", "AI-Proxy-Worker/1.0"))
            .respond_with(ResponseTemplate::new(200).set_body_json(Self::completion_body()))
            .mount(&self.server)
            .await;
    }

    /// Mock a streaming (SSE) completion and return the exact body sent
    pub async fn mock_chat_completion_stream(&self) -> &'static str {
        let stream_data = concat!(
            "data: {\"id\":\"chatcmpl-test123\",\"object\":\"chat.completion.chunk\",\"choices\":[{\"index\":0,\"delta\":{\"role\":\"assistant\"},\"finish_reason\":null}]}\n\n",
            "data: {\"id\":\"chatcmpl-test123\",\"object\":\"chat.completion.chunk\",\"choices\":[{\"index\":0,\"delta\":{\"content\":\"Hello\"},\"finish_reason\":null}]}\n\n",
            "data: {\"id\":\"chatcmpl-test123\",\"object\":\"chat.completion.chunk\",\"choices\":[{\"index\":0,\"delta\":{},\"finish_reason\":\"stop\"}]}\n\n",
            "data: [DONE]\n\n"
        );

        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_raw(stream_data, "text/event-stream")
                    .insert_header("Cache-Control", "no-cache"),
            )
            .mount(&self.server)
            .await;

        stream_data
    }

    /// Mock an upstream error with the given status and JSON body
    pub async fn mock_chat_completion_error(&self, status: u16, body: Value) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Mock a completion that answers only after `delay`
    pub async fn mock_chat_completion_delayed(&self, delay: Duration) {
        Mock::given(method("POST"))
            .and(path(CHAT_PATH))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(Self::completion_body())
                    .set_delay(delay),
            )
            .mount(&self.server)
            .await;
    }
}
