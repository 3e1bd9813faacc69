//! DeepSeek chat-completion client
//!
//! Sends a single POST per request to the configured endpoint, bounded by the
//! configured timeout.

use std::time::Duration;

use async_trait::async_trait;
use axum::http::header;
use tracing::{debug, error, info, instrument};

use crate::{
    config::Config,
    error::{ProxyError, ProxyResult},
    proxy::{
        body::prepare_body,
        headers::build_upstream_headers,
        provider::{AiProvider, UpstreamRequest, UpstreamResponse},
    },
    response::now_iso8601,
    validation::warn_unsupported_model,
};

/// Client for the DeepSeek chat-completion API
pub struct DeepSeekProvider {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
    timeout: Duration,
    default_model: String,
    supported_models: Vec<String>,
}

impl DeepSeekProvider {
    /// Create a new provider from configuration
    pub fn new(client: reqwest::Client, config: &Config) -> Self {
        Self {
            client,
            url: config.upstream_url.clone(),
            api_key: config.upstream_api_key.clone(),
            timeout: config.request_timeout,
            default_model: config.default_model.clone(),
            supported_models: config.supported_models.clone(),
        }
    }

    fn timeout_ms(&self) -> u64 {
        self.timeout.as_millis() as u64
    }
}

#[async_trait]
impl AiProvider for DeepSeekProvider {
    fn name(&self) -> &'static str {
        "deepseek"
    }

    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    #[instrument(skip_all, fields(provider = "deepseek"))]
    async fn chat_completions(&self, request: UpstreamRequest) -> ProxyResult<UpstreamResponse> {
        let api_key = self.api_key.as_deref().ok_or_else(|| {
            ProxyError::Configuration("DEEPSEEK_API_KEY is not configured".to_string())
        })?;

        let headers = build_upstream_headers(
            api_key,
            request.content_type.as_ref(),
            request.accept.as_ref(),
        )?;

        let prepared = prepare_body(request.body, &self.default_model);
        if let (false, Some(model)) = (prepared.injected_default, prepared.model.as_deref()) {
            warn_unsupported_model(model, &self.supported_models);
        }

        debug!(
            url = %self.url,
            body_size = prepared.bytes.len(),
            model = ?prepared.model,
            "Sending request to upstream"
        );

        let send = self
            .client
            .post(&self.url)
            .headers(headers)
            .body(prepared.bytes)
            .send();

        // Dropping the pending send on expiry aborts the connection attempt.
        let response = match tokio::time::timeout(self.timeout, send).await {
            Ok(Ok(response)) => response,
            Ok(Err(e)) => {
                error!(url = %self.url, error = %e, "Failed to send request to upstream");
                return Err(ProxyError::Transport(e));
            }
            Err(_) => {
                error!(
                    url = %self.url,
                    timeout_ms = %self.timeout_ms(),
                    "Upstream request timed out"
                );
                return Err(ProxyError::Timeout {
                    timeout_ms: self.timeout_ms(),
                });
            }
        };

        let status = response.status();
        let status_text = status.canonical_reason().unwrap_or_default().to_string();

        info!(
            status = %status.as_u16(),
            status_text = %status_text,
            timestamp = %now_iso8601(),
            "Upstream API response"
        );

        let content_type = response.headers().get(header::CONTENT_TYPE).cloned();

        Ok(UpstreamResponse {
            status,
            status_text,
            content_type,
            body: Box::pin(response.bytes_stream()),
        })
    }
}
