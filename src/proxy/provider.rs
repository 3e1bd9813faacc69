//! AI Provider abstraction layer
//!
//! The chat handler talks to the upstream through [`AiProvider`] so the
//! concrete backend can be swapped (or faked in tests).

use std::pin::Pin;

use async_trait::async_trait;
use axum::http::{HeaderValue, StatusCode};
use bytes::{Bytes, BytesMut};
use futures::{Stream, StreamExt};

use crate::error::ProxyResult;

/// Stream type for upstream response bodies
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, reqwest::Error>> + Send>>;

/// Outbound chat request as received from the caller
#[derive(Debug, Clone)]
pub struct UpstreamRequest {
    /// Raw request body
    pub body: Bytes,
    /// Caller's `Content-Type`
    pub content_type: Option<HeaderValue>,
    /// Caller's `Accept`
    pub accept: Option<HeaderValue>,
}

/// Response head and streaming body returned by the upstream
pub struct UpstreamResponse {
    pub status: StatusCode,
    /// Reason phrase for `status`, empty when unknown
    pub status_text: String,
    pub content_type: Option<HeaderValue>,
    pub body: ByteStream,
}

impl UpstreamResponse {
    /// Drain the body into a string, lossily.
    ///
    /// Read errors end the body early rather than failing; this is only used
    /// to log upstream error payloads.
    pub async fn text(self) -> String {
        let mut buf = BytesMut::new();
        let mut body = self.body;
        while let Some(chunk) = body.next().await {
            match chunk {
                Ok(bytes) => buf.extend_from_slice(&bytes),
                Err(_) => break,
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }
}

impl std::fmt::Debug for UpstreamResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpstreamResponse")
            .field("status", &self.status)
            .field("status_text", &self.status_text)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

/// Trait defining the interface for AI providers
///
/// # Security
///
/// Implementations MUST never forward the caller's `Authorization` header;
/// the upstream is always called with the provider's own API key.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Provider name for logging
    fn name(&self) -> &'static str;

    /// Whether the provider has the credentials it needs
    fn is_configured(&self) -> bool;

    /// Forward a chat completion request in a single attempt.
    ///
    /// Non-2xx upstream statuses are returned as `Ok`; callers decide how to
    /// surface them.
    async fn chat_completions(&self, request: UpstreamRequest) -> ProxyResult<UpstreamResponse>;
}
