//! Error types for the AI proxy
//!
//! Every failure the proxy can report to a caller is a variant of [`ProxyError`].
//! The HTTP status and the stable error code are total functions over the enum,
//! so classification never depends on message text.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{json, Value};
use thiserror::Error;

use crate::response;

/// Proxy-level errors
#[derive(Debug, Error)]
pub enum ProxyError {
    #[error("Invalid content type. Expected application/json")]
    InvalidContentType,

    #[error("Request body too large. Maximum size: {max} bytes")]
    PayloadTooLarge { max: usize },

    #[error("Invalid request format. {0}")]
    InvalidRequest(String),

    #[error("Invalid JSON format")]
    InvalidJson,

    #[error("Invalid or missing authorization")]
    Unauthorized,

    #[error("Endpoint not found")]
    NotFound,

    #[error("Service configuration error: {0}")]
    Configuration(String),

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Upstream API error {status}: {status_text}")]
    Upstream { status: StatusCode, status_text: String },

    #[error("HTTP client error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ProxyError {
    /// HTTP status returned to the caller
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::InvalidContentType => StatusCode::BAD_REQUEST,
            ProxyError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
            ProxyError::InvalidRequest(_) | ProxyError::InvalidJson => StatusCode::BAD_REQUEST,
            ProxyError::Unauthorized => StatusCode::UNAUTHORIZED,
            ProxyError::NotFound => StatusCode::NOT_FOUND,
            ProxyError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ProxyError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            ProxyError::Upstream { status, .. } => *status,
            ProxyError::Transport(_) | ProxyError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Stable error code placed in the envelope's `error` field
    pub fn code(&self) -> &'static str {
        match self {
            ProxyError::InvalidContentType => "invalid_content_type",
            ProxyError::PayloadTooLarge { .. } => "payload_too_large",
            ProxyError::InvalidRequest(_) | ProxyError::InvalidJson => "invalid_request",
            ProxyError::Unauthorized => "unauthorized",
            ProxyError::NotFound => "not_found",
            ProxyError::Configuration(_) => "configuration_error",
            ProxyError::Timeout { .. } => "timeout",
            ProxyError::Upstream { .. } => "api_error",
            ProxyError::Transport(_) | ProxyError::Internal(_) => "internal_error",
        }
    }

    /// Caller-facing details. Internal causes are never exposed.
    pub fn details(&self) -> Value {
        match self {
            ProxyError::InvalidContentType
            | ProxyError::PayloadTooLarge { .. }
            | ProxyError::InvalidRequest(_)
            | ProxyError::InvalidJson
            | ProxyError::Unauthorized
            | ProxyError::NotFound => Value::from(self.to_string()),
            ProxyError::Configuration(_) => Value::from("Service configuration error"),
            ProxyError::Timeout { .. } => Value::from("Request to upstream API timed out"),
            ProxyError::Upstream { status, status_text } => json!({
                "upstream_status": status.as_u16(),
                "upstream_message": status_text,
            }),
            ProxyError::Transport(_) | ProxyError::Internal(_) => {
                Value::from("An unexpected error occurred")
            }
        }
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        response::error(self.status(), self.code(), Some(self.details()))
    }
}

/// Result type alias for convenience
pub type ProxyResult<T> = Result<T, ProxyError>;
