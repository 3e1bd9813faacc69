//! Health check endpoint
//!
//! `GET /` reports that the proxy process is up. It does not probe the upstream.

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Response,
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::response::{self, now_iso8601};

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "AI Proxy Worker";

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub timestamp: String,
}

impl HealthResponse {
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            service: SERVICE_NAME.to_string(),
            timestamp: now_iso8601(),
        }
    }
}

/// Health check endpoint
pub async fn health_check() -> Response {
    let body = match serde_json::to_vec(&HealthResponse::ok()) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, "Failed to serialize health response");
            return response::error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal_error",
                Some("An unexpected error occurred".into()),
            );
        }
    };

    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));

    response::success(StatusCode::OK, Body::from(body), headers)
}
