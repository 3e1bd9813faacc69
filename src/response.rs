//! Response builders
//!
//! Every response leaving the proxy goes through [`success`] or [`error`], which
//! attach the fixed CORS and security header sets.

use axum::{
    body::Body,
    http::{header, HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::Response,
};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::error;

/// CORS headers attached to every response
pub const CORS_HEADERS: &[(&str, &str)] = &[
    ("access-control-allow-origin", "*"),
    ("access-control-allow-methods", "POST, GET, OPTIONS"),
    ("access-control-allow-headers", "Content-Type, Authorization"),
    ("access-control-max-age", "86400"),
];

/// Security headers attached to every response
pub const SECURITY_HEADERS: &[(&str, &str)] = &[
    ("x-content-type-options", "nosniff"),
    ("x-frame-options", "DENY"),
    ("x-xss-protection", "1; mode=block"),
    ("referrer-policy", "strict-origin-when-cross-origin"),
];

/// Uniform JSON body for every error response
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorEnvelope {
    /// Stable machine-readable error code
    pub error: String,
    /// ISO-8601 time the envelope was created
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorEnvelope {
    pub fn new(code: impl Into<String>, details: Option<Value>) -> Self {
        Self {
            error: code.into(),
            timestamp: now_iso8601(),
            details,
        }
    }
}

/// Current UTC time as `YYYY-MM-DDTHH:MM:SS.mmmZ`
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Append a static header table to a header map, replacing existing values
fn apply(headers: &mut HeaderMap, table: &[(&'static str, &'static str)]) {
    for &(name, value) in table {
        headers.insert(
            HeaderName::from_static(name),
            HeaderValue::from_static(value),
        );
    }
}

/// Build a response with CORS and security headers
///
/// `extra` headers are applied first so the fixed sets always win.
pub fn success(status: StatusCode, body: Body, extra: HeaderMap) -> Response {
    let mut response = Response::new(body);
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.extend(extra);
    apply(headers, CORS_HEADERS);
    apply(headers, SECURITY_HEADERS);

    response
}

/// Build a JSON error envelope response
pub fn error(status: StatusCode, code: &str, details: Option<Value>) -> Response {
    let envelope = ErrorEnvelope::new(code, details);

    let body = match serde_json::to_vec(&envelope) {
        Ok(bytes) => bytes,
        Err(e) => {
            error!(error = %e, code = %code, "Failed to serialize error envelope");
            format!(r#"{{"error":"{}"}}"#, code).into_bytes()
        }
    };

    let mut extra = HeaderMap::new();
    extra.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    extra.insert(header::CACHE_CONTROL, HeaderValue::from_static("no-cache"));

    success(status, Body::from(body), extra)
}

#[cfg(test)]
pub(crate) fn assert_fixed_headers(headers: &HeaderMap) {
    for (name, value) in CORS_HEADERS.iter().chain(SECURITY_HEADERS) {
        assert_eq!(
            headers.get(*name).and_then(|v| v.to_str().ok()),
            Some(*value),
            "missing or wrong header {name}"
        );
    }
}
