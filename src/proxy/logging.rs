//! Request logging utilities
//!
//! Provides structured logging with correlation IDs for tracing a request from
//! arrival to its final response.

use std::time::Instant;

use tracing::{debug, error, info, Span};
use uuid::Uuid;

use crate::error::ProxyError;

/// Context for tracking a request through the system
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// Unique identifier for this request (for log correlation)
    pub trace_id: String,
    /// When the request started
    pub start_time: Instant,
    /// HTTP method
    pub method: String,
    /// Request path
    pub path: String,
}

impl RequestContext {
    /// Create a new request context
    pub fn new(method: &str, path: &str) -> Self {
        Self {
            trace_id: Uuid::new_v4().to_string()[..8].to_string(), // Short ID for readability
            start_time: Instant::now(),
            method: method.to_string(),
            path: path.to_string(),
        }
    }

    /// Get elapsed time in milliseconds
    pub fn elapsed_ms(&self) -> u128 {
        self.start_time.elapsed().as_millis()
    }

    /// Log request initiation
    pub fn log_request_start(&self) {
        debug!(
            trace_id = %self.trace_id,
            method = %self.method,
            path = %self.path,
            "Request started"
        );
    }

    /// Log a non-2xx upstream response, including the body it sent
    pub fn log_upstream_error(&self, status: u16, status_text: &str, body: &str) {
        error!(
            trace_id = %self.trace_id,
            status = %status,
            status_text = %status_text,
            body = %body,
            elapsed_ms = %self.elapsed_ms(),
            "Upstream API error"
        );
    }

    /// Log successful request completion
    pub fn log_request_complete(&self, status: u16) {
        info!(
            trace_id = %self.trace_id,
            method = %self.method,
            path = %self.path,
            status = %status,
            duration_ms = %self.elapsed_ms(),
            "Request completed successfully"
        );
    }

    /// Log request failure
    pub fn log_error(&self, err: &ProxyError) {
        error!(
            trace_id = %self.trace_id,
            method = %self.method,
            path = %self.path,
            duration_ms = %self.elapsed_ms(),
            code = %err.code(),
            error = %err,
            "Request failed"
        );
    }

    /// Create a tracing span for this request
    pub fn create_span(&self) -> Span {
        tracing::info_span!(
            "proxy_request",
            trace_id = %self.trace_id,
            method = %self.method,
            path = %self.path,
        )
    }
}
