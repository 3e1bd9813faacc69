//! Configuration management for the AI proxy
//!
//! Configuration is loaded once from environment variables and never mutated
//! afterwards. Handlers receive it through the shared application state.

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};

/// Upstream chat-completion endpoint used when `UPSTREAM_API_URL` is unset
pub const DEFAULT_UPSTREAM_URL: &str = "https://api.deepseek.com/chat/completions";
/// Maximum accepted request body (1 MiB)
pub const DEFAULT_MAX_BODY_SIZE: usize = 1024 * 1024;
/// Upstream timeout in milliseconds
pub const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;
/// Model injected when the caller omits one
pub const DEFAULT_MODEL: &str = "deepseek-chat";
/// Models the upstream is known to serve
pub const DEFAULT_SUPPORTED_MODELS: &[&str] = &["deepseek-chat", "deepseek-reasoner"];

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Host to bind to
    pub host: String,
    /// Port to listen on
    pub port: u16,

    /// Full URL of the upstream chat-completion endpoint
    pub upstream_url: String,
    /// Upstream API key. Requests fail with `configuration_error` without it.
    pub upstream_api_key: Option<String>,
    /// Shared secret callers must present as `Bearer <secret>`.
    /// `None` disables authentication.
    pub proxy_key: Option<String>,

    /// Largest request body accepted, in bytes
    pub max_body_size: usize,
    /// Upper bound on the upstream call, measured until response headers arrive
    pub request_timeout: Duration,
    /// Enable strict validation of the `messages` array
    pub validate_request_body: bool,

    /// Model injected into requests that do not name one
    pub default_model: String,
    /// Models that pass without a warning
    pub supported_models: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8787,
            upstream_url: DEFAULT_UPSTREAM_URL.to_string(),
            upstream_api_key: None,
            proxy_key: None,
            max_body_size: DEFAULT_MAX_BODY_SIZE,
            request_timeout: Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
            validate_request_body: false,
            default_model: DEFAULT_MODEL.to_string(),
            supported_models: DEFAULT_SUPPORTED_MODELS
                .iter()
                .map(|m| m.to_string())
                .collect(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        Ok(Self {
            host: get("PROXY_HOST").unwrap_or(defaults.host),
            port: match get("PROXY_PORT") {
                Some(v) => v.trim().parse().context("Invalid PROXY_PORT")?,
                None => defaults.port,
            },

            upstream_url: get("UPSTREAM_API_URL").unwrap_or(defaults.upstream_url),
            upstream_api_key: get("DEEPSEEK_API_KEY"),
            proxy_key: get("PROXY_KEY"),

            max_body_size: match get("MAX_BODY_SIZE") {
                Some(v) => v.trim().parse().context("Invalid MAX_BODY_SIZE")?,
                None => defaults.max_body_size,
            },
            request_timeout: match get("REQUEST_TIMEOUT_MS") {
                Some(v) => Duration::from_millis(
                    v.trim().parse().context("Invalid REQUEST_TIMEOUT_MS")?,
                ),
                None => defaults.request_timeout,
            },
            validate_request_body: get("VALIDATE_REQUEST_BODY")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(defaults.validate_request_body),

            default_model: get("DEFAULT_MODEL").unwrap_or(defaults.default_model),
            supported_models: get("SUPPORTED_MODELS")
                .map(|v| parse_model_list(&v))
                .unwrap_or(defaults.supported_models),
        })
    }
}

fn parse_model_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
