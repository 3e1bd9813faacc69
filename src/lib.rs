//! AI Proxy - stateless reverse proxy for chat-completion APIs
//!
//! This library provides the core functionality for the proxy server. It
//! authenticates callers with a shared secret, validates chat requests, and
//! forwards them to a single upstream with a bounded timeout.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod proxy;
pub mod response;
pub mod routes;
pub mod validation;

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;

pub use crate::config::Config;
pub use crate::error::{ProxyError, ProxyResult};
pub use crate::proxy::{AiProvider, DeepSeekProvider};

/// Application state shared across all request handlers
pub struct AppState {
    pub config: Config,
    /// AI provider for forwarding requests to the upstream
    pub provider: Arc<dyn AiProvider>,
}

impl AppState {
    /// Create a new application state
    pub fn new(config: Config) -> Result<Self> {
        // Initialize HTTP client with connection pooling. No overall timeout:
        // streamed responses may outlive the per-request header timeout.
        let http_client = reqwest::Client::builder()
            .pool_max_idle_per_host(100)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        let provider: Arc<dyn AiProvider> = Arc::new(DeepSeekProvider::new(http_client, &config));

        Ok(Self { config, provider })
    }

    /// Create an application state around an existing provider
    pub fn with_provider(config: Config, provider: Arc<dyn AiProvider>) -> Self {
        Self { config, provider }
    }
}
