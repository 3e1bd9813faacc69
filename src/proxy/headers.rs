//! Header utilities for upstream requests
//!
//! The upstream only ever sees a fixed set of headers. Caller credentials are
//! never forwarded.

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};

use crate::error::{ProxyError, ProxyResult};

/// User agent sent to the upstream
pub const PROXY_USER_AGENT: &str = "AI-Proxy-Worker/1.0";

/// Build the outbound header set
///
/// `content_type` and `accept` come from the caller and default to JSON.
pub fn build_upstream_headers(
    api_key: &str,
    content_type: Option<&HeaderValue>,
    accept: Option<&HeaderValue>,
) -> ProxyResult<HeaderMap> {
    let json = HeaderValue::from_static("application/json");
    let mut headers = HeaderMap::new();

    let mut authorization = HeaderValue::from_str(&format!("Bearer {}", api_key))
        .map_err(|_| ProxyError::Configuration("API key is not a valid header value".into()))?;
    authorization.set_sensitive(true);

    headers.insert(AUTHORIZATION, authorization);
    headers.insert(
        CONTENT_TYPE,
        content_type.cloned().unwrap_or_else(|| json.clone()),
    );
    headers.insert(ACCEPT, accept.cloned().unwrap_or(json));
    headers.insert(USER_AGENT, HeaderValue::from_static(PROXY_USER_AGENT));

    Ok(headers)
}
