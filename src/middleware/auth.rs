//! Authentication middleware
//!
//! Checks the caller's `Authorization` header against the shared proxy secret.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use subtle::ConstantTimeEq;
use tracing::{instrument, warn};

use crate::{error::ProxyError, AppState};

/// Build the header value a caller must send for a given secret
pub fn expected_authorization(secret: &str) -> String {
    format!("Bearer {}", secret)
}

/// Whether the request is authorized
///
/// No configured secret means authentication is disabled. Otherwise the header
/// must equal `Bearer <secret>` byte for byte.
pub fn is_authorized(headers: &HeaderMap, secret: Option<&str>) -> bool {
    let Some(secret) = secret else {
        return true;
    };

    let provided = headers
        .get(header::AUTHORIZATION)
        .map(|v| v.as_bytes())
        .unwrap_or_default();
    let expected = expected_authorization(secret);

    provided.ct_eq(expected.as_bytes()).into()
}

/// Authentication middleware
///
/// Rejects the request with `unauthorized` before any validation or upstream
/// work happens.
#[instrument(skip_all, fields(path = %request.uri().path()))]
pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, ProxyError> {
    if !is_authorized(request.headers(), state.config.proxy_key.as_deref()) {
        warn!(method = %request.method(), "Rejected request with invalid or missing authorization");
        return Err(ProxyError::Unauthorized);
    }

    Ok(next.run(request).await)
}
