//! Preflight and not-found handling
//!
//! Any request that is not `GET /` or `POST /chat` lands here. `OPTIONS` on
//! any path is answered as a CORS preflight; everything else is a 404.

use axum::{
    body::Body,
    http::{HeaderMap, Method},
    response::{IntoResponse, Response},
};

use crate::{error::ProxyError, response};

/// Empty 200 carrying the CORS and security headers
pub async fn preflight() -> Response {
    response::success(axum::http::StatusCode::OK, Body::empty(), HeaderMap::new())
}

/// 404 with the `not_found` envelope
pub async fn not_found() -> Response {
    ProxyError::NotFound.into_response()
}

/// Dispatch unrouted requests by method
pub async fn method_fallback(method: Method) -> Response {
    if method == Method::OPTIONS {
        preflight().await
    } else {
        not_found().await
    }
}
