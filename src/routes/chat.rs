//! Chat proxy endpoint
//!
//! `POST /chat` forwards the caller's chat-completion body to the upstream and
//! streams the upstream response back. Authentication runs as middleware
//! before this handler.

use std::sync::Arc;

use axum::{
    body::{Body, Bytes},
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use http_body_util::{BodyExt, LengthLimitError, Limited};
use tracing::{error, Instrument};

use crate::{
    error::{ProxyError, ProxyResult},
    proxy::{RequestContext, UpstreamRequest},
    response,
    validation, AppState,
};

/// Handle chat proxy requests
///
/// Every failure is logged with method, path and duration, then turned into an
/// error envelope.
pub async fn chat_proxy(State(state): State<Arc<AppState>>, request: Request) -> Response {
    let ctx = RequestContext::new(request.method().as_str(), request.uri().path());
    let span = ctx.create_span();

    async move {
        ctx.log_request_start();

        match proxy_chat(&state, request, &ctx).await {
            Ok(response) => response,
            Err(err) => {
                ctx.log_error(&err);
                err.into_response()
            }
        }
    }
    .instrument(span)
    .await
}

async fn proxy_chat(
    state: &AppState,
    request: Request,
    ctx: &RequestContext,
) -> ProxyResult<Response> {
    if !state.provider.is_configured() {
        error!(provider = %state.provider.name(), "Upstream API key is not configured");
        return Err(ProxyError::Configuration(
            "DEEPSEEK_API_KEY is not set".to_string(),
        ));
    }

    let (parts, body) = request.into_parts();
    validation::validate_headers(&parts.headers, &state.config)?;

    let body = read_body(body, state.config.max_body_size).await?;

    if state.config.validate_request_body {
        validation::validate_body(&body)?;
    }

    let upstream = state
        .provider
        .chat_completions(UpstreamRequest {
            body,
            content_type: parts.headers.get(header::CONTENT_TYPE).cloned(),
            accept: parts.headers.get(header::ACCEPT).cloned(),
        })
        .await?;

    let status = upstream.status;
    if !status.is_success() {
        let status_text = upstream.status_text.clone();
        let text = upstream.text().await;
        ctx.log_upstream_error(status.as_u16(), &status_text, &text);
        return Err(ProxyError::Upstream {
            status,
            status_text,
        });
    }

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        upstream
            .content_type
            .unwrap_or_else(|| HeaderValue::from_static("application/json")),
    );
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-store, no-transform"),
    );

    ctx.log_request_complete(status.as_u16());

    Ok(response::success(
        status,
        Body::from_stream(upstream.body),
        headers,
    ))
}

/// Read the request body, failing once it grows past `max` bytes
async fn read_body(body: Body, max: usize) -> ProxyResult<Bytes> {
    match Limited::new(body, max).collect().await {
        Ok(collected) => Ok(collected.to_bytes()),
        Err(e) if e.is::<LengthLimitError>() => Err(ProxyError::PayloadTooLarge { max }),
        Err(e) => Err(ProxyError::Internal(anyhow::anyhow!(
            "Failed to read request body: {}",
            e
        ))),
    }
}
