//! HTTP routes for the AI proxy
//!
//! | Method  | Path    | Handler                         |
//! |---------|---------|---------------------------------|
//! | OPTIONS | any     | [`fallback::preflight`]         |
//! | GET     | `/`     | [`health::health_check`]        |
//! | POST    | `/chat` | [`chat::chat_proxy`] (with auth)|
//! | other   | other   | [`fallback::not_found`]         |

pub mod chat;
pub mod fallback;
pub mod health;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::{middleware::auth::auth_middleware, AppState};

/// Create the main application router
pub fn create_router(state: Arc<AppState>) -> Router {
    // `get` would otherwise also answer HEAD
    let health = get(health::health_check)
        .head(fallback::not_found)
        .fallback(fallback::method_fallback);

    // route_layer keeps preflight and 404s on /chat free of auth
    let chat = post(chat::chat_proxy)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
        .fallback(fallback::method_fallback);

    Router::new()
        .route("/", health)
        .route("/chat", chat)
        .fallback(fallback::method_fallback)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
