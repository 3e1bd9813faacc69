//! Request validation
//!
//! Checks run in a fixed order and stop at the first failure:
//! content type, declared length, then (when enabled) the message array.

use axum::http::{header, HeaderMap};
use serde_json::Value;
use tracing::warn;

use crate::{
    config::Config,
    error::{ProxyError, ProxyResult},
    models::{ChatPayload, Message, Role},
};

/// Require a JSON content type
pub fn validate_content_type(headers: &HeaderMap) -> ProxyResult<()> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    if content_type.contains("application/json") {
        Ok(())
    } else {
        Err(ProxyError::InvalidContentType)
    }
}

/// Reject bodies whose declared length exceeds `max`
///
/// A missing or unparseable header passes; the body reader enforces the same
/// cap on the actual bytes.
pub fn validate_content_length(headers: &HeaderMap, max: usize) -> ProxyResult<()> {
    let declared = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
        .unwrap_or(0);

    if declared > max as u64 {
        Err(ProxyError::PayloadTooLarge { max })
    } else {
        Ok(())
    }
}

/// Header-level checks shared by every proxied request
pub fn validate_headers(headers: &HeaderMap, config: &Config) -> ProxyResult<()> {
    validate_content_type(headers)?;
    validate_content_length(headers, config.max_body_size)
}

/// Strict body validation
///
/// Parses the body and checks the `messages` array. Returns the typed payload
/// so callers can inspect it without reparsing.
pub fn validate_body(body: &[u8]) -> ProxyResult<ChatPayload> {
    let value: Value = serde_json::from_slice(body).map_err(|_| ProxyError::InvalidJson)?;

    let messages = validate_messages(value.get("messages"))?;
    let model = match value.get("model") {
        Some(Value::String(m)) => Some(m.clone()),
        _ => None,
    };

    let extra = match value {
        Value::Object(mut map) => {
            map.remove("messages");
            map.remove("model");
            map
        }
        _ => serde_json::Map::new(),
    };

    Ok(ChatPayload {
        model,
        messages,
        extra,
    })
}

fn validate_messages(messages: Option<&Value>) -> ProxyResult<Vec<Message>> {
    let messages = messages.and_then(Value::as_array).ok_or_else(|| {
        ProxyError::InvalidRequest("Missing or invalid messages array".to_string())
    })?;

    if messages.is_empty() {
        return Err(ProxyError::InvalidRequest(
            "Messages array cannot be empty".to_string(),
        ));
    }

    messages.iter().map(validate_message).collect()
}

fn validate_message(message: &Value) -> ProxyResult<Message> {
    let non_empty = |key: &str| {
        message
            .get(key)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    };

    let (Some(role), Some(content)) = (non_empty("role"), non_empty("content")) else {
        return Err(ProxyError::InvalidRequest(
            "Each message must have role and content".to_string(),
        ));
    };

    let role: Role = role
        .parse()
        .map_err(|_| ProxyError::InvalidRequest("Invalid message role".to_string()))?;

    Ok(Message {
        role,
        content: content.to_string(),
    })
}

/// Log a warning for models outside the supported list. Never fails; the
/// upstream decides whether it can serve the model.
pub fn warn_unsupported_model(model: &str, supported: &[String]) {
    if !supported.iter().any(|m| m == model) {
        warn!(
            model = %model,
            supported = %supported.join(", "),
            "Unsupported model, forwarding anyway"
        );
    }
}
