//! Outbound body preparation
//!
//! Injects the default model into chat payloads that do not name one. Bodies
//! that cannot be handled as a JSON object are forwarded untouched.

use bytes::Bytes;
use serde_json::Value;
use tracing::{info, warn};

/// Body ready to send upstream
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedBody {
    pub bytes: Bytes,
    /// Model the upstream will see, when known
    pub model: Option<String>,
    /// Whether the default model was inserted
    pub injected_default: bool,
}

impl PreparedBody {
    fn raw(bytes: Bytes) -> Self {
        Self {
            bytes,
            model: None,
            injected_default: false,
        }
    }
}

fn has_model(object: &serde_json::Map<String, Value>) -> bool {
    match object.get("model") {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

/// Fill in `model` when missing, null or empty
pub fn prepare_body(raw: Bytes, default_model: &str) -> PreparedBody {
    let mut value: Value = match serde_json::from_slice(&raw) {
        Ok(v) => v,
        Err(e) => {
            warn!(error = %e, "Failed to parse request body for model injection, forwarding as-is");
            return PreparedBody::raw(raw);
        }
    };

    let Some(object) = value.as_object_mut() else {
        warn!("Request body is not a JSON object, forwarding as-is");
        return PreparedBody::raw(raw);
    };

    if has_model(object) {
        let model = object.get("model").and_then(Value::as_str).map(str::to_string);
        return PreparedBody {
            bytes: raw,
            model,
            injected_default: false,
        };
    }

    object.insert("model".to_string(), Value::from(default_model));
    info!(model = %default_model, "No model specified, using default");

    match serde_json::to_vec(&value) {
        Ok(bytes) => PreparedBody {
            bytes: Bytes::from(bytes),
            model: Some(default_model.to_string()),
            injected_default: true,
        },
        Err(e) => {
            warn!(error = %e, "Failed to re-serialize request body, forwarding as-is");
            PreparedBody::raw(raw)
        }
    }
}
