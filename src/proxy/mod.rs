//! Proxy module
//!
//! Handles request forwarding to the upstream chat-completion API.

pub mod body;
pub mod deepseek;
pub mod headers;
pub mod logging;
pub mod provider;

pub use deepseek::DeepSeekProvider;
pub use logging::RequestContext;
pub use provider::{AiProvider, ByteStream, UpstreamRequest, UpstreamResponse};
