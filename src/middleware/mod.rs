//! Middleware for the AI proxy
//!
//! Contains authentication middleware for the chat endpoint.

pub mod auth;
