//! Middleware applied to every route.
//!
//! - `security_headers`: conservative security and caching headers
//! - `request`: request-id aware tracing spans and panic containment

pub mod request;
pub mod security_headers;
