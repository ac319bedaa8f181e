//! HTTP route handlers.
//!
//! - `songs`: song CRUD and listing
//! - `health`: liveness, readiness, metrics and version endpoints

pub mod health;
pub mod songs;
