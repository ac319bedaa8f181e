//! Unit and router-level tests.
//!
//! - **storage_tests**: SQL behaviour of `SqliteStorage` against in-memory SQLite
//! - **api_tests**: song endpoints through the full router, backed by `MemoryStorage`
//! - **error_tests**: error-to-envelope mapping and request field validation
//! - **config_tests**: configuration layering and validation
//! - **health_api_tests**: health, readiness, metrics and version endpoints
//!
//! Run a single module with e.g. `cargo test api_tests`.

mod config_tests;
mod error_tests;
mod health_api_tests;
