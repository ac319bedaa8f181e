//! # Songbook
//!
//! A small REST service that stores song records (title, group, lyrics,
//! release date, link) in SQLite.
//!
//! ## Architecture
//!
//! - **Axum**: HTTP server and routing
//! - **SQLx**: asynchronous SQLite access
//! - **Tokio**: async runtime
//! - **Tracing**: structured logging with per-request ids
//!
//! ## Core Components
//!
//! - [`config`]: layered configuration (embedded defaults, files, environment)
//! - [`db`]: connection setup and schema bootstrap
//! - [`storage`]: the [`storage::SongStore`] trait with SQLite and in-memory backends
//! - [`routes`]: HTTP handlers
//! - [`response`]: the JSON envelope every song endpoint answers with
//! - [`error`]: handler errors and their mapping onto the envelope
//! - [`middleware`]: security headers, request spans, panic containment
//! - [`metrics`]: request counters
//! - [`state`]: shared application state
//! - [`types`]: domain model and request DTOs
//!
//! Song endpoints always answer `200 OK`; the envelope's `status` field
//! (`"OK"` or `"Error"`) carries the outcome.

use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod middleware;
pub mod response;
pub mod routes;
pub mod state;
pub mod storage;
pub mod types;

#[cfg(test)]
mod tests;

use state::AppState;

/// Builds the full application router with its middleware stack.
pub fn build_router(state: AppState) -> Router {
    let cfg = state.config.clone();
    let request_timeout = Duration::from_secs(cfg.server.request_timeout_secs);

    let app = Router::new()
        .route("/healthz", get(routes::health::healthz))
        .route("/readyz", get(routes::health::readyz))
        .route("/metrics", get(routes::health::metrics))
        .route("/metrics/prometheus", get(routes::health::metrics_prometheus))
        .route("/version", get(routes::health::version))
        .route("/song", post(routes::songs::save_song))
        .route("/edit", put(routes::songs::update_song))
        .route("/songs", get(routes::songs::list_songs))
        // Both dynamic routes share the first segment name; the router requires it.
        // Static paths win: DELETE of a title equal to one (`song`, `edit`, `songs`,
        // `healthz`, `metrics`, `version`, ...) is answered 405 by that route.
        .route("/{key}", delete(routes::songs::delete_song))
        .route("/{key}/{page}/{page_size}", get(routes::songs::get_song))
        .with_state(state)
        .layer(DefaultBodyLimit::max(cfg.server.max_body_bytes))
        .layer(CatchPanicLayer::custom(middleware::request::handle_panic))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http().make_span_with(middleware::request::make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(from_fn_with_state(cfg, middleware::security_headers::security_headers_middleware));

    // Permissive CORS for local development only
    if cfg!(debug_assertions) {
        app.layer(CorsLayer::permissive())
    } else {
        app
    }
}
