use crate::state::AppState;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};

// Liveness probe
pub async fn healthz() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

// Readiness probe: storage must answer within 5s
pub async fn readyz(State(state): State<AppState>) -> impl IntoResponse {
    match tokio::time::timeout(std::time::Duration::from_secs(5), state.store.ping()).await {
        Ok(Ok(())) => (StatusCode::OK, "ready").into_response(),
        Ok(Err(e)) => {
            tracing::warn!("readiness check failed: {}", e);
            (StatusCode::SERVICE_UNAVAILABLE, "not ready").into_response()
        }
        Err(_) => (StatusCode::SERVICE_UNAVAILABLE, "not ready: timeout").into_response(),
    }
}

pub async fn metrics(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.metrics.get_snapshot())
}

// Prometheus text exposition format
pub async fn metrics_prometheus(State(state): State<AppState>) -> impl IntoResponse {
    let m = state.metrics.get_snapshot();
    let body = format!(
        "# HELP songbook_songs_saved Songs created\n# TYPE songbook_songs_saved counter\nsongbook_songs_saved {}\n\
# HELP songbook_songs_updated Songs updated\n# TYPE songbook_songs_updated counter\nsongbook_songs_updated {}\n\
# HELP songbook_songs_deleted Songs deleted\n# TYPE songbook_songs_deleted counter\nsongbook_songs_deleted {}\n\
# HELP songbook_lookups Song lookups served\n# TYPE songbook_lookups counter\nsongbook_lookups {}\n\
# HELP songbook_request_errors Song requests answered with an error envelope\n# TYPE songbook_request_errors counter\nsongbook_request_errors {}\n\
# HELP songbook_uptime_seconds Uptime seconds\n# TYPE songbook_uptime_seconds gauge\nsongbook_uptime_seconds {}\n",
        m.songs_saved, m.songs_updated, m.songs_deleted, m.lookups, m.request_errors, m.uptime_seconds,
    );
    ([(header::CONTENT_TYPE, "text/plain; version=0.0.4")], body)
}

pub async fn version() -> impl IntoResponse {
    let body = serde_json::json!({
        "name": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
        "package": {
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "authors": env!("CARGO_PKG_AUTHORS"),
            "license": env!("CARGO_PKG_LICENSE"),
        },
        "build": {
            "profile": if cfg!(debug_assertions) { "debug" } else { "release" },
            "os": std::env::consts::OS,
            "arch": std::env::consts::ARCH,
        }
    });
    (StatusCode::OK, Json(body))
}
