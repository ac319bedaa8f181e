use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

use crate::config::AppConfig;
use crate::state::AppState;
use crate::storage::{MemoryStorage, SqliteStorage};

fn setup_test_app() -> Router {
    crate::build_router(AppState::new(Arc::new(MemoryStorage::new()), AppConfig::default()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Option<String>, Vec<u8>) {
    let response = app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap()).await.unwrap();
    let status = response.status();
    let content_type =
        response.headers().get("content-type").and_then(|v| v.to_str().ok()).map(str::to_string);
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    (status, content_type, body)
}

#[tokio::test]
async fn test_healthz_endpoint() {
    let (status, _, body) = get(setup_test_app(), "/healthz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"ok");
}

#[tokio::test]
async fn test_readyz_with_sqlite() {
    let pool = SqlitePoolOptions::new().max_connections(1).connect("sqlite::memory:").await.unwrap();
    crate::db::init_db(&pool).await.unwrap();
    let store = Arc::new(SqliteStorage::new(pool.clone()));
    let app = crate::build_router(AppState::new(store, AppConfig::default()));

    let (status, _, body) = get(app.clone(), "/readyz").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(&body[..], b"ready");

    pool.close().await;
    let (status, _, body) = get(app, "/readyz").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    // Driver error text stays in the log
    assert_eq!(&body[..], b"not ready");
}

#[tokio::test]
async fn test_version_endpoint() {
    let (status, _, body) = get(setup_test_app(), "/version").await;
    assert_eq!(status, StatusCode::OK);
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(json["name"], "songbook");
    assert!(json["build"]["profile"].is_string());
}

#[tokio::test]
async fn test_metrics_prometheus_endpoint() {
    let (status, content_type, body) = get(setup_test_app(), "/metrics/prometheus").await;
    assert_eq!(status, StatusCode::OK);
    assert!(content_type.unwrap().starts_with("text/plain"));
    let text = String::from_utf8(body).unwrap();
    assert!(text.contains("songbook_songs_saved 0"));
    assert!(text.contains("# TYPE songbook_uptime_seconds gauge"));
}
