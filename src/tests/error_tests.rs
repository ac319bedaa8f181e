use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use serde_json::Value;

use crate::error::{validation, AppError};
use crate::response::{ApiResponse, FieldError, Status};
use crate::storage::StorageError;
use crate::types::parse_release_date;

async fn body_json(err: AppError) -> (StatusCode, Value) {
    let response = err.into_response();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_errors_render_as_200_envelopes() {
    let (status, body) = body_json(AppError::NotFound).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "Error");
    assert_eq!(body["message"], "not found");

    let (status, body) = body_json(AppError::AlreadyExists).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "song already exists");

    let (_, body) = body_json(AppError::InvalidRequest("invalid request".into())).await;
    assert_eq!(body["message"], "invalid request");
    assert!(body.get("field_errors").is_none());
}

#[tokio::test]
async fn test_internal_error_hides_cause() {
    let err = AppError::Internal {
        message: "internal server error",
        source: anyhow::anyhow!("disk I/O error at /var/lib/songbook.db"),
    };
    let (status, body) = body_json(err).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "internal server error");
    assert!(!body.to_string().contains("disk"));
}

#[tokio::test]
async fn test_validation_error_lists_fields() {
    let err = AppError::Validation(vec![FieldError::required("song"), FieldError::required("id")]);
    let (_, body) = body_json(err).await;
    assert_eq!(body["message"], "field song is a required field, field id is a required field");
    assert_eq!(body["field_errors"][1]["field"], "id");
}

#[test]
fn test_from_storage_mapping() {
    assert!(matches!(AppError::from_storage(StorageError::NotFound, "x"), AppError::NotFound));
    assert!(matches!(AppError::from_storage(StorageError::AlreadyExists, "x"), AppError::AlreadyExists));
    match AppError::from_storage(StorageError::Database(sqlx::Error::PoolTimedOut), "failed to add song") {
        AppError::Internal { message, .. } => assert_eq!(message, "failed to add song"),
        other => panic!("Expected Internal variant, got {:?}", other),
    }
}

#[test]
fn test_app_error_display_and_source() {
    use std::error::Error;

    let err = AppError::InvalidRequest("empty request".into());
    assert_eq!(err.to_string(), "Invalid request: empty request");
    assert!(err.source().is_none());

    let err = AppError::Internal { message: "failed to update song", source: anyhow::anyhow!("boom") };
    assert_eq!(err.to_string(), "failed to update song: boom");
    assert!(err.source().is_some());
}

#[test]
fn test_ok_envelope_shape() {
    let ok = serde_json::to_value(ApiResponse::ok()).unwrap();
    assert_eq!(ok, serde_json::json!({ "status": "OK" }));

    let with_data = serde_json::to_value(ApiResponse::with_data("Creep")).unwrap();
    assert_eq!(with_data, serde_json::json!({ "status": "OK", "data": "Creep" }));

    let parsed: ApiResponse<Value> = serde_json::from_str(r#"{"status":"Error","message":"m"}"#).unwrap();
    assert_eq!(parsed.status, Status::Error);
}

#[test]
fn test_positive_segment() {
    assert_eq!(validation::positive_segment("10"), Some(10));
    assert_eq!(validation::positive_segment("0"), None);
    assert_eq!(validation::positive_segment("-3"), None);
    assert_eq!(validation::positive_segment("1.5"), None);
    assert_eq!(validation::positive_segment(""), None);
}

#[test]
fn test_require_and_optional_date() {
    let mut errors = Vec::new();
    validation::require("song", "  ", &mut errors);
    validation::require("group", "Blur", &mut errors);
    assert_eq!(errors, vec![FieldError::required("song")]);

    let mut errors = Vec::new();
    assert_eq!(validation::optional_date("date_song", "", &mut errors), None);
    assert_eq!(
        validation::optional_date("date_song", "1994-04-25", &mut errors),
        NaiveDate::from_ymd_opt(1994, 4, 25)
    );
    assert!(errors.is_empty());
    assert_eq!(validation::optional_date("date_song", "25.04.1994", &mut errors), None);
    assert_eq!(errors[0].field, "date_song");
}

#[test]
fn test_parse_release_date() {
    assert_eq!(parse_release_date("2001-06-04"), NaiveDate::from_ymd_opt(2001, 6, 4));
    assert_eq!(parse_release_date("2001-06-04T23:30:00+02:00"), NaiveDate::from_ymd_opt(2001, 6, 4));
    assert_eq!(parse_release_date("June 2001"), None);
}
