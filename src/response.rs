//! The JSON envelope every song endpoint answers with.
//!
//! Clients read the outcome from `status`, not from the HTTP status code: song
//! endpoints always reply `200 OK`, failures included.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    Error,
}

/// A validation failure on one request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self { field: field.to_string(), message: message.into() }
    }

    pub fn required(field: &str) -> Self {
        Self::new(field, format!("field {} is a required field", field))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T = ()> {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field_errors: Option<Vec<FieldError>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl ApiResponse<()> {
    pub fn ok() -> Self {
        Self { status: Status::Ok, message: None, field_errors: None, data: None }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self { status: Status::Error, message: Some(message.into()), field_errors: None, data: None }
    }

    /// Error envelope whose message lists every failing field.
    pub fn validation(errors: Vec<FieldError>) -> Self {
        let message = errors.iter().map(|e| e.message.as_str()).collect::<Vec<_>>().join(", ");
        Self { status: Status::Error, message: Some(message), field_errors: Some(errors), data: None }
    }
}

impl<T> ApiResponse<T> {
    pub fn with_data(data: T) -> Self {
        Self { status: Status::Ok, message: None, field_errors: None, data: Some(data) }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}
