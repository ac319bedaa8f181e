use axum::response::{IntoResponse, Response};
use std::error::Error;
use std::fmt;

use crate::response::{ApiResponse, FieldError};
use crate::storage::StorageError;

/// Everything a song handler can fail with.
///
/// Each variant renders as an `"Error"` envelope with a short, fixed message.
/// Internal causes are logged under an error id and never reach the client.
#[derive(Debug)]
pub enum AppError {
    /// Malformed input detected before storage was touched.
    InvalidRequest(String),
    /// Field-level validation failures.
    Validation(Vec<FieldError>),
    /// The referenced song does not exist.
    NotFound,
    /// The title is already used by another song.
    AlreadyExists,
    /// Any other failure. `message` is the client-facing text.
    Internal { message: &'static str, source: anyhow::Error },
}

impl AppError {
    /// Maps a storage error onto the user-facing set; `fallback` is shown for
    /// failures that are not a known sentinel.
    pub fn from_storage(err: StorageError, fallback: &'static str) -> Self {
        match err {
            StorageError::NotFound => AppError::NotFound,
            StorageError::AlreadyExists => AppError::AlreadyExists,
            StorageError::Database(e) => AppError::Internal { message: fallback, source: e.into() },
        }
    }

    pub fn client_message(&self) -> String {
        match self {
            AppError::InvalidRequest(msg) => msg.clone(),
            AppError::Validation(errors) => {
                errors.iter().map(|e| e.message.as_str()).collect::<Vec<_>>().join(", ")
            }
            AppError::NotFound => "not found".to_string(),
            AppError::AlreadyExists => "song already exists".to_string(),
            AppError::Internal { message, .. } => message.to_string(),
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::InvalidRequest(msg) => write!(f, "Invalid request: {}", msg),
            AppError::Validation(errors) => write!(f, "Validation failed on {} field(s)", errors.len()),
            AppError::NotFound => write!(f, "Not found"),
            AppError::AlreadyExists => write!(f, "Song already exists"),
            AppError::Internal { message, source } => write!(f, "{}: {}", message, source),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            AppError::Internal { source, .. } => Some(source.as_ref()),
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(errors) => ApiResponse::validation(errors).into_response(),
            AppError::Internal { message, source } => {
                let error_id = uuid::Uuid::new_v4();
                tracing::error!(%error_id, "{}: {:?}", message, source);
                ApiResponse::error(message).into_response()
            }
            other => ApiResponse::error(other.client_message()).into_response(),
        }
    }
}

/// A type alias for `Result<T, AppError>`, used by every handler.
pub type AppResult<T> = Result<T, AppError>;

/// Request field checks shared by the song handlers.
pub mod validation {
    use chrono::NaiveDate;

    use crate::response::FieldError;
    use crate::types::parse_release_date;

    /// Pushes a "required" error when `value` is blank.
    pub fn require(field: &str, value: &str, errors: &mut Vec<FieldError>) {
        if value.trim().is_empty() {
            errors.push(FieldError::required(field));
        }
    }

    /// Parses a path segment that must be a positive integer.
    pub fn positive_segment(raw: &str) -> Option<i64> {
        raw.trim().parse::<i64>().ok().filter(|v| *v > 0)
    }

    /// Empty input means "no date". Anything else must parse.
    pub fn optional_date(field: &str, raw: &str, errors: &mut Vec<FieldError>) -> Option<NaiveDate> {
        if raw.trim().is_empty() {
            return None;
        }
        let parsed = parse_release_date(raw);
        if parsed.is_none() {
            errors.push(FieldError::new(field, format!("field {} is not a valid date", field)));
        }
        parsed
    }
}
