use std::any::Any;

use axum::{
    body::Body,
    http::Request,
    response::{IntoResponse, Response},
};
use tracing::Span;

use crate::response::ApiResponse;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Span for one HTTP request, tagged with the id set by `SetRequestIdLayer`.
pub fn make_request_span(req: &Request<Body>) -> Span {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");
    tracing::info_span!(
        "request",
        method = %req.method(),
        uri = %req.uri(),
        request_id = %request_id,
    )
}

/// Turns a handler panic into an error envelope so the process keeps serving.
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        *s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = %detail, "request handler panicked");
    ApiResponse::error("internal server error").into_response()
}
