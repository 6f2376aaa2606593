//! HTTP error mapping.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cellini_error::CelliniError;
use serde_json::json;

/// Handler-level error wrapper around the domain error.
///
/// Every fatal pipeline error surfaces as HTTP 500 carrying the error's
/// message; the core's propagation contract keeps the message intact up to
/// this boundary.
#[derive(Debug)]
pub struct ApiError(pub CelliniError);

/// Convenience alias for handler return values.
pub type ApiResult<T> = Result<T, ApiError>;

impl From<CelliniError> for ApiError {
    fn from(err: CelliniError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let message = self.0.to_string();
        tracing::error!(error = %message, "Request failed");

        let body = json!({ "error": message });
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
