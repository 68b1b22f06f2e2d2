//! # Error Handling Middleware
//!
//! Maps domain-specific errors to HTTP status codes and JSON error
//! responses, so every endpoint fails the same way: a status and a
//! `{ "error": message }` body.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use classtable_core::errors::TimetableError;

/// Application error wrapper that provides HTTP status code mapping.
///
/// `AppError` wraps domain-specific `TimetableError` instances and
/// implements `IntoResponse` to convert them into HTTP responses with
/// appropriate status codes and JSON payloads.
#[derive(Debug)]
pub struct AppError(pub TimetableError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Map error types to HTTP status codes
        let status = match &self.0 {
            TimetableError::NotFound(_) => StatusCode::NOT_FOUND,
            TimetableError::Validation(_) => StatusCode::BAD_REQUEST,
            TimetableError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
            TimetableError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Get the error message and format as JSON
        let message = self.0.to_string();
        let body = Json(json!({ "error": message }));

        (status, body).into_response()
    }
}

/// Allows using the `?` operator with functions that return
/// `Result<T, TimetableError>` in handlers returning `Result<T, AppError>`.
impl From<TimetableError> for AppError {
    fn from(err: TimetableError) -> Self {
        AppError(err)
    }
}

/// Wraps repository-level reports in the database error variant.
impl From<eyre::Report> for AppError {
    fn from(err: eyre::Report) -> Self {
        AppError(TimetableError::Database(err))
    }
}

/// Maps a TimetableError to an HTTP response directly.
pub fn map_error(err: TimetableError) -> Response {
    AppError(err).into_response()
}
