//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use domain_claims::ClaimsError;

/// Message returned for store faults; the underlying error is only logged
pub const STORE_FAILURE_MESSAGE: &str = "Claims store request failed.";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(String),
}

/// Error response body
///
/// `detail` repeats `message` for clients that read the `{"detail": ...}`
/// shape.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "bad_request", msg),
            ApiError::Database(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "database_error",
                STORE_FAILURE_MESSAGE.to_string(),
            ),
        };

        let body = ErrorResponse {
            error: error_type.to_string(),
            detail: message.clone(),
            message,
        };

        (status, Json(body)).into_response()
    }
}

impl From<ClaimsError> for ApiError {
    fn from(err: ClaimsError) -> Self {
        let message = err.to_string();
        match err {
            ClaimsError::NotCreated => ApiError::BadRequest(message),
            ClaimsError::NotFound { .. } => ApiError::NotFound(message),
            ClaimsError::Store(e) => {
                error!(error = %e, "Claims store call failed");
                ApiError::Database(message)
            }
        }
    }
}
