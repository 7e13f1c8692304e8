//! Error types for learnfit-scorer
//!
//! `ScoreError` is what the scoring core and the store adapters return;
//! `ApiError` is its HTTP-facing counterpart.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use uuid::Uuid;

/// Failure of a store-boundary call
///
/// A missing transcript is not an error; see `RecalculationOutcome::NoTranscript`.
#[derive(Debug, Error)]
pub enum ScoreError {
    /// The referenced video does not exist; nothing was written
    #[error("Video not found: {0}")]
    NotFound(Uuid),

    /// Storage could not complete the operation; prior state is intact
    #[error("Storage failure: {0}")]
    StorageFailure(String),
}

impl From<sqlx::Error> for ScoreError {
    fn from(err: sqlx::Error) -> Self {
        ScoreError::StorageFailure(err.to_string())
    }
}

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// Storage temporarily unable to commit (503); caller may retry
    #[error("Storage failure: {0}")]
    StorageFailure(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),

    /// learnfit-common error
    #[error("Common error: {0}")]
    Common(#[from] learnfit_common::Error),
}

impl From<ScoreError> for ApiError {
    fn from(err: ScoreError) -> Self {
        match err {
            ScoreError::NotFound(id) => ApiError::NotFound(format!("Video {}", id)),
            ScoreError::StorageFailure(msg) => ApiError::StorageFailure(msg),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::StorageFailure(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "STORAGE_FAILURE", msg)
            }
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
            ApiError::Common(ref err) => match err {
                learnfit_common::Error::InvalidInput(msg) => {
                    (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone())
                }
                learnfit_common::Error::Database(e) => (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "STORAGE_FAILURE",
                    e.to_string(),
                ),
                other => (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    other.to_string(),
                ),
            },
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
