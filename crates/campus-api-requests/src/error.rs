//! API error types for the faculty access request endpoints.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use campus_requests::RequestError;

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for client handling.
    pub error: String,
    /// Human-readable error message.
    pub message: String,
}

/// Result type for request API handlers.
pub type ApiResult<T> = Result<T, ApiRequestsError>;

/// Request API error type.
#[derive(Debug, Error)]
pub enum ApiRequestsError {
    /// Domain error from the workflow crate.
    #[error(transparent)]
    Workflow(#[from] RequestError),

    /// Validation error.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication required.
    #[error("Authentication required")]
    Unauthorized,

    /// Too many request submissions in the window.
    #[error("Too many requests. Please try again later.")]
    TooManyRequests,

    /// Internal server error.
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for ApiRequestsError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

impl IntoResponse for ApiRequestsError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            Self::Workflow(e) => {
                if e.is_not_found() {
                    (StatusCode::NOT_FOUND, "not_found", e.to_string())
                } else if e.is_conflict() {
                    (StatusCode::CONFLICT, "conflict", e.to_string())
                } else if e.is_forbidden() {
                    (StatusCode::FORBIDDEN, "forbidden", e.to_string())
                } else {
                    match e {
                        RequestError::Validation(msg) => {
                            (StatusCode::BAD_REQUEST, "validation_error", msg.clone())
                        }
                        RequestError::Database(db_err) => {
                            tracing::error!("RequestError::Database: {:?}", db_err);
                            (
                                StatusCode::INTERNAL_SERVER_ERROR,
                                "database_error",
                                "Database error".to_string(),
                            )
                        }
                        _ => {
                            tracing::error!("Unhandled workflow error: {:?}", e);
                            (
                                StatusCode::INTERNAL_SERVER_ERROR,
                                "internal_error",
                                "An internal error occurred".to_string(),
                            )
                        }
                    }
                }
            }
            Self::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            Self::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                self.to_string(),
            ),
            Self::TooManyRequests => (
                StatusCode::TOO_MANY_REQUESTS,
                "rate_limited",
                self.to_string(),
            ),
            Self::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: error_code.to_string(),
            message,
        };

        (status, Json(body)).into_response()
    }
}
