//! Error types for authentication.

use thiserror::Error;

/// Authentication errors.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Token has expired (exp claim is in the past).
    #[error("Token has expired")]
    TokenExpired,

    /// Token signature is invalid.
    #[error("Invalid token signature")]
    InvalidSignature,

    /// Token format is malformed or invalid.
    #[error("Invalid token: {0}")]
    InvalidToken(String),

    /// Token subject is not a valid user ID.
    #[error("Invalid subject claim")]
    InvalidSubject,

    /// Token encoding failed.
    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),
}
