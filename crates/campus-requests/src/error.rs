//! Error types for the request workflow.

use thiserror::Error;
use uuid::Uuid;

/// Result type for workflow operations.
pub type Result<T> = std::result::Result<T, RequestError>;

/// Faculty access workflow errors.
#[derive(Debug, Error)]
pub enum RequestError {
    /// The requesting or target user does not exist.
    #[error("User not found")]
    UserNotFound,

    /// The access request does not exist.
    #[error("Request not found: {0}")]
    RequestNotFound(Uuid),

    /// The user already has a pending request.
    #[error("You already have a pending faculty access request")]
    PendingRequestExists,

    /// The request has already been approved or rejected.
    #[error("Request {0} has already been reviewed")]
    AlreadyReviewed(Uuid),

    /// The caller is not the configured reviewer.
    #[error("Access denied: super admin only")]
    NotReviewer,

    /// Revoking the configured reviewer is never allowed.
    #[error("Cannot revoke super admin access")]
    CannotRevokeSuperAdmin,

    /// Input validation failed.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Storage failure.
    #[error("Database error")]
    Database(#[from] sqlx::Error),
}

impl RequestError {
    /// True for errors that map to 404.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::UserNotFound | Self::RequestNotFound(_))
    }

    /// True for errors that map to 409.
    #[must_use]
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::PendingRequestExists | Self::AlreadyReviewed(_))
    }

    /// True for errors that map to 403.
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::NotReviewer | Self::CannotRevokeSuperAdmin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_predicates() {
        assert!(RequestError::UserNotFound.is_not_found());
        assert!(RequestError::RequestNotFound(Uuid::new_v4()).is_not_found());
        assert!(RequestError::PendingRequestExists.is_conflict());
        assert!(RequestError::AlreadyReviewed(Uuid::new_v4()).is_conflict());
        assert!(RequestError::NotReviewer.is_forbidden());
        assert!(RequestError::CannotRevokeSuperAdmin.is_forbidden());

        assert!(!RequestError::PendingRequestExists.is_not_found());
        assert!(!RequestError::NotReviewer.is_conflict());
    }

    #[test]
    fn conflict_messages_are_distinct() {
        // The UI must tell "duplicate pending" apart from "already decided".
        let duplicate = RequestError::PendingRequestExists.to_string();
        let decided = RequestError::AlreadyReviewed(Uuid::new_v4()).to_string();
        assert_ne!(duplicate, decided);
        assert!(duplicate.contains("pending"));
        assert!(decided.contains("already been reviewed"));
    }
}
