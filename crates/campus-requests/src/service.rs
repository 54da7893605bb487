//! Faculty access request workflow service.
//!
//! Handles the lifecycle of faculty access requests from submission
//! through review, and the role escalation / revocation that goes with
//! it.

use std::sync::Arc;

use uuid::Uuid;

use campus_db::models::{AdminRequest, AdminRequestStatus, CreateAdminRequest, UserRole};

use crate::authority::ReviewerAuthority;
use crate::error::{RequestError, Result};
use crate::store::{RequestStore, UserStore};

/// Maximum accepted length of the free-text reason, in characters.
pub const MAX_REASON_LENGTH: usize = 500;

/// Snapshot placeholder for profile fields the user never filled in.
const NOT_SPECIFIED: &str = "Not specified";

/// A reviewer's decision on a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Grant faculty access: escalate the user's role to `admin`.
    Approve,
    /// Deny faculty access: the user stays a `student`.
    Reject,
}

/// Service for faculty access request operations.
pub struct RequestWorkflowService {
    users: Arc<dyn UserStore>,
    requests: Arc<dyn RequestStore>,
    authority: ReviewerAuthority,
}

impl RequestWorkflowService {
    /// Create a new workflow service.
    #[must_use]
    pub fn new(
        users: Arc<dyn UserStore>,
        requests: Arc<dyn RequestStore>,
        authority: ReviewerAuthority,
    ) -> Self {
        Self {
            users,
            requests,
            authority,
        }
    }

    /// Submit a new faculty access request for `user_id`.
    ///
    /// Snapshots the user's current profile into the request so later
    /// profile edits do not rewrite history. Fails with `Conflict` when a
    /// pending request already exists.
    pub async fn create_request(
        &self,
        user_id: Uuid,
        reason: Option<String>,
    ) -> Result<AdminRequest> {
        let user = self
            .users
            .find_by_id(user_id)
            .await?
            .ok_or(RequestError::UserNotFound)?;

        // Query-before-insert keeps the common case friendly; the store's
        // uniqueness guarantee catches the racing duplicate.
        if self.requests.find_pending_for_user(user_id).await?.is_some() {
            return Err(RequestError::PendingRequestExists);
        }

        let input = CreateAdminRequest {
            user_id,
            name: user.name,
            email: user.email,
            institution: user.institution.unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            mobile: user.mobile.unwrap_or_else(|| NOT_SPECIFIED.to_string()),
            reason: normalize_reason(reason),
        };

        let request = self.requests.create(input).await?;

        tracing::info!(
            request_id = %request.id,
            user_id = %user_id,
            "Faculty access request created"
        );

        Ok(request)
    }

    /// List all requests, newest-first, optionally filtered to one status.
    ///
    /// Reviewer only.
    pub async fn list_requests(
        &self,
        reviewer_email: &str,
        status: Option<AdminRequestStatus>,
    ) -> Result<Vec<AdminRequest>> {
        self.require_reviewer(reviewer_email, "list requests")?;
        self.requests.list(status).await
    }

    /// Get the most recent request for the authenticated user, if any.
    ///
    /// Self-service: no authority check beyond being that user.
    pub async fn own_status(&self, user_id: Uuid) -> Result<Option<AdminRequest>> {
        self.requests.find_latest_for_user(user_id).await
    }

    /// Approve or reject a pending request.
    ///
    /// Approval performs two writes: the owning user's role is escalated
    /// to `admin`, then the request is marked `approved`. The status
    /// transition is conditional on the request still being pending, so a
    /// racing second review fails with `Conflict` instead of applying
    /// twice.
    pub async fn decide(
        &self,
        request_id: Uuid,
        decision: Decision,
        reviewer_email: &str,
    ) -> Result<AdminRequest> {
        self.require_reviewer(reviewer_email, "decide request")?;

        let request = self
            .requests
            .find_by_id(request_id)
            .await?
            .ok_or(RequestError::RequestNotFound(request_id))?;

        if !request.status.is_pending() {
            return Err(RequestError::AlreadyReviewed(request_id));
        }

        let new_status = match decision {
            Decision::Approve => {
                // Role first, status second (matching the original write
                // order): a failure in between leaves the request pending
                // and re-approvable.
                let updated = self
                    .users
                    .set_role_by_email(&request.email, UserRole::Admin)
                    .await?;
                if updated == 0 {
                    return Err(RequestError::UserNotFound);
                }
                AdminRequestStatus::Approved
            }
            Decision::Reject => AdminRequestStatus::Rejected,
        };

        let reviewed = self
            .requests
            .mark_reviewed(request_id, new_status, reviewer_email)
            .await?
            .ok_or(RequestError::AlreadyReviewed(request_id))?;

        tracing::info!(
            request_id = %request_id,
            status = ?reviewed.status,
            reviewed_by = %reviewer_email,
            "Faculty access request reviewed"
        );

        Ok(reviewed)
    }

    /// Revoke faculty access for `user_email`.
    ///
    /// Demotes the user back to `student` and flips their approved
    /// requests to `rejected` so history reflects current authority. The
    /// configured reviewer can never be revoked through this path.
    pub async fn revoke(&self, user_email: &str, reviewer_email: &str) -> Result<()> {
        self.require_reviewer(reviewer_email, "revoke access")?;

        if self.authority.is_reviewer(user_email) {
            return Err(RequestError::CannotRevokeSuperAdmin);
        }

        let user = self
            .users
            .find_by_email(user_email)
            .await?
            .ok_or(RequestError::UserNotFound)?;

        self.users
            .set_role_by_email(&user.email, UserRole::Student)
            .await?;

        let flipped = self
            .requests
            .reject_approved_for_email(&user.email, reviewer_email)
            .await?;

        tracing::info!(
            user_email = %user.email,
            requests_flipped = flipped,
            "Faculty access revoked"
        );

        Ok(())
    }

    /// List the user directory, newest-first. Reviewer only.
    pub async fn list_users(&self, reviewer_email: &str) -> Result<Vec<campus_db::models::User>> {
        self.require_reviewer(reviewer_email, "list users")?;
        self.users.list_all().await
    }

    fn require_reviewer(&self, candidate: &str, operation: &str) -> Result<()> {
        if self.authority.is_reviewer(candidate) {
            return Ok(());
        }

        // Security event: someone who is not the reviewer attempted a
        // reviewer operation.
        tracing::warn!(
            security = true,
            candidate = %candidate,
            operation = %operation,
            "Unauthorized reviewer operation attempt"
        );
        Err(RequestError::NotReviewer)
    }
}

/// Trim the reason, truncate it to [`MAX_REASON_LENGTH`] characters, and
/// drop it entirely when nothing is left.
fn normalize_reason(reason: Option<String>) -> Option<String> {
    let reason = reason?;
    let truncated: String = reason.chars().take(MAX_REASON_LENGTH).collect();
    let trimmed = truncated.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_reason_trims_whitespace() {
        assert_eq!(
            normalize_reason(Some("  I teach CS301  ".to_string())),
            Some("I teach CS301".to_string())
        );
    }

    #[test]
    fn normalize_reason_truncates_long_input() {
        let long = "x".repeat(MAX_REASON_LENGTH + 100);
        let normalized = normalize_reason(Some(long)).unwrap();
        assert_eq!(normalized.chars().count(), MAX_REASON_LENGTH);
    }

    #[test]
    fn normalize_reason_drops_blank_input() {
        assert_eq!(normalize_reason(Some("   ".to_string())), None);
        assert_eq!(normalize_reason(Some(String::new())), None);
        assert_eq!(normalize_reason(None), None);
    }

    #[test]
    fn normalize_reason_is_char_safe() {
        // Multi-byte characters must not be split mid-codepoint.
        let long = "é".repeat(MAX_REASON_LENGTH + 5);
        let normalized = normalize_reason(Some(long)).unwrap();
        assert_eq!(normalized.chars().count(), MAX_REASON_LENGTH);
    }
}
