//! Faculty access request model.
//!
//! Represents a user's request to be granted faculty (admin) access,
//! together with its review lifecycle.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Status of a faculty access request.
///
/// `pending` is the only non-terminal state; `approved` and `rejected`
/// are absorbing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, utoipa::ToSchema)]
#[sqlx(type_name = "admin_request_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum AdminRequestStatus {
    /// Awaiting review.
    Pending,
    /// Approved by the reviewer; the user's role was escalated.
    Approved,
    /// Rejected by the reviewer, or invalidated by a later revoke.
    Rejected,
}

impl AdminRequestStatus {
    /// Check if the request can still be actioned.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    /// Check if the request is in a terminal state.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// A faculty access request.
///
/// Name, email, institution, and mobile are snapshots of the user's
/// profile at request time.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AdminRequest {
    /// Unique identifier for the request.
    pub id: Uuid,

    /// The user who submitted the request.
    pub user_id: Uuid,

    /// Snapshot of the user's name.
    pub name: String,

    /// Snapshot of the user's email.
    pub email: String,

    /// Snapshot of the user's institution.
    pub institution: String,

    /// Snapshot of the user's mobile number.
    pub mobile: String,

    /// Optional free-text justification (bounded length).
    pub reason: Option<String>,

    /// Current request status.
    pub status: AdminRequestStatus,

    /// When the request was submitted.
    pub created_at: DateTime<Utc>,

    /// When the request was reviewed (set iff status is terminal).
    pub reviewed_at: Option<DateTime<Utc>>,

    /// Reviewer email (set iff status is terminal).
    pub reviewed_by: Option<String>,
}

/// Input for creating a new faculty access request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAdminRequest {
    pub user_id: Uuid,
    pub name: String,
    pub email: String,
    pub institution: String,
    pub mobile: String,
    pub reason: Option<String>,
}

impl AdminRequest {
    /// Find a request by ID.
    pub async fn find_by_id(pool: &sqlx::PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM admin_requests
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find the pending request for a user, if any.
    pub async fn find_pending_for_user(
        pool: &sqlx::PgPool,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM admin_requests
            WHERE user_id = $1 AND status = 'pending'
            ",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// Find the most recent request for a user, if any.
    pub async fn find_latest_for_user(
        pool: &sqlx::PgPool,
        user_id: Uuid,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM admin_requests
            WHERE user_id = $1
            ORDER BY created_at DESC
            LIMIT 1
            ",
        )
        .bind(user_id)
        .fetch_optional(pool)
        .await
    }

    /// List requests newest-first, optionally filtered to one status.
    pub async fn list(
        pool: &sqlx::PgPool,
        status: Option<AdminRequestStatus>,
    ) -> Result<Vec<Self>, sqlx::Error> {
        match status {
            Some(status) => {
                sqlx::query_as(
                    r"
                    SELECT * FROM admin_requests
                    WHERE status = $1
                    ORDER BY created_at DESC
                    ",
                )
                .bind(status)
                .fetch_all(pool)
                .await
            }
            None => {
                sqlx::query_as(
                    r"
                    SELECT * FROM admin_requests
                    ORDER BY created_at DESC
                    ",
                )
                .fetch_all(pool)
                .await
            }
        }
    }

    /// Create a new request with status `pending`.
    ///
    /// The partial unique index on `(user_id) WHERE status = 'pending'`
    /// makes a concurrent duplicate insert fail with a unique violation.
    pub async fn create(
        pool: &sqlx::PgPool,
        input: CreateAdminRequest,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO admin_requests (user_id, name, email, institution, mobile, reason)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            ",
        )
        .bind(input.user_id)
        .bind(&input.name)
        .bind(&input.email)
        .bind(&input.institution)
        .bind(&input.mobile)
        .bind(&input.reason)
        .fetch_one(pool)
        .await
    }

    /// Transition a pending request to a terminal status.
    ///
    /// Conditional update: only a row still in `pending` is touched, so a
    /// racing second review affects zero rows and returns `None`.
    pub async fn mark_reviewed(
        pool: &sqlx::PgPool,
        id: Uuid,
        status: AdminRequestStatus,
        reviewer_email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            UPDATE admin_requests
            SET status = $2, reviewed_at = NOW(), reviewed_by = $3
            WHERE id = $1 AND status = 'pending'
            RETURNING *
            ",
        )
        .bind(id)
        .bind(status)
        .bind(reviewer_email)
        .fetch_optional(pool)
        .await
    }

    /// Flip all approved requests for an email to rejected.
    ///
    /// Used by revoke so request history reflects current authority state.
    /// Returns the number of requests flipped.
    pub async fn reject_approved_for_email(
        pool: &sqlx::PgPool,
        email: &str,
        reviewer_email: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r"
            UPDATE admin_requests
            SET status = 'rejected', reviewed_at = NOW(), reviewed_by = $2
            WHERE email = $1 AND status = 'approved'
            ",
        )
        .bind(email.trim().to_lowercase())
        .bind(reviewer_email)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_is_pending() {
        assert!(AdminRequestStatus::Pending.is_pending());
        assert!(!AdminRequestStatus::Approved.is_pending());
        assert!(!AdminRequestStatus::Rejected.is_pending());
    }

    #[test]
    fn status_is_terminal() {
        assert!(!AdminRequestStatus::Pending.is_terminal());
        assert!(AdminRequestStatus::Approved.is_terminal());
        assert!(AdminRequestStatus::Rejected.is_terminal());
    }

    #[test]
    fn status_serialization() {
        assert_eq!(
            serde_json::to_string(&AdminRequestStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&AdminRequestStatus::Approved).unwrap(),
            "\"approved\""
        );
    }

    #[test]
    fn create_input_carries_snapshot() {
        let input = CreateAdminRequest {
            user_id: Uuid::new_v4(),
            name: "Jo Mehta".to_string(),
            email: "jo@campus.edu".to_string(),
            institution: "Not specified".to_string(),
            mobile: "Not specified".to_string(),
            reason: Some("I teach CS301".to_string()),
        };

        assert_eq!(input.institution, "Not specified");
        assert_eq!(input.reason.as_deref(), Some("I teach CS301"));
    }
}
