//! User entity model.
//!
//! Represents an account in the user directory. The identity provider
//! assigns the stable ID; the faculty-access workflow is the only path
//! that mutates the role after creation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use campus_core::UserId;

/// Role of a portal user.
///
/// Closed enumeration: authority checks match exhaustively so an
/// unrecognized role can never fall through to a permissive branch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, utoipa::ToSchema)]
#[sqlx(type_name = "user_role", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// Default role for every new account.
    Student,
    /// Faculty access granted through an approved request.
    Admin,
    /// Reserved for the configured reviewer identity.
    SuperAdmin,
}

impl UserRole {
    /// Whether this role carries faculty (admin) privileges.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

/// A user account in the directory.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    /// Stable identifier assigned by the identity provider.
    pub id: Uuid,

    /// Email address, stored lowercase (unique).
    pub email: String,

    /// Display name.
    pub name: String,

    /// Institution / college, if provided.
    pub institution: Option<String>,

    /// Mobile number, if provided.
    pub mobile: Option<String>,

    /// Current role. Exactly one role at any time.
    pub role: UserRole,

    /// When the account was created.
    pub created_at: DateTime<Utc>,

    /// When the account was last updated.
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Get the user ID as a typed `UserId`.
    #[must_use]
    pub fn user_id(&self) -> UserId {
        UserId::from_uuid(self.id)
    }

    /// Find a user by ID.
    pub async fn find_by_id(pool: &sqlx::PgPool, id: Uuid) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM users
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// Find a user by email (case-insensitive; emails are stored lowercase).
    pub async fn find_by_email(
        pool: &sqlx::PgPool,
        email: &str,
    ) -> Result<Option<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM users
            WHERE email = $1
            ",
        )
        .bind(email.trim().to_lowercase())
        .fetch_optional(pool)
        .await
    }

    /// Insert a user on first successful authentication, or refresh the
    /// profile fields on subsequent logins. The role is never touched by
    /// this path.
    pub async fn upsert_on_login(
        pool: &sqlx::PgPool,
        id: Uuid,
        email: &str,
        name: &str,
        institution: Option<&str>,
        mobile: Option<&str>,
    ) -> Result<Self, sqlx::Error> {
        sqlx::query_as(
            r"
            INSERT INTO users (id, email, name, institution, mobile)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (id) DO UPDATE
            SET name = EXCLUDED.name,
                institution = EXCLUDED.institution,
                mobile = EXCLUDED.mobile,
                updated_at = NOW()
            RETURNING *
            ",
        )
        .bind(id)
        .bind(email.trim().to_lowercase())
        .bind(name)
        .bind(institution)
        .bind(mobile)
        .fetch_one(pool)
        .await
    }

    /// List all users, newest-first.
    pub async fn list_all(pool: &sqlx::PgPool) -> Result<Vec<Self>, sqlx::Error> {
        sqlx::query_as(
            r"
            SELECT * FROM users
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(pool)
        .await
    }

    /// Set the role for the user with the given email.
    ///
    /// Returns the number of rows updated (0 when no such user exists).
    pub async fn set_role_by_email(
        pool: &sqlx::PgPool,
        email: &str,
        role: UserRole,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET role = $2, updated_at = NOW()
            WHERE email = $1
            ",
        )
        .bind(email.trim().to_lowercase())
        .bind(role)
        .execute(pool)
        .await?;

        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&UserRole::SuperAdmin).unwrap(),
            "\"super_admin\""
        );
        assert_eq!(
            serde_json::to_string(&UserRole::Student).unwrap(),
            "\"student\""
        );
    }

    #[test]
    fn role_admin_predicate() {
        assert!(!UserRole::Student.is_admin());
        assert!(UserRole::Admin.is_admin());
        assert!(UserRole::SuperAdmin.is_admin());
    }
}
