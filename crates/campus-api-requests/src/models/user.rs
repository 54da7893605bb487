//! Request and response models for the admin user-management endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use campus_db::models::{User, UserRole};

/// Request to revoke a user's faculty access.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct RevokeAccessBody {
    /// Email of the user whose access is revoked.
    #[validate(email(message = "A valid email address is required"))]
    pub email: String,
}

/// A portal user as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    /// User ID.
    pub id: Uuid,

    /// Email address.
    pub email: String,

    /// Display name.
    pub name: String,

    /// Institution, if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub institution: Option<String>,

    /// Mobile number, if provided.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mobile: Option<String>,

    /// Current role.
    pub role: UserRole,

    /// When the account was created.
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            name: user.name,
            institution: user.institution,
            mobile: user.mobile,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// List of portal users.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserListResponse {
    /// The users, newest-first.
    pub items: Vec<UserResponse>,

    /// Total number of users returned.
    pub total: usize,
}

/// Generic success message.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    /// Human-readable outcome.
    pub message: String,
}
