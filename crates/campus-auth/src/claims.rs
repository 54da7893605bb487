//! JWT claims for authenticated portal users.

use campus_core::UserId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried in a portal access token.
///
/// Issued by the identity provider; this service only verifies and trusts
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthClaims {
    /// Subject - the user's stable ID.
    pub sub: String,

    /// User's email address.
    pub email: String,

    /// Expiration time as Unix timestamp.
    pub exp: i64,

    /// Issued at as Unix timestamp.
    pub iat: i64,
}

impl AuthClaims {
    /// Build claims for a user, valid for `ttl_secs` from now.
    #[must_use]
    pub fn new(user_id: Uuid, email: &str, ttl_secs: i64) -> Self {
        let now = chrono::Utc::now().timestamp();
        Self {
            sub: user_id.to_string(),
            email: email.to_string(),
            exp: now + ttl_secs,
            iat: now,
        }
    }

    /// Parse the subject claim as a typed user ID.
    pub fn user_id(&self) -> Result<UserId, crate::error::AuthError> {
        self.sub
            .parse::<UserId>()
            .map_err(|_| crate::error::AuthError::InvalidSubject)
    }
}
