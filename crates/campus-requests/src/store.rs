//! Storage traits for the request workflow.
//!
//! The workflow service talks to storage through these traits. PostgreSQL
//! implementations delegate to the `campus-db` row models; the in-memory
//! implementations exist for tests and run without a database.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use campus_db::models::{AdminRequest, AdminRequestStatus, CreateAdminRequest, User, UserRole};

use crate::error::{RequestError, Result};

// ============================================================================
// Store Traits
// ============================================================================

/// User directory storage.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>>;

    /// Find a user by email (case-insensitive).
    async fn find_by_email(&self, email: &str) -> Result<Option<User>>;

    /// List all users, newest-first.
    async fn list_all(&self) -> Result<Vec<User>>;

    /// Set the role for the user with the given email.
    ///
    /// Returns the number of rows updated.
    async fn set_role_by_email(&self, email: &str, role: UserRole) -> Result<u64>;
}

/// Faculty access request storage.
#[async_trait]
pub trait RequestStore: Send + Sync {
    /// Find a request by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminRequest>>;

    /// Find the pending request for a user, if any.
    async fn find_pending_for_user(&self, user_id: Uuid) -> Result<Option<AdminRequest>>;

    /// Find the most recent request for a user, if any.
    async fn find_latest_for_user(&self, user_id: Uuid) -> Result<Option<AdminRequest>>;

    /// List requests newest-first, optionally filtered to one status.
    async fn list(&self, status: Option<AdminRequestStatus>) -> Result<Vec<AdminRequest>>;

    /// Create a new pending request.
    ///
    /// Fails with [`RequestError::PendingRequestExists`] if the user
    /// already has a pending request.
    async fn create(&self, input: CreateAdminRequest) -> Result<AdminRequest>;

    /// Transition a pending request to a terminal status.
    ///
    /// Conditional write: returns `None` when the request is no longer
    /// pending, so racing reviews apply at most once.
    async fn mark_reviewed(
        &self,
        id: Uuid,
        status: AdminRequestStatus,
        reviewer_email: &str,
    ) -> Result<Option<AdminRequest>>;

    /// Flip all approved requests for an email to rejected.
    ///
    /// Returns the number of requests flipped.
    async fn reject_approved_for_email(&self, email: &str, reviewer_email: &str) -> Result<u64>;
}

// ============================================================================
// PostgreSQL Implementations
// ============================================================================

/// PostgreSQL-backed user store.
pub struct PgUserStore {
    pool: sqlx::PgPool,
}

impl PgUserStore {
    /// Create a store over the given pool.
    #[must_use]
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        User::find_by_id(&self.pool, id).await.map_err(Into::into)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        User::find_by_email(&self.pool, email)
            .await
            .map_err(Into::into)
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        User::list_all(&self.pool).await.map_err(Into::into)
    }

    async fn set_role_by_email(&self, email: &str, role: UserRole) -> Result<u64> {
        User::set_role_by_email(&self.pool, email, role)
            .await
            .map_err(Into::into)
    }
}

/// PostgreSQL-backed request store.
pub struct PgRequestStore {
    pool: sqlx::PgPool,
}

impl PgRequestStore {
    /// Create a store over the given pool.
    #[must_use]
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RequestStore for PgRequestStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminRequest>> {
        AdminRequest::find_by_id(&self.pool, id)
            .await
            .map_err(Into::into)
    }

    async fn find_pending_for_user(&self, user_id: Uuid) -> Result<Option<AdminRequest>> {
        AdminRequest::find_pending_for_user(&self.pool, user_id)
            .await
            .map_err(Into::into)
    }

    async fn find_latest_for_user(&self, user_id: Uuid) -> Result<Option<AdminRequest>> {
        AdminRequest::find_latest_for_user(&self.pool, user_id)
            .await
            .map_err(Into::into)
    }

    async fn list(&self, status: Option<AdminRequestStatus>) -> Result<Vec<AdminRequest>> {
        AdminRequest::list(&self.pool, status)
            .await
            .map_err(Into::into)
    }

    async fn create(&self, input: CreateAdminRequest) -> Result<AdminRequest> {
        match AdminRequest::create(&self.pool, input).await {
            Ok(request) => Ok(request),
            // The partial unique index on (user_id) WHERE status='pending'
            // turns a racing duplicate insert into the same Conflict.
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(RequestError::PendingRequestExists)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn mark_reviewed(
        &self,
        id: Uuid,
        status: AdminRequestStatus,
        reviewer_email: &str,
    ) -> Result<Option<AdminRequest>> {
        AdminRequest::mark_reviewed(&self.pool, id, status, reviewer_email)
            .await
            .map_err(Into::into)
    }

    async fn reject_approved_for_email(&self, email: &str, reviewer_email: &str) -> Result<u64> {
        AdminRequest::reject_approved_for_email(&self.pool, email, reviewer_email)
            .await
            .map_err(Into::into)
    }
}

// ============================================================================
// In-Memory Implementations (for testing)
// ============================================================================

/// In-memory user store for testing.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: Arc<RwLock<Vec<User>>>,
}

impl InMemoryUserStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a user directly (test setup).
    pub async fn insert(&self, user: User) {
        self.users.write().await.push(user);
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>> {
        Ok(self.users.read().await.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>> {
        let email = email.trim().to_lowercase();
        Ok(self
            .users
            .read()
            .await
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>> {
        let mut users: Vec<User> = self.users.read().await.clone();
        users.reverse();
        Ok(users)
    }

    async fn set_role_by_email(&self, email: &str, role: UserRole) -> Result<u64> {
        let email = email.trim().to_lowercase();
        let mut users = self.users.write().await;
        let mut updated = 0;
        for user in users.iter_mut().filter(|u| u.email == email) {
            user.role = role;
            user.updated_at = Utc::now();
            updated += 1;
        }
        Ok(updated)
    }
}

/// In-memory request store for testing.
///
/// Enforces the same one-pending-per-user invariant the partial unique
/// index provides in PostgreSQL.
#[derive(Debug, Default)]
pub struct InMemoryRequestStore {
    requests: Arc<RwLock<Vec<AdminRequest>>>,
}

impl InMemoryRequestStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored requests (test assertions).
    pub async fn count(&self) -> usize {
        self.requests.read().await.len()
    }
}

#[async_trait]
impl RequestStore for InMemoryRequestStore {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<AdminRequest>> {
        Ok(self
            .requests
            .read()
            .await
            .iter()
            .find(|r| r.id == id)
            .cloned())
    }

    async fn find_pending_for_user(&self, user_id: Uuid) -> Result<Option<AdminRequest>> {
        Ok(self
            .requests
            .read()
            .await
            .iter()
            .find(|r| r.user_id == user_id && r.status.is_pending())
            .cloned())
    }

    async fn find_latest_for_user(&self, user_id: Uuid) -> Result<Option<AdminRequest>> {
        Ok(self
            .requests
            .read()
            .await
            .iter()
            .rev()
            .find(|r| r.user_id == user_id)
            .cloned())
    }

    async fn list(&self, status: Option<AdminRequestStatus>) -> Result<Vec<AdminRequest>> {
        Ok(self
            .requests
            .read()
            .await
            .iter()
            .rev()
            .filter(|r| status.map_or(true, |s| r.status == s))
            .cloned()
            .collect())
    }

    async fn create(&self, input: CreateAdminRequest) -> Result<AdminRequest> {
        let mut requests = self.requests.write().await;

        if requests
            .iter()
            .any(|r| r.user_id == input.user_id && r.status.is_pending())
        {
            return Err(RequestError::PendingRequestExists);
        }

        let request = AdminRequest {
            id: Uuid::new_v4(),
            user_id: input.user_id,
            name: input.name,
            email: input.email,
            institution: input.institution,
            mobile: input.mobile,
            reason: input.reason,
            status: AdminRequestStatus::Pending,
            created_at: Utc::now(),
            reviewed_at: None,
            reviewed_by: None,
        };
        requests.push(request.clone());
        Ok(request)
    }

    async fn mark_reviewed(
        &self,
        id: Uuid,
        status: AdminRequestStatus,
        reviewer_email: &str,
    ) -> Result<Option<AdminRequest>> {
        let mut requests = self.requests.write().await;
        let Some(request) = requests
            .iter_mut()
            .find(|r| r.id == id && r.status.is_pending())
        else {
            return Ok(None);
        };

        request.status = status;
        request.reviewed_at = Some(Utc::now());
        request.reviewed_by = Some(reviewer_email.to_string());
        Ok(Some(request.clone()))
    }

    async fn reject_approved_for_email(&self, email: &str, reviewer_email: &str) -> Result<u64> {
        let email = email.trim().to_lowercase();
        let mut requests = self.requests.write().await;
        let mut flipped = 0;
        for request in requests
            .iter_mut()
            .filter(|r| r.email == email && r.status == AdminRequestStatus::Approved)
        {
            request.status = AdminRequestStatus::Rejected;
            request.reviewed_at = Some(Utc::now());
            request.reviewed_by = Some(reviewer_email.to_string());
            flipped += 1;
        }
        Ok(flipped)
    }
}
