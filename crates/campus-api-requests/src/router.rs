//! Router configuration for the request API.

use std::sync::Arc;

use axum::{
    routing::{get, patch, post},
    Router,
};

use campus_requests::{RateLimit, RequestWorkflowService};

use crate::handlers::{admin_requests, admin_users};

/// Shared state for the request API handlers.
#[derive(Clone)]
pub struct RequestsState {
    /// The workflow service.
    pub service: Arc<RequestWorkflowService>,
    /// Submission rate limiter, keyed by user ID.
    pub rate_limiter: Arc<dyn RateLimit>,
}

impl RequestsState {
    /// Create the handler state.
    #[must_use]
    pub fn new(service: Arc<RequestWorkflowService>, rate_limiter: Arc<dyn RateLimit>) -> Self {
        Self {
            service,
            rate_limiter,
        }
    }
}

/// Create the request API router.
///
/// Routes require authentication; the JWT middleware is applied by the
/// binary so tests can inject claims directly.
pub fn requests_router(state: RequestsState) -> Router {
    Router::new()
        // Faculty access requests
        .route("/admin-requests", post(admin_requests::create_request))
        .route("/admin-requests", get(admin_requests::list_requests))
        .route("/admin-requests/my-status", get(admin_requests::my_status))
        .route("/admin-requests/:id", patch(admin_requests::decide_request))
        // User management
        .route("/admin/users", get(admin_users::list_users))
        .route("/admin/users/revoke", post(admin_users::revoke_access))
        .with_state(state)
}
