//! Shared fixtures for workflow integration tests.

use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use campus_db::models::{User, UserRole};
use campus_requests::{
    InMemoryRequestStore, InMemoryUserStore, RequestWorkflowService, ReviewerAuthority,
};

/// The reviewer email configured for all test services.
pub const REVIEWER_EMAIL: &str = "dean@campus.edu";

/// Test harness bundling the service with direct store handles.
pub struct TestWorkflow {
    pub service: RequestWorkflowService,
    pub users: Arc<InMemoryUserStore>,
    pub requests: Arc<InMemoryRequestStore>,
}

/// Build a workflow service over fresh in-memory stores with the
/// reviewer configured.
pub fn workflow() -> TestWorkflow {
    workflow_with_authority(ReviewerAuthority::new(Some(REVIEWER_EMAIL.to_string())))
}

/// Build a workflow service with an explicit authority configuration.
pub fn workflow_with_authority(authority: ReviewerAuthority) -> TestWorkflow {
    let users = Arc::new(InMemoryUserStore::new());
    let requests = Arc::new(InMemoryRequestStore::new());
    let service =
        RequestWorkflowService::new(users.clone(), requests.clone(), authority);
    TestWorkflow {
        service,
        users,
        requests,
    }
}

/// Build a user row for test setup.
pub fn user(email: &str, role: UserRole) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        email: email.to_lowercase(),
        name: "Test User".to_string(),
        institution: Some("Campus Institute of Technology".to_string()),
        mobile: Some("555-0100".to_string()),
        role,
        created_at: now,
        updated_at: now,
    }
}
