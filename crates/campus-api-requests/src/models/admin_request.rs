//! Request and response models for faculty access request endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use campus_db::models::{AdminRequest, AdminRequestStatus};
use campus_requests::Decision;

/// Request to submit a faculty access request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateRequestBody {
    /// Optional justification for requesting faculty access.
    ///
    /// Trimmed and truncated to 500 characters server-side; an over-long
    /// reason is never an error.
    pub reason: Option<String>,
}

/// A reviewer's action on a pending request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DecisionAction {
    /// Grant faculty access.
    Approve,
    /// Deny faculty access.
    Reject,
}

impl From<DecisionAction> for Decision {
    fn from(action: DecisionAction) -> Self {
        match action {
            DecisionAction::Approve => Decision::Approve,
            DecisionAction::Reject => Decision::Reject,
        }
    }
}

/// Request to decide a pending faculty access request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DecideRequestBody {
    /// The decision to apply.
    pub action: DecisionAction,
}

/// Query parameters for listing faculty access requests.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct ListRequestsQuery {
    /// Filter to a single status; absent means all requests.
    pub status: Option<AdminRequestStatus>,
}

/// A faculty access request as returned by the API.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AdminRequestResponse {
    /// Request ID.
    pub id: Uuid,

    /// Owning user ID.
    pub user_id: Uuid,

    /// Requester's name at submission time.
    pub name: String,

    /// Requester's email at submission time.
    pub email: String,

    /// Requester's institution at submission time.
    pub institution: String,

    /// Requester's mobile number at submission time.
    pub mobile: String,

    /// Justification supplied by the requester.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Current status.
    pub status: AdminRequestStatus,

    /// When the request was submitted.
    pub created_at: DateTime<Utc>,

    /// When the request was reviewed, if it has been.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,

    /// Email of the reviewer, if reviewed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewed_by: Option<String>,
}

impl From<AdminRequest> for AdminRequestResponse {
    fn from(request: AdminRequest) -> Self {
        Self {
            id: request.id,
            user_id: request.user_id,
            name: request.name,
            email: request.email,
            institution: request.institution,
            mobile: request.mobile,
            reason: request.reason,
            status: request.status,
            created_at: request.created_at,
            reviewed_at: request.reviewed_at,
            reviewed_by: request.reviewed_by,
        }
    }
}

/// List of faculty access requests.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestListResponse {
    /// The requests, newest-first.
    pub items: Vec<AdminRequestResponse>,

    /// Total number of requests returned.
    pub total: usize,
}

/// The authenticated user's own request status.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MyStatusResponse {
    /// Whether the user has ever submitted a request.
    pub has_request: bool,

    /// The most recent request, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request: Option<AdminRequestResponse>,
}

impl From<Option<AdminRequest>> for MyStatusResponse {
    fn from(request: Option<AdminRequest>) -> Self {
        Self {
            has_request: request.is_some(),
            request: request.map(Into::into),
        }
    }
}
