//! API request and response models.

mod admin_request;
mod user;

pub use admin_request::{
    AdminRequestResponse, CreateRequestBody, DecideRequestBody, DecisionAction, ListRequestsQuery,
    MyStatusResponse, RequestListResponse,
};
pub use user::{MessageResponse, RevokeAccessBody, UserListResponse, UserResponse};
