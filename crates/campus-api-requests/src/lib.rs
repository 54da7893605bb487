//! REST API endpoints for the faculty access request workflow.
//!
//! # Endpoints
//!
//! ## Faculty Access Requests
//! - `POST /admin-requests` - Submit a request (rate limited)
//! - `GET /admin-requests` - List requests, optionally by status (reviewer only)
//! - `GET /admin-requests/my-status` - Own latest request
//! - `PATCH /admin-requests/{id}` - Approve or reject (reviewer only)
//!
//! ## User Management
//! - `GET /admin/users` - User directory (reviewer only)
//! - `POST /admin/users/revoke` - Revoke faculty access (reviewer only)

pub mod error;
pub mod handlers;
pub mod models;
pub mod router;

pub use error::{ApiRequestsError, ApiResult, ErrorResponse};
pub use router::{requests_router, RequestsState};
