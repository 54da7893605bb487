//! HTTP handlers for the request API.

pub mod admin_requests;
pub mod admin_users;
