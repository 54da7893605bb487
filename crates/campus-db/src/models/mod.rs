//! Row models for the campus portal tables.

pub mod admin_request;
pub mod user;

pub use admin_request::{AdminRequest, AdminRequestStatus, CreateAdminRequest};
pub use user::{User, UserRole};
