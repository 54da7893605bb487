//! PostgreSQL persistence layer for the campus portal.
//!
//! Provides the connection pool, embedded migrations, and the row models
//! for the two tables the faculty-access workflow touches:
//!
//! - `users` - the user directory (one role per user)
//! - `admin_requests` - faculty access requests with their review lifecycle

pub mod error;
pub mod migrations;
pub mod models;
pub mod pool;

pub use error::DbError;
pub use migrations::run_migrations;
pub use models::{
    AdminRequest, AdminRequestStatus, CreateAdminRequest, User, UserRole,
};
pub use pool::DbPool;
