//! Campus Portal Core Library
//!
//! Shared types for the campus portal services.
//!
//! # Modules
//!
//! - [`ids`] - Strongly typed identifiers (`UserId`)

pub mod ids;

// Re-export main types for convenient access
pub use ids::{ParseIdError, UserId};
