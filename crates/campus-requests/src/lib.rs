//! Faculty access request workflow.
//!
//! This crate provides the domain logic for the campus portal's
//! role-escalation state machine: students submit faculty access
//! requests, the single configured reviewer approves or rejects them,
//! and approval escalates the user's role to `admin`.
//!
//! # Services
//!
//! - [`RequestWorkflowService`] - create / list / own-status / decide /
//!   revoke operations with authority checks and the terminal-state
//!   guard
//!
//! # Stores
//!
//! Storage is behind the [`store::RequestStore`] and [`store::UserStore`]
//! traits. [`store::PgRequestStore`] / [`store::PgUserStore`] back them
//! with PostgreSQL; the in-memory implementations exist for tests.
//!
//! # Rate limiting
//!
//! [`rate_limit::RateLimit`] is the injected limiter abstraction;
//! [`rate_limit::InMemoryRateLimiter`] is the single-process default
//! (sliding window, 5 attempts per 60 seconds per user).

pub mod authority;
pub mod error;
pub mod rate_limit;
pub mod service;
pub mod store;

pub use authority::ReviewerAuthority;
pub use error::{RequestError, Result};
pub use rate_limit::{InMemoryRateLimiter, RateLimit, RateLimitConfig};
pub use service::{Decision, RequestWorkflowService, MAX_REASON_LENGTH};
pub use store::{
    InMemoryRequestStore, InMemoryUserStore, PgRequestStore, PgUserStore, RequestStore, UserStore,
};
