//! Application configuration loaded from environment variables.
//!
//! Fail-fast loading: required variables must be present and valid or the
//! application exits with a clear error message at startup, never at first
//! use.

use std::env;
use std::time::Duration;

use thiserror::Error;

use campus_requests::{RateLimitConfig, ReviewerAuthority};

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing.
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    /// An environment variable has an invalid value.
    #[error("Invalid value for {var}: {message}")]
    InvalidVar {
        var: &'static str,
        message: String,
    },
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string.
    pub database_url: String,

    /// Shared secret for verifying portal JWTs.
    pub jwt_secret: String,

    /// Email of the sole reviewer, if configured.
    ///
    /// Absent means every reviewer operation is denied.
    pub super_admin_email: Option<String>,

    /// Bind host.
    pub host: String,

    /// Bind port.
    pub port: u16,

    /// Log filter directive.
    pub rust_log: String,

    /// Submission rate limit settings.
    pub rate_limit: RateLimitConfig,
}

impl Config {
    /// Load configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            env::var("DATABASE_URL").map_err(|_| ConfigError::MissingVar("DATABASE_URL"))?;
        let jwt_secret =
            env::var("JWT_SECRET").map_err(|_| ConfigError::MissingVar("JWT_SECRET"))?;

        let super_admin_email = env::var("SUPER_ADMIN_EMAIL")
            .ok()
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        let host = env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var("PORT", 8080)?;
        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let max_attempts = parse_var(
            "REQUEST_RATE_LIMIT_MAX",
            campus_requests::rate_limit::DEFAULT_MAX_ATTEMPTS,
        )?;
        let window_secs = parse_var(
            "REQUEST_RATE_LIMIT_WINDOW_SECS",
            campus_requests::rate_limit::DEFAULT_WINDOW_SECS,
        )?;

        Ok(Self {
            database_url,
            jwt_secret,
            super_admin_email,
            host,
            port,
            rust_log,
            rate_limit: RateLimitConfig {
                max_attempts,
                window: Duration::from_secs(window_secs),
            },
        })
    }

    /// The socket address string to bind to.
    #[must_use]
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// The reviewer authority derived from configuration.
    ///
    /// Fails closed: no configured email means no reviewer exists.
    #[must_use]
    pub fn reviewer_authority(&self) -> ReviewerAuthority {
        ReviewerAuthority::new(self.super_admin_email.clone())
    }
}

/// Parse an optional environment variable, falling back to a default.
fn parse_var<T: std::str::FromStr>(var: &'static str, default: T) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match env::var(var) {
        Ok(value) => value.parse().map_err(|e: T::Err| ConfigError::InvalidVar {
            var,
            message: e.to_string(),
        }),
        Err(_) => Ok(default),
    }
}
