//! Reviewer authority check.
//!
//! A single email address, supplied through configuration, identifies the
//! sole actor allowed to approve, reject, or revoke faculty access. It is
//! deliberately not a role in the user directory: the trust root cannot be
//! escalated away through normal data paths.

/// The configured reviewer identity.
///
/// Holds the reviewer email normalized once (lowercase, trimmed). When the
/// configuration is absent the predicate rejects every input - the system
/// fails closed rather than open.
#[derive(Debug, Clone)]
pub struct ReviewerAuthority {
    email: Option<String>,
}

impl ReviewerAuthority {
    /// Build from the configured reviewer email, if any.
    ///
    /// Whitespace-only values count as absent.
    #[must_use]
    pub fn new(email: Option<String>) -> Self {
        let email = email
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty());
        Self { email }
    }

    /// Build with no reviewer configured (every check fails).
    #[must_use]
    pub fn disabled() -> Self {
        Self { email: None }
    }

    /// Whether a reviewer email is configured at all.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.email.is_some()
    }

    /// Check whether `candidate` is the configured reviewer.
    ///
    /// Comparison is case-insensitive and whitespace-tolerant.
    #[must_use]
    pub fn is_reviewer(&self, candidate: &str) -> bool {
        match &self.email {
            Some(configured) => candidate.trim().to_lowercase() == *configured,
            None => false,
        }
    }
}
