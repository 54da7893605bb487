//! Rate limiting for request submission.
//!
//! The workflow takes the limiter as an injected abstraction so
//! multi-instance deployments can back it with an external counter store.
//! The in-memory sliding-window implementation is the single-process
//! default.

use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// Default maximum submissions per window.
pub const DEFAULT_MAX_ATTEMPTS: usize = 5;

/// Default window duration in seconds.
pub const DEFAULT_WINDOW_SECS: u64 = 60;

/// Configuration for the rate limiter.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum number of attempts allowed within the window.
    pub max_attempts: usize,
    /// Duration of the sliding window.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            window: Duration::from_secs(DEFAULT_WINDOW_SECS),
        }
    }
}

/// Limiter abstraction keyed by user ID.
pub trait RateLimit: Send + Sync {
    /// Record an attempt for `key`.
    ///
    /// Returns `true` if the attempt is allowed, `false` if rate limited.
    fn check(&self, key: Uuid) -> bool;
}

/// Entry tracking attempts for a single user.
#[derive(Debug, Clone)]
struct AttemptEntry {
    /// Timestamps of attempts within the window.
    timestamps: Vec<Instant>,
}

impl AttemptEntry {
    fn new() -> Self {
        Self {
            timestamps: Vec::new(),
        }
    }

    /// Clean up old attempts and add a new one.
    fn record_attempt(&mut self, now: Instant, window: Duration) {
        self.timestamps.retain(|&t| now.duration_since(t) < window);
        self.timestamps.push(now);
    }

    /// Count attempts within the window.
    fn count(&self, now: Instant, window: Duration) -> usize {
        self.timestamps
            .iter()
            .filter(|&&t| now.duration_since(t) < window)
            .count()
    }

    fn is_exceeded(&self, now: Instant, config: &RateLimitConfig) -> bool {
        self.count(now, config.window) >= config.max_attempts
    }
}

/// In-memory sliding-window rate limiter.
///
/// Thread-safe. Suitable only for a single-process deployment; counters
/// are not shared across instances.
#[derive(Debug, Clone)]
pub struct InMemoryRateLimiter {
    config: RateLimitConfig,
    entries: Arc<Mutex<HashMap<Uuid, AttemptEntry>>>,
}

impl InMemoryRateLimiter {
    /// Create a new rate limiter with the given configuration.
    #[must_use]
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            entries: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Clean up stale entries.
    ///
    /// Should be called periodically to prevent memory growth.
    pub fn cleanup(&self) {
        let now = Instant::now();
        let mut entries = self.entries.lock();
        entries.retain(|_, entry| entry.count(now, self.config.window) > 0);
    }

    /// Remaining attempts for `key` in the current window.
    #[must_use]
    pub fn remaining(&self, key: Uuid) -> usize {
        let now = Instant::now();
        let entries = self.entries.lock();

        let count = entries
            .get(&key)
            .map_or(0, |entry| entry.count(now, self.config.window));

        self.config.max_attempts.saturating_sub(count)
    }
}

impl Default for InMemoryRateLimiter {
    fn default() -> Self {
        Self::new(RateLimitConfig::default())
    }
}

impl RateLimit for InMemoryRateLimiter {
    fn check(&self, key: Uuid) -> bool {
        let now = Instant::now();
        let mut entries = self.entries.lock();

        let entry = entries.entry(key).or_insert_with(AttemptEntry::new);

        // Check if already exceeded BEFORE recording
        if entry.is_exceeded(now, &self.config) {
            return false;
        }

        entry.record_attempt(now, self.config.window);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn limiter(max_attempts: usize, window: Duration) -> InMemoryRateLimiter {
        InMemoryRateLimiter::new(RateLimitConfig {
            max_attempts,
            window,
        })
    }

    #[test]
    fn allows_up_to_max_attempts() {
        let limiter = limiter(5, Duration::from_secs(60));
        let user = Uuid::new_v4();

        for i in 0..5 {
            assert!(limiter.check(user), "attempt {} should succeed", i + 1);
        }

        // 6th attempt within the window is blocked
        assert!(!limiter.check(user));
    }

    #[test]
    fn different_users_independent() {
        let limiter = limiter(2, Duration::from_secs(60));
        let first = Uuid::new_v4();
        let second = Uuid::new_v4();

        limiter.check(first);
        limiter.check(first);
        assert!(!limiter.check(first));

        assert!(limiter.check(second));
    }

    #[test]
    fn remaining_attempts_counts_down() {
        let limiter = limiter(5, Duration::from_secs(60));
        let user = Uuid::new_v4();

        assert_eq!(limiter.remaining(user), 5);
        limiter.check(user);
        assert_eq!(limiter.remaining(user), 4);
        limiter.check(user);
        limiter.check(user);
        assert_eq!(limiter.remaining(user), 2);
    }

    #[test]
    fn window_sliding_behavior() {
        let limiter = limiter(2, Duration::from_millis(100));
        let user = Uuid::new_v4();

        limiter.check(user);
        limiter.check(user);
        assert!(!limiter.check(user));

        sleep(Duration::from_millis(150));

        // Window elapsed, attempts allowed again
        assert!(limiter.check(user));
    }

    #[test]
    fn cleanup_removes_stale_entries() {
        let limiter = limiter(2, Duration::from_millis(50));
        let user = Uuid::new_v4();
        limiter.check(user);

        sleep(Duration::from_millis(100));
        limiter.cleanup();

        let entries = limiter.entries.lock();
        assert!(!entries.contains_key(&user));
    }

    #[test]
    fn default_config_values() {
        let config = RateLimitConfig::default();
        assert_eq!(config.max_attempts, DEFAULT_MAX_ATTEMPTS);
        assert_eq!(config.window, Duration::from_secs(DEFAULT_WINDOW_SECS));
    }
}
