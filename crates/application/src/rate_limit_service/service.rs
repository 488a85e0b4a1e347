use std::sync::Arc;

use confide_core::{AppError, AppResult};
use confide_domain::RateLimitDecision;

use crate::Clock;

use super::config::RateLimitRule;
use super::ports::RateLimitRepository;

/// Application service for rate limiting.
#[derive(Clone)]
pub struct RateLimitService {
    repository: Arc<dyn RateLimitRepository>,
    clock: Arc<dyn Clock>,
}

impl RateLimitService {
    /// Creates a new rate limit service.
    #[must_use]
    pub fn new(repository: Arc<dyn RateLimitRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Counts one request from `client` against `rule`.
    #[must_use]
    pub fn check_and_consume(&self, rule: &RateLimitRule, client: &str) -> RateLimitDecision {
        self.repository.record_attempt(
            &rule.key_for(client),
            rule.max_attempts,
            rule.window,
            self.clock.now(),
        )
    }

    /// Like [`Self::check_and_consume`], but maps a rejection to
    /// `AppError::RateLimited`.
    pub fn check_rate_limit(&self, rule: &RateLimitRule, client: &str) -> AppResult<()> {
        match self.check_and_consume(rule, client) {
            RateLimitDecision::Allowed => Ok(()),
            RateLimitDecision::Rejected {
                retry_after_seconds,
            } => Err(AppError::RateLimited {
                retry_after_seconds,
            }),
        }
    }

    /// Removes expired windows. Intended for periodic cleanup.
    pub fn cleanup(&self) -> usize {
        self.repository.cleanup_expired(self.clock.now())
    }

    /// Number of windows currently tracked.
    #[must_use]
    pub fn tracked_windows(&self) -> usize {
        self.repository.len()
    }
}
