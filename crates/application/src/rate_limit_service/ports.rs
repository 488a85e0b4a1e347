use chrono::{DateTime, Duration, Utc};

use confide_domain::RateLimitDecision;

/// Store port for fixed-window counters.
///
/// Implementations must make the read-modify-write of a single key atomic
/// with respect to concurrent callers. Recording an attempt cannot fail.
pub trait RateLimitRepository: Send + Sync {
    /// Records one request for `key` and reports whether it fits the budget.
    ///
    /// A missing or expired window is replaced by a fresh one counting this
    /// request. Rejected requests do not increment the counter.
    fn record_attempt(
        &self,
        key: &str,
        max_attempts: u32,
        window: Duration,
        now: DateTime<Utc>,
    ) -> RateLimitDecision;

    /// Removes windows that expired before `now`. Returns how many were removed.
    fn cleanup_expired(&self, now: DateTime<Utc>) -> usize;

    /// Number of windows currently held.
    fn len(&self) -> usize;

    /// Whether the store holds no windows.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
