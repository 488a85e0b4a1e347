//! Fixed-window request accounting.
//!
//! A window opens on the first request for a key and lasts for the configured
//! duration. Requests are admitted until the window's budget is spent; after
//! that they are rejected until the window expires and a fresh one opens. A
//! client may therefore send up to twice the limit across a window boundary.

use chrono::{DateTime, Duration, Utc};

/// Outcome of presenting one request to a rate limit window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimitDecision {
    /// The request fits within the current window's budget.
    Allowed,
    /// The budget is spent; the client should wait before retrying.
    Rejected {
        /// Whole seconds until the window resets, never less than one.
        retry_after_seconds: u64,
    },
}

impl RateLimitDecision {
    /// Returns whether the request was admitted.
    #[must_use]
    pub fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// Live request counter for a single composite key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateWindow {
    count: u32,
    reset_at: DateTime<Utc>,
}

impl RateWindow {
    /// Opens a window that already counts the request that created it.
    #[must_use]
    pub fn open(now: DateTime<Utc>, duration: Duration) -> Self {
        Self {
            count: 1,
            reset_at: now + duration,
        }
    }

    /// Requests observed in this window.
    #[must_use]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Instant at which this window stops applying.
    #[must_use]
    pub fn reset_at(&self) -> DateTime<Utc> {
        self.reset_at
    }

    /// A window is expired strictly after its reset instant.
    #[must_use]
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now > self.reset_at
    }

    /// Counts one more request against a live window.
    ///
    /// Rejected requests leave the counter untouched. Callers replace expired
    /// windows with [`RateWindow::open`] instead of calling this.
    pub fn try_consume(&mut self, limit: u32, now: DateTime<Utc>) -> RateLimitDecision {
        if self.count < limit {
            self.count += 1;
            return RateLimitDecision::Allowed;
        }

        RateLimitDecision::Rejected {
            retry_after_seconds: self.retry_after_seconds(now),
        }
    }

    fn retry_after_seconds(&self, now: DateTime<Utc>) -> u64 {
        let remaining_ms = (self.reset_at - now).num_milliseconds();
        u64::try_from(remaining_ms)
            .unwrap_or(0)
            .div_ceil(1000)
            .max(1)
    }
}
