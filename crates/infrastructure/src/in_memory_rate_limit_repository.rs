//! Process-local fixed-window counter store.
//!
//! All windows live in one map behind a single mutex, so the
//! read-modify-write of a key is atomic across worker threads. Budgets are
//! not shared between processes.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Duration, Utc};

use confide_application::RateLimitRepository;
use confide_domain::{RateLimitDecision, RateWindow};

/// In-memory implementation of the rate limit repository port.
///
/// Windows are never evicted on access; an expired window is replaced the
/// next time its key is seen. Call `cleanup_expired` periodically to bound
/// memory.
#[derive(Debug, Default)]
pub struct InMemoryRateLimitRepository {
    windows: Mutex<HashMap<String, RateWindow>>,
}

impl InMemoryRateLimitRepository {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn windows(&self) -> MutexGuard<'_, HashMap<String, RateWindow>> {
        // Every mutation leaves the map consistent, so a poisoned lock is still usable.
        self.windows.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl RateLimitRepository for InMemoryRateLimitRepository {
    fn record_attempt(
        &self,
        key: &str,
        max_attempts: u32,
        window: Duration,
        now: DateTime<Utc>,
    ) -> RateLimitDecision {
        let mut windows = self.windows();

        match windows.entry(key.to_owned()) {
            Entry::Occupied(mut occupied) if !occupied.get().is_expired(now) => {
                occupied.get_mut().try_consume(max_attempts, now)
            }
            Entry::Occupied(mut occupied) => {
                occupied.insert(RateWindow::open(now, window));
                RateLimitDecision::Allowed
            }
            Entry::Vacant(vacant) => {
                vacant.insert(RateWindow::open(now, window));
                RateLimitDecision::Allowed
            }
        }
    }

    fn cleanup_expired(&self, now: DateTime<Utc>) -> usize {
        let mut windows = self.windows();
        let before = windows.len();
        windows.retain(|_, window| !window.is_expired(now));
        before - windows.len()
    }

    fn len(&self) -> usize {
        self.windows().len()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use chrono::{DateTime, Duration, TimeZone, Utc};

    use confide_application::RateLimitRepository;
    use confide_domain::RateLimitDecision;

    use super::InMemoryRateLimitRepository;

    fn at_ms(offset_ms: i64) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(1_735_689_600_000 + offset_ms)
            .single()
            .unwrap_or_default()
    }

    #[test]
    fn follows_fixed_window_scenario() {
        let store = InMemoryRateLimitRepository::new();
        let window = Duration::milliseconds(60_000);

        let decisions: Vec<RateLimitDecision> = [0, 10, 20, 61_000]
            .into_iter()
            .map(|offset| store.record_attempt("logs:1.2.3.4", 2, window, at_ms(offset)))
            .collect();

        assert_eq!(
            decisions,
            vec![
                RateLimitDecision::Allowed,
                RateLimitDecision::Allowed,
                RateLimitDecision::Rejected {
                    retry_after_seconds: 60
                },
                RateLimitDecision::Allowed,
            ]
        );
    }

    #[test]
    fn window_is_still_live_exactly_at_reset() {
        let store = InMemoryRateLimitRepository::new();
        let window = Duration::seconds(1);

        assert!(store.record_attempt("k", 1, window, at_ms(0)).is_allowed());
        assert_eq!(
            store.record_attempt("k", 1, window, at_ms(1_000)),
            RateLimitDecision::Rejected {
                retry_after_seconds: 1
            }
        );
        assert!(store.record_attempt("k", 1, window, at_ms(1_001)).is_allowed());
    }

    #[test]
    fn keeps_expired_windows_until_cleanup() {
        let store = InMemoryRateLimitRepository::new();
        let window = Duration::seconds(60);

        for client in 0..100 {
            let _ = store.record_attempt(&format!("logs:{client}"), 120, window, at_ms(0));
        }
        assert_eq!(store.len(), 100);

        let _ = store.record_attempt("logs:late", 120, window, at_ms(120_000));
        assert_eq!(store.len(), 101);

        assert_eq!(store.cleanup_expired(at_ms(120_000)), 100);
        assert_eq!(store.len(), 1);
        assert!(!store.is_empty());
    }

    #[test]
    fn concurrent_callers_never_exceed_the_budget() {
        let store = Arc::new(InMemoryRateLimitRepository::new());
        let now = at_ms(0);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    (0..50)
                        .filter(|_| {
                            store
                                .record_attempt("homework:shared", 100, Duration::seconds(60), now)
                                .is_allowed()
                        })
                        .count()
                })
            })
            .collect();

        let allowed: usize = handles
            .into_iter()
            .map(|handle| handle.join().unwrap_or_default())
            .sum();

        assert_eq!(allowed, 100);
    }
}
