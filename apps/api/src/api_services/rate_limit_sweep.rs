use std::time::Duration;

use confide_application::RateLimitService;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

/// Periodically drops expired rate limit windows. Returns `None` when the
/// interval is zero.
pub fn spawn_rate_limit_sweep(
    rate_limit_service: RateLimitService,
    interval_seconds: u64,
) -> Option<JoinHandle<()>> {
    if interval_seconds == 0 {
        info!("rate limit sweep disabled (RATE_LIMIT_SWEEP_SECONDS=0)");
        return None;
    }

    Some(tokio::spawn(async move {
        info!(interval_seconds, "rate limit sweep started");

        let mut ticker = tokio::time::interval(Duration::from_secs(interval_seconds));
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let removed = rate_limit_service.cleanup();
            debug!(
                removed,
                tracked = rate_limit_service.tracked_windows(),
                "expired rate limit windows removed"
            );
        }
    }))
}
