use std::sync::Mutex;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::Clock;

/// Clock whose time only moves when a test says so.
pub(crate) struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub(crate) fn starting_at(now: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(now),
        }
    }

    pub(crate) fn epoch() -> Self {
        Self::starting_at(
            Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
                .single()
                .unwrap_or_default(),
        )
    }

    pub(crate) fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap_or_else(|_| unreachable!());
        *now += by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap_or_else(|_| unreachable!())
    }
}
