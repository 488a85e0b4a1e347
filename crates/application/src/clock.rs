use chrono::{DateTime, Utc};

/// Port for reading the current time.
///
/// Services never call `Utc::now()` directly so tests can move time.
pub trait Clock: Send + Sync {
    /// Returns the current instant.
    fn now(&self) -> DateTime<Utc>;
}
