use chrono::Duration;

/// Configuration for a rate limit rule.
#[derive(Debug, Clone)]
pub struct RateLimitRule {
    /// The route category name (e.g., "auth-login", "logs-item").
    pub category: String,
    /// Maximum number of requests allowed in one window.
    pub max_attempts: u32,
    /// Window length.
    pub window: Duration,
}

impl RateLimitRule {
    /// Creates a new rate limit rule with a window in seconds.
    #[must_use]
    pub fn new(category: impl Into<String>, max_attempts: u32, window_seconds: i64) -> Self {
        Self::with_window(category, max_attempts, Duration::seconds(window_seconds))
    }

    /// Creates a new rate limit rule with an arbitrary window.
    #[must_use]
    pub fn with_window(category: impl Into<String>, max_attempts: u32, window: Duration) -> Self {
        Self {
            category: category.into(),
            max_attempts,
            window,
        }
    }

    /// Builds the store key for one client under this rule.
    #[must_use]
    pub fn key_for(&self, client: &str) -> String {
        format!("{}:{client}", self.category)
    }
}
