//! Per-user preferences shown on the settings screen.

use chrono::{DateTime, Utc};

use crate::{ProfileId, UserId};

/// Display name used when neither the user nor the client provides one.
pub const DEFAULT_DISPLAY_NAME: &str = "Alex";

/// Preferences and session schedule for one user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    /// Profile identifier.
    pub id: ProfileId,
    /// Owning user, unique per profile.
    pub user_id: UserId,
    /// Name shown in greetings.
    pub display_name: String,
    /// Therapist name, if shared.
    pub therapist_name: Option<String>,
    /// How often sessions happen, e.g. `weekly`.
    pub session_frequency: String,
    /// Usual weekday.
    pub session_day: String,
    /// Usual time of day, `HH:MM`.
    pub session_time: String,
    /// Next scheduled session.
    pub next_session_date: Option<DateTime<Utc>>,
    /// Minutes before a session to send the prep reminder.
    pub pre_session_reminder: i32,
    /// Minutes after a session to send the reflection reminder.
    pub post_session_reminder: i32,
    /// Prep reminder toggle.
    pub enable_pre_reminder: bool,
    /// Reflection reminder toggle.
    pub enable_post_reminder: bool,
    /// Homework reminder toggle.
    pub enable_homework_reminder: bool,
    /// Weekly nudge toggle.
    pub enable_weekly_nudge: bool,
    /// UI theme.
    pub theme: String,
    /// UI font size.
    pub font_size: String,
    /// Whether AI suggestions are shown.
    pub ai_suggestions: bool,
    /// Whether onboarding finished.
    pub onboarded: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl UserProfile {
    /// Creates a profile with default preferences.
    #[must_use]
    pub fn with_defaults(user_id: UserId, user_name: Option<&str>, now: DateTime<Utc>) -> Self {
        Self {
            id: ProfileId::new(),
            user_id,
            display_name: display_name_or_default(user_name.unwrap_or_default()),
            therapist_name: None,
            session_frequency: "weekly".to_owned(),
            session_day: "Monday".to_owned(),
            session_time: "10:00".to_owned(),
            next_session_date: None,
            pre_session_reminder: 60,
            post_session_reminder: 30,
            enable_pre_reminder: true,
            enable_post_reminder: true,
            enable_homework_reminder: true,
            enable_weekly_nudge: false,
            theme: "system".to_owned(),
            font_size: "medium".to_owned(),
            ai_suggestions: true,
            onboarded: false,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a settings update.
    pub fn apply(&mut self, patch: ProfilePatch, now: DateTime<Utc>) {
        if let Some(display_name) = patch.display_name {
            self.display_name = display_name_or_default(&display_name);
        }
        if let Some(therapist_name) = patch.therapist_name {
            let trimmed = therapist_name.trim();
            self.therapist_name = (!trimmed.is_empty()).then(|| trimmed.to_owned());
        }
        if let Some(value) = patch.session_frequency {
            self.session_frequency = value;
        }
        if let Some(value) = patch.session_day {
            self.session_day = value;
        }
        if let Some(value) = patch.session_time {
            self.session_time = value;
        }
        if let Some(value) = patch.next_session_date {
            self.next_session_date = value;
        }
        if let Some(value) = patch.pre_session_reminder {
            self.pre_session_reminder = value;
        }
        if let Some(value) = patch.post_session_reminder {
            self.post_session_reminder = value;
        }
        if let Some(value) = patch.enable_pre_reminder {
            self.enable_pre_reminder = value;
        }
        if let Some(value) = patch.enable_post_reminder {
            self.enable_post_reminder = value;
        }
        if let Some(value) = patch.enable_homework_reminder {
            self.enable_homework_reminder = value;
        }
        if let Some(value) = patch.enable_weekly_nudge {
            self.enable_weekly_nudge = value;
        }
        if let Some(value) = patch.theme {
            self.theme = value;
        }
        if let Some(value) = patch.font_size {
            self.font_size = value;
        }
        if let Some(value) = patch.ai_suggestions {
            self.ai_suggestions = value;
        }
        if let Some(value) = patch.onboarded {
            self.onboarded = value;
        }
        self.updated_at = now;
    }
}

/// Partial settings update. Nullable fields use `Some(None)` to clear.
#[derive(Debug, Clone, Default)]
#[allow(missing_docs)]
pub struct ProfilePatch {
    pub display_name: Option<String>,
    pub therapist_name: Option<String>,
    pub session_frequency: Option<String>,
    pub session_day: Option<String>,
    pub session_time: Option<String>,
    pub next_session_date: Option<Option<DateTime<Utc>>>,
    pub pre_session_reminder: Option<i32>,
    pub post_session_reminder: Option<i32>,
    pub enable_pre_reminder: Option<bool>,
    pub enable_post_reminder: Option<bool>,
    pub enable_homework_reminder: Option<bool>,
    pub enable_weekly_nudge: Option<bool>,
    pub theme: Option<String>,
    pub font_size: Option<String>,
    pub ai_suggestions: Option<bool>,
    pub onboarded: Option<bool>,
}

fn display_name_or_default(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        DEFAULT_DISPLAY_NAME.to_owned()
    } else {
        trimmed.to_owned()
    }
}
