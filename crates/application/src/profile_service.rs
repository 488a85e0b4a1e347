//! Profile ports and application service.
//!
//! A profile is created with defaults the first time it is read or updated.

use std::sync::Arc;

use async_trait::async_trait;

use confide_core::{AppResult, parse_timestamp};
use confide_domain::{ProfilePatch, UserId, UserProfile};

use crate::Clock;


/// Repository port for user profiles, one per user.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Finds the profile of a user.
    async fn find(&self, user_id: UserId) -> AppResult<Option<UserProfile>>;

    /// Inserts `profile` unless the user already has one, and returns the
    /// stored profile either way.
    async fn insert_if_absent(&self, profile: &UserProfile) -> AppResult<UserProfile>;

    /// Persists every field of an existing profile.
    async fn save(&self, profile: &UserProfile) -> AppResult<()>;
}

/// Raw settings update. Absent fields are left unchanged.
#[derive(Debug, Clone, Default)]
#[allow(missing_docs)]
pub struct UpdateProfileInput {
    pub display_name: Option<String>,
    pub therapist_name: Option<String>,
    pub session_frequency: Option<String>,
    pub session_day: Option<String>,
    pub session_time: Option<String>,
    /// `Some(None)` clears the date; unparseable dates also clear it.
    pub next_session_date: Option<Option<String>>,
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

impl From<UpdateProfileInput> for ProfilePatch {
    fn from(input: UpdateProfileInput) -> Self {
        Self {
            display_name: input.display_name,
            therapist_name: input.therapist_name,
            session_frequency: input.session_frequency,
            session_day: input.session_day,
            session_time: input.session_time,
            next_session_date: input.next_session_date.map(|value| {
                value.and_then(|value| parse_timestamp(&value, "Invalid next session date").ok())
            }),
            pre_session_reminder: input.pre_session_reminder,
            post_session_reminder: input.post_session_reminder,
            enable_pre_reminder: input.enable_pre_reminder,
            enable_post_reminder: input.enable_post_reminder,
            enable_homework_reminder: input.enable_homework_reminder,
            enable_weekly_nudge: input.enable_weekly_nudge,
            theme: input.theme,
            font_size: input.font_size,
            ai_suggestions: input.ai_suggestions,
            onboarded: input.onboarded,
        }
    }
}

/// Application service for user profiles.
#[derive(Clone)]
pub struct ProfileService {
    repository: Arc<dyn ProfileRepository>,
    clock: Arc<dyn Clock>,
}

impl ProfileService {
    /// Creates a new profile service.
    #[must_use]
    pub fn new(repository: Arc<dyn ProfileRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Returns the user's profile, creating a default one on first access.
    pub async fn get_or_create(
        &self,
        user_id: UserId,
        user_name: Option<&str>,
    ) -> AppResult<UserProfile> {
        if let Some(profile) = self.repository.find(user_id).await? {
            return Ok(profile);
        }

        let profile = UserProfile::with_defaults(user_id, user_name, self.clock.now());
        let stored = self.repository.insert_if_absent(&profile).await?;
        tracing::debug!(%user_id, "created default profile");
        Ok(stored)
    }

    /// Applies a settings update, creating the profile first when needed.
    pub async fn update_profile(
        &self,
        user_id: UserId,
        user_name: Option<&str>,
        input: UpdateProfileInput,
    ) -> AppResult<UserProfile> {
        let mut profile = self.get_or_create(user_id, user_name).await?;
        profile.apply(input.into(), self.clock.now());
        self.repository.save(&profile).await?;
        Ok(profile)
    }
}
