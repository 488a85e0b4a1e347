use chrono::{DateTime, Utc};
use confide_application::UpdateProfileInput;
use confide_domain::{ProfileId, UserProfile};
use serde::{Deserialize, Serialize};

use super::common::double_option;

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub therapist_name: Option<String>,
    #[serde(default)]
    pub session_frequency: Option<String>,
    #[serde(default)]
    pub session_day: Option<String>,
    #[serde(default)]
    pub session_time: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub next_session_date: Option<Option<String>>,
    #[serde(default)]
    pub pre_session_reminder: Option<i32>,
    #[serde(default)]
    pub post_session_reminder: Option<i32>,
    #[serde(default)]
    pub enable_pre_reminder: Option<bool>,
    #[serde(default)]
    pub enable_post_reminder: Option<bool>,
    #[serde(default)]
    pub enable_homework_reminder: Option<bool>,
    #[serde(default)]
    pub enable_weekly_nudge: Option<bool>,
    #[serde(default)]
    pub theme: Option<String>,
    #[serde(default)]
    pub font_size: Option<String>,
    #[serde(default)]
    pub ai_suggestions: Option<bool>,
    #[serde(default)]
    pub onboarded: Option<bool>,
}

impl From<UpdateProfileRequest> for UpdateProfileInput {
    fn from(request: UpdateProfileRequest) -> Self {
        Self {
            display_name: request.display_name,
            therapist_name: request.therapist_name,
            session_frequency: request.session_frequency,
            session_day: request.session_day,
            session_time: request.session_time,
            next_session_date: request.next_session_date,
            pre_session_reminder: request.pre_session_reminder,
            post_session_reminder: request.post_session_reminder,
            enable_pre_reminder: request.enable_pre_reminder,
            enable_post_reminder: request.enable_post_reminder,
            enable_homework_reminder: request.enable_homework_reminder,
            enable_weekly_nudge: request.enable_weekly_nudge,
            theme: request.theme,
            font_size: request.font_size,
            ai_suggestions: request.ai_suggestions,
            onboarded: request.onboarded,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    pub id: ProfileId,
    pub display_name: String,
    pub therapist_name: Option<String>,
    pub session_frequency: String,
    pub session_day: String,
    pub session_time: String,
    pub next_session_date: Option<DateTime<Utc>>,
    pub pre_session_reminder: i32,
    pub post_session_reminder: i32,
    pub enable_pre_reminder: bool,
    pub enable_post_reminder: bool,
    pub enable_homework_reminder: bool,
    pub enable_weekly_nudge: bool,
    pub theme: String,
    pub font_size: String,
    pub ai_suggestions: bool,
    pub onboarded: bool,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id,
            display_name: profile.display_name,
            therapist_name: profile.therapist_name,
            session_frequency: profile.session_frequency,
            session_day: profile.session_day,
            session_time: profile.session_time,
            next_session_date: profile.next_session_date,
            pre_session_reminder: profile.pre_session_reminder,
            post_session_reminder: profile.post_session_reminder,
            enable_pre_reminder: profile.enable_pre_reminder,
            enable_post_reminder: profile.enable_post_reminder,
            enable_homework_reminder: profile.enable_homework_reminder,
            enable_weekly_nudge: profile.enable_weekly_nudge,
            theme: profile.theme,
            font_size: profile.font_size,
            ai_suggestions: profile.ai_suggestions,
            onboarded: profile.onboarded,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ProfileEnvelope {
    pub profile: ProfileResponse,
}
