//! PostgreSQL-backed profile repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use confide_application::ProfileRepository;
use confide_core::{AppError, AppResult};
use confide_domain::{ProfileId, UserId, UserProfile};

/// PostgreSQL implementation of the profile repository port.
#[derive(Clone)]
pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    id: uuid::Uuid,
    user_id: uuid::Uuid,
    display_name: String,
    therapist_name: Option<String>,
    session_frequency: String,
    session_day: String,
    session_time: String,
    next_session_date: Option<DateTime<Utc>>,
    pre_session_reminder: i32,
    post_session_reminder: i32,
    enable_pre_reminder: bool,
    enable_post_reminder: bool,
    enable_homework_reminder: bool,
    enable_weekly_nudge: bool,
    theme: String,
    font_size: String,
    ai_suggestions: bool,
    onboarded: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ProfileRow> for UserProfile {
    fn from(row: ProfileRow) -> Self {
        Self {
            id: ProfileId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            display_name: row.display_name,
            therapist_name: row.therapist_name,
            session_frequency: row.session_frequency,
            session_day: row.session_day,
            session_time: row.session_time,
            next_session_date: row.next_session_date,
            pre_session_reminder: row.pre_session_reminder,
            post_session_reminder: row.post_session_reminder,
            enable_pre_reminder: row.enable_pre_reminder,
            enable_post_reminder: row.enable_post_reminder,
            enable_homework_reminder: row.enable_homework_reminder,
            enable_weekly_nudge: row.enable_weekly_nudge,
            theme: row.theme,
            font_size: row.font_size,
            ai_suggestions: row.ai_suggestions,
            onboarded: row.onboarded,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const PROFILE_COLUMNS: &str = "id, user_id, display_name, therapist_name, session_frequency, \
                               session_day, session_time, next_session_date, \
                               pre_session_reminder, post_session_reminder, \
                               enable_pre_reminder, enable_post_reminder, \
                               enable_homework_reminder, enable_weekly_nudge, theme, font_size, \
                               ai_suggestions, onboarded, created_at, updated_at";

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find(&self, user_id: UserId) -> AppResult<Option<UserProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(&format!(
            "SELECT {PROFILE_COLUMNS} FROM user_profiles WHERE user_id = $1"
        ))
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to find profile for user '{user_id}': {error}"))
        })?;

        Ok(row.map(UserProfile::from))
    }

    async fn insert_if_absent(&self, profile: &UserProfile) -> AppResult<UserProfile> {
        let user_id = profile.user_id;
        sqlx::query(
            r#"
            INSERT INTO user_profiles (
                id, user_id, display_name, therapist_name, session_frequency,
                session_day, session_time, next_session_date,
                pre_session_reminder, post_session_reminder,
                enable_pre_reminder, enable_post_reminder,
                enable_homework_reminder, enable_weekly_nudge, theme, font_size,
                ai_suggestions, onboarded, created_at, updated_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20
            )
            ON CONFLICT (user_id) DO NOTHING
            "#,
        )
        .bind(profile.id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(&profile.display_name)
        .bind(&profile.therapist_name)
        .bind(&profile.session_frequency)
        .bind(&profile.session_day)
        .bind(&profile.session_time)
        .bind(profile.next_session_date)
        .bind(profile.pre_session_reminder)
        .bind(profile.post_session_reminder)
        .bind(profile.enable_pre_reminder)
        .bind(profile.enable_post_reminder)
        .bind(profile.enable_homework_reminder)
        .bind(profile.enable_weekly_nudge)
        .bind(&profile.theme)
        .bind(&profile.font_size)
        .bind(profile.ai_suggestions)
        .bind(profile.onboarded)
        .bind(profile.created_at)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to create profile for user '{user_id}': {error}"
            ))
        })?;

        self.find(user_id).await?.ok_or_else(|| {
            AppError::Internal(format!("profile for user '{user_id}' missing after insert"))
        })
    }

    async fn save(&self, profile: &UserProfile) -> AppResult<()> {
        let user_id = profile.user_id;
        sqlx::query(
            r#"
            UPDATE user_profiles
            SET display_name = $2,
                therapist_name = $3,
                session_frequency = $4,
                session_day = $5,
                session_time = $6,
                next_session_date = $7,
                pre_session_reminder = $8,
                post_session_reminder = $9,
                enable_pre_reminder = $10,
                enable_post_reminder = $11,
                enable_homework_reminder = $12,
                enable_weekly_nudge = $13,
                theme = $14,
                font_size = $15,
                ai_suggestions = $16,
                onboarded = $17,
                updated_at = $18
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(&profile.display_name)
        .bind(&profile.therapist_name)
        .bind(&profile.session_frequency)
        .bind(&profile.session_day)
        .bind(&profile.session_time)
        .bind(profile.next_session_date)
        .bind(profile.pre_session_reminder)
        .bind(profile.post_session_reminder)
        .bind(profile.enable_pre_reminder)
        .bind(profile.enable_post_reminder)
        .bind(profile.enable_homework_reminder)
        .bind(profile.enable_weekly_nudge)
        .bind(&profile.theme)
        .bind(&profile.font_size)
        .bind(profile.ai_suggestions)
        .bind(profile.onboarded)
        .bind(profile.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to update profile for user '{user_id}': {error}"))
        })?;

        Ok(())
    }
}
