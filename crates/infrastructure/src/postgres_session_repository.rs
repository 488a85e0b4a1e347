//! PostgreSQL-backed therapy session repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use confide_application::{SessionDraft, SessionRepository};
use confide_core::{AppError, AppResult};
use confide_domain::{HomeworkItem, SessionId, TherapySession, UserId};

use crate::postgres_homework_repository::insert_homework;

/// PostgreSQL implementation of the session repository port.
#[derive(Clone)]
pub struct PostgresSessionRepository {
    pool: PgPool,
}

impl PostgresSessionRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct SessionRow {
    id: uuid::Uuid,
    user_id: uuid::Uuid,
    number: i32,
    date: DateTime<Utc>,
    topics: Vec<String>,
    what_stood_out: String,
    prep_items: Vec<String>,
    post_mood: i32,
    mood_word: Option<String>,
    completed: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<SessionRow> for TherapySession {
    fn from(row: SessionRow) -> Self {
        Self {
            id: SessionId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            number: row.number,
            date: row.date,
            topics: row.topics,
            what_stood_out: row.what_stood_out,
            prep_items: row.prep_items,
            post_mood: row.post_mood,
            mood_word: row.mood_word,
            completed: row.completed,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const SESSION_COLUMNS: &str = "id, user_id, number, date, topics, what_stood_out, prep_items, \
                               post_mood, mood_word, completed, created_at, updated_at";

#[async_trait]
impl SessionRepository for PostgresSessionRepository {
    async fn list(
        &self,
        user_id: UserId,
        completed: Option<bool>,
    ) -> AppResult<Vec<TherapySession>> {
        let rows = sqlx::query_as::<_, SessionRow>(&format!(
            r#"
            SELECT {SESSION_COLUMNS}
            FROM therapy_sessions
            WHERE user_id = $1
              AND ($2::BOOLEAN IS NULL OR completed = $2)
            ORDER BY date DESC
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(completed)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list sessions: {error}")))?;

        Ok(rows.into_iter().map(TherapySession::from).collect())
    }

    async fn find(
        &self,
        user_id: UserId,
        session_id: SessionId,
    ) -> AppResult<Option<TherapySession>> {
        let row = sqlx::query_as::<_, SessionRow>(&format!(
            "SELECT {SESSION_COLUMNS} FROM therapy_sessions WHERE id = $1 AND user_id = $2"
        ))
        .bind(session_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find session: {error}")))?;

        Ok(row.map(TherapySession::from))
    }

    async fn create_with_homework(
        &self,
        draft: SessionDraft,
    ) -> AppResult<(TherapySession, Vec<HomeworkItem>)> {
        let user_id = draft.user_id;
        let mut transaction = self.pool.begin().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to start session create transaction for user '{user_id}': {error}"
            ))
        })?;

        // Serialises concurrent creates for one user so numbers stay unique.
        sqlx::query("SELECT id FROM users WHERE id = $1 FOR UPDATE")
            .bind(user_id.as_uuid())
            .execute(&mut *transaction)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to lock user '{user_id}': {error}"))
            })?;

        let next_number: i32 = sqlx::query_scalar(
            "SELECT COALESCE(MAX(number), 0) + 1 FROM therapy_sessions WHERE user_id = $1",
        )
        .bind(user_id.as_uuid())
        .fetch_one(&mut *transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to compute next session number for user '{user_id}': {error}"
            ))
        })?;

        let session = TherapySession::new(user_id, next_number, draft.session, draft.created_at);

        sqlx::query(
            r#"
            INSERT INTO therapy_sessions (
                id, user_id, number, date, topics, what_stood_out, prep_items,
                post_mood, mood_word, completed, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(user_id.as_uuid())
        .bind(session.number)
        .bind(session.date)
        .bind(&session.topics)
        .bind(&session.what_stood_out)
        .bind(&session.prep_items)
        .bind(session.post_mood)
        .bind(&session.mood_word)
        .bind(session.completed)
        .bind(session.created_at)
        .bind(session.updated_at)
        .execute(&mut *transaction)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create session: {error}")))?;

        let mut homework = Vec::with_capacity(draft.homework.len());
        for mut item in draft.homework {
            item.session_id = Some(session.id);
            let item = HomeworkItem::new(user_id, item, draft.created_at);
            insert_homework(&mut *transaction, &item).await?;
            homework.push(item);
        }

        transaction.commit().await.map_err(|error| {
            AppError::Internal(format!(
                "failed to commit session create transaction for user '{user_id}': {error}"
            ))
        })?;

        Ok((session, homework))
    }

    async fn update(&self, session: &TherapySession) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE therapy_sessions
            SET date = $3, topics = $4, what_stood_out = $5, prep_items = $6,
                post_mood = $7, mood_word = $8, completed = $9, updated_at = $10
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(session.id.as_uuid())
        .bind(session.user_id.as_uuid())
        .bind(session.date)
        .bind(&session.topics)
        .bind(&session.what_stood_out)
        .bind(&session.prep_items)
        .bind(session.post_mood)
        .bind(&session.mood_word)
        .bind(session.completed)
        .bind(session.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update session: {error}")))?;

        Ok(())
    }

    async fn delete(&self, user_id: UserId, session_id: SessionId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM therapy_sessions WHERE id = $1 AND user_id = $2")
            .bind(session_id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete session: {error}")))?;

        Ok(result.rows_affected() > 0)
    }
}
