//! PostgreSQL-backed homework repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgExecutor, PgPool};

use confide_application::HomeworkRepository;
use confide_core::{AppError, AppResult};
use confide_domain::{HomeworkId, HomeworkItem, SessionId, UserId};

/// PostgreSQL implementation of the homework repository port.
#[derive(Clone)]
pub struct PostgresHomeworkRepository {
    pool: PgPool,
}

impl PostgresHomeworkRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct HomeworkRow {
    id: uuid::Uuid,
    user_id: uuid::Uuid,
    session_id: Option<uuid::Uuid>,
    text: String,
    session_date: DateTime<Utc>,
    due_date: Option<DateTime<Utc>>,
    completed: bool,
    completed_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<HomeworkRow> for HomeworkItem {
    fn from(row: HomeworkRow) -> Self {
        Self {
            id: HomeworkId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            session_id: row.session_id.map(SessionId::from_uuid),
            text: row.text,
            session_date: row.session_date,
            due_date: row.due_date,
            completed: row.completed,
            completed_date: row.completed_date,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

const HOMEWORK_COLUMNS: &str = "id, user_id, session_id, text, session_date, due_date, \
                                completed, completed_date, created_at, updated_at";

/// Inserts one homework row using any executor, so session creation can
/// reuse it inside its transaction.
pub(crate) async fn insert_homework<'e>(
    executor: impl PgExecutor<'e>,
    item: &HomeworkItem,
) -> AppResult<()> {
    sqlx::query(
        r#"
        INSERT INTO homework_items (
            id, user_id, session_id, text, session_date, due_date,
            completed, completed_date, created_at, updated_at
        )
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        "#,
    )
    .bind(item.id.as_uuid())
    .bind(item.user_id.as_uuid())
    .bind(item.session_id.map(|session_id| session_id.as_uuid()))
    .bind(&item.text)
    .bind(item.session_date)
    .bind(item.due_date)
    .bind(item.completed)
    .bind(item.completed_date)
    .bind(item.created_at)
    .bind(item.updated_at)
    .execute(executor)
    .await
    .map_err(|error| AppError::Internal(format!("failed to create homework item: {error}")))?;

    Ok(())
}

#[async_trait]
impl HomeworkRepository for PostgresHomeworkRepository {
    async fn list(
        &self,
        user_id: UserId,
        completed: Option<bool>,
    ) -> AppResult<Vec<HomeworkItem>> {
        let rows = sqlx::query_as::<_, HomeworkRow>(&format!(
            r#"
            SELECT {HOMEWORK_COLUMNS}
            FROM homework_items
            WHERE user_id = $1
              AND ($2::BOOLEAN IS NULL OR completed = $2)
            ORDER BY completed ASC, session_date DESC, created_at DESC
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(completed)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list homework: {error}")))?;

        Ok(rows.into_iter().map(HomeworkItem::from).collect())
    }

    async fn find(
        &self,
        user_id: UserId,
        homework_id: HomeworkId,
    ) -> AppResult<Option<HomeworkItem>> {
        let row = sqlx::query_as::<_, HomeworkRow>(&format!(
            "SELECT {HOMEWORK_COLUMNS} FROM homework_items WHERE id = $1 AND user_id = $2"
        ))
        .bind(homework_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find homework item: {error}")))?;

        Ok(row.map(HomeworkItem::from))
    }

    async fn create(&self, item: &HomeworkItem) -> AppResult<()> {
        insert_homework(&self.pool, item).await
    }

    async fn update(&self, item: &HomeworkItem) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE homework_items
            SET text = $3, due_date = $4, completed = $5, completed_date = $6, updated_at = $7
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(item.id.as_uuid())
        .bind(item.user_id.as_uuid())
        .bind(&item.text)
        .bind(item.due_date)
        .bind(item.completed)
        .bind(item.completed_date)
        .bind(item.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update homework item: {error}")))?;

        Ok(())
    }

    async fn delete(&self, user_id: UserId, homework_id: HomeworkId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM homework_items WHERE id = $1 AND user_id = $2")
            .bind(homework_id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| {
                AppError::Internal(format!("failed to delete homework item: {error}"))
            })?;

        Ok(result.rows_affected() > 0)
    }
}
