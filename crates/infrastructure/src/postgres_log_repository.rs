//! PostgreSQL-backed log entry repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use confide_application::LogRepository;
use confide_core::{AppError, AppResult};
use confide_domain::{ArchiveState, Intensity, LogEntry, LogEntryId, LogEntryType, LogView, UserId};

/// PostgreSQL implementation of the log repository port.
#[derive(Clone)]
pub struct PostgresLogRepository {
    pool: PgPool,
}

impl PostgresLogRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct LogEntryRow {
    id: uuid::Uuid,
    user_id: uuid::Uuid,
    text: String,
    entry_type: String,
    intensity: i16,
    added_to_prep: bool,
    prep_note: Option<String>,
    checked_off: bool,
    archived_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<LogEntryRow> for LogEntry {
    type Error = AppError;

    fn try_from(row: LogEntryRow) -> Result<Self, Self::Error> {
        let corrupt =
            |what: &str| AppError::Internal(format!("log entry '{}' has invalid {what}", row.id));

        Ok(Self {
            id: LogEntryId::from_uuid(row.id),
            user_id: UserId::from_uuid(row.user_id),
            entry_type: LogEntryType::parse(&row.entry_type).map_err(|_| corrupt("type"))?,
            intensity: Intensity::new(i64::from(row.intensity))
                .map_err(|_| corrupt("intensity"))?,
            text: row.text,
            added_to_prep: row.added_to_prep,
            prep_note: row.prep_note,
            checked_off: row.checked_off,
            archive_state: ArchiveState::from_columns(row.archived_at),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const LOG_COLUMNS: &str = "id, user_id, text, entry_type, intensity, added_to_prep, prep_note, \
                           checked_off, archived_at, created_at, updated_at";

#[async_trait]
impl LogRepository for PostgresLogRepository {
    async fn list(&self, user_id: UserId, view: LogView) -> AppResult<Vec<LogEntry>> {
        let archived_filter = match view {
            LogView::Active => Some(false),
            LogView::Archive => Some(true),
            LogView::All => None,
        };

        let rows = sqlx::query_as::<_, LogEntryRow>(&format!(
            r#"
            SELECT {LOG_COLUMNS}
            FROM log_entries
            WHERE user_id = $1
              AND ($2::BOOLEAN IS NULL OR is_archived = $2)
            ORDER BY created_at DESC
            "#
        ))
        .bind(user_id.as_uuid())
        .bind(archived_filter)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to list log entries: {error}")))?;

        rows.into_iter().map(LogEntry::try_from).collect()
    }

    async fn find(&self, user_id: UserId, log_id: LogEntryId) -> AppResult<Option<LogEntry>> {
        let row = sqlx::query_as::<_, LogEntryRow>(&format!(
            "SELECT {LOG_COLUMNS} FROM log_entries WHERE id = $1 AND user_id = $2"
        ))
        .bind(log_id.as_uuid())
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to find log entry: {error}")))?;

        row.map(LogEntry::try_from).transpose()
    }

    async fn create(&self, entry: &LogEntry) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO log_entries (
                id, user_id, text, entry_type, intensity, added_to_prep, prep_note,
                checked_off, is_archived, archived_at, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.user_id.as_uuid())
        .bind(&entry.text)
        .bind(entry.entry_type.as_str())
        .bind(entry.intensity.value())
        .bind(entry.added_to_prep)
        .bind(&entry.prep_note)
        .bind(entry.checked_off)
        .bind(entry.archive_state.is_archived())
        .bind(entry.archive_state.archived_at())
        .bind(entry.created_at)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to create log entry: {error}")))?;

        Ok(())
    }

    async fn update(&self, entry: &LogEntry) -> AppResult<()> {
        sqlx::query(
            r#"
            UPDATE log_entries
            SET text = $3, entry_type = $4, intensity = $5, added_to_prep = $6,
                prep_note = $7, checked_off = $8, updated_at = $9
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(entry.id.as_uuid())
        .bind(entry.user_id.as_uuid())
        .bind(&entry.text)
        .bind(entry.entry_type.as_str())
        .bind(entry.intensity.value())
        .bind(entry.added_to_prep)
        .bind(&entry.prep_note)
        .bind(entry.checked_off)
        .bind(entry.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to update log entry: {error}")))?;

        Ok(())
    }

    async fn delete(&self, user_id: UserId, log_id: LogEntryId) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM log_entries WHERE id = $1 AND user_id = $2")
            .bind(log_id.as_uuid())
            .bind(user_id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to delete log entry: {error}")))?;

        Ok(result.rows_affected() > 0)
    }

    async fn archive_stale(
        &self,
        user_id: UserId,
        cutoff: DateTime<Utc>,
        archived_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            r#"
            UPDATE log_entries
            SET is_archived = TRUE, archived_at = $3
            WHERE user_id = $1
              AND is_archived = FALSE
              AND created_at < $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(cutoff)
        .bind(archived_at)
        .execute(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to archive stale log entries: {error}"))
        })?;

        Ok(result.rows_affected())
    }
}
