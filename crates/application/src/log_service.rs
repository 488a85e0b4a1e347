//! Journal log ports and application service.
//!
//! Every list request first runs the archival sweep for the requesting user:
//! active entries older than [`ARCHIVE_AFTER_DAYS`] days are archived in one
//! bulk update before the view is read. There is no background job.
//!
//! [`ARCHIVE_AFTER_DAYS`]: confide_domain::ARCHIVE_AFTER_DAYS

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use confide_core::{AppError, AppResult, NonEmptyString};
use confide_domain::{
    Intensity, LogEntry, LogEntryId, LogEntryPatch, LogEntryType, LogView, NewLogEntry, UserId,
    archive_cutoff,
};

use crate::Clock;

#[cfg(test)]
mod tests;

/// Repository port for log entries. Every query is scoped to one owner.
#[async_trait]
pub trait LogRepository: Send + Sync {
    /// Lists the owner's entries in `view`, newest first.
    async fn list(&self, user_id: UserId, view: LogView) -> AppResult<Vec<LogEntry>>;

    /// Finds one entry by id and owner.
    async fn find(&self, user_id: UserId, log_id: LogEntryId) -> AppResult<Option<LogEntry>>;

    /// Stores a new entry.
    async fn create(&self, entry: &LogEntry) -> AppResult<()>;

    /// Persists user-editable fields of an existing entry.
    async fn update(&self, entry: &LogEntry) -> AppResult<()>;

    /// Deletes an entry by id and owner. Returns whether a row was removed.
    async fn delete(&self, user_id: UserId, log_id: LogEntryId) -> AppResult<bool>;

    /// Archives the owner's active entries created before `cutoff`, stamping
    /// them with `archived_at`. Returns the number of archived entries.
    async fn archive_stale(
        &self,
        user_id: UserId,
        cutoff: DateTime<Utc>,
        archived_at: DateTime<Utc>,
    ) -> AppResult<u64>;
}

/// Raw create payload.
#[derive(Debug, Clone, Default)]
pub struct CreateLogInput {
    /// Entry text.
    pub text: Option<String>,
    /// Entry type wire value.
    pub entry_type: Option<String>,
    /// Intensity, one to five.
    pub intensity: Option<i64>,
    /// Pulled into session prep.
    pub added_to_prep: Option<bool>,
    /// Prep note; blank notes are stored as none.
    pub prep_note: Option<String>,
    /// Ticked off.
    pub checked_off: Option<bool>,
}

/// Raw partial update payload.
#[derive(Debug, Clone, Default)]
pub struct UpdateLogInput {
    /// Replacement text.
    pub text: Option<String>,
    /// Replacement type wire value.
    pub entry_type: Option<String>,
    /// Replacement intensity.
    pub intensity: Option<i64>,
    /// Replacement prep flag.
    pub added_to_prep: Option<bool>,
    /// `Some(None)` clears the prep note.
    pub prep_note: Option<Option<String>>,
    /// Replacement check-off flag.
    pub checked_off: Option<bool>,
}

const LOG_NOT_FOUND: &str = "Log not found";
const TEXT_REQUIRED: &str = "Text is required";

/// Application service for journal log entries.
#[derive(Clone)]
pub struct LogService {
    repository: Arc<dyn LogRepository>,
    clock: Arc<dyn Clock>,
}

impl LogService {
    /// Creates a new log service.
    #[must_use]
    pub fn new(repository: Arc<dyn LogRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Archives the user's stale entries. Returns how many were archived.
    pub async fn archive_stale(&self, user_id: UserId) -> AppResult<u64> {
        let now = self.clock.now();
        let archived = self
            .repository
            .archive_stale(user_id, archive_cutoff(now), now)
            .await?;

        tracing::debug!(%user_id, archived, "archived stale log entries");
        Ok(archived)
    }

    /// Runs the sweep, then lists one view of the user's log.
    pub async fn list_logs(&self, user_id: UserId, view: LogView) -> AppResult<Vec<LogEntry>> {
        self.archive_stale(user_id).await?;
        self.repository.list(user_id, view).await
    }

    /// Creates a new active entry.
    pub async fn create_log(&self, user_id: UserId, input: CreateLogInput) -> AppResult<LogEntry> {
        let text = NonEmptyString::with_message(input.text.unwrap_or_default(), TEXT_REQUIRED)?;
        let entry_type = LogEntryType::parse(input.entry_type.as_deref().unwrap_or_default())?;
        let intensity = parse_intensity(input.intensity)?;

        let entry = LogEntry::new(
            user_id,
            NewLogEntry {
                text,
                entry_type,
                intensity,
                added_to_prep: input.added_to_prep.unwrap_or(false),
                prep_note: input.prep_note.and_then(non_blank),
                checked_off: input.checked_off.unwrap_or(false),
            },
            self.clock.now(),
        );

        self.repository.create(&entry).await?;
        Ok(entry)
    }

    /// Applies a partial update to one of the user's entries.
    pub async fn update_log(
        &self,
        user_id: UserId,
        log_id: &str,
        input: UpdateLogInput,
    ) -> AppResult<LogEntry> {
        let mut entry = self.find_owned(user_id, log_id).await?;

        let patch = LogEntryPatch {
            text: input
                .text
                .map(|text| NonEmptyString::with_message(text, TEXT_REQUIRED))
                .transpose()?,
            entry_type: input
                .entry_type
                .as_deref()
                .map(LogEntryType::parse)
                .transpose()?,
            intensity: input.intensity.map(Intensity::new).transpose()?,
            added_to_prep: input.added_to_prep,
            prep_note: input
                .prep_note
                .map(|note| note.map(|value| value.trim().to_owned())),
            checked_off: input.checked_off,
        };

        entry.apply(patch, self.clock.now());
        self.repository.update(&entry).await?;
        Ok(entry)
    }

    /// Deletes one of the user's entries.
    pub async fn delete_log(&self, user_id: UserId, log_id: &str) -> AppResult<()> {
        let log_id = parse_log_id(log_id)?;
        if !self.repository.delete(user_id, log_id).await? {
            return Err(AppError::NotFound(LOG_NOT_FOUND.to_owned()));
        }

        Ok(())
    }

    async fn find_owned(&self, user_id: UserId, log_id: &str) -> AppResult<LogEntry> {
        let log_id = parse_log_id(log_id)?;
        self.repository
            .find(user_id, log_id)
            .await?
            .ok_or_else(|| AppError::NotFound(LOG_NOT_FOUND.to_owned()))
    }
}

fn parse_log_id(value: &str) -> AppResult<LogEntryId> {
    LogEntryId::parse(value).ok_or_else(|| AppError::NotFound(LOG_NOT_FOUND.to_owned()))
}

fn parse_intensity(value: Option<i64>) -> AppResult<Intensity> {
    value
        .ok_or_else(|| AppError::Validation("Intensity must be between 1 and 5".to_owned()))
        .and_then(Intensity::new)
}

fn non_blank(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}
