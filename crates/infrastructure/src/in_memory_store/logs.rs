use async_trait::async_trait;
use chrono::{DateTime, Utc};

use confide_application::LogRepository;
use confide_core::AppResult;
use confide_domain::{LogEntry, LogEntryId, LogView, UserId};

use super::InMemoryStore;

#[async_trait]
impl LogRepository for InMemoryStore {
    async fn list(&self, user_id: UserId, view: LogView) -> AppResult<Vec<LogEntry>> {
        let state = self.state.read().await;
        let mut entries: Vec<LogEntry> = state
            .logs
            .values()
            .filter(|entry| entry.user_id == user_id && view.includes(entry.archive_state))
            .cloned()
            .collect();
        entries.sort_by(|left, right| right.created_at.cmp(&left.created_at));

        Ok(entries)
    }

    async fn find(&self, user_id: UserId, log_id: LogEntryId) -> AppResult<Option<LogEntry>> {
        let state = self.state.read().await;
        Ok(state
            .logs
            .get(&log_id)
            .filter(|entry| entry.user_id == user_id)
            .cloned())
    }

    async fn create(&self, entry: &LogEntry) -> AppResult<()> {
        self.state
            .write()
            .await
            .logs
            .insert(entry.id, entry.clone());
        Ok(())
    }

    async fn update(&self, entry: &LogEntry) -> AppResult<()> {
        let mut state = self.state.write().await;
        if let Some(stored) = state
            .logs
            .get_mut(&entry.id)
            .filter(|stored| stored.user_id == entry.user_id)
        {
            // Archival state belongs to the sweep.
            let archive_state = stored.archive_state;
            *stored = entry.clone();
            stored.archive_state = archive_state;
        }
        Ok(())
    }

    async fn delete(&self, user_id: UserId, log_id: LogEntryId) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let owned = state
            .logs
            .get(&log_id)
            .is_some_and(|entry| entry.user_id == user_id);
        if owned {
            state.logs.remove(&log_id);
        }
        Ok(owned)
    }

    async fn archive_stale(
        &self,
        user_id: UserId,
        cutoff: DateTime<Utc>,
        archived_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let mut state = self.state.write().await;
        let mut archived = 0;
        for entry in state
            .logs
            .values_mut()
            .filter(|entry| entry.user_id == user_id && entry.is_stale(cutoff))
        {
            entry.archive(archived_at);
            archived += 1;
        }

        Ok(archived)
    }
}
