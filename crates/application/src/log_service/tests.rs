use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use confide_core::{AppError, AppResult};
use confide_domain::{LogEntry, LogEntryId, LogView, UserId};

use crate::test_support::ManualClock;

use super::{CreateLogInput, LogRepository, LogService, UpdateLogInput};

#[derive(Default)]
struct FakeLogRepository {
    entries: Mutex<HashMap<LogEntryId, LogEntry>>,
    fail_sweep: bool,
}

#[async_trait]
impl LogRepository for FakeLogRepository {
    async fn list(&self, user_id: UserId, view: LogView) -> AppResult<Vec<LogEntry>> {
        let mut entries: Vec<LogEntry> = self
            .entries
            .lock()
            .await
            .values()
            .filter(|entry| entry.user_id == user_id && view.includes(entry.archive_state))
            .cloned()
            .collect();
        entries.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(entries)
    }

    async fn find(&self, user_id: UserId, log_id: LogEntryId) -> AppResult<Option<LogEntry>> {
        Ok(self
            .entries
            .lock()
            .await
            .get(&log_id)
            .filter(|entry| entry.user_id == user_id)
            .cloned())
    }

    async fn create(&self, entry: &LogEntry) -> AppResult<()> {
        self.entries.lock().await.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn update(&self, entry: &LogEntry) -> AppResult<()> {
        self.entries.lock().await.insert(entry.id, entry.clone());
        Ok(())
    }

    async fn delete(&self, user_id: UserId, log_id: LogEntryId) -> AppResult<bool> {
        let mut entries = self.entries.lock().await;
        if entries
            .get(&log_id)
            .is_some_and(|entry| entry.user_id == user_id)
        {
            entries.remove(&log_id);
            return Ok(true);
        }
        Ok(false)
    }

    async fn archive_stale(
        &self,
        user_id: UserId,
        cutoff: DateTime<Utc>,
        archived_at: DateTime<Utc>,
    ) -> AppResult<u64> {
        if self.fail_sweep {
            return Err(AppError::Internal("sweep failed".to_owned()));
        }

        let mut archived = 0;
        for entry in self.entries.lock().await.values_mut() {
            if entry.user_id == user_id && entry.is_stale(cutoff) {
                entry.archive(archived_at);
                archived += 1;
            }
        }
        Ok(archived)
    }
}

fn service_with(repository: FakeLogRepository) -> (LogService, Arc<ManualClock>) {
    let clock = Arc::new(ManualClock::epoch());
    (LogService::new(Arc::new(repository), clock.clone()), clock)
}

fn trigger(text: &str) -> CreateLogInput {
    CreateLogInput {
        text: Some(text.to_owned()),
        entry_type: Some("trigger".to_owned()),
        intensity: Some(3),
        ..CreateLogInput::default()
    }
}

#[tokio::test]
async fn entry_stays_active_until_fourteen_days_pass() {
    let (service, clock) = service_with(FakeLogRepository::default());
    let user_id = UserId::new();
    let created = service
        .create_log(user_id, trigger("loud meeting"))
        .await
        .unwrap_or_else(|_| unreachable!());

    clock.advance(Duration::days(13) + Duration::hours(22));
    let active = service
        .list_logs(user_id, LogView::Active)
        .await
        .unwrap_or_default();
    assert_eq!(active.len(), 1);
    assert!(!active[0].archive_state.is_archived());

    clock.advance(Duration::hours(4));
    let sweep_time = clock_now(&clock);
    let active = service
        .list_logs(user_id, LogView::Active)
        .await
        .unwrap_or_default();
    assert!(active.is_empty());

    let archived = service
        .list_logs(user_id, LogView::Archive)
        .await
        .unwrap_or_default();
    assert_eq!(archived.len(), 1);
    assert_eq!(archived[0].id, created.id);
    assert_eq!(archived[0].archive_state.archived_at(), Some(sweep_time));
}

#[tokio::test]
async fn sweep_only_touches_requesting_user() {
    let repository = Arc::new(FakeLogRepository::default());
    let clock = Arc::new(ManualClock::epoch());
    let service = LogService::new(repository.clone(), clock.clone());
    let alice = UserId::new();
    let bob = UserId::new();
    let _ = service.create_log(alice, trigger("alice")).await;
    let _ = service.create_log(bob, trigger("bob")).await;

    clock.advance(Duration::days(15));
    assert_eq!(service.archive_stale(alice).await.unwrap_or_default(), 1);

    let entries = repository.entries.lock().await;
    for entry in entries.values() {
        assert_eq!(entry.archive_state.is_archived(), entry.user_id == alice);
    }
}

#[tokio::test]
async fn failed_sweep_fails_the_list() {
    let (service, _clock) = service_with(FakeLogRepository {
        fail_sweep: true,
        ..FakeLogRepository::default()
    });

    let result = service.list_logs(UserId::new(), LogView::All).await;

    assert!(matches!(result, Err(AppError::Internal(_))));
}

#[tokio::test]
async fn create_validates_fields_in_order() {
    let (service, _clock) = service_with(FakeLogRepository::default());
    let user_id = UserId::new();

    let cases = [
        (
            CreateLogInput {
                text: Some("   ".to_owned()),
                ..trigger("")
            },
            "Text is required",
        ),
        (
            CreateLogInput {
                entry_type: Some("rant".to_owned()),
                ..trigger("text")
            },
            "Invalid log type",
        ),
        (
            CreateLogInput {
                intensity: Some(6),
                ..trigger("text")
            },
            "Intensity must be between 1 and 5",
        ),
        (
            CreateLogInput {
                intensity: None,
                ..trigger("text")
            },
            "Intensity must be between 1 and 5",
        ),
    ];

    for (input, expected) in cases {
        let result = service.create_log(user_id, input).await;
        assert!(
            matches!(&result, Err(AppError::Validation(message)) if message == expected),
            "expected {expected}, got {result:?}"
        );
    }
}

#[tokio::test]
async fn blank_prep_note_is_stored_as_none() {
    let (service, _clock) = service_with(FakeLogRepository::default());

    let entry = service
        .create_log(
            UserId::new(),
            CreateLogInput {
                prep_note: Some("  ".to_owned()),
                ..trigger("text")
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(entry.prep_note, None);
    assert!(!entry.added_to_prep);
}

#[tokio::test]
async fn update_is_scoped_to_owner_and_keeps_archive_state() {
    let (service, clock) = service_with(FakeLogRepository::default());
    let owner = UserId::new();
    let entry = service
        .create_log(owner, trigger("text"))
        .await
        .unwrap_or_else(|_| unreachable!());
    let id = entry.id.to_string();

    let stranger = service
        .update_log(UserId::new(), &id, UpdateLogInput::default())
        .await;
    assert!(matches!(stranger, Err(AppError::NotFound(message)) if message == "Log not found"));

    clock.advance(Duration::days(20));
    let _ = service.archive_stale(owner).await;

    let updated = service
        .update_log(
            owner,
            &id,
            UpdateLogInput {
                prep_note: Some(Some(" bring this up ".to_owned())),
                checked_off: Some(true),
                ..UpdateLogInput::default()
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(updated.prep_note.as_deref(), Some("bring this up"));
    assert!(updated.checked_off);
    assert!(updated.archive_state.is_archived());

    let cleared = service
        .update_log(
            owner,
            &id,
            UpdateLogInput {
                prep_note: Some(None),
                ..UpdateLogInput::default()
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(cleared.prep_note, None);
}

#[tokio::test]
async fn delete_reports_missing_and_malformed_ids_as_not_found() {
    let (service, _clock) = service_with(FakeLogRepository::default());
    let owner = UserId::new();
    let entry = service
        .create_log(owner, trigger("text"))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(service.delete_log(owner, "not-a-uuid").await.is_err());
    assert!(service.delete_log(owner, &entry.id.to_string()).await.is_ok());
    assert!(matches!(
        service.delete_log(owner, &entry.id.to_string()).await,
        Err(AppError::NotFound(_))
    ));
}

fn clock_now(clock: &ManualClock) -> DateTime<Utc> {
    use crate::Clock;
    clock.now()
}
