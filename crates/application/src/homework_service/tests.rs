use std::sync::Arc;

use async_trait::async_trait;
use chrono::Duration;
use tokio::sync::Mutex;

use confide_core::{AppError, AppResult};
use confide_domain::{
    HomeworkId, HomeworkItem, NewTherapySession, SessionId, TherapySession, UserId,
};

use crate::test_support::ManualClock;
use crate::{Clock, SessionDraft, SessionRepository};

use super::{CreateHomeworkInput, HomeworkRepository, HomeworkService, UpdateHomeworkInput};

#[derive(Default)]
struct FakeHomeworkRepository {
    items: Mutex<Vec<HomeworkItem>>,
}

#[async_trait]
impl HomeworkRepository for FakeHomeworkRepository {
    async fn list(
        &self,
        user_id: UserId,
        completed: Option<bool>,
    ) -> AppResult<Vec<HomeworkItem>> {
        let mut items: Vec<HomeworkItem> = self
            .items
            .lock()
            .await
            .iter()
            .filter(|item| item.user_id == user_id)
            .filter(|item| completed.is_none_or(|completed| item.completed == completed))
            .cloned()
            .collect();
        items.sort_by(|left, right| {
            left.completed
                .cmp(&right.completed)
                .then(right.session_date.cmp(&left.session_date))
                .then(right.created_at.cmp(&left.created_at))
        });
        Ok(items)
    }

    async fn find(
        &self,
        user_id: UserId,
        homework_id: HomeworkId,
    ) -> AppResult<Option<HomeworkItem>> {
        Ok(self
            .items
            .lock()
            .await
            .iter()
            .find(|item| item.id == homework_id && item.user_id == user_id)
            .cloned())
    }

    async fn create(&self, item: &HomeworkItem) -> AppResult<()> {
        self.items.lock().await.push(item.clone());
        Ok(())
    }

    async fn update(&self, item: &HomeworkItem) -> AppResult<()> {
        let mut items = self.items.lock().await;
        if let Some(existing) = items.iter_mut().find(|existing| existing.id == item.id) {
            *existing = item.clone();
        }
        Ok(())
    }

    async fn delete(&self, user_id: UserId, homework_id: HomeworkId) -> AppResult<bool> {
        let mut items = self.items.lock().await;
        let before = items.len();
        items.retain(|item| !(item.id == homework_id && item.user_id == user_id));
        Ok(items.len() != before)
    }
}

struct SingleSessionRepository {
    session: TherapySession,
}

#[async_trait]
impl SessionRepository for SingleSessionRepository {
    async fn list(
        &self,
        _user_id: UserId,
        _completed: Option<bool>,
    ) -> AppResult<Vec<TherapySession>> {
        Ok(vec![self.session.clone()])
    }

    async fn find(
        &self,
        user_id: UserId,
        session_id: SessionId,
    ) -> AppResult<Option<TherapySession>> {
        Ok((self.session.id == session_id && self.session.user_id == user_id)
            .then(|| self.session.clone()))
    }

    async fn create_with_homework(
        &self,
        _draft: SessionDraft,
    ) -> AppResult<(TherapySession, Vec<HomeworkItem>)> {
        Err(AppError::Internal("not used".to_owned()))
    }

    async fn update(&self, _session: &TherapySession) -> AppResult<()> {
        Ok(())
    }

    async fn delete(&self, _user_id: UserId, _session_id: SessionId) -> AppResult<bool> {
        Ok(false)
    }
}

struct Harness {
    service: HomeworkService,
    clock: Arc<ManualClock>,
    owner: UserId,
    session_id: SessionId,
}

fn harness() -> Harness {
    let owner = UserId::new();
    let clock = Arc::new(ManualClock::epoch());
    let session = TherapySession::new(
        owner,
        1,
        NewTherapySession::normalized(clock.now(), Vec::new(), None, Vec::new(), None, None, None),
        clock.now(),
    );
    let session_id = session.id;
    let service = HomeworkService::new(
        Arc::new(FakeHomeworkRepository::default()),
        Arc::new(SingleSessionRepository { session }),
        clock.clone(),
    );

    Harness {
        service,
        clock,
        owner,
        session_id,
    }
}

fn text(value: &str) -> CreateHomeworkInput {
    CreateHomeworkInput {
        text: Some(value.to_owned()),
        ..CreateHomeworkInput::default()
    }
}

#[tokio::test]
async fn create_validates_text_and_dates() {
    let Harness { service, owner, .. } = harness();

    let cases = [
        (text("  "), "Homework text is required"),
        (
            CreateHomeworkInput {
                session_date: Some("soon".to_owned()),
                ..text("walk")
            },
            "Invalid session date",
        ),
        (
            CreateHomeworkInput {
                due_date: Some("later".to_owned()),
                ..text("walk")
            },
            "Invalid due date",
        ),
    ];

    for (input, expected) in cases {
        let result = service.create_homework(owner, input).await;
        assert!(
            matches!(&result, Err(AppError::Validation(message)) if message == expected),
            "expected {expected}, got {result:?}"
        );
    }
}

#[tokio::test]
async fn create_attaches_only_owned_sessions() {
    let Harness {
        service,
        owner,
        session_id,
        ..
    } = harness();

    let attached = service
        .create_homework(
            owner,
            CreateHomeworkInput {
                session_id: Some(session_id.to_string()),
                ..text("walk")
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(attached.session_id, Some(session_id));
    assert!(!attached.completed);

    let foreign = service
        .create_homework(
            UserId::new(),
            CreateHomeworkInput {
                session_id: Some(session_id.to_string()),
                ..text("walk")
            },
        )
        .await;
    assert!(matches!(foreign, Err(AppError::NotFound(_))));
}

#[tokio::test]
async fn completing_stamps_the_current_time() {
    let Harness {
        service,
        clock,
        owner,
        ..
    } = harness();
    let item = service
        .create_homework(owner, text("walk"))
        .await
        .unwrap_or_else(|_| unreachable!());
    let id = item.id.to_string();

    clock.advance(Duration::hours(5));
    let done = service
        .update_homework(
            owner,
            &id,
            UpdateHomeworkInput {
                completed: Some(true),
                due_date: Some(Some(String::new())),
                ..UpdateHomeworkInput::default()
            },
        )
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(done.completed);
    assert_eq!(done.completed_date, Some(clock.now()));
    assert_eq!(done.due_date, None);
}

#[tokio::test]
async fn lists_open_items_first() {
    let Harness {
        service,
        clock,
        owner,
        ..
    } = harness();
    let first = service
        .create_homework(owner, text("first"))
        .await
        .unwrap_or_else(|_| unreachable!());
    clock.advance(Duration::minutes(1));
    let second = service
        .create_homework(owner, text("second"))
        .await
        .unwrap_or_else(|_| unreachable!());
    let _ = service
        .update_homework(
            owner,
            &second.id.to_string(),
            UpdateHomeworkInput {
                completed: Some(true),
                ..UpdateHomeworkInput::default()
            },
        )
        .await;

    let listed = service
        .list_homework(owner, None)
        .await
        .unwrap_or_default();
    let ids: Vec<HomeworkId> = listed.iter().map(|item| item.id).collect();
    assert_eq!(ids, vec![first.id, second.id]);

    let open = service
        .list_homework(owner, Some(false))
        .await
        .unwrap_or_default();
    assert_eq!(open.len(), 1);
}

#[tokio::test]
async fn missing_items_are_not_found() {
    let Harness { service, owner, .. } = harness();

    let result = service
        .update_homework(owner, &HomeworkId::new().to_string(), UpdateHomeworkInput::default())
        .await;
    assert!(matches!(result, Err(AppError::NotFound(message)) if message == "Homework not found"));
    assert!(service.delete_homework(owner, "nope").await.is_err());
}
