use chrono::{DateTime, Duration, TimeZone, Utc};

use confide_application::{
    HomeworkRepository, LogRepository, ProfileRepository, SessionDraft, SessionRepository,
    UserRecord, UserRepository,
};
use confide_core::{AppError, NonEmptyString};
use confide_domain::{
    Intensity, LogEntry, LogEntryType, LogView, NewHomeworkItem, NewLogEntry, NewTherapySession,
    Plan, UserId, UserProfile, archive_cutoff,
};

use super::InMemoryStore;

fn at(day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, day, 9, 0, 0)
        .single()
        .unwrap_or_else(|| unreachable!())
}

fn user(email: &str) -> UserRecord {
    UserRecord {
        id: UserId::new(),
        email: email.to_owned(),
        name: None,
        password_hash: "hash".to_owned(),
        plan: Plan::Free,
        created_at: at(1),
        updated_at: at(1),
    }
}

fn log_entry(user_id: UserId, text: &str, created_at: DateTime<Utc>) -> LogEntry {
    LogEntry::new(
        user_id,
        NewLogEntry {
            text: NonEmptyString::new(text).unwrap_or_else(|_| unreachable!()),
            entry_type: LogEntryType::parse("thought").unwrap_or_else(|_| unreachable!()),
            intensity: Intensity::new(3).unwrap_or_else(|_| unreachable!()),
            added_to_prep: false,
            prep_note: None,
            checked_off: false,
        },
        created_at,
    )
}

fn homework_line(text: &str, session_date: DateTime<Utc>) -> NewHomeworkItem {
    NewHomeworkItem {
        session_id: None,
        text: NonEmptyString::new(text).unwrap_or_else(|_| unreachable!()),
        session_date,
        due_date: None,
    }
}

fn session_draft(user_id: UserId, date: DateTime<Utc>, homework: &[&str]) -> SessionDraft {
    SessionDraft {
        user_id,
        session: NewTherapySession::normalized(date, Vec::new(), None, Vec::new(), None, None, None),
        homework: homework
            .iter()
            .map(|text| homework_line(text, date))
            .collect(),
        created_at: date,
    }
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let store = InMemoryStore::new();
    assert!(UserRepository::create(&store, user("sam@example.com")).await.is_ok());

    let duplicate = UserRepository::create(&store, user("sam@example.com")).await;
    assert!(matches!(duplicate, Err(AppError::Conflict(_))));
    assert_eq!(store.count().await.unwrap_or_default(), 1);
}

#[tokio::test]
async fn deleting_a_user_cascades_to_owned_data() {
    let store = InMemoryStore::new();
    let owner = user("owner@example.com");
    let other = user("other@example.com");
    let owner_id = owner.id;
    let other_id = other.id;
    assert!(UserRepository::create(&store, owner).await.is_ok());
    assert!(UserRepository::create(&store, other).await.is_ok());

    assert!(LogRepository::create(&store, &log_entry(owner_id, "mine", at(2))).await.is_ok());
    assert!(LogRepository::create(&store, &log_entry(other_id, "theirs", at(2))).await.is_ok());
    assert!(
        store
            .create_with_homework(session_draft(owner_id, at(3), &["walk"]))
            .await
            .is_ok()
    );
    assert!(
        store
            .insert_if_absent(&UserProfile::with_defaults(owner_id, None, at(1)))
            .await
            .is_ok()
    );

    assert!(UserRepository::delete(&store, owner_id).await.unwrap_or_default());

    assert!(store.find_by_id(owner_id).await.unwrap_or_default().is_none());
    assert!(LogRepository::list(&store, owner_id, LogView::All).await.unwrap_or_default().is_empty());
    assert!(SessionRepository::list(&store, owner_id, None).await.unwrap_or_default().is_empty());
    assert!(HomeworkRepository::list(&store, owner_id, None).await.unwrap_or_default().is_empty());
    assert!(ProfileRepository::find(&store, owner_id).await.unwrap_or_default().is_none());
    assert_eq!(LogRepository::list(&store, other_id, LogView::All).await.unwrap_or_default().len(), 1);
}

#[tokio::test]
async fn archive_sweep_is_scoped_and_idempotent() {
    let store = InMemoryStore::new();
    let owner_id = UserId::new();
    let other_id = UserId::new();
    let now = at(30);
    let cutoff = archive_cutoff(now);

    let stale = log_entry(owner_id, "old", now - Duration::days(15));
    let fresh = log_entry(owner_id, "new", now - Duration::days(13));
    let foreign = log_entry(other_id, "old too", now - Duration::days(20));
    for entry in [&stale, &fresh, &foreign] {
        assert!(LogRepository::create(&store, entry).await.is_ok());
    }

    assert_eq!(store.archive_stale(owner_id, cutoff, now).await.unwrap_or_default(), 1);
    assert_eq!(
        store
            .archive_stale(owner_id, cutoff, now + Duration::hours(1))
            .await
            .unwrap_or_default(),
        0
    );

    let archived = LogRepository::list(&store, owner_id, LogView::Archive)
        .await
        .unwrap_or_default();
    assert_eq!(archived.len(), 1);
    assert_eq!(archived[0].id, stale.id);
    assert_eq!(archived[0].archive_state.archived_at(), Some(now));

    let foreign_active = LogRepository::list(&store, other_id, LogView::Active)
        .await
        .unwrap_or_default();
    assert_eq!(foreign_active.len(), 1);
}

#[tokio::test]
async fn log_update_keeps_archive_state() {
    let store = InMemoryStore::new();
    let owner_id = UserId::new();
    let mut entry = log_entry(owner_id, "old", at(1));
    assert!(LogRepository::create(&store, &entry).await.is_ok());
    assert!(store.archive_stale(owner_id, at(20), at(20)).await.is_ok());

    entry.text = "edited".to_owned();
    assert!(LogRepository::update(&store, &entry).await.is_ok());

    let stored = LogRepository::find(&store, owner_id, entry.id)
        .await
        .unwrap_or_default()
        .unwrap_or_else(|| unreachable!());
    assert_eq!(stored.text, "edited");
    assert!(stored.archive_state.is_archived());
}

#[tokio::test]
async fn logs_are_listed_newest_first() {
    let store = InMemoryStore::new();
    let owner_id = UserId::new();
    for (day, text) in [(2, "second"), (1, "first"), (3, "third")] {
        assert!(LogRepository::create(&store, &log_entry(owner_id, text, at(day))).await.is_ok());
    }

    let texts: Vec<String> = LogRepository::list(&store, owner_id, LogView::Active)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|entry| entry.text)
        .collect();
    assert_eq!(texts, ["third", "second", "first"]);
}

#[tokio::test]
async fn session_numbers_are_per_user_and_monotonic() {
    let store = InMemoryStore::new();
    let owner_id = UserId::new();
    let other_id = UserId::new();

    let first = store
        .create_with_homework(session_draft(owner_id, at(1), &[]))
        .await
        .unwrap_or_else(|_| unreachable!());
    let second = store
        .create_with_homework(session_draft(owner_id, at(8), &[]))
        .await
        .unwrap_or_else(|_| unreachable!());
    let foreign = store
        .create_with_homework(session_draft(other_id, at(8), &[]))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(first.0.number, 1);
    assert_eq!(second.0.number, 2);
    assert_eq!(foreign.0.number, 1);

    assert!(SessionRepository::delete(&store, owner_id, second.0.id).await.unwrap_or_default());
    let third = store
        .create_with_homework(session_draft(owner_id, at(15), &[]))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(third.0.number, 2);
}

#[tokio::test]
async fn deleting_a_session_detaches_its_homework() {
    let store = InMemoryStore::new();
    let owner_id = UserId::new();
    let (session, homework) = store
        .create_with_homework(session_draft(owner_id, at(4), &["journal", "stretch"]))
        .await
        .unwrap_or_else(|_| unreachable!());
    assert_eq!(homework.len(), 2);
    assert!(homework.iter().all(|item| item.session_id == Some(session.id)));

    assert!(SessionRepository::delete(&store, owner_id, session.id).await.unwrap_or_default());

    let remaining = HomeworkRepository::list(&store, owner_id, None)
        .await
        .unwrap_or_default();
    assert_eq!(remaining.len(), 2);
    assert!(remaining.iter().all(|item| item.session_id.is_none()));
}

#[tokio::test]
async fn foreign_rows_are_invisible() {
    let store = InMemoryStore::new();
    let owner_id = UserId::new();
    let intruder_id = UserId::new();
    let (session, homework) = store
        .create_with_homework(session_draft(owner_id, at(4), &["journal"]))
        .await
        .unwrap_or_else(|_| unreachable!());

    assert!(SessionRepository::find(&store, intruder_id, session.id).await.unwrap_or_default().is_none());
    assert!(!SessionRepository::delete(&store, intruder_id, session.id).await.unwrap_or_default());
    assert!(!HomeworkRepository::delete(&store, intruder_id, homework[0].id).await.unwrap_or_default());
    assert!(HomeworkRepository::find(&store, owner_id, homework[0].id).await.unwrap_or_default().is_some());
}

#[tokio::test]
async fn homework_is_ordered_open_first_then_latest_session() {
    let store = InMemoryStore::new();
    let owner_id = UserId::new();
    let (_, early) = store
        .create_with_homework(session_draft(owner_id, at(1), &["early"]))
        .await
        .unwrap_or_else(|_| unreachable!());
    let (_, late) = store
        .create_with_homework(session_draft(owner_id, at(10), &["late"]))
        .await
        .unwrap_or_else(|_| unreachable!());

    let mut done = late[0].clone();
    done.completed = true;
    done.completed_date = Some(at(11));
    assert!(HomeworkRepository::update(&store, &done).await.is_ok());

    let texts: Vec<String> = HomeworkRepository::list(&store, owner_id, None)
        .await
        .unwrap_or_default()
        .into_iter()
        .map(|item| item.text)
        .collect();
    assert_eq!(texts, ["early", "late"]);

    let open = HomeworkRepository::list(&store, owner_id, Some(false))
        .await
        .unwrap_or_default();
    assert_eq!(open.len(), 1);
    assert_eq!(open[0].id, early[0].id);
}

#[tokio::test]
async fn profile_insert_if_absent_keeps_first_profile() {
    let store = InMemoryStore::new();
    let owner_id = UserId::new();
    let first = UserProfile::with_defaults(owner_id, Some("Robin"), at(1));
    let second = UserProfile::with_defaults(owner_id, Some("Someone Else"), at(2));

    let stored = store
        .insert_if_absent(&first)
        .await
        .unwrap_or_else(|_| unreachable!());
    let again = store
        .insert_if_absent(&second)
        .await
        .unwrap_or_else(|_| unreachable!());

    assert_eq!(stored.id, first.id);
    assert_eq!(again.id, first.id);
    assert_eq!(again.display_name, "Robin");
}
