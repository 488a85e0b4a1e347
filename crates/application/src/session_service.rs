//! Therapy session ports and application service.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use confide_core::{AppError, AppResult, NonEmptyString, parse_timestamp};
use confide_domain::{
    HomeworkItem, NewHomeworkItem, NewTherapySession, SessionId, SessionPatch, TherapySession,
    UserId,
};

use crate::Clock;


/// A session about to be created together with its homework.
#[derive(Debug, Clone)]
pub struct SessionDraft {
    /// Owning user.
    pub user_id: UserId,
    /// Session fields.
    pub session: NewTherapySession,
    /// Homework assigned in the session; `session_id` is filled in on insert.
    pub homework: Vec<NewHomeworkItem>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// Repository port for therapy sessions. Every query is scoped to one owner.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Lists the owner's sessions, latest date first, optionally filtered by completion.
    async fn list(
        &self,
        user_id: UserId,
        completed: Option<bool>,
    ) -> AppResult<Vec<TherapySession>>;

    /// Finds one session by id and owner.
    async fn find(
        &self,
        user_id: UserId,
        session_id: SessionId,
    ) -> AppResult<Option<TherapySession>>;

    /// Creates a session numbered one past the owner's highest number, and
    /// its homework, atomically.
    async fn create_with_homework(
        &self,
        draft: SessionDraft,
    ) -> AppResult<(TherapySession, Vec<HomeworkItem>)>;

    /// Persists editable fields of an existing session.
    async fn update(&self, session: &TherapySession) -> AppResult<()>;

    /// Deletes a session. Homework from the session is kept and detached.
    async fn delete(&self, user_id: UserId, session_id: SessionId) -> AppResult<bool>;
}

/// Homework line submitted with a new session.
#[derive(Debug, Clone, Default)]
pub struct SessionHomeworkInput {
    /// What to do; blank lines are skipped.
    pub text: Option<String>,
    /// Optional due date.
    pub due_date: Option<String>,
}

/// Raw create payload.
#[derive(Debug, Clone, Default)]
pub struct CreateSessionInput {
    /// Session date; defaults to now.
    pub date: Option<String>,
    /// Topics covered.
    pub topics: Option<Vec<String>>,
    /// Free-form reflection.
    pub what_stood_out: Option<String>,
    /// Items prepared ahead of the session.
    pub prep_items: Option<Vec<String>>,
    /// Mood after the session.
    pub post_mood: Option<i32>,
    /// One word describing the mood.
    pub mood_word: Option<String>,
    /// Whether the session already happened; defaults to true.
    pub completed: Option<bool>,
    /// Homework assigned during the session.
    pub homework_items: Vec<SessionHomeworkInput>,
}

/// Raw partial update payload.
#[derive(Debug, Clone, Default)]
pub struct UpdateSessionInput {
    /// Replacement date.
    pub date: Option<String>,
    /// Replacement topics.
    pub topics: Option<Vec<String>>,
    /// Replacement prep items.
    pub prep_items: Option<Vec<String>>,
    /// Replacement reflection.
    pub what_stood_out: Option<String>,
    /// Replacement mood.
    pub post_mood: Option<i32>,
    /// Replacement mood word.
    pub mood_word: Option<String>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
}

/// A created session with the homework created alongside it.
#[derive(Debug, Clone)]
pub struct CreatedSession {
    /// The session.
    pub session: TherapySession,
    /// Homework created in the same transaction.
    pub homework_items: Vec<HomeworkItem>,
}

const SESSION_NOT_FOUND: &str = "Session not found";

/// Application service for therapy sessions.
#[derive(Clone)]
pub struct SessionService {
    repository: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl SessionService {
    /// Creates a new session service.
    #[must_use]
    pub fn new(repository: Arc<dyn SessionRepository>, clock: Arc<dyn Clock>) -> Self {
        Self { repository, clock }
    }

    /// Lists the user's sessions.
    pub async fn list_sessions(
        &self,
        user_id: UserId,
        completed: Option<bool>,
    ) -> AppResult<Vec<TherapySession>> {
        self.repository.list(user_id, completed).await
    }

    /// Creates a session and any homework assigned in it.
    pub async fn create_session(
        &self,
        user_id: UserId,
        input: CreateSessionInput,
    ) -> AppResult<CreatedSession> {
        let now = self.clock.now();
        let date = match input.date.as_deref().filter(|value| !value.is_empty()) {
            Some(value) => parse_timestamp(value, "Invalid session date")?,
            None => now,
        };

        let homework = input
            .homework_items
            .into_iter()
            .filter_map(|item| {
                let text = NonEmptyString::new(item.text.unwrap_or_default()).ok()?;
                Some((text, item.due_date))
            })
            .map(|(text, due_date)| {
                Ok(NewHomeworkItem {
                    session_id: None,
                    text,
                    session_date: date,
                    due_date: parse_optional_date(due_date.as_deref(), "Invalid due date")?,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        let session = NewTherapySession::normalized(
            date,
            input.topics.unwrap_or_default(),
            input.what_stood_out,
            input.prep_items.unwrap_or_default(),
            input.post_mood,
            input.mood_word,
            input.completed,
        );

        let (session, homework_items) = self
            .repository
            .create_with_homework(SessionDraft {
                user_id,
                session,
                homework,
                created_at: now,
            })
            .await?;

        tracing::debug!(
            %user_id,
            number = session.number,
            homework = homework_items.len(),
            "created therapy session"
        );

        Ok(CreatedSession {
            session,
            homework_items,
        })
    }

    /// Applies a partial update to one of the user's sessions.
    pub async fn update_session(
        &self,
        user_id: UserId,
        session_id: &str,
        input: UpdateSessionInput,
    ) -> AppResult<TherapySession> {
        let session_id = parse_session_id(session_id)?;
        let mut session = self
            .repository
            .find(user_id, session_id)
            .await?
            .ok_or_else(|| AppError::NotFound(SESSION_NOT_FOUND.to_owned()))?;

        let patch = SessionPatch {
            date: input
                .date
                .as_deref()
                .map(|value| parse_timestamp(value, "Invalid date"))
                .transpose()?,
            topics: input.topics,
            prep_items: input.prep_items,
            what_stood_out: input.what_stood_out,
            post_mood: input.post_mood,
            mood_word: input.mood_word,
            completed: input.completed,
        };

        session.apply(patch, self.clock.now());
        self.repository.update(&session).await?;
        Ok(session)
    }

    /// Deletes one of the user's sessions.
    pub async fn delete_session(&self, user_id: UserId, session_id: &str) -> AppResult<()> {
        let session_id = parse_session_id(session_id)?;
        if !self.repository.delete(user_id, session_id).await? {
            return Err(AppError::NotFound(SESSION_NOT_FOUND.to_owned()));
        }

        Ok(())
    }
}

fn parse_session_id(value: &str) -> AppResult<SessionId> {
    SessionId::parse(value).ok_or_else(|| AppError::NotFound(SESSION_NOT_FOUND.to_owned()))
}

/// Parses an optional date where a missing or blank value means none.
pub(crate) fn parse_optional_date(
    value: Option<&str>,
    message: &str,
) -> AppResult<Option<DateTime<Utc>>> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| parse_timestamp(value, message))
        .transpose()
}
