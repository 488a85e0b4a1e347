//! Homework ports and application service.

use std::sync::Arc;

use async_trait::async_trait;

use confide_core::{AppError, AppResult, NonEmptyString, parse_timestamp};
use confide_domain::{HomeworkId, HomeworkItem, HomeworkPatch, NewHomeworkItem, SessionId, UserId};

use crate::session_service::parse_optional_date;
use crate::{Clock, SessionRepository};

#[cfg(test)]
mod tests;

/// Repository port for homework items. Every query is scoped to one owner.
#[async_trait]
pub trait HomeworkRepository: Send + Sync {
    /// Lists the owner's items: open before done, then by session date and
    /// creation time, newest first.
    async fn list(
        &self,
        user_id: UserId,
        completed: Option<bool>,
    ) -> AppResult<Vec<HomeworkItem>>;

    /// Finds one item by id and owner.
    async fn find(
        &self,
        user_id: UserId,
        homework_id: HomeworkId,
    ) -> AppResult<Option<HomeworkItem>>;

    /// Stores a new item.
    async fn create(&self, item: &HomeworkItem) -> AppResult<()>;

    /// Persists editable fields of an existing item.
    async fn update(&self, item: &HomeworkItem) -> AppResult<()>;

    /// Deletes an item by id and owner. Returns whether a row was removed.
    async fn delete(&self, user_id: UserId, homework_id: HomeworkId) -> AppResult<bool>;
}

/// Raw create payload.
#[derive(Debug, Clone, Default)]
pub struct CreateHomeworkInput {
    /// What to do.
    pub text: Option<String>,
    /// Session the item belongs to.
    pub session_id: Option<String>,
    /// Date of the assigning session; defaults to now.
    pub session_date: Option<String>,
    /// Optional due date.
    pub due_date: Option<String>,
}

/// Raw partial update payload.
#[derive(Debug, Clone, Default)]
pub struct UpdateHomeworkInput {
    /// Replacement text.
    pub text: Option<String>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
    /// `Some(None)` or a blank string clears the due date.
    pub due_date: Option<Option<String>>,
}

const HOMEWORK_NOT_FOUND: &str = "Homework not found";
const TEXT_REQUIRED: &str = "Homework text is required";

/// Application service for homework items.
#[derive(Clone)]
pub struct HomeworkService {
    repository: Arc<dyn HomeworkRepository>,
    sessions: Arc<dyn SessionRepository>,
    clock: Arc<dyn Clock>,
}

impl HomeworkService {
    /// Creates a new homework service.
    #[must_use]
    pub fn new(
        repository: Arc<dyn HomeworkRepository>,
        sessions: Arc<dyn SessionRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            repository,
            sessions,
            clock,
        }
    }

    /// Lists the user's homework.
    pub async fn list_homework(
        &self,
        user_id: UserId,
        completed: Option<bool>,
    ) -> AppResult<Vec<HomeworkItem>> {
        self.repository.list(user_id, completed).await
    }

    /// Creates a homework item, optionally attached to one of the user's sessions.
    pub async fn create_homework(
        &self,
        user_id: UserId,
        input: CreateHomeworkInput,
    ) -> AppResult<HomeworkItem> {
        let text = NonEmptyString::with_message(input.text.unwrap_or_default(), TEXT_REQUIRED)?;
        let now = self.clock.now();
        let session_date = match input.session_date.as_deref().filter(|value| !value.is_empty()) {
            Some(value) => parse_timestamp(value, "Invalid session date")?,
            None => now,
        };
        let due_date = parse_optional_date(input.due_date.as_deref(), "Invalid due date")?;
        let session_id = match input.session_id.as_deref().filter(|value| !value.is_empty()) {
            Some(value) => Some(self.owned_session(user_id, value).await?),
            None => None,
        };

        let item = HomeworkItem::new(
            user_id,
            NewHomeworkItem {
                session_id,
                text,
                session_date,
                due_date,
            },
            now,
        );

        self.repository.create(&item).await?;
        Ok(item)
    }

    /// Applies a partial update to one of the user's items.
    pub async fn update_homework(
        &self,
        user_id: UserId,
        homework_id: &str,
        input: UpdateHomeworkInput,
    ) -> AppResult<HomeworkItem> {
        let homework_id = parse_homework_id(homework_id)?;
        let mut item = self
            .repository
            .find(user_id, homework_id)
            .await?
            .ok_or_else(|| AppError::NotFound(HOMEWORK_NOT_FOUND.to_owned()))?;

        let patch = HomeworkPatch {
            text: input
                .text
                .map(|text| NonEmptyString::with_message(text, TEXT_REQUIRED))
                .transpose()?,
            completed: input.completed,
            due_date: input
                .due_date
                .map(|due_date| parse_optional_date(due_date.as_deref(), "Invalid due date"))
                .transpose()?,
        };

        item.apply(patch, self.clock.now());
        self.repository.update(&item).await?;
        Ok(item)
    }

    /// Deletes one of the user's items.
    pub async fn delete_homework(&self, user_id: UserId, homework_id: &str) -> AppResult<()> {
        let homework_id = parse_homework_id(homework_id)?;
        if !self.repository.delete(user_id, homework_id).await? {
            return Err(AppError::NotFound(HOMEWORK_NOT_FOUND.to_owned()));
        }

        Ok(())
    }

    async fn owned_session(&self, user_id: UserId, value: &str) -> AppResult<SessionId> {
        let not_found = || AppError::NotFound("Session not found".to_owned());
        let session_id = SessionId::parse(value).ok_or_else(not_found)?;
        self.sessions
            .find(user_id, session_id)
            .await?
            .map(|session| session.id)
            .ok_or_else(not_found)
    }
}

fn parse_homework_id(value: &str) -> AppResult<HomeworkId> {
    HomeworkId::parse(value).ok_or_else(|| AppError::NotFound(HOMEWORK_NOT_FOUND.to_owned()))
}
