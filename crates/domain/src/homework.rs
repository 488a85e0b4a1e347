//! Homework assigned during therapy sessions.

use chrono::{DateTime, Utc};
use confide_core::NonEmptyString;

use crate::{HomeworkId, SessionId, UserId};

/// A homework item owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HomeworkItem {
    /// Item identifier.
    pub id: HomeworkId,
    /// Owning user.
    pub user_id: UserId,
    /// Session the item was assigned in, if any.
    pub session_id: Option<SessionId>,
    /// What to do.
    pub text: String,
    /// Date of the assigning session.
    pub session_date: DateTime<Utc>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
    /// Whether the item is done.
    pub completed: bool,
    /// When the item was marked done.
    pub completed_date: Option<DateTime<Utc>>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl HomeworkItem {
    /// Creates an open homework item.
    #[must_use]
    pub fn new(user_id: UserId, input: NewHomeworkItem, now: DateTime<Utc>) -> Self {
        Self {
            id: HomeworkId::new(),
            user_id,
            session_id: input.session_id,
            text: input.text.into(),
            session_date: input.session_date,
            due_date: input.due_date,
            completed: false,
            completed_date: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a user edit; completing stamps `completed_date`, reopening clears it.
    pub fn apply(&mut self, patch: HomeworkPatch, now: DateTime<Utc>) {
        if let Some(text) = patch.text {
            self.text = text.into();
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
            self.completed_date = completed.then_some(now);
        }
        if let Some(due_date) = patch.due_date {
            self.due_date = due_date;
        }
        self.updated_at = now;
    }
}

/// Validated fields for a new homework item.
#[derive(Debug, Clone)]
pub struct NewHomeworkItem {
    /// Assigning session.
    pub session_id: Option<SessionId>,
    /// What to do.
    pub text: NonEmptyString,
    /// Date of the assigning session.
    pub session_date: DateTime<Utc>,
    /// Optional due date.
    pub due_date: Option<DateTime<Utc>>,
}

/// Validated partial update for a homework item.
#[derive(Debug, Clone, Default)]
pub struct HomeworkPatch {
    /// Replacement text.
    pub text: Option<NonEmptyString>,
    /// Replacement completion flag.
    pub completed: Option<bool>,
    /// `Some(None)` clears the due date.
    pub due_date: Option<Option<DateTime<Utc>>>,
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use confide_core::NonEmptyString;

    use super::{HomeworkItem, HomeworkPatch, NewHomeworkItem};
    use crate::UserId;

    fn sample_item() -> HomeworkItem {
        let now = Utc::now();
        HomeworkItem::new(
            UserId::new(),
            NewHomeworkItem {
                session_id: None,
                text: NonEmptyString::new("journal nightly").unwrap_or_else(|_| unreachable!()),
                session_date: now,
                due_date: Some(now + Duration::days(7)),
            },
            now,
        )
    }

    #[test]
    fn completing_stamps_and_reopening_clears_date() {
        let mut item = sample_item();
        let done_at = item.created_at + Duration::days(2);

        item.apply(
            HomeworkPatch {
                completed: Some(true),
                ..HomeworkPatch::default()
            },
            done_at,
        );
        assert_eq!(item.completed_date, Some(done_at));

        item.apply(
            HomeworkPatch {
                completed: Some(false),
                ..HomeworkPatch::default()
            },
            done_at + Duration::days(1),
        );
        assert!(!item.completed);
        assert_eq!(item.completed_date, None);
    }

    #[test]
    fn due_date_can_be_cleared() {
        let mut item = sample_item();
        item.apply(
            HomeworkPatch {
                due_date: Some(None),
                ..HomeworkPatch::default()
            },
            Utc::now(),
        );
        assert_eq!(item.due_date, None);
    }
}
