//! Therapy session records.

use chrono::{DateTime, Utc};

use crate::{SessionId, UserId};

/// Mood recorded when the client does not provide one.
pub const DEFAULT_POST_MOOD: i32 = 5;

/// A therapy session written up by the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TherapySession {
    /// Session identifier.
    pub id: SessionId,
    /// Owning user.
    pub user_id: UserId,
    /// Per-user running number, starting at one.
    pub number: i32,
    /// When the session took place.
    pub date: DateTime<Utc>,
    /// Topics covered.
    pub topics: Vec<String>,
    /// Free-form reflection.
    pub what_stood_out: String,
    /// Items prepared ahead of the session.
    pub prep_items: Vec<String>,
    /// Mood after the session.
    pub post_mood: i32,
    /// One word describing the mood.
    pub mood_word: Option<String>,
    /// Whether the session already happened.
    pub completed: bool,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl TherapySession {
    /// Creates a session record with the next running `number`.
    #[must_use]
    pub fn new(user_id: UserId, number: i32, input: NewTherapySession, now: DateTime<Utc>) -> Self {
        Self {
            id: SessionId::new(),
            user_id,
            number,
            date: input.date,
            topics: input.topics,
            what_stood_out: input.what_stood_out,
            prep_items: input.prep_items,
            post_mood: input.post_mood,
            mood_word: input.mood_word,
            completed: input.completed,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies a user edit.
    pub fn apply(&mut self, patch: SessionPatch, now: DateTime<Utc>) {
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(topics) = patch.topics {
            self.topics = drop_blank(topics);
        }
        if let Some(prep_items) = patch.prep_items {
            self.prep_items = drop_blank(prep_items);
        }
        if let Some(what_stood_out) = patch.what_stood_out {
            self.what_stood_out = what_stood_out.trim().to_owned();
        }
        if let Some(post_mood) = patch.post_mood {
            self.post_mood = post_mood;
        }
        if let Some(mood_word) = patch.mood_word {
            self.mood_word = Some(mood_word.trim().to_owned());
        }
        if let Some(completed) = patch.completed {
            self.completed = completed;
        }
        self.updated_at = now;
    }
}

/// Fields for a new session, already defaulted.
#[derive(Debug, Clone)]
pub struct NewTherapySession {
    /// When the session took place.
    pub date: DateTime<Utc>,
    /// Topics covered.
    pub topics: Vec<String>,
    /// Free-form reflection.
    pub what_stood_out: String,
    /// Items prepared ahead of the session.
    pub prep_items: Vec<String>,
    /// Mood after the session.
    pub post_mood: i32,
    /// One word describing the mood.
    pub mood_word: Option<String>,
    /// Whether the session already happened.
    pub completed: bool,
}

impl NewTherapySession {
    /// Normalises raw client lists and strings into a new session.
    #[must_use]
    pub fn normalized(
        date: DateTime<Utc>,
        topics: Vec<String>,
        what_stood_out: Option<String>,
        prep_items: Vec<String>,
        post_mood: Option<i32>,
        mood_word: Option<String>,
        completed: Option<bool>,
    ) -> Self {
        Self {
            date,
            topics: drop_blank(topics),
            what_stood_out: what_stood_out
                .map(|value| value.trim().to_owned())
                .unwrap_or_default(),
            prep_items: drop_blank(prep_items),
            post_mood: post_mood.unwrap_or(DEFAULT_POST_MOOD),
            mood_word: mood_word
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty()),
            completed: completed.unwrap_or(true),
        }
    }
}

/// Validated partial update for a session.
#[derive(Debug, Clone, Default)]
pub struct SessionPatch {
    /// Replacement date.
    pub date: Option<DateTime<Utc>>,
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

fn drop_blank(values: Vec<String>) -> Vec<String> {
    values
        .into_iter()
        .filter(|value| !value.is_empty())
        .collect()
}
