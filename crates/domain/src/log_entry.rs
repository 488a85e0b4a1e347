//! Journal log entries and their archival lifecycle.

use chrono::{DateTime, Duration, Utc};
use confide_core::{AppError, AppResult, NonEmptyString};
use serde::{Deserialize, Serialize};

use crate::{LogEntryId, UserId};

/// Active entries older than this many days are archived by the sweep.
pub const ARCHIVE_AFTER_DAYS: i64 = 14;

/// Entries created strictly before the returned instant are stale.
#[must_use]
pub fn archive_cutoff(now: DateTime<Utc>) -> DateTime<Utc> {
    now - Duration::days(ARCHIVE_AFTER_DAYS)
}

/// Kind of moment captured by a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogEntryType {
    /// Something that set off a strong reaction.
    Trigger,
    /// A notable event.
    Event,
    /// A recurring or intrusive thought.
    Thought,
    /// Something that went well.
    Win,
}

impl LogEntryType {
    /// Returns the stable storage and wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Trigger => "trigger",
            Self::Event => "event",
            Self::Thought => "thought",
            Self::Win => "win",
        }
    }

    /// Parses an entry type from its wire value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "trigger" => Ok(Self::Trigger),
            "event" => Ok(Self::Event),
            "thought" => Ok(Self::Thought),
            "win" => Ok(Self::Win),
            _ => Err(AppError::Validation("Invalid log type".to_owned())),
        }
    }
}

/// Felt intensity on a one to five scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Intensity(i16);

impl Intensity {
    /// Validates an intensity value.
    pub fn new(value: i64) -> AppResult<Self> {
        if !(1..=5).contains(&value) {
            return Err(AppError::Validation(
                "Intensity must be between 1 and 5".to_owned(),
            ));
        }

        i16::try_from(value)
            .map(Self)
            .map_err(|_| AppError::Validation("Intensity must be between 1 and 5".to_owned()))
    }

    /// Returns the numeric value.
    #[must_use]
    pub fn value(self) -> i16 {
        self.0
    }
}

/// Archival state of an entry.
///
/// Holding the timestamp inside the archived variant keeps the flag and the
/// timestamp from disagreeing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArchiveState {
    /// Visible in the default view.
    Active,
    /// Moved out of the default view by the sweep.
    Archived {
        /// When the sweep archived the entry.
        archived_at: DateTime<Utc>,
    },
}

impl ArchiveState {
    /// Rebuilds the state from its persisted columns.
    ///
    /// A timestamp wins over a stale flag, so a row can never surface as
    /// archived without an archival time.
    #[must_use]
    pub fn from_columns(archived_at: Option<DateTime<Utc>>) -> Self {
        match archived_at {
            Some(archived_at) => Self::Archived { archived_at },
            None => Self::Active,
        }
    }

    /// Returns whether the entry has been archived.
    #[must_use]
    pub fn is_archived(self) -> bool {
        matches!(self, Self::Archived { .. })
    }

    /// Returns the archival time, if archived.
    #[must_use]
    pub fn archived_at(self) -> Option<DateTime<Utc>> {
        match self {
            Self::Active => None,
            Self::Archived { archived_at } => Some(archived_at),
        }
    }
}

/// Which slice of a user's log to list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogView {
    /// Entries that are not archived.
    #[default]
    Active,
    /// Archived entries only.
    Archive,
    /// Every entry.
    All,
}

impl LogView {
    /// Parses the `view` query parameter; anything unrecognised means active.
    #[must_use]
    pub fn parse(value: Option<&str>) -> Self {
        match value {
            Some("archive") => Self::Archive,
            Some("all") => Self::All,
            _ => Self::Active,
        }
    }

    /// Returns whether an entry in `state` belongs to this view.
    #[must_use]
    pub fn includes(self, state: ArchiveState) -> bool {
        match self {
            Self::Active => !state.is_archived(),
            Self::Archive => state.is_archived(),
            Self::All => true,
        }
    }
}

/// A journal entry owned by a single user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    /// Entry identifier.
    pub id: LogEntryId,
    /// Owning user.
    pub user_id: UserId,
    /// Free text, never blank.
    pub text: String,
    /// Kind of moment.
    pub entry_type: LogEntryType,
    /// Felt intensity.
    pub intensity: Intensity,
    /// Whether the entry was pulled into session prep.
    pub added_to_prep: bool,
    /// Note attached while preparing for a session.
    pub prep_note: Option<String>,
    /// Whether the entry was discussed and ticked off.
    pub checked_off: bool,
    /// Archival state, changed only by the sweep.
    pub archive_state: ArchiveState,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

impl LogEntry {
    /// Creates a new active entry.
    #[must_use]
    pub fn new(user_id: UserId, input: NewLogEntry, now: DateTime<Utc>) -> Self {
        Self {
            id: LogEntryId::new(),
            user_id,
            text: input.text.into(),
            entry_type: input.entry_type,
            intensity: input.intensity,
            added_to_prep: input.added_to_prep,
            prep_note: input.prep_note,
            checked_off: input.checked_off,
            archive_state: ArchiveState::Active,
            created_at: now,
            updated_at: now,
        }
    }

    /// Returns whether the sweep should archive this entry for `cutoff`.
    #[must_use]
    pub fn is_stale(&self, cutoff: DateTime<Utc>) -> bool {
        !self.archive_state.is_archived() && self.created_at < cutoff
    }

    /// Archives an active entry; archived entries keep their original time.
    pub fn archive(&mut self, now: DateTime<Utc>) {
        if !self.archive_state.is_archived() {
            self.archive_state = ArchiveState::Archived { archived_at: now };
        }
    }

    /// Applies a user edit. Archival state is not editable.
    pub fn apply(&mut self, patch: LogEntryPatch, now: DateTime<Utc>) {
        if let Some(text) = patch.text {
            self.text = text.into();
        }
        if let Some(entry_type) = patch.entry_type {
            self.entry_type = entry_type;
        }
        if let Some(intensity) = patch.intensity {
            self.intensity = intensity;
        }
        if let Some(added_to_prep) = patch.added_to_prep {
            self.added_to_prep = added_to_prep;
        }
        if let Some(prep_note) = patch.prep_note {
            self.prep_note = prep_note;
        }
        if let Some(checked_off) = patch.checked_off {
            self.checked_off = checked_off;
        }
        self.updated_at = now;
    }
}

/// Validated fields for a new entry.
#[derive(Debug, Clone)]
pub struct NewLogEntry {
    /// Entry text.
    pub text: NonEmptyString,
    /// Kind of moment.
    pub entry_type: LogEntryType,
    /// Felt intensity.
    pub intensity: Intensity,
    /// Pulled into session prep.
    pub added_to_prep: bool,
    /// Optional prep note, blank notes are stored as `None`.
    pub prep_note: Option<String>,
    /// Ticked off.
    pub checked_off: bool,
}

/// Validated partial update for an entry.
#[derive(Debug, Clone, Default)]
pub struct LogEntryPatch {
    /// Replacement text.
    pub text: Option<NonEmptyString>,
    /// Replacement type.
    pub entry_type: Option<LogEntryType>,
    /// Replacement intensity.
    pub intensity: Option<Intensity>,
    /// Replacement prep flag.
    pub added_to_prep: Option<bool>,
    /// `Some(None)` clears the note.
    pub prep_note: Option<Option<String>>,
    /// Replacement check-off flag.
    pub checked_off: Option<bool>,
}
