//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod homework;
mod ids;
mod log_entry;
mod profile;
mod rate_limit;
mod session;
mod user;

pub use homework::{HomeworkItem, HomeworkPatch, NewHomeworkItem};
pub use ids::{HomeworkId, LogEntryId, ProfileId, SessionId, UserId};
pub use log_entry::{
    ARCHIVE_AFTER_DAYS, ArchiveState, Intensity, LogEntry, LogEntryPatch, LogEntryType, LogView,
    NewLogEntry, archive_cutoff,
};
pub use profile::{DEFAULT_DISPLAY_NAME, ProfilePatch, UserProfile};
pub use rate_limit::{RateLimitDecision, RateWindow};
pub use session::{DEFAULT_POST_MOOD, NewTherapySession, SessionPatch, TherapySession};
pub use user::{EmailAddress, PASSWORD_MIN_LENGTH, Plan, validate_password};
