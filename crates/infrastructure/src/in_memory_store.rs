//! Process-local store implementing every persistence port.
//!
//! Used when no database is configured and by tests. All collections sit
//! behind one lock so cascades and session numbering stay atomic.

use std::collections::HashMap;

use tokio::sync::RwLock;

use confide_application::UserRecord;
use confide_domain::{
    HomeworkId, HomeworkItem, LogEntry, LogEntryId, SessionId, TherapySession, UserId,
    UserProfile,
};

mod homework;
mod logs;
mod profiles;
mod sessions;
mod users;

#[cfg(test)]
mod tests;

#[derive(Debug, Default)]
struct StoreState {
    users: HashMap<UserId, UserRecord>,
    logs: HashMap<LogEntryId, LogEntry>,
    sessions: HashMap<SessionId, TherapySession>,
    homework: HashMap<HomeworkId, HomeworkItem>,
    profiles: HashMap<UserId, UserProfile>,
}

/// In-memory implementation of the user, log, session, homework and profile
/// repositories.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    state: RwLock<StoreState>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
