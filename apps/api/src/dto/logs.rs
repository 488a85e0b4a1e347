use chrono::{DateTime, Utc};
use confide_application::{CreateLogInput, UpdateLogInput};
use confide_domain::{LogEntry, LogEntryId};
use serde::{Deserialize, Serialize};

use super::common::double_option;

#[derive(Debug, Deserialize)]
pub struct LogListQuery {
    pub view: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLogRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "type")]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub intensity: Option<i64>,
    #[serde(default)]
    pub added_to_prep: Option<bool>,
    #[serde(default)]
    pub prep_note: Option<String>,
    #[serde(default)]
    pub checked_off: Option<bool>,
}

impl From<CreateLogRequest> for CreateLogInput {
    fn from(request: CreateLogRequest) -> Self {
        Self {
            text: request.text,
            entry_type: request.entry_type,
            intensity: request.intensity,
            added_to_prep: request.added_to_prep,
            prep_note: request.prep_note,
            checked_off: request.checked_off,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLogRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default, rename = "type")]
    pub entry_type: Option<String>,
    #[serde(default)]
    pub intensity: Option<i64>,
    #[serde(default)]
    pub added_to_prep: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub prep_note: Option<Option<String>>,
    #[serde(default)]
    pub checked_off: Option<bool>,
}

impl From<UpdateLogRequest> for UpdateLogInput {
    fn from(request: UpdateLogRequest) -> Self {
        Self {
            text: request.text,
            entry_type: request.entry_type,
            intensity: request.intensity,
            added_to_prep: request.added_to_prep,
            prep_note: request.prep_note,
            checked_off: request.checked_off,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LogResponse {
    pub id: LogEntryId,
    pub text: String,
    #[serde(rename = "type")]
    pub entry_type: &'static str,
    pub intensity: i16,
    pub added_to_prep: bool,
    pub prep_note: Option<String>,
    pub checked_off: bool,
    pub is_archived: bool,
    pub archived_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<LogEntry> for LogResponse {
    fn from(entry: LogEntry) -> Self {
        Self {
            id: entry.id,
            text: entry.text,
            entry_type: entry.entry_type.as_str(),
            intensity: entry.intensity.value(),
            added_to_prep: entry.added_to_prep,
            prep_note: entry.prep_note,
            checked_off: entry.checked_off,
            is_archived: entry.archive_state.is_archived(),
            archived_at: entry.archive_state.archived_at(),
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LogsResponse {
    pub logs: Vec<LogResponse>,
}

#[derive(Debug, Serialize)]
pub struct LogEnvelope {
    pub log: LogResponse,
}

#[cfg(test)]
mod tests {
    use super::UpdateLogRequest;

    #[test]
    fn prep_note_distinguishes_null_from_absent() {
        let cleared: UpdateLogRequest =
            serde_json::from_str(r#"{"prepNote": null}"#).unwrap_or_default();
        assert_eq!(cleared.prep_note, Some(None));

        let untouched: UpdateLogRequest =
            serde_json::from_str(r#"{"checkedOff": true}"#).unwrap_or_default();
        assert_eq!(untouched.prep_note, None);
        assert_eq!(untouched.checked_off, Some(true));
    }
}
