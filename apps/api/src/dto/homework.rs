use chrono::{DateTime, Utc};
use confide_application::{CreateHomeworkInput, UpdateHomeworkInput};
use confide_domain::{HomeworkId, HomeworkItem, SessionId, UserId};
use serde::{Deserialize, Serialize};

use super::common::double_option;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateHomeworkRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub session_date: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

impl From<CreateHomeworkRequest> for CreateHomeworkInput {
    fn from(request: CreateHomeworkRequest) -> Self {
        Self {
            text: request.text,
            session_id: request.session_id,
            session_date: request.session_date,
            due_date: request.due_date,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateHomeworkRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    pub due_date: Option<Option<String>>,
}

impl From<UpdateHomeworkRequest> for UpdateHomeworkInput {
    fn from(request: UpdateHomeworkRequest) -> Self {
        Self {
            text: request.text,
            completed: request.completed,
            due_date: request.due_date,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeworkResponse {
    pub id: HomeworkId,
    pub user_id: UserId,
    pub session_id: Option<SessionId>,
    pub text: String,
    pub session_date: DateTime<Utc>,
    pub due_date: Option<DateTime<Utc>>,
    pub completed: bool,
    pub completed_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<HomeworkItem> for HomeworkResponse {
    fn from(item: HomeworkItem) -> Self {
        Self {
            id: item.id,
            user_id: item.user_id,
            session_id: item.session_id,
            text: item.text,
            session_date: item.session_date,
            due_date: item.due_date,
            completed: item.completed,
            completed_date: item.completed_date,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HomeworkListResponse {
    pub homework: Vec<HomeworkResponse>,
}

#[derive(Debug, Serialize)]
pub struct HomeworkEnvelope {
    pub homework: HomeworkResponse,
}
