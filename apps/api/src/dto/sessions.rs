use chrono::{DateTime, Utc};
use confide_application::{
    CreateSessionInput, CreatedSession, SessionHomeworkInput, UpdateSessionInput,
};
use confide_domain::{SessionId, TherapySession};
use serde::{Deserialize, Serialize};

use super::homework::HomeworkResponse;

#[derive(Debug, Deserialize)]
pub struct CompletedQuery {
    pub completed: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionHomeworkRequest {
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub due_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSessionRequest {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub what_stood_out: Option<String>,
    #[serde(default)]
    pub prep_items: Option<Vec<String>>,
    #[serde(default)]
    pub post_mood: Option<i32>,
    #[serde(default)]
    pub mood_word: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
    #[serde(default)]
    pub homework_items: Option<Vec<SessionHomeworkRequest>>,
}

impl From<CreateSessionRequest> for CreateSessionInput {
    fn from(request: CreateSessionRequest) -> Self {
        Self {
            date: request.date,
            topics: request.topics,
            what_stood_out: request.what_stood_out,
            prep_items: request.prep_items,
            post_mood: request.post_mood,
            mood_word: request.mood_word,
            completed: request.completed,
            homework_items: request
                .homework_items
                .unwrap_or_default()
                .into_iter()
                .map(|item| SessionHomeworkInput {
                    text: item.text,
                    due_date: item.due_date,
                })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateSessionRequest {
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub topics: Option<Vec<String>>,
    #[serde(default)]
    pub prep_items: Option<Vec<String>>,
    #[serde(default)]
    pub what_stood_out: Option<String>,
    #[serde(default)]
    pub post_mood: Option<i32>,
    #[serde(default)]
    pub mood_word: Option<String>,
    #[serde(default)]
    pub completed: Option<bool>,
}

impl From<UpdateSessionRequest> for UpdateSessionInput {
    fn from(request: UpdateSessionRequest) -> Self {
        Self {
            date: request.date,
            topics: request.topics,
            prep_items: request.prep_items,
            what_stood_out: request.what_stood_out,
            post_mood: request.post_mood,
            mood_word: request.mood_word,
            completed: request.completed,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub id: SessionId,
    pub date: DateTime<Utc>,
    pub number: i32,
    pub topics: Vec<String>,
    pub what_stood_out: String,
    pub prep_items: Vec<String>,
    pub post_mood: i32,
    pub mood_word: Option<String>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<TherapySession> for SessionResponse {
    fn from(session: TherapySession) -> Self {
        Self {
            id: session.id,
            date: session.date,
            number: session.number,
            topics: session.topics,
            what_stood_out: session.what_stood_out,
            prep_items: session.prep_items,
            post_mood: session.post_mood,
            mood_word: session.mood_word,
            completed: session.completed,
            created_at: session.created_at,
            updated_at: session.updated_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionsResponse {
    pub sessions: Vec<SessionResponse>,
}

#[derive(Debug, Serialize)]
pub struct SessionEnvelope {
    pub session: SessionResponse,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedSessionResponse {
    pub session: SessionResponse,
    pub homework_items: Vec<HomeworkResponse>,
}

impl From<CreatedSession> for CreatedSessionResponse {
    fn from(created: CreatedSession) -> Self {
        Self {
            session: SessionResponse::from(created.session),
            homework_items: created
                .homework_items
                .into_iter()
                .map(HomeworkResponse::from)
                .collect(),
        }
    }
}
