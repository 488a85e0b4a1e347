use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use confide_application::UserRecord;

use crate::dto::{
    CompletedQuery, CreateSessionRequest, CreatedSessionResponse, SessionEnvelope,
    SessionResponse, SessionsResponse, UpdateSessionRequest, parse_completed,
};
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

pub async fn list_sessions_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    Query(query): Query<CompletedQuery>,
) -> ApiResult<Json<SessionsResponse>> {
    let sessions = state
        .session_service
        .list_sessions(user.id, parse_completed(query.completed.as_deref()))
        .await?
        .into_iter()
        .map(SessionResponse::from)
        .collect();

    Ok(Json(SessionsResponse { sessions }))
}

pub async fn create_session_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    ApiJson(payload): ApiJson<CreateSessionRequest>,
) -> ApiResult<(StatusCode, Json<CreatedSessionResponse>)> {
    let created = state
        .session_service
        .create_session(user.id, payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreatedSessionResponse::from(created)),
    ))
}

pub async fn update_session_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    Path(session_id): Path<String>,
    ApiJson(payload): ApiJson<UpdateSessionRequest>,
) -> ApiResult<Json<SessionEnvelope>> {
    let session = state
        .session_service
        .update_session(user.id, session_id.as_str(), payload.into())
        .await?;

    Ok(Json(SessionEnvelope {
        session: SessionResponse::from(session),
    }))
}

pub async fn delete_session_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    Path(session_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .session_service
        .delete_session(user.id, session_id.as_str())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
