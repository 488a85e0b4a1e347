use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use confide_application::UserRecord;
use confide_domain::LogView;

use crate::dto::{
    CreateLogRequest, LogEnvelope, LogListQuery, LogResponse, LogsResponse, UpdateLogRequest,
};
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

pub async fn list_logs_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    Query(query): Query<LogListQuery>,
) -> ApiResult<Json<LogsResponse>> {
    let logs = state
        .log_service
        .list_logs(user.id, LogView::parse(query.view.as_deref()))
        .await?
        .into_iter()
        .map(LogResponse::from)
        .collect();

    Ok(Json(LogsResponse { logs }))
}

pub async fn create_log_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    ApiJson(payload): ApiJson<CreateLogRequest>,
) -> ApiResult<(StatusCode, Json<LogEnvelope>)> {
    let log = state.log_service.create_log(user.id, payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(LogEnvelope {
            log: LogResponse::from(log),
        }),
    ))
}

pub async fn update_log_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    Path(log_id): Path<String>,
    ApiJson(payload): ApiJson<UpdateLogRequest>,
) -> ApiResult<Json<LogEnvelope>> {
    let log = state
        .log_service
        .update_log(user.id, log_id.as_str(), payload.into())
        .await?;

    Ok(Json(LogEnvelope {
        log: LogResponse::from(log),
    }))
}

pub async fn delete_log_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    Path(log_id): Path<String>,
) -> ApiResult<StatusCode> {
    state.log_service.delete_log(user.id, log_id.as_str()).await?;

    Ok(StatusCode::NO_CONTENT)
}
