use axum::Json;
use axum::extract::{Extension, Path, Query, State};
use axum::http::StatusCode;
use confide_application::UserRecord;

use crate::dto::{
    CompletedQuery, CreateHomeworkRequest, HomeworkEnvelope, HomeworkListResponse,
    HomeworkResponse, UpdateHomeworkRequest, parse_completed,
};
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

pub async fn list_homework_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    Query(query): Query<CompletedQuery>,
) -> ApiResult<Json<HomeworkListResponse>> {
    let homework = state
        .homework_service
        .list_homework(user.id, parse_completed(query.completed.as_deref()))
        .await?
        .into_iter()
        .map(HomeworkResponse::from)
        .collect();

    Ok(Json(HomeworkListResponse { homework }))
}

pub async fn create_homework_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    ApiJson(payload): ApiJson<CreateHomeworkRequest>,
) -> ApiResult<(StatusCode, Json<HomeworkEnvelope>)> {
    let item = state
        .homework_service
        .create_homework(user.id, payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(HomeworkEnvelope {
            homework: HomeworkResponse::from(item),
        }),
    ))
}

pub async fn update_homework_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    Path(homework_id): Path<String>,
    ApiJson(payload): ApiJson<UpdateHomeworkRequest>,
) -> ApiResult<Json<HomeworkEnvelope>> {
    let item = state
        .homework_service
        .update_homework(user.id, homework_id.as_str(), payload.into())
        .await?;

    Ok(Json(HomeworkEnvelope {
        homework: HomeworkResponse::from(item),
    }))
}

pub async fn delete_homework_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    Path(homework_id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .homework_service
        .delete_homework(user.id, homework_id.as_str())
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
