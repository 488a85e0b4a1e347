use axum::Json;
use axum::extract::State;

use crate::dto::CountResponse;
use crate::error::ApiResult;
use crate::state::AppState;

pub async fn user_count_handler(State(state): State<AppState>) -> ApiResult<Json<CountResponse>> {
    let count = state.user_service.count_users().await?;

    Ok(Json(CountResponse { count }))
}
