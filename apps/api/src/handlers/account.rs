use axum::extract::{Extension, State};
use axum::http::StatusCode;
use confide_application::UserRecord;
use tracing::info;

use crate::error::ApiResult;
use crate::state::AppState;

pub async fn delete_account_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
) -> ApiResult<StatusCode> {
    state.user_service.delete_account(user.id).await?;
    info!(user_id = %user.id, "account deleted");

    Ok(StatusCode::NO_CONTENT)
}
