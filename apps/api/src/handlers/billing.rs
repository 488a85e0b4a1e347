use axum::Json;
use axum::extract::{Extension, State};
use confide_application::UserRecord;

use crate::dto::{FakePaymentRequest, PlanChangeResponse};
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

pub async fn fake_payment_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    ApiJson(payload): ApiJson<FakePaymentRequest>,
) -> ApiResult<Json<PlanChangeResponse>> {
    let change = state
        .user_service
        .change_plan(user.id, payload.plan.as_deref().unwrap_or_default())
        .await?;

    Ok(Json(PlanChangeResponse::from(change)))
}
