use axum::Json;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use confide_application::UserRecord;

use crate::dto::{AuthResponse, LoginRequest, SignupRequest, UserEnvelope, UserResponse};
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

pub async fn signup_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<SignupRequest>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let session = state.user_service.signup(payload.into()).await?;

    Ok((StatusCode::CREATED, Json(AuthResponse::from(session))))
}

pub async fn login_handler(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let session = state
        .user_service
        .login(
            payload.email.as_deref().unwrap_or_default(),
            payload.password.as_deref().unwrap_or_default(),
        )
        .await?;

    Ok(Json(AuthResponse::from(session)))
}

pub async fn me_handler(Extension(user): Extension<UserRecord>) -> Json<UserEnvelope> {
    Json(UserEnvelope {
        user: UserResponse::from(user),
    })
}
