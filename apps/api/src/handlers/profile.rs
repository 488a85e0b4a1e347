use axum::Json;
use axum::extract::{Extension, State};
use confide_application::UserRecord;

use crate::dto::{ProfileEnvelope, ProfileResponse, UpdateProfileRequest};
use crate::error::{ApiJson, ApiResult};
use crate::state::AppState;

pub async fn get_profile_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
) -> ApiResult<Json<ProfileEnvelope>> {
    let profile = state
        .profile_service
        .get_or_create(user.id, user.name.as_deref())
        .await?;

    Ok(Json(ProfileEnvelope {
        profile: ProfileResponse::from(profile),
    }))
}

pub async fn update_profile_handler(
    State(state): State<AppState>,
    Extension(user): Extension<UserRecord>,
    ApiJson(payload): ApiJson<UpdateProfileRequest>,
) -> ApiResult<Json<ProfileEnvelope>> {
    let profile = state
        .profile_service
        .update_profile(user.id, user.name.as_deref(), payload.into())
        .await?;

    Ok(Json(ProfileEnvelope {
        profile: ProfileResponse::from(profile),
    }))
}
