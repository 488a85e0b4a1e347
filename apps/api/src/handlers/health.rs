use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use sqlx::PgPool;

use crate::dto::HealthResponse;
use crate::state::AppState;

pub async fn health_handler(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    let timestamp = state.clock.now();

    let Some(pool) = state.postgres_pool.as_ref() else {
        return (
            StatusCode::OK,
            Json(HealthResponse {
                ok: true,
                timestamp,
                database: "not_configured",
                error: None,
            }),
        );
    };

    match check_postgres(pool).await {
        Ok(()) => (
            StatusCode::OK,
            Json(HealthResponse {
                ok: true,
                timestamp,
                database: "up",
                error: None,
            }),
        ),
        Err(error) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                ok: false,
                timestamp,
                database: "down",
                error: Some(error),
            }),
        ),
    }
}

async fn check_postgres(pool: &PgPool) -> Result<(), String> {
    sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(pool)
        .await
        .map(|_| ())
        .map_err(|error| format!("postgres check failed: {error}"))
}
