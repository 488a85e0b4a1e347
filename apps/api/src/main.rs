//! Confide API composition root.

#![forbid(unsafe_code)]

mod api_config;
mod api_router;
mod api_services;
mod dto;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use confide_core::AppError;
use confide_infrastructure::{Argon2PasswordHasher, JwtAccessTokenCodec, SystemClock};
use tokio::net::TcpListener;
use tracing::info;

use crate::api_config::{ApiConfig, StorageBackend, init_tracing};
use crate::api_services::{StateDependencies, build_app_state};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    init_tracing();

    let config = ApiConfig::load()?;

    let postgres_pool = match &config.storage_backend {
        StorageBackend::Postgres {
            database_url,
            max_connections,
        } => {
            let pool = api_services::connect(database_url, *max_connections).await?;
            api_services::run_migrations(&pool).await?;
            Some(pool)
        }
        StorageBackend::Memory => {
            info!("using in-memory storage; data is lost on restart");
            None
        }
    };

    if config.migrate_only {
        info!("database migrations applied successfully");
        return Ok(());
    }

    let app_state = build_app_state(
        postgres_pool,
        StateDependencies {
            password_hasher: Arc::new(Argon2PasswordHasher::new()),
            token_codec: Arc::new(JwtAccessTokenCodec::new(&config.jwt_secret)),
            clock: Arc::new(SystemClock),
        },
    );

    api_services::spawn_rate_limit_sweep(
        app_state.rate_limit_service.clone(),
        config.rate_limit_sweep_seconds,
    );

    let app = api_router::build_router(app_state, &config.cors_origins)?;

    let address = config.socket_address()?;
    let listener = TcpListener::bind(address)
        .await
        .map_err(|error| AppError::Internal(format!("failed to bind {address}: {error}")))?;

    info!(%address, "confide api listening");

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .map_err(|error| AppError::Internal(format!("server error: {error}")))
}
