use std::sync::Arc;

use confide_application::{
    Clock, HomeworkService, LogService, ProfileService, RateLimitService, SessionService,
    UserService,
};
use sqlx::PgPool;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub log_service: LogService,
    pub session_service: SessionService,
    pub homework_service: HomeworkService,
    pub profile_service: ProfileService,
    pub rate_limit_service: RateLimitService,
    pub clock: Arc<dyn Clock>,
    /// Present only with the PostgreSQL backend.
    pub postgres_pool: Option<PgPool>,
}
