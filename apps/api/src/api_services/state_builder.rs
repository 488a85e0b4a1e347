use std::sync::Arc;

use confide_application::{
    AccessTokenCodec, Clock, HomeworkRepository, HomeworkService, LogRepository, LogService,
    PasswordHasher, ProfileRepository, ProfileService, RateLimitService, SessionRepository,
    SessionService, UserRepository, UserService,
};
use confide_infrastructure::{
    InMemoryRateLimitRepository, InMemoryStore, PostgresHomeworkRepository, PostgresLogRepository,
    PostgresProfileRepository, PostgresSessionRepository, PostgresUserRepository,
};
use sqlx::PgPool;

use crate::state::AppState;

/// Adapters that do not depend on the storage backend.
pub struct StateDependencies {
    pub password_hasher: Arc<dyn PasswordHasher>,
    pub token_codec: Arc<dyn AccessTokenCodec>,
    pub clock: Arc<dyn Clock>,
}

struct RepositorySet {
    users: Arc<dyn UserRepository>,
    logs: Arc<dyn LogRepository>,
    sessions: Arc<dyn SessionRepository>,
    homework: Arc<dyn HomeworkRepository>,
    profiles: Arc<dyn ProfileRepository>,
}

impl RepositorySet {
    fn postgres(pool: &PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            logs: Arc::new(PostgresLogRepository::new(pool.clone())),
            sessions: Arc::new(PostgresSessionRepository::new(pool.clone())),
            homework: Arc::new(PostgresHomeworkRepository::new(pool.clone())),
            profiles: Arc::new(PostgresProfileRepository::new(pool.clone())),
        }
    }

    fn in_memory() -> Self {
        let store = Arc::new(InMemoryStore::new());
        Self {
            users: store.clone(),
            logs: store.clone(),
            sessions: store.clone(),
            homework: store.clone(),
            profiles: store,
        }
    }
}

/// Wires services onto PostgreSQL when a pool is given, otherwise onto a
/// fresh in-memory store.
pub fn build_app_state(postgres_pool: Option<PgPool>, dependencies: StateDependencies) -> AppState {
    let repositories = postgres_pool
        .as_ref()
        .map_or_else(RepositorySet::in_memory, RepositorySet::postgres);
    let StateDependencies {
        password_hasher,
        token_codec,
        clock,
    } = dependencies;

    AppState {
        user_service: UserService::new(
            repositories.users,
            password_hasher,
            token_codec,
            clock.clone(),
        ),
        log_service: LogService::new(repositories.logs, clock.clone()),
        session_service: SessionService::new(repositories.sessions.clone(), clock.clone()),
        homework_service: HomeworkService::new(
            repositories.homework,
            repositories.sessions,
            clock.clone(),
        ),
        profile_service: ProfileService::new(repositories.profiles, clock.clone()),
        rate_limit_service: RateLimitService::new(
            Arc::new(InMemoryRateLimitRepository::new()),
            clock.clone(),
        ),
        clock,
        postgres_pool,
    }
}
