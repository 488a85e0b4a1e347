//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod argon2_password_hasher;
mod in_memory_rate_limit_repository;
mod in_memory_store;
mod jwt_token_codec;
mod postgres_homework_repository;
mod postgres_log_repository;
mod postgres_profile_repository;
mod postgres_session_repository;
mod postgres_user_repository;
mod system_clock;

pub use argon2_password_hasher::Argon2PasswordHasher;
pub use in_memory_rate_limit_repository::InMemoryRateLimitRepository;
pub use in_memory_store::InMemoryStore;
pub use jwt_token_codec::{ACCESS_TOKEN_TTL_DAYS, JwtAccessTokenCodec};
pub use postgres_homework_repository::PostgresHomeworkRepository;
pub use postgres_log_repository::PostgresLogRepository;
pub use postgres_profile_repository::PostgresProfileRepository;
pub use postgres_session_repository::PostgresSessionRepository;
pub use postgres_user_repository::PostgresUserRepository;
pub use system_clock::SystemClock;
