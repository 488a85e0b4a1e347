//! PostgreSQL-backed user repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use confide_application::{UserRecord, UserRepository};
use confide_core::{AppError, AppResult};
use confide_domain::{Plan, UserId};

/// PostgreSQL implementation of the user repository port.
#[derive(Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct UserRow {
    id: uuid::Uuid,
    email: String,
    name: Option<String>,
    password_hash: String,
    plan: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for UserRecord {
    type Error = AppError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let plan = Plan::parse(&row.plan).map_err(|_| {
            AppError::Internal(format!("user '{}' has unknown plan '{}'", row.id, row.plan))
        })?;

        Ok(Self {
            id: UserId::from_uuid(row.id),
            email: row.email,
            name: row.name,
            password_hash: row.password_hash,
            plan,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

const USER_COLUMNS: &str = "id, email, name, password_hash, plan, created_at, updated_at";

mod account;
mod lookup;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        self.find_by_email_impl(email).await
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        self.find_by_id_impl(user_id).await
    }

    async fn create(&self, user: UserRecord) -> AppResult<()> {
        self.create_impl(user).await
    }

    async fn update_plan(
        &self,
        user_id: UserId,
        plan: Plan,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<UserRecord>> {
        self.update_plan_impl(user_id, plan, updated_at).await
    }

    async fn delete(&self, user_id: UserId) -> AppResult<bool> {
        self.delete_impl(user_id).await
    }

    async fn count(&self) -> AppResult<i64> {
        self.count_impl().await
    }
}

fn email_conflict_or_internal(error: sqlx::Error, operation: &str) -> AppError {
    if let sqlx::Error::Database(ref database_error) = error
        && database_error.code().as_deref() == Some("23505")
    {
        return AppError::Conflict("An account with this email already exists".to_owned());
    }

    AppError::Internal(format!("failed to {operation}: {error}"))
}
