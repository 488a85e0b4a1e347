//! User management ports and application service.
//!
//! Owns signup, password login, bearer token verification, plan changes and
//! account removal.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use confide_core::{AppError, AppResult};
use confide_domain::{EmailAddress, Plan, UserId, validate_password};

use crate::Clock;

mod account;
mod login;
mod registration;


// ---------------------------------------------------------------------------
// Ports
// ---------------------------------------------------------------------------

/// User record returned by repository queries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    /// Unique user identifier.
    pub id: UserId,
    /// Canonical email address.
    pub email: String,
    /// Optional display name given at signup.
    pub name: Option<String>,
    /// Argon2id password hash.
    pub password_hash: String,
    /// Subscription plan.
    pub plan: Plan,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Last modification time.
    pub updated_at: DateTime<Utc>,
}

/// Repository port for user persistence.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by canonical email.
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>>;

    /// Finds a user by their unique identifier.
    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>>;

    /// Stores a new user. Fails with `Conflict` when the email is taken.
    async fn create(&self, user: UserRecord) -> AppResult<()>;

    /// Sets the plan of a user and returns the updated record.
    async fn update_plan(
        &self,
        user_id: UserId,
        plan: Plan,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<UserRecord>>;

    /// Deletes a user and everything the user owns. Returns whether a row was removed.
    async fn delete(&self, user_id: UserId) -> AppResult<bool>;

    /// Counts all registered users.
    async fn count(&self) -> AppResult<i64>;
}

/// Port for password hashing operations. Keeps application free of direct
/// cryptographic library coupling.
pub trait PasswordHasher: Send + Sync {
    /// Hashes a plaintext password.
    fn hash_password(&self, password: &str) -> AppResult<String>;

    /// Verifies a plaintext password against a stored hash.
    fn verify_password(&self, password: &str, hash: &str) -> AppResult<bool>;
}

/// Identity carried inside an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Subject user.
    pub user_id: UserId,
    /// Email at the time the token was issued.
    pub email: String,
}

/// Port for issuing and verifying bearer access tokens.
pub trait AccessTokenCodec: Send + Sync {
    /// Issues a signed token for a user.
    fn issue(&self, user_id: UserId, email: &str, issued_at: DateTime<Utc>) -> AppResult<String>;

    /// Verifies a token. Invalid or expired tokens yield `Unauthorized`.
    fn verify(&self, token: &str) -> AppResult<TokenClaims>;
}

// ---------------------------------------------------------------------------
// Request and response types
// ---------------------------------------------------------------------------

/// Parameters for signup, as received from the client.
#[derive(Debug, Clone, Default)]
pub struct SignupInput {
    /// Raw email address.
    pub email: String,
    /// Raw password; surrounding whitespace is ignored.
    pub password: String,
    /// Optional display name.
    pub name: Option<String>,
}

/// A freshly authenticated user with its bearer token.
#[derive(Debug, Clone)]
pub struct AuthenticatedSession {
    /// Signed access token.
    pub token: String,
    /// The authenticated user.
    pub user: UserRecord,
}

/// Result of a plan change.
#[derive(Debug, Clone)]
pub struct PlanChange {
    /// Message for the client.
    pub message: &'static str,
    /// The updated user.
    pub user: UserRecord,
}

const CREDENTIALS_REQUIRED: &str = "Email and password are required";
const INVALID_CREDENTIALS: &str = "Invalid email or password";
const INVALID_TOKEN: &str = "Invalid token";

// ---------------------------------------------------------------------------
// Service
// ---------------------------------------------------------------------------

/// Application service for user authentication and account management.
#[derive(Clone)]
pub struct UserService {
    user_repository: Arc<dyn UserRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
    token_codec: Arc<dyn AccessTokenCodec>,
    clock: Arc<dyn Clock>,
}

impl UserService {
    /// Creates a new user service.
    #[must_use]
    pub fn new(
        user_repository: Arc<dyn UserRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
        token_codec: Arc<dyn AccessTokenCodec>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            user_repository,
            password_hasher,
            token_codec,
            clock,
        }
    }

    fn issue_session(&self, user: UserRecord) -> AppResult<AuthenticatedSession> {
        let token = self
            .token_codec
            .issue(user.id, &user.email, self.clock.now())?;
        Ok(AuthenticatedSession { token, user })
    }
}

fn require_credentials<'a>(email: &'a str, password: &'a str) -> AppResult<(&'a str, &'a str)> {
    let email = email.trim();
    let password = password.trim();
    if email.is_empty() || password.is_empty() {
        return Err(AppError::Validation(CREDENTIALS_REQUIRED.to_owned()));
    }

    Ok((email, password))
}

fn canonical_signup_credentials(input: &SignupInput) -> AppResult<(EmailAddress, &str)> {
    let (email, password) = require_credentials(&input.email, &input.password)?;
    let email = EmailAddress::new(email)?;
    validate_password(password)?;
    Ok((email, password))
}
