use confide_application::{AuthenticatedSession, PlanChange, SignupInput};
use serde::{Deserialize, Serialize};

use super::common::UserResponse;

/// Incoming payload for email/password signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

impl From<SignupRequest> for SignupInput {
    fn from(request: SignupRequest) -> Self {
        Self {
            email: request.email.unwrap_or_default(),
            password: request.password.unwrap_or_default(),
            name: request.name,
        }
    }
}

/// Incoming payload for email/password login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Token and user returned by signup and login.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserResponse,
}

impl From<AuthenticatedSession> for AuthResponse {
    fn from(session: AuthenticatedSession) -> Self {
        Self {
            token: session.token,
            user: UserResponse::from(session.user),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FakePaymentRequest {
    #[serde(default)]
    pub plan: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct PlanChangeResponse {
    pub message: &'static str,
    pub user: UserResponse,
}

impl From<PlanChange> for PlanChangeResponse {
    fn from(change: PlanChange) -> Self {
        Self {
            message: change.message,
            user: UserResponse::from(change.user),
        }
    }
}
