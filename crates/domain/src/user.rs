//! User domain types and validation rules.

use std::fmt::{Display, Formatter};

use confide_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Minimum accepted password length.
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Validated, canonical (trimmed and lowercased) email address.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Creates a canonical email address.
    ///
    /// Only structural checks are applied: non-empty, a single `@`, and a
    /// non-empty local part and domain.
    pub fn new(value: impl AsRef<str>) -> AppResult<Self> {
        let canonical = value.as_ref().trim().to_lowercase();

        if canonical.is_empty() {
            return Err(AppError::Validation(
                "Email and password are required".to_owned(),
            ));
        }

        match canonical.split_once('@') {
            Some((local, domain))
                if !local.is_empty() && !domain.is_empty() && !domain.contains('@') =>
            {
                Ok(Self(canonical))
            }
            _ => Err(AppError::Validation("Email address is invalid".to_owned())),
        }
    }

    /// Returns the canonical email string.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<EmailAddress> for String {
    fn from(value: EmailAddress) -> Self {
        value.0
    }
}

/// Validates a plaintext (already trimmed) password for signup.
pub fn validate_password(password: &str) -> AppResult<()> {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(AppError::Validation(format!(
            "Password must be at least {PASSWORD_MIN_LENGTH} characters"
        )));
    }

    Ok(())
}

/// Subscription plan attached to an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Plan {
    /// Default plan for new accounts.
    #[default]
    Free,
    /// Paid plan unlocked through the billing endpoint.
    Pro,
}

impl Plan {
    /// Returns the stable storage and wire value.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Pro => "PRO",
        }
    }

    /// Parses a plan from its wire value.
    pub fn parse(value: &str) -> AppResult<Self> {
        match value {
            "FREE" => Ok(Self::Free),
            "PRO" => Ok(Self::Pro),
            _ => Err(AppError::Validation("Plan must be FREE or PRO".to_owned())),
        }
    }
}

impl Display for Plan {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}
