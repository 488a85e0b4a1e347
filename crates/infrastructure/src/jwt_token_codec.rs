//! HS256 JSON Web Token codec for bearer access tokens.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use confide_application::{AccessTokenCodec, TokenClaims};
use confide_core::{AppError, AppResult};
use confide_domain::UserId;

/// Lifetime of an issued access token.
pub const ACCESS_TOKEN_TTL_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccessClaims {
    user_id: Uuid,
    email: String,
    iat: i64,
    exp: i64,
}

/// Access token codec signing with a shared HMAC secret.
#[derive(Clone)]
pub struct JwtAccessTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl JwtAccessTokenCodec {
    /// Creates a codec for `secret` with the default token lifetime.
    #[must_use]
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
            ttl: Duration::days(ACCESS_TOKEN_TTL_DAYS),
        }
    }
}

impl AccessTokenCodec for JwtAccessTokenCodec {
    fn issue(&self, user_id: UserId, email: &str, issued_at: DateTime<Utc>) -> AppResult<String> {
        let claims = AccessClaims {
            user_id: user_id.as_uuid(),
            email: email.to_owned(),
            iat: issued_at.timestamp(),
            exp: (issued_at + self.ttl).timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|error| AppError::Internal(format!("failed to sign access token: {error}")))
    }

    fn verify(&self, token: &str) -> AppResult<TokenClaims> {
        let data = decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|error| {
                tracing::debug!(%error, "rejected access token");
                AppError::Unauthorized("Invalid token".to_owned())
            })?;

        Ok(TokenClaims {
            user_id: UserId::from_uuid(data.claims.user_id),
            email: data.claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use confide_application::AccessTokenCodec;
    use confide_core::AppError;
    use confide_domain::UserId;

    use super::JwtAccessTokenCodec;

    const SECRET: &str = "test-secret-with-enough-length";

    #[test]
    fn issued_tokens_verify_to_the_same_identity() {
        let codec = JwtAccessTokenCodec::new(SECRET);
        let user_id = UserId::new();

        let token = codec
            .issue(user_id, "sam@example.com", Utc::now())
            .unwrap_or_default();
        let claims = codec.verify(&token);

        assert!(claims.is_ok());
        let claims = claims.unwrap_or_else(|_| unreachable!());
        assert_eq!(claims.user_id, user_id);
        assert_eq!(claims.email, "sam@example.com");
    }

    #[test]
    fn rejects_tokens_signed_with_another_secret() {
        let issuer = JwtAccessTokenCodec::new("another-secret-entirely");
        let token = issuer
            .issue(UserId::new(), "sam@example.com", Utc::now())
            .unwrap_or_default();

        let result = JwtAccessTokenCodec::new(SECRET).verify(&token);

        assert!(matches!(result, Err(AppError::Unauthorized(message)) if message == "Invalid token"));
    }

    #[test]
    fn rejects_expired_tokens() {
        let codec = JwtAccessTokenCodec::new(SECRET);
        let token = codec
            .issue(UserId::new(), "sam@example.com", Utc::now() - Duration::days(8))
            .unwrap_or_default();

        assert!(codec.verify(&token).is_err());
    }

    #[test]
    fn rejects_garbage() {
        let codec = JwtAccessTokenCodec::new(SECRET);
        assert!(codec.verify("not.a.token").is_err());
    }
}
