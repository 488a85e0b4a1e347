use super::*;

impl UserService {
    /// Authenticates a user with email and password.
    ///
    /// Unknown emails and wrong passwords produce the same error.
    pub async fn login(&self, email: &str, password: &str) -> AppResult<AuthenticatedSession> {
        let (email, password) = require_credentials(email, password)?;
        let email = email.to_lowercase();

        let Some(user) = self.user_repository.find_by_email(&email).await? else {
            let _ = self.password_hasher.hash_password(password);
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
        };

        let password_valid = self
            .password_hasher
            .verify_password(password, &user.password_hash)?;

        if !password_valid {
            return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_owned()));
        }

        self.issue_session(user)
    }

    /// Resolves a bearer token to a live user.
    pub async fn authenticate(&self, token: &str) -> AppResult<UserRecord> {
        let claims = self.token_codec.verify(token)?;

        self.user_repository
            .find_by_id(claims.user_id)
            .await?
            .ok_or_else(|| AppError::Unauthorized(INVALID_TOKEN.to_owned()))
    }
}
