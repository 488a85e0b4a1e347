use super::*;

impl UserService {
    /// Registers a new user and signs them in.
    pub async fn signup(&self, input: SignupInput) -> AppResult<AuthenticatedSession> {
        let (email, password) = canonical_signup_credentials(&input)?;

        if self
            .user_repository
            .find_by_email(email.as_str())
            .await?
            .is_some()
        {
            return Err(AppError::Conflict(
                "An account with this email already exists".to_owned(),
            ));
        }

        let password_hash = self.password_hasher.hash_password(password)?;
        let now = self.clock.now();
        let user = UserRecord {
            id: UserId::new(),
            email: email.into(),
            name: input
                .name
                .map(|name| name.trim().to_owned())
                .filter(|name| !name.is_empty()),
            password_hash,
            plan: Plan::Free,
            created_at: now,
            updated_at: now,
        };

        self.user_repository.create(user.clone()).await?;
        tracing::info!(user_id = %user.id, "user signed up");

        self.issue_session(user)
    }
}
