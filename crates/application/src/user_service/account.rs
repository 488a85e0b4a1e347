use super::*;

impl UserService {
    /// Switches the plan of a user. No payment is taken.
    pub async fn change_plan(&self, user_id: UserId, plan: &str) -> AppResult<PlanChange> {
        let plan = Plan::parse(plan)?;
        let user = self
            .user_repository
            .update_plan(user_id, plan, self.clock.now())
            .await?
            .ok_or_else(|| AppError::NotFound("User not found".to_owned()))?;

        let message = match plan {
            Plan::Pro => "Fake payment successful",
            Plan::Free => "Switched to free plan",
        };

        Ok(PlanChange { message, user })
    }

    /// Deletes the account and all records it owns.
    pub async fn delete_account(&self, user_id: UserId) -> AppResult<()> {
        if !self.user_repository.delete(user_id).await? {
            return Err(AppError::NotFound("User not found".to_owned()));
        }

        tracing::info!(%user_id, "account deleted");
        Ok(())
    }

    /// Counts registered users.
    pub async fn count_users(&self) -> AppResult<i64> {
        self.user_repository.count().await
    }
}
