use async_trait::async_trait;
use chrono::{DateTime, Utc};

use confide_application::{UserRecord, UserRepository};
use confide_core::{AppError, AppResult};
use confide_domain::{Plan, UserId};

use super::InMemoryStore;

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_email(&self, email: &str) -> AppResult<Option<UserRecord>> {
        let state = self.state.read().await;
        Ok(state.users.values().find(|user| user.email == email).cloned())
    }

    async fn find_by_id(&self, user_id: UserId) -> AppResult<Option<UserRecord>> {
        Ok(self.state.read().await.users.get(&user_id).cloned())
    }

    async fn create(&self, user: UserRecord) -> AppResult<()> {
        let mut state = self.state.write().await;
        if state.users.values().any(|existing| existing.email == user.email) {
            return Err(AppError::Conflict(
                "An account with this email already exists".to_owned(),
            ));
        }

        state.users.insert(user.id, user);
        Ok(())
    }

    async fn update_plan(
        &self,
        user_id: UserId,
        plan: Plan,
        updated_at: DateTime<Utc>,
    ) -> AppResult<Option<UserRecord>> {
        let mut state = self.state.write().await;
        Ok(state.users.get_mut(&user_id).map(|user| {
            user.plan = plan;
            user.updated_at = updated_at;
            user.clone()
        }))
    }

    async fn delete(&self, user_id: UserId) -> AppResult<bool> {
        let mut state = self.state.write().await;
        if state.users.remove(&user_id).is_none() {
            return Ok(false);
        }

        state.logs.retain(|_, entry| entry.user_id != user_id);
        state.sessions.retain(|_, session| session.user_id != user_id);
        state.homework.retain(|_, item| item.user_id != user_id);
        state.profiles.remove(&user_id);
        Ok(true)
    }

    async fn count(&self) -> AppResult<i64> {
        let users = self.state.read().await.users.len();
        i64::try_from(users)
            .map_err(|error| AppError::Internal(format!("user count overflow: {error}")))
    }
}
