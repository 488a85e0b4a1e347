use async_trait::async_trait;

use confide_application::ProfileRepository;
use confide_core::AppResult;
use confide_domain::{UserId, UserProfile};

use super::InMemoryStore;

#[async_trait]
impl ProfileRepository for InMemoryStore {
    async fn find(&self, user_id: UserId) -> AppResult<Option<UserProfile>> {
        Ok(self.state.read().await.profiles.get(&user_id).cloned())
    }

    async fn insert_if_absent(&self, profile: &UserProfile) -> AppResult<UserProfile> {
        let mut state = self.state.write().await;
        Ok(state
            .profiles
            .entry(profile.user_id)
            .or_insert_with(|| profile.clone())
            .clone())
    }

    async fn save(&self, profile: &UserProfile) -> AppResult<()> {
        let mut state = self.state.write().await;
        if let Some(stored) = state.profiles.get_mut(&profile.user_id) {
            *stored = profile.clone();
        }
        Ok(())
    }
}
