use async_trait::async_trait;

use confide_application::HomeworkRepository;
use confide_core::AppResult;
use confide_domain::{HomeworkId, HomeworkItem, UserId};

use super::InMemoryStore;

#[async_trait]
impl HomeworkRepository for InMemoryStore {
    async fn list(
        &self,
        user_id: UserId,
        completed: Option<bool>,
    ) -> AppResult<Vec<HomeworkItem>> {
        let state = self.state.read().await;
        let mut items: Vec<HomeworkItem> = state
            .homework
            .values()
            .filter(|item| {
                item.user_id == user_id
                    && completed.is_none_or(|completed| item.completed == completed)
            })
            .cloned()
            .collect();
        items.sort_by(|left, right| {
            left.completed
                .cmp(&right.completed)
                .then_with(|| right.session_date.cmp(&left.session_date))
                .then_with(|| right.created_at.cmp(&left.created_at))
        });

        Ok(items)
    }

    async fn find(
        &self,
        user_id: UserId,
        homework_id: HomeworkId,
    ) -> AppResult<Option<HomeworkItem>> {
        let state = self.state.read().await;
        Ok(state
            .homework
            .get(&homework_id)
            .filter(|item| item.user_id == user_id)
            .cloned())
    }

    async fn create(&self, item: &HomeworkItem) -> AppResult<()> {
        self.state
            .write()
            .await
            .homework
            .insert(item.id, item.clone());
        Ok(())
    }

    async fn update(&self, item: &HomeworkItem) -> AppResult<()> {
        let mut state = self.state.write().await;
        if let Some(stored) = state
            .homework
            .get_mut(&item.id)
            .filter(|stored| stored.user_id == item.user_id)
        {
            *stored = item.clone();
        }
        Ok(())
    }

    async fn delete(&self, user_id: UserId, homework_id: HomeworkId) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let owned = state
            .homework
            .get(&homework_id)
            .is_some_and(|item| item.user_id == user_id);
        if owned {
            state.homework.remove(&homework_id);
        }
        Ok(owned)
    }
}
