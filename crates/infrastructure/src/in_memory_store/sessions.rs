use async_trait::async_trait;

use confide_application::{SessionDraft, SessionRepository};
use confide_core::AppResult;
use confide_domain::{HomeworkItem, SessionId, TherapySession, UserId};

use super::InMemoryStore;

#[async_trait]
impl SessionRepository for InMemoryStore {
    async fn list(
        &self,
        user_id: UserId,
        completed: Option<bool>,
    ) -> AppResult<Vec<TherapySession>> {
        let state = self.state.read().await;
        let mut sessions: Vec<TherapySession> = state
            .sessions
            .values()
            .filter(|session| {
                session.user_id == user_id
                    && completed.is_none_or(|completed| session.completed == completed)
            })
            .cloned()
            .collect();
        sessions.sort_by(|left, right| right.date.cmp(&left.date));

        Ok(sessions)
    }

    async fn find(
        &self,
        user_id: UserId,
        session_id: SessionId,
    ) -> AppResult<Option<TherapySession>> {
        let state = self.state.read().await;
        Ok(state
            .sessions
            .get(&session_id)
            .filter(|session| session.user_id == user_id)
            .cloned())
    }

    async fn create_with_homework(
        &self,
        draft: SessionDraft,
    ) -> AppResult<(TherapySession, Vec<HomeworkItem>)> {
        let mut state = self.state.write().await;
        let next_number = state
            .sessions
            .values()
            .filter(|session| session.user_id == draft.user_id)
            .map(|session| session.number)
            .max()
            .unwrap_or(0)
            + 1;

        let session =
            TherapySession::new(draft.user_id, next_number, draft.session, draft.created_at);
        let homework: Vec<HomeworkItem> = draft
            .homework
            .into_iter()
            .map(|mut item| {
                item.session_id = Some(session.id);
                HomeworkItem::new(draft.user_id, item, draft.created_at)
            })
            .collect();

        state.sessions.insert(session.id, session.clone());
        for item in &homework {
            state.homework.insert(item.id, item.clone());
        }

        Ok((session, homework))
    }

    async fn update(&self, session: &TherapySession) -> AppResult<()> {
        let mut state = self.state.write().await;
        if let Some(stored) = state
            .sessions
            .get_mut(&session.id)
            .filter(|stored| stored.user_id == session.user_id)
        {
            *stored = session.clone();
        }
        Ok(())
    }

    async fn delete(&self, user_id: UserId, session_id: SessionId) -> AppResult<bool> {
        let mut state = self.state.write().await;
        let owned = state
            .sessions
            .get(&session_id)
            .is_some_and(|session| session.user_id == user_id);
        if !owned {
            return Ok(false);
        }

        state.sessions.remove(&session_id);
        for item in state.homework.values_mut() {
            if item.session_id == Some(session_id) {
                item.session_id = None;
            }
        }
        Ok(true)
    }
}
