//! In-memory `ConversationSessionRepository`.

use async_trait::async_trait;
use breakapp_core::conversation::{ConversationSession, ConversationSessionRepository};
use breakapp_core::error::Result;
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryConversationSessionRepository {
    sessions: RwLock<HashMap<String, ConversationSession>>,
}

impl InMemoryConversationSessionRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl ConversationSessionRepository for InMemoryConversationSessionRepository {
    async fn find_by_id(&self, session_id: &str) -> Result<Option<ConversationSession>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn save(&self, session: &ConversationSession) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(session.id.clone(), session.clone());
        Ok(())
    }

    async fn list_by_user(&self, user_id: &str) -> Result<Vec<ConversationSession>> {
        let mut sessions: Vec<_> = self
            .sessions
            .read()
            .await
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(sessions)
    }
}
