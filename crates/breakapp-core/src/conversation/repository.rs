//! Conversation session repository trait.

use super::model::ConversationSession;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for conversation session persistence.
///
/// Sessions are never physically deleted by the engine; closed sessions stay
/// readable for analytics.
#[async_trait]
pub trait ConversationSessionRepository: Send + Sync {
    /// Finds a session by its ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(session))`: Session found
    /// - `Ok(None)`: Session not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_id(&self, session_id: &str) -> Result<Option<ConversationSession>>;

    /// Inserts or replaces a session.
    async fn save(&self, session: &ConversationSession) -> Result<()>;

    /// Lists every session owned by `user_id`, oldest first.
    async fn list_by_user(&self, user_id: &str) -> Result<Vec<ConversationSession>>;
}
