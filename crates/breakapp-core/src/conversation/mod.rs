//! Conversation session module.
//!
//! - `model`: `ConversationSession`, its lifecycle and derived phase
//! - `repository`: session persistence trait

mod model;
mod repository;

pub use model::{ConversationSession, SessionLifecycle, SessionPhase};
pub use repository::ConversationSessionRepository;
