//! In-memory repository implementations.
//!
//! Used by the CLI and by tests; production deployments put a database
//! behind the same traits.

mod menu_catalog;
mod order_book;
mod preference_repository;
mod session_repository;

pub use menu_catalog::{InMemoryMenuCatalog, NAME_MATCH_LIMIT};
pub use order_book::InMemoryOrderBook;
pub use preference_repository::InMemoryPreferenceRepository;
pub use session_repository::InMemoryConversationSessionRepository;
