pub mod catalog;
pub mod config_service;
pub mod file_session_repository;
pub mod memory;
pub mod paths;
pub mod speech;

pub use crate::catalog::Catalog;
pub use crate::config_service::ConfigService;
pub use crate::file_session_repository::FileSessionRepository;
pub use crate::memory::{
    InMemoryConversationSessionRepository, InMemoryMenuCatalog, InMemoryOrderBook,
    InMemoryPreferenceRepository,
};
pub use crate::paths::BreakAppPaths;
pub use crate::speech::{TextPreviewSynthesisService, Utf8TranscriptionService};
