//! Wiring of configuration, catalog, storage and logging.

use anyhow::{Context, Result};
use breakapp_application::{Collaborators, VoiceOrderingUseCase};
use breakapp_core::config::{LoggingConfig, RootConfig};
use breakapp_core::conversation::ConversationSessionRepository;
use breakapp_infrastructure::{
    Catalog, ConfigService, FileSessionRepository, InMemoryConversationSessionRepository,
    InMemoryMenuCatalog, InMemoryOrderBook, InMemoryPreferenceRepository,
    TextPreviewSynthesisService, Utf8TranscriptionService,
};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEMO_CATALOG: &str = include_str!("../assets/demo_catalog.toml");

/// Where the engine's inputs come from.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    pub config: Option<PathBuf>,
    pub catalog: Option<PathBuf>,
    pub sessions_dir: Option<PathBuf>,
    /// Keep sessions in memory only
    pub ephemeral: bool,
}

/// Loads the root configuration, falling back to defaults.
pub fn load_config(options: &EngineOptions) -> RootConfig {
    let service = match &options.config {
        Some(path) => ConfigService::with_path(path),
        None => ConfigService::new(),
    };
    service.get_config()
}

/// Installs the global subscriber. `RUST_LOG` overrides the configured level.
pub fn init_tracing(logging: &LoggingConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if logging.json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Logging already initialised: {}", e);
    }
}

/// Reads the catalog from `--catalog`, the user's config directory, or the
/// built-in demo data, in that order.
pub fn load_catalog(path: Option<&PathBuf>) -> Result<Catalog> {
    if let Some(path) = path {
        return Catalog::load(path).with_context(|| format!("Failed to load catalog {:?}", path));
    }
    if let Some(catalog) = Catalog::load_default()? {
        return Ok(catalog);
    }
    tracing::info!("[Bootstrap] No catalog configured, using demo data");
    Catalog::parse(DEMO_CATALOG).context("Built-in demo catalog is invalid")
}

async fn session_repository(
    options: &EngineOptions,
) -> Result<Arc<dyn ConversationSessionRepository>> {
    if options.ephemeral {
        return Ok(Arc::new(InMemoryConversationSessionRepository::new()));
    }

    let repository = match &options.sessions_dir {
        Some(dir) => FileSessionRepository::new(dir).await?,
        None => FileSessionRepository::default_location().await?,
    };
    tracing::debug!(
        "[Bootstrap] Sessions stored in {:?}",
        repository.sessions_dir()
    );
    Ok(Arc::new(repository))
}

/// Builds the use case from a loaded configuration.
pub async fn build_usecase(
    options: &EngineOptions,
    config: &RootConfig,
) -> Result<VoiceOrderingUseCase> {
    let catalog = load_catalog(options.catalog.as_ref())?;
    let order_book = Arc::new(InMemoryOrderBook::with_history(catalog.orders));

    let collaborators = Collaborators {
        menu: Arc::new(InMemoryMenuCatalog::new(
            catalog.restaurants,
            catalog.menu_items,
        )),
        order_history: order_book.clone(),
        order_creation: order_book,
        sessions: session_repository(options).await?,
        preferences: Arc::new(InMemoryPreferenceRepository::with_dietary_profiles(
            catalog.dietary_profiles,
        )),
        transcription: Arc::new(Utf8TranscriptionService),
        synthesis: Arc::new(TextPreviewSynthesisService),
    };

    Ok(VoiceOrderingUseCase::new(collaborators, config.engine.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_demo_catalog_is_valid() {
        let catalog = Catalog::parse(DEMO_CATALOG).unwrap();
        assert!(catalog.restaurants.len() >= 3);
        assert!(catalog.menu_items.iter().any(|item| !item.is_available));
        assert!(!catalog.orders.is_empty());
    }

    #[tokio::test]
    async fn test_build_with_file_sessions() {
        let temp = TempDir::new().unwrap();
        let options = EngineOptions {
            config: Some(temp.path().join("missing.toml")),
            sessions_dir: Some(temp.path().join("sessions")),
            catalog: None,
            ephemeral: false,
        };

        let config = load_config(&options);
        assert_eq!(config, RootConfig::default());

        let usecase = build_usecase(&options, &config).await.unwrap();
        assert_eq!(usecase.config(), &config.engine);
        assert!(temp.path().join("sessions").is_dir());
    }
}
