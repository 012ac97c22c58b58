//! Configuration service implementation.
//!
//! Loads the root configuration from `config.toml` (by default
//! `~/.config/breakapp/config.toml`) and caches it.

use crate::paths::BreakAppPaths;
use breakapp_core::config::RootConfig;
use breakapp_core::error::{BreakAppError, Result};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config path; the platform default is used when `None`
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a service reading the platform default location.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a service reading `path`.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    ///
    /// A missing file yields defaults. A file that cannot be read or parsed
    /// is logged and also yields defaults.
    pub fn get_config(&self) -> RootConfig {
        {
            let read_lock = self.config.read().unwrap_or_else(|e| e.into_inner());
            if let Some(ref cached) = *read_lock {
                return cached.clone();
            }
        }

        let loaded = match self.load() {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("[ConfigService] Falling back to default config: {}", e);
                RootConfig::default()
            }
        };

        {
            let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
            *write_lock = Some(loaded.clone());
        }

        loaded
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(|e| e.into_inner());
        *write_lock = None;
    }

    /// Loads the configuration without touching the cache.
    pub fn load(&self) -> Result<RootConfig> {
        let path = match &self.path {
            Some(path) => path.clone(),
            None => BreakAppPaths::config_file()?,
        };
        Self::load_from(&path)
    }

    /// Reads `path`; a missing or empty file yields defaults.
    pub fn load_from(path: &Path) -> Result<RootConfig> {
        if !path.exists() {
            tracing::debug!("[ConfigService] No config at {:?}, using defaults", path);
            return Ok(RootConfig::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            BreakAppError::config(format!("Failed to read config file at {:?}: {}", path, e))
        })?;

        if content.trim().is_empty() {
            return Ok(RootConfig::default());
        }

        Ok(toml::from_str(&content)?)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let service = ConfigService::with_path(dir.path().join("config.toml"));
        assert_eq!(service.get_config(), RootConfig::default());
    }

    #[test]
    fn test_loads_and_caches() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[engine]\nsession_ttl_secs = 60").unwrap();

        let service = ConfigService::with_path(file.path());
        assert_eq!(service.get_config().engine.session_ttl_secs, 60);

        // Cached value survives a file change until invalidated
        std::fs::write(file.path(), "[engine]\nsession_ttl_secs = 90\n").unwrap();
        assert_eq!(service.get_config().engine.session_ttl_secs, 60);

        service.invalidate_cache();
        assert_eq!(service.get_config().engine.session_ttl_secs, 90);
    }

    #[test]
    fn test_malformed_file_is_an_error_but_get_config_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "engine = 42").unwrap();

        let service = ConfigService::with_path(file.path());
        assert!(service.load().is_err());
        assert_eq!(service.get_config(), RootConfig::default());
    }
}
