//! Unified path management for BreakApp configuration and data files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/breakapp/          # Config directory
//! ├── config.toml              # Engine and logging configuration
//! └── catalog.toml             # Optional menu catalog for the CLI
//!
//! ~/.local/share/breakapp/     # Data directory
//! └── sessions/                # Conversation sessions (one JSON file each)
//! ```

use breakapp_core::error::{BreakAppError, Result};
use std::path::PathBuf;

const APP_DIR: &str = "breakapp";

pub struct BreakAppPaths;

impl BreakAppPaths {
    /// Returns the BreakApp configuration directory (e.g. `~/.config/breakapp/`).
    pub fn config_dir() -> Result<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| BreakAppError::config("Cannot find config directory"))
    }

    /// Returns the BreakApp data directory (e.g. `~/.local/share/breakapp/`).
    pub fn data_dir() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| BreakAppError::config("Cannot find data directory"))
    }

    pub fn config_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    pub fn catalog_file() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("catalog.toml"))
    }

    pub fn sessions_dir() -> Result<PathBuf> {
        Ok(Self::data_dir()?.join("sessions"))
    }
}
