//! Engine configuration model.
//!
//! Loaded from `config.toml`; every field has a default so a missing file or
//! a partial file both yield a usable configuration.

use crate::language::Language;
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct RootConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Tunables of the conversation pipeline.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Radius for nearby searches, in kilometres
    #[serde(default = "default_search_radius_km")]
    pub search_radius_km: f64,
    /// Number of past orders sampled for the usual order
    #[serde(default = "default_usual_order_window")]
    pub usual_order_window: usize,
    /// Maximum distinct items in a usual order
    #[serde(default = "default_usual_order_max_items")]
    pub usual_order_max_items: usize,
    #[serde(default = "default_menu_listing_limit")]
    pub menu_listing_limit: usize,
    #[serde(default = "default_recommendation_limit")]
    pub recommendation_limit: usize,
    #[serde(default = "default_recommendation_min_rating")]
    pub recommendation_min_rating: f32,
    /// Idle time after which an open session expires
    #[serde(default = "default_session_ttl_secs")]
    pub session_ttl_secs: u64,
    #[serde(default)]
    pub default_language: Language,
}

impl EngineConfig {
    pub fn session_ttl(&self) -> chrono::Duration {
        let secs = i64::try_from(self.session_ttl_secs)
            .unwrap_or(i64::MAX)
            .min(i64::MAX / 1_000);
        chrono::Duration::seconds(secs)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            search_radius_km: default_search_radius_km(),
            usual_order_window: default_usual_order_window(),
            usual_order_max_items: default_usual_order_max_items(),
            menu_listing_limit: default_menu_listing_limit(),
            recommendation_limit: default_recommendation_limit(),
            recommendation_min_rating: default_recommendation_min_rating(),
            session_ttl_secs: default_session_ttl_secs(),
            default_language: Language::default(),
        }
    }
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

fn default_search_radius_km() -> f64 {
    3.0
}

fn default_usual_order_window() -> usize {
    10
}

fn default_usual_order_max_items() -> usize {
    3
}

fn default_menu_listing_limit() -> usize {
    5
}

fn default_recommendation_limit() -> usize {
    3
}

fn default_recommendation_min_rating() -> f32 {
    4.0
}

fn default_session_ttl_secs() -> u64 {
    1800
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config: RootConfig = toml::from_str("").unwrap();
        assert_eq!(config, RootConfig::default());
        assert_eq!(config.engine.search_radius_km, 3.0);
        assert_eq!(config.engine.session_ttl(), chrono::Duration::seconds(1800));
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn test_partial_engine_section() {
        let config: RootConfig = toml::from_str(
            r#"
            [engine]
            search_radius_km = 5.5
            default_language = "en"
            "#,
        )
        .unwrap();
        assert_eq!(config.engine.search_radius_km, 5.5);
        assert_eq!(config.engine.default_language, Language::English);
        assert_eq!(config.engine.usual_order_window, 10);
    }
}
