//! User preferences consulted by the ordering assistant.

use crate::error::Result;
use crate::language::Language;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Diet restrictions used to filter menu listings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DietaryProfile {
    pub user_id: String,
    #[serde(default)]
    pub diet_types: Vec<String>,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VoiceSpeed {
    Slow,
    #[default]
    Normal,
    Fast,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, AsRefStr, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum VoiceType {
    #[default]
    Female,
    Male,
}

/// How the assistant should speak to a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoicePreferences {
    pub user_id: String,
    #[serde(default)]
    pub preferred_language: Language,
    #[serde(default)]
    pub voice_speed: VoiceSpeed,
    #[serde(default)]
    pub voice_type: VoiceType,
    #[serde(default = "default_true")]
    pub enable_voice_confirmation: bool,
}

impl VoicePreferences {
    /// Preferences applied when a user never saved any.
    pub fn defaults_for(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            preferred_language: Language::Arabic,
            voice_speed: VoiceSpeed::Normal,
            voice_type: VoiceType::Female,
            enable_voice_confirmation: true,
        }
    }
}

fn default_true() -> bool {
    true
}

/// Storage for per-user dietary and voice preferences.
#[async_trait]
pub trait PreferenceRepository: Send + Sync {
    async fn dietary_profile(&self, user_id: &str) -> Result<Option<DietaryProfile>>;

    async fn voice_preferences(&self, user_id: &str) -> Result<Option<VoicePreferences>>;

    /// Inserts or replaces the user's voice preferences.
    async fn save_voice_preferences(&self, preferences: &VoicePreferences) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_preference_defaults() {
        let prefs = VoicePreferences::defaults_for("u1");
        assert_eq!(prefs.preferred_language, Language::Arabic);
        assert_eq!(prefs.voice_type.to_string(), "female");
        assert!(prefs.enable_voice_confirmation);
    }

    #[test]
    fn test_partial_preferences_deserialize_with_defaults() {
        let prefs: VoicePreferences =
            serde_json::from_str(r#"{"user_id":"u1","voice_speed":"fast"}"#).unwrap();
        assert_eq!(prefs.voice_speed, VoiceSpeed::Fast);
        assert_eq!(prefs.voice_type, VoiceType::Female);
        assert!(prefs.enable_voice_confirmation);
    }
}
