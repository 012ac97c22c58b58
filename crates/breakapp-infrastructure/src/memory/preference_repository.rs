//! In-memory `PreferenceRepository`.

use async_trait::async_trait;
use breakapp_core::error::{BreakAppError, Result};
use breakapp_core::preference::{DietaryProfile, PreferenceRepository, VoicePreferences};
use std::collections::HashMap;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
pub struct InMemoryPreferenceRepository {
    dietary: RwLock<HashMap<String, DietaryProfile>>,
    voice: RwLock<HashMap<String, VoicePreferences>>,
}

impl InMemoryPreferenceRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dietary_profiles(profiles: Vec<DietaryProfile>) -> Self {
        Self {
            dietary: RwLock::new(
                profiles
                    .into_iter()
                    .map(|profile| (profile.user_id.clone(), profile))
                    .collect(),
            ),
            voice: RwLock::default(),
        }
    }

    pub async fn set_dietary_profile(&self, profile: DietaryProfile) {
        self.dietary
            .write()
            .await
            .insert(profile.user_id.clone(), profile);
    }
}

#[async_trait]
impl PreferenceRepository for InMemoryPreferenceRepository {
    async fn dietary_profile(&self, user_id: &str) -> Result<Option<DietaryProfile>> {
        Ok(self.dietary.read().await.get(user_id).cloned())
    }

    async fn voice_preferences(&self, user_id: &str) -> Result<Option<VoicePreferences>> {
        Ok(self.voice.read().await.get(user_id).cloned())
    }

    async fn save_voice_preferences(&self, preferences: &VoicePreferences) -> Result<()> {
        if preferences.user_id.trim().is_empty() {
            return Err(BreakAppError::invalid_input("user_id must not be empty"));
        }
        self.voice
            .write()
            .await
            .insert(preferences.user_id.clone(), preferences.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakapp_core::preference::VoiceSpeed;

    #[tokio::test]
    async fn test_voice_preferences_upsert() {
        let repo = InMemoryPreferenceRepository::new();
        assert!(repo.voice_preferences("u1").await.unwrap().is_none());

        let mut prefs = VoicePreferences::defaults_for("u1");
        repo.save_voice_preferences(&prefs).await.unwrap();
        prefs.voice_speed = VoiceSpeed::Slow;
        repo.save_voice_preferences(&prefs).await.unwrap();

        let stored = repo.voice_preferences("u1").await.unwrap().unwrap();
        assert_eq!(stored.voice_speed, VoiceSpeed::Slow);
    }

    #[tokio::test]
    async fn test_dietary_profiles_seeded() {
        let repo = InMemoryPreferenceRepository::with_dietary_profiles(vec![DietaryProfile {
            user_id: "u1".to_string(),
            diet_types: vec!["vegan".to_string()],
        }]);
        let profile = repo.dietary_profile("u1").await.unwrap().unwrap();
        assert_eq!(profile.diet_types, vec!["vegan"]);
        assert!(repo.dietary_profile("u2").await.unwrap().is_none());
    }
}
