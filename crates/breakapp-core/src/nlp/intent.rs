//! Intent classification.

use super::entity::{EntityExtractor, ExtractedEntities};
use super::normalize;
use super::vocabulary::{example_phrases, intent_triggers};
use crate::language::Language;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

/// Confidence reported when a trigger phrase matched.
pub const MATCH_CONFIDENCE: f32 = 0.9;
/// Confidence reported for [`Intent::Unknown`].
pub const UNKNOWN_CONFIDENCE: f32 = 0.1;

/// What the user is trying to do.
///
/// Variant order is classification priority.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Intent {
    OrderUsual,
    OrderItem,
    SearchMenu,
    CancelOrder,
    AddToOrder,
    GetRecommendations,
    Unknown,
}

impl Intent {
    /// Intents whose handlers may stage an order.
    pub fn is_ordering(self) -> bool {
        matches!(self, Self::OrderUsual | Self::OrderItem | Self::AddToOrder)
    }
}

/// Intent plus confidence, as remembered on the session.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectedIntent {
    pub intent: Intent,
    pub confidence: f32,
}

/// Full result of classifying one utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentClassification {
    pub intent: Intent,
    pub confidence: f32,
    pub entities: ExtractedEntities,
    /// Example phrases, only set for [`Intent::Unknown`]
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl IntentClassification {
    pub fn detected(&self) -> DetectedIntent {
        DetectedIntent {
            intent: self.intent,
            confidence: self.confidence,
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.intent == Intent::Unknown
    }
}

/// Maps an utterance to an intent.
pub trait IntentClassifier: Send + Sync {
    fn classify(&self, text: &str, language: Language) -> IntentClassification;
}

/// Deterministic substring matcher over fixed trigger phrases.
///
/// Intents are tested in priority order and the first one with any trigger
/// occurring in the lower-cased text wins. Entities are only extracted for a
/// match.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordIntentClassifier {
    extractor: EntityExtractor,
}

impl KeywordIntentClassifier {
    pub fn new() -> Self {
        Self::default()
    }

    fn match_intent(text: &str, language: Language) -> Option<Intent> {
        intent_triggers(language)
            .iter()
            .find(|triggers| triggers.phrases.iter().any(|phrase| text.contains(phrase)))
            .map(|triggers| triggers.intent)
    }
}

impl IntentClassifier for KeywordIntentClassifier {
    fn classify(&self, text: &str, language: Language) -> IntentClassification {
        let normalized = normalize(text);

        match Self::match_intent(&normalized, language) {
            Some(intent) => {
                tracing::debug!("[IntentClassifier] '{}' -> {}", normalized, intent);
                IntentClassification {
                    intent,
                    confidence: MATCH_CONFIDENCE,
                    entities: self.extractor.extract(&normalized, language),
                    suggestions: Vec::new(),
                }
            }
            None => {
                tracing::debug!("[IntentClassifier] '{}' -> UNKNOWN", normalized);
                IntentClassification {
                    intent: Intent::Unknown,
                    confidence: UNKNOWN_CONFIDENCE,
                    entities: ExtractedEntities::default(),
                    suggestions: example_phrases(language)
                        .iter()
                        .map(|phrase| (*phrase).to_string())
                        .collect(),
                }
            }
        }
    }
}
