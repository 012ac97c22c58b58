//! Keyword-based language understanding.
//!
//! - `intent`: `Intent`, `IntentClassifier` and the keyword implementation
//! - `entity`: food item and quantity extraction
//! - `vocabulary`: fixed per-language phrase tables

mod entity;
mod intent;
mod vocabulary;

pub use entity::{
    ENTITY_CONFIDENCE, Entity, EntityExtractor, EntityKind, ExtractedEntities, QuantityMention,
};
pub use intent::{
    DetectedIntent, Intent, IntentClassification, IntentClassifier, KeywordIntentClassifier,
    MATCH_CONFIDENCE, UNKNOWN_CONFIDENCE,
};

/// Lower-cases and trims text, mapping typographic apostrophes to `'`.
pub fn normalize(text: &str) -> String {
    text.trim().to_lowercase().replace(['\u{2019}', '\u{2018}'], "'")
}
