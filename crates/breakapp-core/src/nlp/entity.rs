//! Entity extraction: food items and a quantity.

use super::normalize;
use super::vocabulary::{food_vocabulary, number_word_value};
use crate::language::Language;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Confidence attached to every vocabulary hit.
pub const ENTITY_CONFIDENCE: f32 = 0.9;

static QUANTITY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d+|one|two|three|four|five|واحد|اثنين|اثنان|ثلاثة|أربعة|خمسة)\b")
        .expect("quantity pattern is valid")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EntityKind {
    FoodItem,
}

/// A recognised span of the utterance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    #[serde(rename = "type")]
    pub kind: EntityKind,
    pub value: String,
    pub confidence: f32,
}

/// The first quantity mentioned in an utterance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityMention {
    /// Text as spoken
    pub raw: String,
    /// Parsed value, never below 1
    pub value: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractedEntities {
    pub items: Vec<Entity>,
    pub quantity: Option<QuantityMention>,
}

impl ExtractedEntities {
    pub fn has_food_items(&self) -> bool {
        !self.items.is_empty()
    }

    /// Food item values in vocabulary order.
    pub fn food_values(&self) -> Vec<String> {
        self.items
            .iter()
            .filter(|entity| entity.kind == EntityKind::FoodItem)
            .map(|entity| entity.value.clone())
            .collect()
    }

    /// Spoken quantity, or 1 when none was mentioned.
    pub fn quantity_or_default(&self) -> u32 {
        self.quantity.as_ref().map_or(1, |q| q.value)
    }
}

/// Vocabulary and pattern based extractor.
///
/// Only the first quantity in the utterance is kept, and it applies to the
/// first resolved item. "two burgers and three pizzas" yields quantity 2.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityExtractor;

impl EntityExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn extract(&self, text: &str, language: Language) -> ExtractedEntities {
        let text = normalize(text);

        let items = food_vocabulary(language)
            .iter()
            .filter(|food| text.contains(*food))
            .map(|food| Entity {
                kind: EntityKind::FoodItem,
                value: (*food).to_string(),
                confidence: ENTITY_CONFIDENCE,
            })
            .collect();

        let quantity = QUANTITY_PATTERN.find(&text).map(|m| QuantityMention {
            raw: m.as_str().to_string(),
            value: parse_quantity(m.as_str()),
        });

        ExtractedEntities { items, quantity }
    }
}

/// Parses a matched quantity token; zero or unparsable values become 1.
fn parse_quantity(token: &str) -> u32 {
    number_word_value(token)
        .or_else(|| parse_digits(token))
        .filter(|value| *value > 0)
        .unwrap_or(1)
}

/// Parses ASCII or Arabic-Indic digits.
fn parse_digits(token: &str) -> Option<u32> {
    token.chars().try_fold(0u32, |acc, c| {
        let digit = match c {
            '0'..='9' => c.to_digit(10)?,
            '\u{0660}'..='\u{0669}' => c as u32 - 0x0660,
            '\u{06F0}'..='\u{06F9}' => c as u32 - 0x06F0,
            _ => return None,
        };
        acc.checked_mul(10)?.checked_add(digit)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_food_and_quantity() {
        let entities = EntityExtractor::new().extract("I want 2 burgers and a salad", Language::English);
        assert_eq!(entities.food_values(), vec!["burger", "salad"]);
        assert_eq!(entities.quantity_or_default(), 2);
        assert_eq!(entities.items[0].confidence, ENTITY_CONFIDENCE);
    }

    #[test]
    fn test_number_words() {
        let entities = EntityExtractor::new().extract("Three pizzas please", Language::English);
        assert_eq!(entities.quantity_or_default(), 3);

        let entities = EntityExtractor::new().extract("أريد اثنين برجر", Language::Arabic);
        assert_eq!(entities.food_values(), vec!["برجر"]);
        assert_eq!(entities.quantity_or_default(), 2);
    }

    #[test]
    fn test_arabic_indic_digits() {
        let entities = EntityExtractor::new().extract("أريد ٣ شاورما", Language::Arabic);
        assert_eq!(entities.quantity_or_default(), 3);
        assert_eq!(entities.quantity.unwrap().raw, "٣");
    }

    #[test]
    fn test_missing_or_zero_quantity_defaults_to_one() {
        let extractor = EntityExtractor::new();
        assert_eq!(extractor.extract("a pizza", Language::English).quantity_or_default(), 1);
        assert!(extractor.extract("a pizza", Language::English).quantity.is_none());
        assert_eq!(extractor.extract("0 pizza", Language::English).quantity_or_default(), 1);
        assert_eq!(
            extractor
                .extract("99999999999 pizza", Language::English)
                .quantity_or_default(),
            1
        );
    }

    #[test]
    fn test_only_first_quantity_is_used() {
        let entities =
            EntityExtractor::new().extract("two burgers and three pizzas", Language::English);
        assert_eq!(entities.quantity_or_default(), 2);
        assert_eq!(entities.food_values(), vec!["burger", "pizza"]);
    }

    #[test]
    fn test_quantity_needs_word_boundary() {
        // "someone" contains "one" but is not a quantity
        let entities = EntityExtractor::new().extract("someone wants pizza", Language::English);
        assert!(entities.quantity.is_none());
    }

    #[test]
    fn test_vocabulary_is_language_specific() {
        let entities = EntityExtractor::new().extract("pizza", Language::Arabic);
        assert!(!entities.has_food_items());
    }
}
