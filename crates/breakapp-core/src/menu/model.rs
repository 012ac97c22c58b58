//! Menu and restaurant read models.

use crate::geo::{Coordinate, Located};
use crate::language::Language;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A restaurant that can serve orders. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub coordinate: Coordinate,
    #[serde(default = "default_true")]
    pub is_active: bool,
}

impl Located for Restaurant {
    fn coordinate(&self) -> Coordinate {
        self.coordinate
    }
}

/// A dish offered by a restaurant. Read-only to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    /// Arabic display name
    #[serde(default)]
    pub name_ar: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_ar: Option<String>,
    pub price: Decimal,
    #[serde(default = "default_true")]
    pub is_available: bool,
    #[serde(default)]
    pub category: String,
    /// Average review rating on a 0-5 scale
    #[serde(default)]
    pub rating: f32,
    /// Diet tags such as "vegetarian" or "halal"
    #[serde(default)]
    pub diet_types: Vec<String>,
}

impl MenuItem {
    /// Name shown to a user conversing in `language`.
    pub fn localized_name(&self, language: Language) -> &str {
        match (language, self.name_ar.as_deref()) {
            (Language::Arabic, Some(name_ar)) if !name_ar.is_empty() => name_ar,
            _ => &self.name,
        }
    }

    /// Case-insensitive match of `needle` against either display name.
    pub fn name_contains(&self, needle: &str) -> bool {
        let needle = needle.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self
                .name_ar
                .as_deref()
                .is_some_and(|name_ar| name_ar.to_lowercase().contains(&needle))
    }

    /// Case-insensitive match of a search term against names, descriptions and category.
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.to_lowercase();
        self.name_contains(&term)
            || self.description.to_lowercase().contains(&term)
            || self
                .description_ar
                .as_deref()
                .is_some_and(|d| d.to_lowercase().contains(&term))
            || self.category.to_lowercase().contains(&term)
    }

    pub fn has_any_diet_type(&self, diet_types: &[String]) -> bool {
        diet_types.is_empty()
            || self
                .diet_types
                .iter()
                .any(|tag| diet_types.iter().any(|wanted| wanted.eq_ignore_ascii_case(tag)))
    }
}

/// Query over available menu items.
///
/// Every set criterion must hold; results are ordered by rating, highest first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuFilter {
    /// Item must carry at least one of these tags (empty = no restriction)
    #[serde(default)]
    pub diet_types: Vec<String>,
    /// Restrict to these restaurants
    #[serde(default)]
    pub restaurant_ids: Option<Vec<String>>,
    #[serde(default)]
    pub min_rating: Option<f32>,
    /// Item must match at least one term (empty = no restriction)
    #[serde(default)]
    pub terms: Vec<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl MenuFilter {
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        item.is_available
            && item.has_any_diet_type(&self.diet_types)
            && self
                .restaurant_ids
                .as_ref()
                .is_none_or(|ids| ids.iter().any(|id| id == &item.restaurant_id))
            && self.min_rating.is_none_or(|min| item.rating >= min)
            && (self.terms.is_empty() || self.terms.iter().any(|t| item.matches_term(t)))
    }
}

fn default_true() -> bool {
    true
}
