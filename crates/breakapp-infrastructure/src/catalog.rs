//! TOML menu catalog.
//!
//! A catalog seeds the in-memory repositories with restaurants, menu items,
//! dietary profiles and past orders:
//!
//! ```toml
//! [[restaurant]]
//! id = "r-kabsa"
//! name = "Kabsa House"
//! coordinate = { latitude = 24.7136, longitude = 46.6753 }
//!
//! [[menu_item]]
//! id = "m-kabsa"
//! restaurant_id = "r-kabsa"
//! name = "Chicken Kabsa"
//! name_ar = "كبسة دجاج"
//! price = "32.00"
//! rating = 4.6
//! ```

use crate::paths::BreakAppPaths;
use breakapp_core::error::{BreakAppError, Result};
use breakapp_core::menu::{MenuItem, Restaurant};
use breakapp_core::order::Order;
use breakapp_core::preference::DietaryProfile;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    #[serde(default, rename = "restaurant")]
    pub restaurants: Vec<Restaurant>,
    #[serde(default, rename = "menu_item")]
    pub menu_items: Vec<MenuItem>,
    #[serde(default, rename = "dietary_profile")]
    pub dietary_profiles: Vec<DietaryProfile>,
    #[serde(default, rename = "order")]
    pub orders: Vec<Order>,
}

impl Catalog {
    pub fn parse(content: &str) -> Result<Self> {
        let catalog: Self = toml::from_str(content)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Reads a catalog file. The file must exist.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            BreakAppError::config(format!("Failed to read catalog at {:?}: {}", path, e))
        })?;
        let catalog = Self::parse(&content)?;
        tracing::info!(
            "[Catalog] Loaded {} restaurants, {} menu items from {:?}",
            catalog.restaurants.len(),
            catalog.menu_items.len(),
            path
        );
        Ok(catalog)
    }

    /// Reads `~/.config/breakapp/catalog.toml` if present.
    pub fn load_default() -> Result<Option<Self>> {
        let path = BreakAppPaths::catalog_file()?;
        if !path.exists() {
            return Ok(None);
        }
        Self::load(&path).map(Some)
    }

    /// Every menu item must belong to a listed restaurant.
    fn validate(&self) -> Result<()> {
        for item in &self.menu_items {
            if !self.restaurants.iter().any(|r| r.id == item.restaurant_id) {
                return Err(BreakAppError::config(format!(
                    "Menu item '{}' references unknown restaurant '{}'",
                    item.id, item.restaurant_id
                )));
            }
            if item.price.is_sign_negative() {
                return Err(BreakAppError::config(format!(
                    "Menu item '{}' has a negative price",
                    item.id
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    const SAMPLE: &str = r#"
        [[restaurant]]
        id = "r1"
        name = "Burger Yard"
        coordinate = { latitude = 24.7136, longitude = 46.6753 }

        [[menu_item]]
        id = "m1"
        restaurant_id = "r1"
        name = "Classic Burger"
        name_ar = "برجر كلاسيك"
        price = "25.50"
        rating = 4.2
        diet_types = ["halal"]

        [[dietary_profile]]
        user_id = "crew-1"
        diet_types = ["vegetarian"]

        [[order]]
        id = "o1"
        user_id = "crew-1"
        restaurant_id = "r1"
        source = "APP"
        created_at = "2026-01-05T12:00:00Z"
        lines = [{ menu_item_id = "m1", restaurant_id = "r1", name = "Classic Burger", unit_price = "25.50", quantity = 2 }]
    "#;

    #[test]
    fn test_parse_sample() {
        let catalog = Catalog::parse(SAMPLE).unwrap();
        assert_eq!(catalog.restaurants.len(), 1);
        assert!(catalog.restaurants[0].is_active);

        let item = &catalog.menu_items[0];
        assert_eq!(item.price, Decimal::new(2550, 2));
        assert!(item.is_available);

        assert_eq!(catalog.dietary_profiles[0].diet_types, vec!["vegetarian"]);
        assert_eq!(catalog.orders[0].lines[0].quantity, 2);
    }

    #[test]
    fn test_rejects_orphan_menu_item() {
        let content = r#"
            [[menu_item]]
            id = "m1"
            restaurant_id = "missing"
            name = "Ghost"
            price = "1.00"
        "#;
        let err = Catalog::parse(content).unwrap_err();
        assert!(matches!(err, BreakAppError::Config(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Catalog::load(&dir.path().join("nope.toml")).is_err());
    }
}
