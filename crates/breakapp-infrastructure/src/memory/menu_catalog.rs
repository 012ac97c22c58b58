//! In-memory `MenuRepository`.

use async_trait::async_trait;
use breakapp_core::error::Result;
use breakapp_core::geo::BoundingBox;
use breakapp_core::menu::{MenuFilter, MenuItem, MenuRepository, Restaurant};

/// Maximum matches returned by a name lookup.
pub const NAME_MATCH_LIMIT: usize = 5;

/// Read-only menu data held in memory, in catalog order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMenuCatalog {
    restaurants: Vec<Restaurant>,
    items: Vec<MenuItem>,
}

impl InMemoryMenuCatalog {
    pub fn new(restaurants: Vec<Restaurant>, items: Vec<MenuItem>) -> Self {
        Self { restaurants, items }
    }

    pub fn restaurants(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }
}

#[async_trait]
impl MenuRepository for InMemoryMenuCatalog {
    async fn find_menu_items_by_name(&self, names: &[String]) -> Result<Vec<MenuItem>> {
        Ok(self
            .items
            .iter()
            .filter(|item| item.is_available)
            .filter(|item| names.iter().any(|name| item.name_contains(name)))
            .take(NAME_MATCH_LIMIT)
            .cloned()
            .collect())
    }

    async fn find_available_menu_items(&self, filter: &MenuFilter) -> Result<Vec<MenuItem>> {
        let mut matches: Vec<MenuItem> = self
            .items
            .iter()
            .filter(|item| filter.matches(item))
            .cloned()
            .collect();
        // stable: ties keep catalog order
        matches.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        if let Some(limit) = filter.limit {
            matches.truncate(limit);
        }
        Ok(matches)
    }

    async fn find_active_restaurants_in_bounding_box(
        &self,
        bbox: &BoundingBox,
    ) -> Result<Vec<Restaurant>> {
        Ok(self
            .restaurants
            .iter()
            .filter(|r| r.is_active && bbox.contains(&r.coordinate))
            .cloned()
            .collect())
    }

    async fn find_menu_item(&self, menu_item_id: &str) -> Result<Option<MenuItem>> {
        Ok(self.items.iter().find(|item| item.id == menu_item_id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakapp_core::geo::{Coordinate, GeoMatcher};
    use rust_decimal::Decimal;

    fn item(id: &str, name: &str, rating: f32, available: bool) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            restaurant_id: "r1".to_string(),
            name: name.to_string(),
            name_ar: None,
            description: String::new(),
            description_ar: None,
            price: Decimal::from(10),
            is_available: available,
            category: String::new(),
            rating,
            diet_types: vec![],
        }
    }

    fn catalog() -> InMemoryMenuCatalog {
        InMemoryMenuCatalog::new(
            vec![
                Restaurant {
                    id: "r1".to_string(),
                    name: "Near".to_string(),
                    coordinate: Coordinate::new(24.7136, 46.6753),
                    is_active: true,
                },
                Restaurant {
                    id: "r2".to_string(),
                    name: "Closed".to_string(),
                    coordinate: Coordinate::new(24.7137, 46.6754),
                    is_active: false,
                },
            ],
            vec![
                item("m1", "Cheese Pizza", 4.1, true),
                item("m2", "Pepperoni Pizza", 4.8, true),
                item("m3", "Old Pizza", 5.0, false),
                item("m4", "Green Salad", 4.1, true),
            ],
        )
    }

    #[tokio::test]
    async fn test_name_lookup_skips_unavailable() {
        let found = catalog()
            .find_menu_items_by_name(&["pizza".to_string()])
            .await
            .unwrap();
        let ids: Vec<_> = found.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["m1", "m2"]);
    }

    #[tokio::test]
    async fn test_available_items_sorted_by_rating() {
        let found = catalog()
            .find_available_menu_items(&MenuFilter::default().with_limit(2))
            .await
            .unwrap();
        let ids: Vec<_> = found.iter().map(|i| i.id.as_str()).collect();
        // m1 and m4 tie; catalog order decides
        assert_eq!(ids, vec!["m2", "m1"]);
    }

    #[tokio::test]
    async fn test_bounding_box_lists_only_active() {
        let matcher = GeoMatcher::default();
        let bbox = matcher.bounding_box(&Coordinate::new(24.7136, 46.6753), 1.0);
        let found = catalog()
            .find_active_restaurants_in_bounding_box(&bbox)
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "r1");
    }

    #[tokio::test]
    async fn test_find_menu_item_ignores_availability() {
        let found = catalog().find_menu_item("m3").await.unwrap();
        assert!(found.is_some());
        assert!(catalog().find_menu_item("zz").await.unwrap().is_none());
    }
}
