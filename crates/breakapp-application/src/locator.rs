//! Nearby restaurant and menu item lookup.

use breakapp_core::error::{BreakAppError, Result};
use breakapp_core::geo::{Coordinate, Distanced, GeoMatcher};
use breakapp_core::menu::{MenuFilter, MenuItem, MenuRepository, Restaurant};
use std::collections::HashMap;
use std::sync::Arc;

/// Resolves geography-aware candidates through the menu repository.
pub struct RestaurantLocator {
    menu: Arc<dyn MenuRepository>,
    matcher: GeoMatcher,
}

impl RestaurantLocator {
    pub fn new(menu: Arc<dyn MenuRepository>, matcher: GeoMatcher) -> Self {
        Self { menu, matcher }
    }

    pub fn matcher(&self) -> &GeoMatcher {
        &self.matcher
    }

    /// Active restaurants within `radius_km` (or the default radius), nearest first.
    pub async fn find_nearby(
        &self,
        origin: Coordinate,
        radius_km: Option<f64>,
    ) -> Result<Vec<Distanced<Restaurant>>> {
        if !origin.is_finite() {
            return Err(BreakAppError::invalid_input(
                "location must have finite latitude and longitude",
            ));
        }
        let radius_km = self.matcher.radius_or_default(radius_km);
        if !radius_km.is_finite() || radius_km <= 0.0 {
            return Ok(Vec::new());
        }

        let bbox = self.matcher.bounding_box(&origin, radius_km);
        let candidates = self.menu.find_active_restaurants_in_bounding_box(&bbox).await?;
        Ok(self.matcher.within_radius(&origin, radius_km, candidates))
    }

    /// IDs of the restaurants [`Self::find_nearby`] returns.
    pub async fn nearby_restaurant_ids(
        &self,
        origin: Coordinate,
        radius_km: Option<f64>,
    ) -> Result<Vec<String>> {
        Ok(self
            .find_nearby(origin, radius_km)
            .await?
            .into_iter()
            .map(|found| found.item.id)
            .collect())
    }

    /// Available items of nearby restaurants matching `filter`, nearest first.
    ///
    /// Items of the same restaurant keep the repository's rating order.
    pub async fn nearby_menu_items(
        &self,
        origin: Coordinate,
        radius_km: Option<f64>,
        filter: MenuFilter,
    ) -> Result<Vec<Distanced<MenuItem>>> {
        let nearby = self.find_nearby(origin, radius_km).await?;
        if nearby.is_empty() {
            return Ok(Vec::new());
        }

        let distances: HashMap<String, f64> = nearby
            .into_iter()
            .map(|found| (found.item.id, found.distance_km))
            .collect();
        let filter = MenuFilter {
            restaurant_ids: Some(distances.keys().cloned().collect()),
            ..filter
        };

        let mut items: Vec<Distanced<MenuItem>> = self
            .menu
            .find_available_menu_items(&filter)
            .await?
            .into_iter()
            .filter_map(|item| {
                let distance_km = *distances.get(&item.restaurant_id)?;
                Some(Distanced { item, distance_km })
            })
            .collect();
        items.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakapp_infrastructure::InMemoryMenuCatalog;
    use rust_decimal::Decimal;

    fn restaurant(id: &str, lat: f64, lon: f64) -> Restaurant {
        Restaurant {
            id: id.to_string(),
            name: id.to_string(),
            coordinate: Coordinate::new(lat, lon),
            is_active: true,
        }
    }

    fn item(id: &str, restaurant_id: &str, rating: f32) -> MenuItem {
        MenuItem {
            id: id.to_string(),
            restaurant_id: restaurant_id.to_string(),
            name: id.to_string(),
            name_ar: None,
            description: String::new(),
            description_ar: None,
            price: Decimal::from(10),
            is_available: true,
            category: String::new(),
            rating,
            diet_types: vec![],
        }
    }

    fn locator() -> RestaurantLocator {
        // origin (24.7136, 46.6753); ~1.1km, ~2.2km and ~11km north
        let catalog = InMemoryMenuCatalog::new(
            vec![
                restaurant("far", 24.8136, 46.6753),
                restaurant("mid", 24.7336, 46.6753),
                restaurant("near", 24.7236, 46.6753),
            ],
            vec![
                item("far-1", "far", 5.0),
                item("mid-1", "mid", 4.9),
                item("near-1", "near", 3.0),
                item("near-2", "near", 4.0),
            ],
        );
        RestaurantLocator::new(Arc::new(catalog), GeoMatcher::default())
    }

    fn origin() -> Coordinate {
        Coordinate::new(24.7136, 46.6753)
    }

    #[tokio::test]
    async fn test_find_nearby_default_radius() {
        let found = locator().find_nearby(origin(), None).await.unwrap();
        let ids: Vec<_> = found.iter().map(|f| f.item.id.as_str()).collect();
        assert_eq!(ids, vec!["near", "mid"]);
        assert!(found[0].distance_km < found[1].distance_km);
        assert!(found.iter().all(|f| f.distance_km <= 3.0));
    }

    #[tokio::test]
    async fn test_non_positive_radius_is_empty() {
        assert!(locator().find_nearby(origin(), Some(0.0)).await.unwrap().is_empty());
        assert!(locator().find_nearby(origin(), Some(-1.0)).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_non_finite_origin_is_rejected() {
        let err = locator()
            .find_nearby(Coordinate::new(f64::NAN, 0.0), None)
            .await
            .unwrap_err();
        assert!(err.is_input_error());
    }

    #[tokio::test]
    async fn test_nearby_menu_items_sorted_by_distance() {
        let items = locator()
            .nearby_menu_items(origin(), Some(20.0), MenuFilter::default())
            .await
            .unwrap();
        let ids: Vec<_> = items.iter().map(|d| d.item.id.as_str()).collect();
        assert_eq!(ids, vec!["near-2", "near-1", "mid-1", "far-1"]);
    }
}
