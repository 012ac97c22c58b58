//! Menu read-access trait.

use super::model::{MenuFilter, MenuItem, Restaurant};
use crate::error::Result;
use crate::geo::BoundingBox;
use async_trait::async_trait;

/// Read access to restaurants and their menus.
///
/// Creation and editing of menu data happen outside the engine; this trait
/// only exposes the lookups the conversation pipeline needs.
#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// Finds available items whose name (either language) contains any of `names`.
    ///
    /// Implementations return at most a handful of matches, in catalog order.
    async fn find_menu_items_by_name(&self, names: &[String]) -> Result<Vec<MenuItem>>;

    /// Finds available items matching `filter`, highest rated first.
    async fn find_available_menu_items(&self, filter: &MenuFilter) -> Result<Vec<MenuItem>>;

    /// Finds active restaurants whose coordinate falls inside `bbox`.
    async fn find_active_restaurants_in_bounding_box(
        &self,
        bbox: &BoundingBox,
    ) -> Result<Vec<Restaurant>>;

    /// Finds a single item by ID, whatever its availability.
    async fn find_menu_item(&self, menu_item_id: &str) -> Result<Option<MenuItem>>;
}
