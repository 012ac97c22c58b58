//! Order domain models.

use crate::menu::MenuItem;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of an order: a menu item and how many of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub menu_item_id: String,
    pub restaurant_id: String,
    /// Display name at the time the line was staged
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl OrderLine {
    /// Creates a line for `item`; a zero quantity is raised to 1.
    pub fn for_item(item: &MenuItem, display_name: impl Into<String>, quantity: u32) -> Self {
        Self {
            menu_item_id: item.id.clone(),
            restaurant_id: item.restaurant_id.clone(),
            name: display_name.into(),
            unit_price: item.price,
            quantity: quantity.max(1),
            note: None,
        }
    }

    pub fn subtotal(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// An order being assembled inside a conversation, not yet committed.
///
/// The total is always derived from the lines.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StagedOrder {
    lines: Vec<OrderLine>,
}

impl StagedOrder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_lines(lines: Vec<OrderLine>) -> Self {
        Self { lines }
    }

    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    pub fn push_line(&mut self, line: OrderLine) {
        self.lines.push(line);
    }

    pub fn extend(&mut self, lines: impl IntoIterator<Item = OrderLine>) {
        self.lines.extend(lines);
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(OrderLine::subtotal).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Restaurant shared by every line.
    ///
    /// `None` for an empty order or one spanning several restaurants; the
    /// order service then routes by each line's own `restaurant_id`.
    pub fn restaurant_id(&self) -> Option<&str> {
        let first = self.lines.first()?.restaurant_id.as_str();
        self.lines
            .iter()
            .all(|line| line.restaurant_id == first)
            .then_some(first)
    }

    /// Comma separated line names, e.g. "2 x Burger, Salad".
    pub fn summary(&self) -> String {
        self.lines
            .iter()
            .map(|line| {
                if line.quantity > 1 {
                    format!("{} x {}", line.quantity, line.name)
                } else {
                    line.name.clone()
                }
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Channel an order was placed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSource {
    #[default]
    Voice,
    App,
}

/// Payload handed to the order-creation collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub items: Vec<OrderLine>,
    pub restaurant_id: Option<String>,
    pub notes: Option<String>,
    pub source: OrderSource,
}

impl NewOrder {
    /// Builds a voice order from a staged order.
    pub fn from_staged(staged: &StagedOrder) -> Self {
        Self {
            items: staged.lines().to_vec(),
            restaurant_id: staged.restaurant_id().map(str::to_string),
            notes: None,
            source: OrderSource::Voice,
        }
    }
}

/// A committed order, as returned by order creation or read from history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: String,
    pub user_id: String,
    pub restaurant_id: Option<String>,
    pub lines: Vec<OrderLine>,
    #[serde(default)]
    pub notes: Option<String>,
    pub source: OrderSource,
    pub created_at: DateTime<Utc>,
}

impl Order {
    pub fn total(&self) -> Decimal {
        self.lines.iter().map(OrderLine::subtotal).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(id: &str, price: i64, quantity: u32) -> OrderLine {
        OrderLine {
            menu_item_id: id.to_string(),
            restaurant_id: "r1".to_string(),
            name: id.to_string(),
            unit_price: Decimal::from(price),
            quantity,
            note: None,
        }
    }

    #[test]
    fn test_total_tracks_every_mutation() {
        let mut order = StagedOrder::new();
        assert_eq!(order.total(), Decimal::ZERO);

        order.push_line(line("burger", 25, 2));
        assert_eq!(order.total(), Decimal::from(50));

        order.extend(vec![line("cola", 5, 3)]);
        assert_eq!(order.total(), Decimal::from(65));
        assert_eq!(order.line_count(), 2);
    }

    #[test]
    fn test_summary() {
        let order = StagedOrder::from_lines(vec![line("Burger", 25, 2), line("Salad", 15, 1)]);
        assert_eq!(order.summary(), "2 x Burger, Salad");
    }

    #[test]
    fn test_new_order_from_staged() {
        let staged = StagedOrder::from_lines(vec![line("Burger", 25, 1)]);
        let new_order = NewOrder::from_staged(&staged);
        assert_eq!(new_order.items.len(), 1);
        assert_eq!(new_order.restaurant_id.as_deref(), Some("r1"));
        assert_eq!(new_order.source, OrderSource::Voice);
    }

    #[test]
    fn test_mixed_restaurants_have_no_single_restaurant() {
        let mut salad = line("Salad", 15, 1);
        salad.restaurant_id = "r2".to_string();
        let staged = StagedOrder::from_lines(vec![line("Burger", 25, 2), salad]);
        assert_eq!(staged.restaurant_id(), None);

        let new_order = NewOrder::from_staged(&staged);
        assert_eq!(new_order.restaurant_id, None);
        assert_eq!(new_order.items[1].restaurant_id, "r2");

        assert_eq!(StagedOrder::new().restaurant_id(), None);
    }
}
