//! In-memory order history and order creation.

use async_trait::async_trait;
use breakapp_core::error::{BreakAppError, Result};
use breakapp_core::order::{NewOrder, Order, OrderCreationService, OrderHistoryRepository};
use chrono::Utc;
use tokio::sync::RwLock;

/// Stores committed orders and serves them back as history.
#[derive(Debug, Default)]
pub struct InMemoryOrderBook {
    orders: RwLock<Vec<Order>>,
}

impl InMemoryOrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the book with past orders.
    pub fn with_history(orders: Vec<Order>) -> Self {
        Self {
            orders: RwLock::new(orders),
        }
    }

    pub async fn orders_for(&self, user_id: &str) -> Vec<Order> {
        self.orders
            .read()
            .await
            .iter()
            .filter(|order| order.user_id == user_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl OrderHistoryRepository for InMemoryOrderBook {
    async fn find_recent_orders(&self, user_id: &str, limit: usize) -> Result<Vec<Order>> {
        let mut orders = self.orders_for(user_id).await;
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders.truncate(limit);
        Ok(orders)
    }
}

#[async_trait]
impl OrderCreationService for InMemoryOrderBook {
    async fn create_order(&self, user_id: &str, order: NewOrder) -> Result<Order> {
        if order.items.is_empty() {
            return Err(BreakAppError::collaborator(
                "order creation",
                "order has no items",
            ));
        }

        let created = Order {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            restaurant_id: order.restaurant_id,
            lines: order.items,
            notes: order.notes,
            source: order.source,
            created_at: Utc::now(),
        };
        self.orders.write().await.push(created.clone());
        tracing::debug!("[OrderBook] Created order {} for {}", created.id, user_id);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakapp_core::order::{OrderLine, OrderSource, StagedOrder};
    use chrono::Duration;
    use rust_decimal::Decimal;

    fn line() -> OrderLine {
        OrderLine {
            menu_item_id: "m1".to_string(),
            restaurant_id: "r1".to_string(),
            name: "Burger".to_string(),
            unit_price: Decimal::from(20),
            quantity: 1,
            note: None,
        }
    }

    fn past_order(id: &str, user_id: &str, days_ago: i64) -> Order {
        Order {
            id: id.to_string(),
            user_id: user_id.to_string(),
            restaurant_id: Some("r1".to_string()),
            lines: vec![line()],
            notes: None,
            source: OrderSource::App,
            created_at: Utc::now() - Duration::days(days_ago),
        }
    }

    #[tokio::test]
    async fn test_recent_orders_newest_first() {
        let book = InMemoryOrderBook::with_history(vec![
            past_order("old", "u1", 5),
            past_order("new", "u1", 1),
            past_order("other", "u2", 0),
            past_order("mid", "u1", 3),
        ]);

        let recent = book.find_recent_orders("u1", 2).await.unwrap();
        let ids: Vec<_> = recent.iter().map(|o| o.id.as_str()).collect();
        assert_eq!(ids, vec!["new", "mid"]);
    }

    #[tokio::test]
    async fn test_created_order_joins_history() {
        let book = InMemoryOrderBook::new();
        let staged = StagedOrder::from_lines(vec![line()]);
        let order = book
            .create_order("u1", NewOrder::from_staged(&staged))
            .await
            .unwrap();

        assert_eq!(order.source, OrderSource::Voice);
        assert_eq!(order.total(), Decimal::from(20));
        assert_eq!(book.find_recent_orders("u1", 10).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_order_is_rejected() {
        let book = InMemoryOrderBook::new();
        let err = book
            .create_order("u1", NewOrder::from_staged(&StagedOrder::new()))
            .await
            .unwrap_err();
        assert!(err.is_collaborator());
    }
}
