//! Order collaborator traits.

use super::model::{NewOrder, Order};
use crate::error::Result;
use async_trait::async_trait;

/// Read access to a user's past orders.
#[async_trait]
pub trait OrderHistoryRepository: Send + Sync {
    /// Returns up to `limit` orders for `user_id`, newest first.
    async fn find_recent_orders(&self, user_id: &str, limit: usize) -> Result<Vec<Order>>;
}

/// Turns a confirmed conversation order into a real order.
///
/// Failures are reported as [`crate::error::BreakAppError::Collaborator`]
/// and are never retried by the engine.
#[async_trait]
pub trait OrderCreationService: Send + Sync {
    async fn create_order(&self, user_id: &str, order: NewOrder) -> Result<Order>;
}
