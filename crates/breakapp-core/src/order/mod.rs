//! Order domain module.
//!
//! - `model`: `OrderLine`, `StagedOrder`, `NewOrder`, `Order`
//! - `repository`: order history and order creation collaborators

mod model;
mod repository;

pub use model::{NewOrder, Order, OrderLine, OrderSource, StagedOrder};
pub use repository::{OrderCreationService, OrderHistoryRepository};
