//! Usual-order prediction from order history.

use breakapp_core::error::Result;
use breakapp_core::language::Language;
use breakapp_core::menu::MenuRepository;
use breakapp_core::order::{OrderHistoryRepository, OrderLine, StagedOrder};
use std::sync::Arc;

/// Rebuilds a user's "usual" order from their most frequent recent items.
///
/// Items are ranked by total quantity over the last `window` orders, ties
/// keep first-seen order (newest order first). Each kept item's quantity is
/// the per-order average, rounded up.
pub struct UsualOrderPredictor {
    history: Arc<dyn OrderHistoryRepository>,
    menu: Arc<dyn MenuRepository>,
    window: usize,
    max_items: usize,
}

struct Tally {
    snapshot: OrderLine,
    total_quantity: u32,
}

impl UsualOrderPredictor {
    pub fn new(
        history: Arc<dyn OrderHistoryRepository>,
        menu: Arc<dyn MenuRepository>,
        window: usize,
        max_items: usize,
    ) -> Self {
        Self {
            history,
            menu,
            window,
            max_items,
        }
    }

    /// Returns `None` when the user has no usable history.
    pub async fn predict(&self, user_id: &str, language: Language) -> Result<Option<StagedOrder>> {
        let orders = self.history.find_recent_orders(user_id, self.window).await?;
        if orders.is_empty() {
            return Ok(None);
        }

        let mut tallies: Vec<Tally> = Vec::new();
        for line in orders.iter().flat_map(|order| order.lines.iter()) {
            match tallies
                .iter_mut()
                .find(|t| t.snapshot.menu_item_id == line.menu_item_id)
            {
                Some(tally) => {
                    tally.total_quantity = tally.total_quantity.saturating_add(line.quantity)
                }
                None => tallies.push(Tally {
                    snapshot: line.clone(),
                    total_quantity: line.quantity,
                }),
            }
        }

        // stable: ties keep first-seen order
        tallies.sort_by(|a, b| b.total_quantity.cmp(&a.total_quantity));
        tallies.truncate(self.max_items);

        let orders_sampled = u32::try_from(orders.len()).unwrap_or(u32::MAX);
        let mut staged = StagedOrder::new();
        for tally in tallies {
            let quantity = tally.total_quantity.div_ceil(orders_sampled).max(1);
            let current = self.menu.find_menu_item(&tally.snapshot.menu_item_id).await?;
            let line = match current {
                Some(item) => OrderLine::for_item(&item, item.localized_name(language), quantity),
                None => OrderLine {
                    quantity,
                    note: None,
                    ..tally.snapshot
                },
            };
            staged.push_line(line);
        }

        if staged.is_empty() {
            return Ok(None);
        }

        tracing::debug!(
            "[UsualOrderPredictor] user={} sampled={} usual=[{}]",
            user_id,
            orders.len(),
            staged.summary()
        );
        Ok(Some(staged))
    }
}
