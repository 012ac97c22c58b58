//! Localized reply text for command outcomes.

use crate::outcome::CommandOutcome;
use breakapp_core::language::Language;
use breakapp_core::order::Order;
use rust_decimal::Decimal;

/// Reply text plus whether the client should ask for a yes/no.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedResponse {
    pub message: String,
    pub requires_confirmation: bool,
}

/// Renders outcomes as Arabic or English sentences.
///
/// Prices are shown with two decimals in Saudi riyals.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseComposer;

impl ResponseComposer {
    pub fn new() -> Self {
        Self
    }

    pub fn compose(&self, outcome: &CommandOutcome, language: Language) -> ComposedResponse {
        ComposedResponse {
            message: self.message(outcome, language),
            requires_confirmation: outcome.requires_confirmation(),
        }
    }

    pub fn order_confirmed(&self, order: &Order, language: Language) -> String {
        let total = price(order.total(), language);
        match language {
            Language::Arabic => format!("تم تأكيد طلبك. رقم الطلب {}، الإجمالي {}", order.id, total),
            Language::English => format!(
                "Your order has been placed. Order number {}, total {}.",
                order.id, total
            ),
        }
    }

    pub fn order_cancelled(&self, language: Language) -> String {
        match language {
            Language::Arabic => "تم إلغاء الطلب. هل تريد شيئاً آخر؟".to_string(),
            Language::English => "Your order has been cancelled. Anything else?".to_string(),
        }
    }

    fn message(&self, outcome: &CommandOutcome, language: Language) -> String {
        use Language::{Arabic, English};

        match (outcome, language) {
            (CommandOutcome::UsualOrderStaged { order }, Arabic) => format!(
                "طلبك المعتاد: {}. الإجمالي {}. هل تريد تأكيد الطلب؟",
                order.summary(),
                price(order.total(), language)
            ),
            (CommandOutcome::UsualOrderStaged { order }, English) => format!(
                "Your usual order: {}. Total {}. Shall I confirm it?",
                order.summary(),
                price(order.total(), language)
            ),

            (CommandOutcome::NoUsualOrder, Arabic) => {
                "لا يوجد لديك طلب معتاد محفوظ. هل تريد إنشاء واحد؟".to_string()
            }
            (CommandOutcome::NoUsualOrder, English) => {
                "You don't have a usual order yet. Would you like to create one?".to_string()
            }

            (CommandOutcome::ItemStaged { order }, _) => {
                let line = order.lines().first();
                let quantity = line.map_or(1, |l| l.quantity);
                let name = line.map_or("", |l| l.name.as_str());
                let total = price(order.total(), language);
                match language {
                    Arabic => format!("تريد طلب {} {}؟ السعر {}", quantity, name, total),
                    English => format!(
                        "You want {} x {}? The price is {}. Shall I confirm?",
                        quantity, name, total
                    ),
                }
            }

            (CommandOutcome::ClarifyItem, Arabic) => "ما هو العنصر الذي تريد طلبه؟".to_string(),
            (CommandOutcome::ClarifyItem, English) => {
                "Which item would you like to order?".to_string()
            }

            (CommandOutcome::ItemNotFound { requested }, Arabic) => {
                format!("لم أجد {} في القائمة. هل تريد البحث عن شيء آخر؟", requested)
            }
            (CommandOutcome::ItemNotFound { requested }, English) => format!(
                "I couldn't find {} on the menu. Would you like to search for something else?",
                requested
            ),

            (CommandOutcome::AddedToOrder { order, added }, Arabic) => format!(
                "تم إضافة {}. إجمالي الطلب الآن {}",
                added.name,
                price(order.total(), language)
            ),
            (CommandOutcome::AddedToOrder { order, added }, English) => format!(
                "Added {}. Your order total is now {}.",
                added.name,
                price(order.total(), language)
            ),

            (CommandOutcome::NoCurrentOrder, Arabic) => {
                "لا يوجد طلب حالي لإضافة عناصر إليه. هل تريد بدء طلب جديد؟".to_string()
            }
            (CommandOutcome::NoCurrentOrder, English) => {
                "There is no current order to add to. Would you like to start a new one?"
                    .to_string()
            }

            (CommandOutcome::MenuListing { items }, _) if items.is_empty() => match language {
                Arabic => "لا توجد عناصر متاحة حالياً.".to_string(),
                English => "No items are available right now.".to_string(),
            },
            (CommandOutcome::MenuListing { items }, _) => {
                let listing = items
                    .iter()
                    .map(|item| {
                        format!("{} - {}", item.localized_name(language), price(item.price, language))
                    })
                    .collect::<Vec<_>>()
                    .join(", ");
                match language {
                    Arabic => format!("الخيارات المتاحة اليوم: {}. أي منها تريد؟", listing),
                    English => format!("Today's options: {}. Which one would you like?", listing),
                }
            }

            (CommandOutcome::OrderCancelled, _) => self.order_cancelled(language),

            (CommandOutcome::Recommendations { items }, _) if items.is_empty() => match language {
                Arabic => "لا توجد توصيات حالياً.".to_string(),
                English => "I have no recommendations right now.".to_string(),
            },
            (CommandOutcome::Recommendations { items }, _) => {
                let listing = items
                    .iter()
                    .map(|rec| format!("{} - {}", rec.item.localized_name(language), rec.reason))
                    .collect::<Vec<_>>()
                    .join(", ");
                match language {
                    Arabic => format!("أنصحك بـ: {}. أي منها يعجبك؟", listing),
                    English => format!("I recommend: {}. Which one do you like?", listing),
                }
            }

            (CommandOutcome::NotUnderstood { .. }, Arabic) => {
                "لم أفهم طلبك، يرجى المحاولة مرة أخرى".to_string()
            }
            (CommandOutcome::NotUnderstood { .. }, English) => {
                "I didn't understand your request, please try again".to_string()
            }
        }
    }
}

/// Formats an amount with two decimals and the local currency name.
pub fn price(amount: Decimal, language: Language) -> String {
    let amount = amount.round_dp(2);
    match language {
        Language::Arabic => format!("{:.2} ريال", amount),
        Language::English => format!("{:.2} SAR", amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakapp_core::order::{OrderLine, StagedOrder};

    fn staged(quantity: u32) -> StagedOrder {
        StagedOrder::from_lines(vec![OrderLine {
            menu_item_id: "m1".to_string(),
            restaurant_id: "r1".to_string(),
            name: "Margherita Pizza".to_string(),
            unit_price: Decimal::new(3450, 2),
            quantity,
            note: None,
        }])
    }

    #[test]
    fn test_price_format() {
        assert_eq!(price(Decimal::from(25), Language::English), "25.00 SAR");
        assert_eq!(price(Decimal::new(125, 1), Language::Arabic), "12.50 ريال");
    }

    #[test]
    fn test_item_staged_message() {
        let response = ResponseComposer::new().compose(
            &CommandOutcome::ItemStaged { order: staged(2) },
            Language::English,
        );
        assert!(response.requires_confirmation);
        assert_eq!(
            response.message,
            "You want 2 x Margherita Pizza? The price is 69.00 SAR. Shall I confirm?"
        );
    }

    #[test]
    fn test_gap_messages_do_not_require_confirmation() {
        let composer = ResponseComposer::new();
        let response = composer.compose(&CommandOutcome::ClarifyItem, Language::Arabic);
        assert!(!response.requires_confirmation);
        assert_eq!(response.message, "ما هو العنصر الذي تريد طلبه؟");

        let response = composer.compose(
            &CommandOutcome::ItemNotFound {
                requested: "pizza".to_string(),
            },
            Language::English,
        );
        assert!(response.message.contains("couldn't find pizza"));
    }

    #[test]
    fn test_empty_listing() {
        let response = ResponseComposer::new().compose(
            &CommandOutcome::MenuListing { items: vec![] },
            Language::English,
        );
        assert_eq!(response.message, "No items are available right now.");
    }
}
