//! Result of dispatching one conversational turn.

use breakapp_core::menu::MenuItem;
use breakapp_core::order::{OrderLine, StagedOrder};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Coarse classification of an outcome, so callers can tell success apart
/// from clarification requests without parsing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ResultKind {
    /// An order is staged and awaits confirmation
    Staged,
    Informational,
    /// A logical gap: nothing was staged, the user should rephrase
    ClarificationNeeded,
    Cancelled,
    NotUnderstood,
}

/// Fine-grained action code reported to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum CommandAction {
    OrderUsual,
    NoUsualOrder,
    ClarifyItem,
    ItemNotFound,
    OrderItem,
    AddToOrder,
    NoCurrentOrder,
    ShowMenu,
    CancelOrder,
    ShowRecommendations,
    Unknown,
}

/// A highly rated item and why it is suggested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub item: MenuItem,
    pub reason: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutcome {
    UsualOrderStaged {
        order: StagedOrder,
    },
    NoUsualOrder,
    ItemStaged {
        order: StagedOrder,
    },
    ClarifyItem,
    ItemNotFound {
        requested: String,
    },
    AddedToOrder {
        order: StagedOrder,
        added: OrderLine,
    },
    NoCurrentOrder,
    MenuListing {
        items: Vec<MenuItem>,
    },
    OrderCancelled,
    Recommendations {
        items: Vec<Recommendation>,
    },
    NotUnderstood {
        suggestions: Vec<String>,
    },
}

impl CommandOutcome {
    pub fn kind(&self) -> ResultKind {
        match self {
            Self::UsualOrderStaged { .. } | Self::ItemStaged { .. } | Self::AddedToOrder { .. } => {
                ResultKind::Staged
            }
            Self::NoUsualOrder | Self::ClarifyItem | Self::ItemNotFound { .. } | Self::NoCurrentOrder => {
                ResultKind::ClarificationNeeded
            }
            Self::MenuListing { .. } | Self::Recommendations { .. } => ResultKind::Informational,
            Self::OrderCancelled => ResultKind::Cancelled,
            Self::NotUnderstood { .. } => ResultKind::NotUnderstood,
        }
    }

    pub fn action(&self) -> CommandAction {
        match self {
            Self::UsualOrderStaged { .. } => CommandAction::OrderUsual,
            Self::NoUsualOrder => CommandAction::NoUsualOrder,
            Self::ItemStaged { .. } => CommandAction::OrderItem,
            Self::ClarifyItem => CommandAction::ClarifyItem,
            Self::ItemNotFound { .. } => CommandAction::ItemNotFound,
            Self::AddedToOrder { .. } => CommandAction::AddToOrder,
            Self::NoCurrentOrder => CommandAction::NoCurrentOrder,
            Self::MenuListing { .. } => CommandAction::ShowMenu,
            Self::OrderCancelled => CommandAction::CancelOrder,
            Self::Recommendations { .. } => CommandAction::ShowRecommendations,
            Self::NotUnderstood { .. } => CommandAction::Unknown,
        }
    }

    /// Only staged orders wait for a yes/no.
    pub fn requires_confirmation(&self) -> bool {
        self.kind() == ResultKind::Staged
    }

    pub fn staged_order(&self) -> Option<&StagedOrder> {
        match self {
            Self::UsualOrderStaged { order }
            | Self::ItemStaged { order }
            | Self::AddedToOrder { order, .. } => Some(order),
            _ => None,
        }
    }
}
