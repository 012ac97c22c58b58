//! Routes a classified utterance to its intent handler.

use crate::locator::RestaurantLocator;
use crate::outcome::{CommandOutcome, Recommendation};
use crate::predictor::UsualOrderPredictor;
use breakapp_core::config::EngineConfig;
use breakapp_core::conversation::ConversationSession;
use breakapp_core::error::Result;
use breakapp_core::geo::Coordinate;
use breakapp_core::language::Language;
use breakapp_core::menu::{MenuFilter, MenuRepository};
use breakapp_core::nlp::{ExtractedEntities, Intent, IntentClassification};
use breakapp_core::order::{OrderLine, StagedOrder};
use breakapp_core::preference::PreferenceRepository;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Per-turn inputs that are not part of the classification.
#[derive(Debug, Clone, Copy)]
pub struct TurnContext<'a> {
    pub user_id: &'a str,
    pub language: Language,
    pub location: Option<Coordinate>,
    pub now: DateTime<Utc>,
}

/// Result of matching extracted food entities against the menu.
enum ItemResolution {
    Resolved(OrderLine),
    Unresolved(CommandOutcome),
}

/// Executes intent handlers against an open session.
///
/// Handlers that stage or cancel mutate `session` in place; the caller
/// decides whether to persist it. A collaborator error aborts the turn
/// before anything is persisted.
pub struct CommandDispatcher {
    predictor: UsualOrderPredictor,
    locator: RestaurantLocator,
    menu: Arc<dyn MenuRepository>,
    preferences: Arc<dyn PreferenceRepository>,
    menu_listing_limit: usize,
    recommendation_limit: usize,
    recommendation_min_rating: f32,
}

impl CommandDispatcher {
    pub fn new(
        predictor: UsualOrderPredictor,
        locator: RestaurantLocator,
        menu: Arc<dyn MenuRepository>,
        preferences: Arc<dyn PreferenceRepository>,
        config: &EngineConfig,
    ) -> Self {
        Self {
            predictor,
            locator,
            menu,
            preferences,
            menu_listing_limit: config.menu_listing_limit,
            recommendation_limit: config.recommendation_limit,
            recommendation_min_rating: config.recommendation_min_rating,
        }
    }

    pub fn predictor(&self) -> &UsualOrderPredictor {
        &self.predictor
    }

    pub fn locator(&self) -> &RestaurantLocator {
        &self.locator
    }

    pub async fn dispatch(
        &self,
        classification: &IntentClassification,
        session: &mut ConversationSession,
        ctx: &TurnContext<'_>,
    ) -> Result<CommandOutcome> {
        tracing::debug!(
            "[CommandDispatcher] session={} intent={} confidence={}",
            session.id,
            classification.intent,
            classification.confidence
        );

        let outcome = match classification.intent {
            Intent::OrderUsual => self.handle_usual_order(session, ctx).await?,
            Intent::OrderItem => self.handle_item_order(&classification.entities, session, ctx).await?,
            Intent::AddToOrder => self.handle_add_to_order(&classification.entities, session, ctx).await?,
            Intent::SearchMenu => self.handle_menu_search(ctx).await?,
            Intent::CancelOrder => {
                session.cancel(ctx.now)?;
                CommandOutcome::OrderCancelled
            }
            Intent::GetRecommendations => self.handle_recommendations(ctx).await?,
            Intent::Unknown => CommandOutcome::NotUnderstood {
                suggestions: classification.suggestions.clone(),
            },
        };

        tracing::debug!(
            "[CommandDispatcher] session={} action={} kind={}",
            session.id,
            outcome.action(),
            outcome.kind()
        );
        Ok(outcome)
    }

    async fn handle_usual_order(
        &self,
        session: &mut ConversationSession,
        ctx: &TurnContext<'_>,
    ) -> Result<CommandOutcome> {
        match self.predictor.predict(ctx.user_id, ctx.language).await? {
            Some(order) => {
                session.stage(order.clone(), ctx.now)?;
                Ok(CommandOutcome::UsualOrderStaged { order })
            }
            None => Ok(CommandOutcome::NoUsualOrder),
        }
    }

    async fn handle_item_order(
        &self,
        entities: &ExtractedEntities,
        session: &mut ConversationSession,
        ctx: &TurnContext<'_>,
    ) -> Result<CommandOutcome> {
        match self.resolve_item(entities, ctx.language).await? {
            ItemResolution::Resolved(line) => {
                let order = StagedOrder::from_lines(vec![line]);
                session.stage(order.clone(), ctx.now)?;
                Ok(CommandOutcome::ItemStaged { order })
            }
            ItemResolution::Unresolved(outcome) => Ok(outcome),
        }
    }

    async fn handle_add_to_order(
        &self,
        entities: &ExtractedEntities,
        session: &mut ConversationSession,
        ctx: &TurnContext<'_>,
    ) -> Result<CommandOutcome> {
        let Some(current) = session.staged_order().cloned() else {
            return Ok(CommandOutcome::NoCurrentOrder);
        };

        match self.resolve_item(entities, ctx.language).await? {
            ItemResolution::Resolved(line) => {
                let mut order = current;
                order.push_line(line.clone());
                session.stage(order.clone(), ctx.now)?;
                Ok(CommandOutcome::AddedToOrder { order, added: line })
            }
            ItemResolution::Unresolved(outcome) => Ok(outcome),
        }
    }

    /// First menu match for the extracted food items, times the spoken quantity.
    async fn resolve_item(
        &self,
        entities: &ExtractedEntities,
        language: Language,
    ) -> Result<ItemResolution> {
        let requested = entities.food_values();
        let Some(first_requested) = requested.first().cloned() else {
            return Ok(ItemResolution::Unresolved(CommandOutcome::ClarifyItem));
        };

        let matches = self.menu.find_menu_items_by_name(&requested).await?;
        let Some(item) = matches.into_iter().next() else {
            return Ok(ItemResolution::Unresolved(CommandOutcome::ItemNotFound {
                requested: first_requested,
            }));
        };

        let quantity = entities.quantity_or_default();
        Ok(ItemResolution::Resolved(OrderLine::for_item(
            &item,
            item.localized_name(language),
            quantity,
        )))
    }

    async fn handle_menu_search(&self, ctx: &TurnContext<'_>) -> Result<CommandOutcome> {
        let diet_types = self
            .preferences
            .dietary_profile(ctx.user_id)
            .await?
            .map(|profile| profile.diet_types)
            .unwrap_or_default();

        let restaurant_ids = match ctx.location {
            Some(origin) => Some(self.locator.nearby_restaurant_ids(origin, None).await?),
            None => None,
        };

        let filter = MenuFilter {
            diet_types,
            restaurant_ids,
            ..Default::default()
        }
        .with_limit(self.menu_listing_limit);

        let items = self.menu.find_available_menu_items(&filter).await?;
        Ok(CommandOutcome::MenuListing { items })
    }

    async fn handle_recommendations(&self, ctx: &TurnContext<'_>) -> Result<CommandOutcome> {
        let filter = MenuFilter {
            min_rating: Some(self.recommendation_min_rating),
            ..Default::default()
        }
        .with_limit(self.recommendation_limit);

        let items = self
            .menu
            .find_available_menu_items(&filter)
            .await?
            .into_iter()
            .map(|item| Recommendation {
                reason: recommendation_reason(ctx.language).to_string(),
                item,
            })
            .collect();
        Ok(CommandOutcome::Recommendations { items })
    }
}

fn recommendation_reason(language: Language) -> &'static str {
    match language {
        Language::Arabic => "عنصر عالي التقييم ومناسب لتفضيلاتك",
        Language::English => "Highly rated and a good fit for your preferences",
    }
}

