//! Shared fixtures for application integration tests.

#![allow(dead_code)]

use async_trait::async_trait;
use breakapp_application::{Collaborators, VoiceOrderingUseCase};
use breakapp_core::config::EngineConfig;
use breakapp_core::error::{BreakAppError, Result};
use breakapp_core::geo::{BoundingBox, Coordinate};
use breakapp_core::language::Language;
use breakapp_core::menu::{MenuFilter, MenuItem, MenuRepository, Restaurant};
use breakapp_core::order::{NewOrder, Order, OrderCreationService, OrderLine, OrderSource};
use breakapp_core::preference::{DietaryProfile, VoiceType};
use breakapp_core::speech::{SynthesisService, SynthesizedAudio, Transcript, TranscriptionService};
use breakapp_infrastructure::{
    InMemoryConversationSessionRepository, InMemoryMenuCatalog, InMemoryOrderBook,
    InMemoryPreferenceRepository, TextPreviewSynthesisService, Utf8TranscriptionService,
};
use chrono::{Duration, Utc};
use rust_decimal::Decimal;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

pub const CREW_USER: &str = "crew-1";
pub const NEW_USER: &str = "crew-2";

/// Riyadh set location the fixture restaurants cluster around.
pub fn set_location() -> Coordinate {
    Coordinate::new(24.7136, 46.6753)
}

/// Order creation that records every call and can be told to fail.
#[derive(Default)]
pub struct RecordingOrderService {
    calls: Mutex<Vec<(String, NewOrder)>>,
    failing: AtomicBool,
}

impl RecordingOrderService {
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<(String, NewOrder)> {
        self.calls.lock().unwrap().last().cloned()
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

#[async_trait]
impl OrderCreationService for RecordingOrderService {
    async fn create_order(&self, user_id: &str, order: NewOrder) -> Result<Order> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BreakAppError::collaborator("order creation", "service unavailable"));
        }

        let mut calls = self.calls.lock().unwrap();
        calls.push((user_id.to_string(), order.clone()));
        Ok(Order {
            id: format!("order-{}", calls.len()),
            user_id: user_id.to_string(),
            restaurant_id: order.restaurant_id,
            lines: order.items,
            notes: order.notes,
            source: order.source,
            created_at: Utc::now(),
        })
    }
}

/// Menu catalog that delegates to the in-memory catalog until told to fail.
pub struct FlakyMenuCatalog {
    inner: InMemoryMenuCatalog,
    failing: AtomicBool,
}

impl FlakyMenuCatalog {
    pub fn new(inner: InMemoryMenuCatalog) -> Self {
        Self {
            inner,
            failing: AtomicBool::new(false),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    fn check(&self) -> Result<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(BreakAppError::data_access("menu store unreachable"));
        }
        Ok(())
    }
}

#[async_trait]
impl MenuRepository for FlakyMenuCatalog {
    async fn find_menu_items_by_name(&self, names: &[String]) -> Result<Vec<MenuItem>> {
        self.check()?;
        self.inner.find_menu_items_by_name(names).await
    }

    async fn find_available_menu_items(&self, filter: &MenuFilter) -> Result<Vec<MenuItem>> {
        self.check()?;
        self.inner.find_available_menu_items(filter).await
    }

    async fn find_active_restaurants_in_bounding_box(
        &self,
        bbox: &BoundingBox,
    ) -> Result<Vec<Restaurant>> {
        self.check()?;
        self.inner.find_active_restaurants_in_bounding_box(bbox).await
    }

    async fn find_menu_item(&self, menu_item_id: &str) -> Result<Option<MenuItem>> {
        self.check()?;
        self.inner.find_menu_item(menu_item_id).await
    }
}

/// Speech services that are always down.
pub struct UnavailableSpeech;

#[async_trait]
impl TranscriptionService for UnavailableSpeech {
    async fn transcribe(&self, _audio: &[u8], _language: Language) -> Result<Transcript> {
        Err(BreakAppError::collaborator("transcription", "down"))
    }
}

#[async_trait]
impl SynthesisService for UnavailableSpeech {
    async fn synthesize(
        &self,
        _text: &str,
        _language: Language,
        _voice: VoiceType,
    ) -> Result<SynthesizedAudio> {
        Err(BreakAppError::collaborator("synthesis", "down"))
    }
}

pub struct Fixture {
    pub usecase: VoiceOrderingUseCase,
    pub menu: Arc<FlakyMenuCatalog>,
    pub orders: Arc<RecordingOrderService>,
    pub sessions: Arc<InMemoryConversationSessionRepository>,
    pub preferences: Arc<InMemoryPreferenceRepository>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self::build(config, |_| {})
    }

    /// Builds the fixture, letting the caller swap collaborators before the
    /// use case is created.
    pub fn build(config: EngineConfig, customize: impl FnOnce(&mut Collaborators)) -> Self {
        let menu = Arc::new(FlakyMenuCatalog::new(InMemoryMenuCatalog::new(
            restaurants(),
            menu_items(),
        )));
        let orders = Arc::new(RecordingOrderService::default());
        let sessions = Arc::new(InMemoryConversationSessionRepository::new());
        let preferences = Arc::new(InMemoryPreferenceRepository::with_dietary_profiles(vec![
            DietaryProfile {
                user_id: NEW_USER.to_string(),
                diet_types: vec!["vegetarian".to_string()],
            },
        ]));

        let mut collaborators = Collaborators {
            menu: menu.clone(),
            order_history: Arc::new(InMemoryOrderBook::with_history(history())),
            order_creation: orders.clone(),
            sessions: sessions.clone(),
            preferences: preferences.clone(),
            transcription: Arc::new(Utf8TranscriptionService),
            synthesis: Arc::new(TextPreviewSynthesisService),
        };

        customize(&mut collaborators);

        Self {
            usecase: VoiceOrderingUseCase::new(collaborators, config),
            menu,
            orders,
            sessions,
            preferences,
        }
    }
}

fn restaurant(id: &str, name: &str, latitude: f64, longitude: f64, is_active: bool) -> Restaurant {
    Restaurant {
        id: id.to_string(),
        name: name.to_string(),
        coordinate: Coordinate::new(latitude, longitude),
        is_active,
    }
}

pub fn restaurants() -> Vec<Restaurant> {
    vec![
        restaurant("r-pizza", "Studio Pizza", 24.7136, 46.6753, true),
        restaurant("r-burger", "Backlot Burgers", 24.7200, 46.6800, true),
        restaurant("r-jeddah", "Corniche Grill", 21.5433, 39.1728, true),
        restaurant("r-closed", "Closed Cafe", 24.7140, 46.6760, false),
    ]
}

#[allow(clippy::too_many_arguments)]
fn item(
    id: &str,
    restaurant_id: &str,
    name: &str,
    name_ar: &str,
    price: Decimal,
    rating: f32,
    diet_types: &[&str],
    is_available: bool,
) -> MenuItem {
    MenuItem {
        id: id.to_string(),
        restaurant_id: restaurant_id.to_string(),
        name: name.to_string(),
        name_ar: Some(name_ar.to_string()),
        description: String::new(),
        description_ar: None,
        price,
        is_available,
        category: "main".to_string(),
        rating,
        diet_types: diet_types.iter().map(|d| d.to_string()).collect(),
    }
}

pub fn menu_items() -> Vec<MenuItem> {
    vec![
        item(
            "m-margherita",
            "r-pizza",
            "Margherita Pizza",
            "بيتزا مارغريتا",
            Decimal::new(3450, 2),
            4.5,
            &["vegetarian"],
            true,
        ),
        item(
            "m-pepperoni",
            "r-pizza",
            "Pepperoni Pizza",
            "بيتزا بيبروني",
            Decimal::from(40),
            5.0,
            &[],
            false,
        ),
        item(
            "m-burger",
            "r-burger",
            "Classic Burger",
            "برجر كلاسيك",
            Decimal::from(28),
            4.2,
            &["halal"],
            true,
        ),
        item(
            "m-salad",
            "r-pizza",
            "Garden Salad",
            "سلطة الحديقة",
            Decimal::from(18),
            4.8,
            &["vegetarian", "vegan"],
            true,
        ),
        item(
            "m-shawarma",
            "r-jeddah",
            "Chicken Shawarma",
            "شاورما دجاج",
            Decimal::from(15),
            3.9,
            &["halal"],
            true,
        ),
    ]
}

fn past_line(menu_item_id: &str, restaurant_id: &str, quantity: u32) -> OrderLine {
    OrderLine {
        menu_item_id: menu_item_id.to_string(),
        restaurant_id: restaurant_id.to_string(),
        name: menu_item_id.to_string(),
        unit_price: Decimal::from(1),
        quantity,
        note: None,
    }
}

/// Two past orders for the crew user: burgers twice, a salad once.
pub fn history() -> Vec<Order> {
    let now = Utc::now();
    vec![
        Order {
            id: "past-1".to_string(),
            user_id: CREW_USER.to_string(),
            restaurant_id: None,
            lines: vec![
                past_line("m-burger", "r-burger", 2),
                past_line("m-salad", "r-pizza", 1),
            ],
            notes: None,
            source: OrderSource::App,
            created_at: now - Duration::days(1),
        },
        Order {
            id: "past-2".to_string(),
            user_id: CREW_USER.to_string(),
            restaurant_id: Some("r-burger".to_string()),
            lines: vec![past_line("m-burger", "r-burger", 1)],
            notes: None,
            source: OrderSource::Voice,
            created_at: now - Duration::days(2),
        },
    ]
}
