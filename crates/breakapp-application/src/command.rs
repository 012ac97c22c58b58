//! Request and response types of the voice ordering boundary.

use crate::outcome::{CommandAction, CommandOutcome, Recommendation, ResultKind};
use breakapp_core::conversation::SessionPhase;
use breakapp_core::geo::Coordinate;
use breakapp_core::language::Language;
use breakapp_core::menu::MenuItem;
use breakapp_core::nlp::{Intent, IntentClassification};
use breakapp_core::order::{Order, StagedOrder};
use breakapp_core::speech::{SynthesizedAudio, Transcript};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One text turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandRequest {
    pub user_id: String,
    pub transcript: String,
    #[serde(default)]
    pub language: Language,
    /// Continue this conversation; a new one is started when absent
    #[serde(default)]
    pub session_id: Option<String>,
    /// Caller position, narrows menu searches to nearby restaurants
    #[serde(default)]
    pub location: Option<Coordinate>,
}

impl CommandRequest {
    pub fn new(user_id: impl Into<String>, transcript: impl Into<String>, language: Language) -> Self {
        Self {
            user_id: user_id.into(),
            transcript: transcript.into(),
            language,
            session_id: None,
            location: None,
        }
    }

    pub fn in_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }

    pub fn at(mut self, location: Coordinate) -> Self {
        self.location = Some(location);
        self
    }
}

/// One audio turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceCommandRequest {
    pub user_id: String,
    pub audio: Vec<u8>,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub location: Option<Coordinate>,
}

/// Reply to a turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommandResponse {
    /// Session the turn was recorded on; differs from the request when the
    /// requested session was already closed
    pub session_id: String,
    pub message: String,
    pub requires_confirmation: bool,
    pub kind: ResultKind,
    pub action: CommandAction,
    pub intent: Intent,
    pub confidence: f32,
    pub phase: SessionPhase,
    #[serde(default)]
    pub staged_order: Option<StagedOrder>,
    #[serde(default)]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub menu_items: Vec<MenuItem>,
    #[serde(default)]
    pub recommendations: Vec<Recommendation>,
    #[serde(default)]
    pub suggestions: Vec<String>,
}

impl CommandResponse {
    pub(crate) fn build(
        session_id: String,
        phase: SessionPhase,
        classification: &IntentClassification,
        outcome: CommandOutcome,
        message: String,
        requires_confirmation: bool,
    ) -> Self {
        let kind = outcome.kind();
        let action = outcome.action();
        let staged_order = outcome.staged_order().cloned();
        let total = staged_order.as_ref().map(StagedOrder::total);

        let (menu_items, recommendations, suggestions) = match outcome {
            CommandOutcome::MenuListing { items } => (items, Vec::new(), Vec::new()),
            CommandOutcome::Recommendations { items } => (Vec::new(), items, Vec::new()),
            CommandOutcome::NotUnderstood { suggestions } => (Vec::new(), Vec::new(), suggestions),
            _ => (Vec::new(), Vec::new(), Vec::new()),
        };

        Self {
            session_id,
            message,
            requires_confirmation,
            kind,
            action,
            intent: classification.intent,
            confidence: classification.confidence,
            phase,
            staged_order,
            total,
            menu_items,
            recommendations,
            suggestions,
        }
    }
}

/// Reply to an audio turn: what was heard, the reply, and the reply spoken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoiceCommandResponse {
    pub transcript: Transcript,
    pub response: CommandResponse,
    pub audio: SynthesizedAudio,
}

/// Outcome of answering a confirmation prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ConfirmationResult {
    Confirmed {
        session_id: String,
        order: Order,
        message: String,
    },
    Cancelled {
        session_id: String,
        message: String,
    },
}

impl ConfirmationResult {
    pub fn session_id(&self) -> &str {
        match self {
            Self::Confirmed { session_id, .. } | Self::Cancelled { session_id, .. } => session_id,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            Self::Confirmed { message, .. } | Self::Cancelled { message, .. } => message,
        }
    }
}

/// Per-user conversation statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceAnalytics {
    pub total_sessions: usize,
    pub confirmed_orders: usize,
    /// Percentage of sessions that ended in an order, rounded
    pub success_rate: u32,
    /// Mean time from first to last activity, rounded seconds
    pub average_session_duration_secs: u64,
}
