//! Application layer for BreakApp.
//!
//! This crate wires the domain model to its collaborators: it keeps
//! conversation sessions, routes classified utterances to intent handlers
//! and renders localized replies.

pub mod command;
pub mod composer;
pub mod dispatcher;
pub mod locator;
pub mod outcome;
pub mod predictor;
pub mod session;
pub mod voice_ordering_usecase;

pub use command::{
    CommandRequest, CommandResponse, ConfirmationResult, VoiceAnalytics, VoiceCommandRequest,
    VoiceCommandResponse,
};
pub use composer::{ComposedResponse, ResponseComposer};
pub use dispatcher::{CommandDispatcher, TurnContext};
pub use locator::RestaurantLocator;
pub use outcome::{CommandAction, CommandOutcome, Recommendation, ResultKind};
pub use predictor::UsualOrderPredictor;
pub use session::{SessionLease, SessionStore};
pub use voice_ordering_usecase::{Collaborators, VoiceOrderingUseCase};
