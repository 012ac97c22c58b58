//! Voice ordering use case implementation.
//!
//! `VoiceOrderingUseCase` is the boundary of the engine: it takes a
//! transcript (or audio), runs classification and dispatch inside the
//! session lock, and turns the outcome into a localized response. A second
//! entry point, [`VoiceOrderingUseCase::confirm`], finalizes or discards the
//! staged order.

use crate::command::{
    CommandRequest, CommandResponse, ConfirmationResult, VoiceAnalytics, VoiceCommandRequest,
    VoiceCommandResponse,
};
use crate::composer::ResponseComposer;
use crate::dispatcher::{CommandDispatcher, TurnContext};
use crate::locator::RestaurantLocator;
use crate::predictor::UsualOrderPredictor;
use crate::session::{SessionLease, SessionStore};
use breakapp_core::config::EngineConfig;
use breakapp_core::conversation::{ConversationSession, ConversationSessionRepository};
use breakapp_core::error::{BreakAppError, Result};
use breakapp_core::geo::{Coordinate, Distanced, GeoMatcher};
use breakapp_core::language::Language;
use breakapp_core::menu::{MenuFilter, MenuItem, MenuRepository, Restaurant};
use breakapp_core::nlp::{IntentClassifier, KeywordIntentClassifier};
use breakapp_core::order::{OrderCreationService, OrderHistoryRepository, StagedOrder};
use breakapp_core::preference::{PreferenceRepository, VoicePreferences, VoiceType};
use breakapp_core::speech::{SynthesisService, SynthesizedAudio, TranscriptionService};
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A processed turn whose session changes are not yet saved.
struct PendingTurn {
    _lease: SessionLease,
    session: ConversationSession,
    response: CommandResponse,
}

/// Default number of results for free-text menu search.
pub const DEFAULT_SEARCH_LIMIT: usize = 10;

/// External collaborators the use case is wired with.
#[derive(Clone)]
pub struct Collaborators {
    pub menu: Arc<dyn MenuRepository>,
    pub order_history: Arc<dyn OrderHistoryRepository>,
    pub order_creation: Arc<dyn OrderCreationService>,
    pub sessions: Arc<dyn ConversationSessionRepository>,
    pub preferences: Arc<dyn PreferenceRepository>,
    pub transcription: Arc<dyn TranscriptionService>,
    pub synthesis: Arc<dyn SynthesisService>,
}

/// Use case for conversational ordering.
///
/// # Thread Safety
///
/// All components are behind `Arc`; concurrent calls for different sessions
/// run in parallel, calls for the same session are serialized by the
/// [`SessionStore`].
pub struct VoiceOrderingUseCase {
    classifier: Arc<dyn IntentClassifier>,
    dispatcher: CommandDispatcher,
    composer: ResponseComposer,
    sessions: SessionStore,
    menu: Arc<dyn MenuRepository>,
    order_creation: Arc<dyn OrderCreationService>,
    preferences: Arc<dyn PreferenceRepository>,
    transcription: Arc<dyn TranscriptionService>,
    synthesis: Arc<dyn SynthesisService>,
    config: EngineConfig,
}

impl VoiceOrderingUseCase {
    /// Creates a use case with the keyword intent classifier.
    pub fn new(collaborators: Collaborators, config: EngineConfig) -> Self {
        let predictor = UsualOrderPredictor::new(
            collaborators.order_history.clone(),
            collaborators.menu.clone(),
            config.usual_order_window,
            config.usual_order_max_items,
        );
        let locator = RestaurantLocator::new(
            collaborators.menu.clone(),
            GeoMatcher::new(config.search_radius_km),
        );
        let dispatcher = CommandDispatcher::new(
            predictor,
            locator,
            collaborators.menu.clone(),
            collaborators.preferences.clone(),
            &config,
        );

        Self {
            classifier: Arc::new(KeywordIntentClassifier::new()),
            dispatcher,
            composer: ResponseComposer::new(),
            sessions: SessionStore::new(collaborators.sessions, config.session_ttl()),
            menu: collaborators.menu,
            order_creation: collaborators.order_creation,
            preferences: collaborators.preferences,
            transcription: collaborators.transcription,
            synthesis: collaborators.synthesis,
            config,
        }
    }

    /// Replaces the intent classifier.
    pub fn with_classifier(mut self, classifier: Arc<dyn IntentClassifier>) -> Self {
        self.classifier = classifier;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn session_store(&self) -> &SessionStore {
        &self.sessions
    }

    /// Processes one text turn.
    ///
    /// # Errors
    ///
    /// - `InvalidInput`: empty user ID or transcript
    /// - `NotFound`: the session belongs to another user
    /// - `Collaborator`/`DataAccess`: a collaborator failed; nothing is saved
    pub async fn process_command(&self, request: CommandRequest) -> Result<CommandResponse> {
        let turn = self.prepare_turn(request).await?;
        self.commit_turn(turn).await
    }

    /// Transcribes audio, processes it as a text turn, and speaks the reply
    /// in the user's preferred voice.
    ///
    /// The turn is saved only once the reply audio exists, so a failed
    /// transcription or synthesis leaves the session as it was.
    pub async fn process_voice_command(
        &self,
        request: VoiceCommandRequest,
    ) -> Result<VoiceCommandResponse> {
        if request.audio.is_empty() {
            return Err(BreakAppError::invalid_input("audio is empty"));
        }

        let transcript = self
            .transcription
            .transcribe(&request.audio, request.language)
            .await?;
        tracing::debug!(
            "[VoiceOrderingUseCase] Transcribed '{}' (confidence {})",
            transcript.text,
            transcript.confidence
        );

        let language = request.language;
        let turn = self
            .prepare_turn(CommandRequest {
                user_id: request.user_id,
                transcript: transcript.text.clone(),
                language,
                session_id: request.session_id,
                location: request.location,
            })
            .await?;

        let voice = self.voice_preferences(&turn.session.user_id).await?.voice_type;
        let audio = match self
            .synthesis
            .synthesize(&turn.response.message, language, voice)
            .await
        {
            Ok(audio) => audio,
            Err(e) => {
                tracing::warn!(
                    "[VoiceOrderingUseCase] Reply synthesis failed for session {}: {}",
                    turn.session.id,
                    e
                );
                return Err(e);
            }
        };

        let response = self.commit_turn(turn).await?;
        Ok(VoiceCommandResponse {
            transcript,
            response,
            audio,
        })
    }

    /// Answers the confirmation prompt of a session.
    ///
    /// `true` creates the order from the staged order and closes the session;
    /// `false` cancels the session, which is allowed even with nothing staged.
    ///
    /// # Errors
    ///
    /// - `NotFound`: no such session for this user
    /// - `NothingToConfirm`: `true` on a session without a staged order
    /// - `SessionClosed`/`SessionExpired`: the session can no longer change
    /// - `Collaborator`: order creation failed; the session stays staged
    pub async fn confirm(
        &self,
        user_id: &str,
        session_id: &str,
        confirmed: bool,
    ) -> Result<ConfirmationResult> {
        let now = Utc::now();

        if confirmed {
            let (session, order) = self
                .sessions
                .confirm(user_id, session_id, self.order_creation.as_ref(), now)
                .await?;
            let message = self.composer.order_confirmed(&order, session.language);
            Ok(ConfirmationResult::Confirmed {
                session_id: session.id,
                order,
                message,
            })
        } else {
            let session = self.sessions.cancel(user_id, session_id, now).await?;
            Ok(ConfirmationResult::Cancelled {
                message: self.composer.order_cancelled(session.language),
                session_id: session.id,
            })
        }
    }

    /// Predicts the user's usual order without staging it.
    pub async fn usual_order(&self, user_id: &str, language: Language) -> Result<Option<StagedOrder>> {
        self.dispatcher.predictor().predict(user_id, language).await
    }

    /// Free-text search over available items.
    ///
    /// Every whitespace separated term is matched against names,
    /// descriptions and category; an item matching any term is returned.
    pub async fn search_menu(
        &self,
        query: &str,
        restaurant_id: Option<&str>,
        limit: Option<usize>,
    ) -> Result<Vec<MenuItem>> {
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        if terms.is_empty() {
            return Err(BreakAppError::invalid_input("search query is empty"));
        }

        let filter = MenuFilter {
            terms,
            restaurant_ids: restaurant_id.map(|id| vec![id.to_string()]),
            ..Default::default()
        }
        .with_limit(limit.unwrap_or(DEFAULT_SEARCH_LIMIT));

        self.menu.find_available_menu_items(&filter).await
    }

    pub async fn nearby_restaurants(
        &self,
        origin: Coordinate,
        radius_km: Option<f64>,
    ) -> Result<Vec<Distanced<Restaurant>>> {
        self.dispatcher.locator().find_nearby(origin, radius_km).await
    }

    pub async fn nearby_menu_items(
        &self,
        origin: Coordinate,
        radius_km: Option<f64>,
    ) -> Result<Vec<Distanced<MenuItem>>> {
        self.dispatcher
            .locator()
            .nearby_menu_items(origin, radius_km, MenuFilter::default())
            .await
    }

    /// Synthesizes a reply; the voice defaults to female.
    pub async fn speak(
        &self,
        text: &str,
        language: Language,
        voice: Option<VoiceType>,
    ) -> Result<SynthesizedAudio> {
        if text.trim().is_empty() {
            return Err(BreakAppError::invalid_input("text is empty"));
        }
        self.synthesis
            .synthesize(text, language, voice.unwrap_or_default())
            .await
    }

    /// Stored preferences, or the defaults when the user never saved any.
    pub async fn voice_preferences(&self, user_id: &str) -> Result<VoicePreferences> {
        Ok(self
            .preferences
            .voice_preferences(user_id)
            .await?
            .unwrap_or_else(|| VoicePreferences::defaults_for(user_id)))
    }

    pub async fn update_voice_preferences(
        &self,
        preferences: VoicePreferences,
    ) -> Result<VoicePreferences> {
        if preferences.user_id.trim().is_empty() {
            return Err(BreakAppError::invalid_input("user_id is required"));
        }
        self.preferences.save_voice_preferences(&preferences).await?;
        tracing::info!(
            "[VoiceOrderingUseCase] Updated voice preferences for {}",
            preferences.user_id
        );
        Ok(preferences)
    }

    /// Session statistics for sessions created within `[from, to]`.
    pub async fn voice_analytics(
        &self,
        user_id: &str,
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    ) -> Result<VoiceAnalytics> {
        let sessions: Vec<ConversationSession> = self
            .sessions
            .repository()
            .list_by_user(user_id)
            .await?
            .into_iter()
            .filter(|s| from.is_none_or(|from| s.created_at >= from))
            .filter(|s| to.is_none_or(|to| s.created_at <= to))
            .collect();

        let total_sessions = sessions.len();
        let confirmed_orders = sessions.iter().filter(|s| s.is_confirmed()).count();

        let (success_rate, average_session_duration_secs) = if total_sessions == 0 {
            (0, 0)
        } else {
            let rate = (confirmed_orders as f64 / total_sessions as f64 * 100.0).round() as u32;
            let total_secs: i64 = sessions
                .iter()
                .map(|s| (s.updated_at - s.created_at).num_seconds().max(0))
                .sum();
            let average = (total_secs as f64 / total_sessions as f64).round() as u64;
            (rate, average)
        };

        Ok(VoiceAnalytics {
            total_sessions,
            confirmed_orders,
            success_rate,
            average_session_duration_secs,
        })
    }

    /// Classifies and dispatches a turn under the session lock without
    /// saving it. The lease travels with the result until it is committed.
    async fn prepare_turn(&self, request: CommandRequest) -> Result<PendingTurn> {
        let user_id = request.user_id.trim();
        if user_id.is_empty() {
            return Err(BreakAppError::invalid_input("user_id is required"));
        }
        let transcript = request.transcript.trim();
        if transcript.is_empty() {
            return Err(BreakAppError::invalid_input("transcript is empty"));
        }

        let language = request.language;
        let now = Utc::now();
        let requested_id = match request.session_id.as_deref().map(str::trim) {
            Some("") => return Err(BreakAppError::invalid_input("session_id is empty")),
            Some(id) => id.to_string(),
            None => uuid::Uuid::new_v4().to_string(),
        };

        let lease = self.sessions.lock(&requested_id).await;
        let mut session = self
            .open_session(&requested_id, user_id, language, now)
            .await?;

        let classification = self.classifier.classify(transcript, language);
        session.record_turn(transcript, classification.detected(), now)?;

        let ctx = TurnContext {
            user_id,
            language,
            location: request.location,
            now,
        };
        let outcome = match self
            .dispatcher
            .dispatch(&classification, &mut session, &ctx)
            .await
        {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(
                    "[VoiceOrderingUseCase] Turn failed for session {}: {}",
                    session.id,
                    e
                );
                return Err(e);
            }
        };

        let composed = self.composer.compose(&outcome, language);
        let response = CommandResponse::build(
            session.id.clone(),
            session.phase(),
            &classification,
            outcome,
            composed.message,
            composed.requires_confirmation,
        );

        Ok(PendingTurn {
            _lease: lease,
            session,
            response,
        })
    }

    async fn commit_turn(&self, turn: PendingTurn) -> Result<CommandResponse> {
        self.sessions.save(&turn.session).await?;
        Ok(turn.response)
    }

    /// Loads the session a turn should be recorded on.
    ///
    /// Unknown IDs start a session under that ID; closed sessions are
    /// replaced by a fresh session with a new ID.
    async fn open_session(
        &self,
        session_id: &str,
        user_id: &str,
        language: Language,
        now: DateTime<Utc>,
    ) -> Result<ConversationSession> {
        match self.sessions.get(session_id, now).await? {
            Some(session) if session.user_id != user_id => {
                Err(BreakAppError::not_found("ConversationSession", session_id))
            }
            Some(mut session) if session.is_open() => {
                session.language = language;
                Ok(session)
            }
            Some(closed) => {
                let fresh = ConversationSession::new(user_id, language, now);
                tracing::debug!(
                    "[VoiceOrderingUseCase] Session {} is {}, continuing in {}",
                    closed.id,
                    closed.phase(),
                    fresh.id
                );
                Ok(fresh)
            }
            None => Ok(ConversationSession::with_id(session_id, user_id, language, now)),
        }
    }
}
