//! Conversation session domain model.

use crate::error::{BreakAppError, Result};
use crate::language::Language;
use crate::nlp::DetectedIntent;
use crate::order::StagedOrder;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display};

/// Where a session is in its life.
///
/// Only an open session can hold a staged order, so a session can never be
/// both confirmed and cancelled, nor confirmed with a pending order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SessionLifecycle {
    Open {
        #[serde(default)]
        staged_order: Option<StagedOrder>,
    },
    Confirmed {
        order_id: String,
        confirmed_at: DateTime<Utc>,
    },
    Cancelled {
        cancelled_at: DateTime<Utc>,
    },
    Expired {
        expired_at: DateTime<Utc>,
    },
}

impl Default for SessionLifecycle {
    fn default() -> Self {
        Self::Open { staged_order: None }
    }
}

/// Derived view of a session's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SessionPhase {
    New,
    AwaitingIntent,
    AwaitingConfirmation,
    Confirmed,
    Cancelled,
    Expired,
}

impl SessionPhase {
    pub fn is_closed(self) -> bool {
        matches!(self, Self::Confirmed | Self::Cancelled | Self::Expired)
    }
}

/// One multi-turn ordering conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationSession {
    /// Unique session identifier (UUID format)
    pub id: String,
    pub user_id: String,
    #[serde(default)]
    pub language: Language,
    /// Transcript of the latest turn
    #[serde(default)]
    pub last_transcript: Option<String>,
    /// Intent detected on the latest turn
    #[serde(default)]
    pub last_intent: Option<DetectedIntent>,
    #[serde(default)]
    pub turn_count: u32,
    #[serde(default)]
    pub lifecycle: SessionLifecycle,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ConversationSession {
    /// Starts a session with a freshly generated ID.
    pub fn new(user_id: impl Into<String>, language: Language, now: DateTime<Utc>) -> Self {
        Self::with_id(uuid::Uuid::new_v4().to_string(), user_id, language, now)
    }

    pub fn with_id(
        id: impl Into<String>,
        user_id: impl Into<String>,
        language: Language,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            language,
            last_transcript: None,
            last_intent: None,
            turn_count: 0,
            lifecycle: SessionLifecycle::default(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        match &self.lifecycle {
            SessionLifecycle::Open {
                staged_order: Some(_),
            } => SessionPhase::AwaitingConfirmation,
            SessionLifecycle::Open { staged_order: None } if self.turn_count == 0 => {
                SessionPhase::New
            }
            SessionLifecycle::Open { staged_order: None } => SessionPhase::AwaitingIntent,
            SessionLifecycle::Confirmed { .. } => SessionPhase::Confirmed,
            SessionLifecycle::Cancelled { .. } => SessionPhase::Cancelled,
            SessionLifecycle::Expired { .. } => SessionPhase::Expired,
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self.lifecycle, SessionLifecycle::Open { .. })
    }

    pub fn is_confirmed(&self) -> bool {
        matches!(self.lifecycle, SessionLifecycle::Confirmed { .. })
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self.lifecycle, SessionLifecycle::Cancelled { .. })
    }

    pub fn staged_order(&self) -> Option<&StagedOrder> {
        match &self.lifecycle {
            SessionLifecycle::Open { staged_order } => staged_order.as_ref(),
            _ => None,
        }
    }

    /// ID of the order created on confirmation.
    pub fn confirmed_order_id(&self) -> Option<&str> {
        match &self.lifecycle {
            SessionLifecycle::Confirmed { order_id, .. } => Some(order_id),
            _ => None,
        }
    }

    /// Overwrites the latest transcript and intent.
    pub fn record_turn(
        &mut self,
        transcript: impl Into<String>,
        intent: DetectedIntent,
        now: DateTime<Utc>,
    ) -> Result<()> {
        self.ensure_open()?;
        self.last_transcript = Some(transcript.into());
        self.last_intent = Some(intent);
        self.turn_count = self.turn_count.saturating_add(1);
        self.updated_at = now;
        Ok(())
    }

    /// Replaces the staged order.
    pub fn stage(&mut self, order: StagedOrder, now: DateTime<Utc>) -> Result<()> {
        self.ensure_open()?;
        self.lifecycle = SessionLifecycle::Open {
            staged_order: Some(order),
        };
        self.updated_at = now;
        Ok(())
    }

    /// Cancels the session and drops any staged order.
    ///
    /// Returns `false` when the session was already cancelled.
    pub fn cancel(&mut self, now: DateTime<Utc>) -> Result<bool> {
        match self.lifecycle {
            SessionLifecycle::Cancelled { .. } => Ok(false),
            SessionLifecycle::Open { .. } => {
                self.lifecycle = SessionLifecycle::Cancelled { cancelled_at: now };
                self.updated_at = now;
                Ok(true)
            }
            _ => Err(self.closed_error()),
        }
    }

    /// The staged order awaiting confirmation.
    pub fn order_to_confirm(&self) -> Result<&StagedOrder> {
        self.ensure_open()?;
        self.staged_order()
            .ok_or_else(|| BreakAppError::NothingToConfirm {
                session_id: self.id.clone(),
            })
    }

    /// Closes the session after its order was created.
    pub fn mark_confirmed(&mut self, order_id: impl Into<String>, now: DateTime<Utc>) -> Result<()> {
        self.order_to_confirm()?;
        self.lifecycle = SessionLifecycle::Confirmed {
            order_id: order_id.into(),
            confirmed_at: now,
        };
        self.updated_at = now;
        Ok(())
    }

    /// Expires an open session idle for longer than `ttl`.
    ///
    /// Returns `true` if the session was expired by this call.
    pub fn expire_if_idle(&mut self, now: DateTime<Utc>, ttl: Duration) -> bool {
        if !self.is_open() || now.signed_duration_since(self.updated_at) <= ttl {
            return false;
        }
        self.lifecycle = SessionLifecycle::Expired { expired_at: now };
        self.updated_at = now;
        true
    }

    /// Error describing why a closed session cannot be used.
    pub fn closed_error(&self) -> BreakAppError {
        match self.phase() {
            SessionPhase::Expired => BreakAppError::SessionExpired {
                session_id: self.id.clone(),
            },
            phase => BreakAppError::SessionClosed {
                session_id: self.id.clone(),
                phase: phase.to_string(),
            },
        }
    }

    fn ensure_open(&self) -> Result<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(self.closed_error())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nlp::Intent;
    use crate::order::OrderLine;
    use rust_decimal::Decimal;

    fn staged() -> StagedOrder {
        StagedOrder::from_lines(vec![OrderLine {
            menu_item_id: "m1".to_string(),
            restaurant_id: "r1".to_string(),
            name: "Burger".to_string(),
            unit_price: Decimal::from(25),
            quantity: 1,
            note: None,
        }])
    }

    fn detected(intent: Intent) -> DetectedIntent {
        DetectedIntent {
            intent,
            confidence: 0.9,
        }
    }

    #[test]
    fn test_phase_progression() {
        let now = Utc::now();
        let mut session = ConversationSession::new("u1", Language::English, now);
        assert_eq!(session.phase(), SessionPhase::New);

        session
            .record_turn("where is my order", detected(Intent::Unknown), now)
            .unwrap();
        assert_eq!(session.phase(), SessionPhase::AwaitingIntent);
        assert_eq!(session.turn_count, 1);

        session.stage(staged(), now).unwrap();
        assert_eq!(session.phase(), SessionPhase::AwaitingConfirmation);

        session.mark_confirmed("o1", now).unwrap();
        assert_eq!(session.phase(), SessionPhase::Confirmed);
        assert_eq!(session.confirmed_order_id(), Some("o1"));
        assert!(session.staged_order().is_none());
    }

    #[test]
    fn test_confirm_without_staged_order() {
        let mut session = ConversationSession::new("u1", Language::Arabic, Utc::now());
        let err = session.mark_confirmed("o1", Utc::now()).unwrap_err();
        assert!(matches!(err, BreakAppError::NothingToConfirm { .. }));
        assert!(session.is_open());
    }

    #[test]
    fn test_cancel_is_idempotent() {
        let now = Utc::now();
        let mut session = ConversationSession::new("u1", Language::Arabic, now);
        session.stage(staged(), now).unwrap();

        assert!(session.cancel(now).unwrap());
        assert!(session.staged_order().is_none());
        assert!(!session.cancel(now).unwrap());
        assert!(session.is_cancelled());
        assert!(!session.is_confirmed());
    }

    #[test]
    fn test_closed_session_rejects_changes() {
        let now = Utc::now();
        let mut session = ConversationSession::new("u1", Language::Arabic, now);
        session.stage(staged(), now).unwrap();
        session.mark_confirmed("o1", now).unwrap();

        assert!(matches!(
            session.cancel(now),
            Err(BreakAppError::SessionClosed { .. })
        ));
        assert!(session.stage(staged(), now).is_err());
        assert!(
            session
                .record_turn("hi", detected(Intent::Unknown), now)
                .is_err()
        );
    }

    #[test]
    fn test_expire_if_idle() {
        let start = Utc::now();
        let mut session = ConversationSession::new("u1", Language::Arabic, start);
        session.stage(staged(), start).unwrap();
        let ttl = Duration::seconds(60);

        assert!(!session.expire_if_idle(start + Duration::seconds(30), ttl));
        assert!(session.expire_if_idle(start + Duration::seconds(61), ttl));
        assert_eq!(session.phase(), SessionPhase::Expired);
        assert!(session.staged_order().is_none());
        assert!(matches!(
            session.closed_error(),
            BreakAppError::SessionExpired { .. }
        ));
    }

    #[test]
    fn test_json_roundtrip_keeps_lifecycle_tag() {
        let now = Utc::now();
        let mut session = ConversationSession::new("u1", Language::English, now);
        session.stage(staged(), now).unwrap();

        let json = serde_json::to_string(&session).unwrap();
        assert!(json.contains("\"status\":\"open\""));
        let restored: ConversationSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
    }
}
