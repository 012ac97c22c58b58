//! Session store: repository access with per-session locking and lazy expiry.

use breakapp_core::conversation::{ConversationSession, ConversationSessionRepository};
use breakapp_core::error::{BreakAppError, Result};
use breakapp_core::order::{NewOrder, Order, OrderCreationService};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::{Arc, Mutex as StdMutex, PoisonError};
use tokio::sync::{Mutex, OwnedMutexGuard};

type LockTable = Arc<StdMutex<HashMap<String, Arc<Mutex<()>>>>>;

/// Exclusive access to one session ID.
///
/// Held for a whole turn or confirmation so a read-modify-write of the
/// staged order cannot interleave with another request for the same session.
/// The lock table entry is dropped once nobody holds or waits for it.
pub struct SessionLease {
    locks: LockTable,
    session_id: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl SessionLease {
    pub fn session_id(&self) -> &str {
        &self.session_id
    }
}

impl Drop for SessionLease {
    fn drop(&mut self) {
        drop(self.guard.take());
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        if locks
            .get(&self.session_id)
            .is_some_and(|mutex| Arc::strong_count(mutex) == 1)
        {
            locks.remove(&self.session_id);
        }
    }
}

/// Loads and saves conversation sessions on behalf of the use case.
///
/// Open sessions idle for longer than the TTL are expired the next time
/// they are read; the store never deletes sessions.
pub struct SessionStore {
    repository: Arc<dyn ConversationSessionRepository>,
    locks: LockTable,
    ttl: Duration,
}

impl SessionStore {
    pub fn new(repository: Arc<dyn ConversationSessionRepository>, ttl: Duration) -> Self {
        Self {
            repository,
            locks: Arc::new(StdMutex::new(HashMap::new())),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn repository(&self) -> &Arc<dyn ConversationSessionRepository> {
        &self.repository
    }

    /// Waits for exclusive access to `session_id`.
    pub async fn lock(&self, session_id: &str) -> SessionLease {
        let mutex = {
            let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
            locks.entry(session_id.to_string()).or_default().clone()
        };
        let guard = mutex.lock_owned().await;
        SessionLease {
            locks: self.locks.clone(),
            session_id: session_id.to_string(),
            guard: Some(guard),
        }
    }

    /// Number of session IDs currently locked or awaited.
    pub fn active_locks(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Reads a session, expiring it first if it sat idle past the TTL.
    pub async fn get(
        &self,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<ConversationSession>> {
        let Some(mut session) = self.repository.find_by_id(session_id).await? else {
            return Ok(None);
        };

        if session.expire_if_idle(now, self.ttl) {
            tracing::warn!(
                "[SessionStore] Session {} expired after {}s idle",
                session.id,
                self.ttl.num_seconds()
            );
            self.repository.save(&session).await?;
        }

        Ok(Some(session))
    }

    /// Reads a session that must exist and belong to `user_id`.
    pub async fn get_owned(
        &self,
        user_id: &str,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ConversationSession> {
        match self.get(session_id, now).await? {
            Some(session) if session.user_id == user_id => Ok(session),
            _ => Err(BreakAppError::not_found("ConversationSession", session_id)),
        }
    }

    /// Inserts or replaces a session.
    pub async fn save(&self, session: &ConversationSession) -> Result<()> {
        tracing::debug!(
            "[SessionStore] Saving session: id={}, phase={}",
            session.id,
            session.phase()
        );
        self.repository.save(session).await
    }

    /// Cancels a session. Cancelling twice is a no-op.
    pub async fn cancel(
        &self,
        user_id: &str,
        session_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ConversationSession> {
        let _lease = self.lock(session_id).await;
        let mut session = self.get_owned(user_id, session_id, now).await?;

        if session.cancel(now)? {
            self.repository.save(&session).await?;
            tracing::info!("[SessionStore] Session {} cancelled", session.id);
        }

        Ok(session)
    }

    /// Promotes the staged order to a real order and closes the session.
    ///
    /// If order creation fails the session is left untouched.
    pub async fn confirm(
        &self,
        user_id: &str,
        session_id: &str,
        orders: &dyn OrderCreationService,
        now: DateTime<Utc>,
    ) -> Result<(ConversationSession, Order)> {
        let _lease = self.lock(session_id).await;
        let mut session = self.get_owned(user_id, session_id, now).await?;

        let new_order = NewOrder::from_staged(session.order_to_confirm()?);
        let order = orders
            .create_order(user_id, new_order)
            .await
            .inspect_err(|e| {
                tracing::warn!("[SessionStore] Order creation failed for {}: {}", session_id, e)
            })?;

        session.mark_confirmed(order.id.clone(), now)?;
        self.repository.save(&session).await?;
        tracing::info!(
            "[SessionStore] Session {} confirmed as order {}",
            session.id,
            order.id
        );

        Ok((session, order))
    }
}
