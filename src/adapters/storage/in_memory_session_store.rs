//! In-Memory Session Store Adapter
//!
//! Keeps sessions in a map behind an async lock.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::SessionId;
use crate::domain::session::Session;
use crate::ports::{SessionStore, StoreError};

/// In-memory storage for sessions
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<BTreeMap<SessionId, Session>>>,
}

impl InMemorySessionStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the number of stored sessions
    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get_sessions(&self) -> Result<Vec<Session>, StoreError> {
        Ok(self.sessions.read().await.values().cloned().collect())
    }

    async fn get_session(&self, id: SessionId) -> Result<Session, StoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn create_session(&self, session: &Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id()) {
            return Err(StoreError::AlreadyExists(session.id()));
        }
        sessions.insert(session.id(), session.clone());
        Ok(())
    }

    async fn update_session(&self, session: &Session) -> Result<(), StoreError> {
        let mut sessions = self.sessions.write().await;
        let stored = sessions
            .get_mut(&session.id())
            .ok_or(StoreError::NotFound(session.id()))?;

        if stored.version() != session.version() {
            return Err(StoreError::Conflict {
                id: session.id(),
                expected: session.version(),
            });
        }

        let mut next = session.clone();
        next.advance_version();
        *stored = next;
        Ok(())
    }
}
