//! Session store port.
//!
//! Defines the contract for persisting and retrieving Session aggregates.
//! Sessions are always read and written whole; there are no sub-stores
//! for submissions, votes or playlists.
//!
//! # Concurrency
//!
//! `update_session` is a compare-and-swap on the aggregate's version.
//! Implementations must reject a write whose version differs from the
//! stored one with `StoreError::Conflict`, and advance the stored version
//! on success. This is the only place atomicity lives; callers do not retry.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::foundation::{ErrorCode, SessionId};
use crate::domain::session::Session;

/// Errors that can occur during session store operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("session not found: {0}")]
    NotFound(SessionId),

    #[error("session already exists: {0}")]
    AlreadyExists(SessionId),

    #[error("session {id} was modified concurrently (expected version {expected})")]
    Conflict { id: SessionId, expected: u64 },

    #[error("failed to (de)serialize session: {0}")]
    Serialization(String),

    #[error("store backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn code(&self) -> ErrorCode {
        match self {
            StoreError::NotFound(_) => ErrorCode::SessionNotFound,
            StoreError::AlreadyExists(_) => ErrorCode::SessionExists,
            StoreError::Conflict { .. } => ErrorCode::ConcurrentModification,
            StoreError::Serialization(_) => ErrorCode::InternalError,
            StoreError::Backend(_) => ErrorCode::DatabaseError,
        }
    }
}

/// Port for Session aggregate persistence.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// All sessions, ordered by id ascending.
    async fn get_sessions(&self) -> Result<Vec<Session>, StoreError>;

    /// Load one session.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no session has this id
    async fn get_session(&self, id: SessionId) -> Result<Session, StoreError>;

    /// Persist a new session.
    ///
    /// # Errors
    ///
    /// - `AlreadyExists` if the id is taken
    async fn create_session(&self, session: &Session) -> Result<(), StoreError>;

    /// Replace a stored session with this one.
    ///
    /// # Errors
    ///
    /// - `NotFound` if the session doesn't exist
    /// - `Conflict` if the stored version differs from `session.version()`
    async fn update_session(&self, session: &Session) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    // Trait object safety test
    #[test]
    fn session_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn SessionStore) {}
    }

    #[test]
    fn conflict_maps_to_concurrent_modification() {
        let err = StoreError::Conflict {
            id: SessionId::new(1),
            expected: 3,
        };
        assert_eq!(err.code(), ErrorCode::ConcurrentModification);
        assert_eq!(
            err.to_string(),
            "session 1 was modified concurrently (expected version 3)"
        );
    }
}
