//! Session-specific error types.

use thiserror::Error;

use crate::domain::foundation::{ErrorCode, SubmissionId, UserId, VoteId};
use crate::ports::StoreError;

/// Errors raised by session operations.
///
/// The four lookup/uniqueness cases are the only errors the session layer
/// originates. Anything the store reports passes through untouched in
/// `Store`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("submission not found: {0}")]
    SubmissionNotFound(SubmissionId),

    #[error("vote not found: {0}")]
    VoteNotFound(VoteId),

    #[error("playlist not found for user {0}")]
    PlaylistNotFound(UserId),

    #[error("playlist already exists for user {0}")]
    PlaylistExists(UserId),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SessionError {
    /// True when the store could not find the session itself.
    pub fn is_session_not_found(&self) -> bool {
        matches!(self, SessionError::Store(StoreError::NotFound(_)))
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::SubmissionNotFound(_) => ErrorCode::SubmissionNotFound,
            SessionError::VoteNotFound(_) => ErrorCode::VoteNotFound,
            SessionError::PlaylistNotFound(_) => ErrorCode::PlaylistNotFound,
            SessionError::PlaylistExists(_) => ErrorCode::PlaylistExists,
            SessionError::Store(err) => err.code(),
        }
    }
}
