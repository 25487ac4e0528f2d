//! Session command handlers that involve the music catalog.

mod publish_playlist;
mod submit_track;

pub use publish_playlist::{PublishPlaylistCommand, PublishPlaylistHandler};
pub use submit_track::{SubmitTrackCommand, SubmitTrackHandler};

use thiserror::Error;

use crate::domain::foundation::ErrorCode;
use crate::domain::session::SessionError;
use crate::ports::CatalogError;

/// Errors from handlers that combine the catalog with the session service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl HandlerError {
    pub fn code(&self) -> ErrorCode {
        match self {
            HandlerError::Catalog(err) => err.code(),
            HandlerError::Session(err) => err.code(),
        }
    }
}
