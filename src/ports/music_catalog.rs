//! Music Catalog Port - Interface to the external streaming service.
//!
//! Resolves track metadata before a submission is stored, and creates the
//! external playlist a user's picks are published to. The session service
//! never calls this port itself; application handlers do.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ErrorCode, PlaylistId, UserId};

/// Track metadata as reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub title: String,
    pub artist: String,
    #[serde(default)]
    pub album: Option<String>,
}

/// Errors that can occur when talking to the catalog.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CatalogError {
    #[error("Track not found: {0}")]
    TrackNotFound(String),

    #[error("Catalog unavailable: {0}")]
    Unavailable(String),

    #[error("Invalid catalog response: {0}")]
    InvalidResponse(String),
}

impl CatalogError {
    pub fn code(&self) -> ErrorCode {
        match self {
            CatalogError::TrackNotFound(_) => ErrorCode::TrackNotFound,
            CatalogError::Unavailable(_) | CatalogError::InvalidResponse(_) => {
                ErrorCode::CatalogUnavailable
            }
        }
    }
}

/// Port for the external music catalog.
#[async_trait]
pub trait MusicCatalog: Send + Sync {
    /// Look up a track by its catalog identifier.
    ///
    /// # Errors
    /// - `TrackNotFound` if the catalog has no such track
    async fn get_track(&self, track_id: &str) -> Result<Track, CatalogError>;

    /// Create a playlist for `user_id` containing `track_ids` in order.
    ///
    /// Returns the identifier the catalog assigned.
    async fn create_playlist(
        &self,
        user_id: UserId,
        name: &str,
        track_ids: &[String],
    ) -> Result<PlaylistId, CatalogError>;
}
