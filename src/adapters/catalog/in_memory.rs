//! In-memory music catalog for tests and local development.
//!
//! Serves a fixed set of tracks and records every playlist it is asked to
//! create, so callers can assert on what would have been published.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::foundation::{PlaylistId, UserId};
use crate::ports::{CatalogError, MusicCatalog, Track};

/// A playlist the in-memory catalog was asked to create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedPlaylist {
    pub id: PlaylistId,
    pub user_id: UserId,
    pub name: String,
    pub track_ids: Vec<String>,
}

/// In-memory catalog with fixture tracks.
#[derive(Debug, Clone, Default)]
pub struct InMemoryMusicCatalog {
    tracks: Arc<RwLock<HashMap<String, Track>>>,
    created: Arc<RwLock<Vec<CreatedPlaylist>>>,
    unavailable: bool,
}

impl InMemoryMusicCatalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog serving the given tracks.
    pub fn with_tracks(tracks: Vec<Track>) -> Self {
        let tracks = tracks.into_iter().map(|t| (t.id.clone(), t)).collect();
        Self {
            tracks: Arc::new(RwLock::new(tracks)),
            ..Self::default()
        }
    }

    /// Creates a catalog that fails every call with `Unavailable`.
    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Self::default()
        }
    }

    /// Adds or replaces a track.
    pub async fn insert_track(&self, track: Track) {
        self.tracks.write().await.insert(track.id.clone(), track);
    }

    /// Playlists created so far, in creation order.
    pub async fn created_playlists(&self) -> Vec<CreatedPlaylist> {
        self.created.read().await.clone()
    }

    fn check_available(&self) -> Result<(), CatalogError> {
        if self.unavailable {
            return Err(CatalogError::Unavailable(
                "in-memory catalog is offline".to_string(),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl MusicCatalog for InMemoryMusicCatalog {
    async fn get_track(&self, track_id: &str) -> Result<Track, CatalogError> {
        self.check_available()?;
        self.tracks
            .read()
            .await
            .get(track_id)
            .cloned()
            .ok_or_else(|| CatalogError::TrackNotFound(track_id.to_string()))
    }

    async fn create_playlist(
        &self,
        user_id: UserId,
        name: &str,
        track_ids: &[String],
    ) -> Result<PlaylistId, CatalogError> {
        self.check_available()?;

        let id = PlaylistId::new(format!("pl-{}", Uuid::new_v4()))
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;

        self.created.write().await.push(CreatedPlaylist {
            id: id.clone(),
            user_id,
            name: name.to_string(),
            track_ids: track_ids.to_vec(),
        });
        Ok(id)
    }
}
