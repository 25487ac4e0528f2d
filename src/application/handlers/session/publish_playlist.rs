//! PublishPlaylistHandler - materialize a user's picks as an external playlist.
//!
//! A user's picks are the submissions they voted for. The handler creates
//! the playlist in the music catalog and then records it in the session,
//! which enforces one playlist per user.

use std::sync::Arc;

use tracing::{info, warn};

use crate::application::SessionService;
use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::{Playlist, SessionError};
use crate::ports::MusicCatalog;

use super::HandlerError;

/// Command to publish a user's playlist for a session.
#[derive(Debug, Clone)]
pub struct PublishPlaylistCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub name: String,
}

/// Handler for publishing playlists.
pub struct PublishPlaylistHandler {
    sessions: SessionService,
    catalog: Arc<dyn MusicCatalog>,
}

impl PublishPlaylistHandler {
    pub fn new(sessions: SessionService, catalog: Arc<dyn MusicCatalog>) -> Self {
        Self { sessions, catalog }
    }

    pub async fn handle(&self, cmd: PublishPlaylistCommand) -> Result<Playlist, HandlerError> {
        // 1. Load and refuse early so no orphan playlist is created upstream
        let session = self.sessions.get_one(cmd.session_id).await?;
        if session.playlist_for(cmd.user_id).is_ok() {
            return Err(SessionError::PlaylistExists(cmd.user_id).into());
        }

        // 2. Collect picks; entries without a catalog track cannot be published
        let track_ids: Vec<String> = session
            .picks_for(cmd.user_id)
            .into_iter()
            .filter(|s| !s.track_id.trim().is_empty())
            .map(|s| s.track_id.clone())
            .collect();

        // 3. Create upstream
        let playlist_id = self
            .catalog
            .create_playlist(cmd.user_id, &cmd.name, &track_ids)
            .await?;

        // 4. Record; a concurrent publish may have won in between
        if let Err(err) = self
            .sessions
            .add_playlist(cmd.session_id, playlist_id.clone(), cmd.user_id)
            .await
        {
            warn!(
                session_id = %cmd.session_id,
                user_id = %cmd.user_id,
                %playlist_id,
                error = %err,
                "Created external playlist but could not record it"
            );
            return Err(err.into());
        }

        info!(
            session_id = %cmd.session_id,
            user_id = %cmd.user_id,
            %playlist_id,
            tracks = track_ids.len(),
            "Published playlist"
        );

        Ok(Playlist {
            id: playlist_id,
            user_id: cmd.user_id,
        })
    }
}
