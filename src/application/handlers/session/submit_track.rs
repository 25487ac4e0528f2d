//! SubmitTrackHandler - nominate a catalog track into a session.

use std::sync::Arc;

use tracing::info;

use crate::application::SessionService;
use crate::domain::foundation::{SessionId, UserId};
use crate::domain::session::{NewSubmission, Submission};
use crate::ports::MusicCatalog;

use super::HandlerError;

/// Command to submit a track by its catalog id.
#[derive(Debug, Clone)]
pub struct SubmitTrackCommand {
    pub session_id: SessionId,
    pub user_id: UserId,
    pub track_id: String,
}

/// Handler that resolves track metadata before adding the submission.
pub struct SubmitTrackHandler {
    sessions: SessionService,
    catalog: Arc<dyn MusicCatalog>,
}

impl SubmitTrackHandler {
    pub fn new(sessions: SessionService, catalog: Arc<dyn MusicCatalog>) -> Self {
        Self { sessions, catalog }
    }

    pub async fn handle(&self, cmd: SubmitTrackCommand) -> Result<Submission, HandlerError> {
        // 1. Resolve the track; nothing is written if this fails
        let track = self.catalog.get_track(&cmd.track_id).await?;

        // 2. Store it
        let draft = NewSubmission {
            user_id: cmd.user_id,
            track_id: track.id,
            title: track.title,
            artist: track.artist,
            album: track.album,
        };
        let submission_id = self
            .sessions
            .add_submission(cmd.session_id, draft.clone())
            .await?;

        info!(
            session_id = %cmd.session_id,
            user_id = %cmd.user_id,
            %submission_id,
            "Track submitted"
        );

        Ok(Submission::from_draft(submission_id, draft))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{InMemoryMusicCatalog, InMemorySessionStore};
    use crate::domain::session::{Session, SessionError};
    use crate::ports::{CatalogError, SessionStore, StoreError, Track};

    fn track() -> Track {
        Track {
            id: "trk-1".to_string(),
            title: "Song".to_string(),
            artist: "Band".to_string(),
            album: None,
        }
    }

    async fn setup() -> (SubmitTrackHandler, Arc<InMemorySessionStore>) {
        let store = Arc::new(InMemorySessionStore::new());
        store
            .create_session(&Session::new(SessionId::new(1), "Mix").unwrap())
            .await
            .unwrap();
        let catalog = Arc::new(InMemoryMusicCatalog::with_tracks(vec![track()]));
        let handler = SubmitTrackHandler::new(SessionService::new(store.clone()), catalog);
        (handler, store)
    }

    fn cmd(session: i64, track_id: &str) -> SubmitTrackCommand {
        SubmitTrackCommand {
            session_id: SessionId::new(session),
            user_id: UserId::new(9),
            track_id: track_id.to_string(),
        }
    }

    #[tokio::test]
    async fn submits_resolved_track() {
        let (handler, store) = setup().await;

        let submission = handler.handle(cmd(1, "trk-1")).await.unwrap();
        assert_eq!(submission.title, "Song");
        assert_eq!(submission.artist, "Band");
        assert_eq!(submission.user_id, UserId::new(9));

        let session = store.get_session(SessionId::new(1)).await.unwrap();
        assert_eq!(session.submissions(), &[submission]);
    }

    #[tokio::test]
    async fn unknown_track_writes_nothing() {
        let (handler, store) = setup().await;

        let result = handler.handle(cmd(1, "missing")).await;
        assert_eq!(
            result,
            Err(HandlerError::Catalog(CatalogError::TrackNotFound(
                "missing".to_string()
            )))
        );
        let session = store.get_session(SessionId::new(1)).await.unwrap();
        assert!(session.submissions().is_empty());
        assert_eq!(session.version(), 0);
    }

    #[tokio::test]
    async fn missing_session_is_reported() {
        let (handler, _store) = setup().await;

        let result = handler.handle(cmd(2, "trk-1")).await;
        assert_eq!(
            result,
            Err(HandlerError::Session(SessionError::Store(
                StoreError::NotFound(SessionId::new(2))
            )))
        );
    }
}
