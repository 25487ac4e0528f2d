//! SessionService - business rules over the session store.
//!
//! Every mutation loads the whole aggregate, changes one embedded
//! collection in memory and writes the whole aggregate back. Errors that
//! occur before the mutation leave the store untouched, and store errors
//! are returned exactly as the store raised them.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::{PlaylistId, SessionId, SubmissionId, UserId, VoteId};
use crate::domain::session::{NewSubmission, Playlist, Session, SessionError, Submission, Vote};
use crate::ports::SessionStore;

/// Session, submission, vote and playlist operations.
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn SessionStore>,
}

impl SessionService {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self { store }
    }

    async fn load(&self, session_id: SessionId) -> Result<Session, SessionError> {
        Ok(self.store.get_session(session_id).await?)
    }

    async fn save(&self, session: &Session) -> Result<(), SessionError> {
        self.store.update_session(session).await?;
        Ok(())
    }
}

/// Sessions
impl SessionService {
    pub async fn get_all(&self) -> Result<Vec<Session>, SessionError> {
        Ok(self.store.get_sessions().await?)
    }

    pub async fn get_one(&self, session_id: SessionId) -> Result<Session, SessionError> {
        self.load(session_id).await
    }

    pub async fn create(&self, session: &Session) -> Result<(), SessionError> {
        self.store.create_session(session).await?;
        debug!(session_id = %session.id(), name = session.name(), "Created session");
        Ok(())
    }
}

/// Submissions
impl SessionService {
    pub async fn get_submissions(
        &self,
        session_id: SessionId,
    ) -> Result<Vec<Submission>, SessionError> {
        Ok(self.load(session_id).await?.submissions().to_vec())
    }

    pub async fn get_submission(
        &self,
        session_id: SessionId,
        submission_id: &SubmissionId,
    ) -> Result<Submission, SessionError> {
        let session = self.load(session_id).await?;
        session.submission(submission_id).cloned()
    }

    /// Stores a submission under a newly generated id and returns that id.
    pub async fn add_submission(
        &self,
        session_id: SessionId,
        submission: NewSubmission,
    ) -> Result<SubmissionId, SessionError> {
        let mut session = self.load(session_id).await?;
        let submission_id = session.add_submission(submission);
        self.save(&session).await?;

        debug!(%session_id, %submission_id, "Added submission");
        Ok(submission_id)
    }

    pub async fn remove_submission(
        &self,
        session_id: SessionId,
        submission_id: &SubmissionId,
    ) -> Result<(), SessionError> {
        let mut session = self.load(session_id).await?;
        session.remove_submission(submission_id)?;
        self.save(&session).await?;

        debug!(%session_id, %submission_id, "Removed submission");
        Ok(())
    }
}

/// Votes
impl SessionService {
    pub async fn get_votes(&self, session_id: SessionId) -> Result<Vec<Vote>, SessionError> {
        Ok(self.load(session_id).await?.votes().to_vec())
    }

    pub async fn get_vote(
        &self,
        session_id: SessionId,
        vote_id: &VoteId,
    ) -> Result<Vote, SessionError> {
        let session = self.load(session_id).await?;
        session.vote(vote_id).cloned()
    }

    /// Stores a vote under the id the caller already gave it.
    pub async fn add_vote(&self, session_id: SessionId, vote: Vote) -> Result<(), SessionError> {
        let mut session = self.load(session_id).await?;
        let vote_id = vote.id.clone();
        session.add_vote(vote);
        self.save(&session).await?;

        debug!(%session_id, %vote_id, "Added vote");
        Ok(())
    }

    pub async fn remove_vote(
        &self,
        session_id: SessionId,
        vote_id: &VoteId,
    ) -> Result<(), SessionError> {
        let mut session = self.load(session_id).await?;
        session.remove_vote(vote_id)?;
        self.save(&session).await?;

        debug!(%session_id, %vote_id, "Removed vote");
        Ok(())
    }
}

/// Playlists
impl SessionService {
    pub async fn get_playlist(
        &self,
        session_id: SessionId,
        user_id: UserId,
    ) -> Result<Playlist, SessionError> {
        let session = self.load(session_id).await?;
        session.playlist_for(user_id).cloned()
    }

    pub async fn add_playlist(
        &self,
        session_id: SessionId,
        playlist_id: PlaylistId,
        user_id: UserId,
    ) -> Result<(), SessionError> {
        let mut session = self.load(session_id).await?;
        session.add_playlist(playlist_id.clone(), user_id)?;
        self.save(&session).await?;

        debug!(%session_id, %user_id, %playlist_id, "Added playlist");
        Ok(())
    }
}
