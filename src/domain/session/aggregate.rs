//! Session aggregate entity.
//!
//! A session is one voting round. It owns its submissions, votes and
//! playlists by value; nothing else stores them.
//!
//! # Persistence
//!
//! The aggregate is always read and written whole. `version` is the
//! optimistic-concurrency token the store compares on every write.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{
    PlaylistId, SessionId, SubmissionId, Timestamp, UserId, ValidationError, VoteId,
};

use super::entries::{NewSubmission, Playlist, Submission, Vote};
use super::errors::SessionError;

/// Maximum length for a session name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Session aggregate - a voting round with its nominations, votes and playlists.
///
/// # Invariants
///
/// - At most one playlist per user
/// - Collections keep insertion order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    id: SessionId,

    name: String,

    created_at: Timestamp,

    #[serde(default)]
    submissions: Vec<Submission>,

    #[serde(default)]
    votes: Vec<Vote>,

    #[serde(default)]
    playlists: Vec<Playlist>,

    #[serde(default)]
    version: u64,
}

impl Session {
    /// Create an empty session.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if name is blank
    /// - `TooLong` if name exceeds `MAX_NAME_LENGTH`
    pub fn new(id: SessionId, name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        Self::validate_name(&name)?;

        Ok(Self {
            id,
            name,
            created_at: Timestamp::now(),
            submissions: Vec::new(),
            votes: Vec::new(),
            playlists: Vec::new(),
            version: 0,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    pub fn submissions(&self) -> &[Submission] {
        &self.submissions
    }

    pub fn votes(&self) -> &[Vote] {
        &self.votes
    }

    pub fn playlists(&self) -> &[Playlist] {
        &self.playlists
    }

    /// Returns the version last read from (or written to) the store.
    ///
    /// Only a store write moves it forward:
    ///
    /// ```compile_fail
    /// use mixtape::domain::foundation::SessionId;
    /// use mixtape::domain::session::Session;
    ///
    /// let mut session = Session::new(SessionId::new(1), "Mix").unwrap();
    /// session.advance_version();
    /// ```
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Moves the version forward after a successful write.
    pub(crate) fn advance_version(&mut self) {
        self.version += 1;
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Submissions
    // ─────────────────────────────────────────────────────────────────────────

    /// Finds a submission by identifier.
    pub fn submission(&self, id: &SubmissionId) -> Result<&Submission, SessionError> {
        self.submissions
            .iter()
            .find(|s| &s.id == id)
            .ok_or_else(|| SessionError::SubmissionNotFound(id.clone()))
    }

    /// Appends a submission under a freshly generated identifier.
    pub fn add_submission(&mut self, draft: NewSubmission) -> SubmissionId {
        let id = SubmissionId::generate();
        self.submissions
            .push(Submission::from_draft(id.clone(), draft));
        id
    }

    /// Removes the first submission with the given identifier.
    ///
    /// # Errors
    ///
    /// - `SubmissionNotFound` if no submission matches; nothing changes
    pub fn remove_submission(&mut self, id: &SubmissionId) -> Result<Submission, SessionError> {
        let pos = self
            .submissions
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| SessionError::SubmissionNotFound(id.clone()))?;
        Ok(self.submissions.remove(pos))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Votes
    // ─────────────────────────────────────────────────────────────────────────

    pub fn vote(&self, id: &VoteId) -> Result<&Vote, SessionError> {
        self.votes
            .iter()
            .find(|v| &v.id == id)
            .ok_or_else(|| SessionError::VoteNotFound(id.clone()))
    }

    /// Appends a vote as given. The submission it points at is not checked.
    pub fn add_vote(&mut self, vote: Vote) {
        self.votes.push(vote);
    }

    /// Removes the first vote with the given identifier.
    ///
    /// # Errors
    ///
    /// - `VoteNotFound` if no vote matches; nothing changes
    pub fn remove_vote(&mut self, id: &VoteId) -> Result<Vote, SessionError> {
        let pos = self
            .votes
            .iter()
            .position(|v| &v.id == id)
            .ok_or_else(|| SessionError::VoteNotFound(id.clone()))?;
        Ok(self.votes.remove(pos))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Playlists
    // ─────────────────────────────────────────────────────────────────────────

    pub fn playlist_for(&self, user_id: UserId) -> Result<&Playlist, SessionError> {
        self.playlists
            .iter()
            .find(|p| p.user_id == user_id)
            .ok_or(SessionError::PlaylistNotFound(user_id))
    }

    /// Records a user's playlist.
    ///
    /// # Errors
    ///
    /// - `PlaylistExists` if the user already has one in this session
    pub fn add_playlist(
        &mut self,
        playlist_id: PlaylistId,
        user_id: UserId,
    ) -> Result<(), SessionError> {
        if self.playlists.iter().any(|p| p.user_id == user_id) {
            return Err(SessionError::PlaylistExists(user_id));
        }

        self.playlists.push(Playlist {
            id: playlist_id,
            user_id,
        });
        Ok(())
    }

    /// Submissions the user voted for, in submission order, each at most once.
    pub fn picks_for(&self, user_id: UserId) -> Vec<&Submission> {
        self.submissions
            .iter()
            .filter(|s| {
                self.votes
                    .iter()
                    .any(|v| v.user_id == user_id && v.submission_id == s.id)
            })
            .collect()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Private helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn validate_name(name: &str) -> Result<(), ValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field("name"));
        }
        if trimmed.len() > MAX_NAME_LENGTH {
            return Err(ValidationError::too_long(
                "name",
                MAX_NAME_LENGTH,
                trimmed.len(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_session() -> Session {
        Session::new(SessionId::new(1), "Friday Mix").unwrap()
    }

    fn vote(id: &str, submission_id: &SubmissionId, user: i64) -> Vote {
        Vote {
            id: VoteId::new(id).unwrap(),
            submission_id: submission_id.clone(),
            user_id: UserId::new(user),
        }
    }

    // Construction tests

    #[test]
    fn new_session_is_empty() {
        let session = test_session();
        assert!(session.submissions().is_empty());
        assert!(session.votes().is_empty());
        assert!(session.playlists().is_empty());
        assert_eq!(session.version(), 0);
    }

    #[test]
    fn new_session_rejects_blank_name() {
        assert!(Session::new(SessionId::new(1), "   ").is_err());
    }

    #[test]
    fn new_session_rejects_too_long_name() {
        let long_name = "x".repeat(MAX_NAME_LENGTH + 1);
        assert!(matches!(
            Session::new(SessionId::new(1), long_name),
            Err(ValidationError::TooLong { .. })
        ));
    }

    // Submission tests

    #[test]
    fn add_submission_assigns_fresh_ids() {
        let mut session = test_session();
        let a = session.add_submission(NewSubmission::titled(UserId::new(1), "A"));
        let b = session.add_submission(NewSubmission::titled(UserId::new(1), "A"));
        assert_ne!(a, b);
        assert_eq!(session.submissions().len(), 2);
    }

    #[test]
    fn remove_submission_keeps_order_of_the_rest() {
        let mut session = test_session();
        let a = session.add_submission(NewSubmission::titled(UserId::new(1), "A"));
        let b = session.add_submission(NewSubmission::titled(UserId::new(1), "B"));
        let c = session.add_submission(NewSubmission::titled(UserId::new(1), "C"));

        let removed = session.remove_submission(&b).unwrap();
        assert_eq!(removed.title, "B");
        let ids: Vec<_> = session.submissions().iter().map(|s| s.id.clone()).collect();
        assert_eq!(ids, vec![a, c]);
    }

    #[test]
    fn remove_unknown_submission_changes_nothing() {
        let mut session = test_session();
        session.add_submission(NewSubmission::titled(UserId::new(1), "A"));
        let before = session.clone();

        let missing = SubmissionId::new("missing").unwrap();
        let result = session.remove_submission(&missing);
        assert_eq!(result, Err(SessionError::SubmissionNotFound(missing)));
        assert_eq!(session, before);
    }

    // Vote tests

    #[test]
    fn votes_keep_caller_ids() {
        let mut session = test_session();
        let s1 = session.add_submission(NewSubmission::titled(UserId::new(1), "A"));
        session.add_vote(vote("v1", &s1, 2));
        assert_eq!(session.vote(&VoteId::new("v1").unwrap()).unwrap().submission_id, s1);
    }

    #[test]
    fn remove_vote_removes_first_match_only() {
        let mut session = test_session();
        let s1 = session.add_submission(NewSubmission::titled(UserId::new(1), "A"));
        session.add_vote(vote("dup", &s1, 2));
        session.add_vote(vote("dup", &s1, 3));

        let removed = session.remove_vote(&VoteId::new("dup").unwrap()).unwrap();
        assert_eq!(removed.user_id, UserId::new(2));
        assert_eq!(session.votes().len(), 1);
    }

    // Playlist tests

    #[test]
    fn second_playlist_for_user_is_rejected() {
        let mut session = test_session();
        let user = UserId::new(42);
        session
            .add_playlist(PlaylistId::new("pl-a").unwrap(), user)
            .unwrap();

        let result = session.add_playlist(PlaylistId::new("pl-b").unwrap(), user);
        assert_eq!(result, Err(SessionError::PlaylistExists(user)));
        assert_eq!(session.playlist_for(user).unwrap().id.as_str(), "pl-a");
    }

    #[test]
    fn playlists_for_different_users_coexist() {
        let mut session = test_session();
        session
            .add_playlist(PlaylistId::new("pl-a").unwrap(), UserId::new(1))
            .unwrap();
        session
            .add_playlist(PlaylistId::new("pl-b").unwrap(), UserId::new(2))
            .unwrap();
        assert_eq!(session.playlists().len(), 2);
    }

    #[test]
    fn missing_playlist_is_reported() {
        let session = test_session();
        assert_eq!(
            session.playlist_for(UserId::new(9)),
            Err(SessionError::PlaylistNotFound(UserId::new(9)))
        );
    }

    // Picks tests

    #[test]
    fn picks_follow_submission_order_without_duplicates() {
        let mut session = test_session();
        let a = session.add_submission(NewSubmission::titled(UserId::new(1), "A"));
        let b = session.add_submission(NewSubmission::titled(UserId::new(1), "B"));
        session.add_vote(vote("v1", &b, 7));
        session.add_vote(vote("v2", &a, 7));
        session.add_vote(vote("v3", &b, 7));
        session.add_vote(vote("v4", &a, 8));

        let titles: Vec<_> = session
            .picks_for(UserId::new(7))
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, vec!["A", "B"]);
    }

    // Serialization

    #[test]
    fn missing_collections_deserialize_as_empty() {
        let json = r#"{"id": 5, "name": "Old", "created_at": "2024-01-15T10:30:00Z"}"#;
        let session: Session = serde_json::from_str(json).unwrap();
        assert_eq!(session.id(), SessionId::new(5));
        assert!(session.submissions().is_empty());
        assert_eq!(session.version(), 0);
    }
}
