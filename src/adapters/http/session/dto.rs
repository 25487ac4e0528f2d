//! HTTP DTOs for session endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent evolution.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ErrorCode;
use crate::domain::session::{Playlist, Session, Submission, Vote};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a new session. The caller picks the id.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSessionRequest {
    pub id: i64,
    pub name: String,
}

/// Request to add a submission.
///
/// With only `track_id` the track is resolved through the music catalog.
/// When `title` is given the metadata is stored as sent.
#[derive(Debug, Clone, Deserialize)]
pub struct AddSubmissionRequest {
    pub user_id: i64,
    pub track_id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub artist: Option<String>,
    #[serde(default)]
    pub album: Option<String>,
}

/// Request to add a vote; the vote id is chosen by the caller.
#[derive(Debug, Clone, Deserialize)]
pub struct AddVoteRequest {
    pub id: String,
    pub submission_id: String,
    pub user_id: i64,
}

/// Request to record an already-created external playlist.
#[derive(Debug, Clone, Deserialize)]
pub struct AddPlaylistRequest {
    pub playlist_id: String,
    pub user_id: i64,
}

/// Request to publish a user's picks as a new external playlist.
#[derive(Debug, Clone, Deserialize)]
pub struct PublishPlaylistRequest {
    pub name: String,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResponse {
    pub id: String,
    pub user_id: i64,
    pub track_id: String,
    pub title: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub album: Option<String>,
}

impl From<&Submission> for SubmissionResponse {
    fn from(submission: &Submission) -> Self {
        Self {
            id: submission.id.to_string(),
            user_id: submission.user_id.as_i64(),
            track_id: submission.track_id.clone(),
            title: submission.title.clone(),
            artist: submission.artist.clone(),
            album: submission.album.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteResponse {
    pub id: String,
    pub submission_id: String,
    pub user_id: i64,
}

impl From<&Vote> for VoteResponse {
    fn from(vote: &Vote) -> Self {
        Self {
            id: vote.id.to_string(),
            submission_id: vote.submission_id.to_string(),
            user_id: vote.user_id.as_i64(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistResponse {
    pub id: String,
    pub user_id: i64,
}

impl From<&Playlist> for PlaylistResponse {
    fn from(playlist: &Playlist) -> Self {
        Self {
            id: playlist.id.to_string(),
            user_id: playlist.user_id.as_i64(),
        }
    }
}

/// Full session view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub version: u64,
    pub submissions: Vec<SubmissionResponse>,
    pub votes: Vec<VoteResponse>,
    pub playlists: Vec<PlaylistResponse>,
}

impl From<&Session> for SessionResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().as_i64(),
            name: session.name().to_string(),
            created_at: session.created_at().to_rfc3339(),
            version: session.version(),
            submissions: session.submissions().iter().map(Into::into).collect(),
            votes: session.votes().iter().map(Into::into).collect(),
            playlists: session.playlists().iter().map(Into::into).collect(),
        }
    }
}

/// Session summary for list responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionSummaryResponse {
    pub id: i64,
    pub name: String,
    pub created_at: String,
    pub submission_count: usize,
    pub vote_count: usize,
}

impl From<&Session> for SessionSummaryResponse {
    fn from(session: &Session) -> Self {
        Self {
            id: session.id().as_i64(),
            name: session.name().to_string(),
            created_at: session.created_at().to_rfc3339(),
            submission_count: session.submissions().len(),
            vote_count: session.votes().len(),
        }
    }
}

/// Standard error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code: code.to_string(),
            message: message.into(),
        }
    }
}
