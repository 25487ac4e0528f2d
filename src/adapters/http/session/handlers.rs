//! HTTP handlers for session endpoints.
//!
//! These handlers connect Axum routes to the session service and the
//! application handlers. User identity comes from the request body or path.

use std::sync::Arc;

use axum::extract::{Json, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::{
    HandlerError, PublishPlaylistCommand, PublishPlaylistHandler, SessionService,
    SubmitTrackCommand, SubmitTrackHandler,
};
use crate::domain::foundation::{
    ErrorCode, PlaylistId, SessionId, SubmissionId, UserId, ValidationError, VoteId,
};
use crate::domain::session::{NewSubmission, Session, SessionError, Submission, Vote};
use crate::ports::{MusicCatalog, SessionStore};

use super::dto::{
    AddPlaylistRequest, AddSubmissionRequest, AddVoteRequest, CreateSessionRequest,
    ErrorResponse, PlaylistResponse, PublishPlaylistRequest, SessionResponse,
    SessionSummaryResponse, SubmissionResponse, VoteResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
#[derive(Clone)]
pub struct SessionAppState {
    pub sessions: SessionService,
    pub submit_track: Arc<SubmitTrackHandler>,
    pub publish_playlist: Arc<PublishPlaylistHandler>,
}

impl SessionAppState {
    pub fn new(store: Arc<dyn SessionStore>, catalog: Arc<dyn MusicCatalog>) -> Self {
        let sessions = SessionService::new(store);
        Self {
            submit_track: Arc::new(SubmitTrackHandler::new(sessions.clone(), catalog.clone())),
            publish_playlist: Arc::new(PublishPlaylistHandler::new(sessions.clone(), catalog)),
            sessions,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Path parsing
// ════════════════════════════════════════════════════════════════════════════════

fn parse_session_id(raw: &str) -> Result<SessionId, SessionApiError> {
    raw.parse()
        .map_err(|_| SessionApiError::bad_request(format!("Invalid session ID: {}", raw)))
}

fn parse_user_id(raw: &str) -> Result<UserId, SessionApiError> {
    raw.parse()
        .map_err(|_| SessionApiError::bad_request(format!("Invalid user ID: {}", raw)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Sessions
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/sessions
pub async fn list_sessions(
    State(state): State<SessionAppState>,
) -> Result<impl IntoResponse, SessionApiError> {
    let sessions = state.sessions.get_all().await?;
    let response: Vec<SessionSummaryResponse> = sessions.iter().map(Into::into).collect();
    Ok(Json(response))
}

/// POST /api/sessions
pub async fn create_session(
    State(state): State<SessionAppState>,
    Json(request): Json<CreateSessionRequest>,
) -> Result<impl IntoResponse, SessionApiError> {
    let session = Session::new(SessionId::new(request.id), request.name)?;
    state.sessions.create(&session).await?;
    Ok((StatusCode::CREATED, Json(SessionResponse::from(&session))))
}

/// GET /api/sessions/:id
pub async fn get_session(
    State(state): State<SessionAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, SessionApiError> {
    let session_id = parse_session_id(&session_id)?;
    let session = state.sessions.get_one(session_id).await?;
    Ok(Json(SessionResponse::from(&session)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Submissions
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/sessions/:id/submissions
pub async fn list_submissions(
    State(state): State<SessionAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, SessionApiError> {
    let session_id = parse_session_id(&session_id)?;
    let submissions = state.sessions.get_submissions(session_id).await?;
    let response: Vec<SubmissionResponse> = submissions.iter().map(Into::into).collect();
    Ok(Json(response))
}

/// POST /api/sessions/:id/submissions
pub async fn add_submission(
    State(state): State<SessionAppState>,
    Path(session_id): Path<String>,
    Json(request): Json<AddSubmissionRequest>,
) -> Result<impl IntoResponse, SessionApiError> {
    let session_id = parse_session_id(&session_id)?;
    let user_id = UserId::new(request.user_id);
    if request.track_id.trim().is_empty() {
        return Err(ValidationError::empty_field("track_id").into());
    }

    let submission = match request.title {
        Some(title) => {
            let draft = NewSubmission {
                user_id,
                track_id: request.track_id,
                title,
                artist: request.artist.unwrap_or_default(),
                album: request.album,
            };
            let id = state
                .sessions
                .add_submission(session_id, draft.clone())
                .await?;
            Submission::from_draft(id, draft)
        }
        None => {
            let cmd = SubmitTrackCommand {
                session_id,
                user_id,
                track_id: request.track_id,
            };
            state.submit_track.handle(cmd).await?
        }
    };

    Ok((StatusCode::CREATED, Json(SubmissionResponse::from(&submission))))
}

/// GET /api/sessions/:id/submissions/:submission_id
pub async fn get_submission(
    State(state): State<SessionAppState>,
    Path((session_id, submission_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, SessionApiError> {
    let session_id = parse_session_id(&session_id)?;
    let submission_id = SubmissionId::new(submission_id)?;
    let submission = state
        .sessions
        .get_submission(session_id, &submission_id)
        .await?;
    Ok(Json(SubmissionResponse::from(&submission)))
}

/// DELETE /api/sessions/:id/submissions/:submission_id
pub async fn remove_submission(
    State(state): State<SessionAppState>,
    Path((session_id, submission_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, SessionApiError> {
    let session_id = parse_session_id(&session_id)?;
    let submission_id = SubmissionId::new(submission_id)?;
    state
        .sessions
        .remove_submission(session_id, &submission_id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Votes
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/sessions/:id/votes
pub async fn list_votes(
    State(state): State<SessionAppState>,
    Path(session_id): Path<String>,
) -> Result<impl IntoResponse, SessionApiError> {
    let session_id = parse_session_id(&session_id)?;
    let votes = state.sessions.get_votes(session_id).await?;
    let response: Vec<VoteResponse> = votes.iter().map(Into::into).collect();
    Ok(Json(response))
}

/// POST /api/sessions/:id/votes
pub async fn add_vote(
    State(state): State<SessionAppState>,
    Path(session_id): Path<String>,
    Json(request): Json<AddVoteRequest>,
) -> Result<impl IntoResponse, SessionApiError> {
    let session_id = parse_session_id(&session_id)?;
    let vote = Vote {
        id: VoteId::new(request.id)?,
        submission_id: SubmissionId::new(request.submission_id)?,
        user_id: UserId::new(request.user_id),
    };
    let response = VoteResponse::from(&vote);
    state.sessions.add_vote(session_id, vote).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/sessions/:id/votes/:vote_id
pub async fn get_vote(
    State(state): State<SessionAppState>,
    Path((session_id, vote_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, SessionApiError> {
    let session_id = parse_session_id(&session_id)?;
    let vote = state
        .sessions
        .get_vote(session_id, &VoteId::new(vote_id)?)
        .await?;
    Ok(Json(VoteResponse::from(&vote)))
}

/// DELETE /api/sessions/:id/votes/:vote_id
pub async fn remove_vote(
    State(state): State<SessionAppState>,
    Path((session_id, vote_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, SessionApiError> {
    let session_id = parse_session_id(&session_id)?;
    state
        .sessions
        .remove_vote(session_id, &VoteId::new(vote_id)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ════════════════════════════════════════════════════════════════════════════════
// Playlists
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/sessions/:id/playlists
pub async fn add_playlist(
    State(state): State<SessionAppState>,
    Path(session_id): Path<String>,
    Json(request): Json<AddPlaylistRequest>,
) -> Result<impl IntoResponse, SessionApiError> {
    let session_id = parse_session_id(&session_id)?;
    let playlist_id = PlaylistId::new(request.playlist_id)?;
    let user_id = UserId::new(request.user_id);
    state
        .sessions
        .add_playlist(session_id, playlist_id.clone(), user_id)
        .await?;

    let response = PlaylistResponse {
        id: playlist_id.to_string(),
        user_id: user_id.as_i64(),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/sessions/:id/playlists/:user_id
pub async fn get_playlist(
    State(state): State<SessionAppState>,
    Path((session_id, user_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, SessionApiError> {
    let session_id = parse_session_id(&session_id)?;
    let user_id = parse_user_id(&user_id)?;
    let playlist = state.sessions.get_playlist(session_id, user_id).await?;
    Ok(Json(PlaylistResponse::from(&playlist)))
}

/// POST /api/sessions/:id/playlists/:user_id/publish
pub async fn publish_playlist(
    State(state): State<SessionAppState>,
    Path((session_id, user_id)): Path<(String, String)>,
    Json(request): Json<PublishPlaylistRequest>,
) -> Result<impl IntoResponse, SessionApiError> {
    let cmd = PublishPlaylistCommand {
        session_id: parse_session_id(&session_id)?,
        user_id: parse_user_id(&user_id)?,
        name: request.name,
    };
    let playlist = state.publish_playlist.handle(cmd).await?;
    Ok((StatusCode::CREATED, Json(PlaylistResponse::from(&playlist))))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct SessionApiError {
    code: ErrorCode,
    message: String,
}

impl SessionApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::ValidationFailed => StatusCode::BAD_REQUEST,
            ErrorCode::SessionNotFound
            | ErrorCode::SubmissionNotFound
            | ErrorCode::VoteNotFound
            | ErrorCode::PlaylistNotFound
            | ErrorCode::TrackNotFound => StatusCode::NOT_FOUND,
            ErrorCode::SessionExists
            | ErrorCode::PlaylistExists
            | ErrorCode::ConcurrentModification => StatusCode::CONFLICT,
            ErrorCode::CatalogUnavailable => StatusCode::BAD_GATEWAY,
            ErrorCode::DatabaseError | ErrorCode::InternalError => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<ValidationError> for SessionApiError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string())
    }
}

impl From<SessionError> for SessionApiError {
    fn from(err: SessionError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl From<HandlerError> for SessionApiError {
    fn from(err: HandlerError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

impl IntoResponse for SessionApiError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(code = %self.code, message = %self.message, "Request failed");
        }
        (status, Json(ErrorResponse::new(self.code, self.message))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::{CatalogError, StoreError};

    #[test]
    fn missing_session_maps_to_404() {
        let err: SessionApiError =
            SessionError::Store(StoreError::NotFound(SessionId::new(1))).into();
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn conflicts_map_to_409() {
        let stale: SessionApiError = SessionError::Store(StoreError::Conflict {
            id: SessionId::new(1),
            expected: 3,
        })
        .into();
        assert_eq!(stale.status(), StatusCode::CONFLICT);

        let exists: SessionApiError = SessionError::PlaylistExists(UserId::new(1)).into();
        assert_eq!(exists.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn catalog_outage_maps_to_502() {
        let err: SessionApiError =
            HandlerError::Catalog(CatalogError::Unavailable("down".to_string())).into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn validation_maps_to_400() {
        let err: SessionApiError = ValidationError::empty_field("vote_id").into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn backend_failure_maps_to_500() {
        let err: SessionApiError =
            SessionError::Store(StoreError::Backend("pool closed".to_string())).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
