//! HTTP adapter for session endpoints.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    AddPlaylistRequest, AddSubmissionRequest, AddVoteRequest, CreateSessionRequest,
    ErrorResponse, PlaylistResponse, PublishPlaylistRequest, SessionResponse,
    SessionSummaryResponse, SubmissionResponse, VoteResponse,
};
pub use handlers::{SessionApiError, SessionAppState};
pub use routes::session_router;
