//! Route configuration for session endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{
    add_playlist, add_submission, add_vote, create_session, get_playlist, get_session,
    get_submission, get_vote, list_sessions, list_submissions, list_votes, publish_playlist,
    remove_submission, remove_vote, SessionAppState,
};

/// Creates the session router with all endpoints.
///
/// Routes:
/// - `GET|POST /api/sessions`
/// - `GET /api/sessions/:id`
/// - `GET|POST /api/sessions/:id/submissions`
/// - `GET|DELETE /api/sessions/:id/submissions/:submission_id`
/// - `GET|POST /api/sessions/:id/votes`
/// - `GET|DELETE /api/sessions/:id/votes/:vote_id`
/// - `POST /api/sessions/:id/playlists`
/// - `GET /api/sessions/:id/playlists/:user_id`
/// - `POST /api/sessions/:id/playlists/:user_id/publish`
pub fn session_router() -> Router<SessionAppState> {
    Router::new()
        .route("/api/sessions", get(list_sessions).post(create_session))
        .route("/api/sessions/:id", get(get_session))
        .route(
            "/api/sessions/:id/submissions",
            get(list_submissions).post(add_submission),
        )
        .route(
            "/api/sessions/:id/submissions/:submission_id",
            get(get_submission).delete(remove_submission),
        )
        .route("/api/sessions/:id/votes", get(list_votes).post(add_vote))
        .route(
            "/api/sessions/:id/votes/:vote_id",
            get(get_vote).delete(remove_vote),
        )
        .route("/api/sessions/:id/playlists", post(add_playlist))
        .route("/api/sessions/:id/playlists/:user_id", get(get_playlist))
        .route(
            "/api/sessions/:id/playlists/:user_id/publish",
            post(publish_playlist),
        )
}
