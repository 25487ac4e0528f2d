//! Application layer - the session service and the handlers built on it.
//!
//! `SessionService` owns the consistency rules of a session. Handlers
//! coordinate it with the music catalog.

pub mod handlers;
mod session_service;

pub use handlers::{
    HandlerError, PublishPlaylistCommand, PublishPlaylistHandler, SubmitTrackCommand,
    SubmitTrackHandler,
};
pub use session_service::SessionService;
