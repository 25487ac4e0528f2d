//! Application handlers.
//!
//! Command handlers that orchestrate the session service with other ports.

pub mod session;

pub use session::{
    HandlerError, PublishPlaylistCommand, PublishPlaylistHandler, SubmitTrackCommand,
    SubmitTrackHandler,
};
