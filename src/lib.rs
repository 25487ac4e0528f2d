//! Mixtape - collaborative song-nomination sessions.
//!
//! Participants nominate tracks into a session, vote for the ones they want,
//! and each user's picks can be published as an external playlist. Every
//! operation loads the whole session from a pluggable store, changes it in
//! memory and writes it back under a version check.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
