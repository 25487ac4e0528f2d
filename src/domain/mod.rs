//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamp, errors)
//! - `session` - Session aggregate with submissions, votes and playlists

pub mod foundation;
pub mod session;
