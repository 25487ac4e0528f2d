//! Foundation module - Shared domain primitives.
//!
//! Contains identifiers, the timestamp value object and the error types
//! that form the vocabulary of the Mixtape domain.

mod errors;
mod ids;
mod timestamp;

pub use errors::{ErrorCode, ValidationError};
pub use ids::{PlaylistId, SessionId, SubmissionId, UserId, VoteId};
pub use timestamp::Timestamp;
