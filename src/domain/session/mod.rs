//! Session module - voting rounds and everything nominated into them.
//!
//! - `Session` - aggregate root, read and written whole
//! - `Submission`, `Vote`, `Playlist` - embedded entries
//! - `SessionError` - lookup/uniqueness failures plus pass-through store errors

mod aggregate;
mod entries;
mod errors;

pub use aggregate::{Session, MAX_NAME_LENGTH};
pub use entries::{NewSubmission, Playlist, Submission, Vote};
pub use errors::SessionError;
