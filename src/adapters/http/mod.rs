//! HTTP adapters - REST API implementations.

pub mod session;

pub use session::{session_router, SessionAppState};
