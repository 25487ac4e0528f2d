//! Storage Adapters
//!
//! Implementations of the SessionStore port.
//!
//! ## Available Adapters
//!
//! - **FileSessionStore** - Stores each session as a YAML file on disk
//! - **InMemorySessionStore** - Stores sessions in memory (testing/development)
//!
//! The Postgres store lives in `adapters::postgres`.

mod file_session_store;
mod in_memory_session_store;

pub use file_session_store::FileSessionStore;
pub use in_memory_session_store::InMemorySessionStore;
