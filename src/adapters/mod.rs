//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `storage` - File and in-memory session stores
//! - `postgres` - PostgreSQL session store
//! - `catalog` - Music catalog clients (HTTP, in-memory)
//! - `http` - Axum REST API

pub mod catalog;
pub mod http;
pub mod postgres;
pub mod storage;

pub use catalog::{CreatedPlaylist, HttpCatalogConfig, HttpMusicCatalog, InMemoryMusicCatalog};
pub use postgres::{run_migrations, PostgresSessionStore};
pub use storage::{FileSessionStore, InMemorySessionStore};
