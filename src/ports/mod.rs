//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SessionStore` - whole-aggregate session persistence with a version check
//! - `MusicCatalog` - track lookup and playlist creation in the streaming service

mod music_catalog;
mod session_store;

pub use music_catalog::{CatalogError, MusicCatalog, Track};
pub use session_store::{SessionStore, StoreError};
