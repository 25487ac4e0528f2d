//! Music catalog adapters.
//!
//! - **InMemoryMusicCatalog** - Fixture tracks; records created playlists
//! - **HttpMusicCatalog** - Remote catalog over HTTP with a bearer token

mod http;
mod in_memory;

pub use http::{HttpCatalogConfig, HttpMusicCatalog};
pub use in_memory::{CreatedPlaylist, InMemoryMusicCatalog};
