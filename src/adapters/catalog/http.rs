//! HTTP Music Catalog - talks to the streaming service's REST API.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpCatalogConfig::new("https://catalog.example.com/v1", token)
//!     .with_timeout(Duration::from_secs(5));
//!
//! let catalog = HttpMusicCatalog::new(config)?;
//! ```
//!
//! Endpoints used:
//! - `GET  {base}/tracks/{id}`
//! - `POST {base}/users/{user}/playlists` with `{"name", "track_ids"}`

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode, Url};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::domain::foundation::{PlaylistId, UserId};
use crate::ports::{CatalogError, MusicCatalog, Track};

/// Configuration for the HTTP catalog.
#[derive(Debug, Clone)]
pub struct HttpCatalogConfig {
    /// Bearer token for the catalog API.
    access_token: Secret<String>,
    /// Base URL, without a trailing slash.
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpCatalogConfig {
    pub fn new(base_url: impl Into<String>, access_token: impl Into<String>) -> Self {
        Self {
            access_token: Secret::new(access_token.into()),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn access_token(&self) -> &str {
        self.access_token.expose_secret()
    }
}

#[derive(Debug, Serialize)]
struct CreatePlaylistBody<'a> {
    name: &'a str,
    track_ids: &'a [String],
}

#[derive(Debug, Deserialize)]
struct CreatedPlaylistBody {
    id: String,
}

/// Music catalog backed by a remote HTTP API.
pub struct HttpMusicCatalog {
    config: HttpCatalogConfig,
    base_url: Url,
    client: Client,
}

impl HttpMusicCatalog {
    /// Creates a catalog client; fails on an unusable base URL or if the
    /// HTTP client cannot be built.
    pub fn new(config: HttpCatalogConfig) -> Result<Self, CatalogError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| CatalogError::Unavailable(format!("Invalid catalog URL: {}", e)))?;
        if base_url.cannot_be_a_base() {
            return Err(CatalogError::Unavailable(format!(
                "Invalid catalog URL: {}",
                config.base_url
            )));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| CatalogError::Unavailable(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            base_url,
            client,
        })
    }

    /// Appends path segments to the base URL, percent-encoding each one.
    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::Unavailable("Catalog URL cannot take a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn track_url(&self, track_id: &str) -> Result<Url, CatalogError> {
        // Dot segments would be dropped from the path and address the collection.
        if matches!(track_id, "" | "." | "..") {
            return Err(CatalogError::TrackNotFound(track_id.to_string()));
        }
        self.endpoint(&["tracks", track_id])
    }

    fn playlists_url(&self, user_id: UserId) -> Result<Url, CatalogError> {
        self.endpoint(&["users", &user_id.to_string(), "playlists"])
    }

    async fn send(&self, request: reqwest::RequestBuilder) -> Result<Response, CatalogError> {
        request
            .bearer_auth(self.config.access_token())
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    CatalogError::Unavailable("request timed out".to_string())
                } else {
                    CatalogError::Unavailable(e.to_string())
                }
            })
    }
}

/// Maps a non-success status to a catalog error.
fn status_error(status: StatusCode, body: &str, track_id: Option<&str>) -> CatalogError {
    match (status, track_id) {
        (s, Some(id)) if s == StatusCode::NOT_FOUND => CatalogError::TrackNotFound(id.to_string()),
        (s, _) if s.is_server_error() => {
            CatalogError::Unavailable(format!("Server error {}: {}", s, body))
        }
        (s, _) => CatalogError::InvalidResponse(format!("Unexpected status {}: {}", s, body)),
    }
}

async fn check_status(response: Response, track_id: Option<&str>) -> Result<Response, CatalogError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, &body, track_id))
}

#[async_trait]
impl MusicCatalog for HttpMusicCatalog {
    async fn get_track(&self, track_id: &str) -> Result<Track, CatalogError> {
        let response = self.send(self.client.get(self.track_url(track_id)?)).await?;
        let response = check_status(response, Some(track_id)).await?;

        let track: Track = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;

        debug!(track_id, title = %track.title, "Resolved track");
        Ok(track)
    }

    async fn create_playlist(
        &self,
        user_id: UserId,
        name: &str,
        track_ids: &[String],
    ) -> Result<PlaylistId, CatalogError> {
        let body = CreatePlaylistBody { name, track_ids };
        let response = self
            .send(self.client.post(self.playlists_url(user_id)?).json(&body))
            .await?;
        let response = check_status(response, None).await?;

        let created: CreatedPlaylistBody = response
            .json()
            .await
            .map_err(|e| CatalogError::InvalidResponse(e.to_string()))?;

        PlaylistId::new(created.id).map_err(|e| CatalogError::InvalidResponse(e.to_string()))
    }
}
