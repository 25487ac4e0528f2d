//! Music catalog configuration
//!
//! Without a `base_url` the in-memory catalog is used.

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use super::server::Environment;

/// Music catalog configuration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the remote catalog API
    pub base_url: Option<String>,

    /// Bearer token for the remote catalog
    pub access_token: Option<Secret<String>>,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl CatalogConfig {
    /// True when a remote catalog is configured
    pub fn is_remote(&self) -> bool {
        self.base_url.as_deref().map_or(false, |u| !u.is_empty())
    }

    /// Get the request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Exposes the access token (for building the client)
    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_ref().map(|t| t.expose_secret().as_str())
    }

    /// Validate catalog configuration
    pub fn validate(&self, environment: &Environment) -> Result<(), ValidationError> {
        let Some(url) = self.base_url.as_deref().filter(|u| !u.is_empty()) else {
            return Ok(());
        };

        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(ValidationError::InvalidCatalogUrl);
        }
        if *environment == Environment::Production && !url.starts_with("https://") {
            return Err(ValidationError::CatalogMustBeHttps);
        }
        if self.access_token().map_or(true, str::is_empty) {
            return Err(ValidationError::MissingRequired("CATALOG__ACCESS_TOKEN"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            access_token: None,
            timeout_secs: default_timeout(),
        }
    }
}

fn default_timeout() -> u64 {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    fn remote(url: &str, token: Option<&str>) -> CatalogConfig {
        CatalogConfig {
            base_url: Some(url.to_string()),
            access_token: token.map(|t| Secret::new(t.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_defaults_to_local_catalog() {
        let config = CatalogConfig::default();
        assert!(!config.is_remote());
        assert!(config.validate(&Environment::Production).is_ok());
    }

    #[test]
    fn test_remote_needs_token() {
        let config = remote("https://catalog.example.com", None);
        assert!(config.is_remote());
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::MissingRequired("CATALOG__ACCESS_TOKEN"))
        );
    }

    #[test]
    fn test_production_requires_https() {
        let config = remote("http://catalog.example.com", Some("tok"));
        assert!(config.validate(&Environment::Development).is_ok());
        assert_eq!(
            config.validate(&Environment::Production),
            Err(ValidationError::CatalogMustBeHttps)
        );
    }

    #[test]
    fn test_rejects_non_http_url() {
        let config = remote("ftp://catalog.example.com", Some("tok"));
        assert_eq!(
            config.validate(&Environment::Development),
            Err(ValidationError::InvalidCatalogUrl)
        );
    }

    #[test]
    fn test_token_is_redacted_in_debug() {
        let config = remote("https://catalog.example.com", Some("very-secret"));
        assert!(!format!("{:?}", config).contains("very-secret"));
        assert_eq!(config.access_token(), Some("very-secret"));
    }
}
