//! Configuration values
//!
//! [`ClientConfig`] holds the admin API endpoints and timeouts. It is passed
//! explicitly; pointing the tool at another server produces a new value.
//! [`ManagerConfig`] holds the stream server settings used to build
//! Yaichi-style URLs, optionally loaded from a JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, StreamManagerError};
use crate::url::{build_search_endpoint, build_streams_endpoint};

/// Base URL used when none is configured
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

/// Configuration for the admin API client
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Application base URL the endpoints were derived from
    pub base_url: String,
    /// Admin streams endpoint (add, bulk add, stats, remove)
    pub streams_endpoint: String,
    /// Admin catalog search endpoint
    pub search_endpoint: String,
    /// Timeout for single, search, stats and removal requests (default: 30)
    pub timeout_secs: u64,
    /// Timeout for bulk submissions (default: 60)
    pub bulk_timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::for_base_url(DEFAULT_BASE_URL)
    }
}

impl ClientConfig {
    /// Derive both endpoints from an application base URL
    pub fn for_base_url(base_url: &str) -> Self {
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        Self {
            streams_endpoint: build_streams_endpoint(&base_url),
            search_endpoint: build_search_endpoint(&base_url),
            base_url,
            timeout_secs: 30,
            bulk_timeout_secs: 60,
        }
    }

    /// A copy of this config pointing at another base URL
    ///
    /// Timeouts are kept.
    pub fn with_base_url(&self, base_url: &str) -> Self {
        Self {
            timeout_secs: self.timeout_secs,
            bulk_timeout_secs: self.bulk_timeout_secs,
            ..Self::for_base_url(base_url)
        }
    }
}

/// Stream server used for Yaichi-style URLs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreamServerConfig {
    /// Base path stream ids are appended to
    pub base_url: String,
    /// Token used when the operator does not type one
    pub default_token: String,
}

impl Default for StreamServerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://yaichi-anime.ddns.net:8080/stream".to_string(),
            default_token: "f02a7c".to_string(),
        }
    }
}

/// Tool settings read from `config.json`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerConfig {
    #[serde(default)]
    pub yaichi_server: StreamServerConfig,
}

impl ManagerConfig {
    /// Load settings from a JSON file
    ///
    /// A missing file yields the defaults.
    ///
    /// # Errors
    /// - `Io` if the file exists but cannot be read
    /// - `Config` if the file is not valid configuration JSON
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|e| {
            StreamManagerError::Config(format!("{}: {}", path.display(), e))
        })
    }
}
