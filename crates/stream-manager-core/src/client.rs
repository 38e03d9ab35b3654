//! HTTP client for the admin API
//!
//! Implements [`StreamsPort`] and [`SearchPort`] with one request per
//! call. Requests are never retried; failures surface as
//! `Transport` or `Rejected` errors.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::ClientConfig;
use crate::error::{Result, StreamManagerError};
use crate::parser::{parse_added_stream_id, parse_search_response, parse_stats};
use crate::ports::{SearchPort, StreamsPort};
use crate::types::{Language, Quality, SearchResultEntry, StreamRecord, StreamStats};
use crate::url::{build_remove_url, build_search_url, build_stats_url};

const USER_AGENT: &str = concat!("stream-manager/", env!("CARGO_PKG_VERSION"));

/// Bulk items omit the server id
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BulkItem<'a> {
    anime_id: &'a str,
    episode_number: u32,
    stream_url: &'a str,
    quality: Quality,
    language: Language,
}

impl<'a> From<&'a StreamRecord> for BulkItem<'a> {
    fn from(record: &'a StreamRecord) -> Self {
        Self {
            anime_id: &record.anime_id,
            episode_number: record.episode_number,
            stream_url: &record.stream_url,
            quality: record.quality,
            language: record.language,
        }
    }
}

#[derive(Debug, Serialize)]
struct BulkPayload<'a> {
    bulk: bool,
    streams: Vec<BulkItem<'a>>,
}

/// HTTP client wrapper for the admin streams and search endpoints
///
/// Handles all HTTP communication, including:
/// - Per-call timeouts (longer for bulk submissions)
/// - Mapping non-success statuses to `Rejected` with the body verbatim
/// - Normalizing search responses at the boundary
pub struct StreamManagerClient {
    client: reqwest::Client,
    config: ClientConfig,
}

impl StreamManagerClient {
    /// Create a new client with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(ClientConfig::default())
    }

    /// Create a new client with custom configuration
    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self { client, config })
    }

    /// Configuration this client was built with
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.config.timeout_secs)
    }

    fn bulk_timeout(&self) -> Duration {
        Duration::from_secs(self.config.bulk_timeout_secs)
    }

    /// Send a request and return the body of a successful response
    ///
    /// # Errors
    /// - `Transport` - Connection failure or timeout
    /// - `Rejected` - Any non-success status, with the body verbatim
    async fn send(&self, request: reqwest::RequestBuilder) -> Result<String> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!(status = status.as_u16(), "request rejected");
            return Err(StreamManagerError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl StreamsPort for StreamManagerClient {
    async fn add_stream(&self, record: &StreamRecord) -> Result<String> {
        debug!(url = %self.config.streams_endpoint, anime_id = %record.anime_id, "adding stream");

        let request = self
            .client
            .post(&self.config.streams_endpoint)
            .timeout(self.timeout())
            .json(record);

        let body = self.send(request).await?;
        let id = parse_added_stream_id(&body);
        info!(anime_id = %record.anime_id, episode = record.episode_number, %id, "stream added");
        Ok(id)
    }

    async fn add_streams_bulk(&self, records: &[StreamRecord]) -> Result<()> {
        debug!(url = %self.config.streams_endpoint, count = records.len(), "adding streams in bulk");

        let payload = BulkPayload {
            bulk: true,
            streams: records.iter().map(BulkItem::from).collect(),
        };

        let request = self
            .client
            .post(&self.config.streams_endpoint)
            .timeout(self.bulk_timeout())
            .json(&payload);

        self.send(request).await?;
        info!(count = records.len(), "bulk streams added");
        Ok(())
    }

    async fn stream_stats(&self) -> Result<StreamStats> {
        let url = build_stats_url(&self.config.streams_endpoint);
        debug!(%url, "fetching stats");

        let body = self.send(self.client.get(&url).timeout(self.timeout())).await?;
        parse_stats(&body)
    }

    async fn remove_stream(&self, stream_id: &str) -> Result<()> {
        let url = build_remove_url(&self.config.streams_endpoint, stream_id);
        debug!(%url, "removing stream");

        self.send(self.client.delete(&url).timeout(self.timeout())).await?;
        info!(%stream_id, "stream removed");
        Ok(())
    }
}

#[async_trait]
impl SearchPort for StreamManagerClient {
    async fn search_anime(&self, query: &str, page: u32) -> Result<Vec<SearchResultEntry>> {
        let url = build_search_url(&self.config.search_endpoint, query, page);
        debug!(%url, "searching catalog");

        let body = self.send(self.client.get(&url).timeout(self.timeout())).await?;
        parse_search_response(&body)
    }
}
