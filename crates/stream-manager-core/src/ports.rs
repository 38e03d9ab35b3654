//! Remote collaborators of the core workflows
//!
//! [`StreamManagerClient`](crate::StreamManagerClient) implements both traits
//! over HTTP; tests substitute in-memory fakes.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{SearchResultEntry, StreamRecord, StreamStats};

/// Admin streams endpoint
#[async_trait]
pub trait StreamsPort: Send + Sync {
    /// Add one stream, returning the id the API generated for it
    async fn add_stream(&self, record: &StreamRecord) -> Result<String>;

    /// Add several streams in one request
    async fn add_streams_bulk(&self, records: &[StreamRecord]) -> Result<()>;

    /// Aggregate statistics
    async fn stream_stats(&self) -> Result<StreamStats>;

    /// Remove a stream by id
    async fn remove_stream(&self, stream_id: &str) -> Result<()>;
}

/// Admin catalog search endpoint
#[async_trait]
pub trait SearchPort: Send + Sync {
    /// Search the catalog, returning normalized entries in response order
    async fn search_anime(&self, query: &str, page: u32) -> Result<Vec<SearchResultEntry>>;
}

#[async_trait]
impl<T: StreamsPort + ?Sized> StreamsPort for &T {
    async fn add_stream(&self, record: &StreamRecord) -> Result<String> {
        (**self).add_stream(record).await
    }

    async fn add_streams_bulk(&self, records: &[StreamRecord]) -> Result<()> {
        (**self).add_streams_bulk(records).await
    }

    async fn stream_stats(&self) -> Result<StreamStats> {
        (**self).stream_stats().await
    }

    async fn remove_stream(&self, stream_id: &str) -> Result<()> {
        (**self).remove_stream(stream_id).await
    }
}

#[async_trait]
impl<T: SearchPort + ?Sized> SearchPort for &T {
    async fn search_anime(&self, query: &str, page: u32) -> Result<Vec<SearchResultEntry>> {
        (**self).search_anime(query, page).await
    }
}
