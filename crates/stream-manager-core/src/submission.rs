//! Submission orchestration
//!
//! Validates records, sends them through a [`StreamsPort`] and reports a
//! single outcome. Invalid input never reaches the network, and nothing is
//! retried.

use tracing::{info, warn};

use crate::error::{Result, StreamManagerError};
use crate::ports::StreamsPort;
use crate::types::RawStreamRecord;
use crate::validator::{validate_batch, validate_record};

/// A single stream accepted by the API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submitted {
    pub anime_id: String,
    pub episode_number: u32,
    /// Id generated by the API, `"N/A"` when it did not say
    pub generated_id: String,
}

/// A bulk batch accepted by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BulkSubmitted {
    pub count: usize,
}

/// Validate-then-send pipeline over a [`StreamsPort`]
pub struct SubmissionOrchestrator<P> {
    port: P,
}

impl<P: StreamsPort> SubmissionOrchestrator<P> {
    pub fn new(port: P) -> Self {
        Self { port }
    }

    /// Validate and submit one record
    ///
    /// # Errors
    /// - `InvalidRecord` before any request is made
    /// - `Rejected` with the remote status and body
    /// - `Transport` on connection failure or timeout
    pub async fn submit(&self, record: impl Into<RawStreamRecord>) -> Result<Submitted> {
        let record = validate_record(&record.into())?;

        let generated_id = self.port.add_stream(&record).await?;
        Ok(Submitted {
            anime_id: record.anime_id,
            episode_number: record.episode_number,
            generated_id,
        })
    }

    /// Validate and submit a batch as one request
    ///
    /// The batch is sent only if every record is valid. A `Rejected`
    /// response means nothing should be assumed persisted.
    ///
    /// # Errors
    /// - `InvalidRecord` listing every failing record, before any request
    /// - `Rejected` with the remote status and body
    /// - `Transport` on connection failure or timeout
    pub async fn submit_bulk<I, R>(&self, records: I) -> Result<BulkSubmitted>
    where
        I: IntoIterator<Item = R>,
        R: Into<RawStreamRecord>,
    {
        let raws: Vec<RawStreamRecord> = records.into_iter().map(Into::into).collect();
        let records = validate_batch(&raws)?;

        match self.port.add_streams_bulk(&records).await {
            Ok(()) => {
                info!(count = records.len(), "bulk submission accepted");
                Ok(BulkSubmitted {
                    count: records.len(),
                })
            }
            Err(e @ StreamManagerError::Rejected { .. }) => {
                warn!(count = records.len(), "bulk submission rejected, treating batch as not persisted");
                Err(e)
            }
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Language, Quality, StreamRecord, StreamStats};
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStreams {
        single: Mutex<Vec<StreamRecord>>,
        bulk: Mutex<Vec<Vec<StreamRecord>>>,
        reject_with: Option<(u16, &'static str)>,
    }

    impl RecordingStreams {
        fn rejecting(status: u16, body: &'static str) -> Self {
            Self {
                reject_with: Some((status, body)),
                ..Default::default()
            }
        }

        fn outcome(&self) -> Result<()> {
            match self.reject_with {
                Some((status, body)) => Err(StreamManagerError::Rejected {
                    status,
                    body: body.to_string(),
                }),
                None => Ok(()),
            }
        }
    }

    #[async_trait]
    impl StreamsPort for RecordingStreams {
        async fn add_stream(&self, record: &StreamRecord) -> Result<String> {
            self.single.lock().unwrap().push(record.clone());
            self.outcome().map(|()| "stream-1".to_string())
        }

        async fn add_streams_bulk(&self, records: &[StreamRecord]) -> Result<()> {
            self.bulk.lock().unwrap().push(records.to_vec());
            self.outcome()
        }

        async fn stream_stats(&self) -> Result<StreamStats> {
            Ok(StreamStats::default())
        }

        async fn remove_stream(&self, _stream_id: &str) -> Result<()> {
            self.outcome()
        }
    }

    fn record(episode_number: u32) -> StreamRecord {
        StreamRecord {
            anime_id: "one-piece".to_string(),
            episode_number,
            stream_url: format!("http://example/stream/{}?f02a7c", 11587 + episode_number),
            quality: Quality::P1080,
            language: Language::Sub,
            server_id: "yaichi-anime".to_string(),
        }
    }

    #[tokio::test]
    async fn test_submit_single() {
        let streams = RecordingStreams::default();
        let orchestrator = SubmissionOrchestrator::new(&streams);

        let submitted = orchestrator.submit(record(1)).await.unwrap();
        assert_eq!(submitted.generated_id, "stream-1");
        assert_eq!(submitted.episode_number, 1);
        assert_eq!(streams.single.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_invalid_makes_no_request() {
        let streams = RecordingStreams::default();
        let orchestrator = SubmissionOrchestrator::new(&streams);

        let raw = RawStreamRecord {
            anime_id: Some(String::new()),
            episode_number: Some(1),
            stream_url: Some("x".to_string()),
            quality: Some("1080p".to_string()),
            language: Some("sub".to_string()),
            server_id: None,
        };

        let err = orchestrator.submit(raw).await.unwrap_err();
        assert_eq!(err.violations()[0].fields, vec!["animeId"]);
        assert!(streams.single.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_rejected_verbatim() {
        let streams = RecordingStreams::rejecting(400, "animeId, episodeNumber, and streamUrl are required");
        let orchestrator = SubmissionOrchestrator::new(&streams);

        match orchestrator.submit(record(1)).await {
            Err(StreamManagerError::Rejected { status, body }) => {
                assert_eq!(status, 400);
                assert_eq!(body, "animeId, episodeNumber, and streamUrl are required");
            }
            other => panic!("Expected Rejected error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_submit_bulk() {
        let streams = RecordingStreams::default();
        let orchestrator = SubmissionOrchestrator::new(&streams);

        let outcome = orchestrator.submit_bulk(vec![record(1), record(2)]).await.unwrap();
        assert_eq!(outcome, BulkSubmitted { count: 2 });

        let sent = streams.bulk.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0][1].episode_number, 2);
    }

    #[tokio::test]
    async fn test_submit_bulk_all_or_nothing() {
        let streams = RecordingStreams::default();
        let orchestrator = SubmissionOrchestrator::new(&streams);

        let mut bad = RawStreamRecord::from(record(2));
        bad.quality = Some("8K".to_string());
        let batch = vec![RawStreamRecord::from(record(1)), bad, RawStreamRecord::from(record(3))];

        let err = orchestrator.submit_bulk(batch).await.unwrap_err();
        assert_eq!(err.violations().len(), 1);
        assert_eq!(err.violations()[0].index, Some(1));
        assert!(streams.bulk.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_submit_bulk_rejected_once() {
        let streams = RecordingStreams::rejecting(500, "server error");
        let orchestrator = SubmissionOrchestrator::new(&streams);

        match orchestrator.submit_bulk(vec![record(1), record(2)]).await {
            Err(StreamManagerError::Rejected { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "server error");
            }
            other => panic!("Expected Rejected error, got {:?}", other),
        }
        assert_eq!(streams.bulk.lock().unwrap().len(), 1);
    }
}
