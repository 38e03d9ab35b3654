//! Stream Manager Core Library
//!
//! Provides an async API for populating a streaming catalog backend with
//! episode stream records through its admin HTTP API.
//!
//! # Overview
//!
//! This crate provides:
//! - A URL synthesizer and series generator for numeric stream id ranges
//! - A validator that checks records before anything is sent
//! - A catalog search session with bounded, cancellable selection
//! - A submission orchestrator for single and bulk submissions
//! - An action coordinator that drives the interactive flows
//! - An HTTP client implementing the streams and search ports
//!
//! # Example
//!
//! ```no_run
//! use stream_manager_core::{
//!     generate_series, ClientConfig, Language, Quality, Result, SeriesSpec,
//!     StreamManagerClient, SubmissionOrchestrator,
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let client = StreamManagerClient::with_config(ClientConfig::for_base_url(
//!         "http://localhost:3000",
//!     ))?;
//!
//!     let records = generate_series(&SeriesSpec {
//!         anime_id: "one-piece".to_string(),
//!         total_episodes: 50,
//!         starting_stream_id: 11588,
//!         token: "f02a7c".to_string(),
//!         quality: Quality::P1080,
//!         language: Language::Sub,
//!         url_template: "http://yaichi-anime.ddns.net:8080/stream".to_string(),
//!     })?;
//!
//!     let outcome = SubmissionOrchestrator::new(&client).submit_bulk(records).await?;
//!     println!("{} streams added", outcome.count);
//!     Ok(())
//! }
//! ```
//!
//! # Failure model
//!
//! Nothing is retried. Invalid input fails before any request is made, and
//! a rejected bulk submission is reported as a single failure: treat the
//! whole batch as not persisted.

mod client;
mod config;
pub mod coordinator;
pub mod display;
mod error;
mod generator;
pub mod parser;
mod ports;
pub mod session;
pub mod streams_file;
mod submission;
mod types;
pub mod url;
mod validator;

// Re-export client types
pub use client::StreamManagerClient;
pub use config::{ClientConfig, DEFAULT_BASE_URL, ManagerConfig, StreamServerConfig};

// Re-export error types
pub use error::{RecordViolation, Result, StreamManagerError};

// Re-export ports
pub use ports::{SearchPort, StreamsPort};

// Re-export workflows
pub use coordinator::{ActionCoordinator, ActionOutcome, Operator, Pick};
pub use generator::{MAX_EPISODES, generate_series, parse_series_number};
pub use session::{CatalogSearchSession, SearchOutcome, Selection, SessionState};
pub use submission::{BulkSubmitted, SubmissionOrchestrator, Submitted};
pub use validator::{validate_batch, validate_record};

// Re-export data types
pub use types::{
    DEFAULT_SERVER_ID, Language, Quality, RawStreamRecord, SearchResultEntry, SeriesSpec,
    StreamRecord, StreamStats,
};

// Re-export URL helper functions for convenience
pub use url::build_stream_url;
