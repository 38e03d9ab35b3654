//! Error types for the stream manager
//!
//! One enum covers every failure the core can report, from input
//! validation through remote rejections.

use std::fmt;

use thiserror::Error;

/// A single record that failed validation
///
/// `index` is the record's position in a batch, `None` for a lone record.
/// `fields` holds the wire names of every violated field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordViolation {
    pub index: Option<usize>,
    pub fields: Vec<&'static str>,
}

impl fmt::Display for RecordViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.index {
            Some(index) => write!(f, "record #{}: {}", index + 1, self.fields.join(", ")),
            None => write!(f, "{}", self.fields.join(", ")),
        }
    }
}

fn join_violations(violations: &[RecordViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error type for all stream manager operations
#[derive(Error, Debug)]
pub enum StreamManagerError {
    /// Series generation parameters are malformed
    #[error("Invalid series parameters: {0}")]
    InvalidSpec(String),

    /// One or more stream records failed validation
    #[error("Invalid stream record ({})", join_violations(.violations))]
    InvalidRecord { violations: Vec<RecordViolation> },

    /// A catalog search was attempted with an empty query
    #[error("Search query cannot be empty")]
    EmptyQuery,

    /// Operator selection is out of range or not a number (retryable)
    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    /// Remote API answered with a non-success status
    #[error("Error {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Network failure or timeout
    #[error("Connection error: {0}")]
    Transport(String),

    /// Local file could not be read or written
    #[error("File error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON could not be parsed or produced
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration could not be used
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<reqwest::Error> for StreamManagerError {
    fn from(err: reqwest::Error) -> Self {
        StreamManagerError::Transport(err.to_string())
    }
}

impl StreamManagerError {
    /// Violations carried by an `InvalidRecord` error, empty otherwise
    pub fn violations(&self) -> &[RecordViolation] {
        match self {
            StreamManagerError::InvalidRecord { violations } => violations,
            _ => &[],
        }
    }
}

/// Result type alias for stream manager operations
pub type Result<T> = std::result::Result<T, StreamManagerError>;
