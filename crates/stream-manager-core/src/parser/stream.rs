//! Streams endpoint response parser
//!
//! Extracts the generated stream id and the statistics block.

use serde::Deserialize;
use serde_json::Value;

use crate::error::{Result, StreamManagerError};
use crate::types::StreamStats;

/// Shown when the API does not echo a stream id back
pub const UNKNOWN_STREAM_ID: &str = "N/A";

#[derive(Debug, Deserialize)]
struct StatsEnvelope {
    stats: Option<StreamStats>,
}

/// Extracts `stream.id` from an add-stream response
///
/// Falls back to [`UNKNOWN_STREAM_ID`] when the body is not JSON or the
/// field is absent; the stream was accepted either way.
pub fn parse_added_stream_id(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| match json.get("stream")?.get("id")? {
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .unwrap_or_else(|| UNKNOWN_STREAM_ID.to_string())
}

/// Parses the `stats` block of a statistics response
///
/// A missing `stats` block yields zeroed statistics.
///
/// # Errors
/// Returns `Json` if the body is not JSON
pub fn parse_stats(body: &str) -> Result<StreamStats> {
    let envelope: StatsEnvelope = serde_json::from_str(body).map_err(StreamManagerError::Json)?;
    Ok(envelope.stats.unwrap_or_default())
}
