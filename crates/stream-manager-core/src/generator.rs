//! Series generation
//!
//! Builds one stream record per consecutive episode from a numeric
//! stream id range.

use tracing::debug;

use crate::error::{Result, StreamManagerError};
use crate::types::{DEFAULT_SERVER_ID, SeriesSpec, StreamRecord};
use crate::url::build_stream_url;

/// Largest series that can be generated in one go
pub const MAX_EPISODES: i64 = 100_000;

/// Generates the stream records of a whole series
///
/// Episode `e` (1-based) gets stream id `starting_stream_id + e - 1`.
/// Records are returned in ascending episode order.
///
/// # Errors
/// - `InvalidSpec` if `total_episodes` is negative or above
///   [`MAX_EPISODES`], or the stream id range overflows. Nothing is
///   generated in that case.
///
/// # Example
/// ```
/// use stream_manager_core::{generate_series, Language, Quality, SeriesSpec};
/// let spec = SeriesSpec {
///     anime_id: "one-piece".to_string(),
///     total_episodes: 2,
///     starting_stream_id: 11588,
///     token: "f02a7c".to_string(),
///     quality: Quality::default(),
///     language: Language::default(),
///     url_template: "http://example/stream".to_string(),
/// };
/// let records = generate_series(&spec).unwrap();
/// assert_eq!(records[1].stream_url, "http://example/stream/11589?f02a7c");
/// ```
pub fn generate_series(spec: &SeriesSpec) -> Result<Vec<StreamRecord>> {
    if spec.total_episodes < 0 {
        return Err(StreamManagerError::InvalidSpec(format!(
            "totalEpisodes must not be negative (got {})",
            spec.total_episodes
        )));
    }

    let total = u32::try_from(spec.total_episodes)
        .ok()
        .filter(|_| spec.total_episodes <= MAX_EPISODES)
        .ok_or_else(|| {
            StreamManagerError::InvalidSpec(format!(
                "totalEpisodes must be at most {} (got {})",
                MAX_EPISODES, spec.total_episodes
            ))
        })?;

    if total > 0 && spec.starting_stream_id.checked_add(spec.total_episodes - 1).is_none() {
        return Err(StreamManagerError::InvalidSpec(format!(
            "stream id range starting at {} overflows",
            spec.starting_stream_id
        )));
    }

    debug!(
        anime_id = %spec.anime_id,
        total,
        start = spec.starting_stream_id,
        "generating series"
    );

    let records = (1..=total)
        .map(|episode| {
            let stream_id = spec.starting_stream_id + i64::from(episode - 1);
            StreamRecord {
                anime_id: spec.anime_id.clone(),
                episode_number: episode,
                stream_url: build_stream_url(&spec.url_template, stream_id, &spec.token),
                quality: spec.quality,
                language: spec.language,
                server_id: DEFAULT_SERVER_ID.to_string(),
            }
        })
        .collect();

    Ok(records)
}

/// Parses a numeric series parameter typed by an operator
///
/// # Errors
/// - `InvalidSpec` if `raw` is not an integer
pub fn parse_series_number(field: &str, raw: &str) -> Result<i64> {
    raw.trim().parse::<i64>().map_err(|_| {
        StreamManagerError::InvalidSpec(format!("{} must be an integer (got '{}')", field, raw.trim()))
    })
}
