//! Stream record validation
//!
//! Turns raw payloads into typed [`StreamRecord`]s. Values are never
//! coerced here: anything outside the quality or language enumerations is
//! rejected.

use crate::error::{RecordViolation, Result, StreamManagerError};
use crate::types::{DEFAULT_SERVER_ID, Language, Quality, RawStreamRecord, StreamRecord};

/// Validates a single raw record
///
/// # Errors
/// - `InvalidRecord` naming every violated field
pub fn validate_record(raw: &RawStreamRecord) -> Result<StreamRecord> {
    check(raw).map_err(|fields| StreamManagerError::InvalidRecord {
        violations: vec![RecordViolation {
            index: None,
            fields,
        }],
    })
}

/// Validates a batch of raw records, all or nothing
///
/// # Errors
/// - `InvalidRecord` listing every failing record with its index
pub fn validate_batch(raws: &[RawStreamRecord]) -> Result<Vec<StreamRecord>> {
    let mut records = Vec::with_capacity(raws.len());
    let mut violations = Vec::new();

    for (index, raw) in raws.iter().enumerate() {
        match check(raw) {
            Ok(record) => records.push(record),
            Err(fields) => violations.push(RecordViolation {
                index: Some(index),
                fields,
            }),
        }
    }

    if violations.is_empty() {
        Ok(records)
    } else {
        Err(StreamManagerError::InvalidRecord { violations })
    }
}

fn check(raw: &RawStreamRecord) -> std::result::Result<StreamRecord, Vec<&'static str>> {
    let mut fields = Vec::new();

    let anime_id = raw.anime_id.as_deref().filter(|s| !s.trim().is_empty());
    if anime_id.is_none() {
        fields.push("animeId");
    }

    let episode_number = raw
        .episode_number
        .filter(|&n| n >= 1)
        .and_then(|n| u32::try_from(n).ok());
    if episode_number.is_none() {
        fields.push("episodeNumber");
    }

    let stream_url = raw.stream_url.as_deref().filter(|s| !s.trim().is_empty());
    if stream_url.is_none() {
        fields.push("streamUrl");
    }

    let quality = raw.quality.as_deref().and_then(|q| q.parse::<Quality>().ok());
    if quality.is_none() {
        fields.push("quality");
    }

    let language = raw.language.as_deref().and_then(|l| l.parse::<Language>().ok());
    if language.is_none() {
        fields.push("language");
    }

    match (anime_id, episode_number, stream_url, quality, language) {
        (Some(anime_id), Some(episode_number), Some(stream_url), Some(quality), Some(language)) => {
            Ok(StreamRecord {
                anime_id: anime_id.to_string(),
                episode_number,
                stream_url: stream_url.to_string(),
                quality,
                language,
                server_id: raw
                    .server_id
                    .clone()
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| DEFAULT_SERVER_ID.to_string()),
            })
        }
        _ => Err(fields),
    }
}
