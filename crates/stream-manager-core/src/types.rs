//! Core data types for the stream manager
//!
//! Contains the stream record model, its enumerations, the series input
//! value, catalog search entries and the statistics payload.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Server id attached to records when none is given
pub const DEFAULT_SERVER_ID: &str = "yaichi-anime";

/// Playback quality of a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Quality {
    #[serde(rename = "480p")]
    P480,
    #[serde(rename = "720p")]
    P720,
    #[default]
    #[serde(rename = "1080p")]
    P1080,
    #[serde(rename = "1440p")]
    P1440,
    #[serde(rename = "4K")]
    Uhd4k,
}

impl Quality {
    pub const ALL: [Quality; 5] = [
        Quality::P480,
        Quality::P720,
        Quality::P1080,
        Quality::P1440,
        Quality::Uhd4k,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Quality::P480 => "480p",
            Quality::P720 => "720p",
            Quality::P1080 => "1080p",
            Quality::P1440 => "1440p",
            Quality::Uhd4k => "4K",
        }
    }
}

impl fmt::Display for Quality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Quality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Quality::ALL
            .into_iter()
            .find(|q| q.as_str() == s)
            .ok_or_else(|| format!("unknown quality '{}'", s))
    }
}

/// Audio/subtitle variant of a stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Sub,
    Dub,
    Raw,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::Sub, Language::Dub, Language::Raw];

    pub fn as_str(&self) -> &'static str {
        match self {
            Language::Sub => "sub",
            Language::Dub => "dub",
            Language::Raw => "raw",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Language::ALL
            .into_iter()
            .find(|l| l.as_str() == s)
            .ok_or_else(|| format!("unknown language '{}'", s))
    }
}

/// One playable episode entry in the catalog
///
/// Built by the series generator or the validator; never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamRecord {
    /// Catalog-scoped anime identifier (e.g., "one-piece")
    pub anime_id: String,

    /// Episode number, starting at 1
    pub episode_number: u32,

    /// Playable URL
    pub stream_url: String,

    #[serde(default)]
    pub quality: Quality,

    #[serde(default)]
    pub language: Language,

    /// Informational only
    #[serde(default = "default_server_id")]
    pub server_id: String,
}

fn default_server_id() -> String {
    DEFAULT_SERVER_ID.to_string()
}

/// Unvalidated stream payload
///
/// Produced by file loading and operator input, consumed by the validator.
/// Accepts both camelCase keys and the snake_case keys of older stream files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawStreamRecord {
    #[serde(default, alias = "anime_id", deserialize_with = "text_only")]
    pub anime_id: Option<String>,

    #[serde(default, alias = "episode_number", deserialize_with = "integer_only")]
    pub episode_number: Option<i64>,

    #[serde(default, alias = "stream_url", deserialize_with = "text_only")]
    pub stream_url: Option<String>,

    #[serde(default, deserialize_with = "text_or_json")]
    pub quality: Option<String>,

    #[serde(default, deserialize_with = "text_or_json")]
    pub language: Option<String>,

    #[serde(default, alias = "server_id", deserialize_with = "text_only")]
    pub server_id: Option<String>,
}

// Wrong-typed values never fail deserialization; they surface as validator
// violations for their record instead.

fn text_only<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        _ => None,
    })
}

fn integer_only<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64(),
        _ => None,
    })
}

/// Keeps non-string values as their JSON text so defaults never replace them
fn text_or_json<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

impl RawStreamRecord {
    /// Fill absent quality, language and server id with their defaults
    ///
    /// Only absent values are filled. Present but unrecognized values are
    /// left for the validator to reject.
    pub fn with_defaults(mut self) -> Self {
        self.quality.get_or_insert_with(|| Quality::default().to_string());
        self.language.get_or_insert_with(|| Language::default().to_string());
        self.server_id.get_or_insert_with(default_server_id);
        self
    }
}

impl From<&StreamRecord> for RawStreamRecord {
    fn from(record: &StreamRecord) -> Self {
        Self {
            anime_id: Some(record.anime_id.clone()),
            episode_number: Some(i64::from(record.episode_number)),
            stream_url: Some(record.stream_url.clone()),
            quality: Some(record.quality.to_string()),
            language: Some(record.language.to_string()),
            server_id: Some(record.server_id.clone()),
        }
    }
}

impl From<StreamRecord> for RawStreamRecord {
    fn from(record: StreamRecord) -> Self {
        RawStreamRecord::from(&record)
    }
}

/// Input to the series generator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeriesSpec {
    pub anime_id: String,
    /// Number of episodes to generate; negative values are rejected
    pub total_episodes: i64,
    /// Numeric stream id of episode 1
    pub starting_stream_id: i64,
    pub token: String,
    pub quality: Quality,
    pub language: Language,
    /// Base path the stream id is appended to
    pub url_template: String,
}

/// One anime from the remote catalog search
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResultEntry {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
    pub status: Option<String>,
    pub episode_count: Option<u32>,
    pub rating: Option<String>,
    pub genres: Vec<String>,
    pub description: Option<String>,
}

/// Aggregate statistics reported by the streams endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamStats {
    #[serde(default)]
    pub total_streams: u64,
    #[serde(default)]
    pub active_streams: u64,
    #[serde(default)]
    pub streams_by_server: BTreeMap<String, u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quality_wire_names() {
        assert_eq!(serde_json::to_string(&Quality::Uhd4k).unwrap(), "\"4K\"");
        assert_eq!(serde_json::to_string(&Quality::P720).unwrap(), "\"720p\"");
        assert_eq!("1440p".parse::<Quality>(), Ok(Quality::P1440));
        assert!("4k".parse::<Quality>().is_err());
    }

    #[test]
    fn test_language_wire_names() {
        assert_eq!(serde_json::to_string(&Language::Dub).unwrap(), "\"dub\"");
        assert_eq!("raw".parse::<Language>(), Ok(Language::Raw));
        assert!("spanish".parse::<Language>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Quality::default(), Quality::P1080);
        assert_eq!(Language::default(), Language::Sub);
    }

    #[test]
    fn test_stream_record_camel_case() {
        let record = StreamRecord {
            anime_id: "one-piece".to_string(),
            episode_number: 1,
            stream_url: "http://example/stream/11588?f02a7c".to_string(),
            quality: Quality::P1080,
            language: Language::Sub,
            server_id: DEFAULT_SERVER_ID.to_string(),
        };

        let json = serde_json::to_value(&record).expect("Serialization should succeed");
        assert_eq!(json["animeId"], "one-piece");
        assert_eq!(json["episodeNumber"], 1);
        assert_eq!(json["streamUrl"], "http://example/stream/11588?f02a7c");
        assert_eq!(json["quality"], "1080p");
        assert_eq!(json["serverId"], "yaichi-anime");
    }

    #[test]
    fn test_raw_record_accepts_snake_case() {
        let raw: RawStreamRecord = serde_json::from_str(
            r#"{"anime_id": "naruto", "episode_number": 3, "stream_url": "http://x/1?t"}"#,
        )
        .expect("Deserialization should succeed");

        assert_eq!(raw.anime_id.as_deref(), Some("naruto"));
        assert_eq!(raw.episode_number, Some(3));
        assert_eq!(raw.quality, None);
    }

    #[test]
    fn test_raw_record_wrong_types_are_kept_for_validation() {
        let raw: RawStreamRecord = serde_json::from_str(
            r#"{"anime_id": 7, "episode_number": "2", "stream_url": "http://x/1?t", "quality": 1080, "language": null}"#,
        )
        .expect("Deserialization should succeed");

        assert_eq!(raw.anime_id, None);
        assert_eq!(raw.episode_number, None);
        assert_eq!(raw.quality.as_deref(), Some("1080"));
        assert_eq!(raw.language, None);

        let fractional: RawStreamRecord =
            serde_json::from_str(r#"{"episodeNumber": 1.5}"#).expect("Deserialization should succeed");
        assert_eq!(fractional.episode_number, None);
    }

    #[test]
    fn test_with_defaults_keeps_present_values() {
        let raw = RawStreamRecord {
            quality: Some("8K".to_string()),
            ..Default::default()
        }
        .with_defaults();

        assert_eq!(raw.quality.as_deref(), Some("8K"));
        assert_eq!(raw.language.as_deref(), Some("sub"));
        assert_eq!(raw.server_id.as_deref(), Some("yaichi-anime"));
    }

    #[test]
    fn test_stats_deserialization() {
        let stats: StreamStats = serde_json::from_str(
            r#"{"totalStreams": 12, "activeStreams": 10, "streamsByServer": {"yaichi-anime": 12}}"#,
        )
        .expect("Deserialization should succeed");

        assert_eq!(stats.total_streams, 12);
        assert_eq!(stats.active_streams, 10);
        assert_eq!(stats.streams_by_server.get("yaichi-anime"), Some(&12));
    }
}
