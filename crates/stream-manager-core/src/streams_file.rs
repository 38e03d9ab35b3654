//! JSON stream files
//!
//! Stream files are arrays of records. Both camelCase and snake_case keys
//! are read; files are always written in snake_case.

use std::path::Path;

use serde::Serialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::error::Result;
use crate::types::{Language, Quality, RawStreamRecord, StreamRecord};

#[derive(Debug, Serialize)]
struct FileRecord<'a> {
    anime_id: &'a str,
    episode_number: u32,
    stream_url: &'a str,
    quality: Quality,
    language: Language,
}

impl<'a> From<&'a StreamRecord> for FileRecord<'a> {
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

/// Loads raw records from a stream file
///
/// Absent quality, language and server id are filled with their defaults;
/// everything else is left for the validator. Mistyped fields and
/// non-object elements load as empty fields so every bad record is
/// reported by index.
///
/// # Errors
/// - `Io` if the file cannot be read
/// - `Json` if it is not a JSON array
pub fn load_streams(path: &Path) -> Result<Vec<RawStreamRecord>> {
    let content = std::fs::read_to_string(path)?;
    let elements: Vec<Value> = serde_json::from_str(&content)?;

    let raws = elements
        .into_iter()
        .enumerate()
        .map(|(index, element)| {
            serde_json::from_value::<RawStreamRecord>(element)
                .unwrap_or_else(|e| {
                    warn!(index, error = %e, "stream file element is not a record");
                    RawStreamRecord::default()
                })
                .with_defaults()
        })
        .collect();
    Ok(raws)
}

/// Writes records to a stream file, pretty-printed
pub fn save_streams(path: &Path, records: &[StreamRecord]) -> Result<()> {
    let file_records: Vec<FileRecord<'_>> = records.iter().map(FileRecord::from).collect();
    let json = serde_json::to_string_pretty(&file_records)?;
    std::fs::write(path, json)?;
    info!(path = %path.display(), count = records.len(), "streams saved");
    Ok(())
}

/// Records written by [`write_sample_file`]
pub fn sample_records() -> Vec<StreamRecord> {
    let record = |anime_id: &str, episode_number, stream_id: u32, quality, language| StreamRecord {
        anime_id: anime_id.to_string(),
        episode_number,
        stream_url: format!("http://yaichi-anime.ddns.net:8080/stream/{}?f02a7c", stream_id),
        quality,
        language,
        server_id: crate::types::DEFAULT_SERVER_ID.to_string(),
    };

    vec![
        record("one-piece", 1, 11588, Quality::P1080, Language::Sub),
        record("one-piece", 2, 11589, Quality::P1080, Language::Sub),
        record("naruto", 1, 12001, Quality::P720, Language::Dub),
    ]
}

/// Writes an example stream file
pub fn write_sample_file(path: &Path) -> Result<()> {
    save_streams(path, &sample_records())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::validate_batch;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("stream-manager-{}-{}.json", name, std::process::id()))
    }

    #[test]
    fn test_sample_file_round_trips_through_validator() {
        let path = temp_path("sample");
        write_sample_file(&path).unwrap();

        let raws = load_streams(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        let records = validate_batch(&raws).unwrap();
        assert_eq!(records, sample_records());
    }

    #[test]
    fn test_saved_file_uses_snake_case() {
        let path = temp_path("snake");
        save_streams(&path, &sample_records()[..1]).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert!(content.contains("\"anime_id\": \"one-piece\""));
        assert!(content.contains("\"stream_url\""));
        assert!(!content.contains("server_id"));
    }

    #[test]
    fn test_load_camel_case_with_defaults() {
        let path = temp_path("camel");
        std::fs::write(
            &path,
            r#"[{"animeId": "bleach", "episodeNumber": 5, "streamUrl": "http://x/5?t"}]"#,
        )
        .unwrap();

        let raws = load_streams(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(raws.len(), 1);
        assert_eq!(raws[0].anime_id.as_deref(), Some("bleach"));
        assert_eq!(raws[0].quality.as_deref(), Some("1080p"));
        assert_eq!(raws[0].language.as_deref(), Some("sub"));
    }

    #[test]
    fn test_load_reports_every_bad_record() {
        let path = temp_path("mistyped");
        std::fs::write(
            &path,
            r#"[
                {"anime_id": "one-piece", "episode_number": 1, "stream_url": "http://x/1?t"},
                {"anime_id": "one-piece", "episode_number": "2", "stream_url": "http://x/2?t"},
                {"anime_id": "", "episode_number": 3, "stream_url": "http://x/3?t"},
                {"anime_id": "one-piece", "episode_number": 1.5, "stream_url": "http://x/4?t", "quality": 720},
                "not a record"
            ]"#,
        )
        .unwrap();

        let result = load_streams(&path).and_then(|raws| validate_batch(&raws));
        let _ = std::fs::remove_file(&path);

        let err = result.unwrap_err();
        let violations = err.violations();
        assert_eq!(violations.len(), 4);
        assert_eq!(violations[0].index, Some(1));
        assert_eq!(violations[0].fields, vec!["episodeNumber"]);
        assert_eq!(violations[1].index, Some(2));
        assert_eq!(violations[1].fields, vec!["animeId"]);
        assert_eq!(violations[2].index, Some(3));
        assert_eq!(violations[2].fields, vec!["episodeNumber", "quality"]);
        assert_eq!(violations[3].index, Some(4));
        assert_eq!(violations[3].fields, vec!["animeId", "episodeNumber", "streamUrl"]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_streams(Path::new("/nonexistent/streams.json"));
        assert!(matches!(result, Err(crate::error::StreamManagerError::Io(_))));
    }

    #[test]
    fn test_load_not_an_array() {
        let path = temp_path("object");
        std::fs::write(&path, r#"{"anime_id": "x"}"#).unwrap();

        let result = load_streams(&path);
        let _ = std::fs::remove_file(&path);

        assert!(matches!(result, Err(crate::error::StreamManagerError::Json(_))));
    }
}
