//! Catalog search response parser
//!
//! The search endpoint wraps its results either as a bare list or as an
//! object with an `animes` list, and entries use differing field names
//! depending on the upstream catalog. Both are resolved here, once.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, StreamManagerError};
use crate::types::SearchResultEntry;

const UNTITLED: &str = "Untitled";

/// Top level of a search response
#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    #[serde(default)]
    results: Option<SearchResponseShape>,
}

/// The two shapes the `results` field arrives in
///
/// Anything else (a string, a number) carries no entries.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SearchResponseShape {
    BareList(Vec<Value>),
    Wrapped(WrappedResults),
    Unrecognized(Value),
}

#[derive(Debug, Deserialize)]
pub struct WrappedResults {
    #[serde(default)]
    pub animes: Option<Vec<Value>>,
}

impl SearchResponseShape {
    /// Resolve either shape into the raw entry list
    pub fn into_entries(self) -> Vec<Value> {
        match self {
            SearchResponseShape::BareList(entries) => entries,
            SearchResponseShape::Wrapped(wrapped) => wrapped.animes.unwrap_or_default(),
            SearchResponseShape::Unrecognized(other) => {
                debug!(results = %other, "search results in unrecognized shape");
                Vec::new()
            }
        }
    }
}

/// Parses a search response body into catalog entries
///
/// # Arguments
/// * `body` - Raw JSON text returned by the search endpoint
///
/// # Returns
/// Entries in response order, empty if the response carries none
///
/// # Errors
/// Returns `Json` if the body is not JSON
pub fn parse_search_response(body: &str) -> Result<Vec<SearchResultEntry>> {
    let envelope: SearchEnvelope = serde_json::from_str(body).map_err(StreamManagerError::Json)?;

    let raw_entries = envelope
        .results
        .map(SearchResponseShape::into_entries)
        .unwrap_or_default();

    Ok(raw_entries.iter().filter_map(parse_entry).collect())
}

/// Normalizes one raw entry
///
/// Returns `None` for entries without a usable `id`.
fn parse_entry(raw: &Value) -> Option<SearchResultEntry> {
    let Some(id) = text_field(raw, &["id"]) else {
        debug!("skipping search entry without id");
        return None;
    };

    Some(SearchResultEntry {
        id,
        title: text_field(raw, &["name", "title"]).unwrap_or_else(|| UNTITLED.to_string()),
        year: text_field(raw, &["releaseDate", "year"]),
        status: text_field(raw, &["status"]),
        episode_count: count_field(raw, &["totalEpisodes", "episodes"]),
        rating: text_field(raw, &["rating"]),
        genres: genres(raw),
        description: text_field(raw, &["description", "synopsis"]),
    })
}

/// First non-empty string or number among `keys`, in priority order
fn text_field(raw: &Value, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match raw.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// First count among `keys`, accepting numbers and numeric strings
fn count_field(raw: &Value, keys: &[&str]) -> Option<u32> {
    keys.iter().find_map(|key| match raw.get(key)? {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

fn genres(raw: &Value) -> Vec<String> {
    raw.get("genres")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bare_list() {
        let body = r#"{
            "success": true,
            "query": "one piece",
            "results": [
                {"id": "one-piece-100", "name": "One Piece", "releaseDate": "1999", "totalEpisodes": 1100},
                {"id": "one-piece-film-red", "title": "One Piece Film: Red"}
            ]
        }"#;

        let entries = parse_search_response(body).unwrap();
        assert_eq!(entries.len(), 2);

        assert_eq!(entries[0].id, "one-piece-100");
        assert_eq!(entries[0].title, "One Piece");
        assert_eq!(entries[0].year.as_deref(), Some("1999"));
        assert_eq!(entries[0].episode_count, Some(1100));

        assert_eq!(entries[1].title, "One Piece Film: Red");
        assert_eq!(entries[1].year, None);
    }

    #[test]
    fn test_parse_wrapped_list() {
        let body = r#"{
            "results": {
                "currentPage": 1,
                "animes": [
                    {"id": "naruto-677", "name": "Naruto", "episodes": "220", "status": "Finished"}
                ]
            }
        }"#;

        let entries = parse_search_response(body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "naruto-677");
        assert_eq!(entries[0].episode_count, Some(220));
        assert_eq!(entries[0].status.as_deref(), Some("Finished"));
    }

    #[test]
    fn test_parse_wrapped_empty() {
        let entries = parse_search_response(r#"{"results": {"animes": []}}"#).unwrap();
        assert!(entries.is_empty());
    }

    #[test]
    fn test_parse_missing_results() {
        assert!(parse_search_response(r#"{"success": true}"#).unwrap().is_empty());
        assert!(parse_search_response(r#"{"results": {}}"#).unwrap().is_empty());
        assert!(parse_search_response(r#"{"results": null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_parse_scalar_results() {
        assert!(parse_search_response(r#"{"results": "nothing"}"#).unwrap().is_empty());
        assert!(parse_search_response(r#"{"results": 0}"#).unwrap().is_empty());
        assert!(parse_search_response(r#"{"results": {"animes": "none"}}"#).unwrap().is_empty());
    }

    #[test]
    fn test_field_priority() {
        let body = r#"{"results": [{
            "id": 42,
            "name": "Preferred",
            "title": "Fallback",
            "releaseDate": "Oct 1999",
            "year": 1999,
            "description": "",
            "synopsis": "A pirate story.",
            "rating": 8.7,
            "genres": ["Action", "Adventure", 3]
        }]}"#;

        let entry = &parse_search_response(body).unwrap()[0];
        assert_eq!(entry.id, "42");
        assert_eq!(entry.title, "Preferred");
        assert_eq!(entry.year.as_deref(), Some("Oct 1999"));
        assert_eq!(entry.description.as_deref(), Some("A pirate story."));
        assert_eq!(entry.rating.as_deref(), Some("8.7"));
        assert_eq!(entry.genres, vec!["Action", "Adventure"]);
    }

    #[test]
    fn test_untitled_fallback_and_missing_id() {
        let body = r#"{"results": [{"name": "No id here"}, {"id": "x"}]}"#;
        let entries = parse_search_response(body).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Untitled");
    }

    #[test]
    fn test_parse_invalid_json() {
        assert!(matches!(
            parse_search_response("<html>"),
            Err(StreamManagerError::Json(_))
        ));
    }
}
