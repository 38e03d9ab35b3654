//! Text rendering of catalog entries and statistics

use crate::types::{SearchResultEntry, StreamStats};

/// Longest description shown before truncation, in characters
pub const DESCRIPTION_LIMIT: usize = 200;

/// Truncate to [`DESCRIPTION_LIMIT`] characters, marking the cut with `...`
pub fn truncate_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_LIMIT {
        let mut short: String = description.chars().take(DESCRIPTION_LIMIT).collect();
        short.push_str("...");
        short
    } else {
        description.to_string()
    }
}

/// Detailed view of one catalog entry
///
/// Absent fields are left out.
pub fn format_entry_info(entry: &SearchResultEntry) -> String {
    let mut out = format!("Title: {}\nID: {}\n", entry.title, entry.id);
    if let Some(year) = &entry.year {
        out.push_str(&format!("Year: {}\n", year));
    }
    if let Some(status) = &entry.status {
        out.push_str(&format!("Status: {}\n", status));
    }
    if let Some(count) = entry.episode_count {
        out.push_str(&format!("Episodes: {}\n", count));
    }
    if let Some(rating) = &entry.rating {
        out.push_str(&format!("Rating: {}\n", rating));
    }
    if !entry.genres.is_empty() {
        out.push_str(&format!("Genres: {}\n", entry.genres.join(", ")));
    }
    if let Some(description) = &entry.description {
        out.push_str(&format!("Description: {}\n", truncate_description(description)));
    }
    out
}

/// Numbered listing of search results
///
/// `total_found` is how many the API returned; `entries` may be fewer.
pub fn format_search_listing(entries: &[SearchResultEntry], total_found: usize) -> String {
    let mut out = format!("Results found ({}):\n{}\n", total_found, "-".repeat(50));

    for (n, entry) in entries.iter().enumerate() {
        out.push_str(&format!("{:2}. {}\n    ID: {}\n", n + 1, entry.title, entry.id));
        if let Some(year) = &entry.year {
            out.push_str(&format!("    Year: {}\n", year));
        }
        if let Some(status) = &entry.status {
            out.push_str(&format!("    Status: {}\n", status));
        }
        if let Some(count) = entry.episode_count {
            out.push_str(&format!("    Episodes: {}\n", count));
        }
        out.push('\n');
    }
    out
}

/// Statistics summary
pub fn format_stats(stats: &StreamStats) -> String {
    let mut out = format!(
        "Stream statistics:\n  Total streams: {}\n  Active streams: {}\n",
        stats.total_streams, stats.active_streams
    );

    if !stats.streams_by_server.is_empty() {
        out.push_str("  Streams by server:\n");
        for (server, count) in &stats.streams_by_server {
            out.push_str(&format!("    - {}: {}\n", server, count));
        }
    }
    out
}
