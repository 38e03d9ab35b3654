//! URL helper functions
//!
//! Builds playable stream URLs and the admin API endpoint URLs.

const STREAMS_PATH: &str = "/api/admin/streams";
const SEARCH_PATH: &str = "/api/admin/search";

/// Builds a playable stream URL from a base template, stream id and token
///
/// # Arguments
/// * `template` - Base path of the stream server (e.g., "http://example/stream")
/// * `stream_id` - Numeric stream id on that server
/// * `token` - Access token appended as the query string
///
/// # Returns
/// URL in the form `{template}/{stream_id}?{token}`
///
/// # Example
/// ```
/// use stream_manager_core::url::build_stream_url;
/// let url = build_stream_url("http://example/stream", 11588, "f02a7c");
/// assert_eq!(url, "http://example/stream/11588?f02a7c");
/// ```
pub fn build_stream_url(template: &str, stream_id: i64, token: &str) -> String {
    format!("{}/{}?{}", template.trim_end_matches('/'), stream_id, token)
}

/// Builds the admin streams endpoint for an application base URL
///
/// # Example
/// ```
/// use stream_manager_core::url::build_streams_endpoint;
/// let url = build_streams_endpoint("http://localhost:3000/");
/// assert_eq!(url, "http://localhost:3000/api/admin/streams");
/// ```
pub fn build_streams_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), STREAMS_PATH)
}

/// Builds the admin search endpoint for an application base URL
pub fn build_search_endpoint(base_url: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), SEARCH_PATH)
}

/// Builds the catalog search URL for a query and page
///
/// URL encodes the query.
///
/// # Example
/// ```
/// use stream_manager_core::url::build_search_url;
/// let url = build_search_url("http://localhost:3000/api/admin/search", "one piece", 2);
/// assert_eq!(url, "http://localhost:3000/api/admin/search?q=one%20piece&page=2");
/// ```
pub fn build_search_url(search_endpoint: &str, query: &str, page: u32) -> String {
    format!(
        "{}?q={}&page={}",
        search_endpoint,
        urlencoding::encode(query),
        page
    )
}

/// Builds the statistics URL of the streams endpoint
pub fn build_stats_url(streams_endpoint: &str) -> String {
    format!("{}?action=stats", streams_endpoint)
}

/// Builds the removal URL for a stream id
pub fn build_remove_url(streams_endpoint: &str, stream_id: &str) -> String {
    format!(
        "{}?streamId={}",
        streams_endpoint,
        urlencoding::encode(stream_id)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_build_stream_url() {
        let url = build_stream_url("http://yaichi-anime.ddns.net:8080/stream", 11588, "f02a7c");
        assert_eq!(url, "http://yaichi-anime.ddns.net:8080/stream/11588?f02a7c");
    }

    #[test]
    fn test_build_stream_url_trailing_slash() {
        let url = build_stream_url("http://example/stream/", 7, "tok");
        assert_eq!(url, "http://example/stream/7?tok");
    }

    #[test]
    fn test_build_streams_endpoint() {
        assert_eq!(
            build_streams_endpoint("http://localhost:3000"),
            "http://localhost:3000/api/admin/streams"
        );
    }

    #[test]
    fn test_build_search_endpoint() {
        assert_eq!(
            build_search_endpoint("https://kitsune.example/"),
            "https://kitsune.example/api/admin/search"
        );
    }

    #[test]
    fn test_build_search_url_encodes_query() {
        let url = build_search_url("http://h/api/admin/search", "shingeki no kyojin&s2", 1);
        assert_eq!(
            url,
            "http://h/api/admin/search?q=shingeki%20no%20kyojin%26s2&page=1"
        );
    }

    #[test]
    fn test_build_stats_url() {
        assert_eq!(
            build_stats_url("http://h/api/admin/streams"),
            "http://h/api/admin/streams?action=stats"
        );
    }

    #[test]
    fn test_build_remove_url() {
        assert_eq!(
            build_remove_url("http://h/api/admin/streams", "stream_17"),
            "http://h/api/admin/streams?streamId=stream_17"
        );
    }

    proptest! {
        #[test]
        fn prop_stream_url_injective_in_id(a in any::<i64>(), b in any::<i64>()) {
            prop_assume!(a != b);
            let template = "http://example/stream";
            prop_assert_ne!(
                build_stream_url(template, a, "f02a7c"),
                build_stream_url(template, b, "f02a7c")
            );
        }
    }
}
