//! Response parsers for the admin API
//!
//! Contains modules for parsing the different endpoint responses.

pub mod search;
pub mod stream;

pub use search::{SearchResponseShape, parse_search_response};
pub use stream::{UNKNOWN_STREAM_ID, parse_added_stream_id, parse_stats};
