//! Catalog search session
//!
//! Tracks one search-to-selection interaction:
//!
//! ```text
//! Idle --search--> Listed --select(1..=n)--> Selected
//!   |                 |----select(0)-------> Cancelled
//!   |                 `----select(bad)-----> Listed (retry)
//!   |--search--> NoResults
//!   `--search--> Failed
//! ```
//!
//! At most [`MAX_SELECTABLE`] entries are kept, whatever the API returns.

use tracing::debug;

use crate::error::{Result, StreamManagerError};
use crate::ports::SearchPort;
use crate::types::SearchResultEntry;

/// Number of entries an operator can pick from
pub const MAX_SELECTABLE: usize = 10;

/// Input that cancels a selection
pub const CANCEL_INPUT: &str = "0";

/// Where a search session stands
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Listed {
        query: String,
        entries: Vec<SearchResultEntry>,
        /// Number of entries the API returned before truncation
        total_found: usize,
    },
    NoResults {
        query: String,
    },
    Selected {
        query: String,
        entry: SearchResultEntry,
    },
    Cancelled,
    Failed {
        query: String,
        reason: String,
    },
}

/// Outcome of [`CatalogSearchSession::search`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Entries are listed and selectable
    Listed { selectable: usize, total_found: usize },
    /// The search succeeded but found nothing
    NoResults,
}

/// Outcome of [`CatalogSearchSession::select`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Selected(SearchResultEntry),
    Cancelled,
}

/// Stateful search-then-select workflow over a [`SearchPort`]
pub struct CatalogSearchSession<S> {
    port: S,
    state: SessionState,
}

impl<S: SearchPort> CatalogSearchSession<S> {
    pub fn new(port: S) -> Self {
        Self {
            port,
            state: SessionState::Idle,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Selectable entries, empty unless the session is listed
    pub fn entries(&self) -> &[SearchResultEntry] {
        match &self.state {
            SessionState::Listed { entries, .. } => entries,
            _ => &[],
        }
    }

    /// Run a catalog search
    ///
    /// # Errors
    /// - `EmptyQuery` if the query is blank; the session stays idle
    /// - `Transport` or `Rejected` from the port; the session is failed
    pub async fn search(&mut self, query: &str, page: u32) -> Result<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            return Err(StreamManagerError::EmptyQuery);
        }

        let mut entries = match self.port.search_anime(query, page).await {
            Ok(entries) => entries,
            Err(e) => {
                self.state = SessionState::Failed {
                    query: query.to_string(),
                    reason: e.to_string(),
                };
                return Err(e);
            }
        };

        if entries.is_empty() {
            debug!(%query, "search returned no results");
            self.state = SessionState::NoResults {
                query: query.to_string(),
            };
            return Ok(SearchOutcome::NoResults);
        }

        let total_found = entries.len();
        entries.truncate(MAX_SELECTABLE);
        let selectable = entries.len();
        debug!(%query, total_found, selectable, "search listed");

        self.state = SessionState::Listed {
            query: query.to_string(),
            entries,
            total_found,
        };

        Ok(SearchOutcome::Listed {
            selectable,
            total_found,
        })
    }

    /// Apply an operator's selection input
    ///
    /// `"0"` cancels; `1..=n` selects the n-th listed entry.
    ///
    /// # Errors
    /// - `InvalidSelection` for anything else, or when nothing is listed.
    ///   The session stays as it was so the operator can retry.
    pub fn select(&mut self, input: &str) -> Result<Selection> {
        let SessionState::Listed { query, entries, .. } = &self.state else {
            return Err(StreamManagerError::InvalidSelection(
                "no search results to select from".to_string(),
            ));
        };

        let input = input.trim();
        if input == CANCEL_INPUT {
            self.state = SessionState::Cancelled;
            return Ok(Selection::Cancelled);
        }

        let count = entries.len();
        let index = input
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=count).contains(n))
            .ok_or_else(|| {
                StreamManagerError::InvalidSelection(format!(
                    "enter a number between 1 and {} or {} to cancel",
                    count, CANCEL_INPUT
                ))
            })?;

        let query = query.clone();
        let entry = entries[index - 1].clone();
        debug!(id = %entry.id, "entry selected");
        self.state = SessionState::Selected {
            query,
            entry: entry.clone(),
        };
        Ok(Selection::Selected(entry))
    }
}
