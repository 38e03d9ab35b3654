//! Interactive action flows
//!
//! Ties the search session, series generator and submission orchestrator
//! together behind an [`Operator`] that answers prompts. Empty answers to
//! required prompts abandon the flow without submitting anything.

use tracing::debug;

use crate::config::StreamServerConfig;
use crate::display::{format_entry_info, format_search_listing};
use crate::error::{RecordViolation, Result, StreamManagerError};
use crate::generator::{generate_series, parse_series_number};
use crate::ports::{SearchPort, StreamsPort};
use crate::session::{CatalogSearchSession, SearchOutcome, Selection};
use crate::submission::{BulkSubmitted, SubmissionOrchestrator, Submitted};
use crate::types::{Language, Quality, RawStreamRecord, SearchResultEntry, SeriesSpec};
use crate::url::build_stream_url;

/// Answers accepted as "yes" by confirmation prompts
const AFFIRMATIVE: [&str; 5] = ["s", "si", "sí", "y", "yes"];

/// Source of operator input and sink for progress messages
pub trait Operator {
    /// Ask a question. `None` means input is closed.
    fn ask(&mut self, prompt: &str) -> Option<String>;

    /// Show a message
    fn notify(&mut self, message: &str);
}

/// How an action flow ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    /// The operator left a required answer empty or declined to confirm
    Abandoned,
    /// The operator cancelled the selection
    Cancelled,
    /// The search found nothing
    NoResults,
    Submitted(Submitted),
    BulkSubmitted(BulkSubmitted),
    /// Formatted entry details, nothing was changed
    Info(String),
}

/// What to do with a selected anime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectedAction {
    AddSingleEpisode,
    GenerateFullSeries,
    ShowInfoOnly,
}

impl SelectedAction {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(SelectedAction::AddSingleEpisode),
            "2" => Some(SelectedAction::GenerateFullSeries),
            "3" => Some(SelectedAction::ShowInfoOnly),
            _ => None,
        }
    }
}

/// Result of the search and selection step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pick {
    Chosen(SearchResultEntry),
    Ended(ActionOutcome),
}

/// Runs the search, select and act flows
pub struct ActionCoordinator<'a, S, P> {
    search: &'a S,
    orchestrator: SubmissionOrchestrator<&'a P>,
    server: &'a StreamServerConfig,
    confirm_single: bool,
}

impl<'a, S: SearchPort, P: StreamsPort> ActionCoordinator<'a, S, P> {
    pub fn new(search: &'a S, streams: &'a P, server: &'a StreamServerConfig) -> Self {
        Self {
            search,
            orchestrator: SubmissionOrchestrator::new(streams),
            server,
            confirm_single: false,
        }
    }

    /// Ask for confirmation before submitting a single episode
    pub fn with_single_confirmation(mut self, confirm_single: bool) -> Self {
        self.confirm_single = confirm_single;
        self
    }

    /// Search the catalog, let the operator pick an anime, then act on it
    ///
    /// # Errors
    /// Transport, rejection, validation and series errors from the search
    /// or the chosen action. Invalid selections are retried, not returned.
    pub async fn run<O: Operator + ?Sized>(&self, operator: &mut O) -> Result<ActionOutcome> {
        let Some(query) = operator.ask("Anime name to search") else {
            return Ok(ActionOutcome::Abandoned);
        };

        match self.pick(operator, &query).await? {
            Pick::Chosen(entry) => self.act_on(operator, &entry).await,
            Pick::Ended(outcome) => Ok(outcome),
        }
    }

    /// Search for `query` and let the operator pick one entry
    ///
    /// Invalid selections are reported and asked again until the operator
    /// picks an entry, cancels with `0`, or input closes.
    ///
    /// # Errors
    /// Transport and rejection errors from the search
    pub async fn pick<O: Operator + ?Sized>(&self, operator: &mut O, query: &str) -> Result<Pick> {
        let mut session = CatalogSearchSession::new(self.search);

        operator.notify("Searching...");
        let total_found = match session.search(query, 1).await {
            Ok(SearchOutcome::Listed { total_found, .. }) => total_found,
            Ok(SearchOutcome::NoResults) => {
                operator.notify("No anime found with that name");
                return Ok(Pick::Ended(ActionOutcome::NoResults));
            }
            Err(StreamManagerError::EmptyQuery) => {
                operator.notify("Anime name is required");
                return Ok(Pick::Ended(ActionOutcome::Abandoned));
            }
            Err(e) => return Err(e),
        };

        operator.notify(&format_search_listing(session.entries(), total_found));

        let prompt = format!(
            "Select an anime (1-{}) or 0 to cancel",
            session.entries().len()
        );
        loop {
            let Some(input) = operator.ask(&prompt) else {
                return Ok(Pick::Ended(ActionOutcome::Cancelled));
            };

            match session.select(&input) {
                Ok(Selection::Selected(entry)) => {
                    operator.notify(&format!("Selected: {}\n   ID: {}", entry.title, entry.id));
                    return Ok(Pick::Chosen(entry));
                }
                Ok(Selection::Cancelled) => {
                    operator.notify("Search cancelled");
                    return Ok(Pick::Ended(ActionOutcome::Cancelled));
                }
                Err(StreamManagerError::InvalidSelection(reason)) => {
                    operator.notify(&format!("Invalid selection: {}", reason));
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Ask what to do with the selected entry and do it
    pub async fn act_on<O: Operator + ?Sized>(
        &self,
        operator: &mut O,
        entry: &SearchResultEntry,
    ) -> Result<ActionOutcome> {
        operator.notify(
            "What do you want to do?\n\
             1. Add stream for one episode\n\
             2. Generate full series\n\
             3. Show information only",
        );

        let Some(answer) = operator.ask("Select action (1-3)") else {
            return Ok(ActionOutcome::Abandoned);
        };

        match SelectedAction::parse(&answer) {
            Some(SelectedAction::AddSingleEpisode) => {
                self.add_single_episode(operator, &entry.id, &entry.title).await
            }
            Some(SelectedAction::GenerateFullSeries) => {
                self.generate_full_series(operator, &entry.id, &entry.title, entry.episode_count)
                    .await
            }
            Some(SelectedAction::ShowInfoOnly) => Ok(ActionOutcome::Info(format_entry_info(entry))),
            None => {
                operator.notify("Invalid option");
                Ok(ActionOutcome::Abandoned)
            }
        }
    }

    /// Collect one episode's stream and submit it
    ///
    /// # Errors
    /// - `InvalidRecord` if the episode number is not an integer
    /// - `InvalidSpec` if a Yaichi stream id is not an integer
    /// - Submission errors
    pub async fn add_single_episode<O: Operator + ?Sized>(
        &self,
        operator: &mut O,
        anime_id: &str,
        title: &str,
    ) -> Result<ActionOutcome> {
        operator.notify(&format!("Add stream for: {}", title));

        let Some(episode) = required(operator, "Episode number") else {
            return Ok(ActionOutcome::Abandoned);
        };
        let episode_number = episode
            .parse::<i64>()
            .map_err(|_| invalid_field("episodeNumber"))?;

        let Some(stream_url) = self.collect_stream_url(operator)? else {
            return Ok(ActionOutcome::Abandoned);
        };

        let quality = ask_quality(operator);
        let language = ask_language(operator);

        let raw = RawStreamRecord {
            anime_id: Some(anime_id.to_string()),
            episode_number: Some(episode_number),
            stream_url: Some(stream_url),
            quality: Some(quality.to_string()),
            language: Some(language.to_string()),
            server_id: None,
        }
        .with_defaults();

        if self.confirm_single {
            operator.notify(&format!(
                "Confirm data:\n   Anime: {}\n   Episode: {}\n   URL: {}\n   Quality: {}\n   Language: {}",
                anime_id,
                episode_number,
                raw.stream_url.as_deref().unwrap_or_default(),
                quality,
                language
            ));
            if !confirm(operator, "Confirm? (y/N)") {
                operator.notify("Operation cancelled");
                return Ok(ActionOutcome::Abandoned);
            }
        }

        operator.notify("Sending...");
        let submitted = self.orchestrator.submit(raw).await?;
        Ok(ActionOutcome::Submitted(submitted))
    }

    /// Collect series parameters, generate the records and submit them in bulk
    ///
    /// `known_episodes` is offered as the default episode count.
    ///
    /// # Errors
    /// - `InvalidSpec` for non-integer or negative numbers
    /// - Submission errors
    pub async fn generate_full_series<O: Operator + ?Sized>(
        &self,
        operator: &mut O,
        anime_id: &str,
        title: &str,
        known_episodes: Option<u32>,
    ) -> Result<ActionOutcome> {
        operator.notify(&format!("Generate full series for: {}", title));

        let total_prompt = match known_episodes {
            Some(count) => format!("Total number of episodes (Enter for {})", count),
            None => "Total number of episodes".to_string(),
        };
        let total_episodes = match (required(operator, &total_prompt), known_episodes) {
            (Some(raw), _) => parse_series_number("totalEpisodes", &raw)?,
            (None, Some(count)) => i64::from(count),
            (None, None) => return Ok(ActionOutcome::Abandoned),
        };

        let Some(start) = required(operator, "Starting Yaichi stream id") else {
            return Ok(ActionOutcome::Abandoned);
        };
        let starting_stream_id = parse_series_number("startingStreamId", &start)?;

        let token = self.ask_token(operator);
        let quality = ask_quality(operator);
        let language = ask_language(operator);

        let spec = SeriesSpec {
            anime_id: anime_id.to_string(),
            total_episodes,
            starting_stream_id,
            token,
            quality,
            language,
            url_template: self.server.base_url.clone(),
        };
        let records = generate_series(&spec)?;

        if records.is_empty() {
            operator.notify("No episodes to generate");
            return Ok(ActionOutcome::Abandoned);
        }

        operator.notify(&format!(
            "{} streams will be generated for '{}'\n   Anime ID: {}\n   Episodes: 1-{}\n   Yaichi IDs: {}-{}",
            records.len(),
            title,
            anime_id,
            total_episodes,
            starting_stream_id,
            starting_stream_id + total_episodes - 1
        ));

        if !confirm(operator, "Continue? (y/N)") {
            operator.notify("Operation cancelled");
            return Ok(ActionOutcome::Abandoned);
        }

        operator.notify("Sending streams...");
        let submitted = self.orchestrator.submit_bulk(records).await?;
        Ok(ActionOutcome::BulkSubmitted(submitted))
    }

    /// Ask for a stream URL, either Yaichi-style or complete
    ///
    /// `Ok(None)` means a required answer was left empty.
    fn collect_stream_url<O: Operator + ?Sized>(&self, operator: &mut O) -> Result<Option<String>> {
        operator.notify(
            "Stream URL options:\n\
             1. Yaichi format (stream id only)\n\
             2. Full custom URL",
        );
        let choice = operator.ask("Select option (1-2)").unwrap_or_default();

        if choice.trim() == "1" {
            let Some(raw_id) = required(operator, "Yaichi stream id") else {
                return Ok(None);
            };
            let stream_id = parse_series_number("streamId", &raw_id)?;
            let token = self.ask_token(operator);
            let url = build_stream_url(&self.server.base_url, stream_id, &token);
            debug!(%url, "built Yaichi stream url");
            Ok(Some(url))
        } else {
            Ok(required(operator, "Full stream URL"))
        }
    }

    fn ask_token<O: Operator + ?Sized>(&self, operator: &mut O) -> String {
        let prompt = format!("Token (Enter for '{}')", self.server.default_token);
        required(operator, &prompt).unwrap_or_else(|| self.server.default_token.clone())
    }
}

/// Ask and return the trimmed answer, `None` if empty or input is closed
pub fn required<O: Operator + ?Sized>(operator: &mut O, prompt: &str) -> Option<String> {
    operator
        .ask(prompt)
        .map(|answer| answer.trim().to_string())
        .filter(|answer| !answer.is_empty())
}

/// Ask a yes/no question; anything but an affirmative answer is "no"
pub fn confirm<O: Operator + ?Sized>(operator: &mut O, prompt: &str) -> bool {
    operator
        .ask(prompt)
        .map(|answer| AFFIRMATIVE.contains(&answer.trim().to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Ask for a quality, falling back to the default on empty or unknown input
pub fn ask_quality<O: Operator + ?Sized>(operator: &mut O) -> Quality {
    let Some(answer) = required(operator, "Quality [480p/720p/1080p/1440p/4K] (Enter for 1080p)")
    else {
        return Quality::default();
    };
    answer.parse().unwrap_or_else(|reason| {
        operator.notify(&format!("{}, using {}", reason, Quality::default()));
        Quality::default()
    })
}

/// Ask for a language, falling back to the default on empty or unknown input
pub fn ask_language<O: Operator + ?Sized>(operator: &mut O) -> Language {
    let Some(answer) = required(operator, "Language [sub/dub/raw] (Enter for sub)") else {
        return Language::default();
    };
    answer.parse().unwrap_or_else(|reason| {
        operator.notify(&format!("{}, using {}", reason, Language::default()));
        Language::default()
    })
}

fn invalid_field(field: &'static str) -> StreamManagerError {
    StreamManagerError::InvalidRecord {
        violations: vec![RecordViolation {
            index: None,
            fields: vec![field],
        }],
    }
}
