//! Command line arguments

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use stream_manager_core::{DEFAULT_BASE_URL, Language, Quality};

const EXAMPLES: &str = "\
Examples:
  stream-manager add --anime one-piece --episode 1 --url \"http://yaichi-anime.ddns.net:8080/stream/11588?f02a7c\"
  stream-manager bulk-add --file streams.json
  stream-manager generate --anime one-piece --episodes 50 --start-id 11588 --upload
  stream-manager stats
  stream-manager sample-file
  stream-manager menu";

#[derive(Debug, Parser)]
#[command(
    name = "stream-manager",
    version,
    about = "Stream manager for the Kitsune catalog",
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Base URL of the Kitsune application
    #[arg(
        long,
        global = true,
        env = "STREAM_MANAGER_BASE_URL",
        default_value = DEFAULT_BASE_URL
    )]
    pub base_url: String,

    /// Stream server settings file
    #[arg(long, global = true, default_value = "config.json")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Add a single stream
    Add {
        /// Anime id
        #[arg(long)]
        anime: String,

        #[command(flatten)]
        stream: StreamArgs,
    },

    /// Add streams from a JSON file in one bulk request
    BulkAdd {
        /// Path to the JSON file
        #[arg(long)]
        file: PathBuf,
    },

    /// Generate streams for a complete series
    Generate(GenerateArgs),

    /// Search the catalog by name
    Search {
        /// Anime name to search for
        #[arg(long)]
        query: String,

        /// Result page
        #[arg(long, default_value_t = 1)]
        page: u32,
    },

    /// Search for an anime, pick it, then add a stream for it
    AddInteractive {
        /// Anime name to search for
        #[arg(long)]
        search: String,

        #[command(flatten)]
        stream: StreamArgs,
    },

    /// Show stream statistics
    Stats,

    /// Remove a stream
    Remove {
        /// Stream id to remove
        #[arg(long)]
        id: String,
    },

    /// Write a sample streams file
    SampleFile {
        /// Output file name
        #[arg(long, default_value = "streams_sample.json")]
        output: PathBuf,
    },

    /// Interactive text menu
    Menu,
}

/// One episode's stream
#[derive(Debug, Args)]
pub struct StreamArgs {
    /// Episode number
    #[arg(long, allow_negative_numbers = true)]
    pub episode: i64,

    /// Stream URL
    #[arg(long)]
    pub url: String,

    /// Quality: 480p, 720p, 1080p, 1440p or 4K
    #[arg(long, default_value = "1080p", value_parser = parse_quality)]
    pub quality: Quality,

    /// Language: sub, dub or raw
    #[arg(long, default_value = "sub", value_parser = parse_language)]
    pub language: Language,
}

#[derive(Debug, Args)]
pub struct GenerateArgs {
    /// Anime id
    #[arg(long)]
    pub anime: String,

    /// Total number of episodes
    #[arg(long, allow_negative_numbers = true)]
    pub episodes: i64,

    /// Stream id of episode 1
    #[arg(long, allow_negative_numbers = true)]
    pub start_id: i64,

    /// Access token, defaults to the configured one
    #[arg(long)]
    pub token: Option<String>,

    #[arg(long, default_value = "1080p", value_parser = parse_quality)]
    pub quality: Quality,

    #[arg(long, default_value = "sub", value_parser = parse_language)]
    pub language: Language,

    /// Save the generated streams to this JSON file
    #[arg(long)]
    pub save_file: Option<PathBuf>,

    /// Submit the generated streams in bulk
    #[arg(long)]
    pub upload: bool,
}

fn parse_quality(value: &str) -> Result<Quality, String> {
    value.parse()
}

fn parse_language(value: &str) -> Result<Language, String> {
    value.parse()
}
