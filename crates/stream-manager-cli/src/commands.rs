//! Subcommand handlers
//!
//! Each handler prints operator-facing results to stdout and returns the
//! first error, which `main` turns into a failing exit status.

use std::path::Path;

use clap::CommandFactory;
use stream_manager_core::display::{format_search_listing, format_stats};
use stream_manager_core::streams_file::{load_streams, save_streams, write_sample_file};
use stream_manager_core::{
    ActionCoordinator, ClientConfig, ManagerConfig, Pick, RawStreamRecord, Result, SearchPort,
    SeriesSpec, StreamManagerClient, StreamServerConfig, StreamsPort, SubmissionOrchestrator,
    generate_series,
};
use tracing::debug;

use crate::cli::{Cli, Command, GenerateArgs, StreamArgs};
use crate::console::ConsoleOperator;
use crate::{menu, output};

pub async fn run(cli: Cli) -> Result<()> {
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    let manager = ManagerConfig::load(&cli.config)?;
    let config = ClientConfig::for_base_url(&cli.base_url);
    debug!(base_url = %config.base_url, ?command, "running command");

    let client = StreamManagerClient::with_config(config)?;
    match command {
        Command::Add { anime, stream } => add(&client, anime, stream).await,
        Command::BulkAdd { file } => bulk_add(&client, &file).await,
        Command::Generate(args) => generate(&client, &manager.yaichi_server, args).await,
        Command::Search { query, page } => search(&client, &query, page).await,
        Command::AddInteractive { search, stream } => {
            add_interactive(&client, &manager.yaichi_server, &search, stream).await
        }
        Command::Stats => stats(&client).await,
        Command::Remove { id } => remove(&client, &id).await,
        Command::SampleFile { output } => sample_file(&output),
        Command::Menu => {
            menu::run(&mut ConsoleOperator::stdio(), client, &manager.yaichi_server).await
        }
    }
}

fn stream_record(anime_id: String, stream: StreamArgs) -> RawStreamRecord {
    RawStreamRecord {
        anime_id: Some(anime_id),
        episode_number: Some(stream.episode),
        stream_url: Some(stream.url),
        quality: Some(stream.quality.to_string()),
        language: Some(stream.language.to_string()),
        server_id: None,
    }
    .with_defaults()
}

async fn add(client: &StreamManagerClient, anime_id: String, stream: StreamArgs) -> Result<()> {
    let submitted = SubmissionOrchestrator::new(client)
        .submit(stream_record(anime_id, stream))
        .await?;
    println!("{}", output::submitted(&submitted));
    Ok(())
}

async fn bulk_add(client: &StreamManagerClient, file: &Path) -> Result<()> {
    let records = load_streams(file)?;
    if records.is_empty() {
        println!("No streams found in {}", file.display());
        return Ok(());
    }

    println!("{} streams loaded from {}", records.len(), file.display());
    let outcome = SubmissionOrchestrator::new(client).submit_bulk(records).await?;
    println!("{}", output::bulk_submitted(&outcome));
    Ok(())
}

async fn generate(
    client: &StreamManagerClient,
    server: &StreamServerConfig,
    args: GenerateArgs,
) -> Result<()> {
    let spec = SeriesSpec {
        anime_id: args.anime,
        total_episodes: args.episodes,
        starting_stream_id: args.start_id,
        token: args.token.unwrap_or_else(|| server.default_token.clone()),
        quality: args.quality,
        language: args.language,
        url_template: server.base_url.clone(),
    };
    let records = generate_series(&spec)?;
    println!("{} streams generated for '{}'", records.len(), spec.anime_id);

    if let Some(path) = &args.save_file {
        save_streams(path, &records)?;
        println!("Saved to {}", path.display());
    }

    if args.upload {
        if records.is_empty() {
            println!("No streams to upload");
            return Ok(());
        }
        println!("Uploading streams...");
        let outcome = SubmissionOrchestrator::new(client).submit_bulk(records).await?;
        println!("{}", output::bulk_submitted(&outcome));
    }
    Ok(())
}

async fn search(client: &StreamManagerClient, query: &str, page: u32) -> Result<()> {
    let entries = client.search_anime(query, page).await?;
    if entries.is_empty() {
        println!("No results found");
        return Ok(());
    }

    println!("Results for '{}' (page {}):", query, page);
    print!("{}", format_search_listing(&entries, entries.len()));
    Ok(())
}

async fn add_interactive(
    client: &StreamManagerClient,
    server: &StreamServerConfig,
    query: &str,
    stream: StreamArgs,
) -> Result<()> {
    let coordinator = ActionCoordinator::new(client, client, server);
    let mut console = ConsoleOperator::stdio();

    match coordinator.pick(&mut console, query).await? {
        Pick::Chosen(entry) => add(client, entry.id, stream).await,
        Pick::Ended(outcome) => {
            debug!(?outcome, "nothing selected");
            Ok(())
        }
    }
}

async fn stats(client: &StreamManagerClient) -> Result<()> {
    let stats = client.stream_stats().await?;
    print!("{}", format_stats(&stats));
    Ok(())
}

async fn remove(client: &StreamManagerClient, stream_id: &str) -> Result<()> {
    client.remove_stream(stream_id).await?;
    println!("Stream {} removed", stream_id);
    Ok(())
}

fn sample_file(path: &Path) -> Result<()> {
    write_sample_file(path)?;
    println!("Sample file created: {}", path.display());
    Ok(())
}
