//! Interactive text menu

use std::path::Path;

use stream_manager_core::coordinator::{confirm, required};
use stream_manager_core::display::format_stats;
use stream_manager_core::streams_file::{load_streams, write_sample_file};
use stream_manager_core::{
    ActionCoordinator, ClientConfig, Operator, Result, StreamManagerClient, StreamServerConfig,
    StreamsPort, SubmissionOrchestrator,
};
use tracing::info;

use crate::output;

/// File written by the sample file option
const MENU_SAMPLE_FILE: &str = "streams_example.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuChoice {
    AddSingle,
    BulkFromFile,
    GenerateSeries,
    SearchAndAct,
    Stats,
    Remove,
    SampleFile,
    ConfigureServer,
    Exit,
}

impl MenuChoice {
    fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(Self::AddSingle),
            "2" => Some(Self::BulkFromFile),
            "3" => Some(Self::GenerateSeries),
            "4" => Some(Self::SearchAndAct),
            "5" => Some(Self::Stats),
            "6" => Some(Self::Remove),
            "7" => Some(Self::SampleFile),
            "8" => Some(Self::ConfigureServer),
            "0" => Some(Self::Exit),
            _ => None,
        }
    }
}

fn menu_text(config: &ClientConfig) -> String {
    format!(
        "\nKitsune stream manager ({})\n\
         1. Add single stream\n\
         2. Bulk add from file\n\
         3. Generate full series\n\
         4. Search anime and act\n\
         5. Stream statistics\n\
         6. Remove stream\n\
         7. Create sample file\n\
         8. Configure server URL\n\
         0. Exit",
        config.base_url
    )
}

/// Run the menu until the operator exits or input closes
///
/// Failures of a single option are shown and the menu continues.
///
/// # Errors
/// Only if a reconfigured HTTP client cannot be built
pub async fn run<O: Operator>(
    operator: &mut O,
    mut client: StreamManagerClient,
    server: &StreamServerConfig,
) -> Result<()> {
    loop {
        operator.notify(&menu_text(client.config()));
        let Some(answer) = operator.ask("Select an option (0-8)") else {
            return Ok(());
        };

        let result = match MenuChoice::parse(&answer) {
            Some(MenuChoice::Exit) => {
                operator.notify("Goodbye");
                return Ok(());
            }
            Some(MenuChoice::ConfigureServer) => {
                let prompt = format!("New base URL (Enter to keep {})", client.config().base_url);
                match required(operator, &prompt) {
                    Some(base_url) => {
                        client = StreamManagerClient::with_config(
                            client.config().with_base_url(&base_url),
                        )?;
                        info!(base_url = %client.config().base_url, "server reconfigured");
                        Ok(format!("Server set to {}", client.config().base_url))
                    }
                    None => Ok("Server unchanged".to_string()),
                }
            }
            Some(choice) => run_choice(operator, choice, &client, server).await,
            None => {
                operator.notify("Invalid option");
                continue;
            }
        };

        match result {
            Ok(message) => operator.notify(&message),
            Err(e) => operator.notify(&format!("Error: {}", e)),
        }

        if operator.ask("Press Enter to continue").is_none() {
            return Ok(());
        }
    }
}

async fn run_choice<O: Operator>(
    operator: &mut O,
    choice: MenuChoice,
    client: &StreamManagerClient,
    server: &StreamServerConfig,
) -> Result<String> {
    let coordinator = ActionCoordinator::new(client, client, server);

    match choice {
        MenuChoice::AddSingle => {
            let Some(anime_id) = required(operator, "Anime ID (e.g. one-piece)") else {
                return Ok("Anime ID is required".to_string());
            };
            let outcome = coordinator
                .with_single_confirmation(true)
                .add_single_episode(operator, &anime_id, &anime_id)
                .await?;
            Ok(output::outcome(&outcome))
        }
        MenuChoice::BulkFromFile => {
            let Some(file) = required(operator, "JSON file path") else {
                return Ok("File path is required".to_string());
            };
            let records = load_streams(Path::new(&file))?;
            if records.is_empty() {
                return Ok(format!("No streams found in {}", file));
            }
            operator.notify(&format!("{} streams loaded from {}", records.len(), file));
            let outcome = SubmissionOrchestrator::new(client).submit_bulk(records).await?;
            Ok(output::bulk_submitted(&outcome))
        }
        MenuChoice::GenerateSeries => {
            let Some(anime_id) = required(operator, "Anime ID") else {
                return Ok("Anime ID is required".to_string());
            };
            let outcome = coordinator
                .generate_full_series(operator, &anime_id, &anime_id, None)
                .await?;
            Ok(output::outcome(&outcome))
        }
        MenuChoice::SearchAndAct => {
            let outcome = coordinator.run(operator).await?;
            Ok(output::outcome(&outcome))
        }
        MenuChoice::Stats => Ok(format_stats(&client.stream_stats().await?)),
        MenuChoice::Remove => {
            let Some(stream_id) = required(operator, "Stream ID to remove") else {
                return Ok("Stream ID is required".to_string());
            };
            if !confirm(operator, &format!("Remove stream {}? (y/N)", stream_id)) {
                return Ok("Operation cancelled".to_string());
            }
            client.remove_stream(&stream_id).await?;
            Ok(format!("Stream {} removed", stream_id))
        }
        MenuChoice::SampleFile => {
            write_sample_file(Path::new(MENU_SAMPLE_FILE))?;
            Ok(format!("Sample file created: {}", MENU_SAMPLE_FILE))
        }
        MenuChoice::ConfigureServer | MenuChoice::Exit => Ok(String::new()),
    }
}
