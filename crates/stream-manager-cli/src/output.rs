//! Operator-facing messages for finished flows

use stream_manager_core::{ActionOutcome, BulkSubmitted, Submitted};

pub fn submitted(submitted: &Submitted) -> String {
    format!(
        "Stream added: {} - episode {}\n   Generated ID: {}",
        submitted.anime_id, submitted.episode_number, submitted.generated_id
    )
}

pub fn bulk_submitted(outcome: &BulkSubmitted) -> String {
    format!("{} streams added", outcome.count)
}

pub fn outcome(outcome: &ActionOutcome) -> String {
    match outcome {
        ActionOutcome::Abandoned => "Nothing was submitted".to_string(),
        ActionOutcome::Cancelled => "Search cancelled".to_string(),
        ActionOutcome::NoResults => "No results found".to_string(),
        ActionOutcome::Submitted(s) => submitted(s),
        ActionOutcome::BulkSubmitted(b) => bulk_submitted(b),
        ActionOutcome::Info(info) => info.clone(),
    }
}
