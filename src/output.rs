//! JSON response types and formatting for CLI output.

use serde::Serialize;

use crate::reminder_types::ReminderRecord;
use crate::transition::TriggerOutcome;

/// Response for a successful save.
#[derive(Serialize)]
pub struct AddResponse {
    pub status: String,
    pub id: String,
}

/// Response for listing reminders.
#[derive(Serialize)]
pub struct ListResponse {
    pub reminders: Vec<ReminderRecord>,
}

/// Response for deletions (single or all).
#[derive(Serialize)]
pub struct DeleteResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
}

/// Per-trigger result of a `trigger` command.
#[derive(Serialize)]
pub struct TriggerResultItem {
    pub request_id: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reminder: Option<ReminderRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl From<TriggerOutcome> for TriggerResultItem {
    fn from(outcome: TriggerOutcome) -> Self {
        match outcome {
            TriggerOutcome::Notified(reminder) => TriggerResultItem {
                request_id: reminder.id.clone(),
                status: "notified".to_string(),
                reminder: Some(reminder),
                reason: None,
            },
            TriggerOutcome::Dropped { request_id, reason } => TriggerResultItem {
                request_id,
                status: "dropped".to_string(),
                reminder: None,
                reason: Some(reason),
            },
            TriggerOutcome::Failed { request_id, reason } => TriggerResultItem {
                request_id,
                status: "failed".to_string(),
                reminder: None,
                reason: Some(reason),
            },
        }
    }
}

/// Response for the `trigger` command.
#[derive(Serialize)]
pub struct TriggerResponse {
    pub results: Vec<TriggerResultItem>,
}

/// Summary printed when `watch` reaches end of input.
#[derive(Serialize)]
pub struct WatchSummary {
    pub status: String,
    pub events: usize,
    pub malformed: usize,
    pub notified: usize,
    pub dropped: usize,
    pub failed: usize,
}

/// Response for errors.
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Print a value as formatted JSON to stdout.
pub fn print_json<T: Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            eprintln!("Failed to serialize JSON: {}", e);
            std::process::exit(1);
        }
    }
}

/// Print a reminder in the human-readable layout.
pub fn print_reminder(reminder: &ReminderRecord) {
    println!("ID: {}", reminder.id);
    println!("Title: {}", reminder.title);
    if let Some(description) = &reminder.description {
        println!("Description: {}", description);
    }
    if let Some(location) = &reminder.location {
        println!("Location: {}", location);
    }
    if let (Some(lat), Some(lon)) = (reminder.latitude, reminder.longitude) {
        println!("Coordinates: {:.6}, {:.6}", lat, lon);
    }
}
