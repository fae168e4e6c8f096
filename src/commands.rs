//! Command handlers for the georemind CLI.

use std::io::Write;
use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio::runtime::Handle;
use tokio::task::JoinSet;
use tracing::{info, warn};

use crate::config::Config;
use crate::errors::Error;
use crate::notify::{JsonLinesSink, NotificationSink, TracingSink};
use crate::output::*;
use crate::reminder_types::ReminderRecord;
use crate::repository::ReminderRepository;
use crate::transition::{
    EventDisposition, TransitionEvent, TransitionHandler, TriggerOutcome,
};

/// Commands supported by the georemind CLI.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Save a new reminder (or replace one with --id)
    Add {
        /// Reminder title
        title: String,

        #[arg(short = 'd', long)]
        description: Option<String>,

        /// Label of the selected place
        #[arg(short = 'l', long)]
        location: Option<String>,

        #[arg(long, requires = "lon", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lon: Option<f64>,

        /// Reuse an existing id instead of generating one
        #[arg(long)]
        id: Option<String>,
    },
    Get {
        /// Reminder ID
        id: String,
    },
    List,
    Delete {
        /// Reminder ID
        id: String,
    },
    /// Delete every reminder
    Clear,
    /// Deliver one "enter" transition for the given reminder ids
    Trigger {
        #[arg(required = true)]
        ids: Vec<String>,
    },
    /// Read transition events as JSON lines from stdin
    Watch,
    Version,
}

/// Execute a CLI command.
pub async fn execute(
    command: &Commands,
    repository: ReminderRepository,
    config: &Config,
    json: bool,
) -> Result<ExitCode, Error> {
    match command {
        Commands::Add {
            title,
            description,
            location,
            lat,
            lon,
            id,
        } => {
            let mut record = match id {
                Some(id) => ReminderRecord::with_id(id.as_str(), title.as_str()),
                None => ReminderRecord::new(title.as_str()),
            };
            record.description = description.clone();
            record.location = location.clone();
            record.latitude = *lat;
            record.longitude = *lon;
            handle_add(&repository, record, json).await
        }
        Commands::Get { id } => handle_get(&repository, id, json).await,
        Commands::List => handle_list(&repository, json).await,
        Commands::Delete { id } => handle_delete(&repository, id, json).await,
        Commands::Clear => handle_clear(&repository, json).await,
        Commands::Trigger { ids } => {
            let handler = TransitionHandler::new(
                repository,
                Arc::new(TracingSink),
                Handle::current(),
                config.max_concurrent_lookups,
            );
            handle_trigger(&handler, ids, json).await
        }
        Commands::Watch => {
            let sink: Arc<dyn NotificationSink> = if json {
                Arc::new(JsonLinesSink::new(std::io::stdout()))
            } else {
                Arc::new(TracingSink)
            };
            let handler = TransitionHandler::new(
                repository,
                sink,
                Handle::current(),
                config.max_concurrent_lookups,
            );
            let stdin = BufReader::new(tokio::io::stdin());
            let summary = watch_events(&handler, stdin).await?;
            report_watch(&mut std::io::stdout(), &summary, json)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Version => Ok(print_version(json)),
    }
}

async fn handle_add(
    repository: &ReminderRepository,
    record: ReminderRecord,
    json: bool,
) -> Result<ExitCode, Error> {
    record.validate()?;
    let id = record.id.clone();
    repository.save(record).await?;
    info!(id = %id, "Reminder saved");

    if json {
        print_json(&AddResponse {
            status: "added".to_string(),
            id,
        });
    } else {
        println!("Added reminder: {}", id);
    }
    Ok(ExitCode::SUCCESS)
}

async fn handle_get(
    repository: &ReminderRepository,
    id: &str,
    json: bool,
) -> Result<ExitCode, Error> {
    let reminder = repository.get_by_id(id).await.into_result()?;
    if json {
        print_json(&reminder);
    } else {
        print_reminder(&reminder);
    }
    Ok(ExitCode::SUCCESS)
}

async fn handle_list(repository: &ReminderRepository, json: bool) -> Result<ExitCode, Error> {
    let reminders = repository.get_all().await.into_result()?;
    if json {
        print_json(&ListResponse { reminders });
    } else if reminders.is_empty() {
        println!("No reminders");
    } else {
        for reminder in reminders {
            match reminder.location.as_deref() {
                Some(location) => println!("{}: {} @ {}", reminder.id, reminder.title, location),
                None => println!("{}: {}", reminder.id, reminder.title),
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

async fn handle_delete(
    repository: &ReminderRepository,
    id: &str,
    json: bool,
) -> Result<ExitCode, Error> {
    repository.delete(id).await?;
    if json {
        print_json(&DeleteResponse {
            status: "deleted".to_string(),
            id: Some(id.to_string()),
        });
    } else {
        println!("Deleted reminder: {}", id);
    }
    Ok(ExitCode::SUCCESS)
}

async fn handle_clear(repository: &ReminderRepository, json: bool) -> Result<ExitCode, Error> {
    repository.delete_all().await?;
    if json {
        print_json(&DeleteResponse {
            status: "cleared".to_string(),
            id: None,
        });
    } else {
        println!("Deleted all reminders");
    }
    Ok(ExitCode::SUCCESS)
}

async fn handle_trigger(
    handler: &TransitionHandler,
    ids: &[String],
    json: bool,
) -> Result<ExitCode, Error> {
    let outcomes = handler
        .on_event(TransitionEvent::entered(ids.iter().cloned()))
        .join()
        .await;

    if json {
        print_json(&TriggerResponse {
            results: outcomes.into_iter().map(TriggerResultItem::from).collect(),
        });
    } else {
        for outcome in outcomes {
            match outcome {
                TriggerOutcome::Notified(reminder) => {
                    println!("Reminder triggered: {} ({})", reminder.title, reminder.id)
                }
                TriggerOutcome::Dropped { request_id, reason }
                | TriggerOutcome::Failed { request_id, reason } => {
                    println!("Skipped {}: {}", request_id, reason)
                }
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

/// Counters collected while watching an event stream.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WatchStats {
    pub events: usize,
    pub malformed: usize,
    pub notified: usize,
    pub dropped: usize,
    pub failed: usize,
}

impl WatchStats {
    fn record(&mut self, outcomes: &[TriggerOutcome]) {
        for outcome in outcomes {
            match outcome {
                TriggerOutcome::Notified(_) => self.notified += 1,
                TriggerOutcome::Dropped { .. } => self.dropped += 1,
                TriggerOutcome::Failed { .. } => self.failed += 1,
            }
        }
    }
}

/// Feed every JSON line of `input` to the handler until end of input.
///
/// Lines that do not parse count as malformed events. Returns once every
/// dispatched trigger has finished.
pub async fn watch_events<R>(handler: &TransitionHandler, input: R) -> Result<WatchStats, Error>
where
    R: AsyncBufRead + Unpin,
{
    let mut stats = WatchStats::default();
    let mut in_flight: JoinSet<Vec<TriggerOutcome>> = JoinSet::new();
    let mut lines = input.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        stats.events += 1;

        let event = match serde_json::from_str::<TransitionEvent>(line) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "Skipping unparseable transition event");
                stats.malformed += 1;
                continue;
            }
        };

        let dispatch = handler.on_event(event);
        if matches!(dispatch.disposition(), EventDisposition::Malformed { .. }) {
            stats.malformed += 1;
        }
        in_flight.spawn(dispatch.join());

        while let Some(done) = in_flight.try_join_next() {
            collect(&mut stats, done);
        }
    }

    while let Some(done) = in_flight.join_next().await {
        collect(&mut stats, done);
    }

    info!(
        events = stats.events,
        notified = stats.notified,
        dropped = stats.dropped,
        "Event stream closed"
    );
    Ok(stats)
}

fn collect(stats: &mut WatchStats, done: Result<Vec<TriggerOutcome>, tokio::task::JoinError>) {
    match done {
        Ok(outcomes) => stats.record(&outcomes),
        Err(e) => warn!(error = %e, "Dispatch task failed"),
    }
}

/// Write the end-of-stream summary.
///
/// In JSON mode the summary shares stdout with the notification lines, so it
/// is written as a single line too.
fn report_watch<W: Write>(out: &mut W, stats: &WatchStats, json: bool) -> Result<(), Error> {
    if json {
        let line = serde_json::to_string(&WatchSummary {
            status: "closed".to_string(),
            events: stats.events,
            malformed: stats.malformed,
            notified: stats.notified,
            dropped: stats.dropped,
            failed: stats.failed,
        })?;
        writeln!(out, "{line}")?;
    } else {
        writeln!(
            out,
            "Processed {} events: {} notified, {} dropped, {} failed, {} malformed",
            stats.events, stats.notified, stats.dropped, stats.failed, stats.malformed
        )?;
    }
    out.flush()?;
    Ok(())
}

/// Print the crate name and version.
pub fn print_version(json: bool) -> ExitCode {
    if json {
        print_json(&serde_json::json!({
            "version": env!("CARGO_PKG_VERSION"),
            "name": env!("CARGO_PKG_NAME")
        }));
    } else {
        println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    }
    ExitCode::SUCCESS
}
