use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::error;

use georemind::commands::{self, Commands};
use georemind::output::{print_json, ErrorResponse};
use georemind::{Config, Error, ReminderRepository, SqliteReminderStore};

/// georemind - location-triggered reminders
#[derive(Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(&cli).await {
        Ok(code) => code,
        Err(e) => {
            error!(error = %e, "Command failed");
            if cli.json {
                print_json(&ErrorResponse {
                    error: e.to_string(),
                });
            } else {
                eprintln!("Error: {}", e);
            }
            ExitCode::from(1)
        }
    }
}

async fn run(cli: &Cli) -> Result<ExitCode, Error> {
    let config = Config::load()?;
    georemind::logging::init_logging(&config.log_level, cli.verbose)?;

    if let Commands::Version = cli.command {
        return Ok(commands::print_version(cli.json));
    }

    config.ensure_directories()?;
    let store = SqliteReminderStore::open(&config.database_path)?;
    let repository = ReminderRepository::new(Arc::new(store));
    commands::execute(&cli.command, repository, &config, cli.json).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["georemind", "--verbose", "list"]);
        assert!(cli.verbose);
        assert!(!cli.json);
        assert!(matches!(cli.command, Commands::List));
    }

    #[test]
    fn test_json_flag_after_subcommand() {
        let cli = Cli::parse_from(["georemind", "get", "42", "--json"]);
        assert!(cli.json);
        assert!(matches!(cli.command, Commands::Get { ref id } if id == "42"));
    }

    #[test]
    fn test_add_with_negative_coordinates() {
        let cli = Cli::parse_from([
            "georemind",
            "add",
            "Opera House",
            "--location",
            "Sydney",
            "--lat",
            "-33.8568",
            "--lon",
            "151.2153",
        ]);

        match cli.command {
            Commands::Add {
                title,
                location,
                lat,
                lon,
                id,
                ..
            } => {
                assert_eq!(title, "Opera House");
                assert_eq!(location.as_deref(), Some("Sydney"));
                assert_eq!(lat, Some(-33.8568));
                assert_eq!(lon, Some(151.2153));
                assert!(id.is_none());
            }
            _ => panic!("Expected add command"),
        }
    }

    #[test]
    fn test_lat_requires_lon() {
        let result = Cli::try_parse_from(["georemind", "add", "Gym", "--lat", "10.0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_trigger_requires_ids() {
        assert!(Cli::try_parse_from(["georemind", "trigger"]).is_err());

        let cli = Cli::parse_from(["georemind", "trigger", "42", "99"]).command;
        assert!(matches!(cli, Commands::Trigger { ref ids } if ids == &["42", "99"]));
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["georemind"]).is_err());
    }
}
