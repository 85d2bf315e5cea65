//! Taskboard CLI - kanban board for a REST task service.
//!
//! Commands:
//! - `taskboard board`: show the three columns
//! - `taskboard show <id>`: task detail
//! - `taskboard new --title ...`: register a task
//! - `taskboard edit <id> ...`: edit task fields
//! - `taskboard move <card> <target>`: drag a card onto a column or card
//! - `taskboard delete <card>`: delete a card
//! - `taskboard session`: interactive gesture loop on stdin
//!
//! Exit codes:
//! - 0: Success
//! - 1: Error, or the board reported a notice

use std::io;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use taskboard::{BoardConfig, HttpTaskApi};
use taskboard_cli::{commands, session, Cli, CliError, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing with appropriate level
    let filter = if cli.debug {
        EnvFilter::new("taskboard=debug,taskboard_cli=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(false)
        .with_writer(std::io::stderr)
        .init();

    let exit_code = result_to_exit(dispatch_command(cli).await);
    std::process::exit(exit_code);
}

/// Resolve configuration, build the client and run the subcommand.
async fn dispatch_command(cli: Cli) -> Result<(), CliError> {
    let config = BoardConfig::resolve(cli.config.as_deref(), cli.api_url.as_deref())?;
    tracing::debug!("using task service at {}", config.api_url);
    let api = HttpTaskApi::new(&config.api_url)?;
    let titles = config.columns;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Board { json } => commands::run_board(&api, &titles, json, &mut out).await,
        Commands::Show { id, json } => commands::run_show(&api, &id, json, &mut out).await,
        Commands::New { status, fields } => commands::run_new(&api, status, fields, &mut out).await,
        Commands::Edit { id, fields } => commands::run_edit(&api, &id, fields, &mut out).await,
        Commands::Move { card, target } => {
            commands::run_move(&api, &titles, &card, &target, &mut out).await
        }
        Commands::Delete { card, version } => {
            commands::run_delete(&api, &titles, &card, version, &mut out).await
        }
        Commands::Session => {
            let mut input = io::stdin().lock();
            session::run_session(&api, titles, &mut input, &mut out).await
        }
    }
}

/// Convert a `Result<(), E: Display>` to an exit code.
fn result_to_exit<E: std::fmt::Display>(result: Result<(), E>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use taskboard_cli::ColumnArg;

    #[test]
    fn test_cli_parsing_board() {
        let cli = Cli::parse_from(["taskboard", "board"]);
        assert!(!cli.debug);
        assert!(matches!(cli.command, Commands::Board { json: false }));
    }

    #[test]
    fn test_cli_parsing_global_flags() {
        let cli = Cli::parse_from([
            "taskboard",
            "show",
            "12",
            "--json",
            "--debug",
            "--api-url",
            "http://tasks:9000",
        ]);
        assert!(cli.debug);
        assert_eq!(cli.api_url.as_deref(), Some("http://tasks:9000"));
        match cli.command {
            Commands::Show { id, json } => {
                assert_eq!(id, "12");
                assert!(json);
            }
            _ => panic!("Expected Show command"),
        }
    }

    #[test]
    fn test_cli_parsing_new() {
        let cli = Cli::parse_from([
            "taskboard", "new", "--status", "doing", "--title", "Plan", "--due", "2025-08-01",
        ]);
        match cli.command {
            Commands::New { status, fields } => {
                assert_eq!(status, ColumnArg::Doing);
                assert_eq!(fields.title.as_deref(), Some("Plan"));
                assert_eq!(fields.due.as_deref(), Some("2025-08-01"));
                assert!(fields.start.is_none());
            }
            _ => panic!("Expected New command"),
        }
    }

    #[test]
    fn test_cli_parsing_new_default_status() {
        let cli = Cli::parse_from(["taskboard", "new", "--title", "x"]);
        assert!(matches!(
            cli.command,
            Commands::New {
                status: ColumnArg::Todo,
                ..
            }
        ));
    }

    #[test]
    fn test_cli_parsing_move() {
        let cli = Cli::parse_from(["taskboard", "move", "4", "done"]);
        match cli.command {
            Commands::Move { card, target } => {
                assert_eq!(card, "4");
                assert_eq!(target, "done");
            }
            _ => panic!("Expected Move command"),
        }
    }

    #[test]
    fn test_cli_parsing_delete_version() {
        let cli = Cli::parse_from(["taskboard", "delete", "4", "--version", "7"]);
        assert!(matches!(
            cli.command,
            Commands::Delete {
                version: Some(7),
                ..
            }
        ));
    }

    #[test]
    fn test_cli_rejects_unknown_status() {
        assert!(Cli::try_parse_from(["taskboard", "new", "--status", "later", "--title", "x"]).is_err());
    }

    #[test]
    fn test_result_to_exit_ok() {
        let result: Result<(), String> = Ok(());
        assert_eq!(result_to_exit(result), 0);
    }

    #[test]
    fn test_result_to_exit_err() {
        let result: Result<(), String> = Err("something failed".to_string());
        assert_eq!(result_to_exit(result), 1);
    }
}
