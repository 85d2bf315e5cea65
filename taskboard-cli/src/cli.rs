//! CLI definition for the `taskboard` command.
//!
//! Only depends on `clap` and `std`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Board column, as accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColumnArg {
    /// To-Do (status TODO)
    Todo,
    /// In-Progress (status IN_PROGRESS)
    Doing,
    /// Done (status DONE)
    Done,
}

impl std::fmt::Display for ColumnArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnArg::Todo => write!(f, "todo"),
            ColumnArg::Doing => write!(f, "doing"),
            ColumnArg::Done => write!(f, "done"),
        }
    }
}

/// Taskboard - kanban board for a REST task service
#[derive(Parser, Debug)]
#[command(name = "taskboard")]
#[command(version)]
#[command(about = "Kanban board for a REST task service")]
pub struct Cli {
    /// Enable debug output to stderr
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Base URL of the task service (overrides config and TASKBOARD_API_URL)
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Field flags shared by `new` and `edit`
#[derive(clap::Args, Debug, Clone, Default, PartialEq)]
pub struct TaskFieldArgs {
    /// Task title
    #[arg(long)]
    pub title: Option<String>,
    /// Start date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub start: Option<String>,
    /// Due date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub due: Option<String>,
    /// Completion condition
    #[arg(long)]
    pub condition: Option<String>,
    /// Free-text memo
    #[arg(long)]
    pub memo: Option<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the three columns
    Board {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show one task
    Show {
        /// Task id
        id: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Register a new task
    New {
        /// Column to register the task in
        #[arg(long, value_enum, default_value_t = ColumnArg::Todo)]
        status: ColumnArg,
        #[command(flatten)]
        fields: TaskFieldArgs,
    },
    /// Edit the fields of a task
    Edit {
        /// Task id
        id: String,
        #[command(flatten)]
        fields: TaskFieldArgs,
    },
    /// Drag a card onto a column or another card
    Move {
        /// Card to move
        card: String,
        /// Column id (todo, doing, done) or card id to drop on
        target: String,
    },
    /// Delete a card
    Delete {
        /// Card to delete
        card: String,
        /// Version to send for conflict detection (defaults to the card's)
        #[arg(long)]
        version: Option<u64>,
    },
    /// Interactive session reading gestures from stdin
    Session,
}
