//! Command-line front end for the task board.
//!
//! The binary (`taskboard`) parses arguments with [`Cli`], resolves the
//! configuration, and runs one of the [`commands`] or an interactive
//! [`session`] against the HTTP backend.

pub mod cli;
pub mod commands;
pub mod error;
pub mod render;
pub mod session;

pub use cli::{Cli, ColumnArg, Commands, TaskFieldArgs};
pub use error::CliError;
