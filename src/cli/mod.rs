//! Command-line interface for the board.
//!
//! Commands are grouped by what they act on: tasks, comments and the
//! backlog. Results are printed to stdout as JSON; errors go to stderr.

mod backlog;
mod comment;
mod run;
mod task;


pub use backlog::BacklogCommand;
pub use comment::CommentCommand;
pub use run::{run, run_in, CliOutput};
pub use task::TaskCommand;

use clap::{Parser, Subcommand};

/// Kanban board CLI - tasks, comments and backlog imports.
///
/// The board lives in the project data directory of the current working
/// directory unless `.kanban/config.yaml` names another database.
#[derive(Parser, Debug)]
#[command(name = "kanban")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Task management - create, update, move and delete tasks.
    #[command(subcommand)]
    Task(TaskCommand),

    /// Comments on tasks.
    #[command(subcommand)]
    Comment(CommentCommand),

    /// Query the external backlog and import tickets as tasks.
    #[command(subcommand)]
    Backlog(BacklogCommand),
}
