//! Backlog CLI subcommands.

use clap::Subcommand;

/// Backlog commands.
#[derive(Subcommand, Debug, Clone)]
pub enum BacklogCommand {
    /// Show the ticket hierarchy for a project.
    Query {
        /// Project key (defaults to the configured project)
        #[arg(short, long)]
        project: Option<String>,

        /// User to assign stories and sub-tasks to
        #[arg(short, long)]
        user: Option<String>,

        /// Raw query string
        #[arg(short, long)]
        query: Option<String>,
    },

    /// Import tickets onto the board.
    ///
    /// Tickets already on the board are skipped, so repeating an import
    /// creates nothing new.
    Import {
        /// Ticket keys to import
        #[arg(required = true)]
        keys: Vec<String>,

        /// Also import each ticket's sub-tasks
        #[arg(short = 's', long)]
        with_subtasks: bool,
    },
}
