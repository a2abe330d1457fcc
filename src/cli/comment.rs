//! Comment CLI subcommands.

use clap::Subcommand;

/// Comment commands.
#[derive(Subcommand, Debug, Clone)]
pub enum CommentCommand {
    /// List the comments on a task, oldest first.
    List {
        /// Task ID
        task_id: i64,
    },

    /// Add a comment to a task.
    Add {
        /// Task ID
        task_id: i64,

        /// Comment body
        #[arg(short, long)]
        content: Option<String>,

        /// Author (defaults to "anonymous")
        #[arg(short, long)]
        author: Option<String>,

        /// Attachment payload, e.g. a JSON list of links
        #[arg(long)]
        attachments: Option<String>,
    },
}
