//! Task CLI subcommands.

use chrono::NaiveDate;
use clap::Subcommand;

/// Task management commands.
///
/// ## Quick Start
///
/// ```bash
/// # Create a task
/// kanban task create --title "Fix login bug"
///
/// # Start working on it
/// kanban task status 1 InProgress --stage Review
///
/// # Finish it
/// kanban task status 1 Done
/// ```
#[derive(Subcommand, Debug, Clone)]
pub enum TaskCommand {
    /// List all tasks, top-level tasks first.
    List,

    /// Get a task by ID.
    Get {
        /// Task ID
        id: i64,
    },

    /// Create a new task in the Pending column.
    Create {
        /// Title for the task (required)
        #[arg(short, long)]
        title: String,

        /// Description with more details
        #[arg(short, long)]
        description: Option<String>,

        /// Assigned user
        #[arg(short, long)]
        assignee: Option<String>,

        /// Project key
        #[arg(short, long)]
        project: Option<String>,

        /// ID of the parent task
        #[arg(long)]
        parent: Option<i64>,

        /// Short display name
        #[arg(long)]
        alias: Option<String>,

        /// Free-form tags
        #[arg(long)]
        tags: Option<String>,

        /// Free-form keywords
        #[arg(long)]
        keywords: Option<String>,

        /// Planned start (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// Planned finish (YYYY-MM-DD)
        #[arg(long)]
        due_date: Option<NaiveDate>,

        /// Key of the ticket this task tracks, e.g. VPC-101
        #[arg(long)]
        jira_ticket_key: Option<String>,

        /// Link to the ticket
        #[arg(long)]
        jira_url: Option<String>,
    },

    /// Update a task's fields.
    ///
    /// Only specified fields are updated; others remain unchanged.
    Update {
        /// Task ID
        id: i64,

        /// New title
        #[arg(short, long)]
        title: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,

        /// New status (does not touch the stage; see `task status`)
        #[arg(short, long)]
        status: Option<String>,

        /// New stage
        #[arg(long)]
        stage: Option<String>,

        /// New assignee
        #[arg(short, long)]
        assignee: Option<String>,

        /// New alias
        #[arg(long)]
        alias: Option<String>,

        /// New tags
        #[arg(long)]
        tags: Option<String>,

        /// New keywords
        #[arg(long)]
        keywords: Option<String>,

        /// New planned start (YYYY-MM-DD)
        #[arg(long)]
        start_date: Option<NaiveDate>,

        /// New planned finish (YYYY-MM-DD)
        #[arg(long)]
        due_date: Option<NaiveDate>,
    },

    /// Delete a task and its comments.
    Delete {
        /// Task ID
        id: i64,
    },

    /// Move a task to another column.
    ///
    /// The stage is kept only for columns other than Pending and Done.
    Status {
        /// Task ID
        id: i64,

        /// New status, e.g. Pending, InProgress, Done
        status: String,

        /// Stage within the status
        #[arg(long)]
        stage: Option<String>,
    },
}
