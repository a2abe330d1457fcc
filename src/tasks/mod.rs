//! Task board.
//!
//! This module provides:
//! - Tasks with free-form status columns and an optional stage
//! - A two-level parent/child tree for stories and their sub-tasks
//! - Append-only comments on tasks
//! - Importing backlog tickets, deduplicated by ticket key
//!
//! # Example
//!
//! ```no_run
//! use kanban_board::jira::SyntheticTicketSource;
//! use kanban_board::tasks::{import_tickets, ImportRequest, NewTask, SqliteTaskStore, Status, TaskStore};
//!
//! let store = SqliteTaskStore::new("/tmp/board.sqlite3").unwrap();
//!
//! // Create a task by hand
//! let task = store.create_task(NewTask::titled("Fix login bug")).unwrap();
//! store.set_task_status(task.id, &Status::InProgress, Some("Review")).unwrap();
//!
//! // Pull a story and its sub-tasks from the backlog
//! let request = ImportRequest { ticket_keys: vec!["VPC-101".into()], include_subtasks: true };
//! let created = import_tickets(&store, &SyntheticTicketSource::new(), &request).unwrap();
//! ```

pub mod import;
pub mod models;
pub mod store;

pub use import::{import_tickets, FlatTickets, ImportRequest};
pub use models::{
    NewComment, NewTask, Status, Task, TaskComment, TaskUpdate, DEFAULT_COMMENT_AUTHOR,
};
pub use store::{SqliteTaskStore, TaskStore};
