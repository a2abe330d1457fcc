//! Command execution for the CLI.
//!
//! This module handles running CLI commands and producing output.

use crate::cli::{BacklogCommand, Command, CommentCommand, TaskCommand};
use crate::config::BoardConfig;
use crate::jira::{JiraQuery, SyntheticTicketSource, TicketSource};
use crate::tasks::{
    import_tickets, ImportRequest, NewComment, NewTask, SqliteTaskStore, Status, TaskStore,
    TaskUpdate,
};
use serde::Serialize;
use std::path::Path;
use std::process::ExitCode;

/// Output from running the CLI, with separate stdout and stderr messages.
#[derive(Debug)]
pub struct CliOutput {
    /// Exit code for the process.
    pub exit_code: ExitCode,
    /// Messages to print to stdout.
    pub stdout: Vec<String>,
    /// Messages to print to stderr.
    pub stderr: Vec<String>,
}

/// Run a CLI command against the board of the current directory.
pub fn run(command: Command) -> CliOutput {
    match std::env::current_dir() {
        Ok(dir) => run_in(command, &dir),
        Err(e) => error_output(format!("Error reading current directory: {e}")),
    }
}

/// Run a CLI command against the board of `project_dir`.
pub fn run_in(command: Command, project_dir: &Path) -> CliOutput {
    let config = match BoardConfig::load_or_default(project_dir) {
        Ok(c) => c,
        Err(e) => return error_output(format!("Error loading config: {e}")),
    };

    match command {
        Command::Task(cmd) => run_task_cmd(cmd, &config, project_dir),
        Command::Comment(cmd) => run_comment_cmd(cmd, &config, project_dir),
        Command::Backlog(cmd) => run_backlog_cmd(cmd, &config, project_dir),
    }
}

// === Task Commands ===

fn run_task_cmd(cmd: TaskCommand, config: &BoardConfig, project_dir: &Path) -> CliOutput {
    let store = match open_store(config, project_dir) {
        Ok(s) => s,
        Err(e) => return error_output(e),
    };

    match cmd {
        TaskCommand::List => task_list(&store),
        TaskCommand::Get { id } => task_get(&store, id),
        TaskCommand::Create {
            title,
            description,
            assignee,
            project,
            parent,
            alias,
            tags,
            keywords,
            start_date,
            due_date,
            jira_ticket_key,
            jira_url,
        } => task_create(
            &store,
            NewTask {
                title,
                description,
                assignee,
                project_key: project,
                parent_task_id: parent,
                alias,
                tags,
                keywords,
                start_date,
                due_date,
                jira_ticket_key,
                jira_url,
            },
        ),
        TaskCommand::Update {
            id,
            title,
            description,
            status,
            stage,
            assignee,
            alias,
            tags,
            keywords,
            start_date,
            due_date,
        } => task_update(
            &store,
            id,
            TaskUpdate {
                title,
                description,
                status,
                stage,
                assignee,
                alias,
                tags,
                keywords,
                start_date,
                due_date,
            },
        ),
        TaskCommand::Delete { id } => task_delete(&store, id),
        TaskCommand::Status { id, status, stage } => {
            task_status(&store, id, &Status::from(status), stage.as_deref())
        }
    }
}

fn task_list(store: &SqliteTaskStore) -> CliOutput {
    match store.list_tasks() {
        Ok(tasks) => json_output(&tasks),
        Err(e) => error_output(format!("Error listing tasks: {e}")),
    }
}

fn task_get(store: &SqliteTaskStore, id: i64) -> CliOutput {
    match store.get_task(id) {
        Ok(Some(task)) => json_output(&task),
        Ok(None) => error_output(format!("Task not found: {id}")),
        Err(e) => error_output(format!("Error getting task: {e}")),
    }
}

fn task_create(store: &SqliteTaskStore, new: NewTask) -> CliOutput {
    match store.create_task(new) {
        Ok(task) => json_output(&task),
        Err(e) => error_output(format!("Error creating task: {e}")),
    }
}

fn task_update(store: &SqliteTaskStore, id: i64, update: TaskUpdate) -> CliOutput {
    match store.update_task(id, update) {
        Ok(_) => json_output(&true),
        Err(e) => error_output(format!("Error updating task: {e}")),
    }
}

fn task_delete(store: &SqliteTaskStore, id: i64) -> CliOutput {
    match store.delete_task(id) {
        Ok(_) => json_output(&true),
        Err(e) => error_output(format!("Error deleting task: {e}")),
    }
}

fn task_status(
    store: &SqliteTaskStore,
    id: i64,
    status: &Status,
    stage: Option<&str>,
) -> CliOutput {
    match store.set_task_status(id, status, stage) {
        Ok(_) => json_output(&true),
        Err(e) => error_output(format!("Error setting status: {e}")),
    }
}

// === Comment Commands ===

fn run_comment_cmd(cmd: CommentCommand, config: &BoardConfig, project_dir: &Path) -> CliOutput {
    let store = match open_store(config, project_dir) {
        Ok(s) => s,
        Err(e) => return error_output(e),
    };

    match cmd {
        CommentCommand::List { task_id } => match store.list_comments(task_id) {
            Ok(comments) => json_output(&comments),
            Err(e) => error_output(format!("Error listing comments: {e}")),
        },
        CommentCommand::Add { task_id, content, author, attachments } => {
            match store.add_comment(task_id, NewComment { author, content, attachments }) {
                Ok(_) => json_output(&true),
                Err(e) => error_output(format!("Error adding comment: {e}")),
            }
        }
    }
}

// === Backlog Commands ===

fn run_backlog_cmd(cmd: BacklogCommand, config: &BoardConfig, project_dir: &Path) -> CliOutput {
    let source = SyntheticTicketSource::from_config(config);

    match cmd {
        BacklogCommand::Query { project, user, query } => {
            let query = JiraQuery { project, user, query_string: query, ..JiraQuery::default() };
            match source.fetch(&query) {
                Ok(tickets) => json_output(&tickets),
                Err(e) => error_output(format!("Error querying backlog: {e}")),
            }
        }
        BacklogCommand::Import { keys, with_subtasks } => {
            let store = match open_store(config, project_dir) {
                Ok(s) => s,
                Err(e) => return error_output(e),
            };
            let request = ImportRequest { ticket_keys: keys, include_subtasks: with_subtasks };
            match import_tickets(&store, &source, &request) {
                Ok(created) => json_output(&created),
                Err(e) => error_output(format!("Error importing tickets: {e}")),
            }
        }
    }
}

// === Helpers ===

fn open_store(config: &BoardConfig, project_dir: &Path) -> Result<SqliteTaskStore, String> {
    let db_path = config.resolve_db_path(project_dir).map_err(|e| e.to_string())?;
    SqliteTaskStore::new(&db_path).map_err(|e| e.to_string())
}

fn json_output<T: Serialize>(value: &T) -> CliOutput {
    match serde_json::to_string_pretty(value) {
        Ok(json) => CliOutput { exit_code: ExitCode::SUCCESS, stdout: vec![json], stderr: vec![] },
        Err(e) => error_output(e.to_string()),
    }
}

fn error_output(message: String) -> CliOutput {
    CliOutput { exit_code: ExitCode::from(1), stdout: vec![], stderr: vec![message] }
}
