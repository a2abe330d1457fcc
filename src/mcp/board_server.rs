//! MCP server for the kanban board.
//!
//! Exposes task, comment and backlog operations as MCP tools. Every tool
//! answers with pretty-printed JSON.

// The rmcp `#[tool(aggr)]` macro requires ownership of input structs,
// making pass-by-value necessary for all tool handler functions.
#![allow(clippy::needless_pass_by_value)]

use crate::config::BoardConfig;
use crate::error::Error;
use crate::jira::{JiraQuery, SyntheticTicketSource, TicketSource};
use crate::tasks::{
    import_tickets, ImportRequest, NewComment, NewTask, SqliteTaskStore, Status, TaskStore,
    TaskUpdate,
};
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::tool;
use rmcp::Error as McpError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

/// Instructions for the MCP server, shown to agents using this server.
const INSTRUCTIONS: &str = r"Kanban board server. Tasks live in columns (status) and may carry a stage while in flight.

## Importing work

Use `query_backlog` to see the ticket hierarchy (stories with sub-tasks, plus standalone bugs), then `import_from_backlog` with the keys you want. Tickets already on the board are never imported twice, so repeating an import is safe.

## Moving tasks

Use `set_task_status` to move a task. The stage is kept only for columns other than Pending and Done. `update_task` changes only the fields you pass.

Update, delete, status and comment tools answer `true` even when the task does not exist, except `add_comment`, which rejects unknown tasks.";

/// MCP server for the kanban board.
#[derive(Clone)]
pub struct BoardServer {
    store: Arc<SqliteTaskStore>,
    source: Arc<dyn TicketSource + Send + Sync>,
}

impl BoardServer {
    /// Create a server over an existing store and ticket source.
    #[must_use]
    pub fn new(store: SqliteTaskStore, source: Arc<dyn TicketSource + Send + Sync>) -> Self {
        Self { store: Arc::new(store), source }
    }

    /// Create a server for the given project directory.
    ///
    /// Reads `.kanban/config.yaml` if present and opens the configured
    /// database, backed by the synthetic ticket source.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be read or the database cannot
    /// be initialized.
    pub fn for_project(project_dir: &Path) -> crate::error::Result<Self> {
        let config = BoardConfig::load_or_default(project_dir)?;
        let store = SqliteTaskStore::new(config.resolve_db_path(project_dir)?)?;
        let source = SyntheticTicketSource::from_config(&config);
        Ok(Self::new(store, Arc::new(source)))
    }
}

/// Map a board error onto the MCP error space.
fn to_mcp_error(err: Error) -> McpError {
    if err.is_client_error() {
        McpError::invalid_params(err.to_string(), None)
    } else {
        McpError::internal_error(err.to_string(), None)
    }
}

fn json_result<T: Serialize + ?Sized>(value: &T) -> Result<CallToolResult, McpError> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| McpError::internal_error(e.to_string(), None))?;
    Ok(CallToolResult::success(vec![Content::text(json)]))
}

fn acknowledged() -> Result<CallToolResult, McpError> {
    json_result(&true)
}

// Tool input schemas

/// Input for getting a task.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct GetTaskInput {
    /// Task ID.
    pub id: i64,
}

/// Input for updating a task.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct UpdateTaskInput {
    /// Task ID.
    pub id: i64,
    /// Fields to change; omitted fields are left as they are.
    #[serde(flatten)]
    pub update: TaskUpdate,
}

/// Input for deleting a task.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct DeleteTaskInput {
    /// Task ID.
    pub id: i64,
}

/// Input for moving a task to another column.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct SetTaskStatusInput {
    /// Task ID.
    pub id: i64,
    /// New status, e.g. Pending, InProgress, Done.
    pub status: String,
    /// Stage within the status (ignored for Pending and Done).
    #[serde(default)]
    pub stage: Option<String>,
}

/// Input for listing comments.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct ListCommentsInput {
    /// Task ID.
    pub task_id: i64,
}

/// Input for adding a comment.
#[derive(Debug, Deserialize, JsonSchema)]
pub struct AddCommentInput {
    /// Task ID.
    pub task_id: i64,
    /// Comment author, body and attachments.
    #[serde(flatten)]
    pub comment: NewComment,
}

#[tool(tool_box)]
impl BoardServer {
    /// Query the external backlog.
    #[tool(description = "Query the backlog for a project; returns stories with nested sub-tasks, then bugs")]
    fn query_backlog(&self, #[tool(aggr)] input: JiraQuery) -> Result<CallToolResult, McpError> {
        let tickets = self.source.fetch(&input).map_err(to_mcp_error)?;
        json_result(&tickets)
    }

    /// List every task on the board.
    #[tool(description = "List all tasks, top-level tasks first")]
    fn list_tasks(&self) -> Result<CallToolResult, McpError> {
        let tasks = self.store.list_tasks().map_err(to_mcp_error)?;
        json_result(&tasks)
    }

    /// Get a single task.
    #[tool(description = "Get a task by its ID; returns null if it does not exist")]
    fn get_task(&self, #[tool(aggr)] input: GetTaskInput) -> Result<CallToolResult, McpError> {
        let task = self.store.get_task(input.id).map_err(to_mcp_error)?;
        json_result(&task)
    }

    /// Create a task by hand.
    #[tool(description = "Create a new task in the Pending column")]
    fn create_task(&self, #[tool(aggr)] input: NewTask) -> Result<CallToolResult, McpError> {
        let task = self.store.create_task(input).map_err(to_mcp_error)?;
        json_result(&task)
    }

    /// Import tickets from the backlog.
    #[tool(
        description = "Import backlog tickets by key, optionally with their sub-tasks; returns the tasks that were created"
    )]
    fn import_from_backlog(
        &self,
        #[tool(aggr)] input: ImportRequest,
    ) -> Result<CallToolResult, McpError> {
        let created =
            import_tickets(self.store.as_ref(), self.source.as_ref(), &input).map_err(to_mcp_error)?;
        json_result(&created)
    }

    /// Apply a partial update.
    #[tool(description = "Update the given fields of a task; omitted fields are left unchanged")]
    fn update_task(&self, #[tool(aggr)] input: UpdateTaskInput) -> Result<CallToolResult, McpError> {
        self.store.update_task(input.id, input.update).map_err(to_mcp_error)?;
        acknowledged()
    }

    /// Delete a task and its comments.
    #[tool(description = "Delete a task and all of its comments")]
    fn delete_task(&self, #[tool(aggr)] input: DeleteTaskInput) -> Result<CallToolResult, McpError> {
        self.store.delete_task(input.id).map_err(to_mcp_error)?;
        acknowledged()
    }

    /// Move a task to another column.
    #[tool(description = "Set a task's status; the stage is kept only outside Pending and Done")]
    fn set_task_status(
        &self,
        #[tool(aggr)] input: SetTaskStatusInput,
    ) -> Result<CallToolResult, McpError> {
        let status = Status::from(input.status);
        self.store
            .set_task_status(input.id, &status, input.stage.as_deref())
            .map_err(to_mcp_error)?;
        acknowledged()
    }

    /// List a task's comments.
    #[tool(description = "List the comments on a task, oldest first")]
    fn list_comments(
        &self,
        #[tool(aggr)] input: ListCommentsInput,
    ) -> Result<CallToolResult, McpError> {
        let comments = self.store.list_comments(input.task_id).map_err(to_mcp_error)?;
        json_result(&comments)
    }

    /// Comment on a task.
    #[tool(description = "Add a comment to a task; author defaults to anonymous")]
    fn add_comment(&self, #[tool(aggr)] input: AddCommentInput) -> Result<CallToolResult, McpError> {
        self.store.add_comment(input.task_id, input.comment).map_err(to_mcp_error)?;
        acknowledged()
    }
}

#[tool(tool_box)]
impl rmcp::ServerHandler for BoardServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "kanban-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            instructions: Some(INSTRUCTIONS.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_server() -> (TempDir, BoardServer) {
        let dir = TempDir::new().unwrap();
        let store = SqliteTaskStore::new(dir.path().join("test.db")).unwrap();
        let server = BoardServer::new(store, Arc::new(SyntheticTicketSource::new()));
        (dir, server)
    }

    #[test]
    fn test_create_and_list() {
        let (_dir, server) = create_test_server();

        server.create_task(NewTask::titled("Write docs")).unwrap();
        assert!(server.list_tasks().is_ok());

        let tasks = server.store.list_tasks().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].title, "Write docs");
    }

    #[test]
    fn test_create_blank_title_is_invalid_params() {
        let (_dir, server) = create_test_server();

        let err = server.create_task(NewTask::titled("")).unwrap_err();
        assert_eq!(err, McpError::invalid_params("Invalid input: title must not be blank", None));
    }

    #[test]
    fn test_import_from_backlog() {
        let (_dir, server) = create_test_server();
        let request = ImportRequest { ticket_keys: vec!["VPC-101".to_string()], include_subtasks: true };

        server.import_from_backlog(request).unwrap();

        assert_eq!(server.store.list_tasks().unwrap().len(), 3);
    }

    #[test]
    fn test_update_unknown_task_acknowledged() {
        let (_dir, server) = create_test_server();

        let input = UpdateTaskInput {
            id: 999,
            update: TaskUpdate { title: Some("x".to_string()), ..Default::default() },
        };
        assert!(server.update_task(input).is_ok());
        assert!(server.delete_task(DeleteTaskInput { id: 999 }).is_ok());
    }

    #[test]
    fn test_update_input_flattens_fields() {
        let input: UpdateTaskInput =
            serde_json::from_str(r#"{"id": 4, "alias": "auth", "due_date": "2026-04-01"}"#).unwrap();

        assert_eq!(input.id, 4);
        assert_eq!(input.update.alias.as_deref(), Some("auth"));
        assert!(input.update.title.is_none());
    }

    #[test]
    fn test_set_status_applies_stage_rule() {
        let (_dir, server) = create_test_server();
        let task = server.store.create_task(NewTask::titled("Task")).unwrap();

        server
            .set_task_status(SetTaskStatusInput {
                id: task.id,
                status: "Done".to_string(),
                stage: Some("Review".to_string()),
            })
            .unwrap();

        let task = server.store.get_task(task.id).unwrap().unwrap();
        assert_eq!(task.status, Status::Done);
        assert!(task.stage.is_none());
    }

    #[test]
    fn test_comments() {
        let (_dir, server) = create_test_server();
        let task = server.store.create_task(NewTask::titled("Task")).unwrap();

        let input: AddCommentInput =
            serde_json::from_value(serde_json::json!({"task_id": task.id, "content": "LGTM"}))
                .unwrap();
        server.add_comment(input).unwrap();
        assert!(server.list_comments(ListCommentsInput { task_id: task.id }).is_ok());

        let comments = server.store.list_comments(task.id).unwrap();
        assert_eq!(comments.len(), 1);
        assert_eq!(comments[0].author, "anonymous");
    }

    #[test]
    fn test_comment_on_unknown_task_is_invalid_params() {
        let (_dir, server) = create_test_server();

        let err = server
            .add_comment(AddCommentInput { task_id: 5, comment: NewComment::default() })
            .unwrap_err();
        assert_eq!(err, McpError::invalid_params("Task not found: 5", None));
    }

    #[test]
    fn test_database_errors_are_internal() {
        let err = to_mcp_error(Error::Database(rusqlite::Error::QueryReturnedNoRows));
        assert_eq!(err, McpError::internal_error("Database error: Query returned no rows", None));
    }

    #[test]
    fn test_query_backlog_and_get_task() {
        let (_dir, server) = create_test_server();

        assert!(server.query_backlog(JiraQuery::default()).is_ok());
        assert!(server.get_task(GetTaskInput { id: 1 }).is_ok());
    }

    #[test]
    fn test_for_project_uses_config() {
        let dir = TempDir::new().unwrap();
        let config = BoardConfig {
            database_path: Some("board.sqlite3".into()),
            ..Default::default()
        };
        config.save_to(dir.path()).unwrap();

        let server = BoardServer::for_project(dir.path()).unwrap();
        assert_eq!(server.store.db_path(), dir.path().join("board.sqlite3"));
    }

    #[test]
    fn test_server_info() {
        let (_dir, server) = create_test_server();
        let info = rmcp::ServerHandler::get_info(&server);
        assert_eq!(info.server_info.name, "kanban-mcp");
        assert!(info.instructions.unwrap().contains("import_from_backlog"));
    }
}
