//! Task store trait and `SQLite` implementation.

use crate::error::{Error, Result};
use crate::tasks::models::{
    NewComment, NewTask, Status, Task, TaskComment, TaskUpdate, DEFAULT_COMMENT_AUTHOR,
};
use chrono::{DateTime, Duration, Utc};
use rusqlite::{params, Connection, OptionalExtension, TransactionBehavior};
use std::path::{Path, PathBuf};

/// Trait for task storage operations.
///
/// All methods return a `Result` and may fail with database errors.
#[allow(clippy::missing_errors_doc)]
pub trait TaskStore {
    // Task CRUD
    /// Create a new task in `Pending` status.
    fn create_task(&self, new: NewTask) -> Result<Task>;

    /// Get a task by ID.
    fn get_task(&self, id: i64) -> Result<Option<Task>>;

    /// Get the oldest task imported from the given ticket.
    fn find_task_by_ticket_key(&self, key: &str) -> Result<Option<Task>>;

    /// List all tasks, roots first, each group by ascending ID.
    fn list_tasks(&self) -> Result<Vec<Task>>;

    /// Apply a partial update. Returns `None` if the task does not exist.
    fn update_task(&self, id: i64, update: TaskUpdate) -> Result<Option<Task>>;

    /// Delete a task and its comments. Returns `false` if it did not exist.
    fn delete_task(&self, id: i64) -> Result<bool>;

    /// Move a task to another column.
    ///
    /// The stage is kept only if the new status allows one.
    fn set_task_status(
        &self,
        id: i64,
        status: &Status,
        stage: Option<&str>,
    ) -> Result<Option<Task>>;

    // Comments
    /// Get all comments for a task, oldest first.
    fn list_comments(&self, task_id: i64) -> Result<Vec<TaskComment>>;

    /// Add a comment to an existing task.
    fn add_comment(&self, task_id: i64, comment: NewComment) -> Result<TaskComment>;
}

const TASK_COLUMNS: &str = "id, jira_ticket_key, title, description, status, stage, assignee,
     project_key, parent_task_id, alias, tags, keywords, start_date, due_date, jira_url,
     created_at, updated_at";

const COMMENT_COLUMNS: &str = "id, task_id, author, content, attachments, created_at";

/// How long a connection waits for another writer before giving up.
const BUSY_TIMEOUT: std::time::Duration = std::time::Duration::from_secs(5);

/// SQLite-based task store.
#[derive(Debug, Clone)]
pub struct SqliteTaskStore {
    db_path: PathBuf,
}

impl SqliteTaskStore {
    /// Create a new `SQLite` task store at the given database path.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new(db_path: impl AsRef<Path>) -> Result<Self> {
        let store = Self { db_path: db_path.as_ref().to_path_buf() };
        store.init_schema()?;
        Ok(store)
    }

    /// Get the database path.
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Open a connection to the database.
    fn open(&self) -> Result<Connection> {
        if let Some(parent) = self.db_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(&self.db_path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.execute_batch("PRAGMA foreign_keys = ON; PRAGMA journal_mode = WAL;")?;
        Ok(conn)
    }

    /// Initialize the database schema.
    fn init_schema(&self) -> Result<()> {
        let conn = self.open()?;

        conn.execute_batch(
            r"
            CREATE TABLE IF NOT EXISTS tasks (
                id              INTEGER PRIMARY KEY AUTOINCREMENT,
                jira_ticket_key TEXT,
                title           TEXT NOT NULL,
                description     TEXT,
                status          TEXT NOT NULL DEFAULT 'Pending',
                stage           TEXT,
                assignee        TEXT,
                project_key     TEXT,
                parent_task_id  INTEGER REFERENCES tasks(id) ON DELETE SET NULL,
                alias           TEXT,
                tags            TEXT,
                keywords        TEXT,
                start_date      TEXT,
                due_date        TEXT,
                jira_url        TEXT,
                created_at      TEXT NOT NULL,
                updated_at      TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS task_comments (
                id          INTEGER PRIMARY KEY AUTOINCREMENT,
                task_id     INTEGER NOT NULL REFERENCES tasks(id) ON DELETE CASCADE,
                author      TEXT NOT NULL,
                content     TEXT NOT NULL,
                attachments TEXT,
                created_at  TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_tasks_jira_ticket_key ON tasks(jira_ticket_key);
            CREATE INDEX IF NOT EXISTS idx_tasks_parent_task_id ON tasks(parent_task_id);
            CREATE INDEX IF NOT EXISTS idx_task_comments_task_id ON task_comments(task_id);
            ",
        )?;

        Ok(())
    }

    /// Parse a task from a row selected with `TASK_COLUMNS`.
    fn parse_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        let status: String = row.get(4)?;

        Ok(Task {
            id: row.get(0)?,
            jira_ticket_key: row.get(1)?,
            title: row.get(2)?,
            description: row.get(3)?,
            status: Status::from(status),
            stage: row.get(5)?,
            assignee: row.get(6)?,
            project_key: row.get(7)?,
            parent_task_id: row.get(8)?,
            alias: row.get(9)?,
            tags: row.get(10)?,
            keywords: row.get(11)?,
            start_date: row.get(12)?,
            due_date: row.get(13)?,
            jira_url: row.get(14)?,
            created_at: row.get(15)?,
            updated_at: row.get(16)?,
        })
    }

    /// Parse a comment from a row selected with `COMMENT_COLUMNS`.
    fn parse_comment(row: &rusqlite::Row) -> rusqlite::Result<TaskComment> {
        Ok(TaskComment {
            id: row.get(0)?,
            task_id: row.get(1)?,
            author: row.get(2)?,
            content: row.get(3)?,
            attachments: row.get(4)?,
            created_at: row.get(5)?,
        })
    }

    fn fetch_task(conn: &Connection, id: i64) -> Result<Option<Task>> {
        let task = conn
            .query_row(
                &format!("SELECT {TASK_COLUMNS} FROM tasks WHERE id = ?1"),
                params![id],
                Self::parse_task,
            )
            .optional()?;
        Ok(task)
    }

    fn task_exists(conn: &Connection, id: i64) -> Result<bool> {
        let exists =
            conn.query_row("SELECT EXISTS(SELECT 1 FROM tasks WHERE id = ?1)", params![id], |row| {
                row.get(0)
            })?;
        Ok(exists)
    }

    /// Timestamp for the next write to task `id`, or `None` if it does not exist.
    ///
    /// Always later than the stored `updated_at`, even if the clock has not
    /// advanced.
    fn next_timestamp(conn: &Connection, id: i64) -> Result<Option<DateTime<Utc>>> {
        let previous: Option<DateTime<Utc>> = conn
            .query_row("SELECT updated_at FROM tasks WHERE id = ?1", params![id], |row| row.get(0))
            .optional()?;

        Ok(previous.map(|previous| {
            let now = Utc::now();
            if now > previous {
                now
            } else {
                previous + Duration::microseconds(1)
            }
        }))
    }
}

fn validate_title(title: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(Error::Validation("title must not be blank".to_string()));
    }
    Ok(())
}

impl TaskStore for SqliteTaskStore {
    fn create_task(&self, new: NewTask) -> Result<Task> {
        validate_title(&new.title)?;

        let conn = self.open()?;

        if let Some(parent) = new.parent_task_id {
            if !Self::task_exists(&conn, parent)? {
                return Err(Error::TaskNotFound(parent));
            }
        }

        let now = Utc::now();
        conn.execute(
            "INSERT INTO tasks (
                jira_ticket_key, title, description, status, assignee, project_key,
                parent_task_id, alias, tags, keywords, start_date, due_date, jira_url,
                created_at, updated_at
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?14)",
            params![
                new.jira_ticket_key,
                new.title,
                new.description,
                Status::Pending.as_str(),
                new.assignee,
                new.project_key,
                new.parent_task_id,
                new.alias,
                new.tags,
                new.keywords,
                new.start_date,
                new.due_date,
                new.jira_url,
                now,
            ],
        )?;

        let id = conn.last_insert_rowid();
        tracing::debug!(id, title = %new.title, "created task");

        Self::fetch_task(&conn, id)?.ok_or(Error::TaskNotFound(id))
    }

    fn get_task(&self, id: i64) -> Result<Option<Task>> {
        let conn = self.open()?;
        Self::fetch_task(&conn, id)
    }

    fn find_task_by_ticket_key(&self, key: &str) -> Result<Option<Task>> {
        let conn = self.open()?;
        let task = conn
            .query_row(
                &format!(
                    "SELECT {TASK_COLUMNS} FROM tasks WHERE jira_ticket_key = ?1
                     ORDER BY id LIMIT 1"
                ),
                params![key],
                Self::parse_task,
            )
            .optional()?;
        Ok(task)
    }

    fn list_tasks(&self) -> Result<Vec<Task>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {TASK_COLUMNS} FROM tasks ORDER BY (parent_task_id IS NOT NULL), id"
        ))?;
        let tasks = stmt.query_map([], Self::parse_task)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(tasks)
    }

    fn update_task(&self, id: i64, update: TaskUpdate) -> Result<Option<Task>> {
        if let Some(title) = &update.title {
            validate_title(title)?;
        }

        let mut conn = self.open()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(updated_at) = Self::next_timestamp(&tx, id)? else {
            tracing::debug!(id, "update of unknown task ignored");
            return Ok(None);
        };

        tx.execute(
            "UPDATE tasks SET
                title       = COALESCE(?1, title),
                description = COALESCE(?2, description),
                status      = COALESCE(?3, status),
                stage       = COALESCE(?4, stage),
                assignee    = COALESCE(?5, assignee),
                alias       = COALESCE(?6, alias),
                tags        = COALESCE(?7, tags),
                keywords    = COALESCE(?8, keywords),
                start_date  = COALESCE(?9, start_date),
                due_date    = COALESCE(?10, due_date),
                updated_at  = ?11
             WHERE id = ?12",
            params![
                update.title,
                update.description,
                update.status,
                update.stage,
                update.assignee,
                update.alias,
                update.tags,
                update.keywords,
                update.start_date,
                update.due_date,
                updated_at,
                id,
            ],
        )?;

        let task = Self::fetch_task(&tx, id)?;
        tx.commit()?;

        tracing::debug!(id, "updated task");
        Ok(task)
    }

    fn delete_task(&self, id: i64) -> Result<bool> {
        let conn = self.open()?;
        let rows = conn.execute("DELETE FROM tasks WHERE id = ?1", params![id])?;
        tracing::debug!(id, deleted = rows > 0, "delete task");
        Ok(rows > 0)
    }

    fn set_task_status(
        &self,
        id: i64,
        status: &Status,
        stage: Option<&str>,
    ) -> Result<Option<Task>> {
        let stage = stage.filter(|_| status.keeps_stage());

        let mut conn = self.open()?;
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;

        let Some(updated_at) = Self::next_timestamp(&tx, id)? else {
            tracing::debug!(id, "status change of unknown task ignored");
            return Ok(None);
        };

        tx.execute(
            "UPDATE tasks SET status = ?1, stage = ?2, updated_at = ?3 WHERE id = ?4",
            params![status.as_str(), stage, updated_at, id],
        )?;

        let task = Self::fetch_task(&tx, id)?;
        tx.commit()?;

        tracing::debug!(id, %status, ?stage, "set task status");
        Ok(task)
    }

    fn list_comments(&self, task_id: i64) -> Result<Vec<TaskComment>> {
        let conn = self.open()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {COMMENT_COLUMNS} FROM task_comments WHERE task_id = ?1
             ORDER BY created_at ASC, id ASC"
        ))?;
        let comments = stmt
            .query_map(params![task_id], Self::parse_comment)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(comments)
    }

    fn add_comment(&self, task_id: i64, comment: NewComment) -> Result<TaskComment> {
        let conn = self.open()?;

        if !Self::task_exists(&conn, task_id)? {
            return Err(Error::TaskNotFound(task_id));
        }

        let author = comment.author.unwrap_or_else(|| DEFAULT_COMMENT_AUTHOR.to_string());
        let content = comment.content.unwrap_or_default();
        let created_at = Utc::now();

        conn.execute(
            "INSERT INTO task_comments (task_id, author, content, attachments, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![task_id, author, content, comment.attachments, created_at],
        )?;

        let id = conn.last_insert_rowid();
        tracing::debug!(id, task_id, %author, "added comment");

        Ok(TaskComment { id, task_id, author, content, attachments: comment.attachments, created_at })
    }
}
