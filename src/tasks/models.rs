//! Task model types for the board.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Author recorded on comments that do not name one.
pub const DEFAULT_COMMENT_AUTHOR: &str = "anonymous";

/// Board column of a task.
///
/// Any string is accepted; the three well-known columns get their own
/// variants. Persisted and serialized as the plain string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    /// Not started. Every task starts here.
    #[default]
    Pending,
    /// Being worked on; the only well-known status that carries a stage.
    InProgress,
    /// Finished.
    Done,
    /// Any other column name.
    Other(String),
}

impl Status {
    /// Parse a status. Matching is exact; unknown names become [`Status::Other`].
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s {
            "Pending" => Self::Pending,
            "InProgress" => Self::InProgress,
            "Done" => Self::Done,
            other => Self::Other(other.to_string()),
        }
    }

    /// Get the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
            Self::Other(s) => s,
        }
    }

    /// Whether a stage is meaningful in this status.
    ///
    /// Stages describe in-flight work, so `Pending` and `Done` never keep one.
    #[must_use]
    pub fn keeps_stage(&self) -> bool {
        !matches!(self.as_str(), "Pending" | "Done")
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        Self::parse(s)
    }
}

impl From<Status> for String {
    fn from(status: Status) -> Self {
        match status {
            Status::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A task on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Store-assigned identifier.
    pub id: i64,
    /// Key of the ticket this task was imported from.
    pub jira_ticket_key: Option<String>,
    /// Short title.
    pub title: String,
    /// Longer description.
    pub description: Option<String>,
    /// Board column.
    pub status: Status,
    /// Sub-phase of in-flight work, e.g. "Review".
    pub stage: Option<String>,
    /// Assigned user.
    pub assignee: Option<String>,
    /// Project the task belongs to.
    pub project_key: Option<String>,
    /// Owning task, for sub-tasks.
    pub parent_task_id: Option<i64>,
    /// Short display name.
    pub alias: Option<String>,
    /// Free-form tags.
    pub tags: Option<String>,
    /// Free-form keywords.
    pub keywords: Option<String>,
    /// Planned start.
    pub start_date: Option<NaiveDate>,
    /// Planned finish.
    pub due_date: Option<NaiveDate>,
    /// Link to the source ticket.
    pub jira_url: Option<String>,
    /// When the task was created.
    pub created_at: DateTime<Utc>,
    /// When the task was last changed.
    pub updated_at: DateTime<Utc>,
}

impl Task {
    /// Whether this task sits at the top of the tree.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.parent_task_id.is_none()
    }
}

/// Fields for creating a task. Status is always `Pending` on creation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct NewTask {
    /// Title (required, must not be blank).
    pub title: String,
    /// Description.
    #[serde(default)]
    pub description: Option<String>,
    /// Key of the source ticket.
    #[serde(default)]
    pub jira_ticket_key: Option<String>,
    /// Assigned user.
    #[serde(default)]
    pub assignee: Option<String>,
    /// Project key.
    #[serde(default)]
    pub project_key: Option<String>,
    /// Owning task.
    #[serde(default)]
    pub parent_task_id: Option<i64>,
    /// Short display name.
    #[serde(default)]
    pub alias: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Option<String>,
    /// Free-form keywords.
    #[serde(default)]
    pub keywords: Option<String>,
    /// Planned start (`YYYY-MM-DD`).
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// Planned finish (`YYYY-MM-DD`).
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    /// Link to the source ticket.
    #[serde(default)]
    pub jira_url: Option<String>,
}

impl NewTask {
    /// A new task with only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self { title: title.into(), ..Self::default() }
    }
}

/// A partial update.
///
/// `None` leaves the stored value untouched; `Some` overwrites it. There is no
/// way to clear a field through an update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct TaskUpdate {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New status. Unlike [`set_task_status`](super::TaskStore::set_task_status)
    /// this does not touch the stage.
    #[serde(default)]
    pub status: Option<String>,
    /// New stage.
    #[serde(default)]
    pub stage: Option<String>,
    /// New assignee.
    #[serde(default)]
    pub assignee: Option<String>,
    /// New alias.
    #[serde(default)]
    pub alias: Option<String>,
    /// New tags.
    #[serde(default)]
    pub tags: Option<String>,
    /// New keywords.
    #[serde(default)]
    pub keywords: Option<String>,
    /// New start date.
    #[serde(default)]
    pub start_date: Option<NaiveDate>,
    /// New due date.
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
}

impl TaskUpdate {
    /// Check if any fields are set for update.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.stage.is_none()
            && self.assignee.is_none()
            && self.alias.is_none()
            && self.tags.is_none()
            && self.keywords.is_none()
            && self.start_date.is_none()
            && self.due_date.is_none()
    }
}

/// A comment attached to a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskComment {
    /// Store-assigned identifier.
    pub id: i64,
    /// Owning task.
    pub task_id: i64,
    /// Who wrote it.
    pub author: String,
    /// Comment body.
    pub content: String,
    /// Opaque attachment payload, e.g. a JSON list of links.
    pub attachments: Option<String>,
    /// When the comment was added.
    pub created_at: DateTime<Utc>,
}

/// Fields for a new comment. Missing author and content get defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct NewComment {
    /// Author; [`DEFAULT_COMMENT_AUTHOR`] when absent.
    #[serde(default)]
    pub author: Option<String>,
    /// Body; empty when absent.
    #[serde(default)]
    pub content: Option<String>,
    /// Opaque attachment payload.
    #[serde(default)]
    pub attachments: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse() {
        assert_eq!(Status::parse("Pending"), Status::Pending);
        assert_eq!(Status::parse("InProgress"), Status::InProgress);
        assert_eq!(Status::parse("Done"), Status::Done);
        assert_eq!(Status::parse("done"), Status::Other("done".to_string()));
        assert_eq!(Status::parse("Blocked"), Status::Other("Blocked".to_string()));
    }

    #[test]
    fn test_status_as_str_roundtrip() {
        for name in ["Pending", "InProgress", "Done", "Waiting on vendor"] {
            assert_eq!(Status::parse(name).as_str(), name);
            assert_eq!(String::from(Status::parse(name)), name);
        }
    }

    #[test]
    fn test_status_keeps_stage() {
        assert!(!Status::Pending.keeps_stage());
        assert!(!Status::Done.keeps_stage());
        assert!(Status::InProgress.keeps_stage());
        assert!(Status::parse("Blocked").keeps_stage());
        assert!(!Status::Other("Done".to_string()).keeps_stage());
    }

    #[test]
    fn test_status_default() {
        assert_eq!(Status::default(), Status::Pending);
    }

    #[test]
    fn test_status_serializes_as_string() {
        assert_eq!(serde_json::to_string(&Status::InProgress).unwrap(), r#""InProgress""#);
        let parsed: Status = serde_json::from_str(r#""Review""#).unwrap();
        assert_eq!(parsed, Status::Other("Review".to_string()));
    }

    #[test]
    fn test_task_serialization() {
        let task = Task {
            id: 1,
            jira_ticket_key: Some("VPC-101".to_string()),
            title: "Test Task".to_string(),
            description: None,
            status: Status::InProgress,
            stage: Some("Review".to_string()),
            assignee: None,
            project_key: Some("VPC".to_string()),
            parent_task_id: None,
            alias: None,
            tags: None,
            keywords: None,
            start_date: NaiveDate::from_ymd_opt(2026, 2, 20),
            due_date: None,
            jira_url: None,
            created_at: DateTime::<Utc>::default(),
            updated_at: DateTime::<Utc>::default(),
        };

        let json = serde_json::to_value(&task).unwrap();
        assert_eq!(json["status"], "InProgress");
        assert_eq!(json["start_date"], "2026-02-20");

        let parsed: Task = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, task);
        assert!(parsed.is_root());
    }

    #[test]
    fn test_task_update_is_empty() {
        assert!(TaskUpdate::default().is_empty());
        assert!(!TaskUpdate { tags: Some(String::new()), ..Default::default() }.is_empty());
    }

    #[test]
    fn test_task_update_absent_fields_stay_none() {
        let update: TaskUpdate = serde_json::from_str(r#"{"alias": "login"}"#).unwrap();
        assert_eq!(update.alias.as_deref(), Some("login"));
        assert!(update.title.is_none());
        assert!(update.due_date.is_none());
    }

    #[test]
    fn test_new_task_requires_title() {
        assert!(serde_json::from_str::<NewTask>("{}").is_err());
        let task: NewTask = serde_json::from_str(r#"{"title": "Write docs"}"#).unwrap();
        assert_eq!(task, NewTask::titled("Write docs"));
    }

    #[test]
    fn test_new_comment_all_optional() {
        let comment: NewComment = serde_json::from_str("{}").unwrap();
        assert_eq!(comment, NewComment::default());
    }
}
