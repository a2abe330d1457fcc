//! Ticket types as the external tracker reports them.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Ticket type that may own sub-tasks.
pub const TYPE_STORY: &str = "Story";
/// Ticket type of a story's children.
pub const TYPE_SUBTASK: &str = "Sub-task";
/// Ticket type of standalone defects.
pub const TYPE_BUG: &str = "Bug";

/// A candidate item from the external tracker.
///
/// Tickets are never persisted; importing one copies its fields into a new
/// [`Task`](crate::tasks::Task).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JiraTicket {
    /// Ticket key, unique within one query result (e.g. `VPC-101`).
    pub key: String,
    /// Summary line.
    pub title: String,
    /// Longer description.
    pub description: Option<String>,
    /// Status in the tracker's own vocabulary ("To Do", "In Progress").
    pub jira_status: String,
    /// Assigned user.
    pub assignee: Option<String>,
    /// Project the ticket belongs to.
    pub project_key: String,
    /// "Story", "Sub-task", "Bug", ...
    pub ticket_type: String,
    /// Key of the owning ticket, for sub-tasks.
    pub parent_key: Option<String>,
    /// Direct children. Only stories have any.
    pub subtasks: Vec<JiraTicket>,
    /// Planned start.
    pub start_date: Option<NaiveDate>,
    /// Planned finish.
    pub due_date: Option<NaiveDate>,
    /// When the tracker created the ticket.
    pub created_at: DateTime<Utc>,
    /// Link to the ticket in the tracker.
    pub jira_url: Option<String>,
}

impl JiraTicket {
    /// Whether this ticket is a story (the only type that owns sub-tasks).
    #[must_use]
    pub fn is_story(&self) -> bool {
        self.ticket_type == TYPE_STORY
    }
}

/// Filters for a backlog query.
///
/// The date range and free-text query are accepted for forward compatibility
/// but the synthetic source ignores them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct JiraQuery {
    /// Project key; the configured default project when absent.
    #[serde(default)]
    pub project: Option<String>,
    /// User the returned stories and sub-tasks are assigned to.
    #[serde(default)]
    pub user: Option<String>,
    /// Lower bound of the date range.
    #[serde(default)]
    pub start_date: Option<DateTime<Utc>>,
    /// Upper bound of the date range.
    #[serde(default)]
    pub end_date: Option<DateTime<Utc>>,
    /// Raw JQL.
    #[serde(default)]
    pub query_string: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_query_deserializes() {
        let query: JiraQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query, JiraQuery::default());
    }

    #[test]
    fn test_query_with_project() {
        let query: JiraQuery =
            serde_json::from_str(r#"{"project": "ABC", "user": "kim"}"#).unwrap();
        assert_eq!(query.project.as_deref(), Some("ABC"));
        assert_eq!(query.user.as_deref(), Some("kim"));
        assert!(query.query_string.is_none());
    }

    #[test]
    fn test_ticket_serializes_dates_as_plain_dates() {
        let ticket = JiraTicket {
            key: "VPC-301".to_string(),
            title: "Bug".to_string(),
            description: None,
            jira_status: "To Do".to_string(),
            assignee: None,
            project_key: "VPC".to_string(),
            ticket_type: TYPE_BUG.to_string(),
            parent_key: None,
            subtasks: vec![],
            start_date: None,
            due_date: NaiveDate::from_ymd_opt(2026, 3, 2),
            created_at: DateTime::<Utc>::default(),
            jira_url: None,
        };

        let json = serde_json::to_value(&ticket).unwrap();
        assert_eq!(json["due_date"], "2026-03-02");
        assert!(!ticket.is_story());
    }
}
