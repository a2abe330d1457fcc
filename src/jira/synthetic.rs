//! Deterministic stand-in for a real tracker.
//!
//! Every query yields the same shape: three stories with two sub-tasks each,
//! then two standalone bugs. Keys, titles and dates depend only on the
//! project key, so repeated queries are identical.

use super::models::{JiraQuery, JiraTicket, TYPE_BUG, TYPE_STORY, TYPE_SUBTASK};
use super::TicketSource;
use crate::config::{BoardConfig, DEFAULT_JIRA_BROWSE_URL, DEFAULT_PROJECT};
use crate::error::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};

const STORY_COUNT: u32 = 3;
const SUBTASKS_PER_STORY: u32 = 2;
const BUG_COUNT: u32 = 2;

const STORY_KEY_BASE: u32 = 100;
const SUBTASK_KEY_BASE: u32 = 200;
const BUG_KEY_BASE: u32 = 300;

/// Ticket source that fabricates a fixed backlog.
#[derive(Debug, Clone)]
pub struct SyntheticTicketSource {
    default_project: String,
    browse_url: String,
}

impl Default for SyntheticTicketSource {
    fn default() -> Self {
        Self {
            default_project: DEFAULT_PROJECT.to_string(),
            browse_url: DEFAULT_JIRA_BROWSE_URL.to_string(),
        }
    }
}

impl SyntheticTicketSource {
    /// Create a source with the built-in default project and link prefix.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a source using the project and link prefix from `config`.
    #[must_use]
    pub fn from_config(config: &BoardConfig) -> Self {
        Self {
            default_project: config.default_project.clone(),
            browse_url: config.jira_browse_url.clone(),
        }
    }

    fn url(&self, key: &str) -> Option<String> {
        Some(format!("{}{key}", self.browse_url))
    }

    fn story(&self, project: &str, user: Option<&String>, i: u32) -> JiraTicket {
        let key = format!("{project}-{}", STORY_KEY_BASE + i);
        let subtasks: Vec<JiraTicket> =
            (1..=SUBTASKS_PER_STORY).map(|j| self.subtask(project, user, &key, i, j)).collect();

        JiraTicket {
            title: format!("Story {i}: core feature {i}"),
            description: Some(format!(
                "Delivers core feature {i}. Broken down into {} sub-tasks.",
                subtasks.len()
            )),
            jira_status: if i == 1 { "In Progress" } else { "To Do" }.to_string(),
            assignee: user.cloned(),
            project_key: project.to_string(),
            ticket_type: TYPE_STORY.to_string(),
            parent_key: None,
            subtasks,
            start_date: NaiveDate::from_ymd_opt(2026, 2, 20),
            due_date: NaiveDate::from_ymd_opt(2026, 3, 15 + i * 5),
            created_at: created_at(i64::from(i) * 60),
            jira_url: self.url(&key),
            key,
        }
    }

    fn subtask(
        &self,
        project: &str,
        user: Option<&String>,
        parent_key: &str,
        i: u32,
        j: u32,
    ) -> JiraTicket {
        let key = format!("{project}-{}", SUBTASK_KEY_BASE + (i - 1) * SUBTASKS_PER_STORY + j);
        JiraTicket {
            title: format!("Sub-task {j} of Story {i}"),
            description: Some(format!("Implementation item {j} under story {i}")),
            jira_status: "To Do".to_string(),
            assignee: user.cloned(),
            project_key: project.to_string(),
            ticket_type: TYPE_SUBTASK.to_string(),
            parent_key: Some(parent_key.to_string()),
            subtasks: vec![],
            start_date: None,
            due_date: NaiveDate::from_ymd_opt(2026, 3, 10 + i * 5),
            created_at: created_at(i64::from(i) * 60 + i64::from(j)),
            jira_url: self.url(&key),
            key,
        }
    }

    fn bug(&self, project: &str, i: u32) -> JiraTicket {
        let key = format!("{project}-{}", BUG_KEY_BASE + i);
        JiraTicket {
            title: format!("Bug Fix {i}: urgent bug fix"),
            description: Some(format!("Fix urgent bug {i}")),
            jira_status: "To Do".to_string(),
            assignee: None,
            project_key: project.to_string(),
            ticket_type: TYPE_BUG.to_string(),
            parent_key: None,
            subtasks: vec![],
            start_date: None,
            due_date: NaiveDate::from_ymd_opt(2026, 3, 1 + i),
            created_at: created_at(600 + i64::from(i)),
            jira_url: self.url(&key),
            key,
        }
    }
}

/// Fixed creation time: 2026-02-01 09:00 UTC plus `minutes`.
fn created_at(minutes: i64) -> DateTime<Utc> {
    let base = NaiveDate::from_ymd_opt(2026, 2, 1)
        .and_then(|d| d.and_hms_opt(9, 0, 0))
        .map(|dt| dt.and_utc())
        .unwrap_or_default();
    base + Duration::minutes(minutes)
}

impl TicketSource for SyntheticTicketSource {
    fn fetch(&self, query: &JiraQuery) -> Result<Vec<JiraTicket>> {
        let project = query.project.as_deref().unwrap_or(&self.default_project);
        let user = query.user.as_ref();

        let mut tickets: Vec<JiraTicket> =
            (1..=STORY_COUNT).map(|i| self.story(project, user, i)).collect();
        tickets.extend((1..=BUG_COUNT).map(|i| self.bug(project, i)));

        tracing::debug!(project, count = tickets.len(), "generated synthetic backlog");
        Ok(tickets)
    }
}
