//! Importing backlog tickets onto the board.
//!
//! An import fetches the full backlog, flattens the story/sub-task tree and
//! creates a task for every requested ticket that is not on the board yet.
//! Tickets are matched to tasks by `jira_ticket_key`, so importing the same
//! keys again creates nothing.
//!
//! Each task insert commits on its own. An import that fails halfway leaves
//! the tasks created so far in place, and rerunning it picks up the rest.

use crate::error::Result;
use crate::jira::{JiraQuery, JiraTicket, TicketSource};
use crate::tasks::models::{NewTask, Task};
use crate::tasks::store::TaskStore;
use serde::Deserialize;
use std::collections::HashMap;

/// Which tickets to import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[cfg_attr(feature = "mcp", derive(schemars::JsonSchema))]
pub struct ImportRequest {
    /// Keys of the tickets to import, in the order they should be created.
    pub ticket_keys: Vec<String>,
    /// Also import the sub-tasks of each requested ticket.
    #[serde(default)]
    pub include_subtasks: bool,
}

/// A ticket hierarchy flattened into key order.
///
/// Each story is followed by its sub-tasks. Stored tickets have their
/// `subtasks` cleared; children are found through [`FlatTickets::children_of`].
#[derive(Debug, Clone, Default)]
pub struct FlatTickets {
    tickets: Vec<JiraTicket>,
    index: HashMap<String, usize>,
}

impl FlatTickets {
    /// Flatten a ticket tree depth-first.
    ///
    /// If a key appears more than once, the first occurrence wins.
    #[must_use]
    pub fn flatten(roots: Vec<JiraTicket>) -> Self {
        let mut flat = Self::default();
        for root in roots {
            flat.push(root);
        }
        flat
    }

    fn push(&mut self, mut ticket: JiraTicket) {
        let children = std::mem::take(&mut ticket.subtasks);
        if !self.index.contains_key(&ticket.key) {
            self.index.insert(ticket.key.clone(), self.tickets.len());
            self.tickets.push(ticket);
        }
        for child in children {
            self.push(child);
        }
    }

    /// Look up a ticket by key.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&JiraTicket> {
        self.index.get(key).and_then(|&i| self.tickets.get(i))
    }

    /// Tickets whose parent is `key`, in hierarchy order.
    pub fn children_of<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a JiraTicket> + 'a {
        self.tickets.iter().filter(move |t| t.parent_key.as_deref() == Some(key))
    }

    /// All tickets in hierarchy order.
    pub fn iter(&self) -> impl Iterator<Item = &JiraTicket> {
        self.tickets.iter()
    }

    /// Number of distinct tickets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Whether there are no tickets.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

fn new_task_from(ticket: &JiraTicket, parent_task_id: Option<i64>) -> NewTask {
    NewTask {
        title: ticket.title.clone(),
        description: ticket.description.clone(),
        jira_ticket_key: Some(ticket.key.clone()),
        assignee: ticket.assignee.clone(),
        project_key: Some(ticket.project_key.clone()),
        parent_task_id,
        start_date: ticket.start_date,
        due_date: ticket.due_date,
        jira_url: ticket.jira_url.clone(),
        ..NewTask::default()
    }
}

/// Import the requested tickets, returning the tasks that were created.
///
/// Requested keys are processed in order. A ticket already on the board is
/// not created again, but still serves as the parent of newly imported
/// sub-tasks. Keys missing from the backlog are skipped.
///
/// # Errors
///
/// Returns an error if the backlog cannot be fetched or a task cannot be
/// stored. Tasks created before the failure are kept.
pub fn import_tickets<S>(
    store: &S,
    source: &dyn TicketSource,
    request: &ImportRequest,
) -> Result<Vec<Task>>
where
    S: TaskStore + ?Sized,
{
    let flat = FlatTickets::flatten(source.fetch(&JiraQuery::default())?);
    let mut created = Vec::new();

    for key in &request.ticket_keys {
        let Some(ticket) = flat.get(key) else {
            tracing::warn!(%key, "ticket not in backlog, skipping");
            continue;
        };

        let parent_id = if let Some(existing) = store.find_task_by_ticket_key(key)? {
            tracing::debug!(%key, id = existing.id, "ticket already imported");
            existing.id
        } else {
            let task = store.create_task(new_task_from(ticket, None))?;
            let id = task.id;
            created.push(task);
            id
        };

        if !request.include_subtasks {
            continue;
        }

        for child in flat.children_of(key) {
            if store.find_task_by_ticket_key(&child.key)?.is_some() {
                continue;
            }
            created.push(store.create_task(new_task_from(child, Some(parent_id)))?);
        }
    }

    tracing::info!(
        requested = request.ticket_keys.len(),
        created = created.len(),
        include_subtasks = request.include_subtasks,
        "imported backlog tickets"
    );
    Ok(created)
}
