//! External ticket source.
//!
//! The board never talks to a real tracker. [`TicketSource`] is the seam a
//! real client would plug into; [`SyntheticTicketSource`] fabricates a fixed
//! backlog behind it.

pub mod models;
pub mod synthetic;

pub use models::{JiraQuery, JiraTicket, TYPE_BUG, TYPE_STORY, TYPE_SUBTASK};
pub use synthetic::SyntheticTicketSource;

use crate::error::Result;

/// Something that can answer backlog queries.
pub trait TicketSource {
    /// Fetch the ticket hierarchy matching `query`.
    ///
    /// Top-level tickets are returned in tracker order with their sub-tasks
    /// nested under `subtasks`.
    ///
    /// # Errors
    ///
    /// Returns an error if the tracker cannot be queried.
    fn fetch(&self, query: &JiraQuery) -> Result<Vec<JiraTicket>>;
}
