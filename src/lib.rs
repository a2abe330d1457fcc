//! # `kanban_board`
//!
//! A kanban task board on `SQLite` that imports tickets from an external
//! backlog, exposed as a CLI and an MCP server.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod jira;
pub mod logging;
pub mod mcp;
pub mod paths;
pub mod tasks;

pub use error::{Error, Result};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_exists() {
        assert!(!VERSION.is_empty());
    }
}
