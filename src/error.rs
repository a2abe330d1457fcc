//! Error types for `kanban_board`.

/// Errors that can occur while operating the board.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A JSON parsing error occurred.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A YAML parsing error occurred.
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// A `SQLite` database error occurred.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// The request was rejected before reaching the database.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// A task referenced by the request does not exist.
    #[error("Task not found: {0}")]
    TaskNotFound(i64),

    /// The ticket source could not produce tickets.
    #[error("Ticket source error: {0}")]
    TicketSource(String),
}

impl Error {
    /// Whether the error was caused by the caller rather than the system.
    ///
    /// Surfaces report client errors as bad input and everything else as an
    /// internal failure.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::TaskNotFound(_))
    }
}

/// A specialized Result type for this crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_errors() {
        assert!(Error::Validation("title must not be blank".to_string()).is_client_error());
        assert!(Error::TaskNotFound(7).is_client_error());
        assert!(!Error::TicketSource("offline".to_string()).is_client_error());
        assert!(!Error::Database(rusqlite::Error::QueryReturnedNoRows).is_client_error());
    }

    #[test]
    fn test_display() {
        assert_eq!(Error::TaskNotFound(42).to_string(), "Task not found: 42");
        assert_eq!(
            Error::Validation("title must not be blank".to_string()).to_string(),
            "Invalid input: title must not be blank"
        );
    }
}
