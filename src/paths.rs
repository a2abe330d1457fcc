//! Where the board keeps its files.
//!
//! Board data lives in `~/.kanban-board/projects/<name>-<hash>/`, one
//! directory per project so that separate checkouts get separate boards.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// The base directory name for board data.
const DATA_DIR_NAME: &str = ".kanban-board";

/// The database filename.
pub const DATABASE_FILENAME: &str = "board.sqlite3";

/// The log filename.
pub const LOG_FILENAME: &str = "kanban.log";

/// Get the base data directory, `~/.kanban-board/`.
///
/// Returns `None` if the home directory cannot be determined.
#[must_use]
pub fn data_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(DATA_DIR_NAME))
}

/// Get the project-specific data directory.
///
/// Returns `~/.kanban-board/projects/<name>-<hash>/`, or `None` if the home
/// directory cannot be determined.
#[must_use]
pub fn project_data_dir(project_dir: &Path) -> Option<PathBuf> {
    let base = data_dir()?;
    Some(base.join("projects").join(create_project_dir_name(project_dir)))
}

/// Get the default database path for a project.
#[must_use]
pub fn project_db_path(project_dir: &Path) -> Option<PathBuf> {
    project_data_dir(project_dir).map(|dir| dir.join(DATABASE_FILENAME))
}

/// Get the log file path for a project.
#[must_use]
pub fn project_log_path(project_dir: &Path) -> Option<PathBuf> {
    project_data_dir(project_dir).map(|dir| dir.join(LOG_FILENAME))
}

/// Build `<project-name>-<hash>` for a project directory.
///
/// The readable prefix is the last path component; the hash of the full
/// canonical path keeps `/a/b-c` and `/a-b/c` apart.
fn create_project_dir_name(project_dir: &Path) -> String {
    let path_to_hash = project_dir.canonicalize().unwrap_or_else(|_| project_dir.to_path_buf());

    let prefix = path_to_hash.file_name().and_then(|n| n.to_str()).unwrap_or("project");
    let prefix: String =
        prefix.chars().map(|c| if c.is_alphanumeric() { c } else { '-' }).collect();
    let prefix = prefix.trim_matches('-');

    let hash = hash_path(&path_to_hash);

    format!("{prefix}-{hash:016x}")
}

fn hash_path(path: &Path) -> u64 {
    let mut hasher = DefaultHasher::new();
    path.hash(&mut hasher);
    hasher.finish()
}
