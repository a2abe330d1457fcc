//! Logging setup.
//!
//! Everything logs through `tracing`. The binaries install a `fmt`
//! subscriber that appends to `kanban.log` in the project data directory,
//! because the MCP server owns stdout and the CLI keeps stdout for JSON.

use std::fs::{self, OpenOptions};
use std::panic;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Maximum log file size before rotation (1MB).
const MAX_LOG_SIZE: u64 = 1_048_576;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `default_filter`. With `log_path` set, output is
/// appended to that file (rotating it to `.log.old` first if it has grown
/// past 1MB); otherwise it goes to stderr. Calling this twice keeps the first
/// subscriber. A failed rotation or a second subscriber is reported on
/// stderr and does not fail the call.
///
/// # Errors
///
/// Returns an error if the log directory or file cannot be created.
pub fn init(log_path: Option<&Path>, default_filter: &str) -> std::io::Result<()> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let Some(path) = log_path else {
        if let Err(e) =
            tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).try_init()
        {
            eprintln!("Warning: keeping existing log subscriber: {e}");
        }
        return Ok(());
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    if let Err(e) = rotate_if_large(path) {
        eprintln!("Warning: could not rotate {}: {e}", path.display());
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
    {
        eprintln!("Warning: keeping existing log subscriber: {e}");
    }

    tracing::info!(log = %path.display(), "logging initialised");
    Ok(())
}

/// Move `path` to `.log.old` once it passes `MAX_LOG_SIZE`. Returns whether
/// it moved. A missing log is not an error.
fn rotate_if_large(path: &Path) -> std::io::Result<bool> {
    let Ok(metadata) = fs::metadata(path) else {
        return Ok(false);
    };
    if metadata.len() <= MAX_LOG_SIZE {
        return Ok(false);
    }
    fs::rename(path, path.with_extension("log.old"))?;
    Ok(true)
}

/// Install a panic hook that records panics in the log before delegating to
/// the previous hook.
pub fn install_panic_hook() {
    let original_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        log_panic(info);
        original_hook(info);
    }));
}

#[allow(deprecated)] // PanicInfo is deprecated but PanicHookInfo requires Rust 1.81+
fn log_panic(info: &panic::PanicInfo<'_>) {
    let location = format_panic_location(info.location());

    let payload = info
        .payload()
        .downcast_ref::<&str>()
        .map(|s| (*s).to_string())
        .or_else(|| info.payload().downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown panic payload".to_string());

    tracing::error!(%location, "panic: {payload}");
}

fn format_panic_location(location: Option<&panic::Location<'_>>) -> String {
    location.map_or_else(
        || "unknown".to_string(),
        |loc| format!("{}:{}:{}", loc.file(), loc.line(), loc.column()),
    )
}
