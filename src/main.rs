//! CLI binary for the kanban board.
//!
//! This binary is a thin wrapper that parses arguments and delegates to the library.

use std::process::ExitCode;

use clap::Parser;
use kanban_board::cli::{run, Cli};
use kanban_board::config::{BoardConfig, DEFAULT_LOG_LEVEL};
use kanban_board::{logging, paths};

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Ok(project_dir) = std::env::current_dir() {
        let level = BoardConfig::load_or_default(&project_dir)
            .map_or_else(|_| DEFAULT_LOG_LEVEL.to_string(), |c| c.log_level);
        if let Err(e) = logging::init(paths::project_log_path(&project_dir).as_deref(), &level) {
            eprintln!("Warning: logging init failed: {e}");
        }
    }
    logging::install_panic_hook();

    let output = run(cli.command);

    for msg in output.stdout {
        println!("{msg}");
    }
    for msg in output.stderr {
        eprintln!("{msg}");
    }

    output.exit_code
}
