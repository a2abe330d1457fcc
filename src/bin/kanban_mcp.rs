//! MCP server binary for the kanban board.
//!
//! Serves the board of the current directory over stdio.

use kanban_board::config::BoardConfig;
use kanban_board::mcp::BoardServer;
use kanban_board::{logging, paths};
use rmcp::ServiceExt;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let project_dir = std::env::current_dir()?;

    // stdout belongs to the transport, so logs go to a file
    let config = BoardConfig::load_or_default(&project_dir)?;
    let log_path = paths::project_log_path(&project_dir);
    if let Err(e) = logging::init(log_path.as_deref(), &config.log_level) {
        eprintln!("Warning: logging init failed: {e}");
    }
    logging::install_panic_hook();

    let server = BoardServer::for_project(&project_dir)?;
    tracing::info!(project = %project_dir.display(), "starting stdio transport");
    let service = server.serve(rmcp::transport::stdio()).await?;
    tracing::info!("MCP server running");
    service.waiting().await?;

    tracing::info!("MCP server stopped");
    Ok(())
}
