//! MCP (Model Context Protocol) server for the board.

#[cfg(feature = "mcp")]
pub mod board_server;

#[cfg(feature = "mcp")]
pub use board_server::BoardServer;
