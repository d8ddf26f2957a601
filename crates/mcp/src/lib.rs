//! Ledgerly MCP server.
//!
//! Model Context Protocol server exposing the record stores to AI clients
//! over stdio. Thin glue only: tool handlers deserialize arguments, invoke
//! store operations and serialize the results.
//!
//! Provides 9 MCP tools:
//! - `add_client` / `get_client` / `search_clients` / `list_all_clients`
//! - `create_invoice` / `get_invoice` / `list_invoices` /
//!   `update_invoice_status`
//! - `dashboard`

mod error;
mod protocol;
mod server;
mod tools;

pub use error::McpError;
pub use server::McpServer;
