//! Ledgerly MCP server - main entry point.

use std::env;
use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use ledgerly_mcp::McpServer;

fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the protocol stream.
    ledgerly_observability::init();

    let data_dir: PathBuf = env::var("LEDGERLY_DATA_DIR")
        .unwrap_or_else(|_| "data".to_string())
        .into();
    info!(data_dir = %data_dir.display(), "starting MCP server");

    let mut server = McpServer::new(&data_dir);
    server
        .run()
        .with_context(|| format!("MCP server failed (data dir {})", data_dir.display()))?;
    Ok(())
}
