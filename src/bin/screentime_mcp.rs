//! Screen Time MCP Server Binary
//!
//! Speaks MCP over stdio. stdout is the protocol channel, so all
//! diagnostics go to stderr.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=debug ./target/release/screentime_mcp
//! ```

use anyhow::Result;
use tracing_subscriber::EnvFilter;

use screen_time_mcp::McpServer;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    McpServer::new().run().await
}
