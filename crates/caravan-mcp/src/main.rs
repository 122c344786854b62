//! Caravan MCP server binary.
//!
//! This binary runs the MCP server using stdio transport.

use caravan_mcp::CaravanMcpServer;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing; stdout is reserved for the MCP transport.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Starting caravan-mcp server");

    // Create and run the server
    let server = CaravanMcpServer::new();
    server.run().await?;

    Ok(())
}
