//! Caravan CLI binary.

use anyhow::Result;
use caravan::cli::Cli;
use tracing_subscriber::EnvFilter;

/// Main entry point for the caravan CLI.
///
/// Uses tokio's current_thread runtime; the engine itself is synchronous
/// and only file loading is async.
#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    // Can be controlled via RUST_LOG environment variable
    // Example: RUST_LOG=caravan=debug cargo run
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("caravan=info")),
        )
        .with_target(false)
        .init();

    tracing::debug!("Starting caravan CLI");

    let cli = Cli::parse_args();
    cli.execute().await?;

    tracing::debug!("Caravan CLI completed successfully");
    Ok(())
}
