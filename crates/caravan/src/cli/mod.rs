//! CLI argument parsing and command dispatch.
//!
//! This module provides the command-line interface for caravan using
//! clap's derive API.
//!
//! # Commands
//!
//! - `analyze`: Run the full dependency analysis over an asset inventory
//! - `graph`: Build and print the dependency graph only
//! - `waves`: Produce a phased migration wave plan
//!
//! # Global Flags
//!
//! - `--json`: Output in JSON format (applies to all commands)
//!
//! # Example
//!
//! ```bash
//! caravan analyze --input assets.json
//! caravan waves --input assets.json --json
//! caravan graph --input assets.json --config engine.yaml
//! ```

mod args;
mod execute;

use anyhow::Result;
use clap::{Parser, Subcommand};

// Re-export argument structs
pub use args::{AnalyzeArgs, GraphArgs, WavesArgs};

/// Caravan - dependency analysis and migration wave planning
///
/// Infers dependency relationships between discovered assets, detects
/// structural migration risks and produces a phased wave plan.
#[derive(Parser, Debug)]
#[command(name = "caravan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output in JSON format for programmatic use
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the full dependency analysis
    ///
    /// Extracts dependency signals, builds the graph, detects bottlenecks,
    /// circular dependencies and critical paths, and prints insights.
    Analyze(AnalyzeArgs),

    /// Build and print the dependency graph
    ///
    /// Runs signal extraction and graph construction without the
    /// structural analysis stages.
    Graph(GraphArgs),

    /// Produce a phased migration wave plan
    ///
    /// Runs the full analysis and partitions assets into ordered waves
    /// by structural risk.
    Waves(WavesArgs),
}

impl Cli {
    /// Parse CLI arguments from command line
    #[must_use]
    pub fn parse_args() -> Self {
        <Self as Parser>::parse()
    }

    /// Parse CLI arguments from an iterator (for testing)
    ///
    /// # Errors
    ///
    /// Returns a clap error when the arguments do not parse.
    pub fn try_parse_from<I, T>(iter: I) -> std::result::Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(iter)
    }

    /// Execute the CLI command
    ///
    /// # Errors
    ///
    /// Returns an error when the command fails.
    pub async fn execute(&self) -> Result<()> {
        use crate::output::OutputMode;

        let output_mode = if self.json {
            OutputMode::Json
        } else {
            OutputMode::Text
        };

        match &self.command {
            Some(Commands::Analyze(args)) => execute::execute_analyze(args, output_mode).await,
            Some(Commands::Graph(args)) => execute::execute_graph(args, output_mode).await,
            Some(Commands::Waves(args)) => execute::execute_waves(args, output_mode).await,
            None => {
                println!("Caravan dependency analysis");
                println!("Use --help for more information");
                Ok(())
            }
        }
    }
}
