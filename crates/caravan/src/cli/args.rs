//! CLI argument structs for all commands.
//!
//! Each command has its own argument struct with clap derive attributes
//! for parsing and validation.

use clap::Parser;
use std::path::PathBuf;

/// Arguments for the `analyze` command
#[derive(Parser, Debug, Clone)]
pub struct AnalyzeArgs {
    /// Path to the asset inventory JSON file
    ///
    /// Either a top-level array of assets or an object with an `assets`
    /// array. Malformed entries are skipped with a warning.
    #[arg(short, long)]
    pub input: PathBuf,

    /// Optional engine configuration YAML file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `graph` command
#[derive(Parser, Debug, Clone)]
pub struct GraphArgs {
    /// Path to the asset inventory JSON file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Optional engine configuration YAML file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `waves` command
#[derive(Parser, Debug, Clone)]
pub struct WavesArgs {
    /// Path to the asset inventory JSON file
    #[arg(short, long)]
    pub input: PathBuf,

    /// Optional engine configuration YAML file
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}
