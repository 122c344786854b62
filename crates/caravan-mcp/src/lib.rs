//! MCP server for caravan dependency analysis.
//!
//! This crate provides an MCP (Model Context Protocol) server that exposes
//! caravan's dependency analysis and wave planning tools to AI assistants.
//!
//! # Architecture
//!
//! The server uses the `rmcp` crate for MCP protocol handling and wraps
//! the `AnalysisTool` strategies from the caravan crate. The engine is
//! injected at construction, so configuration belongs to whoever starts
//! the server.
//!
//! # Tools
//!
//! - `analyze_dependencies` - Full analysis: signals, graph, structural
//!   findings and insights
//! - `build_dependency_graph` - Graph construction with visualization
//!   hints
//! - `plan_migration_waves` - Phased wave planning from analysis output

pub mod error;
pub mod models;
pub mod server;
pub mod tools;

pub use error::{Error, Result};
pub use server::CaravanMcpServer;
