//! Caravan - dependency analysis and migration wave planning.
//!
//! Given a collection of discovered infrastructure and application assets,
//! this crate infers dependency relationships, builds a dependency graph,
//! detects structural risk patterns (bottlenecks, circular dependencies,
//! long critical chains) and produces a phased migration-wave plan.
//!
//! The engine is stateless, synchronous and pure: concurrent invocations
//! need no locking, and re-running on identical input yields identical
//! output apart from the analysis timestamp.

#![forbid(unsafe_code)]

// Public modules for library usage
pub mod analysis;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod graph;
pub mod id;
pub mod insights;
pub mod signals;
pub mod tool;
pub mod waves;

// Public CLI modules (needed by binary)
pub mod cli;
pub mod output;

pub use config::EngineConfig;
pub use engine::Engine;
pub use error::{Error, Result};
pub use tool::{AnalysisTool, standard_tools};
