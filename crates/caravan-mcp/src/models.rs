//! MCP parameter models.
//!
//! These types describe the tool inputs for MCP clients. Asset and graph
//! payloads stay as raw JSON values: the engine parses them leniently and
//! soft-fails on malformed input, so the schema layer must not reject a
//! batch that the engine would accept partially.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Parameters for the `analyze_dependencies` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalyzeParams {
    /// The asset inventory to analyze.
    pub assets: Vec<Value>,
}

/// Parameters for the `build_dependency_graph` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct BuildGraphParams {
    /// Assets to build the graph from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assets: Option<Vec<Value>>,

    /// An existing graph to augment instead of building one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_graph: Option<Value>,
}

/// Parameters for the `plan_migration_waves` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct PlanWavesParams {
    /// The dependency graph to plan over.
    pub dependency_graph: Value,

    /// Bottlenecks from a prior analysis.
    #[serde(default)]
    pub bottlenecks: Vec<Value>,

    /// Circular dependencies from a prior analysis.
    #[serde(default)]
    pub circular_dependencies: Vec<Value>,
}
