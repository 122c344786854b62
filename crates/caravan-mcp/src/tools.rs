//! MCP tool implementations.
//!
//! This module bridges the MCP parameter models to the engine's
//! `AnalysisTool` strategies. The engine is injected so alternative
//! configurations (or a differently tuned engine) can be served without
//! touching the protocol layer.

use crate::error::{Error, Result};
use crate::models::{AnalyzeParams, BuildGraphParams, PlanWavesParams};
use caravan::Engine;
use caravan::tool::{
    AnalysisTool as _, DependencyAnalysisTool, GraphBuildTool, WavePlanTool,
};
use serde_json::{Value, json};
use std::sync::Arc;

/// Tool implementations for the caravan MCP server.
pub struct Tools {
    analyze: DependencyAnalysisTool,
    graph: GraphBuildTool,
    waves: WavePlanTool,
}

impl Tools {
    /// Create a new Tools instance around a shared engine.
    #[must_use]
    pub fn new(engine: Arc<Engine>) -> Self {
        Self {
            analyze: DependencyAnalysisTool::new(Arc::clone(&engine)),
            graph: GraphBuildTool::new(Arc::clone(&engine)),
            waves: WavePlanTool::new(engine),
        }
    }

    /// Run the full dependency analysis.
    ///
    /// # Errors
    ///
    /// Does not error on malformed input; the engine soft-fails into a
    /// well-formed result with an `error` field instead.
    pub fn analyze(&self, params: AnalyzeParams) -> Result<Value> {
        let input = json!({ "assets": params.assets });
        Ok(self.analyze.run(&input)?)
    }

    /// Build a visualization-ready dependency graph.
    ///
    /// # Errors
    ///
    /// Returns an error when neither assets nor a graph are provided, or
    /// the provided graph does not parse.
    pub fn build_graph(&self, params: BuildGraphParams) -> Result<Value> {
        let mut input = serde_json::Map::new();
        if let Some(assets) = params.assets {
            input.insert("assets".to_string(), Value::Array(assets));
        }
        if let Some(graph) = params.dependency_graph {
            input.insert("dependency_graph".to_string(), graph);
        }
        Ok(self.graph.run(&Value::Object(input))?)
    }

    /// Plan migration waves from a graph and its structural findings.
    ///
    /// # Errors
    ///
    /// Returns an error when the graph or findings do not parse.
    pub fn plan_waves(&self, params: PlanWavesParams) -> Result<Value> {
        let input = serde_json::to_value(&params).map_err(Error::Json)?;
        Ok(self.waves.run(&input)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tools() -> Tools {
        Tools::new(Arc::new(Engine::default()))
    }

    #[test]
    fn test_analyze_empty_inventory() {
        let result = tools()
            .analyze(AnalyzeParams { assets: vec![] })
            .unwrap();
        assert_eq!(result["total_assets"], 0);
        assert!(result.get("error").is_none());
    }

    #[test]
    fn test_build_graph_requires_some_input() {
        let result = tools().build_graph(BuildGraphParams {
            assets: None,
            dependency_graph: None,
        });
        assert!(result.is_err());
    }
}
