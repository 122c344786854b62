//! Tool interface for orchestration frameworks.
//!
//! The engine is exposed to external planners as a set of named tools
//! accepting and returning JSON values. The trait deliberately carries no
//! framework types: whether a tool is registered with an agent runtime, an
//! MCP server or a CLI is the caller's concern and handled by dependency
//! injection.

use crate::domain::{Asset, Bottleneck, CircularDependency, DependencyGraph};
use crate::engine::Engine;
use crate::error::{Error, Result};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::warn;

/// A synchronous, JSON-in/JSON-out analysis capability.
pub trait AnalysisTool: Send + Sync {
    /// Stable tool name.
    fn name(&self) -> &'static str;

    /// One-line description for tool listings.
    fn description(&self) -> &'static str;

    /// Run the tool on a JSON input.
    ///
    /// # Errors
    ///
    /// Returns an error when the input shape is invalid, except where the
    /// tool's contract requires a soft-fail result instead.
    fn run(&self, input: &Value) -> Result<Value>;
}

/// The standard tool set, sharing one engine.
#[must_use]
pub fn standard_tools(engine: Arc<Engine>) -> Vec<Box<dyn AnalysisTool>> {
    vec![
        Box::new(DependencyAnalysisTool::new(Arc::clone(&engine))),
        Box::new(GraphBuildTool::new(Arc::clone(&engine))),
        Box::new(WavePlanTool::new(engine)),
    ]
}

/// Full analysis: extract signals, build the graph, analyze structure and
/// generate insights.
pub struct DependencyAnalysisTool {
    engine: Arc<Engine>,
}

impl DependencyAnalysisTool {
    /// Create the tool around a shared engine.
    #[must_use]
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }
}

impl AnalysisTool for DependencyAnalysisTool {
    fn name(&self) -> &'static str {
        "analyze_dependencies"
    }

    fn description(&self) -> &'static str {
        "Infer dependency relationships between assets, build the dependency graph and detect structural migration risks"
    }

    /// Never returns an error: failures are converted into the soft-fail
    /// result shape with the message in the `error` field.
    fn run(&self, input: &Value) -> Result<Value> {
        let result = match parse_assets(input) {
            Ok(assets) => self.engine.analyze(&assets),
            Err(e) => Engine::soft_fail(0, e.to_string()),
        };
        serde_json::to_value(&result)
            .or_else(|e| serde_json::to_value(Engine::soft_fail(0, e.to_string())).map_err(Error::Json))
    }
}

/// Graph construction only, augmented with visualization hints.
pub struct GraphBuildTool {
    engine: Arc<Engine>,
}

impl GraphBuildTool {
    /// Create the tool around a shared engine.
    #[must_use]
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }
}

impl AnalysisTool for GraphBuildTool {
    fn name(&self) -> &'static str {
        "build_dependency_graph"
    }

    fn description(&self) -> &'static str {
        "Build a visualization-ready dependency graph from assets or pass through an existing graph"
    }

    fn run(&self, input: &Value) -> Result<Value> {
        let graph = if let Some(existing) = input.get("dependency_graph") {
            serde_json::from_value::<DependencyGraph>(existing.clone())
                .map_err(|e| Error::InvalidInput(format!("invalid dependency_graph: {e}")))?
        } else {
            let assets = parse_assets(input)?;
            self.engine.build_graph(&assets)
        };

        let mut value = serde_json::to_value(&graph)?;
        if let Some(object) = value.as_object_mut() {
            object.insert("layout".to_string(), json!("hierarchical"));
            object.insert("visualization_ready".to_string(), json!(true));
        }
        Ok(value)
    }
}

/// Wave planning from a graph and its structural findings.
pub struct WavePlanTool {
    engine: Arc<Engine>,
}

impl WavePlanTool {
    /// Create the tool around a shared engine.
    #[must_use]
    pub fn new(engine: Arc<Engine>) -> Self {
        Self { engine }
    }
}

/// Input shape for [`WavePlanTool`].
#[derive(Debug, Deserialize)]
struct WavePlanInput {
    dependency_graph: DependencyGraph,

    #[serde(default)]
    bottlenecks: Vec<Bottleneck>,

    #[serde(default)]
    circular_dependencies: Vec<CircularDependency>,
}

impl AnalysisTool for WavePlanTool {
    fn name(&self) -> &'static str {
        "plan_migration_waves"
    }

    fn description(&self) -> &'static str {
        "Partition assets into ordered migration waves based on structural risk"
    }

    fn run(&self, input: &Value) -> Result<Value> {
        let input: WavePlanInput = serde_json::from_value(input.clone())
            .map_err(|e| Error::InvalidInput(format!("invalid wave planning input: {e}")))?;
        let plan = self.engine.plan_waves(
            &input.dependency_graph,
            &input.bottlenecks,
            &input.circular_dependencies,
        );
        Ok(serde_json::to_value(&plan)?)
    }
}

/// Parse the `assets` array leniently.
///
/// Individual malformed entries are skipped with a warning rather than
/// failing the batch; a missing or non-array `assets` field is a
/// batch-level error.
pub(crate) fn parse_assets(input: &Value) -> Result<Vec<Asset>> {
    let entries = input
        .get("assets")
        .and_then(Value::as_array)
        .ok_or_else(|| Error::InvalidInput("expected an 'assets' array".to_string()))?;

    let mut assets = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match serde_json::from_value::<Asset>(entry.clone()) {
            Ok(asset) => assets.push(asset),
            Err(e) => warn!(index, error = %e, "skipping malformed asset"),
        }
    }
    Ok(assets)
}
