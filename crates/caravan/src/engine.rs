//! Analysis engine orchestration.
//!
//! The engine wires the pipeline together: signal extractors feed the
//! graph builder, the structural analyzer consumes the graph, and the
//! insight generator and wave planner consume the analyzer's output. Every
//! stage is a pure function of its inputs; the engine holds only
//! configuration and is safe to share across threads.

use crate::analysis::StructuralAnalyzer;
use crate::config::EngineConfig;
use crate::domain::{
    Asset, Bottleneck, CircularDependency, DependencyAnalysisResult, DependencyGraph, WavePlan,
};
use crate::graph::GraphBuilder;
use crate::insights::InsightGenerator;
use crate::signals::{
    ConfigurationExtractor, DataFlowExtractor, NetworkExtractor, ServiceExtractor,
    SignalExtractor as _,
};
use crate::waves::WavePlanner;
use chrono::Utc;
use tracing::debug;

/// The dependency analysis and wave planning engine.
///
/// Stateless and idempotent for a fixed input: re-running produces
/// identical output except for the analysis timestamp.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    config: EngineConfig,
}

impl Engine {
    /// Create an engine with the given configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self { config }
    }

    /// The engine's configuration.
    #[must_use]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Run the full analysis pipeline over an asset collection.
    #[must_use]
    pub fn analyze(&self, assets: &[Asset]) -> DependencyAnalysisResult {
        debug!(assets = assets.len(), "starting dependency analysis");

        let network = NetworkExtractor.extract(assets);
        let configuration = ConfigurationExtractor.extract(assets);
        let data = DataFlowExtractor::new(self.config.data_flow_confidence).extract(assets);
        let service = ServiceExtractor.extract(assets);

        let graph = GraphBuilder::new(&self.config)
            .build(assets, &network, &configuration, &data, &service);
        let analysis = StructuralAnalyzer::new(&self.config).analyze(&graph);
        let insights = InsightGenerator::new(&self.config).generate(&graph, &analysis);

        DependencyAnalysisResult {
            total_assets: assets.len(),
            dependency_graph: graph,
            network_dependencies: network,
            configuration_dependencies: configuration,
            data_dependencies: data,
            service_dependencies: service,
            critical_paths: analysis.critical_paths,
            bottlenecks: analysis.bottlenecks,
            circular_dependencies: analysis.circular_dependencies,
            migration_insights: insights,
            analysis_timestamp: Utc::now().to_rfc3339(),
            error: None,
        }
    }

    /// Build the dependency graph without the structural analysis stages.
    #[must_use]
    pub fn build_graph(&self, assets: &[Asset]) -> DependencyGraph {
        let network = NetworkExtractor.extract(assets);
        let configuration = ConfigurationExtractor.extract(assets);
        let data = DataFlowExtractor::new(self.config.data_flow_confidence).extract(assets);
        let service = ServiceExtractor.extract(assets);

        GraphBuilder::new(&self.config).build(assets, &network, &configuration, &data, &service)
    }

    /// Plan migration waves from a graph and its structural findings.
    #[must_use]
    pub fn plan_waves(
        &self,
        graph: &DependencyGraph,
        bottlenecks: &[Bottleneck],
        circular_dependencies: &[CircularDependency],
    ) -> WavePlan {
        WavePlanner::new(&self.config).plan(graph, bottlenecks, circular_dependencies)
    }

    /// The well-formed soft-fail result shape.
    ///
    /// Unexpected failures never propagate to callers as errors; they are
    /// converted into this shape with the message in `error` and every
    /// list-valued field empty.
    #[must_use]
    pub fn soft_fail(total_assets: usize, message: impl Into<String>) -> DependencyAnalysisResult {
        DependencyAnalysisResult {
            total_assets,
            dependency_graph: DependencyGraph::default(),
            network_dependencies: Vec::new(),
            configuration_dependencies: Vec::new(),
            data_dependencies: Vec::new(),
            service_dependencies: Vec::new(),
            critical_paths: Vec::new(),
            bottlenecks: Vec::new(),
            circular_dependencies: Vec::new(),
            migration_insights: Vec::new(),
            analysis_timestamp: Utc::now().to_rfc3339(),
            error: Some(message.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(id: &str, asset_type: &str) -> Asset {
        Asset {
            id: id.to_string(),
            name: id.to_string(),
            asset_type: asset_type.to_string(),
            ..Asset::default()
        }
    }

    #[test]
    fn test_analyze_empty_collection() {
        let result = Engine::default().analyze(&[]);
        assert_eq!(result.total_assets, 0);
        assert_eq!(result.dependency_graph.node_count, 0);
        assert!(result.migration_insights.is_empty());
        assert!(result.error.is_none());
    }

    #[test]
    fn test_analyze_carries_all_extractor_outputs() {
        let mut app = asset("app1", "application");
        app.dependencies = vec!["db1".to_string()];
        app.environment = "production".to_string();
        app.technology_stack = Some("Java, PostgreSQL".to_string());
        let mut db = asset("db1", "database");
        db.environment = "production".to_string();
        let lb = asset("lb1", "load_balancer");

        let result = Engine::default().analyze(&[db, app, lb]);

        assert_eq!(result.total_assets, 3);
        assert_eq!(result.network_dependencies.len(), 1);
        assert_eq!(result.configuration_dependencies.len(), 2);
        assert_eq!(result.data_dependencies.len(), 1);
        // lb1 as traffic distributor, db1 and app1 as production services.
        assert_eq!(result.service_dependencies.len(), 3);
        assert_eq!(result.dependency_graph.edge_count, 1);
    }

    #[test]
    fn test_soft_fail_shape() {
        let result = Engine::soft_fail(2, "boom");
        assert_eq!(result.total_assets, 2);
        assert_eq!(result.error.as_deref(), Some("boom"));
        assert!(result.bottlenecks.is_empty());
        assert!(result.dependency_graph.nodes.is_empty());

        let json = serde_json::to_value(&result).unwrap();
        assert_eq!(json["error"], "boom");
        assert!(json["migration_insights"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_error_field_absent_on_success() {
        let json = serde_json::to_value(Engine::default().analyze(&[])).unwrap();
        assert!(json.get("error").is_none());
    }
}
