//! Migration insight generation.
//!
//! Turns structural findings into human-readable insights with severity
//! and recommendation text. Rules fire in a fixed order and each is
//! optional; an empty analysis produces no insights.

use crate::config::EngineConfig;
use crate::domain::{
    DependencyGraph, InsightKind, MigrationInsight, RiskLevel, StructuralAnalysis,
};

/// Generates migration insights from structural analysis output.
pub struct InsightGenerator<'a> {
    config: &'a EngineConfig,
}

impl<'a> InsightGenerator<'a> {
    /// Create a generator using the given configuration.
    #[must_use]
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Evaluate all insight rules in order.
    #[must_use]
    pub fn generate(
        &self,
        graph: &DependencyGraph,
        analysis: &StructuralAnalysis,
    ) -> Vec<MigrationInsight> {
        let mut insights = Vec::new();

        if let Some(top) = analysis.bottlenecks.first() {
            insights.push(MigrationInsight {
                kind: InsightKind::Bottleneck,
                severity: RiskLevel::High,
                message: format!(
                    "'{}' is a dependency bottleneck with {} connections ({} inbound, {} outbound)",
                    top.node_name, top.total, top.incoming, top.outgoing
                ),
                recommendation: format!(
                    "Migrate '{}' in a dedicated window and re-validate every dependent service afterwards",
                    top.node_name
                ),
                affected_assets: vec![top.node_name.clone()],
            });
        }

        if !analysis.circular_dependencies.is_empty() {
            let affected: Vec<String> = analysis
                .circular_dependencies
                .iter()
                .flat_map(|cycle| cycle.nodes.iter())
                .map(|id| graph.label_of(id))
                .collect();
            insights.push(MigrationInsight {
                kind: InsightKind::CircularDependency,
                severity: RiskLevel::High,
                message: format!(
                    "{} circular dependency pair(s) detected between assets",
                    analysis.circular_dependencies.len()
                ),
                recommendation:
                    "Break each cycle before migration, or treat each pair as a single atomic migration unit"
                        .to_string(),
                affected_assets: affected,
            });
        }

        if graph.node_count > 0 {
            if graph.density < self.config.low_coupling_density {
                insights.push(MigrationInsight {
                    kind: InsightKind::LowCoupling,
                    severity: RiskLevel::Low,
                    message: format!(
                        "Dependency density is {:.3}; assets are loosely coupled",
                        graph.density
                    ),
                    recommendation:
                        "Most assets can be migrated independently; group waves by environment or department for convenience"
                            .to_string(),
                    affected_assets: Vec::new(),
                });
            } else if graph.density > self.config.high_coupling_density {
                insights.push(MigrationInsight {
                    kind: InsightKind::HighCoupling,
                    severity: RiskLevel::High,
                    message: format!(
                        "Dependency density is {:.3}; assets are tightly coupled",
                        graph.density
                    ),
                    recommendation:
                        "Plan for extensive integration testing and prefer a small number of large waves"
                            .to_string(),
                    affected_assets: Vec::new(),
                });
            }
        }

        // First strictly-longer path wins so ties resolve deterministically.
        let longest = analysis
            .critical_paths
            .iter()
            .reduce(|best, path| if path.length > best.length { path } else { best });
        if let Some(path) = longest {
            insights.push(MigrationInsight {
                kind: InsightKind::CriticalPath,
                severity: RiskLevel::Medium,
                message: format!(
                    "Longest dependency chain spans {} assets from '{}' to '{}'",
                    path.length, path.start_label, path.end_label
                ),
                recommendation: format!(
                    "Migrate this chain in dependency order, starting from '{}'",
                    path.start_label
                ),
                affected_assets: path.node_sequence.clone(),
            });
        }

        insights
    }
}
