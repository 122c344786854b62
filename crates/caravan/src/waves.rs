//! Migration wave planning.
//!
//! Partitions assets into ordered waves by structural risk: independent
//! nodes first, then low-dependency nodes, then bottlenecks, then circular
//! groups as atomic units. Empty waves are omitted and the emitted waves
//! are numbered contiguously from 1.

use crate::config::EngineConfig;
use crate::domain::{
    Bottleneck, CircularDependency, DependencyGraph, MigrationWave, RiskLevel, WavePlan,
};
use std::collections::HashSet;
use tracing::debug;

/// Plans migration waves from structural analysis output.
pub struct WavePlanner<'a> {
    config: &'a EngineConfig,
}

impl<'a> WavePlanner<'a> {
    /// Create a planner using the given configuration.
    #[must_use]
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Partition the graph's assets into ordered waves.
    ///
    /// Cycle members land exclusively in the circular-dependency wave,
    /// regardless of their degree or bottleneck status.
    #[must_use]
    pub fn plan(
        &self,
        graph: &DependencyGraph,
        bottlenecks: &[Bottleneck],
        circular_dependencies: &[CircularDependency],
    ) -> WavePlan {
        let connected: HashSet<&str> = graph
            .edges
            .iter()
            .flat_map(|e| [e.source_node_id.as_str(), e.target_node_id.as_str()])
            .collect();
        let bottleneck_ids: HashSet<&str> =
            bottlenecks.iter().map(|b| b.node_id.as_str()).collect();
        let cycle_members: HashSet<&str> = circular_dependencies
            .iter()
            .flat_map(|c| c.nodes.iter().map(String::as_str))
            .collect();

        let independent: Vec<String> = graph
            .nodes
            .iter()
            .filter(|n| !connected.contains(n.id.as_str()) && !cycle_members.contains(n.id.as_str()))
            .map(|n| n.label.clone())
            .collect();

        let low_dependency: Vec<String> = graph
            .nodes
            .iter()
            .filter(|n| {
                connected.contains(n.id.as_str())
                    && !bottleneck_ids.contains(n.id.as_str())
                    && !cycle_members.contains(n.id.as_str())
            })
            .map(|n| n.label.clone())
            .collect();

        let critical: Vec<String> = bottlenecks
            .iter()
            .filter(|b| !cycle_members.contains(b.node_id.as_str()))
            .take(self.config.bottleneck_wave_limit)
            .map(|b| b.node_name.clone())
            .collect();

        let mut waves = Vec::new();

        if !independent.is_empty() {
            let count = independent.len();
            waves.push(wave(
                "Independent Components",
                independent,
                count,
                RiskLevel::Low,
                "Migrate in parallel; these assets have no discovered dependencies",
            ));
        }

        if !low_dependency.is_empty() {
            let count = low_dependency.len();
            let mut labels = low_dependency;
            labels.truncate(self.config.wave_display_limit);
            waves.push(wave(
                "Low Dependency Components",
                labels,
                count,
                RiskLevel::Medium,
                "Migrate in small batches once wave 1 is verified",
            ));
        }

        if !critical.is_empty() {
            let count = critical.len();
            waves.push(wave(
                "Critical Dependencies",
                critical,
                count,
                RiskLevel::High,
                "Migrate sequentially with validation between each asset",
            ));
        }

        if !circular_dependencies.is_empty() {
            let labels: Vec<String> = (1..=circular_dependencies.len())
                .map(|n| format!("Group {n}"))
                .collect();
            waves.push(wave(
                "Circular Dependency Groups",
                labels,
                2 * circular_dependencies.len(),
                RiskLevel::High,
                "Migrate each group as one atomic cutover",
            ));
        }

        for (index, wave) in waves.iter_mut().enumerate() {
            wave.wave_number = index + 1;
        }

        let risk_assessment = if bottlenecks.is_empty() && circular_dependencies.is_empty() {
            RiskLevel::Medium
        } else {
            RiskLevel::High
        };

        debug!(waves = waves.len(), risk = %risk_assessment, "wave plan complete");

        WavePlan {
            total_waves: waves.len(),
            estimated_duration: format!("{} weeks", 2 * waves.len()),
            risk_assessment,
            migration_waves: waves,
        }
    }
}

fn wave(
    name: &str,
    asset_labels: Vec<String>,
    asset_count: usize,
    risk: RiskLevel,
    strategy: &str,
) -> MigrationWave {
    MigrationWave {
        wave_number: 0, // renumbered after empty waves are dropped
        name: name.to_string(),
        asset_labels,
        asset_count,
        risk,
        strategy: strategy.to_string(),
    }
}
