//! Domain types for dependency analysis and wave planning.
//!
//! This module contains the core domain types shared by the signal
//! extractors, the graph builder, the structural analyzer and the wave
//! planner. All types serialize with the exact wire field names expected
//! by external callers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A discovered infrastructure or application asset.
///
/// Assets arrive wholesale per analysis call and are never mutated by the
/// engine. Every field defaults when absent so a sparsely populated record
/// degrades to "no signal" instead of failing the batch.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Asset {
    /// Stable identifier.
    #[serde(default)]
    pub id: String,

    /// Human-readable name.
    #[serde(default)]
    pub name: String,

    /// Enum-like type string (application, database, load_balancer, ...).
    #[serde(default)]
    pub asset_type: String,

    /// Deployment environment (e.g. production, staging).
    #[serde(default)]
    pub environment: String,

    /// Owning department.
    #[serde(default)]
    pub department: String,

    /// Owning person or team.
    #[serde(default)]
    pub owner: String,

    /// IP address, if discovered.
    #[serde(default)]
    pub ip_address: Option<String>,

    /// Free-text technology stack description.
    #[serde(default)]
    pub technology_stack: Option<String>,

    /// Explicit references to other assets (names or identifiers).
    #[serde(default)]
    pub dependencies: Vec<String>,

    /// Arbitrary key/value attributes from discovery.
    ///
    /// Kept in a `BTreeMap` so key iteration order is stable across runs.
    #[serde(default)]
    pub custom_attributes: BTreeMap<String, serde_json::Value>,

    /// Business criticality rating.
    #[serde(default)]
    pub business_criticality: String,
}

impl Asset {
    /// Case-insensitive check of the asset type.
    #[must_use]
    pub fn type_is(&self, kind: &str) -> bool {
        self.asset_type.eq_ignore_ascii_case(kind)
    }

    /// Whether the asset's environment is a production environment.
    #[must_use]
    pub fn is_production(&self) -> bool {
        let env = self.environment.to_lowercase();
        env == "production" || env == "prod"
    }
}

/// Risk grading shared by bottlenecks, cycles, paths, insights and waves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    /// High risk.
    High,

    /// Medium risk.
    Medium,

    /// Low risk.
    Low,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::High => write!(f, "high"),
            Self::Medium => write!(f, "medium"),
            Self::Low => write!(f, "low"),
        }
    }
}

/// Kind of relationship an edge represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgeKind {
    /// Reachable endpoint or explicit reference.
    Network,

    /// Application reads from / writes to a data store.
    DataFlow,

    /// Role inferred from configuration.
    Configuration,

    /// Service-level dependency.
    Service,
}

impl fmt::Display for EdgeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::DataFlow => write!(f, "data_flow"),
            Self::Configuration => write!(f, "configuration"),
            Self::Service => write!(f, "service"),
        }
    }
}

/// A node in the dependency graph, one per input asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphNode {
    /// Asset identifier.
    pub id: String,

    /// Display label (asset name).
    pub label: String,

    /// Asset type string.
    #[serde(rename = "type")]
    pub kind: String,

    /// Deployment environment.
    pub environment: String,

    /// Business criticality rating.
    pub criticality: String,

    /// Ownership and stack details carried for visualization.
    pub metadata: NodeMetadata,
}

/// Ownership and stack details attached to a graph node.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeMetadata {
    /// Owning department.
    pub department: String,

    /// Owning person or team.
    pub owner: String,

    /// Free-text technology stack, if known.
    pub technology_stack: Option<String>,
}

/// A confidence-weighted directed edge between two graph nodes.
///
/// Direction follows the inferred producer → consumer relationship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphEdge {
    /// Deterministic edge identifier.
    pub id: String,

    /// Source node id.
    pub source_node_id: String,

    /// Target node id.
    pub target_node_id: String,

    /// Relationship kind.
    pub edge_type: EdgeKind,

    /// Human-readable description of the evidence.
    pub label: String,

    /// Inference confidence in `[0, 1]`.
    pub confidence: f64,
}

/// The fused dependency graph.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DependencyGraph {
    /// One node per input asset, in input order.
    pub nodes: Vec<GraphNode>,

    /// Deduplicated, confidence-weighted edges.
    pub edges: Vec<GraphEdge>,

    /// Number of nodes.
    pub node_count: usize,

    /// Number of edges.
    pub edge_count: usize,

    /// `edges / (nodes * (nodes - 1))` for more than one node, else 0.
    pub density: f64,
}

impl DependencyGraph {
    /// Look up a node's display label by id, falling back to the id itself.
    #[must_use]
    pub fn label_of(&self, node_id: &str) -> String {
        self.nodes
            .iter()
            .find(|n| n.id == node_id)
            .map_or_else(|| node_id.to_string(), |n| n.label.clone())
    }
}

/// A node whose combined degree exceeds the bottleneck threshold.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bottleneck {
    /// Node id.
    pub node_id: String,

    /// Node display name.
    pub node_name: String,

    /// Edges targeting this node.
    pub incoming: usize,

    /// Edges originating from this node.
    pub outgoing: usize,

    /// `incoming + outgoing`.
    pub total: usize,

    /// `high` above the high-risk threshold, else `medium`.
    pub risk_level: RiskLevel,
}

/// A pair of nodes that each depend on the other.
///
/// Only direct pairs are detected; longer cycles are out of scope and the
/// wave planner's group logic assumes pair cardinality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CircularDependency {
    /// Deterministic cycle identifier.
    pub cycle_id: String,

    /// The two member node ids, sorted.
    pub nodes: Vec<String>,

    /// Always `"bidirectional"` in this version.
    #[serde(rename = "type")]
    pub kind: String,

    /// Cycle severity.
    pub severity: RiskLevel,
}

/// A directed chain from a source-less node to a sink-less node.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CriticalPath {
    /// Deterministic path identifier.
    pub path_id: String,

    /// Label of the first node.
    pub start_label: String,

    /// Label of the last node.
    pub end_label: String,

    /// Number of nodes on the path.
    pub length: usize,

    /// Node labels in traversal order.
    pub node_sequence: Vec<String>,

    /// `high` for chains of more than four nodes, else `medium`.
    pub criticality: RiskLevel,
}

/// Category of a migration insight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    /// A high-connectivity node puts the migration at risk.
    Bottleneck,

    /// Mutually dependent asset pairs were found.
    CircularDependency,

    /// The graph is sparse; assets migrate independently.
    LowCoupling,

    /// The graph is dense; assets are tightly interlinked.
    HighCoupling,

    /// A long dependency chain constrains migration order.
    CriticalPath,
}

/// A human-readable finding derived from structural analysis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationInsight {
    /// Insight category.
    #[serde(rename = "type")]
    pub kind: InsightKind,

    /// Severity grading.
    pub severity: RiskLevel,

    /// What was found.
    pub message: String,

    /// What to do about it.
    pub recommendation: String,

    /// Display names of the assets involved.
    pub affected_assets: Vec<String>,
}

/// An ordered batch of assets to migrate together.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MigrationWave {
    /// Position in the plan, contiguous from 1.
    pub wave_number: usize,

    /// Wave display name.
    pub name: String,

    /// Asset display names (may be truncated for display).
    pub asset_labels: Vec<String>,

    /// True number of assets in the wave.
    pub asset_count: usize,

    /// Wave risk grading.
    pub risk: RiskLevel,

    /// Suggested migration strategy.
    pub strategy: String,
}

/// The phased migration plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WavePlan {
    /// Emitted waves, in order.
    pub migration_waves: Vec<MigrationWave>,

    /// Number of emitted waves.
    pub total_waves: usize,

    /// Two weeks per emitted wave.
    pub estimated_duration: String,

    /// `high` if any bottleneck or cycle exists, else `medium`.
    pub risk_assessment: RiskLevel,
}

/// Structural findings produced by the analyzer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StructuralAnalysis {
    /// Nodes over the connectivity threshold, sorted by total degree.
    pub bottlenecks: Vec<Bottleneck>,

    /// Deduplicated bidirectional pairs.
    pub circular_dependencies: Vec<CircularDependency>,

    /// Up to the configured cap of qualifying shortest paths.
    pub critical_paths: Vec<CriticalPath>,
}

/// The complete result of one analysis invocation.
///
/// On failure the engine still returns this shape with empty lists and the
/// `error` field populated; external callers treat that as a soft fail.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyAnalysisResult {
    /// Number of assets received.
    pub total_assets: usize,

    /// The fused dependency graph.
    pub dependency_graph: DependencyGraph,

    /// Network extractor findings.
    pub network_dependencies: Vec<crate::signals::NetworkDependency>,

    /// Configuration extractor findings.
    pub configuration_dependencies: Vec<crate::signals::ConfigurationDependency>,

    /// Data-flow extractor findings.
    pub data_dependencies: Vec<crate::signals::DataFlowDependency>,

    /// Service extractor findings.
    pub service_dependencies: Vec<crate::signals::ServiceDependency>,

    /// Retained critical paths.
    pub critical_paths: Vec<CriticalPath>,

    /// Detected bottlenecks.
    pub bottlenecks: Vec<Bottleneck>,

    /// Detected bidirectional pairs.
    pub circular_dependencies: Vec<CircularDependency>,

    /// Human-readable findings.
    pub migration_insights: Vec<MigrationInsight>,

    /// RFC 3339 timestamp of this invocation.
    pub analysis_timestamp: String,

    /// Failure message; present only on soft failure.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
