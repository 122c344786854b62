//! Dependency graph construction.
//!
//! Fuses extractor findings into a single directed graph: one node per
//! asset in input order, and confidence-weighted edges pointing from the
//! depended-upon asset to its dependent. Data-flow findings are processed
//! first because they are the most reliable evidence; network findings
//! follow, and a later finding never overwrites an edge an earlier one
//! already claimed for the same node pair.

use crate::config::EngineConfig;
use crate::domain::{Asset, DependencyGraph, EdgeKind, GraphEdge, GraphNode, NodeMetadata};
use crate::id;
use crate::signals::{
    ConfigurationDependency, DataFlowDependency, DependencySignal, NetworkDependency,
    ServiceDependency,
};
use std::collections::HashSet;
use tracing::debug;

/// Resolve a symbolic reference to an asset.
///
/// The first asset (in input order) whose non-empty name appears as a
/// case-insensitive substring of the reference value wins. This is a
/// stringly-typed heuristic prone to false positives on short or common
/// names; it is kept in one place so it can be swapped for exact-id
/// matching without touching graph construction.
#[must_use]
pub fn resolve_reference<'a>(assets: &'a [Asset], reference: &str) -> Option<&'a Asset> {
    let reference = reference.trim().to_lowercase();
    if reference.is_empty() {
        return None;
    }
    assets
        .iter()
        .filter(|asset| !asset.name.is_empty())
        .find(|asset| reference.contains(&asset.name.to_lowercase()))
}

/// Builds the fused dependency graph from extractor findings.
pub struct GraphBuilder<'a> {
    config: &'a EngineConfig,
}

impl<'a> GraphBuilder<'a> {
    /// Create a builder using the given configuration.
    #[must_use]
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Fuse findings into a graph.
    ///
    /// Unresolved references are dropped silently; they must not create
    /// dangling edges. Configuration and service findings describe roles
    /// rather than concrete endpoints and therefore produce no edges.
    #[must_use]
    pub fn build(
        &self,
        assets: &[Asset],
        network: &[NetworkDependency],
        configuration: &[ConfigurationDependency],
        data: &[DataFlowDependency],
        service: &[ServiceDependency],
    ) -> DependencyGraph {
        let nodes: Vec<GraphNode> = assets.iter().map(node_from_asset).collect();
        let known_ids: HashSet<&str> = nodes.iter().map(|n| n.id.as_str()).collect();

        debug!(
            network = network.len(),
            configuration = configuration.len(),
            data = data.len(),
            service = service.len(),
            "fusing extractor findings"
        );

        let mut edges: Vec<GraphEdge> = Vec::new();
        let mut claimed: HashSet<(String, String)> = HashSet::new();

        // Data-flow findings first: most reliable evidence wins the pair.
        for flow in data {
            if !known_ids.contains(flow.source_asset_id.as_str())
                || !known_ids.contains(flow.target_asset_id.as_str())
                || flow.source_asset_id == flow.target_asset_id
            {
                continue;
            }
            let signal = flow.signal();
            push_edge(
                &mut edges,
                &mut claimed,
                &flow.source_asset_id,
                &flow.target_asset_id,
                EdgeKind::DataFlow,
                &signal,
            );
        }

        // Network findings second; connection values resolve symbolically
        // and the resolved asset is the one being depended on.
        for finding in network {
            if !known_ids.contains(finding.asset_id.as_str()) {
                continue;
            }
            for connection in &finding.connections {
                let Some(provider) = resolve_reference(assets, &connection.value) else {
                    continue;
                };
                if provider.id == finding.asset_id {
                    continue;
                }
                let signal = finding.signal_for(connection, self.config.network_confidence);
                push_edge(
                    &mut edges,
                    &mut claimed,
                    &provider.id,
                    &finding.asset_id,
                    EdgeKind::Network,
                    &signal,
                );
            }
        }

        let node_count = nodes.len();
        let edge_count = edges.len();

        DependencyGraph {
            nodes,
            edges,
            node_count,
            edge_count,
            density: density(node_count, edge_count),
        }
    }
}

/// `edges / (nodes * (nodes - 1))` for more than one node, else 0.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn density(node_count: usize, edge_count: usize) -> f64 {
    if node_count <= 1 {
        return 0.0;
    }
    edge_count as f64 / (node_count as f64 * (node_count as f64 - 1.0))
}

fn node_from_asset(asset: &Asset) -> GraphNode {
    GraphNode {
        id: asset.id.clone(),
        label: asset.name.clone(),
        kind: asset.asset_type.clone(),
        environment: asset.environment.clone(),
        criticality: asset.business_criticality.clone(),
        metadata: NodeMetadata {
            department: asset.department.clone(),
            owner: asset.owner.clone(),
            technology_stack: asset.technology_stack.clone(),
        },
    }
}

fn push_edge(
    edges: &mut Vec<GraphEdge>,
    claimed: &mut HashSet<(String, String)>,
    source: &str,
    target: &str,
    kind: EdgeKind,
    signal: &DependencySignal,
) {
    if !claimed.insert((source.to_string(), target.to_string())) {
        return;
    }
    edges.push(GraphEdge {
        id: id::edge_id(source, target, &kind.to_string()),
        source_node_id: source.to_string(),
        target_node_id: target.to_string(),
        edge_type: kind,
        label: signal.detail.clone(),
        confidence: signal.confidence,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{
        DataFlowExtractor, NetworkExtractor, SignalExtractor as _,
    };
    use proptest::prelude::*;

    fn asset(id: &str, name: &str, asset_type: &str) -> Asset {
        Asset {
            id: id.to_string(),
            name: name.to_string(),
            asset_type: asset_type.to_string(),
            ..Asset::default()
        }
    }

    fn build(assets: &[Asset]) -> DependencyGraph {
        let config = EngineConfig::default();
        let network = NetworkExtractor.extract(assets);
        let data = DataFlowExtractor::default().extract(assets);
        GraphBuilder::new(&config).build(assets, &network, &[], &data, &[])
    }

    #[test]
    fn test_nodes_preserve_input_order() {
        let assets = vec![
            asset("c", "gamma", "server"),
            asset("a", "alpha", "server"),
            asset("b", "beta", "server"),
        ];
        let graph = build(&assets);
        let ids: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, ["c", "a", "b"]);
        assert_eq!(graph.node_count, 3);
    }

    #[test]
    fn test_node_metadata_carries_ownership() {
        let mut a = asset("a", "alpha", "server");
        a.department = "payments".to_string();
        a.owner = "alice".to_string();
        a.technology_stack = Some("Rust".to_string());

        let graph = build(&[a]);
        let metadata = &graph.nodes[0].metadata;
        assert_eq!(metadata.department, "payments");
        assert_eq!(metadata.owner, "alice");
        assert_eq!(metadata.technology_stack.as_deref(), Some("Rust"));
    }

    #[test]
    fn test_explicit_dependency_produces_one_edge() {
        let mut app = asset("app1", "app1", "application");
        app.dependencies = vec!["db1".to_string()];
        let db = asset("db1", "db1", "database");

        let graph = build(&[db, app]);

        // The data-flow edge claims the pair; the network finding for the
        // same reference is deduplicated away.
        assert_eq!(graph.edge_count, 1);
        let edge = &graph.edges[0];
        assert_eq!(edge.source_node_id, "db1");
        assert_eq!(edge.target_node_id, "app1");
        assert_eq!(edge.edge_type, EdgeKind::DataFlow);
        assert!((edge.confidence - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_network_edge_for_non_database_reference() {
        let mut web = asset("web1", "web1", "server");
        web.dependencies = vec!["cache1".to_string()];
        let cache = asset("cache1", "cache1", "storage");

        let graph = build(&[cache, web]);
        assert_eq!(graph.edge_count, 1);
        let edge = &graph.edges[0];
        assert_eq!(edge.edge_type, EdgeKind::Network);
        assert_eq!(edge.source_node_id, "cache1");
        assert_eq!(edge.target_node_id, "web1");
        assert!((edge.confidence - 0.8).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unresolved_reference_is_dropped() {
        let mut web = asset("web1", "web1", "server");
        web.dependencies = vec!["no-such-asset".to_string()];

        let graph = build(&[web]);
        assert_eq!(graph.edge_count, 0);
    }

    #[test]
    fn test_self_reference_creates_no_edge() {
        let mut web = asset("web1", "web1", "server");
        web.dependencies = vec!["web1".to_string()];

        let graph = build(&[web]);
        assert_eq!(graph.edge_count, 0);
    }

    #[test]
    fn test_connection_string_resolves_by_name_substring() {
        let mut app = asset("app1", "app1", "server");
        app.custom_attributes.insert(
            "db_connection".to_string(),
            serde_json::json!("postgres://orders-db.internal:5432"),
        );
        let db = asset("db1", "orders-db", "storage");

        let graph = build(&[db, app]);
        assert_eq!(graph.edge_count, 1);
        assert_eq!(graph.edges[0].source_node_id, "db1");
        assert_eq!(graph.edges[0].target_node_id, "app1");
    }

    #[test]
    fn test_resolver_first_match_wins() {
        let assets = vec![
            asset("a", "db", "server"),
            asset("b", "orders-db", "server"),
        ];
        // Both names are substrings of the reference; input order decides.
        let resolved = resolve_reference(&assets, "orders-db.internal").unwrap();
        assert_eq!(resolved.id, "a");
    }

    #[test]
    fn test_density_empty_and_single_node() {
        assert!(density(0, 0).abs() < f64::EPSILON);
        assert!(density(1, 0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_density_complete_digraph_is_one() {
        assert!((density(4, 12) - 1.0).abs() < f64::EPSILON);
    }

    proptest! {
        #[test]
        fn prop_density_within_unit_interval(nodes in 0usize..200, extra in 0usize..5) {
            // Any real graph has at most n*(n-1) edges.
            let max_edges = nodes.saturating_mul(nodes.saturating_sub(1));
            let edges = max_edges.saturating_sub(extra);
            let d = density(nodes, edges);
            prop_assert!((0.0..=1.0).contains(&d));
        }
    }
}
