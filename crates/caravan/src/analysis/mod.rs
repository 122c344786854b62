//! Structural analysis of the dependency graph.
//!
//! This module computes the three structural findings the planner and the
//! insight generator consume:
//! - Bottlenecks by combined in/out degree
//! - Circular dependencies (direct bidirectional pairs only)
//! - Critical paths via bounded BFS between source-less and sink-less nodes
//!
//! # Cycle Scope
//!
//! Only direct pairs (A→B and B→A) are reported. Longer cycles are out of
//! scope in this version; the wave planner's group bucket assumes pair
//! cardinality, so general cycle detection must not be added here without
//! reworking that logic.

use crate::config::EngineConfig;
use crate::domain::{
    Bottleneck, CircularDependency, CriticalPath, DependencyGraph, RiskLevel, StructuralAnalysis,
};
use crate::id;
use petgraph::Direction;
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::{HashMap, HashSet, VecDeque};
use tracing::debug;

/// Computes structural findings from a dependency graph.
pub struct StructuralAnalyzer<'a> {
    config: &'a EngineConfig,
}

impl<'a> StructuralAnalyzer<'a> {
    /// Create an analyzer using the given configuration.
    #[must_use]
    pub fn new(config: &'a EngineConfig) -> Self {
        Self { config }
    }

    /// Analyze the graph.
    ///
    /// Edges referencing unknown nodes are skipped; the builder never
    /// produces them, but externally supplied graphs might.
    #[must_use]
    pub fn analyze(&self, graph: &DependencyGraph) -> StructuralAnalysis {
        let (digraph, node_map) = build_digraph(graph);

        let bottlenecks = self.find_bottlenecks(graph, &digraph, &node_map);
        let circular_dependencies = find_circular_pairs(graph, &digraph, &node_map);
        let critical_paths = self.find_critical_paths(graph, &digraph, &node_map);

        debug!(
            bottlenecks = bottlenecks.len(),
            cycles = circular_dependencies.len(),
            paths = critical_paths.len(),
            "structural analysis complete"
        );

        StructuralAnalysis {
            bottlenecks,
            circular_dependencies,
            critical_paths,
        }
    }

    /// Flag nodes whose combined degree exceeds the bottleneck threshold,
    /// sorted descending by total degree.
    fn find_bottlenecks(
        &self,
        graph: &DependencyGraph,
        digraph: &DiGraph<String, ()>,
        node_map: &HashMap<String, NodeIndex>,
    ) -> Vec<Bottleneck> {
        let mut bottlenecks: Vec<Bottleneck> = graph
            .nodes
            .iter()
            .filter_map(|node| {
                let index = node_map.get(&node.id)?;
                let incoming = digraph
                    .edges_directed(*index, Direction::Incoming)
                    .count();
                let outgoing = digraph
                    .edges_directed(*index, Direction::Outgoing)
                    .count();
                let total = incoming + outgoing;
                if total <= self.config.bottleneck_threshold {
                    return None;
                }
                let risk_level = if total > self.config.high_risk_threshold {
                    RiskLevel::High
                } else {
                    RiskLevel::Medium
                };
                Some(Bottleneck {
                    node_id: node.id.clone(),
                    node_name: node.label.clone(),
                    incoming,
                    outgoing,
                    total,
                    risk_level,
                })
            })
            .collect();

        // Stable sort keeps node order for equal totals.
        bottlenecks.sort_by(|a, b| b.total.cmp(&a.total));
        bottlenecks
    }

    /// Enumerate shortest paths between source-less and sink-less nodes,
    /// keeping qualifying paths up to the configured cap.
    fn find_critical_paths(
        &self,
        graph: &DependencyGraph,
        digraph: &DiGraph<String, ()>,
        node_map: &HashMap<String, NodeIndex>,
    ) -> Vec<CriticalPath> {
        let indices: Vec<NodeIndex> = graph
            .nodes
            .iter()
            .filter_map(|node| node_map.get(&node.id).copied())
            .collect();

        let starts: Vec<NodeIndex> = indices
            .iter()
            .copied()
            .filter(|&i| digraph.edges_directed(i, Direction::Incoming).next().is_none())
            .collect();
        let ends: Vec<NodeIndex> = indices
            .iter()
            .copied()
            .filter(|&i| digraph.edges_directed(i, Direction::Outgoing).next().is_none())
            .collect();

        let mut paths = Vec::new();
        'outer: for &start in &starts {
            for &end in &ends {
                if start == end {
                    continue;
                }
                let Some(path) = shortest_path(digraph, start, end) else {
                    continue;
                };
                if path.len() <= self.config.min_path_nodes {
                    continue;
                }
                let labels: Vec<String> =
                    path.iter().map(|&i| graph.label_of(&digraph[i])).collect();
                let criticality = if path.len() > self.config.high_criticality_path_nodes {
                    RiskLevel::High
                } else {
                    RiskLevel::Medium
                };
                paths.push(CriticalPath {
                    path_id: id::path_id(&digraph[start], &digraph[end]),
                    start_label: labels[0].clone(),
                    end_label: labels[labels.len() - 1].clone(),
                    length: labels.len(),
                    node_sequence: labels,
                    criticality,
                });
                if paths.len() >= self.config.max_critical_paths {
                    break 'outer;
                }
            }
        }

        paths
    }
}

/// Build a petgraph mirror of the wire graph.
///
/// Node weights are node ids; the map locates indices by id.
fn build_digraph(graph: &DependencyGraph) -> (DiGraph<String, ()>, HashMap<String, NodeIndex>) {
    let mut digraph = DiGraph::new();
    let mut node_map = HashMap::new();

    for node in &graph.nodes {
        if node_map.contains_key(&node.id) {
            continue;
        }
        let index = digraph.add_node(node.id.clone());
        node_map.insert(node.id.clone(), index);
    }

    for edge in &graph.edges {
        let (Some(&source), Some(&target)) = (
            node_map.get(&edge.source_node_id),
            node_map.get(&edge.target_node_id),
        ) else {
            continue;
        };
        digraph.add_edge(source, target, ());
    }

    (digraph, node_map)
}

/// Report one cycle per direct bidirectional pair, deduplicated by the
/// sorted pair.
fn find_circular_pairs(
    graph: &DependencyGraph,
    digraph: &DiGraph<String, ()>,
    node_map: &HashMap<String, NodeIndex>,
) -> Vec<CircularDependency> {
    let mut seen: HashSet<(String, String)> = HashSet::new();
    let mut cycles = Vec::new();

    for edge in &graph.edges {
        if edge.source_node_id == edge.target_node_id {
            continue;
        }
        let (Some(&source), Some(&target)) = (
            node_map.get(&edge.source_node_id),
            node_map.get(&edge.target_node_id),
        ) else {
            continue;
        };
        if digraph.find_edge(target, source).is_none() {
            continue;
        }

        let mut pair = [edge.source_node_id.clone(), edge.target_node_id.clone()];
        pair.sort();
        if !seen.insert((pair[0].clone(), pair[1].clone())) {
            continue;
        }
        cycles.push(CircularDependency {
            cycle_id: id::cycle_id(&pair[0], &pair[1]),
            nodes: pair.to_vec(),
            kind: "bidirectional".to_string(),
            severity: RiskLevel::High,
        });
    }

    cycles
}

/// BFS for one shortest directed path from `start` to `end`.
fn shortest_path(
    digraph: &DiGraph<String, ()>,
    start: NodeIndex,
    end: NodeIndex,
) -> Option<Vec<NodeIndex>> {
    let mut visited: HashSet<NodeIndex> = HashSet::new();
    let mut predecessor: HashMap<NodeIndex, NodeIndex> = HashMap::new();
    let mut queue: VecDeque<NodeIndex> = VecDeque::new();

    visited.insert(start);
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if current == end {
            // Walk predecessors back to the start.
            let mut path = vec![end];
            let mut node = end;
            while let Some(&previous) = predecessor.get(&node) {
                path.push(previous);
                node = previous;
            }
            path.reverse();
            return Some(path);
        }

        for neighbor in digraph.neighbors_directed(current, Direction::Outgoing) {
            if visited.insert(neighbor) {
                predecessor.insert(neighbor, current);
                queue.push_back(neighbor);
            }
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EdgeKind, GraphEdge, GraphNode, NodeMetadata};
    use crate::graph::density;
    use rstest::rstest;

    fn node(id: &str) -> GraphNode {
        GraphNode {
            id: id.to_string(),
            label: id.to_string(),
            kind: "server".to_string(),
            environment: String::new(),
            criticality: String::new(),
            metadata: NodeMetadata::default(),
        }
    }

    fn edge(source: &str, target: &str) -> GraphEdge {
        GraphEdge {
            id: crate::id::edge_id(source, target, "network"),
            source_node_id: source.to_string(),
            target_node_id: target.to_string(),
            edge_type: EdgeKind::Network,
            label: String::new(),
            confidence: 0.8,
        }
    }

    fn graph(node_ids: &[&str], edge_pairs: &[(&str, &str)]) -> DependencyGraph {
        let nodes: Vec<GraphNode> = node_ids.iter().map(|id| node(id)).collect();
        let edges: Vec<GraphEdge> = edge_pairs.iter().map(|(s, t)| edge(s, t)).collect();
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

    fn analyze(graph: &DependencyGraph) -> StructuralAnalysis {
        let config = EngineConfig::default();
        StructuralAnalyzer::new(&config).analyze(graph)
    }

    #[rstest]
    #[case::three_connections_is_not_a_bottleneck(3, false, None)]
    #[case::four_connections_is_medium(4, true, Some(RiskLevel::Medium))]
    #[case::five_connections_is_medium(5, true, Some(RiskLevel::Medium))]
    #[case::six_connections_is_high(6, true, Some(RiskLevel::High))]
    fn test_bottleneck_thresholds(
        #[case] degree: usize,
        #[case] flagged: bool,
        #[case] risk: Option<RiskLevel>,
    ) {
        // A hub with `degree` incoming edges from distinct leaves.
        let leaf_ids: Vec<String> = (0..degree).map(|i| format!("leaf{i}")).collect();
        let mut ids = vec!["hub"];
        ids.extend(leaf_ids.iter().map(String::as_str));
        let pairs: Vec<(&str, &str)> =
            leaf_ids.iter().map(|l| (l.as_str(), "hub")).collect();

        let analysis = analyze(&graph(&ids, &pairs));
        let hub = analysis.bottlenecks.iter().find(|b| b.node_id == "hub");
        assert_eq!(hub.is_some(), flagged);
        if let Some(hub) = hub {
            assert_eq!(hub.incoming, degree);
            assert_eq!(hub.outgoing, 0);
            assert_eq!(Some(hub.risk_level), risk);
        }
    }

    #[test]
    fn test_bottlenecks_sorted_descending_by_total() {
        // big: 6 edges, small: 4 edges, listed small-first in the graph.
        let mut pairs: Vec<(String, String)> = Vec::new();
        for i in 0..4 {
            pairs.push((format!("s{i}"), "small".to_string()));
        }
        for i in 0..6 {
            pairs.push((format!("b{i}"), "big".to_string()));
        }
        let mut ids: Vec<&str> = vec!["small", "big"];
        let owned: Vec<String> = pairs.iter().map(|(s, _)| s.clone()).collect();
        ids.extend(owned.iter().map(String::as_str));
        let pair_refs: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(s, t)| (s.as_str(), t.as_str()))
            .collect();

        let analysis = analyze(&graph(&ids, &pair_refs));
        assert_eq!(analysis.bottlenecks.len(), 2);
        assert_eq!(analysis.bottlenecks[0].node_id, "big");
        assert_eq!(analysis.bottlenecks[1].node_id, "small");
    }

    #[test]
    fn test_direct_pair_reported_once_with_sorted_nodes() {
        let analysis = analyze(&graph(&["b", "a"], &[("b", "a"), ("a", "b")]));
        assert_eq!(analysis.circular_dependencies.len(), 1);
        let cycle = &analysis.circular_dependencies[0];
        assert_eq!(cycle.nodes, vec!["a".to_string(), "b".to_string()]);
        assert_eq!(cycle.kind, "bidirectional");
        assert_eq!(cycle.severity, RiskLevel::High);
    }

    #[test]
    fn test_longer_cycles_are_not_reported() {
        // a -> b -> c -> a is a 3-cycle, out of scope by design.
        let analysis = analyze(&graph(&["a", "b", "c"], &[("a", "b"), ("b", "c"), ("c", "a")]));
        assert!(analysis.circular_dependencies.is_empty());
    }

    #[test]
    fn test_chain_of_five_yields_one_high_critical_path() {
        let analysis = analyze(&graph(
            &["a", "b", "c", "d", "e"],
            &[("a", "b"), ("b", "c"), ("c", "d"), ("d", "e")],
        ));
        assert_eq!(analysis.critical_paths.len(), 1);
        let path = &analysis.critical_paths[0];
        assert_eq!(path.length, 5);
        assert_eq!(path.start_label, "a");
        assert_eq!(path.end_label, "e");
        assert_eq!(path.node_sequence, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(path.criticality, RiskLevel::High);
    }

    #[test]
    fn test_three_node_chain_is_medium() {
        let analysis = analyze(&graph(&["a", "b", "c"], &[("a", "b"), ("b", "c")]));
        assert_eq!(analysis.critical_paths.len(), 1);
        assert_eq!(analysis.critical_paths[0].length, 3);
        assert_eq!(analysis.critical_paths[0].criticality, RiskLevel::Medium);
    }

    #[test]
    fn test_two_node_path_does_not_qualify() {
        let analysis = analyze(&graph(&["a", "b"], &[("a", "b")]));
        assert!(analysis.critical_paths.is_empty());
    }

    #[test]
    fn test_path_cap_at_five() {
        // Six independent chains of three nodes each; only five paths kept.
        let mut ids: Vec<String> = Vec::new();
        let mut pairs: Vec<(String, String)> = Vec::new();
        for i in 0..6 {
            let (s, m, e) = (format!("s{i}"), format!("m{i}"), format!("e{i}"));
            pairs.push((s.clone(), m.clone()));
            pairs.push((m.clone(), e.clone()));
            ids.extend([s, m, e]);
        }
        let id_refs: Vec<&str> = ids.iter().map(String::as_str).collect();
        let pair_refs: Vec<(&str, &str)> = pairs
            .iter()
            .map(|(s, t)| (s.as_str(), t.as_str()))
            .collect();

        let analysis = analyze(&graph(&id_refs, &pair_refs));
        assert_eq!(analysis.critical_paths.len(), 5);
    }

    #[test]
    fn test_empty_graph_yields_empty_analysis() {
        let analysis = analyze(&graph(&[], &[]));
        assert!(analysis.bottlenecks.is_empty());
        assert!(analysis.circular_dependencies.is_empty());
        assert!(analysis.critical_paths.is_empty());
    }

    #[test]
    fn test_edges_to_unknown_nodes_are_skipped() {
        let analysis = analyze(&graph(&["a"], &[("a", "ghost"), ("ghost", "a")]));
        assert!(analysis.bottlenecks.is_empty());
        assert!(analysis.circular_dependencies.is_empty());
    }
}
