//! Whole-graph structural analysis: connected components and centrality.
//!
//! Everything here is recomputed from scratch against the current graph
//! snapshot; there is no incremental maintenance. Betweenness is the
//! scaling bottleneck at O(V*E) and is only run when a feature table or
//! ring report is built.
//!
//! Pathological graphs (empty, one or two nodes, fully disconnected)
//! degrade to empty or all-zero results instead of failing.

use crate::graph::{EntityGraph, NodeId};
use std::collections::{HashMap, VecDeque};

/// Connected components via BFS, each component sorted, components
/// ordered by their smallest node.
pub fn connected_components(graph: &EntityGraph) -> Vec<Vec<NodeId>> {
    let nodes = graph.sorted_nodes();
    let mut seen: HashMap<&NodeId, bool> = HashMap::with_capacity(nodes.len());
    let mut components = Vec::new();

    for &start in &nodes {
        if seen.contains_key(start) {
            continue;
        }
        let mut component = Vec::new();
        let mut queue = VecDeque::from([start]);
        seen.insert(start, true);
        while let Some(node) = queue.pop_front() {
            component.push(node.clone());
            for nbr in graph.neighbors(node) {
                if !seen.contains_key(nbr) {
                    seen.insert(nbr, true);
                    queue.push_back(nbr);
                }
            }
        }
        component.sort();
        components.push(component);
    }
    components
}

/// Map every node to the index of its component in `components`.
pub fn component_labels(components: &[Vec<NodeId>]) -> HashMap<NodeId, usize> {
    let mut labels = HashMap::new();
    for (idx, component) in components.iter().enumerate() {
        for node in component {
            labels.insert(node.clone(), idx);
        }
    }
    labels
}

/// Degree centrality: degree / (n - 1). Zero for graphs of one node.
pub fn degree_centrality(graph: &EntityGraph) -> HashMap<NodeId, f64> {
    let n = graph.node_count();
    if n <= 1 {
        return graph.nodes().map(|node| (node.clone(), 0.0)).collect();
    }
    let denom = (n - 1) as f64;
    graph
        .nodes()
        .map(|node| (node.clone(), graph.degree(node) as f64 / denom))
        .collect()
}

/// Betweenness centrality (Brandes), normalized by 1/((n-1)(n-2)) so
/// values fall in [0, 1]. Graphs with two or fewer nodes are all zero.
pub fn betweenness_centrality(graph: &EntityGraph) -> HashMap<NodeId, f64> {
    let nodes = graph.sorted_nodes();
    let n = nodes.len();
    let mut centrality: Vec<f64> = vec![0.0; n];
    if n > 2 {
        let index: HashMap<&NodeId, usize> =
            nodes.iter().enumerate().map(|(i, &node)| (node, i)).collect();
        let adjacency: Vec<Vec<usize>> = nodes
            .iter()
            .map(|&node| graph.neighbors(node).map(|nbr| index[nbr]).collect())
            .collect();

        for source in 0..n {
            brandes_accumulate(source, &adjacency, &mut centrality);
        }

        let scale = 1.0 / ((n - 1) as f64 * (n - 2) as f64);
        for value in &mut centrality {
            *value *= scale;
        }
    }

    nodes
        .into_iter()
        .zip(centrality)
        .map(|(node, value)| (node.clone(), value))
        .collect()
}

/// Single-source shortest-path counting and dependency accumulation.
fn brandes_accumulate(source: usize, adjacency: &[Vec<usize>], centrality: &mut [f64]) {
    let n = adjacency.len();
    let mut stack = Vec::with_capacity(n);
    let mut predecessors: Vec<Vec<usize>> = vec![Vec::new(); n];
    let mut sigma = vec![0.0f64; n];
    let mut dist = vec![-1i64; n];
    sigma[source] = 1.0;
    dist[source] = 0;

    let mut queue = VecDeque::from([source]);
    while let Some(v) = queue.pop_front() {
        stack.push(v);
        for &w in &adjacency[v] {
            if dist[w] < 0 {
                dist[w] = dist[v] + 1;
                queue.push_back(w);
            }
            if dist[w] == dist[v] + 1 {
                sigma[w] += sigma[v];
                predecessors[w].push(v);
            }
        }
    }

    let mut delta = vec![0.0f64; n];
    while let Some(w) = stack.pop() {
        for &v in &predecessors[w] {
            delta[v] += sigma[v] / sigma[w] * (1.0 + delta[w]);
        }
        if w != source {
            centrality[w] += delta[w];
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::claim::EntityKind;
    use crate::graph::{EdgeData, EdgeKind};

    fn edge() -> EdgeData {
        EdgeData {
            kind: EdgeKind::Relation(EntityKind::Provider),
            weight: 1.0,
            days_apart: None,
        }
    }

    #[test]
    fn empty_graph_degrades_to_empty_results() {
        let g = EntityGraph::new();
        assert!(connected_components(&g).is_empty());
        assert!(degree_centrality(&g).is_empty());
        assert!(betweenness_centrality(&g).is_empty());
    }

    #[test]
    fn components_split_disconnected_graph() {
        let mut g = EntityGraph::new();
        g.upsert_edge(NodeId::claim("A"), NodeId::claim("B"), edge());
        g.upsert_edge(NodeId::claim("C"), NodeId::claim("D"), edge());
        g.add_node(NodeId::claim("E"));

        let components = connected_components(&g);
        assert_eq!(components.len(), 3);
        let sizes: Vec<usize> = components.iter().map(|c| c.len()).collect();
        assert_eq!(sizes, vec![2, 2, 1]);

        let labels = component_labels(&components);
        assert_eq!(labels[&NodeId::claim("A")], labels[&NodeId::claim("B")]);
        assert_ne!(labels[&NodeId::claim("A")], labels[&NodeId::claim("C")]);
    }

    #[test]
    fn star_center_dominates_betweenness() {
        // Hub connected to four leaves: every leaf pair routes through it.
        let mut g = EntityGraph::new();
        let hub = NodeId::entity(EntityKind::Provider, "hub");
        for leaf in ["A", "B", "C", "D"] {
            g.upsert_edge(hub.clone(), NodeId::claim(leaf), edge());
        }

        let bc = betweenness_centrality(&g);
        assert!(bc[&hub] > 0.99, "hub betweenness was {}", bc[&hub]);
        assert_eq!(bc[&NodeId::claim("A")], 0.0);

        let dc = degree_centrality(&g);
        assert_eq!(dc[&hub], 1.0);
        assert_eq!(dc[&NodeId::claim("A")], 0.25);
    }

    #[test]
    fn path_midpoint_has_partial_betweenness() {
        // A - B - C: only the (A, C) pair routes through B.
        let mut g = EntityGraph::new();
        g.upsert_edge(NodeId::claim("A"), NodeId::claim("B"), edge());
        g.upsert_edge(NodeId::claim("B"), NodeId::claim("C"), edge());

        let bc = betweenness_centrality(&g);
        assert!((bc[&NodeId::claim("B")] - 1.0).abs() < 1e-9);
        assert_eq!(bc[&NodeId::claim("A")], 0.0);
    }
}
