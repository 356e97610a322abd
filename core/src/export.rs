//! Read-only exports for rendering and dashboard consumers.
//!
//! Node and edge identifiers are stable across exports of the same
//! graph: nodes carry their compound export id, edges are numbered in
//! sorted endpoint order.

use crate::claim::ClaimRecord;
use crate::graph::{EntityGraph, NodeId};
use crate::scoring::{HeuristicScorer, RiskCategory};
use crate::types::ClaimId;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, Serialize)]
pub struct ExportNode {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub label: String,
    /// Recomputed heuristic risk level; claim nodes in full exports only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskCategory>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExportEdge {
    pub id: String,
    pub source: String,
    pub target: String,
    pub relation: &'static str,
    pub weight: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub days_apart: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GraphExport {
    pub nodes: Vec<ExportNode>,
    pub edges: Vec<ExportEdge>,
}

impl GraphExport {
    pub fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
        }
    }
}

/// Aggregate counts for dashboard summaries.
#[derive(Debug, Clone, Serialize)]
pub struct GraphStats {
    pub total_nodes: usize,
    pub total_edges: usize,
    pub claim_count: usize,
    /// Node counts keyed by kind ("claim", "provider", ...).
    pub node_counts: BTreeMap<String, usize>,
}

fn display_label(node: &NodeId) -> String {
    match node {
        NodeId::Claim(id) => format!("Claim {id}"),
        NodeId::Entity(_, value) => value.clone(),
    }
}

/// Export the whole graph. Claim nodes get their heuristic risk level
/// recomputed against the current graph state.
pub fn export_graph(graph: &EntityGraph, claims: &BTreeMap<ClaimId, ClaimRecord>) -> GraphExport {
    let scorer = HeuristicScorer;
    let nodes = graph
        .sorted_nodes()
        .into_iter()
        .map(|node| {
            let risk_level = match node {
                NodeId::Claim(cid) => claims
                    .get(cid)
                    .map(|claim| scorer.assess(graph, claim).risk_category),
                NodeId::Entity(..) => None,
            };
            ExportNode {
                id: node.export_id(),
                kind: node.kind_str().to_string(),
                label: display_label(node),
                risk_level,
            }
        })
        .collect();

    GraphExport {
        nodes,
        edges: export_edges(graph, None),
    }
}

/// Export the subgraph induced by `keep`. Risk levels are omitted; the
/// induced view is for local inspection, not triage.
pub fn export_subgraph(graph: &EntityGraph, keep: &BTreeSet<NodeId>) -> GraphExport {
    let nodes = keep
        .iter()
        .map(|node| ExportNode {
            id: node.export_id(),
            kind: node.kind_str().to_string(),
            label: display_label(node),
            risk_level: None,
        })
        .collect();

    GraphExport {
        nodes,
        edges: export_edges(graph, Some(keep)),
    }
}

fn export_edges(graph: &EntityGraph, keep: Option<&BTreeSet<NodeId>>) -> Vec<ExportEdge> {
    graph
        .sorted_edges()
        .into_iter()
        .filter(|(a, b, _)| keep.map_or(true, |set| set.contains(a) && set.contains(b)))
        .enumerate()
        .map(|(i, (a, b, data))| ExportEdge {
            id: format!("edge_{i}"),
            source: a.export_id(),
            target: b.export_id(),
            relation: data.kind.label(),
            weight: data.weight,
            days_apart: data.days_apart,
        })
        .collect()
}

/// Node/edge tallies for the stats endpoint.
pub fn graph_stats(graph: &EntityGraph) -> GraphStats {
    let mut node_counts: BTreeMap<String, usize> = BTreeMap::new();
    for node in graph.nodes() {
        *node_counts.entry(node.kind_str().to_string()).or_insert(0) += 1;
    }
    GraphStats {
        total_nodes: graph.node_count(),
        total_edges: graph.edge_count(),
        claim_count: node_counts.get("claim").copied().unwrap_or(0),
        node_counts,
    }
}
