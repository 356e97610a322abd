//! Graph-derived feature table for the external classifier.
//!
//! `GraphFeatures` is a point-in-time snapshot: centralities and
//! component labels are computed once against the current graph and the
//! per-claim rows are read off it. Rebuild after the graph changes.

use crate::analysis::{
    betweenness_centrality, component_labels, connected_components, degree_centrality,
};
use crate::claim::{ClaimRecord, EntityKind};
use crate::graph::{EntityGraph, NodeId};
use crate::scoring::{GraphFeatureScorer, RiskScorer};
use serde::Serialize;
use std::collections::HashMap;

/// One feature row per claim, consumed downstream as classifier input.
#[derive(Debug, Clone, Serialize)]
pub struct FeatureRow {
    pub claim_id: String,
    pub degree_centrality: f64,
    pub betweenness: f64,
    /// Connected-component id; -1 when the claim is not in the graph.
    pub component: i64,
    pub shared_providers: usize,
    pub shared_lawyers: usize,
    pub shared_ips: usize,
    pub similarity_edge_count: usize,
    /// Bounded 0-30 structural score from `GraphFeatureScorer`.
    pub graph_risk_score: u32,
}

pub struct GraphFeatures {
    degree_centrality: HashMap<NodeId, f64>,
    betweenness: HashMap<NodeId, f64>,
    components: Vec<Vec<NodeId>>,
    labels: HashMap<NodeId, usize>,
    scorer: GraphFeatureScorer,
}

impl GraphFeatures {
    /// Compute a fresh snapshot of the whole graph. Betweenness makes
    /// this the most expensive call in the crate; do it once per table.
    pub fn compute(graph: &EntityGraph) -> Self {
        let components = connected_components(graph);
        let labels = component_labels(&components);
        Self {
            degree_centrality: degree_centrality(graph),
            betweenness: betweenness_centrality(graph),
            components,
            labels,
            scorer: GraphFeatureScorer,
        }
    }

    pub fn components(&self) -> &[Vec<NodeId>] {
        &self.components
    }

    pub fn component_of(&self, node: &NodeId) -> Option<usize> {
        self.labels.get(node).copied()
    }

    pub fn betweenness_of(&self, node: &NodeId) -> f64 {
        self.betweenness.get(node).copied().unwrap_or(0.0)
    }

    pub fn degree_centrality_of(&self, node: &NodeId) -> f64 {
        self.degree_centrality.get(node).copied().unwrap_or(0.0)
    }

    /// Build the row for one claim against the snapshot.
    pub fn feature_row(&self, graph: &EntityGraph, claim: &ClaimRecord) -> FeatureRow {
        let node = NodeId::claim(claim.claim_id.clone());
        FeatureRow {
            claim_id: claim.claim_id.clone(),
            degree_centrality: self.degree_centrality_of(&node),
            betweenness: self.betweenness_of(&node),
            component: self.component_of(&node).map_or(-1, |c| c as i64),
            shared_providers: shared_entity_count(graph, &node, EntityKind::Provider),
            shared_lawyers: shared_entity_count(graph, &node, EntityKind::Lawyer),
            shared_ips: shared_entity_count(graph, &node, EntityKind::Ip),
            similarity_edge_count: similarity_edge_count(graph, &node),
            graph_risk_score: self.scorer.score(graph, claim),
        }
    }
}

/// One-hop-then-two-hop: for each neighboring entity of `kind`, count the
/// other claims attached to it. A claim with no such neighbors scores 0.
fn shared_entity_count(graph: &EntityGraph, claim_node: &NodeId, kind: EntityKind) -> usize {
    let mut total = 0usize;
    for nbr in graph.neighbors(claim_node) {
        if let NodeId::Entity(k, _) = nbr {
            if *k == kind {
                total += graph.claim_neighbors(nbr).len().saturating_sub(1);
            }
        }
    }
    total
}

/// Incident similarity edges of a claim node.
fn similarity_edge_count(graph: &EntityGraph, claim_node: &NodeId) -> usize {
    graph
        .edges_of(claim_node)
        .filter(|(_, data)| data.kind.is_similarity())
        .count()
}
