//! The entity graph store.
//!
//! RULE: Only this module touches adjacency. Scoring, clustering and
//! export go through the lookup primitives; they never see the maps.
//!
//! The graph is simple and undirected: at most one edge per node pair,
//! re-adding an existing edge keeps whichever data carries the heavier
//! weight. Edges are only ever added, never removed. Lookups against
//! absent nodes return empty/zero, never an error.

use crate::claim::EntityKind;
use crate::types::ClaimId;
use std::collections::{BTreeMap, HashMap};

/// Compound node identity. Claims live in their own identifier space;
/// entities are keyed by (kind, value) so distinct categories sharing a
/// literal value stay distinct nodes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NodeId {
    Claim(ClaimId),
    Entity(EntityKind, String),
}

impl NodeId {
    pub fn claim(id: impl Into<String>) -> Self {
        NodeId::Claim(id.into())
    }

    pub fn entity(kind: EntityKind, value: impl Into<String>) -> Self {
        NodeId::Entity(kind, value.into())
    }

    pub fn is_claim(&self) -> bool {
        matches!(self, NodeId::Claim(_))
    }

    pub fn kind_str(&self) -> &'static str {
        match self {
            NodeId::Claim(_) => "claim",
            NodeId::Entity(kind, _) => kind.as_str(),
        }
    }

    /// Stable identifier used by export consumers, e.g. "claim:C1"
    /// or "provider:Dr. Chen".
    pub fn export_id(&self) -> String {
        match self {
            NodeId::Claim(id) => format!("claim:{id}"),
            NodeId::Entity(kind, value) => format!("{}:{}", kind.as_str(), value),
        }
    }
}

/// Typed edge payload. One per node pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeData {
    pub kind: EdgeKind,
    pub weight: f64,
    /// Day gap carried by time-proximity edges.
    pub days_apart: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeKind {
    /// Direct claim-entity relation (filed, treated_by, ...).
    Relation(EntityKind),
    /// Claim-claim: both claims share the same value for this field.
    Similar(EntityKind),
    /// Claim-claim: close in time and correlated by state or IP.
    TimeBurst,
}

impl EdgeKind {
    pub fn label(&self) -> &'static str {
        match self {
            EdgeKind::Relation(kind) => kind.relation_label(),
            EdgeKind::Similar(kind) => match kind {
                EntityKind::Person => "similar_person",
                EntityKind::Provider => "similar_provider",
                EntityKind::Lawyer => "similar_lawyer",
                EntityKind::Ip => "similar_ip",
                EntityKind::Shop => "similar_shop",
                EntityKind::Phone => "similar_phone",
                EntityKind::Email => "similar_email",
                EntityKind::Address => "similar_address",
                EntityKind::Device => "similar_device",
                EntityKind::Vehicle => "similar_vehicle",
            },
            EdgeKind::TimeBurst => "time_burst",
        }
    }

    pub fn is_similarity(&self) -> bool {
        matches!(self, EdgeKind::Similar(_))
    }
}

/// Undirected adjacency store. Neighbor maps are ordered so every
/// traversal over the graph is deterministic.
#[derive(Debug, Default)]
pub struct EntityGraph {
    adjacency: HashMap<NodeId, BTreeMap<NodeId, EdgeData>>,
}

impl EntityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Idempotent node insert.
    pub fn add_node(&mut self, id: NodeId) {
        self.adjacency.entry(id).or_default();
    }

    /// Insert or update the single undirected edge between `a` and `b`.
    /// An existing edge is only replaced by data with a strictly heavier
    /// weight, so derivation passes are order-independent.
    pub fn upsert_edge(&mut self, a: NodeId, b: NodeId, data: EdgeData) {
        if a == b {
            return;
        }
        self.add_node(a.clone());
        self.add_node(b.clone());

        let keep_existing = self
            .adjacency
            .get(&a)
            .and_then(|nbrs| nbrs.get(&b))
            .is_some_and(|existing| existing.weight >= data.weight);
        if keep_existing {
            return;
        }

        if let Some(nbrs) = self.adjacency.get_mut(&a) {
            nbrs.insert(b.clone(), data);
        }
        if let Some(nbrs) = self.adjacency.get_mut(&b) {
            nbrs.insert(a, data);
        }
    }

    pub fn contains(&self, id: &NodeId) -> bool {
        self.adjacency.contains_key(id)
    }

    /// Number of distinct neighbors. Zero for absent nodes.
    pub fn degree(&self, id: &NodeId) -> usize {
        self.adjacency.get(id).map_or(0, |nbrs| nbrs.len())
    }

    /// Neighbors in stable order. Empty for absent nodes.
    pub fn neighbors(&self, id: &NodeId) -> impl Iterator<Item = &NodeId> {
        self.adjacency.get(id).into_iter().flat_map(|nbrs| nbrs.keys())
    }

    /// Incident edges of a node, with neighbor and payload.
    pub fn edges_of(&self, id: &NodeId) -> impl Iterator<Item = (&NodeId, &EdgeData)> {
        self.adjacency.get(id).into_iter().flat_map(|nbrs| nbrs.iter())
    }

    pub fn edge(&self, a: &NodeId, b: &NodeId) -> Option<&EdgeData> {
        self.adjacency.get(a).and_then(|nbrs| nbrs.get(b))
    }

    pub fn nodes(&self) -> impl Iterator<Item = &NodeId> {
        self.adjacency.keys()
    }

    /// All nodes, sorted. Analyses iterate this so results are stable.
    pub fn sorted_nodes(&self) -> Vec<&NodeId> {
        let mut nodes: Vec<&NodeId> = self.adjacency.keys().collect();
        nodes.sort();
        nodes
    }

    /// Each undirected edge exactly once, in sorted endpoint order.
    pub fn sorted_edges(&self) -> Vec<(&NodeId, &NodeId, &EdgeData)> {
        let mut edges = Vec::new();
        for a in self.sorted_nodes() {
            for (b, data) in self.edges_of(a) {
                if a < b {
                    edges.push((a, b, data));
                }
            }
        }
        edges
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        let degree_sum: usize = self.adjacency.values().map(|nbrs| nbrs.len()).sum();
        degree_sum / 2
    }

    /// Claim-node neighbors of a node (e.g. all claims touching a provider).
    pub fn claim_neighbors(&self, id: &NodeId) -> Vec<&ClaimId> {
        self.neighbors(id)
            .filter_map(|n| match n {
                NodeId::Claim(cid) => Some(cid),
                NodeId::Entity(..) => None,
            })
            .collect()
    }

    /// Entity neighbors of a claim filtered by kind.
    pub fn entity_neighbors(&self, id: &NodeId, kind: EntityKind) -> Vec<&str> {
        self.neighbors(id)
            .filter_map(|n| match n {
                NodeId::Entity(k, value) if *k == kind => Some(value.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.adjacency.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn relation(kind: EntityKind) -> EdgeData {
        EdgeData {
            kind: EdgeKind::Relation(kind),
            weight: 1.0,
            days_apart: None,
        }
    }

    #[test]
    fn absent_nodes_read_as_empty() {
        let g = EntityGraph::new();
        let missing = NodeId::claim("nope");
        assert_eq!(g.degree(&missing), 0);
        assert!(g.neighbors(&missing).next().is_none());
        assert!(!g.contains(&missing));
    }

    #[test]
    fn edges_are_undirected_and_deduplicated() {
        let mut g = EntityGraph::new();
        let c = NodeId::claim("C1");
        let p = NodeId::entity(EntityKind::Provider, "Dr. Chen");
        g.upsert_edge(c.clone(), p.clone(), relation(EntityKind::Provider));
        g.upsert_edge(p.clone(), c.clone(), relation(EntityKind::Provider));

        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.degree(&c), 1);
        assert_eq!(g.degree(&p), 1);
    }

    #[test]
    fn heavier_weight_wins_on_reinsert() {
        let mut g = EntityGraph::new();
        let a = NodeId::claim("A");
        let b = NodeId::claim("B");
        g.upsert_edge(
            a.clone(),
            b.clone(),
            EdgeData {
                kind: EdgeKind::Similar(EntityKind::Ip),
                weight: 1.0,
                days_apart: None,
            },
        );
        g.upsert_edge(
            a.clone(),
            b.clone(),
            EdgeData {
                kind: EdgeKind::Similar(EntityKind::Provider),
                weight: 2.0,
                days_apart: None,
            },
        );
        g.upsert_edge(
            a.clone(),
            b.clone(),
            EdgeData {
                kind: EdgeKind::TimeBurst,
                weight: 0.8,
                days_apart: Some(2),
            },
        );

        let edge = g.edge(&a, &b).unwrap();
        assert_eq!(edge.kind, EdgeKind::Similar(EntityKind::Provider));
        assert_eq!(edge.weight, 2.0);
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn same_value_different_kind_stays_distinct() {
        let mut g = EntityGraph::new();
        let c = NodeId::claim("C1");
        g.upsert_edge(
            c.clone(),
            NodeId::entity(EntityKind::Provider, "Chen LLC"),
            relation(EntityKind::Provider),
        );
        g.upsert_edge(
            c.clone(),
            NodeId::entity(EntityKind::Lawyer, "Chen LLC"),
            relation(EntityKind::Lawyer),
        );

        assert_eq!(g.node_count(), 3);
        assert_eq!(g.degree(&c), 2);
    }
}
