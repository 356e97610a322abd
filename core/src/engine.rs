//! The graph engine: one explicit object owning the shared graph.
//!
//! RULES:
//!   - The engine is constructed and owned by the call site; there is no
//!     module-level shared state.
//!   - Mutation (`add_claim`, `build_graph`, `process_claim`, `reset`)
//!     takes `&mut self`; every derived computation takes `&self`. The
//!     borrow checker enforces the one-mutator / many-readers contract;
//!     wrap the engine in an `RwLock` to share it across threads.
//!   - All operations are synchronous, CPU-bound and in-memory. The
//!     graph lives as long as the engine; rebuild it by re-ingesting
//!     the claim population.

use crate::claim::ClaimRecord;
use crate::derive::derive_edges;
use crate::embedding::{ClaimEmbedding, EmbeddingProvider, ZeroEmbedding};
use crate::error::GraphResult;
use crate::export::{export_graph, export_subgraph, graph_stats, GraphExport, GraphStats};
use crate::features::{FeatureRow, GraphFeatures};
use crate::graph::{EdgeData, EdgeKind, EntityGraph, NodeId};
use crate::rings::{self, FraudRing, RingReport};
use crate::scoring::{HeuristicScorer, RiskAssessment};
use crate::types::ClaimId;
use std::collections::{BTreeMap, BTreeSet, VecDeque};

/// Engine tunables. Defaults match the calibrated production thresholds.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Day window for the time-proximity pass.
    pub time_window_days: i64,
    /// Minimum claims for a component to qualify for ring analysis.
    pub min_ring_claims: usize,
    /// Degree at which a provider/lawyer/IP node is flagged a hub.
    pub hub_degree: usize,
    /// Distinct claims for a provider+lawyer pair to be flagged a combo.
    pub combo_min_claims: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_window_days: 7,
            min_ring_claims: 3,
            hub_degree: 8,
            combo_min_claims: 4,
        }
    }
}

pub struct GraphEngine {
    config: EngineConfig,
    graph: EntityGraph,
    claims: BTreeMap<ClaimId, ClaimRecord>,
    heuristic: HeuristicScorer,
    embedder: Box<dyn EmbeddingProvider>,
}

impl Default for GraphEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphEngine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Self {
            config,
            graph: EntityGraph::new(),
            claims: BTreeMap::new(),
            heuristic: HeuristicScorer,
            embedder: Box::new(ZeroEmbedding::default()),
        }
    }

    /// Swap the embedding provider at construction time.
    pub fn with_embedder(mut self, embedder: Box<dyn EmbeddingProvider>) -> Self {
        self.embedder = embedder;
        self
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn graph(&self) -> &EntityGraph {
        &self.graph
    }

    pub fn claim(&self, claim_id: &str) -> Option<&ClaimRecord> {
        self.claims.get(claim_id)
    }

    pub fn claim_count(&self) -> usize {
        self.claims.len()
    }

    /// Ingested claim ids, sorted.
    pub fn claim_ids(&self) -> impl Iterator<Item = &ClaimId> {
        self.claims.keys()
    }

    // ── Ingestion ──────────────────────────────────────────────

    /// Ingest one claim: validation first, then the claim node, its
    /// entity nodes and direct relation edges. Validation failure leaves
    /// the graph untouched. Re-adding a claim id updates its record.
    pub fn add_claim(&mut self, claim: ClaimRecord) -> GraphResult<()> {
        claim.validate()?;

        let claim_node = NodeId::claim(claim.claim_id.clone());
        self.graph.add_node(claim_node.clone());
        for (kind, value) in claim.entity_refs() {
            self.graph.upsert_edge(
                claim_node.clone(),
                NodeId::entity(kind, value),
                EdgeData {
                    kind: EdgeKind::Relation(kind),
                    weight: 1.0,
                    days_apart: None,
                },
            );
        }

        log::debug!("ingested claim {}", claim.claim_id);
        self.claims.insert(claim.claim_id.clone(), claim);
        Ok(())
    }

    /// Batch ingest, then run edge derivation once over the full set.
    /// Returns the number of claims ingested. An invalid record aborts
    /// the batch at that record; earlier claims remain ingested.
    pub fn build_graph(
        &mut self,
        claims: impl IntoIterator<Item = ClaimRecord>,
    ) -> GraphResult<usize> {
        let mut ingested = 0;
        for claim in claims {
            self.add_claim(claim)?;
            ingested += 1;
        }
        derive_edges(&mut self.graph, &self.claims, self.config.time_window_days);
        log::info!(
            "built graph: {} claims, {} nodes, {} edges",
            self.claims.len(),
            self.graph.node_count(),
            self.graph.edge_count()
        );
        Ok(ingested)
    }

    /// Drop every node, edge and claim record.
    pub fn reset(&mut self) {
        self.graph.clear();
        self.claims.clear();
    }

    // ── Heuristic scoring ──────────────────────────────────────

    /// End-to-end path for live intake: ingest, then score against the
    /// graph that already includes this claim's own edges. A ring is
    /// flagged the moment it completes, not one claim late.
    pub fn process_claim(&mut self, claim: ClaimRecord) -> GraphResult<RiskAssessment> {
        self.add_claim(claim.clone())?;
        Ok(self.heuristic.assess(&self.graph, &claim))
    }

    /// Score a claim against the current graph without ingesting it.
    pub fn calculate_risk_score(&self, claim: &ClaimRecord) -> RiskAssessment {
        self.heuristic.assess(&self.graph, claim)
    }

    /// Score an already-ingested claim by id. None for unknown ids.
    pub fn assess_claim(&self, claim_id: &str) -> Option<RiskAssessment> {
        self.claims
            .get(claim_id)
            .map(|claim| self.heuristic.assess(&self.graph, claim))
    }

    // ── Queries ────────────────────────────────────────────────

    /// Distinct other claims sharing any entity with this claim, via
    /// two-hop traversal. Sorted; empty for unknown or isolated claims.
    pub fn related_claims(&self, claim_id: &str) -> Vec<ClaimId> {
        let claim_node = NodeId::claim(claim_id);
        let mut related: BTreeSet<&ClaimId> = BTreeSet::new();
        for nbr in self.graph.neighbors(&claim_node) {
            if nbr.is_claim() {
                continue;
            }
            for cid in self.graph.claim_neighbors(nbr) {
                if cid != claim_id {
                    related.insert(cid);
                }
            }
        }
        related.into_iter().cloned().collect()
    }

    /// Breadth-first expansion up to `hops` levels around a claim,
    /// exported as the induced subgraph. Empty for unknown ids.
    pub fn claim_subgraph(&self, claim_id: &str, hops: usize) -> GraphExport {
        let start = NodeId::claim(claim_id);
        if !self.graph.contains(&start) {
            return GraphExport::empty();
        }

        let mut visited: BTreeSet<NodeId> = BTreeSet::from([start.clone()]);
        let mut frontier = VecDeque::from([(start, 0usize)]);
        while let Some((node, depth)) = frontier.pop_front() {
            if depth == hops {
                continue;
            }
            for nbr in self.graph.neighbors(&node) {
                if visited.insert(nbr.clone()) {
                    frontier.push_back((nbr.clone(), depth + 1));
                }
            }
        }

        export_subgraph(&self.graph, &visited)
    }

    // ── Derived computation ────────────────────────────────────

    /// Snapshot of centralities and component labels for the current
    /// graph. The most expensive call here; reuse it while the graph is
    /// unchanged.
    pub fn features(&self) -> GraphFeatures {
        GraphFeatures::compute(&self.graph)
    }

    /// One feature row per ingested claim, for the external classifier.
    pub fn feature_rows(&self) -> Vec<FeatureRow> {
        let features = self.features();
        self.claims
            .values()
            .map(|claim| features.feature_row(&self.graph, claim))
            .collect()
    }

    /// One embedding per ingested claim from the configured provider.
    pub fn claim_embeddings(&self) -> Vec<ClaimEmbedding> {
        let claim_ids: Vec<ClaimId> = self.claims.keys().cloned().collect();
        self.embedder.embed(&self.graph, &claim_ids)
    }

    /// Fraud rings among components with at least `min_claims` claims.
    pub fn detect_suspicious_clusters(&self, min_claims: usize) -> Vec<FraudRing> {
        rings::detect_rings(&self.graph, &self.features(), min_claims)
    }

    /// Full ring-analysis bundle using the configured thresholds.
    pub fn ring_report(&self) -> RingReport {
        rings::build_report(
            &self.graph,
            &self.claims,
            &self.features(),
            self.config.min_ring_claims,
            self.config.hub_degree,
            self.config.combo_min_claims,
        )
    }

    // ── Export ─────────────────────────────────────────────────

    /// Every node and edge, with recomputed risk levels on claim nodes.
    pub fn export(&self) -> GraphExport {
        export_graph(&self.graph, &self.claims)
    }

    pub fn stats(&self) -> GraphStats {
        graph_stats(&self.graph)
    }
}
