//! Pluggable claim-embedding capability.
//!
//! Deep structural embeddings are an optional enrichment of the feature
//! table. The provider is selected once at engine construction; callers
//! that have no model plug in `ZeroEmbedding` and the pipeline still
//! produces fixed-dimension rows.

use crate::graph::EntityGraph;
use crate::types::ClaimId;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ClaimEmbedding {
    pub claim_id: ClaimId,
    pub vector: Vec<f32>,
}

pub trait EmbeddingProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Dimension of every vector this provider emits.
    fn dim(&self) -> usize;

    /// One embedding per requested claim, in input order. Unknown claim
    /// ids still get a vector (all zeros) rather than being dropped.
    fn embed(&self, graph: &EntityGraph, claim_ids: &[ClaimId]) -> Vec<ClaimEmbedding>;
}

/// Fallback provider: zero vectors of a fixed dimension.
#[derive(Debug, Clone, Copy)]
pub struct ZeroEmbedding {
    dim: usize,
}

impl ZeroEmbedding {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for ZeroEmbedding {
    fn default() -> Self {
        Self { dim: 16 }
    }
}

impl EmbeddingProvider for ZeroEmbedding {
    fn name(&self) -> &'static str {
        "zero"
    }

    fn dim(&self) -> usize {
        self.dim
    }

    fn embed(&self, _graph: &EntityGraph, claim_ids: &[ClaimId]) -> Vec<ClaimEmbedding> {
        claim_ids
            .iter()
            .map(|claim_id| ClaimEmbedding {
                claim_id: claim_id.clone(),
                vector: vec![0.0; self.dim],
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_provider_emits_fixed_dimension() {
        let graph = EntityGraph::new();
        let provider = ZeroEmbedding::new(8);
        let rows = provider.embed(&graph, &["C1".into(), "C2".into()]);
        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.vector.len() == 8));
        assert!(rows.iter().all(|r| r.vector.iter().all(|&x| x == 0.0)));
    }
}
