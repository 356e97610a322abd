//! Risk scoring strategies.
//!
//! Two independent scorers read the same graph:
//!   1. `HeuristicScorer`: fast, explainable, 0-100, with a per-signal
//!      breakdown for audit. Used on the hot ingestion path.
//!   2. `GraphFeatureScorer`: bounded 0-30 structural score that feeds
//!      the external supervised classifier as one input feature.
//!
//! Both are pure reads; neither mutates the graph.

use crate::claim::{ClaimRecord, EntityKind};
use crate::graph::{EntityGraph, NodeId};
use serde::{Deserialize, Serialize};

// ── Heuristic thresholds ─────────────────────────────────────────────────────

// Degree checks run after the claim itself is ingested, so the claim's
// own edge is included in the count. A provider needs five attached
// claims (degree 5, "> 4") before the hub signal fires.
const PROVIDER_HUB_DEGREE: usize = 4;
const PROVIDER_HUB_POINTS: u32 = 40;
const IP_SHARED_DEGREE: usize = 2;
const IP_SHARED_POINTS: u32 = 25;
const LAWYER_HUB_DEGREE: usize = 3;
const LAWYER_HUB_POINTS: u32 = 15;
const MISSING_DOCS_POINTS: u32 = 10;
const TEXT_SIGNAL_CAP: u32 = 10;
const HEURISTIC_MAX: u32 = 100;

const GRAPH_FEATURE_MAX: u32 = 30;

/// A scoring strategy over the shared graph. Implementations differ in
/// range and audience, not in inputs.
pub trait RiskScorer {
    fn name(&self) -> &'static str;

    /// Upper bound of `score`; outputs are capped here.
    fn max_score(&self) -> u32;

    fn score(&self, graph: &EntityGraph, claim: &ClaimRecord) -> u32;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskCategory {
    Low,
    Medium,
    High,
}

impl RiskCategory {
    /// Exhaustive, non-overlapping partition of 0-100.
    pub fn from_score(score: u32) -> Self {
        match score {
            0..=30 => RiskCategory::Low,
            31..=69 => RiskCategory::Medium,
            _ => RiskCategory::High,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskCategory::Low => "low",
            RiskCategory::Medium => "medium",
            RiskCategory::High => "high",
        }
    }
}

/// Per-signal contributions plus the raw degrees behind them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RiskBreakdown {
    pub provider_risk: u32,
    pub ip_risk: u32,
    pub lawyer_risk: u32,
    pub missing_docs_risk: u32,
    pub text_risk: u32,
    pub provider_degree: usize,
    pub ip_degree: usize,
    pub lawyer_degree: usize,
}

impl RiskBreakdown {
    pub fn total(&self) -> u32 {
        let sum = self.provider_risk
            + self.ip_risk
            + self.lawyer_risk
            + self.missing_docs_risk
            + self.text_risk;
        sum.min(HEURISTIC_MAX)
    }
}

/// Outbound risk result for a single claim.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub claim_id: String,
    pub risk_score: u32,
    pub risk_category: RiskCategory,
    pub breakdown: RiskBreakdown,
}

// ── Heuristic scorer ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicScorer;

impl HeuristicScorer {
    pub fn breakdown(&self, graph: &EntityGraph, claim: &ClaimRecord) -> RiskBreakdown {
        let mut breakdown = RiskBreakdown::default();

        if let Some(provider) = claim.provider() {
            let degree = graph.degree(&NodeId::entity(EntityKind::Provider, provider));
            breakdown.provider_degree = degree;
            if degree > PROVIDER_HUB_DEGREE {
                breakdown.provider_risk = PROVIDER_HUB_POINTS;
            }
        }

        if let Some(ip) = claim.ip() {
            let degree = graph.degree(&NodeId::entity(EntityKind::Ip, ip));
            breakdown.ip_degree = degree;
            if degree > IP_SHARED_DEGREE {
                breakdown.ip_risk = IP_SHARED_POINTS;
            }
        }

        if let Some(lawyer) = claim.lawyer() {
            let degree = graph.degree(&NodeId::entity(EntityKind::Lawyer, lawyer));
            breakdown.lawyer_degree = degree;
            if degree > LAWYER_HUB_DEGREE {
                breakdown.lawyer_risk = LAWYER_HUB_POINTS;
            }
        }

        if !claim.missing_docs.is_empty() {
            breakdown.missing_docs_risk = MISSING_DOCS_POINTS;
        }

        // External NLP score, 0-20, scaled down to at most 10 points.
        breakdown.text_risk = TEXT_SIGNAL_CAP.min(u32::from(claim.text_fraud_score) / 2);

        breakdown
    }

    pub fn assess(&self, graph: &EntityGraph, claim: &ClaimRecord) -> RiskAssessment {
        let breakdown = self.breakdown(graph, claim);
        let risk_score = breakdown.total();
        RiskAssessment {
            claim_id: claim.claim_id.clone(),
            risk_score,
            risk_category: RiskCategory::from_score(risk_score),
            breakdown,
        }
    }
}

impl RiskScorer for HeuristicScorer {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn max_score(&self) -> u32 {
        HEURISTIC_MAX
    }

    fn score(&self, graph: &EntityGraph, claim: &ClaimRecord) -> u32 {
        self.breakdown(graph, claim).total()
    }
}

// ── Graph-feature scorer ─────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Default)]
pub struct GraphFeatureScorer;

impl GraphFeatureScorer {
    /// Volume tier for a provider node's degree.
    pub fn provider_volume_score(&self, graph: &EntityGraph, provider: &str) -> u32 {
        match graph.degree(&NodeId::entity(EntityKind::Provider, provider)) {
            d if d >= 20 => 12,
            d if d >= 10 => 8,
            d if d >= 5 => 5,
            _ => 0,
        }
    }

    /// Density tier for a lawyer node's degree.
    pub fn lawyer_density_score(&self, graph: &EntityGraph, lawyer: &str) -> u32 {
        match graph.degree(&NodeId::entity(EntityKind::Lawyer, lawyer)) {
            d if d >= 25 => 12,
            d if d >= 10 => 7,
            d if d >= 5 => 4,
            _ => 0,
        }
    }

    /// How many claims this provider and lawyer handle together.
    pub fn provider_lawyer_combo_score(
        &self,
        graph: &EntityGraph,
        provider: &str,
        lawyer: &str,
    ) -> u32 {
        let provider_node = NodeId::entity(EntityKind::Provider, provider);
        let lawyer_node = NodeId::entity(EntityKind::Lawyer, lawyer);
        let provider_claims = graph.claim_neighbors(&provider_node);
        let lawyer_claims = graph.claim_neighbors(&lawyer_node);

        let overlap = provider_claims
            .iter()
            .filter(|cid| lawyer_claims.contains(cid))
            .count();
        match overlap {
            o if o >= 15 => 12,
            o if o >= 7 => 8,
            o if o >= 3 => 4,
            _ => 0,
        }
    }

    /// How many *other* claims were submitted from this claim's IP.
    pub fn ip_reuse_score(&self, graph: &EntityGraph, claim: &ClaimRecord) -> u32 {
        let Some(ip) = claim.ip() else {
            return 0;
        };
        let others = graph
            .claim_neighbors(&NodeId::entity(EntityKind::Ip, ip))
            .into_iter()
            .filter(|cid| cid.as_str() != claim.claim_id)
            .count();
        match others {
            o if o >= 10 => 8,
            o if o >= 5 => 5,
            o if o >= 2 => 3,
            _ => 0,
        }
    }
}

impl RiskScorer for GraphFeatureScorer {
    fn name(&self) -> &'static str {
        "graph_feature"
    }

    fn max_score(&self) -> u32 {
        GRAPH_FEATURE_MAX
    }

    fn score(&self, graph: &EntityGraph, claim: &ClaimRecord) -> u32 {
        let mut total = 0;
        if let Some(provider) = claim.provider() {
            total += self.provider_volume_score(graph, provider);
        }
        if let Some(lawyer) = claim.lawyer() {
            total += self.lawyer_density_score(graph, lawyer);
        }
        if let (Some(provider), Some(lawyer)) = (claim.provider(), claim.lawyer()) {
            total += self.provider_lawyer_combo_score(graph, provider, lawyer);
        }
        total += self.ip_reuse_score(graph, claim);
        total.min(GRAPH_FEATURE_MAX)
    }
}
