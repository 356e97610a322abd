//! Fraud-ring and suspicious-entity detection.
//!
//! A ring is suspicious by its pattern of connection, not by any single
//! claim's content: a connected component whose claims keep landing on
//! the same provider, lawyer or IP.

use crate::claim::{ClaimRecord, EntityKind};
use crate::features::GraphFeatures;
use crate::graph::{EntityGraph, NodeId};
use crate::types::ClaimId;
use serde::Serialize;
use std::collections::BTreeMap;

// Ring scoring: +5 per dominant entity shared by at least this many of
// the component's claims, +5 for a large component, reported at >= 10.
const SHARED_ENTITY_MIN: usize = 3;
const LARGE_RING_CLAIMS: usize = 6;
const RING_SIGNAL_POINTS: u32 = 5;
const RING_REPORT_MIN: u32 = 10;

const CENTRAL_HOTLIST_SIZE: usize = 10;

#[derive(Debug, Clone, Serialize)]
pub struct FraudRing {
    pub claims: Vec<ClaimId>,
    pub claim_count: usize,
    pub dominant_provider: Option<String>,
    pub dominant_lawyer: Option<String>,
    pub dominant_ip: Option<String>,
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SuspicionReason {
    HighDegree,
    RepeatedCombo,
    Central,
}

#[derive(Debug, Clone, Serialize)]
pub struct SuspiciousEntity {
    pub entity: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub degree: usize,
    pub reason: SuspicionReason,
}

/// Full ring analysis bundle for the investigation consumers.
#[derive(Debug, Clone, Serialize)]
pub struct RingReport {
    /// Export ids of every component containing at least one claim.
    pub clusters: Vec<Vec<String>>,
    pub suspicious_entities: Vec<SuspiciousEntity>,
    pub fraud_rings: Vec<FraudRing>,
}

/// Components containing at least one claim node.
pub fn claim_components(features: &GraphFeatures) -> Vec<Vec<NodeId>> {
    features
        .components()
        .iter()
        .filter(|comp| comp.iter().any(NodeId::is_claim))
        .cloned()
        .collect()
}

/// Components that qualify for ring analysis: at least one claim node
/// and at least `min_claims` claim nodes. One entry per component.
pub fn suspicious_clusters(features: &GraphFeatures, min_claims: usize) -> Vec<Vec<NodeId>> {
    claim_components(features)
        .into_iter()
        .filter(|comp| comp.iter().filter(|n| n.is_claim()).count() >= min_claims)
        .collect()
}

/// Score each qualifying component and keep the ones that look like
/// coordinated rings.
pub fn detect_rings(
    graph: &EntityGraph,
    features: &GraphFeatures,
    min_claims: usize,
) -> Vec<FraudRing> {
    let mut rings = Vec::new();

    for component in suspicious_clusters(features, min_claims) {
        let claim_nodes: Vec<&NodeId> = component.iter().filter(|n| n.is_claim()).collect();

        let (dominant_provider, provider_freq) =
            dominant_entity(graph, &claim_nodes, EntityKind::Provider);
        let (dominant_lawyer, lawyer_freq) =
            dominant_entity(graph, &claim_nodes, EntityKind::Lawyer);
        let (dominant_ip, ip_freq) = dominant_entity(graph, &claim_nodes, EntityKind::Ip);

        let mut score = 0;
        if provider_freq >= SHARED_ENTITY_MIN {
            score += RING_SIGNAL_POINTS;
        }
        if lawyer_freq >= SHARED_ENTITY_MIN {
            score += RING_SIGNAL_POINTS;
        }
        if ip_freq >= SHARED_ENTITY_MIN {
            score += RING_SIGNAL_POINTS;
        }
        if claim_nodes.len() >= LARGE_RING_CLAIMS {
            score += RING_SIGNAL_POINTS;
        }
        if score < RING_REPORT_MIN {
            continue;
        }

        let mut claims: Vec<ClaimId> = claim_nodes
            .iter()
            .filter_map(|n| match n {
                NodeId::Claim(cid) => Some(cid.clone()),
                NodeId::Entity(..) => None,
            })
            .collect();
        claims.sort();

        log::info!(
            "fraud ring: {} claims, score {score}, provider {:?}",
            claims.len(),
            dominant_provider
        );
        rings.push(FraudRing {
            claim_count: claims.len(),
            claims,
            dominant_provider,
            dominant_lawyer,
            dominant_ip,
            score,
        });
    }
    rings
}

/// Most frequent entity of `kind` across the component's claims, with
/// its claim count. Ties break toward the lexicographically smaller
/// value so reports are stable.
fn dominant_entity(
    graph: &EntityGraph,
    claim_nodes: &[&NodeId],
    kind: EntityKind,
) -> (Option<String>, usize) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for claim_node in claim_nodes {
        for value in graph.entity_neighbors(claim_node, kind) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(b.0.cmp(a.0)))
        .map_or((None, 0), |(value, freq)| (Some(value.to_string()), freq))
}

/// Provider/lawyer/IP nodes with enough attached claims to be hubs.
pub fn hub_entities(graph: &EntityGraph, hub_degree: usize) -> Vec<SuspiciousEntity> {
    let mut hubs = Vec::new();
    for node in graph.sorted_nodes() {
        let NodeId::Entity(kind, value) = node else {
            continue;
        };
        if !matches!(kind, EntityKind::Provider | EntityKind::Lawyer | EntityKind::Ip) {
            continue;
        }
        let degree = graph.degree(node);
        if degree >= hub_degree {
            hubs.push(SuspiciousEntity {
                entity: value.clone(),
                kind: kind.as_str().to_string(),
                degree,
                reason: SuspicionReason::HighDegree,
            });
        }
    }
    hubs
}

/// Provider+lawyer pairs that co-occur on enough distinct claims.
pub fn combo_entities(
    claims: &BTreeMap<ClaimId, ClaimRecord>,
    min_claims: usize,
) -> Vec<SuspiciousEntity> {
    let mut counts: BTreeMap<(&str, &str), usize> = BTreeMap::new();
    for claim in claims.values() {
        if let (Some(provider), Some(lawyer)) = (claim.provider(), claim.lawyer()) {
            *counts.entry((provider, lawyer)).or_insert(0) += 1;
        }
    }
    counts
        .into_iter()
        .filter(|&(_, freq)| freq >= min_claims)
        .map(|((provider, lawyer), freq)| SuspiciousEntity {
            entity: format!("{provider} + {lawyer}"),
            kind: "provider_lawyer_combo".to_string(),
            degree: freq,
            reason: SuspicionReason::RepeatedCombo,
        })
        .collect()
}

/// Top non-claim nodes by betweenness with a nonzero score: the
/// connectors that tie otherwise-separate claim groups together.
pub fn central_connectors(graph: &EntityGraph, features: &GraphFeatures) -> Vec<SuspiciousEntity> {
    let mut ranked: Vec<(&NodeId, f64)> = graph
        .sorted_nodes()
        .into_iter()
        .map(|node| (node, features.betweenness_of(node)))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    ranked
        .into_iter()
        .take(CENTRAL_HOTLIST_SIZE)
        .filter(|(node, score)| !node.is_claim() && *score > 0.0)
        .map(|(node, _)| {
            let (kind, value) = match node {
                NodeId::Entity(kind, value) => (kind.as_str().to_string(), value.clone()),
                NodeId::Claim(_) => unreachable!("claims filtered above"),
            };
            SuspiciousEntity {
                entity: value,
                kind,
                degree: graph.degree(node),
                reason: SuspicionReason::Central,
            }
        })
        .collect()
}

/// Assemble the full outbound report.
pub fn build_report(
    graph: &EntityGraph,
    claims: &BTreeMap<ClaimId, ClaimRecord>,
    features: &GraphFeatures,
    min_ring_claims: usize,
    hub_degree: usize,
    combo_min_claims: usize,
) -> RingReport {
    let clusters = claim_components(features)
        .into_iter()
        .map(|comp| comp.iter().map(NodeId::export_id).collect())
        .collect();

    let mut suspicious_entities = hub_entities(graph, hub_degree);
    suspicious_entities.extend(combo_entities(claims, combo_min_claims));
    suspicious_entities.extend(central_connectors(graph, features));

    RingReport {
        clusters,
        suspicious_entities,
        fraud_rings: detect_rings(graph, features, min_ring_claims),
    }
}
