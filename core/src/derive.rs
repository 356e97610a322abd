//! Edge derivation: the batch passes that enrich a freshly built graph
//! with claim-claim edges.
//!
//! Both passes run once per `build_graph` over the full claim set.
//! They only ever add edges; direct relation edges are untouched.

use crate::claim::{ClaimRecord, EntityKind};
use crate::graph::{EdgeData, EdgeKind, EntityGraph, NodeId};
use crate::types::ClaimId;
use chrono::NaiveDate;
use std::collections::BTreeMap;

/// Identifier fields that produce similarity edges when two claims share
/// a value. Claimant names are deliberately excluded: one person filing
/// twice is common and not a coordination signal by itself.
pub const SIMILARITY_FIELDS: [EntityKind; 8] = [
    EntityKind::Provider,
    EntityKind::Lawyer,
    EntityKind::Ip,
    EntityKind::Address,
    EntityKind::Device,
    EntityKind::Email,
    EntityKind::Phone,
    EntityKind::Vehicle,
];

/// Professional identifiers weigh double: a shared provider or lawyer is
/// a far stronger coordination signal than a shared IP or address.
pub fn similarity_weight(kind: EntityKind) -> f64 {
    match kind {
        EntityKind::Provider | EntityKind::Lawyer => 2.0,
        _ => 1.0,
    }
}

const TIME_BURST_IP_WEIGHT: f64 = 1.5;
const TIME_BURST_STATE_WEIGHT: f64 = 0.8;

/// Run both derivation passes.
pub fn derive_edges(
    graph: &mut EntityGraph,
    claims: &BTreeMap<ClaimId, ClaimRecord>,
    window_days: i64,
) {
    add_similarity_edges(graph, claims);
    add_time_proximity_edges(graph, claims, window_days);
}

/// Connect every pair of claims sharing a value for a configured field.
/// O(claims) grouping, O(k^2) per bucket of size k.
pub fn add_similarity_edges(graph: &mut EntityGraph, claims: &BTreeMap<ClaimId, ClaimRecord>) {
    for &kind in &SIMILARITY_FIELDS {
        let mut buckets: BTreeMap<&str, Vec<&ClaimId>> = BTreeMap::new();
        for (claim_id, claim) in claims {
            if let Some(value) = claim.entity_value(kind) {
                buckets.entry(value).or_default().push(claim_id);
            }
        }

        for (value, members) in buckets {
            if members.len() < 2 {
                continue;
            }
            log::debug!(
                "similarity: {} claims share {} {:?}",
                members.len(),
                kind.as_str(),
                value
            );
            let data = EdgeData {
                kind: EdgeKind::Similar(kind),
                weight: similarity_weight(kind),
                days_apart: None,
            };
            for (i, &a) in members.iter().enumerate() {
                for &b in &members[i + 1..] {
                    graph.upsert_edge(NodeId::claim(a.clone()), NodeId::claim(b.clone()), data);
                }
            }
        }
    }
}

/// Connect claims filed within `window_days` of each other that also
/// share a state or an IP. Claims are sorted by date, so the inner scan
/// is a single forward sweep that breaks once the gap exceeds the window.
pub fn add_time_proximity_edges(
    graph: &mut EntityGraph,
    claims: &BTreeMap<ClaimId, ClaimRecord>,
    window_days: i64,
) {
    let mut dated: Vec<(&ClaimId, NaiveDate, &ClaimRecord)> = claims
        .iter()
        .filter_map(|(id, claim)| claim.effective_date().map(|date| (id, date, claim)))
        .collect();
    dated.sort_by(|a, b| (a.1, a.0).cmp(&(b.1, b.0)));

    for (i, &(id_a, date_a, claim_a)) in dated.iter().enumerate() {
        for &(id_b, date_b, claim_b) in &dated[i + 1..] {
            let gap = (date_b - date_a).num_days();
            if gap > window_days {
                break;
            }

            let same_state = match (claim_a.normalized_state(), claim_b.normalized_state()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            };
            let shared_ip = match (claim_a.ip(), claim_b.ip()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            };
            if !same_state && !shared_ip {
                continue;
            }

            let data = EdgeData {
                kind: EdgeKind::TimeBurst,
                weight: if shared_ip {
                    TIME_BURST_IP_WEIGHT
                } else {
                    TIME_BURST_STATE_WEIGHT
                },
                days_apart: Some(gap),
            };
            graph.upsert_edge(NodeId::claim(id_a.clone()), NodeId::claim(id_b.clone()), data);
        }
    }
}
