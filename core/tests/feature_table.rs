//! Graph-feature scoring tiers and the classifier feature table.

use claimgraph_core::scoring::{GraphFeatureScorer, RiskScorer};
use claimgraph_core::{ClaimRecord, GraphEngine};

fn provider_claims(n: usize, provider: &str) -> Vec<ClaimRecord> {
    (1..=n)
        .map(|i| {
            let mut claim = ClaimRecord::new(format!("{provider}-{i}"));
            claim.provider_name = Some(provider.to_string());
            claim
        })
        .collect()
}

#[test]
fn provider_volume_tiers() {
    let scorer = GraphFeatureScorer;
    for (count, expected) in [(4, 0), (5, 5), (10, 8), (20, 12)] {
        let mut engine = GraphEngine::new();
        engine.build_graph(provider_claims(count, "Clinic")).unwrap();
        assert_eq!(
            scorer.provider_volume_score(engine.graph(), "Clinic"),
            expected,
            "provider with {count} claims"
        );
    }
}

#[test]
fn lawyer_density_tiers() {
    let scorer = GraphFeatureScorer;
    for (count, expected) in [(4, 0), (5, 4), (10, 7), (25, 12)] {
        let mut engine = GraphEngine::new();
        let claims: Vec<_> = (1..=count)
            .map(|i| {
                let mut claim = ClaimRecord::new(format!("C{i}"));
                claim.lawyer_name = Some("Firm".to_string());
                claim
            })
            .collect();
        engine.build_graph(claims).unwrap();
        assert_eq!(
            scorer.lawyer_density_score(engine.graph(), "Firm"),
            expected,
            "lawyer with {count} claims"
        );
    }
}

#[test]
fn combo_score_uses_claim_overlap() {
    let scorer = GraphFeatureScorer;
    let mut engine = GraphEngine::new();

    let mut claims = Vec::new();
    // Three claims on both the provider and the lawyer.
    for i in 1..=3 {
        let mut claim = ClaimRecord::new(format!("BOTH{i}"));
        claim.provider_name = Some("Clinic".to_string());
        claim.lawyer_name = Some("Firm".to_string());
        claims.push(claim);
    }
    // Extra claims on only one side do not count toward the overlap.
    for i in 1..=3 {
        let mut claim = ClaimRecord::new(format!("PROV{i}"));
        claim.provider_name = Some("Clinic".to_string());
        claims.push(claim);
    }
    engine.build_graph(claims).unwrap();

    assert_eq!(
        scorer.provider_lawyer_combo_score(engine.graph(), "Clinic", "Firm"),
        4
    );
    assert_eq!(
        scorer.provider_lawyer_combo_score(engine.graph(), "Clinic", "Unknown Firm"),
        0
    );
}

#[test]
fn ip_reuse_excludes_the_claim_itself() {
    let scorer = GraphFeatureScorer;
    let mut engine = GraphEngine::new();
    let claims: Vec<_> = (1..=3)
        .map(|i| {
            let mut claim = ClaimRecord::new(format!("C{i}"));
            claim.ip_address = Some("10.0.0.1".to_string());
            claim
        })
        .collect();
    engine.build_graph(claims).unwrap();

    // Three claims on the IP; two *others* from C1's point of view.
    let c1 = engine.claim("C1").unwrap();
    assert_eq!(scorer.ip_reuse_score(engine.graph(), c1), 3);
}

#[test]
fn graph_feature_score_is_capped_at_thirty() {
    let scorer = GraphFeatureScorer;
    let mut engine = GraphEngine::new();
    let claims: Vec<_> = (1..=20)
        .map(|i| {
            let mut claim = ClaimRecord::new(format!("C{i}"));
            claim.provider_name = Some("Clinic".to_string());
            claim.lawyer_name = Some("Firm".to_string());
            claim.ip_address = Some("10.0.0.1".to_string());
            claim
        })
        .collect();
    engine.build_graph(claims).unwrap();

    // Raw tiers: 12 (provider) + 7 (lawyer) + 12 (combo) + 8 (ip) = 39.
    let c1 = engine.claim("C1").unwrap();
    assert_eq!(scorer.score(engine.graph(), c1), 30);
}

#[test]
fn feature_rows_cover_every_claim() {
    let mut engine = GraphEngine::new();
    engine.build_graph(provider_claims(3, "Clinic")).unwrap();

    let rows = engine.feature_rows();
    assert_eq!(rows.len(), 3);

    for row in &rows {
        // All three claims share one provider and one component.
        assert_eq!(row.shared_providers, 2);
        assert_eq!(row.similarity_edge_count, 2);
        assert_eq!(row.component, rows[0].component);
        assert!(row.degree_centrality > 0.0);
        assert!(row.betweenness >= 0.0);
        assert_eq!(row.shared_lawyers, 0);
        assert_eq!(row.shared_ips, 0);
    }
}

#[test]
fn unknown_claim_gets_sentinel_component() {
    let mut engine = GraphEngine::new();
    engine.build_graph(provider_claims(2, "Clinic")).unwrap();

    let features = engine.features();
    let outsider = ClaimRecord::new("GHOST");
    let row = features.feature_row(engine.graph(), &outsider);
    assert_eq!(row.component, -1);
    assert_eq!(row.degree_centrality, 0.0);
    assert_eq!(row.graph_risk_score, 0);
}

#[test]
fn embeddings_default_to_zero_vectors() {
    let mut engine = GraphEngine::new();
    engine.build_graph(provider_claims(2, "Clinic")).unwrap();

    let embeddings = engine.claim_embeddings();
    assert_eq!(embeddings.len(), 2);
    for embedding in &embeddings {
        assert_eq!(embedding.vector.len(), 16);
        assert!(embedding.vector.iter().all(|&x| x == 0.0));
    }
}
