//! Similarity and time-proximity edge derivation.

use chrono::NaiveDate;
use claimgraph_core::graph::{EdgeKind, NodeId};
use claimgraph_core::{ClaimRecord, EngineConfig, EntityKind, GraphEngine};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn shared_provider_gets_professional_weight() {
    let mut engine = GraphEngine::new();
    let mut a = ClaimRecord::new("A");
    a.provider_name = Some("Dr. Chen".to_string());
    let mut b = ClaimRecord::new("B");
    b.provider_name = Some("Dr. Chen".to_string());
    engine.build_graph(vec![a, b]).unwrap();

    let edge = engine
        .graph()
        .edge(&NodeId::claim("A"), &NodeId::claim("B"))
        .expect("similarity edge between A and B");
    assert_eq!(edge.kind, EdgeKind::Similar(EntityKind::Provider));
    assert_eq!(edge.weight, 2.0);
}

#[test]
fn shared_device_gets_base_weight() {
    let mut engine = GraphEngine::new();
    let mut a = ClaimRecord::new("A");
    a.device_id = Some("DEV-1234".to_string());
    let mut b = ClaimRecord::new("B");
    b.device_id = Some("DEV-1234".to_string());
    engine.build_graph(vec![a, b]).unwrap();

    let edge = engine
        .graph()
        .edge(&NodeId::claim("A"), &NodeId::claim("B"))
        .expect("similarity edge between A and B");
    assert_eq!(edge.kind, EdgeKind::Similar(EntityKind::Device));
    assert_eq!(edge.weight, 1.0);
}

#[test]
fn claimant_name_alone_produces_no_similarity_edge() {
    let mut engine = GraphEngine::new();
    let mut a = ClaimRecord::new("A");
    a.claimant_name = Some("Jane Doe".to_string());
    let mut b = ClaimRecord::new("B");
    b.claimant_name = Some("Jane Doe".to_string());
    engine.build_graph(vec![a, b]).unwrap();

    // Connected through the person node, but no claim-claim edge.
    assert!(engine
        .graph()
        .edge(&NodeId::claim("A"), &NodeId::claim("B"))
        .is_none());
    assert_eq!(engine.related_claims("A"), vec!["B"]);
}

#[test]
fn same_state_within_window_links_claims() {
    let mut engine = GraphEngine::new();
    let mut a = ClaimRecord::new("A");
    a.state = Some("CA".to_string());
    a.submission_date = Some(date(2024, 3, 1));
    let mut b = ClaimRecord::new("B");
    b.state = Some("CA".to_string());
    b.submission_date = Some(date(2024, 3, 5));
    let mut c = ClaimRecord::new("C");
    c.state = Some("CA".to_string());
    c.submission_date = Some(date(2024, 3, 20));
    engine.build_graph(vec![a, b, c]).unwrap();

    let edge = engine
        .graph()
        .edge(&NodeId::claim("A"), &NodeId::claim("B"))
        .expect("time-proximity edge between A and B");
    assert_eq!(edge.kind, EdgeKind::TimeBurst);
    assert_eq!(edge.weight, 0.8);
    assert_eq!(edge.days_apart, Some(4));

    // C is 15 days past B: outside the 7-day window.
    assert!(engine
        .graph()
        .edge(&NodeId::claim("B"), &NodeId::claim("C"))
        .is_none());
}

#[test]
fn different_state_no_ip_means_no_time_edge() {
    let mut engine = GraphEngine::new();
    let mut a = ClaimRecord::new("A");
    a.state = Some("CA".to_string());
    a.submission_date = Some(date(2024, 3, 1));
    let mut b = ClaimRecord::new("B");
    b.state = Some("NY".to_string());
    b.submission_date = Some(date(2024, 3, 2));
    engine.build_graph(vec![a, b]).unwrap();

    assert!(engine
        .graph()
        .edge(&NodeId::claim("A"), &NodeId::claim("B"))
        .is_none());
}

#[test]
fn shared_ip_upgrades_time_edge_weight() {
    let mut engine = GraphEngine::new();
    let mut a = ClaimRecord::new("A");
    a.state = Some("CA".to_string());
    a.ip_address = Some("10.1.1.1".to_string());
    a.submission_date = Some(date(2024, 3, 1));
    let mut b = ClaimRecord::new("B");
    b.state = Some("NY".to_string());
    b.ip_address = Some("10.1.1.1".to_string());
    b.submission_date = Some(date(2024, 3, 3));
    engine.build_graph(vec![a, b]).unwrap();

    // The shared-IP similarity edge (1.0) is superseded by the heavier
    // IP-correlated time edge (1.5).
    let edge = engine
        .graph()
        .edge(&NodeId::claim("A"), &NodeId::claim("B"))
        .expect("edge between A and B");
    assert_eq!(edge.kind, EdgeKind::TimeBurst);
    assert_eq!(edge.weight, 1.5);
    assert_eq!(edge.days_apart, Some(2));
}

#[test]
fn accident_date_is_fallback_when_submission_missing() {
    let mut engine = GraphEngine::new();
    let mut a = ClaimRecord::new("A");
    a.state = Some("TX".to_string());
    a.accident_date = Some(date(2024, 6, 1));
    let mut b = ClaimRecord::new("B");
    b.state = Some("TX".to_string());
    b.submission_date = Some(date(2024, 6, 4));
    engine.build_graph(vec![a, b]).unwrap();

    let edge = engine
        .graph()
        .edge(&NodeId::claim("A"), &NodeId::claim("B"))
        .expect("time-proximity edge");
    assert_eq!(edge.days_apart, Some(3));
}

#[test]
fn undated_claims_are_skipped_silently() {
    let mut engine = GraphEngine::new();
    let mut a = ClaimRecord::new("A");
    a.state = Some("TX".to_string());
    let mut b = ClaimRecord::new("B");
    b.state = Some("TX".to_string());
    b.submission_date = Some(date(2024, 6, 4));
    engine.build_graph(vec![a, b]).unwrap();

    assert!(engine
        .graph()
        .edge(&NodeId::claim("A"), &NodeId::claim("B"))
        .is_none());
}

#[test]
fn window_is_configurable() {
    let config = EngineConfig {
        time_window_days: 30,
        ..EngineConfig::default()
    };
    let mut engine = GraphEngine::with_config(config);
    let mut a = ClaimRecord::new("A");
    a.state = Some("CA".to_string());
    a.submission_date = Some(date(2024, 3, 1));
    let mut b = ClaimRecord::new("B");
    b.state = Some("CA".to_string());
    b.submission_date = Some(date(2024, 3, 20));
    engine.build_graph(vec![a, b]).unwrap();

    let edge = engine
        .graph()
        .edge(&NodeId::claim("A"), &NodeId::claim("B"))
        .expect("edge within widened window");
    assert_eq!(edge.days_apart, Some(19));
}
