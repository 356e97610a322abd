//! ring-runner: headless demo runner for the claim-graph fraud engine.
//!
//! Usage:
//!   ring-runner --seed 42 --normal 120 --suspicious 60 --rings 3
//!   ring-runner --seed 42 --json > report.json

use anyhow::Result;
use claimgraph_core::{
    engine::{EngineConfig, GraphEngine},
    synthetic::{generate_population, PopulationSpec},
};
use std::env;

#[derive(serde::Serialize)]
struct RunReport {
    seed: u64,
    stats: claimgraph_core::export::GraphStats,
    ring_report: claimgraph_core::rings::RingReport,
    feature_rows: Vec<claimgraph_core::features::FeatureRow>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let spec = PopulationSpec {
        normal: parse_arg(&args, "--normal", 120usize),
        suspicious: parse_arg(&args, "--suspicious", 60usize),
        rings: parse_arg(&args, "--rings", 3usize),
    };
    let config = EngineConfig {
        time_window_days: parse_arg(&args, "--window-days", 7i64),
        min_ring_claims: parse_arg(&args, "--min-cluster", 3usize),
        ..EngineConfig::default()
    };
    let json = args.iter().any(|a| a == "--json");

    let claims = generate_population(seed, spec);
    let mut engine = GraphEngine::with_config(config);
    let ingested = engine.build_graph(claims)?;
    log::info!("ingested {ingested} claims");

    if json {
        let report = RunReport {
            seed,
            stats: engine.stats(),
            ring_report: engine.ring_report(),
            feature_rows: engine.feature_rows(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    print_summary(&engine, seed, ingested);
    Ok(())
}

fn print_summary(engine: &GraphEngine, seed: u64, ingested: usize) {
    let stats = engine.stats();
    let report = engine.ring_report();

    println!("claimgraph ring-runner");
    println!("  seed:    {seed}");
    println!("  claims:  {ingested}");
    println!();
    println!("=== GRAPH ===");
    println!("  nodes: {}", stats.total_nodes);
    println!("  edges: {}", stats.total_edges);
    for (kind, count) in &stats.node_counts {
        println!("    {kind:<10} {count}");
    }

    println!();
    println!("=== FRAUD RINGS ({}) ===", report.fraud_rings.len());
    for ring in &report.fraud_rings {
        println!(
            "  score {:>2} | {} claims | provider: {} | lawyer: {} | ip: {}",
            ring.score,
            ring.claim_count,
            ring.dominant_provider.as_deref().unwrap_or("-"),
            ring.dominant_lawyer.as_deref().unwrap_or("-"),
            ring.dominant_ip.as_deref().unwrap_or("-"),
        );
    }

    println!();
    println!(
        "=== SUSPICIOUS ENTITIES ({}) ===",
        report.suspicious_entities.len()
    );
    for entity in report.suspicious_entities.iter().take(15) {
        println!(
            "  {:<22} {:<22} degree {:>3} ({:?})",
            entity.kind, entity.entity, entity.degree, entity.reason
        );
    }

    println!();
    println!("=== TOP HEURISTIC RISK ===");
    let mut scored: Vec<_> = engine
        .claim_ids()
        .filter_map(|claim_id| engine.assess_claim(claim_id))
        .collect();
    scored.sort_by(|a, b| b.risk_score.cmp(&a.risk_score).then(a.claim_id.cmp(&b.claim_id)));
    for assessment in scored.iter().take(10) {
        println!(
            "  {:<12} score {:>3} ({})",
            assessment.claim_id,
            assessment.risk_score,
            assessment.risk_category.as_str()
        );
    }
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}
