//! claimgraph-core: entity-graph fraud engine for insurance claims.
//!
//! Claims and the people, providers, lawyers and IP addresses they
//! reference form one connected undirected graph. Risk signals fall out
//! of graph structure: shared-service clustering, degree-based hub
//! detection and connected-component ring discovery.
//!
//! PIPELINE (see engine.rs):
//!   claim records → `GraphEngine::build_graph` (ingest + edge
//!   derivation) → heuristic scoring / feature table / ring detection
//!   → export to the HTTP and display layers.
//!
//! The HTTP layer, claim persistence, the NLP consistency checker and
//! the supervised classifier are external collaborators; this crate
//! only exchanges data shapes with them.

pub mod analysis;
pub mod claim;
pub mod derive;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod export;
pub mod features;
pub mod graph;
pub mod rings;
pub mod rng;
pub mod scoring;
pub mod synthetic;
pub mod types;

pub use claim::{ClaimRecord, EntityKind};
pub use engine::{EngineConfig, GraphEngine};
pub use error::{GraphError, GraphResult};
pub use scoring::{RiskAssessment, RiskCategory};
