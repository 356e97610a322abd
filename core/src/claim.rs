//! The validated claim record and the entity vocabulary.
//!
//! RULE: Claims are validated once, at the ingestion boundary.
//! Everything downstream can assume a well-formed record.
//!
//! Identifier fields are all optional; blank values and the literal
//! placeholder "none" (any case) are treated as absent, never as nodes.

use crate::error::{GraphError, GraphResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Every non-claim node in the graph carries one of these kinds.
/// Entity identity is the compound (kind, value) pair, so a provider
/// and a lawyer that share a literal string never merge into one node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Person,
    Provider,
    Lawyer,
    Ip,
    Shop,
    Phone,
    Email,
    Address,
    Device,
    Vehicle,
}

impl EntityKind {
    /// All kinds, in the order entity fields are scanned during ingestion.
    pub const ALL: [EntityKind; 10] = [
        EntityKind::Person,
        EntityKind::Provider,
        EntityKind::Lawyer,
        EntityKind::Ip,
        EntityKind::Shop,
        EntityKind::Phone,
        EntityKind::Email,
        EntityKind::Address,
        EntityKind::Device,
        EntityKind::Vehicle,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Person => "person",
            EntityKind::Provider => "provider",
            EntityKind::Lawyer => "lawyer",
            EntityKind::Ip => "ip",
            EntityKind::Shop => "shop",
            EntityKind::Phone => "phone",
            EntityKind::Email => "email",
            EntityKind::Address => "address",
            EntityKind::Device => "device",
            EntityKind::Vehicle => "vehicle",
        }
    }

    /// Label for the direct claim-entity relation edge.
    pub fn relation_label(&self) -> &'static str {
        match self {
            EntityKind::Person => "filed",
            EntityKind::Provider => "treated_by",
            EntityKind::Lawyer => "represented_by",
            EntityKind::Ip => "submitted_from",
            EntityKind::Shop => "repaired_by",
            EntityKind::Phone => "contact_phone",
            EntityKind::Email => "contact_email",
            EntityKind::Address => "located_at",
            EntityKind::Device => "submitted_with",
            EntityKind::Vehicle => "involves_vehicle",
        }
    }
}

/// One insurance claim as received from the intake collaborator.
///
/// `text_fraud_score` is the 0-20 output of the external NLP consistency
/// checker; it defaults to 0 when that collaborator has not run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClaimRecord {
    pub claim_id: String,

    #[serde(default)]
    pub claimant_name: Option<String>,
    #[serde(default)]
    pub provider_name: Option<String>,
    #[serde(default)]
    pub lawyer_name: Option<String>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub repair_shop: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub device_id: Option<String>,
    #[serde(default)]
    pub vehicle_vin: Option<String>,

    #[serde(default)]
    pub submission_date: Option<NaiveDate>,
    #[serde(default)]
    pub accident_date: Option<NaiveDate>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,

    #[serde(default)]
    pub missing_docs: Vec<String>,
    #[serde(default)]
    pub text_fraud_score: u8,
}

/// Trim a raw field value; blank and "none" placeholders become absent.
fn clean(value: Option<&str>) -> Option<&str> {
    let v = value?.trim();
    if v.is_empty() || v.eq_ignore_ascii_case("none") {
        None
    } else {
        Some(v)
    }
}

impl ClaimRecord {
    pub fn new(claim_id: impl Into<String>) -> Self {
        Self {
            claim_id: claim_id.into(),
            ..Self::default()
        }
    }

    /// The only fatal input check: a present, non-blank claim id.
    pub fn validate(&self) -> GraphResult<()> {
        if self.claim_id.trim().is_empty() {
            return Err(GraphError::MissingClaimId);
        }
        Ok(())
    }

    /// Cleaned value of the identifier field backing `kind`, if any.
    pub fn entity_value(&self, kind: EntityKind) -> Option<&str> {
        let raw = match kind {
            EntityKind::Person => &self.claimant_name,
            EntityKind::Provider => &self.provider_name,
            EntityKind::Lawyer => &self.lawyer_name,
            EntityKind::Ip => &self.ip_address,
            EntityKind::Shop => &self.repair_shop,
            EntityKind::Phone => &self.phone_number,
            EntityKind::Email => &self.email,
            EntityKind::Address => &self.address,
            EntityKind::Device => &self.device_id,
            EntityKind::Vehicle => &self.vehicle_vin,
        };
        clean(raw.as_deref())
    }

    /// Every (kind, value) pair this claim references.
    pub fn entity_refs(&self) -> Vec<(EntityKind, &str)> {
        EntityKind::ALL
            .iter()
            .filter_map(|&kind| self.entity_value(kind).map(|v| (kind, v)))
            .collect()
    }

    pub fn provider(&self) -> Option<&str> {
        self.entity_value(EntityKind::Provider)
    }

    pub fn lawyer(&self) -> Option<&str> {
        self.entity_value(EntityKind::Lawyer)
    }

    pub fn ip(&self) -> Option<&str> {
        self.entity_value(EntityKind::Ip)
    }

    /// Cleaned accident-location state code.
    pub fn normalized_state(&self) -> Option<&str> {
        clean(self.state.as_deref())
    }

    /// Date used by the time-proximity pass: submission first, accident
    /// as fallback. None drops the claim from that pass silently.
    pub fn effective_date(&self) -> Option<NaiveDate> {
        self.submission_date.or(self.accident_date)
    }
}
