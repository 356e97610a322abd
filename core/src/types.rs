//! Shared primitive types used across the engine.

/// Caller-supplied claim identifier. Required and non-empty.
pub type ClaimId = String;

/// Raw value string of an entity reference (a provider name, an IP, ...).
pub type EntityValue = String;
