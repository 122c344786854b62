//! Signal extraction from asset collections.
//!
//! Four independent detectors scan the asset collection and propose
//! candidate dependency findings: network reachability, configuration
//! role inference, data-flow co-location and service-level dependencies.
//! Extractors are stateless and never fail on a malformed asset; a missing
//! field simply yields no signal from that asset.

pub mod configuration;
pub mod data_flow;
pub mod network;
pub mod service;

pub use configuration::{ConfigRole, ConfigurationDependency, ConfigurationExtractor};
pub use data_flow::{DataFlowBasis, DataFlowDependency, DataFlowExtractor};
pub use network::{ConnectionKind, NetworkConnection, NetworkDependency, NetworkExtractor};
pub use service::{ServiceDependency, ServiceExtractor, ServiceRole};

use crate::domain::Asset;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Evidence category a signal was derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvidenceType {
    /// IP addresses, connection strings, explicit references.
    Network,

    /// Roles inferred from asset type and technology stack.
    Configuration,

    /// Application/database co-location heuristics.
    Data,

    /// Criticality and environment-based service dependencies.
    Service,
}

impl fmt::Display for EvidenceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Network => write!(f, "network"),
            Self::Configuration => write!(f, "configuration"),
            Self::Data => write!(f, "data"),
            Self::Service => write!(f, "service"),
        }
    }
}

/// A weakly-confident, heuristically inferred relationship signal.
///
/// Signals are intermediate artifacts: extractor findings lower to
/// signals, and the graph builder turns signals into edges. They are
/// never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencySignal {
    /// Asset the evidence was observed on.
    pub source_asset_id: String,

    /// Evidence category.
    pub evidence_type: EvidenceType,

    /// Human-readable description of the evidence.
    pub detail: String,

    /// Inference confidence in `[0, 1]`.
    pub confidence: f64,
}

/// A stateless detector proposing candidate dependency findings.
///
/// Implementations scan the whole collection in one pass and tolerate
/// malformed assets.
pub trait SignalExtractor {
    /// The typed finding this extractor produces.
    type Finding: Serialize;

    /// Evidence category for all findings of this extractor.
    fn evidence_type(&self) -> EvidenceType;

    /// Scan the collection and propose findings.
    fn extract(&self, assets: &[Asset]) -> Vec<Self::Finding>;
}

/// Whether `reference` symbolically matches `asset`.
///
/// A reference matches on exact id equality or when the asset's non-empty
/// name appears as a case-insensitive substring of the reference value.
/// Short or common asset names make this prone to false positives; the
/// behavior is kept for compatibility with existing callers.
#[must_use]
pub fn reference_matches(reference: &str, asset: &Asset) -> bool {
    let reference = reference.trim();
    if reference.is_empty() {
        return false;
    }
    if !asset.id.is_empty() && reference == asset.id {
        return true;
    }
    !asset.name.is_empty()
        && reference
            .to_lowercase()
            .contains(&asset.name.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn asset(id: &str, name: &str) -> Asset {
        Asset {
            id: id.to_string(),
            name: name.to_string(),
            ..Asset::default()
        }
    }

    #[rstest]
    #[case::exact_id("db-001", "db-001", "orders-db", true)]
    #[case::name_in_reference("postgres://orders-db:5432", "db-001", "orders-db", true)]
    #[case::case_insensitive("ORDERS-DB", "db-001", "orders-db", true)]
    #[case::no_match("users-db", "db-001", "orders-db", false)]
    #[case::empty_reference("", "db-001", "orders-db", false)]
    #[case::whitespace_reference("   ", "db-001", "orders-db", false)]
    fn test_reference_matches(
        #[case] reference: &str,
        #[case] id: &str,
        #[case] name: &str,
        #[case] expected: bool,
    ) {
        assert_eq!(reference_matches(reference, &asset(id, name)), expected);
    }

    #[test]
    fn test_empty_name_never_matches_by_substring() {
        // An empty name would be a substring of everything.
        assert!(!reference_matches("anything", &asset("", "")));
    }

    #[test]
    fn test_evidence_type_wire_format() {
        assert_eq!(
            serde_json::to_string(&EvidenceType::Data).unwrap(),
            "\"data\""
        );
        assert_eq!(EvidenceType::Configuration.to_string(), "configuration");
    }
}
