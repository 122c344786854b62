//! Service dependency extraction.
//!
//! Flags assets whose role or environment makes other assets depend on
//! them at the service level. The rules are independent, so one asset may
//! emit several findings.

use super::{DependencySignal, EvidenceType, SignalExtractor};
use crate::domain::Asset;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Service-level role of a flagged asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceRole {
    /// Load balancer distributing traffic to downstream services.
    TrafficDistributor,

    /// Security group gating network access.
    AccessControl,

    /// Production asset whose downtime is externally visible.
    CriticalProductionService,
}

impl fmt::Display for ServiceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TrafficDistributor => write!(f, "traffic_distributor"),
            Self::AccessControl => write!(f, "access_control"),
            Self::CriticalProductionService => write!(f, "critical_production_service"),
        }
    }
}

/// A service-level dependency finding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceDependency {
    /// Flagged asset.
    pub asset_id: String,

    /// Asset display name.
    pub asset_name: String,

    /// Why other assets depend on it.
    pub role: ServiceRole,

    /// Human-readable explanation.
    pub detail: String,
}

impl ServiceDependency {
    /// Lower this finding to a generic dependency signal.
    #[must_use]
    pub fn signal(&self, confidence: f64) -> DependencySignal {
        DependencySignal {
            source_asset_id: self.asset_id.clone(),
            evidence_type: EvidenceType::Service,
            detail: self.detail.clone(),
            confidence,
        }
    }
}

/// Flags traffic distributors, access control points and production
/// services.
#[derive(Debug, Clone, Copy, Default)]
pub struct ServiceExtractor;

impl SignalExtractor for ServiceExtractor {
    type Finding = ServiceDependency;

    fn evidence_type(&self) -> EvidenceType {
        EvidenceType::Service
    }

    fn extract(&self, assets: &[Asset]) -> Vec<ServiceDependency> {
        let mut findings = Vec::new();

        for asset in assets {
            if asset.type_is("load_balancer") {
                findings.push(ServiceDependency {
                    asset_id: asset.id.clone(),
                    asset_name: asset.name.clone(),
                    role: ServiceRole::TrafficDistributor,
                    detail: "distributes traffic across downstream services".to_string(),
                });
            }

            if asset.type_is("security_group") {
                findings.push(ServiceDependency {
                    asset_id: asset.id.clone(),
                    asset_name: asset.name.clone(),
                    role: ServiceRole::AccessControl,
                    detail: "controls network access for dependent assets".to_string(),
                });
            }

            if asset.is_production() {
                findings.push(ServiceDependency {
                    asset_id: asset.id.clone(),
                    asset_name: asset.name.clone(),
                    role: ServiceRole::CriticalProductionService,
                    detail: "runs in production; downtime is externally visible".to_string(),
                });
            }
        }

        findings
    }
}
