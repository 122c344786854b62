//! Configuration dependency extraction.
//!
//! Infers provider/consumer roles from asset type, technology stack and
//! naming conventions.

use super::{DependencySignal, EvidenceType, SignalExtractor};
use crate::domain::Asset;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the asset provides or consumes a service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigRole {
    /// The asset offers the service.
    Provider,

    /// The asset requires the service.
    Consumer,
}

impl fmt::Display for ConfigRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Provider => write!(f, "provider"),
            Self::Consumer => write!(f, "consumer"),
        }
    }
}

/// A role inferred from an asset's configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigurationDependency {
    /// Asset the role was inferred for.
    pub asset_id: String,

    /// Asset display name.
    pub asset_name: String,

    /// Provider or consumer.
    pub role: ConfigRole,

    /// The service concerned (database, api).
    pub service: String,

    /// What the inference was based on.
    pub detail: String,
}

impl ConfigurationDependency {
    /// Lower this finding to a generic dependency signal.
    #[must_use]
    pub fn signal(&self, confidence: f64) -> DependencySignal {
        DependencySignal {
            source_asset_id: self.asset_id.clone(),
            evidence_type: EvidenceType::Configuration,
            detail: format!("{} of {} service", self.role, self.service),
            confidence,
        }
    }
}

/// Infers service roles from asset configuration.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigurationExtractor;

impl SignalExtractor for ConfigurationExtractor {
    type Finding = ConfigurationDependency;

    fn evidence_type(&self) -> EvidenceType {
        EvidenceType::Configuration
    }

    fn extract(&self, assets: &[Asset]) -> Vec<ConfigurationDependency> {
        let mut findings = Vec::new();

        for asset in assets {
            if asset.type_is("database") {
                findings.push(ConfigurationDependency {
                    asset_id: asset.id.clone(),
                    asset_name: asset.name.clone(),
                    role: ConfigRole::Provider,
                    service: "database".to_string(),
                    detail: "asset type is database".to_string(),
                });
            }

            if asset.type_is("application") && stack_mentions_database(asset) {
                findings.push(ConfigurationDependency {
                    asset_id: asset.id.clone(),
                    asset_name: asset.name.clone(),
                    role: ConfigRole::Consumer,
                    service: "database".to_string(),
                    detail: "technology stack requires a database connection".to_string(),
                });
            }

            if asset.name.to_lowercase().contains("api") {
                let role = if asset.asset_type.to_lowercase().contains("server") {
                    ConfigRole::Provider
                } else {
                    ConfigRole::Consumer
                };
                findings.push(ConfigurationDependency {
                    asset_id: asset.id.clone(),
                    asset_name: asset.name.clone(),
                    role,
                    service: "api".to_string(),
                    detail: "asset name indicates an API".to_string(),
                });
            }
        }

        findings
    }
}

/// Whether the technology stack text mentions a SQL or database component.
fn stack_mentions_database(asset: &Asset) -> bool {
    asset.technology_stack.as_ref().is_some_and(|stack| {
        let stack = stack.to_lowercase();
        stack.contains("sql") || stack.contains("database")
    })
}
