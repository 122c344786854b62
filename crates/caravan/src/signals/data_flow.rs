//! Data-flow dependency extraction.
//!
//! Pairs applications with databases they are likely to exchange data
//! with. The heuristic is deliberately coarse: an explicit dependency
//! reference wins, then a shared environment, then a shared non-empty
//! department. The rule ordering is observable through the `basis` field
//! and must stay fixed because downstream insights rank explicit matches
//! highest.

use super::{DependencySignal, EvidenceType, SignalExtractor, reference_matches};
use crate::domain::Asset;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default confidence for data-flow candidates.
pub const DEFAULT_CONFIDENCE: f64 = 0.7;

/// Which rule judged the pair likely connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFlowBasis {
    /// One asset explicitly references the other.
    ExplicitReference,

    /// Both assets run in the same environment.
    SharedEnvironment,

    /// Both assets belong to the same non-empty department.
    SharedDepartment,
}

impl fmt::Display for DataFlowBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ExplicitReference => write!(f, "explicit reference"),
            Self::SharedEnvironment => write!(f, "shared environment"),
            Self::SharedDepartment => write!(f, "shared department"),
        }
    }
}

/// A candidate data flow from a database to an application.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataFlowDependency {
    /// Producing asset (the database).
    pub source_asset_id: String,

    /// Producer display name.
    pub source_name: String,

    /// Consuming asset (the application).
    pub target_asset_id: String,

    /// Consumer display name.
    pub target_name: String,

    /// Candidate confidence.
    pub confidence: f64,

    /// Which rule matched.
    pub basis: DataFlowBasis,
}

impl DataFlowDependency {
    /// Lower this finding to a generic dependency signal.
    #[must_use]
    pub fn signal(&self) -> DependencySignal {
        DependencySignal {
            source_asset_id: self.source_asset_id.clone(),
            evidence_type: EvidenceType::Data,
            detail: format!("data flow ({})", self.basis),
            confidence: self.confidence,
        }
    }
}

/// Proposes data-flow candidates between applications and databases.
#[derive(Debug, Clone, Copy)]
pub struct DataFlowExtractor {
    confidence: f64,
}

impl DataFlowExtractor {
    /// Create an extractor assigning the given confidence to candidates.
    #[must_use]
    pub fn new(confidence: f64) -> Self {
        Self { confidence }
    }
}

impl Default for DataFlowExtractor {
    fn default() -> Self {
        Self::new(DEFAULT_CONFIDENCE)
    }
}

impl SignalExtractor for DataFlowExtractor {
    type Finding = DataFlowDependency;

    fn evidence_type(&self) -> EvidenceType {
        EvidenceType::Data
    }

    fn extract(&self, assets: &[Asset]) -> Vec<DataFlowDependency> {
        let databases: Vec<&Asset> = assets.iter().filter(|a| a.type_is("database")).collect();
        let applications: Vec<&Asset> =
            assets.iter().filter(|a| a.type_is("application")).collect();

        let mut findings = Vec::new();
        for application in &applications {
            for database in &databases {
                let Some(basis) = likely_connected(application, database) else {
                    continue;
                };
                findings.push(DataFlowDependency {
                    source_asset_id: database.id.clone(),
                    source_name: database.name.clone(),
                    target_asset_id: application.id.clone(),
                    target_name: application.name.clone(),
                    confidence: self.confidence,
                    basis,
                });
            }
        }

        findings
    }
}

/// Judge whether an application and a database are likely connected.
///
/// Rules are evaluated in fixed order; the first match wins.
fn likely_connected(application: &Asset, database: &Asset) -> Option<DataFlowBasis> {
    let explicit = application
        .dependencies
        .iter()
        .any(|entry| reference_matches(entry, database))
        || database
            .dependencies
            .iter()
            .any(|entry| reference_matches(entry, application));
    if explicit {
        return Some(DataFlowBasis::ExplicitReference);
    }

    if !application.environment.is_empty()
        && application
            .environment
            .eq_ignore_ascii_case(&database.environment)
    {
        return Some(DataFlowBasis::SharedEnvironment);
    }

    if !application.department.is_empty()
        && application
            .department
            .eq_ignore_ascii_case(&database.department)
    {
        return Some(DataFlowBasis::SharedDepartment);
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn asset(id: &str, asset_type: &str) -> Asset {
        Asset {
            id: id.to_string(),
            name: id.to_string(),
            asset_type: asset_type.to_string(),
            ..Asset::default()
        }
    }

    #[test]
    fn test_explicit_reference_wins_over_shared_environment() {
        let mut app = asset("app1", "application");
        app.dependencies = vec!["db1".to_string()];
        app.environment = "prod".to_string();
        let mut db = asset("db1", "database");
        db.environment = "prod".to_string();

        let findings = DataFlowExtractor::default().extract(&[db, app]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].basis, DataFlowBasis::ExplicitReference);
        assert_eq!(findings[0].source_asset_id, "db1");
        assert_eq!(findings[0].target_asset_id, "app1");
        assert!((findings[0].confidence - 0.7).abs() < f64::EPSILON);
    }

    #[test]
    fn test_database_side_reference_also_counts() {
        let app = asset("app1", "application");
        let mut db = asset("db1", "database");
        db.dependencies = vec!["app1".to_string()];

        let findings = DataFlowExtractor::default().extract(&[db, app]);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].basis, DataFlowBasis::ExplicitReference);
    }

    #[test]
    fn test_shared_environment() {
        let mut app = asset("app1", "application");
        app.environment = "Staging".to_string();
        let mut db = asset("db1", "database");
        db.environment = "staging".to_string();

        let findings = DataFlowExtractor::default().extract(&[db, app]);
        assert_eq!(findings[0].basis, DataFlowBasis::SharedEnvironment);
    }

    #[test]
    fn test_empty_environments_do_not_match() {
        let app = asset("app1", "application");
        let db = asset("db1", "database");
        assert!(DataFlowExtractor::default().extract(&[db, app]).is_empty());
    }

    #[test]
    fn test_shared_department() {
        let mut app = asset("app1", "application");
        app.department = "payments".to_string();
        app.environment = "prod".to_string();
        let mut db = asset("db1", "database");
        db.department = "payments".to_string();
        db.environment = "staging".to_string();

        let findings = DataFlowExtractor::default().extract(&[db, app]);
        assert_eq!(findings[0].basis, DataFlowBasis::SharedDepartment);
    }

    #[test]
    fn test_every_pair_is_considered() {
        let mut app1 = asset("app1", "application");
        app1.environment = "prod".to_string();
        let mut app2 = asset("app2", "application");
        app2.environment = "prod".to_string();
        let mut db1 = asset("db1", "database");
        db1.environment = "prod".to_string();
        let mut db2 = asset("db2", "database");
        db2.environment = "prod".to_string();

        let findings = DataFlowExtractor::default().extract(&[app1, app2, db1, db2]);
        assert_eq!(findings.len(), 4);
    }

    #[test]
    fn test_non_database_pairs_are_ignored() {
        let mut app = asset("app1", "application");
        app.environment = "prod".to_string();
        let mut cache = asset("cache1", "storage");
        cache.environment = "prod".to_string();

        assert!(DataFlowExtractor::default().extract(&[cache, app]).is_empty());
    }
}
