//! Network dependency extraction.
//!
//! Collects per-asset connection evidence from IP addresses,
//! connection-like custom attributes and explicit dependency references.

use super::{DependencySignal, EvidenceType, SignalExtractor};
use crate::domain::Asset;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source a network connection was observed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionKind {
    /// The asset's discovered IP address.
    IpAddress,

    /// A connection or endpoint value from custom attributes.
    ConnectionString,

    /// An entry of the asset's explicit dependencies list.
    ExplicitReference,
}

impl fmt::Display for ConnectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IpAddress => write!(f, "ip_address"),
            Self::ConnectionString => write!(f, "connection_string"),
            Self::ExplicitReference => write!(f, "explicit_reference"),
        }
    }
}

/// A single observed connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConnection {
    /// Where the connection was observed.
    #[serde(rename = "type")]
    pub kind: ConnectionKind,

    /// The raw connection value.
    pub value: String,

    /// Transport or reference protocol hint.
    pub protocol: String,
}

/// All network connections observed on one asset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkDependency {
    /// Asset the connections were observed on.
    pub asset_id: String,

    /// Asset display name.
    pub asset_name: String,

    /// Observed connections.
    pub connections: Vec<NetworkConnection>,

    /// Number of observed connections.
    pub connection_count: usize,
}

impl NetworkDependency {
    /// Lower one connection to a generic dependency signal.
    #[must_use]
    pub fn signal_for(&self, connection: &NetworkConnection, confidence: f64) -> DependencySignal {
        DependencySignal {
            source_asset_id: self.asset_id.clone(),
            evidence_type: EvidenceType::Network,
            detail: format!("network reference '{}'", connection.value),
            confidence,
        }
    }
}

/// Detects network-level connections on each asset.
#[derive(Debug, Clone, Copy, Default)]
pub struct NetworkExtractor;

impl SignalExtractor for NetworkExtractor {
    type Finding = NetworkDependency;

    fn evidence_type(&self) -> EvidenceType {
        EvidenceType::Network
    }

    fn extract(&self, assets: &[Asset]) -> Vec<NetworkDependency> {
        assets
            .iter()
            .filter_map(|asset| {
                let connections = collect_connections(asset);
                if connections.is_empty() {
                    return None;
                }
                Some(NetworkDependency {
                    asset_id: asset.id.clone(),
                    asset_name: asset.name.clone(),
                    connection_count: connections.len(),
                    connections,
                })
            })
            .collect()
    }
}

fn collect_connections(asset: &Asset) -> Vec<NetworkConnection> {
    let mut connections = Vec::new();

    if let Some(ip) = &asset.ip_address {
        if !ip.trim().is_empty() {
            connections.push(NetworkConnection {
                kind: ConnectionKind::IpAddress,
                value: ip.clone(),
                protocol: "tcp".to_string(),
            });
        }
    }

    for (key, value) in &asset.custom_attributes {
        let key_lower = key.to_lowercase();
        if !key_lower.contains("connection") && !key_lower.contains("endpoint") {
            continue;
        }
        let value = attribute_text(value);
        if value.trim().is_empty() {
            continue;
        }
        connections.push(NetworkConnection {
            kind: ConnectionKind::ConnectionString,
            value,
            protocol: "configured".to_string(),
        });
    }

    for dependency in &asset.dependencies {
        if dependency.trim().is_empty() {
            continue;
        }
        connections.push(NetworkConnection {
            kind: ConnectionKind::ExplicitReference,
            value: dependency.clone(),
            protocol: "application".to_string(),
        });
    }

    connections
}

/// Render a custom attribute value as text without JSON string quoting.
fn attribute_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
