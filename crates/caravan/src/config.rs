//! Engine configuration.
//!
//! All thresholds default to the values the analysis policy is specified
//! with; a YAML file can override them for experimentation. The engine
//! behaves identically across invocations for a fixed configuration.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::fs;

/// Tunable thresholds for the analysis engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    /// A node is a bottleneck when its total degree exceeds this.
    pub bottleneck_threshold: usize,

    /// A bottleneck is high risk when its total degree exceeds this.
    pub high_risk_threshold: usize,

    /// Maximum number of critical paths to retain.
    pub max_critical_paths: usize,

    /// A path qualifies only when its node count exceeds this.
    pub min_path_nodes: usize,

    /// A path is high criticality when its node count exceeds this.
    pub high_criticality_path_nodes: usize,

    /// Maximum asset labels displayed for the low-dependency wave.
    pub wave_display_limit: usize,

    /// Maximum bottlenecks included in the critical-dependencies wave.
    pub bottleneck_wave_limit: usize,

    /// Confidence assigned to data-flow edges.
    pub data_flow_confidence: f64,

    /// Confidence assigned to network edges.
    pub network_confidence: f64,

    /// Densities below this are reported as low coupling.
    pub low_coupling_density: f64,

    /// Densities above this are reported as high coupling.
    pub high_coupling_density: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            bottleneck_threshold: 3,
            high_risk_threshold: 5,
            max_critical_paths: 5,
            min_path_nodes: 2,
            high_criticality_path_nodes: 4,
            wave_display_limit: 10,
            bottleneck_wave_limit: 5,
            data_flow_confidence: 0.7,
            network_confidence: 0.8,
            low_coupling_density: 0.1,
            high_coupling_density: 0.5,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a YAML file.
    ///
    /// Fields absent from the file keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).await?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }
}
