//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::{Context as _, Result};
use std::path::Path;

use super::args::{AnalyzeArgs, GraphArgs, WavesArgs};
use crate::config::EngineConfig;
use crate::domain::Asset;
use crate::engine::Engine;
use crate::output::{self, OutputConfig, OutputMode};
use crate::tool;

/// Execute the analyze command
pub async fn execute_analyze(args: &AnalyzeArgs, output_mode: OutputMode) -> Result<()> {
    let engine = engine_for(args.config.as_deref()).await?;
    let assets = load_assets(&args.input).await?;

    let result = engine.analyze(&assets);

    match output_mode {
        OutputMode::Json => output::print_json(&result)?,
        OutputMode::Text => output::print_analysis(&result, &OutputConfig::from_env()),
    }
    Ok(())
}

/// Execute the graph command
pub async fn execute_graph(args: &GraphArgs, output_mode: OutputMode) -> Result<()> {
    let engine = engine_for(args.config.as_deref()).await?;
    let assets = load_assets(&args.input).await?;

    let graph = engine.build_graph(&assets);

    match output_mode {
        OutputMode::Json => output::print_json(&graph)?,
        OutputMode::Text => output::print_graph(&graph, &OutputConfig::from_env()),
    }
    Ok(())
}

/// Execute the waves command
pub async fn execute_waves(args: &WavesArgs, output_mode: OutputMode) -> Result<()> {
    let engine = engine_for(args.config.as_deref()).await?;
    let assets = load_assets(&args.input).await?;

    // Wave planning needs the structural findings, so run the full pipeline.
    let analysis = engine.analyze(&assets);
    let plan = engine.plan_waves(
        &analysis.dependency_graph,
        &analysis.bottlenecks,
        &analysis.circular_dependencies,
    );

    match output_mode {
        OutputMode::Json => output::print_json(&plan)?,
        OutputMode::Text => output::print_waves(&plan, &OutputConfig::from_env()),
    }
    Ok(())
}

/// Build an engine, loading configuration overrides when given.
async fn engine_for(config_path: Option<&Path>) -> Result<Engine> {
    let config = match config_path {
        Some(path) => EngineConfig::load(path)
            .await
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => EngineConfig::default(),
    };
    Ok(Engine::new(config))
}

/// Load an asset inventory from a JSON file.
///
/// Accepts either a top-level array of assets or an object with an
/// `assets` array; malformed individual entries are skipped.
async fn load_assets(path: &Path) -> Result<Vec<Asset>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("failed to read {}", path.display()))?;
    let value: serde_json::Value = serde_json::from_str(&content)
        .with_context(|| format!("{} is not valid JSON", path.display()))?;

    let wrapped = if value.is_array() {
        serde_json::json!({ "assets": value })
    } else {
        value
    };

    let assets = tool::parse_assets(&wrapped)
        .with_context(|| format!("{} has no asset list", path.display()))?;
    tracing::debug!(count = assets.len(), path = %path.display(), "loaded assets");
    Ok(assets)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_assets_top_level_array() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("assets.json");
        std::fs::write(&path, r#"[{"id": "a1", "name": "a1"}]"#).unwrap();

        let assets = load_assets(&path).await.unwrap();
        assert_eq!(assets.len(), 1);
        assert_eq!(assets[0].id, "a1");
    }

    #[tokio::test]
    async fn test_load_assets_wrapped_object() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("assets.json");
        std::fs::write(&path, r#"{"assets": [{"id": "a1"}, {"id": "a2"}]}"#).unwrap();

        let assets = load_assets(&path).await.unwrap();
        assert_eq!(assets.len(), 2);
    }

    #[tokio::test]
    async fn test_load_assets_rejects_non_json() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("assets.json");
        std::fs::write(&path, "not json").unwrap();

        assert!(load_assets(&path).await.is_err());
    }

    #[tokio::test]
    async fn test_engine_for_default() {
        let engine = engine_for(None).await.unwrap();
        assert_eq!(engine.config().bottleneck_threshold, 3);
    }
}
