//! Output formatting for CLI commands.
//!
//! Provides human-readable text rendering of analysis results, graphs and
//! wave plans, plus JSON output for programmatic use.
//!
//! Semantic colors: red for high risk, yellow for medium, green for low,
//! cyan for identifiers, dimmed for field labels.

use crate::domain::{DependencyAnalysisResult, DependencyGraph, RiskLevel, WavePlan};
use crate::error::Result;
use colored::Colorize;
use serde::Serialize;
use std::env;

const DEFAULT_MAX_CONTENT_WIDTH: usize = 80;

/// How command output should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Text,

    /// Pretty-printed JSON.
    Json,
}

/// Configuration for text output formatting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    /// Maximum content width for text wrapping.
    pub max_width: usize,

    /// Whether to use colors in output.
    pub use_colors: bool,
}

impl OutputConfig {
    /// Create an `OutputConfig` with explicit values.
    #[must_use]
    pub fn new(max_width: usize, use_colors: bool) -> Self {
        Self {
            max_width,
            use_colors,
        }
    }

    /// Create an `OutputConfig` from the environment.
    ///
    /// Reads:
    /// - `CARAVAN_MAX_WIDTH`: maximum content width (default: 80, capped
    ///   by the detected terminal width)
    /// - `NO_COLOR`: standard env var to disable colors
    /// - `CARAVAN_COLOR`: set to "0" or "false" to disable colors
    #[must_use]
    pub fn from_env() -> Self {
        let configured = match env::var("CARAVAN_MAX_WIDTH") {
            Ok(s) if !s.is_empty() => s.parse().unwrap_or_else(|_| {
                tracing::warn!(
                    env_var = "CARAVAN_MAX_WIDTH",
                    value = %s,
                    default = DEFAULT_MAX_CONTENT_WIDTH,
                    "Invalid value, using default"
                );
                DEFAULT_MAX_CONTENT_WIDTH
            }),
            _ => DEFAULT_MAX_CONTENT_WIDTH,
        };

        let max_width = match terminal_size::terminal_size() {
            Some((terminal_size::Width(w), _)) => configured.min(w as usize),
            None => configured,
        };

        // Respect the NO_COLOR standard (https://no-color.org/)
        let use_colors = env::var("NO_COLOR").is_err()
            && !matches!(
                env::var("CARAVAN_COLOR").as_deref(),
                Ok("0") | Ok("false") | Ok("FALSE")
            );

        Self {
            max_width,
            use_colors,
        }
    }

    fn risk(&self, level: RiskLevel) -> String {
        let text = level.to_string();
        if !self.use_colors {
            return text;
        }
        match level {
            RiskLevel::High => text.red().bold().to_string(),
            RiskLevel::Medium => text.yellow().to_string(),
            RiskLevel::Low => text.green().to_string(),
        }
    }

    fn id(&self, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        text.cyan().to_string()
    }

    fn heading(&self, text: &str) -> String {
        if !self.use_colors {
            return text.to_string();
        }
        text.bold().to_string()
    }

    fn wrap_indented(&self, text: &str, indent: &str) -> String {
        let options = textwrap::Options::new(self.max_width.max(20))
            .initial_indent(indent)
            .subsequent_indent(indent);
        textwrap::fill(text, options)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONTENT_WIDTH, false)
    }
}

/// Print a value as pretty JSON.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a graph summary.
pub fn print_graph(graph: &DependencyGraph, config: &OutputConfig) {
    println!("{}", config.heading("Dependency Graph"));
    println!("  Nodes:   {}", graph.node_count);
    println!("  Edges:   {}", graph.edge_count);
    println!("  Density: {:.3}", graph.density);

    for edge in &graph.edges {
        println!(
            "  {} -> {}  [{} {:.1}]",
            config.id(&graph.label_of(&edge.source_node_id)),
            config.id(&graph.label_of(&edge.target_node_id)),
            edge.edge_type,
            edge.confidence,
        );
    }
}

/// Print a full analysis report.
pub fn print_analysis(result: &DependencyAnalysisResult, config: &OutputConfig) {
    if let Some(error) = &result.error {
        println!("{} {}", config.heading("Analysis failed:"), error);
        return;
    }

    println!(
        "{} ({} assets)",
        config.heading("Dependency Analysis"),
        result.total_assets
    );
    println!();
    print_graph(&result.dependency_graph, config);

    if !result.bottlenecks.is_empty() {
        println!();
        println!("{}", config.heading("Bottlenecks"));
        for bottleneck in &result.bottlenecks {
            println!(
                "  {}  {} in / {} out  [{}]",
                config.id(&bottleneck.node_name),
                bottleneck.incoming,
                bottleneck.outgoing,
                config.risk(bottleneck.risk_level),
            );
        }
    }

    if !result.circular_dependencies.is_empty() {
        println!();
        println!("{}", config.heading("Circular Dependencies"));
        for cycle in &result.circular_dependencies {
            println!(
                "  {} <-> {}  [{}]",
                config.id(&result.dependency_graph.label_of(&cycle.nodes[0])),
                config.id(&result.dependency_graph.label_of(&cycle.nodes[1])),
                config.risk(cycle.severity),
            );
        }
    }

    if !result.critical_paths.is_empty() {
        println!();
        println!("{}", config.heading("Critical Paths"));
        for path in &result.critical_paths {
            println!(
                "  {}  ({} nodes, {})",
                path.node_sequence.join(" -> "),
                path.length,
                config.risk(path.criticality),
            );
        }
    }

    if !result.migration_insights.is_empty() {
        println!();
        println!("{}", config.heading("Migration Insights"));
        for insight in &result.migration_insights {
            println!(
                "  [{}] {}",
                config.risk(insight.severity),
                insight.message
            );
            println!("{}", config.wrap_indented(&insight.recommendation, "      "));
        }
    }
}

/// Print a wave plan.
pub fn print_waves(plan: &WavePlan, config: &OutputConfig) {
    println!(
        "{} ({} waves, ~{}, overall risk {})",
        config.heading("Migration Plan"),
        plan.total_waves,
        plan.estimated_duration,
        config.risk(plan.risk_assessment),
    );

    for wave in &plan.migration_waves {
        println!();
        println!(
            "{} {} [{}] ({} assets)",
            config.heading(&format!("Wave {}:", wave.wave_number)),
            wave.name,
            config.risk(wave.risk),
            wave.asset_count,
        );
        if !wave.asset_labels.is_empty() {
            println!("{}", config.wrap_indented(&wave.asset_labels.join(", "), "  "));
        }
        println!("{}", config.wrap_indented(&wave.strategy, "  "));
    }
}
