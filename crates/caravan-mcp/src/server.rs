//! MCP server implementation.
//!
//! This module contains the main server setup using rmcp.

use crate::models::{AnalyzeParams, BuildGraphParams, PlanWavesParams};
use crate::tools::Tools;
use caravan::Engine;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    CallToolResult, Content, Implementation, ProtocolVersion, ServerCapabilities, ServerInfo,
};
use rmcp::{
    ErrorData as McpError, ServiceExt, handler::server::ServerHandler, tool, tool_handler,
    tool_router, transport::stdio,
};
use std::sync::Arc;

/// The caravan MCP server.
///
/// Provides MCP protocol handling over stdio transport.
#[derive(Clone)]
pub struct CaravanMcpServer {
    /// Shared engine powering the tools.
    engine: Arc<Engine>,
    /// Tool implementations.
    tools: Arc<Tools>,
    /// Tool router for MCP dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl CaravanMcpServer {
    /// Run the full dependency analysis.
    #[tool(
        description = "Analyze an asset inventory: infer dependencies, build the dependency graph, detect bottlenecks, circular dependencies and critical paths, and generate migration insights."
    )]
    async fn analyze_dependencies(
        &self,
        Parameters(params): Parameters<AnalyzeParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.tools.analyze(params) {
            Ok(result) => Ok(CallToolResult::success(vec![Content::json(result)?])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// Build a visualization-ready dependency graph.
    #[tool(
        description = "Build a visualization-ready dependency graph from assets, or augment an existing graph with layout hints."
    )]
    async fn build_dependency_graph(
        &self,
        Parameters(params): Parameters<BuildGraphParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.tools.build_graph(params) {
            Ok(graph) => Ok(CallToolResult::success(vec![Content::json(graph)?])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// Plan migration waves.
    #[tool(
        description = "Partition assets into ordered migration waves from a dependency graph and its structural findings."
    )]
    async fn plan_migration_waves(
        &self,
        Parameters(params): Parameters<PlanWavesParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.tools.plan_waves(params) {
            Ok(plan) => Ok(CallToolResult::success(vec![Content::json(plan)?])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }
}

impl CaravanMcpServer {
    /// Create a new caravan MCP server with a default engine.
    #[must_use]
    pub fn new() -> Self {
        Self::with_engine(Arc::new(Engine::default()))
    }

    /// Create a server around an externally configured engine.
    #[must_use]
    pub fn with_engine(engine: Arc<Engine>) -> Self {
        let tools = Arc::new(Tools::new(Arc::clone(&engine)));
        Self {
            engine,
            tools,
            tool_router: Self::tool_router(),
        }
    }

    /// Get a reference to the engine.
    #[must_use]
    pub fn engine(&self) -> &Arc<Engine> {
        &self.engine
    }

    /// Serve MCP over stdio until the client disconnects.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails.
    pub async fn run(self) -> anyhow::Result<()> {
        let service = self.serve(stdio()).await?;
        service.waiting().await?;
        Ok(())
    }
}

impl Default for CaravanMcpServer {
    fn default() -> Self {
        Self::new()
    }
}

#[tool_handler]
impl ServerHandler for CaravanMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "caravan-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Caravan MCP server for dependency analysis and migration wave planning. \
                 Pass an asset inventory to analyze_dependencies, then feed its output to \
                 plan_migration_waves."
                    .into(),
            ),
        }
    }
}
