//! MCP tool handlers for the directory search server.
//!
//! Tools are registered with the rmcp SDK's tool_router pattern.

use crate::metrics::Metrics;
use crate::models::EntityKind;
use crate::services::DirectoryService;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::Arc;

/// The MCP server exposing firm and company search.
#[derive(Clone)]
pub struct DirectoryMcpServer {
    directory_service: Arc<dyn DirectoryService>,
    metrics: Metrics,
    tool_router: ToolRouter<Self>,
}

#[tool_handler]
impl ServerHandler for DirectoryMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "vc-dashboard-search".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("Search the VC dashboard directory of venture-capital firms and startup companies by name, city or state.".into()),
        }
    }
}

#[derive(Debug, Deserialize, JsonSchema)]
struct SearchDirectoryParams {
    /// Text to match against names, cities and states. Omit to browse.
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    limit: Option<usize>,
    /// Restrict results to "firm" or "company"
    #[serde(default)]
    kind: Option<EntityKind>,
}

#[derive(Debug, Deserialize, JsonSchema)]
struct RefreshIndexParams {
    #[serde(default)]
    force: Option<bool>,
}

fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn json_result(value: &impl Serialize) -> Result<CallToolResult, McpError> {
    Ok(CallToolResult::success(vec![Content::text(
        serde_json::to_string_pretty(value).map_err(to_mcp_error)?,
    )]))
}

#[tool_router]
impl DirectoryMcpServer {
    /// Create a new directory MCP server.
    pub fn new(directory_service: Arc<dyn DirectoryService>, metrics: Metrics) -> Self {
        Self {
            directory_service,
            metrics,
            tool_router: Self::tool_router(),
        }
    }

    /// Search firms and companies by name, city or state.
    #[tool(
        description = "Search venture-capital firms and startup companies by name, city or state. Exact and prefix matches rank above substring matches. Without a query, lists entries in source order."
    )]
    async fn search_directory(
        &self,
        params: Parameters<SearchDirectoryParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;

        let response = self
            .directory_service
            .search(params.query, params.limit, params.kind)
            .await
            .map_err(to_mcp_error)?;

        json_result(&response)
    }

    /// Reload the data sources and rebuild the index when data changed.
    #[tool(
        description = "Reload firms and companies from the configured sources and rebuild the search index if the data changed. Set force to rebuild regardless."
    )]
    async fn refresh_directory_index(
        &self,
        params: Parameters<RefreshIndexParams>,
    ) -> Result<CallToolResult, McpError> {
        let force = params.0.force.unwrap_or(false);

        let outcome = self
            .directory_service
            .refresh(force)
            .await
            .map_err(to_mcp_error)?;

        json_result(&outcome)
    }

    /// Report index state and server metrics.
    #[tool(description = "Report search index state (entity and term counts, last build time, sources) and server metrics.")]
    async fn directory_index_status(&self) -> Result<CallToolResult, McpError> {
        let status = self.directory_service.status().await;

        json_result(&serde_json::json!({
            "index": status,
            "metrics": self.metrics.summary(),
        }))
    }
}
