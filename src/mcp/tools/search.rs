//! Code search tool implementation

use crate::gitlab::{GitLabApi, QueryString, SearchHit, SearchResultSummary, encode_project_path};
use crate::mcp::tools::{json_result, map_gitlab_error, per_page};
use rmcp::{
    ErrorData as McpError,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchCodeParams {
    #[schemars(description = "Project ID or path")]
    pub project: String,
    #[schemars(description = "Search query")]
    pub search: String,
    #[schemars(description = "Number of results per page (default: 20)")]
    pub per_page: Option<u32>,
}

/// Code search tools
pub struct SearchTools<C: GitLabApi> {
    client: Arc<C>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl<C: GitLabApi + 'static> SearchTools<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    /// Get the tool router for this handler
    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    #[tool(description = "Search for code in a GitLab project")]
    pub async fn search_code(
        &self,
        params: Parameters<SearchCodeParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let query = QueryString::new()
            .with("scope", "blobs")
            .with("search", &params.search)
            .with("per_page", per_page(params.per_page));
        let endpoint = format!(
            "/projects/{}/search?{query}",
            encode_project_path(&params.project)
        );

        let hits: Vec<SearchHit> = self
            .client
            .get(&endpoint)
            .await
            .map_err(map_gitlab_error)?;

        let summaries: Vec<SearchResultSummary> =
            hits.into_iter().map(SearchResultSummary::from).collect();
        json_result(&summaries)
    }
}
