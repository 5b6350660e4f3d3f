//! Project tool implementations
//!
//! Handles MCP tools for discovering projects and reading a single project.

use crate::gitlab::{GitLabApi, Project, ProjectSummary, QueryString, encode_project_path};
use crate::mcp::tools::{json_result, map_gitlab_error, non_empty, per_page};
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
pub struct ListProjectsParams {
    #[schemars(description = "Search projects by name (optional)")]
    pub search: Option<String>,
    #[schemars(description = "Number of results per page (default: 20)")]
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetProjectParams {
    #[schemars(description = "Project ID or path (e.g. 'group/project')")]
    pub project: String,
}

/// Project tools
///
/// Generic over `C: GitLabApi` so tests can swap in a recording client.
pub struct ProjectTools<C: GitLabApi> {
    client: Arc<C>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl<C: GitLabApi + 'static> ProjectTools<C> {
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

    #[tool(description = "List GitLab projects accessible to the authenticated user")]
    pub async fn list_projects(
        &self,
        params: Parameters<ListProjectsParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = QueryString::new()
            .with("per_page", per_page(params.0.per_page))
            .with_opt("search", non_empty(params.0.search).as_deref());

        let projects: Vec<Project> = self
            .client
            .get(&format!("/projects?{query}"))
            .await
            .map_err(map_gitlab_error)?;

        let summaries: Vec<ProjectSummary> =
            projects.into_iter().map(ProjectSummary::from).collect();
        json_result(&summaries)
    }

    /// Returns the project record exactly as GitLab sent it.
    #[tool(description = "Get details of a specific GitLab project")]
    pub async fn get_project(
        &self,
        params: Parameters<GetProjectParams>,
    ) -> Result<CallToolResult, McpError> {
        let endpoint = format!("/projects/{}", encode_project_path(&params.0.project));

        let project: serde_json::Value = self
            .client
            .get(&endpoint)
            .await
            .map_err(map_gitlab_error)?;

        json_result(&project)
    }
}
