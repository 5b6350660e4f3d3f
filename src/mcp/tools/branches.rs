//! Branch tool implementations
//!
//! Handles MCP tools for listing and creating repository branches.

use crate::gitlab::{Branch, BranchSummary, GitLabApi, QueryString, encode_project_path};
use crate::mcp::tools::{json_result, map_gitlab_error, non_empty, ref_or_default, text_result};
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
pub struct ListBranchesParams {
    #[schemars(description = "Project ID or path")]
    pub project: String,
    #[schemars(description = "Filter branches by name (optional)")]
    pub search: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateBranchParams {
    #[schemars(description = "Project ID or path")]
    pub project: String,
    #[schemars(description = "Name of the new branch")]
    pub branch: String,
    #[serde(rename = "ref")]
    #[schemars(description = "Source branch or commit SHA (default: main)")]
    pub ref_name: Option<String>,
}

#[derive(Debug, Serialize)]
struct CreateBranchBody<'a> {
    branch: &'a str,
    #[serde(rename = "ref")]
    ref_name: &'a str,
}

/// Branch tools
pub struct BranchTools<C: GitLabApi> {
    client: Arc<C>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl<C: GitLabApi + 'static> BranchTools<C> {
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

    /// The `?` is always present, even with no filter.
    #[tool(description = "List branches in a GitLab project")]
    pub async fn list_branches(
        &self,
        params: Parameters<ListBranchesParams>,
    ) -> Result<CallToolResult, McpError> {
        let query = QueryString::new().with_opt("search", non_empty(params.0.search).as_deref());
        let endpoint = format!(
            "/projects/{}/repository/branches?{query}",
            encode_project_path(&params.0.project)
        );

        let branches: Vec<Branch> = self
            .client
            .get(&endpoint)
            .await
            .map_err(map_gitlab_error)?;

        let summaries: Vec<BranchSummary> =
            branches.into_iter().map(BranchSummary::from).collect();
        json_result(&summaries)
    }

    #[tool(description = "Create a new branch in a GitLab project")]
    pub async fn create_branch(
        &self,
        params: Parameters<CreateBranchParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let ref_name = ref_or_default(params.ref_name);
        let endpoint = format!(
            "/projects/{}/repository/branches",
            encode_project_path(&params.project)
        );
        let body = CreateBranchBody {
            branch: &params.branch,
            ref_name: &ref_name,
        };

        let branch: Branch = self
            .client
            .post(&endpoint, &body)
            .await
            .map_err(map_gitlab_error)?;

        Ok(text_result(format!(
            "Branch '{}' created successfully from '{}'",
            branch.name, ref_name
        )))
    }
}
