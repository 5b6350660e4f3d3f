//! Merge request tool implementations
//!
//! Handles MCP tools for opening and listing merge requests.

use crate::gitlab::{
    GitLabApi, MergeRequest, MergeRequestSummary, QueryString, encode_project_path,
};
use crate::mcp::tools::{
    json_result, map_gitlab_error, non_empty, per_page, ref_or_default, text_result,
};
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

/// Merge request state filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum MergeRequestState {
    #[default]
    Opened,
    Closed,
    Merged,
    All,
}

impl MergeRequestState {
    pub fn as_str(self) -> &'static str {
        match self {
            MergeRequestState::Opened => "opened",
            MergeRequestState::Closed => "closed",
            MergeRequestState::Merged => "merged",
            MergeRequestState::All => "all",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateMergeRequestParams {
    #[schemars(description = "Project ID or path")]
    pub project: String,
    #[schemars(description = "Source branch name")]
    pub source_branch: String,
    #[schemars(description = "Target branch name (default: main)")]
    pub target_branch: Option<String>,
    #[schemars(description = "MR title")]
    pub title: String,
    #[schemars(description = "MR description (markdown)")]
    pub description: Option<String>,
    #[schemars(description = "Delete the source branch after merge (default: true)")]
    pub remove_source_branch: Option<bool>,
    #[schemars(description = "Array of user IDs to request review from")]
    pub reviewer_ids: Option<Vec<u64>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListMergeRequestsParams {
    #[schemars(description = "Project ID or path")]
    pub project: String,
    #[schemars(description = "MR state: opened, closed, merged or all (default: opened)")]
    pub state: Option<MergeRequestState>,
    #[schemars(description = "Number of results per page (default: 20)")]
    pub per_page: Option<u32>,
}

#[derive(Debug, Serialize)]
struct CreateMergeRequestBody {
    source_branch: String,
    target_branch: String,
    title: String,
    remove_source_branch: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    reviewer_ids: Option<Vec<u64>>,
}

/// Merge request tools
pub struct MergeRequestTools<C: GitLabApi> {
    client: Arc<C>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl<C: GitLabApi + 'static> MergeRequestTools<C> {
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

    #[tool(description = "Create a merge request in a GitLab project")]
    pub async fn create_merge_request(
        &self,
        params: Parameters<CreateMergeRequestParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let endpoint = format!(
            "/projects/{}/merge_requests",
            encode_project_path(&params.project)
        );
        let body = CreateMergeRequestBody {
            source_branch: params.source_branch,
            target_branch: ref_or_default(params.target_branch),
            title: params.title,
            remove_source_branch: params.remove_source_branch.unwrap_or(true),
            description: non_empty(params.description),
            reviewer_ids: params.reviewer_ids,
        };

        let mr: MergeRequest = self
            .client
            .post(&endpoint, &body)
            .await
            .map_err(map_gitlab_error)?;

        Ok(text_result(format!(
            "Merge Request !{} created: {}",
            mr.iid, mr.web_url
        )))
    }

    #[tool(description = "List merge requests in a GitLab project")]
    pub async fn list_merge_requests(
        &self,
        params: Parameters<ListMergeRequestsParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let query = QueryString::new()
            .with("state", params.state.unwrap_or_default().as_str())
            .with("per_page", per_page(params.per_page));
        let endpoint = format!(
            "/projects/{}/merge_requests?{query}",
            encode_project_path(&params.project)
        );

        let mrs: Vec<MergeRequest> = self
            .client
            .get(&endpoint)
            .await
            .map_err(map_gitlab_error)?;

        let summaries: Vec<MergeRequestSummary> =
            mrs.into_iter().map(MergeRequestSummary::from).collect();
        json_result(&summaries)
    }
}
