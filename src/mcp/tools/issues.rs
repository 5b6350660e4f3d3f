//! Issue tool implementations
//!
//! Handles MCP tools for creating and listing project issues.

use crate::gitlab::{GitLabApi, Issue, IssueSummary, QueryString, encode_project_path};
use crate::mcp::tools::{json_result, map_gitlab_error, non_empty, per_page, text_result};
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

/// Issue state filter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    #[default]
    Opened,
    Closed,
    All,
}

impl IssueState {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueState::Opened => "opened",
            IssueState::Closed => "closed",
            IssueState::All => "all",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateIssueParams {
    #[schemars(description = "Project ID or path")]
    pub project: String,
    #[schemars(description = "Issue title")]
    pub title: String,
    #[schemars(description = "Issue description (markdown)")]
    pub description: Option<String>,
    #[schemars(description = "Comma-separated labels")]
    pub labels: Option<String>,
    #[schemars(description = "Array of user IDs to assign")]
    pub assignee_ids: Option<Vec<u64>>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListIssuesParams {
    #[schemars(description = "Project ID or path")]
    pub project: String,
    #[schemars(description = "Issue state: opened, closed or all (default: opened)")]
    pub state: Option<IssueState>,
    #[schemars(description = "Search in title and description")]
    pub search: Option<String>,
    #[schemars(description = "Number of results per page (default: 20)")]
    pub per_page: Option<u32>,
}

/// Only fields the caller supplied are sent.
#[derive(Debug, Serialize)]
struct CreateIssueBody {
    title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    labels: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    assignee_ids: Option<Vec<u64>>,
}

/// Issue tools
pub struct IssueTools<C: GitLabApi> {
    client: Arc<C>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl<C: GitLabApi + 'static> IssueTools<C> {
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

    #[tool(description = "Create a new issue in a GitLab project")]
    pub async fn create_issue(
        &self,
        params: Parameters<CreateIssueParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let endpoint = format!("/projects/{}/issues", encode_project_path(&params.project));
        let body = CreateIssueBody {
            title: params.title,
            description: non_empty(params.description),
            labels: non_empty(params.labels),
            assignee_ids: params.assignee_ids,
        };

        let issue: Issue = self
            .client
            .post(&endpoint, &body)
            .await
            .map_err(map_gitlab_error)?;

        Ok(text_result(format!(
            "Issue #{} created: {}",
            issue.iid, issue.web_url
        )))
    }

    #[tool(description = "List issues in a GitLab project")]
    pub async fn list_issues(
        &self,
        params: Parameters<ListIssuesParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let query = QueryString::new()
            .with("state", params.state.unwrap_or_default().as_str())
            .with("per_page", per_page(params.per_page))
            .with_opt("search", non_empty(params.search).as_deref());
        let endpoint = format!(
            "/projects/{}/issues?{query}",
            encode_project_path(&params.project)
        );

        let issues: Vec<Issue> = self
            .client
            .get(&endpoint)
            .await
            .map_err(map_gitlab_error)?;

        let summaries: Vec<IssueSummary> = issues.into_iter().map(IssueSummary::from).collect();
        json_result(&summaries)
    }
}
