//! User lookup tool implementation

use crate::gitlab::{GitLabApi, QueryString, User, UserSummary};
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
pub struct SearchUsersParams {
    #[schemars(description = "Search by name, username or public email")]
    pub search: String,
    #[schemars(description = "Number of results per page (default: 20)")]
    pub per_page: Option<u32>,
}

/// User tools
pub struct UserTools<C: GitLabApi> {
    client: Arc<C>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl<C: GitLabApi + 'static> UserTools<C> {
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

    #[tool(description = "Search for GitLab users")]
    pub async fn search_users(
        &self,
        params: Parameters<SearchUsersParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let query = QueryString::new()
            .with("search", &params.search)
            .with("per_page", per_page(params.per_page));

        let users: Vec<User> = self
            .client
            .get(&format!("/users?{query}"))
            .await
            .map_err(map_gitlab_error)?;

        let summaries: Vec<UserSummary> = users.into_iter().map(UserSummary::from).collect();
        json_result(&summaries)
    }
}
