//! Tool registry
//!
//! Owns one instance of every tool group and exposes them as a single
//! catalogue: the definitions for `tools/list` and dispatch for `tools/call`.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer,
    handler::server::tool::ToolCallContext,
    model::{CallToolRequestParams, CallToolResult, Tool},
    service::RequestContext,
};
use tracing::debug;

use crate::gitlab::GitLabApi;

use super::{
    BranchTools, FileTools, IssueTools, MergeRequestTools, ProjectTools, SearchTools, UserTools,
};

/// Every registered tool, in the order `tools/list` reports them.
pub const TOOL_NAMES: [&str; 12] = [
    "list_projects",
    "get_project",
    "list_branches",
    "create_branch",
    "create_issue",
    "list_issues",
    "create_merge_request",
    "list_merge_requests",
    "get_file",
    "create_or_update_file",
    "search_code",
    "search_users",
];

/// All tool groups sharing one GitLab client.
///
/// Built once; the set of tools never changes afterwards.
pub struct ToolRegistry<C: GitLabApi> {
    projects: ProjectTools<C>,
    branches: BranchTools<C>,
    issues: IssueTools<C>,
    merge_requests: MergeRequestTools<C>,
    files: FileTools<C>,
    search: SearchTools<C>,
    users: UserTools<C>,
}

impl<C: GitLabApi + 'static> ToolRegistry<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            projects: ProjectTools::new(Arc::clone(&client)),
            branches: BranchTools::new(Arc::clone(&client)),
            issues: IssueTools::new(Arc::clone(&client)),
            merge_requests: MergeRequestTools::new(Arc::clone(&client)),
            files: FileTools::new(Arc::clone(&client)),
            search: SearchTools::new(Arc::clone(&client)),
            users: UserTools::new(client),
        }
    }

    /// Tool definitions (name, description, input schema) in registration order.
    pub fn definitions(&self) -> Vec<Tool> {
        let mut tools = self.projects.router().list_all();
        tools.extend(self.branches.router().list_all());
        tools.extend(self.issues.router().list_all());
        tools.extend(self.merge_requests.router().list_all());
        tools.extend(self.files.router().list_all());
        tools.extend(self.search.router().list_all());
        tools.extend(self.users.router().list_all());

        tools.sort_by_key(|tool| {
            TOOL_NAMES
                .iter()
                .position(|name| tool.name == *name)
                .unwrap_or(TOOL_NAMES.len())
        });
        tools
    }

    pub fn contains(&self, name: &str) -> bool {
        self.projects.router().has_route(name)
            || self.branches.router().has_route(name)
            || self.issues.router().has_route(name)
            || self.merge_requests.router().has_route(name)
            || self.files.router().has_route(name)
            || self.search.router().has_route(name)
            || self.users.router().has_route(name)
    }

    /// Route a tool call to the group that registered the tool.
    pub async fn call(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let name = request.name.to_string();
        debug!(tool = %name, "Dispatching tool call");

        if self.projects.router().has_route(&name) {
            let ctx = ToolCallContext::new(&self.projects, request, context);
            return self.projects.router().call(ctx).await;
        }
        if self.branches.router().has_route(&name) {
            let ctx = ToolCallContext::new(&self.branches, request, context);
            return self.branches.router().call(ctx).await;
        }
        if self.issues.router().has_route(&name) {
            let ctx = ToolCallContext::new(&self.issues, request, context);
            return self.issues.router().call(ctx).await;
        }
        if self.merge_requests.router().has_route(&name) {
            let ctx = ToolCallContext::new(&self.merge_requests, request, context);
            return self.merge_requests.router().call(ctx).await;
        }
        if self.files.router().has_route(&name) {
            let ctx = ToolCallContext::new(&self.files, request, context);
            return self.files.router().call(ctx).await;
        }
        if self.search.router().has_route(&name) {
            let ctx = ToolCallContext::new(&self.search, request, context);
            return self.search.router().call(ctx).await;
        }
        if self.users.router().has_route(&name) {
            let ctx = ToolCallContext::new(&self.users, request, context);
            return self.users.router().call(ctx).await;
        }

        Err(McpError::invalid_params(
            format!("Unknown tool: {name}"),
            None,
        ))
    }
}
