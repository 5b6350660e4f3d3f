//! MCP server implementation
//!
//! Answers `tools/list` from the [`ToolRegistry`] and hands each `tools/call`
//! to the group that registered the tool.

use std::future::{Future, ready};
use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    model::{
        CallToolRequestParams, CallToolResult, ListToolsResult, PaginatedRequestParams,
        ServerCapabilities, ServerInfo,
    },
    service::RequestContext,
};
use tracing::debug;

use crate::gitlab::GitLabApi;

use super::tools::ToolRegistry;

const INSTRUCTIONS: &str = "GitLab MCP Server - Browse and manage GitLab projects, branches, \
issues, merge requests, repository files, code search and users. Projects may be given \
as a numeric ID or a full path such as 'group/project'.";

/// Main MCP server coordinator
///
/// Generic over `C: GitLabApi`; every session built by the HTTP transport
/// shares the same client through `Arc`.
pub struct GitLabMcpServer<C: GitLabApi> {
    tools: ToolRegistry<C>,
}

impl<C: GitLabApi + 'static> GitLabMcpServer<C> {
    /// Create a server with every tool registered against `client`.
    pub fn new(client: Arc<C>) -> Self {
        Self {
            tools: ToolRegistry::new(client),
        }
    }

    pub fn registry(&self) -> &ToolRegistry<C> {
        &self.tools
    }
}

impl<C: GitLabApi + 'static> ServerHandler for GitLabMcpServer<C> {
    fn get_info(&self) -> ServerInfo {
        let mut info = ServerInfo::default();
        info.capabilities = ServerCapabilities::builder().enable_tools().build();
        info.server_info.name = env!("CARGO_PKG_NAME").to_string();
        info.server_info.version = env!("CARGO_PKG_VERSION").to_string();
        info.instructions = Some(INSTRUCTIONS.to_string());
        info
    }

    fn list_tools(
        &self,
        _request: Option<PaginatedRequestParams>,
        _context: RequestContext<RoleServer>,
    ) -> impl Future<Output = Result<ListToolsResult, McpError>> + Send + '_ {
        ready(Ok(ListToolsResult::with_all_items(self.tools.definitions())))
    }

    async fn call_tool(
        &self,
        request: CallToolRequestParams,
        context: RequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        debug!(tool = %request.name, "Calling tool");
        self.tools.call(request, context).await
    }
}
