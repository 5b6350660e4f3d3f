//! MCP Streamable HTTP service creation
//!
//! Builds the tower service that the `streamable-http` transport nests into
//! an axum router.

use std::sync::Arc;

use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig, StreamableHttpService, session::local::LocalSessionManager,
};
use tokio_util::sync::CancellationToken;

use crate::gitlab::GitLabApi;

use super::server::GitLabMcpServer;

/// Create MCP Streamable HTTP service
///
/// Each session gets its own [`GitLabMcpServer`]; all of them share `client`.
///
/// # Example
/// ```no_run
/// use std::sync::Arc;
///
/// use axum::Router;
/// use tokio_util::sync::CancellationToken;
/// # use gitlab_mcp::gitlab::{ClientConfig, GitLabClient};
/// # use gitlab_mcp::mcp::create_mcp_service;
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = GitLabClient::new(ClientConfig {
///     api_base: "https://gitlab.com/api/v4".to_string(),
///     token: "glpat-example".to_string(),
/// })?;
///
/// let ct = CancellationToken::new();
/// let mcp_service = create_mcp_service(Arc::new(client), ct);
///
/// let app: Router = Router::new().nest_service("/mcp", mcp_service);
/// # Ok(())
/// # }
/// ```
pub fn create_mcp_service<C: GitLabApi + 'static>(
    client: Arc<C>,
    cancellation_token: CancellationToken,
) -> StreamableHttpService<GitLabMcpServer<C>, LocalSessionManager> {
    // Returns io::Error to match rmcp's expected signature
    let service_factory = move || -> Result<GitLabMcpServer<C>, std::io::Error> {
        Ok(GitLabMcpServer::new(Arc::clone(&client)))
    };

    let mut config = StreamableHttpServerConfig::default();
    config.stateful_mode = true;
    config.cancellation_token = cancellation_token;

    StreamableHttpService::new(
        service_factory,
        LocalSessionManager::default().into(),
        config,
    )
}
