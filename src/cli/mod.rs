//! Command line entry point.
//!
//! Parses flags (with environment fallbacks), validates configuration,
//! installs logging and serves the MCP tools over the selected transport.

pub mod error;

#[cfg(test)]
mod cli_test;

use std::sync::Arc;

use axum::Router;
use clap::{Parser, ValueEnum};
use rmcp::{ServiceExt, transport::stdio};
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::gitlab::GitLabClient;
use crate::mcp::{GitLabMcpServer, create_mcp_service};

pub use error::{CliError, CliResult};

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:3001";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// JSON-RPC over stdin/stdout
    Stdio,
    /// Streamable HTTP at /mcp
    StreamableHttp,
}

#[derive(Parser, Debug)]
#[command(name = "gitlab-mcp")]
#[command(author, version, about = "GitLab tools for MCP clients", long_about = None)]
pub struct Cli {
    /// GitLab instance URL (default: https://gitlab.com)
    #[arg(long, env = "GITLAB_HOST")]
    pub gitlab_host: Option<String>,

    /// Personal, project or group access token
    #[arg(long, env = "GITLAB_TOKEN", hide_env_values = true)]
    pub gitlab_token: Option<String>,

    #[arg(
        long,
        value_enum,
        env = "GITLAB_MCP_TRANSPORT",
        default_value_t = Transport::Stdio
    )]
    pub transport: Transport,

    /// Listen address for the streamable-http transport
    #[arg(
        long,
        value_name = "ADDRESS",
        env = "GITLAB_MCP_BIND_ADDRESS",
        default_value = DEFAULT_BIND_ADDRESS
    )]
    pub bind_address: String,
}

/// Logs go to stderr; stdout belongs to the stdio transport.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "gitlab_mcp=info".into()))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Run the server until the client disconnects or Ctrl-C.
pub async fn run() -> CliResult<()> {
    let cli = Cli::parse();
    init_tracing();

    let config = Config::from_values(cli.gitlab_host, cli.gitlab_token)?;
    info!(host = %config.gitlab_host, transport = ?cli.transport, "Starting gitlab-mcp");

    let client = Arc::new(GitLabClient::new(config.client_config())?);

    match cli.transport {
        Transport::Stdio => serve_stdio(client).await,
        Transport::StreamableHttp => serve_http(client, &cli.bind_address).await,
    }
}

async fn serve_stdio(client: Arc<GitLabClient>) -> CliResult<()> {
    let service = GitLabMcpServer::new(client)
        .serve(stdio())
        .await
        .map_err(|e| CliError::Session {
            message: e.to_string(),
        })?;

    let reason = service.waiting().await.map_err(|e| CliError::Session {
        message: e.to_string(),
    })?;
    info!(?reason, "MCP session closed");
    Ok(())
}

async fn serve_http(client: Arc<GitLabClient>, bind_address: &str) -> CliResult<()> {
    let ct = CancellationToken::new();
    let app = Router::new()
        .nest_service("/mcp", create_mcp_service(client, ct.clone()))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .map_err(|source| CliError::Bind {
            address: bind_address.to_string(),
            source,
        })?;
    info!("MCP server listening on http://{}/mcp", bind_address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!(error = %e, "Failed to listen for Ctrl-C");
            }
            info!("Shutting down");
            ct.cancel();
        })
        .await
        .map_err(|source| CliError::Serve { source })
}
