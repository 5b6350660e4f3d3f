use miette::Diagnostic;
use thiserror::Error;

use crate::config::ConfigError;
use crate::gitlab::GitLabError;

#[derive(Error, Diagnostic, Debug)]
pub enum CliError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Client(#[from] GitLabError),

    #[error("Failed to bind {address}")]
    #[diagnostic(
        code(gitlab_mcp::cli::bind_failed),
        help("Is another process using the address? Pick another with --bind-address or GITLAB_MCP_BIND_ADDRESS.")
    )]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },

    #[error("HTTP server error")]
    #[diagnostic(code(gitlab_mcp::cli::serve))]
    Serve {
        #[source]
        source: std::io::Error,
    },

    #[error("MCP session failed: {message}")]
    #[diagnostic(code(gitlab_mcp::cli::session))]
    Session { message: String },
}

pub type CliResult<T> = Result<T, CliError>;
