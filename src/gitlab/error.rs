//! GitLab client error types.
//!
//! Uses miette for diagnostic output and thiserror for derive macros.
//! API failures keep the raw response body and the endpoint that was called
//! so the failing request can be reconstructed from the error alone.

use miette::Diagnostic;
use thiserror::Error;

/// Errors raised while talking to the GitLab API.
#[derive(Error, Diagnostic, Debug)]
pub enum GitLabError {
    /// The server answered with a non-success status.
    #[error("GitLab API error ({status}) on {endpoint}: {body}")]
    #[diagnostic(code(gitlab_mcp::gitlab::api_error))]
    Api {
        status: u16,
        body: String,
        endpoint: String,
    },

    #[error("Failed to reach GitLab at {endpoint}: {source}")]
    #[diagnostic(
        code(gitlab_mcp::gitlab::transport),
        help("Check GITLAB_HOST and that the instance is reachable from this machine.")
    )]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Invalid response from GitLab on {endpoint}: {source}")]
    #[diagnostic(
        code(gitlab_mcp::gitlab::invalid_response),
        help("The response body was not the JSON shape this tool expects.")
    )]
    InvalidResponse {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to encode request body for {endpoint}: {source}")]
    #[diagnostic(code(gitlab_mcp::gitlab::serialize))]
    Serialize {
        endpoint: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Access token contains characters that are not valid in an HTTP header")]
    #[diagnostic(code(gitlab_mcp::gitlab::invalid_token))]
    InvalidToken,

    #[error("Failed to build HTTP client")]
    #[diagnostic(code(gitlab_mcp::gitlab::client_build))]
    ClientBuild {
        #[source]
        source: reqwest::Error,
    },
}

impl GitLabError {
    /// HTTP status of an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            GitLabError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Endpoint the failing request targeted, when known.
    pub fn endpoint(&self) -> Option<&str> {
        match self {
            GitLabError::Api { endpoint, .. }
            | GitLabError::Transport { endpoint, .. }
            | GitLabError::InvalidResponse { endpoint, .. }
            | GitLabError::Serialize { endpoint, .. } => Some(endpoint),
            GitLabError::InvalidToken | GitLabError::ClientBuild { .. } => None,
        }
    }
}

/// Result type for GitLab operations.
pub type GitLabResult<T> = Result<T, GitLabError>;
