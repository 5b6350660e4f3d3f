//! GitLab REST API access layer.
//!
//! This module owns everything that talks to the remote GitLab instance:
//!
//! - `client`: the authenticated HTTP client and the `GitLabApi` trait tools depend on
//! - `error`: structured errors for API, transport and decoding failures
//! - `models`: permissive mirrors of the GitLab JSON payloads
//! - `summary`: compact projections returned to MCP callers
//! - `path`: percent-encoding of path segments and query string assembly

mod client;
mod error;
mod models;
mod path;
mod summary;


pub use client::{ClientConfig, GitLabApi, GitLabClient};
pub use error::{GitLabError, GitLabResult};
pub use models::*;
pub use path::{QueryString, encode_file_path, encode_project_path};
pub use summary::*;
