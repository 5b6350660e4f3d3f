//! GitLab REST API tools served over the Model Context Protocol.
//!
//! - [`gitlab`]: authenticated client, payload models and summaries
//! - [`mcp`]: tool handlers, registry and the MCP server
//! - [`config`]: validated host/token configuration
//! - [`cli`]: binary entry point and transports

pub mod cli;
pub mod config;
pub mod gitlab;
pub mod mcp;
