//! Model Context Protocol (MCP) server implementation
//!
//! - **server**: `GitLabMcpServer`, the `ServerHandler` answering list/call requests
//! - **service**: Streamable HTTP service for the axum transport
//! - **tools**: one struct per GitLab resource plus the registry combining them
//!
//! Everything is generic over `C: GitLabApi`, so the same server runs against
//! the real HTTP client or an in-memory double.

pub mod server;
mod service;
pub mod tools;


pub use server::GitLabMcpServer;
pub use service::create_mcp_service;
