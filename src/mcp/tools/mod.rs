//! MCP tool implementations
//!
//! Tool handlers are grouped by GitLab resource. Each group is its own struct
//! with a macro-generated router, generic over `C: GitLabApi`, and the
//! [`ToolRegistry`] stitches the groups into one ordered catalogue.

mod branches;
mod files;
mod issues;
mod merge_requests;
mod projects;
mod registry;
mod search;
mod users;

#[cfg(test)]
mod issues_test;
#[cfg(test)]
mod projects_test;
#[cfg(test)]
mod registry_test;
#[cfg(test)]
pub(crate) mod test_support;

pub use branches::BranchTools;
pub use files::{FileAction, FileTools};
pub use issues::{IssueState, IssueTools};
pub use merge_requests::{MergeRequestState, MergeRequestTools};
pub use projects::ProjectTools;
pub use registry::{TOOL_NAMES, ToolRegistry};
pub use search::SearchTools;
pub use users::UserTools;

use rmcp::{
    ErrorData as McpError,
    model::{CallToolResult, Content},
};
use serde::Serialize;
use serde_json::json;

use crate::gitlab::GitLabError;

/// Page size used when the caller gives none (or zero).
pub const DEFAULT_PER_PAGE: u32 = 20;

/// Branch used when the caller gives no ref or target branch.
pub const DEFAULT_REF: &str = "main";

pub(crate) fn per_page(requested: Option<u32>) -> u32 {
    match requested {
        None | Some(0) => DEFAULT_PER_PAGE,
        Some(n) => n,
    }
}

pub(crate) fn ref_or_default(requested: Option<String>) -> String {
    non_empty(requested).unwrap_or_else(|| DEFAULT_REF.to_string())
}

/// Treat empty optional strings as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Convert a GitLab failure into an MCP error.
///
/// API errors carry status, endpoint and raw body in the error data so the
/// caller sees exactly what GitLab answered. Other errors carry the endpoint
/// and, when present, the chain of underlying causes.
pub(crate) fn map_gitlab_error(err: GitLabError) -> McpError {
    let data = match &err {
        GitLabError::Api {
            status,
            body,
            endpoint,
        } => Some(json!({
            "status": status,
            "endpoint": endpoint,
            "body": body,
        })),
        other => other.endpoint().map(|endpoint| match source_chain(other) {
            Some(cause) => json!({ "endpoint": endpoint, "cause": cause }),
            None => json!({ "endpoint": endpoint }),
        }),
    };

    McpError::internal_error(err.to_string(), data)
}

/// Every underlying cause of `err`, outermost first, joined with `: `.
fn source_chain(err: &dyn std::error::Error) -> Option<String> {
    let mut causes = Vec::new();
    let mut current = err.source();
    while let Some(cause) = current {
        causes.push(cause.to_string());
        current = cause.source();
    }
    (!causes.is_empty()).then(|| causes.join(": "))
}

/// Render a value as a pretty-printed JSON text block.
pub(crate) fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult, McpError> {
    let content = serde_json::to_string_pretty(value).map_err(|e| {
        McpError::internal_error(
            "serialization_error",
            Some(json!({"error": e.to_string()})),
        )
    })?;

    Ok(CallToolResult::success(vec![Content::text(content)]))
}

pub(crate) fn text_result(text: impl Into<String>) -> CallToolResult {
    CallToolResult::success(vec![Content::text(text.into())])
}
