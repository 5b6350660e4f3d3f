//! Repository file tool implementations
//!
//! Handles MCP tools for reading file contents and committing file changes.

use base64::Engine as _;
use crate::gitlab::{FileBlob, GitLabApi, QueryString, encode_file_path, encode_project_path};
use crate::mcp::tools::{map_gitlab_error, ref_or_default, text_result};
use rmcp::{
    ErrorData as McpError,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    schemars,
    schemars::JsonSchema,
    tool, tool_router,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

/// Whether a file commit creates a new file or replaces an existing one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum FileAction {
    #[default]
    Create,
    Update,
}

impl FileAction {
    fn past_tense(self) -> &'static str {
        match self {
            FileAction::Create => "created",
            FileAction::Update => "updated",
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetFileParams {
    #[schemars(description = "Project ID or path")]
    pub project: String,
    #[schemars(description = "Path to the file in the repository")]
    pub file_path: String,
    #[serde(rename = "ref")]
    #[schemars(description = "Branch or commit SHA (default: main)")]
    pub ref_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateOrUpdateFileParams {
    #[schemars(description = "Project ID or path")]
    pub project: String,
    #[schemars(description = "Path to the file")]
    pub file_path: String,
    #[schemars(description = "Branch to commit to")]
    pub branch: String,
    #[schemars(description = "File content")]
    pub content: String,
    #[schemars(description = "Commit message")]
    pub commit_message: String,
    #[schemars(description = "create or update (default: create)")]
    pub action: Option<FileAction>,
}

#[derive(Debug, Serialize)]
struct FileCommitBody<'a> {
    branch: &'a str,
    content: &'a str,
    commit_message: &'a str,
}

/// Decode the base64 payload of the files API into text.
///
/// GitLab wraps long payloads, so whitespace is stripped first. Invalid UTF-8
/// is replaced rather than rejected.
pub(crate) fn decode_content(encoded: &str) -> Result<String, base64::DecodeError> {
    let compact: String = encoded
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let bytes = base64::prelude::BASE64_STANDARD.decode(compact)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Repository file tools
pub struct FileTools<C: GitLabApi> {
    client: Arc<C>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl<C: GitLabApi + 'static> FileTools<C> {
    pub fn new(client: Arc<C>) -> Self {
        Self {
            client,
            tool_router: Self::tool_router(),
        }
    }

    /// Get the tool router for this handler
    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    /// Returns the decoded file text as-is, not wrapped in JSON.
    #[tool(description = "Get contents of a file from the repository")]
    pub async fn get_file(
        &self,
        params: Parameters<GetFileParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let query = QueryString::new().with("ref", ref_or_default(params.ref_name));
        let endpoint = format!(
            "/projects/{}/repository/files/{}?{query}",
            encode_project_path(&params.project),
            encode_file_path(&params.file_path)
        );

        let file: FileBlob = self
            .client
            .get(&endpoint)
            .await
            .map_err(map_gitlab_error)?;

        let content = decode_content(&file.content).map_err(|e| {
            McpError::internal_error(
                "content_decode_error",
                Some(json!({"file_path": params.file_path, "error": e.to_string()})),
            )
        })?;

        Ok(text_result(content))
    }

    /// Create sends POST and update sends PUT to the same endpoint.
    #[tool(description = "Create or update a file in the repository")]
    pub async fn create_or_update_file(
        &self,
        params: Parameters<CreateOrUpdateFileParams>,
    ) -> Result<CallToolResult, McpError> {
        let params = params.0;
        let action = params.action.unwrap_or_default();
        let endpoint = format!(
            "/projects/{}/repository/files/{}",
            encode_project_path(&params.project),
            encode_file_path(&params.file_path)
        );
        let body = FileCommitBody {
            branch: &params.branch,
            content: &params.content,
            commit_message: &params.commit_message,
        };

        let result = match action {
            FileAction::Create => {
                self.client
                    .post::<_, serde_json::Value>(&endpoint, &body)
                    .await
            }
            FileAction::Update => {
                self.client
                    .put::<_, serde_json::Value>(&endpoint, &body)
                    .await
            }
        };
        result.map_err(map_gitlab_error)?;

        Ok(text_result(format!(
            "File '{}' {} on branch '{}'",
            params.file_path,
            action.past_tense(),
            params.branch
        )))
    }
}
