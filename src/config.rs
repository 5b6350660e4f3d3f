//! Runtime configuration.
//!
//! The GitLab host and access token come from the CLI or the environment
//! (see [`crate::cli`]). Validation reports every bad field at once instead
//! of stopping at the first.

use std::fmt;

use miette::Diagnostic;
use reqwest::Url;
use thiserror::Error;

use crate::gitlab::ClientConfig;

pub const DEFAULT_GITLAB_HOST: &str = "https://gitlab.com";

/// One rejected configuration field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "  - {}: {}", self.field, self.message)
    }
}

fn render_issues(issues: &[ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("\n")
}

#[derive(Error, Diagnostic, Debug)]
#[error("Configuration error:\n{}", render_issues(.issues))]
#[diagnostic(
    code(gitlab_mcp::config::invalid),
    help("Set GITLAB_HOST and GITLAB_TOKEN, or pass --gitlab-host and --gitlab-token.")
)]
pub struct ConfigError {
    pub issues: Vec<ConfigIssue>,
}

/// Validated configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct Config {
    /// Instance root without trailing slash, e.g. `https://gitlab.example.com`
    pub gitlab_host: String,
    pub gitlab_token: String,
    /// `{gitlab_host}/api/v4`
    pub api_base: String,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("gitlab_host", &self.gitlab_host)
            .field("gitlab_token", &"[redacted]")
            .field("api_base", &self.api_base)
            .finish()
    }
}

impl Config {
    /// Validate raw host and token values.
    ///
    /// A missing or empty host falls back to [`DEFAULT_GITLAB_HOST`]. The
    /// token is required.
    pub fn from_values(host: Option<String>, token: Option<String>) -> Result<Self, ConfigError> {
        let mut issues = Vec::new();

        let host = host
            .map(|h| h.trim().to_string())
            .filter(|h| !h.is_empty())
            .unwrap_or_else(|| DEFAULT_GITLAB_HOST.to_string());
        let gitlab_host = match validate_host(&host) {
            Some(host) => host,
            None => {
                issues.push(ConfigIssue {
                    field: "GITLAB_HOST",
                    message: "Invalid url".to_string(),
                });
                String::new()
            }
        };

        let gitlab_token = token.filter(|t| !t.trim().is_empty()).unwrap_or_default();
        if gitlab_token.is_empty() {
            issues.push(ConfigIssue {
                field: "GITLAB_TOKEN",
                message: "GITLAB_TOKEN is required".to_string(),
            });
        }

        if !issues.is_empty() {
            return Err(ConfigError { issues });
        }

        let api_base = format!("{gitlab_host}/api/v4");
        Ok(Self {
            gitlab_host,
            gitlab_token,
            api_base,
        })
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig {
            api_base: self.api_base.clone(),
            token: self.gitlab_token.clone(),
        }
    }
}

/// Absolute http(s) URL with any trailing slashes removed.
fn validate_host(raw: &str) -> Option<String> {
    let url = Url::parse(raw).ok()?;
    if !matches!(url.scheme(), "http" | "https") || url.host_str().is_none() {
        return None;
    }
    Some(raw.trim_end_matches('/').to_string())
}
