//! Compact views of GitLab entities returned to MCP callers.
//!
//! Every field is copied or renamed from the source entity; nothing is
//! invented. Optional fields that are absent are left out of the JSON.

use serde::{Deserialize, Serialize};

use super::models::{Branch, Issue, MergeRequest, Project, SearchHit, User};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    pub id: u64,
    pub name: String,
    pub path_with_namespace: String,
    pub web_url: String,
    pub default_branch: Option<String>,
}

impl From<Project> for ProjectSummary {
    fn from(p: Project) -> Self {
        Self {
            id: p.id,
            name: p.name,
            path_with_namespace: p.path_with_namespace,
            web_url: p.web_url,
            default_branch: p.default_branch,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BranchSummary {
    pub name: String,
    pub protected: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_sha: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commit_message: Option<String>,
}

impl From<Branch> for BranchSummary {
    fn from(b: Branch) -> Self {
        let (commit_sha, commit_message) = match b.commit {
            Some(commit) => (Some(commit.short_id), commit.title),
            None => (None, None),
        };

        Self {
            name: b.name,
            protected: b.protected,
            commit_sha,
            commit_message,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IssueSummary {
    pub iid: u64,
    pub title: String,
    pub state: String,
    pub web_url: String,
    pub labels: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

impl From<Issue> for IssueSummary {
    fn from(i: Issue) -> Self {
        Self {
            iid: i.iid,
            title: i.title,
            state: i.state,
            web_url: i.web_url,
            labels: i.labels,
            created_at: i.created_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeRequestSummary {
    pub iid: u64,
    pub title: String,
    pub state: String,
    pub source_branch: String,
    pub target_branch: String,
    pub web_url: String,
    /// Author username.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Reviewer usernames, in API order.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviewers: Option<Vec<String>>,
}

impl From<MergeRequest> for MergeRequestSummary {
    fn from(mr: MergeRequest) -> Self {
        let reviewers = mr
            .reviewers
            .filter(|r| !r.is_empty())
            .map(|r| r.into_iter().map(|u| u.username).collect());

        Self {
            iid: mr.iid,
            title: mr.title,
            state: mr.state,
            source_branch: mr.source_branch,
            target_branch: mr.target_branch,
            web_url: mr.web_url,
            author: mr.author.map(|a| a.username),
            reviewers,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResultSummary {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    pub path: String,
    #[serde(rename = "ref")]
    pub ref_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub startline: Option<u64>,
    pub data: String,
}

impl From<SearchHit> for SearchResultSummary {
    fn from(hit: SearchHit) -> Self {
        Self {
            filename: hit.filename,
            path: hit.path,
            ref_name: hit.ref_name,
            startline: hit.startline,
            data: hit.data,
        }
    }
}

/// User lookup result; avatar and profile URLs are dropped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: u64,
    pub username: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
}

impl From<User> for UserSummary {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            username: u.username,
            name: u.name,
            state: u.state,
        }
    }
}
