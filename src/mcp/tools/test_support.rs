//! Recording GitLab client for tool tests.

use std::future::{Future, Ready, ready};
use std::sync::Mutex;

use rmcp::model::{CallToolResult, RawContent};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::gitlab::{GitLabApi, GitLabError, GitLabResult};

#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Get(String),
    Post(String, Value),
    Put(String, Value),
}

/// Answers every request with the same canned payload or API error and
/// remembers what was asked.
pub struct MockGitLab {
    response: Result<Value, (u16, String)>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockGitLab {
    pub fn returning(payload: Value) -> Self {
        Self {
            response: Ok(payload),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(status: u16, body: &str) -> Self {
        Self {
            response: Err((status, body.to_string())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// The single recorded call; panics if there were zero or several.
    pub fn only_call(&self) -> RecordedCall {
        let calls = self.calls();
        assert_eq!(calls.len(), 1, "expected exactly one call, got {calls:?}");
        calls.into_iter().next().unwrap()
    }

    fn record(&self, call: RecordedCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn respond<T: DeserializeOwned>(&self, endpoint: &str) -> Ready<GitLabResult<T>> {
        let result = match &self.response {
            Ok(payload) => serde_json::from_value(payload.clone()).map_err(|source| {
                GitLabError::InvalidResponse {
                    endpoint: endpoint.to_string(),
                    source,
                }
            }),
            Err((status, body)) => Err(GitLabError::Api {
                status: *status,
                body: body.clone(),
                endpoint: endpoint.to_string(),
            }),
        };
        ready(result)
    }
}

impl GitLabApi for MockGitLab {
    fn get<T>(&self, endpoint: &str) -> impl Future<Output = GitLabResult<T>> + Send
    where
        T: DeserializeOwned + Send,
    {
        self.record(RecordedCall::Get(endpoint.to_string()));
        self.respond(endpoint)
    }

    fn post<B, T>(&self, endpoint: &str, body: &B) -> impl Future<Output = GitLabResult<T>> + Send
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let body = serde_json::to_value(body).unwrap();
        self.record(RecordedCall::Post(endpoint.to_string(), body));
        self.respond(endpoint)
    }

    fn put<B, T>(&self, endpoint: &str, body: &B) -> impl Future<Output = GitLabResult<T>> + Send
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned + Send,
    {
        let body = serde_json::to_value(body).unwrap();
        self.record(RecordedCall::Put(endpoint.to_string(), body));
        self.respond(endpoint)
    }
}

pub fn text_of(result: &CallToolResult) -> &str {
    match &result.content[0].raw {
        RawContent::Text(text) => text.text.as_str(),
        _ => panic!("Expected text content"),
    }
}
