//! Tests for issue MCP tools

use super::issues::*;
use super::test_support::{MockGitLab, RecordedCall, text_of};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::{Value, json};
use std::sync::Arc;

fn issue_json(iid: u64, title: &str) -> Value {
    json!({
        "id": 1000 + iid,
        "iid": iid,
        "title": title,
        "description": "details",
        "state": "opened",
        "web_url": format!("https://gitlab.com/g/p/-/issues/{iid}"),
        "labels": ["bug"],
        "created_at": "2024-05-01T10:00:00Z",
        "author": {"id": 1, "username": "alice"}
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_issue_sends_only_supplied_fields() {
    let client = Arc::new(MockGitLab::returning(issue_json(5, "Crash on start")));
    let tools = IssueTools::new(Arc::clone(&client));

    let result = tools
        .create_issue(Parameters(CreateIssueParams {
            project: "group/project".to_string(),
            title: "Crash on start".to_string(),
            description: None,
            labels: None,
            assignee_ids: None,
        }))
        .await
        .unwrap();

    assert_eq!(
        client.only_call(),
        RecordedCall::Post(
            "/projects/group%2Fproject/issues".to_string(),
            json!({"title": "Crash on start"})
        )
    );
    assert_eq!(
        text_of(&result),
        "Issue #5 created: https://gitlab.com/g/p/-/issues/5"
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_create_issue_with_all_fields() {
    let client = Arc::new(MockGitLab::returning(issue_json(6, "Feature")));
    let tools = IssueTools::new(Arc::clone(&client));

    tools
        .create_issue(Parameters(CreateIssueParams {
            project: "1".to_string(),
            title: "Feature".to_string(),
            description: Some("Please add".to_string()),
            labels: Some("enhancement,ui".to_string()),
            assignee_ids: Some(vec![3, 4]),
        }))
        .await
        .unwrap();

    assert_eq!(
        client.only_call(),
        RecordedCall::Post(
            "/projects/1/issues".to_string(),
            json!({
                "title": "Feature",
                "description": "Please add",
                "labels": "enhancement,ui",
                "assignee_ids": [3, 4]
            })
        )
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_issues_defaults() {
    let client = Arc::new(MockGitLab::returning(json!([
        issue_json(1, "First"),
        issue_json(2, "Second"),
        issue_json(3, "Third")
    ])));
    let tools = IssueTools::new(Arc::clone(&client));

    let result = tools
        .list_issues(Parameters(ListIssuesParams {
            project: "group/project".to_string(),
            state: None,
            search: None,
            per_page: None,
        }))
        .await
        .unwrap();

    assert_eq!(
        client.only_call(),
        RecordedCall::Get("/projects/group%2Fproject/issues?state=opened&per_page=20".to_string())
    );

    let issues: Vec<Value> = serde_json::from_str(text_of(&result)).unwrap();
    let iids: Vec<u64> = issues.iter().map(|i| i["iid"].as_u64().unwrap()).collect();
    assert_eq!(iids, vec![1, 2, 3]);
    assert_eq!(issues[0]["labels"], json!(["bug"]));
    assert!(issues[0].get("description").is_none());
    assert!(issues[0].get("author").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_issues_with_state_and_search() {
    let client = Arc::new(MockGitLab::returning(json!([])));
    let tools = IssueTools::new(Arc::clone(&client));

    tools
        .list_issues(Parameters(ListIssuesParams {
            project: "7".to_string(),
            state: Some(IssueState::Closed),
            search: Some("login".to_string()),
            per_page: Some(50),
        }))
        .await
        .unwrap();

    assert_eq!(
        client.only_call(),
        RecordedCall::Get("/projects/7/issues?state=closed&per_page=50&search=login".to_string())
    );
}

#[test]
fn test_issue_state_rejects_unknown_values() {
    let ok: ListIssuesParams =
        serde_json::from_value(json!({"project": "1", "state": "all"})).unwrap();
    assert_eq!(ok.state, Some(IssueState::All));

    let bad = serde_json::from_value::<ListIssuesParams>(json!({"project": "1", "state": "merged"}));
    assert!(bad.is_err());
}
