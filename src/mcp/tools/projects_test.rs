//! Tests for project MCP tools

use super::projects::*;
use super::test_support::{MockGitLab, RecordedCall, text_of};
use crate::gitlab::{ClientConfig, GitLabClient};
use rmcp::handler::server::wrapper::Parameters;
use serde_json::{Value, json};
use std::sync::Arc;

fn project_json(id: u64, path: &str) -> Value {
    json!({
        "id": id,
        "name": path.rsplit('/').next().unwrap(),
        "path_with_namespace": path,
        "web_url": format!("https://gitlab.com/{path}"),
        "default_branch": "main",
        "visibility": "private",
        "star_count": 0
    })
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_projects_defaults_per_page() {
    let client = Arc::new(MockGitLab::returning(json!([
        project_json(1, "group/alpha"),
        project_json(2, "group/beta")
    ])));
    let tools = ProjectTools::new(Arc::clone(&client));

    let result = tools
        .list_projects(Parameters(ListProjectsParams {
            search: None,
            per_page: None,
        }))
        .await
        .unwrap();

    assert_eq!(
        client.only_call(),
        RecordedCall::Get("/projects?per_page=20".to_string())
    );

    let projects: Vec<Value> = serde_json::from_str(text_of(&result)).unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0]["path_with_namespace"], "group/alpha");
    assert_eq!(projects[1]["id"], 2);
    assert!(projects[0].get("visibility").is_none());
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_projects_with_search() {
    let client = Arc::new(MockGitLab::returning(json!([])));
    let tools = ProjectTools::new(Arc::clone(&client));

    let result = tools
        .list_projects(Parameters(ListProjectsParams {
            search: Some("my app".to_string()),
            per_page: Some(5),
        }))
        .await
        .unwrap();

    assert_eq!(
        client.only_call(),
        RecordedCall::Get("/projects?per_page=5&search=my%20app".to_string())
    );
    assert_eq!(text_of(&result), "[]");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_list_projects_treats_zero_and_empty_as_unset() {
    let client = Arc::new(MockGitLab::returning(json!([])));
    let tools = ProjectTools::new(Arc::clone(&client));

    tools
        .list_projects(Parameters(ListProjectsParams {
            search: Some(String::new()),
            per_page: Some(0),
        }))
        .await
        .unwrap();

    assert_eq!(
        client.only_call(),
        RecordedCall::Get("/projects?per_page=20".to_string())
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_project_returns_raw_record() {
    let client = Arc::new(MockGitLab::returning(project_json(7, "group/sub/app")));
    let tools = ProjectTools::new(Arc::clone(&client));

    let result = tools
        .get_project(Parameters(GetProjectParams {
            project: "group/sub/app".to_string(),
        }))
        .await
        .unwrap();

    assert_eq!(
        client.only_call(),
        RecordedCall::Get("/projects/group%2Fsub%2Fapp".to_string())
    );

    let project: Value = serde_json::from_str(text_of(&result)).unwrap();
    assert_eq!(project, project_json(7, "group/sub/app"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_project_not_found() {
    let client = Arc::new(MockGitLab::failing(404, r#"{"message":"404 Project Not Found"}"#));
    let tools = ProjectTools::new(Arc::clone(&client));

    let err = tools
        .get_project(Parameters(GetProjectParams {
            project: "999".to_string(),
        }))
        .await
        .unwrap_err();

    let data = err.data.unwrap();
    assert_eq!(data["status"], 404);
    assert_eq!(data["endpoint"], "/projects/999");
    assert_eq!(data["body"], r#"{"message":"404 Project Not Found"}"#);
    assert!(err.message.contains("GitLab API error (404)"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_get_project_unreachable_host_reports_cause() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = GitLabClient::new(ClientConfig {
        api_base: format!("http://{addr}/api/v4"),
        token: "test-token".to_string(),
    })
    .unwrap();
    let tools = ProjectTools::new(Arc::new(client));

    let err = tools
        .get_project(Parameters(GetProjectParams {
            project: "1".to_string(),
        }))
        .await
        .unwrap_err();

    let prefix = "Failed to reach GitLab at /projects/1: ";
    assert!(err.message.starts_with(prefix), "{}", err.message);
    assert!(err.message.len() > prefix.len(), "{}", err.message);

    let data = err.data.unwrap();
    assert_eq!(data["endpoint"], "/projects/1");
    assert!(data["cause"].as_str().is_some_and(|c| !c.is_empty()));
    assert!(data.get("status").is_none());
}
