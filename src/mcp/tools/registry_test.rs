//! Tests for the tool registry

use super::test_support::MockGitLab;
use super::{TOOL_NAMES, ToolRegistry};
use serde_json::{Value, json};
use std::sync::Arc;

fn registry() -> ToolRegistry<MockGitLab> {
    ToolRegistry::new(Arc::new(MockGitLab::returning(json!([]))))
}

fn required_fields(schema: &serde_json::Map<String, Value>) -> Vec<String> {
    let mut required: Vec<String> = schema
        .get("required")
        .and_then(Value::as_array)
        .map(|fields| {
            fields
                .iter()
                .filter_map(|f| f.as_str().map(str::to_string))
                .collect()
        })
        .unwrap_or_default();
    required.sort();
    required
}

#[test]
fn test_definitions_follow_registration_order() {
    let names: Vec<String> = registry()
        .definitions()
        .into_iter()
        .map(|tool| tool.name.to_string())
        .collect();

    assert_eq!(names, TOOL_NAMES.to_vec());
}

#[test]
fn test_every_tool_has_a_description() {
    for tool in registry().definitions() {
        let description = tool.description.unwrap_or_default();
        assert!(!description.is_empty(), "{} has no description", tool.name);
    }
}

#[test]
fn test_contains_known_tools_only() {
    let registry = registry();

    for name in TOOL_NAMES {
        assert!(registry.contains(name), "{name} should be registered");
    }
    assert!(!registry.contains("delete_project"));
}

#[test]
fn test_input_schemas_mark_required_fields() {
    let tools = registry().definitions();
    let schema_of = |name: &str| {
        tools
            .iter()
            .find(|tool| tool.name == name)
            .map(|tool| tool.input_schema.clone())
            .unwrap()
    };

    assert_eq!(
        required_fields(&schema_of("create_merge_request")),
        vec!["project", "source_branch", "title"]
    );
    assert_eq!(
        required_fields(&schema_of("create_or_update_file")),
        vec!["branch", "commit_message", "content", "file_path", "project"]
    );
    assert!(required_fields(&schema_of("list_projects")).is_empty());

    let get_file = schema_of("get_file");
    assert!(get_file["properties"].get("ref").is_some());
    assert_eq!(required_fields(&get_file), vec!["file_path", "project"]);
}
