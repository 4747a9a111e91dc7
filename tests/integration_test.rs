//! Integration tests for Eagle
//!
//! These tests drive the whole pipeline with a scripted model:
//! - eagle-directory: seeded demo organization
//! - eagle-tools: directory tools behind the registry and runner
//! - eagle-llm: `MockProvider` standing in for the model
//! - eagle-core: contextualize, orchestrate, decode, scope filter

use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use eagle_core::{Error, OrchestratorConfig, SearchRequest, SearchService};
use eagle_directory::{seed, User};
use eagle_llm::{MessageRole, MockProvider, ToolCall, ToolCompletionResponse};
use tokio_util::sync::CancellationToken;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

fn service_with(mock: &MockProvider, config: OrchestratorConfig) -> SearchService {
    SearchService::with_directory(
        Arc::new(mock.clone()),
        Arc::new(seed::demo_directory(today())),
        config,
    )
    .unwrap()
    .with_today(today())
}

fn service(mock: &MockProvider) -> SearchService {
    service_with(mock, OrchestratorConfig::default())
}

fn call(id: &str, name: &str, args: &str) -> ToolCall {
    ToolCall::new(id, name, args)
}

/// Echo the users a tool returned back as the model's final answer
fn answer_with(users: &[User]) -> ToolCompletionResponse {
    ToolCompletionResponse::text(serde_json::json!({ "items": users }).to_string())
}

fn ids(users: &[User]) -> Vec<i64> {
    users.iter().map(|u| u.user_id).collect()
}

// ============================================================================
// End-to-end scenarios
// ============================================================================

#[tokio::test]
async fn test_mars_project_with_limit() {
    let directory = seed::demo_directory(today());
    let mars = directory.project_members_by_name("Mars");

    let mock = MockProvider::new();
    mock.add_tool_response(ToolCompletionResponse::tool_calls(vec![call(
        "call_0",
        "getProjectMembersByProjectName",
        r#"{"projectName":"Mars"}"#,
    )]));
    mock.add_tool_response(answer_with(&mars));

    let users = service(&mock)
        .search(&SearchRequest::new("who is on the Mars project").with_limit(2))
        .await
        .unwrap();

    assert_eq!(ids(&users), vec![3, 1]);

    // The tool result went back to the model correlated to its call
    let second = &mock.requests()[1];
    let tool_message = second.request.messages.last().unwrap();
    assert_eq!(tool_message.role, MessageRole::Tool);
    assert_eq!(tool_message.tool_call_id.as_deref(), Some("call_0"));
    let members: Vec<User> = serde_json::from_str(&tool_message.content).unwrap();
    assert_eq!(ids(&members), vec![3, 1, 2]);
}

#[tokio::test]
async fn test_result_length_is_min_of_limit_and_matches() {
    let directory = seed::demo_directory(today());
    let alpha = directory.team_members_by_name("alpha");
    assert_eq!(alpha.len(), 4);

    for (limit, expected) in [(0, 0), (2, 2), (4, 4), (10, 4)] {
        let mock = MockProvider::new();
        mock.add_tool_response(answer_with(&alpha));

        let users = service(&mock)
            .search(&SearchRequest::new("team alpha").with_limit(limit))
            .await
            .unwrap();
        assert_eq!(users.len(), expected, "limit {}", limit);
    }
}

#[tokio::test]
async fn test_parallel_tool_calls_in_one_round() {
    let mock = MockProvider::new();
    mock.add_tool_response(ToolCompletionResponse::tool_calls(vec![
        call("call_a", "getUsersByName", r#"{"name":"john"}"#),
        call("call_b", "getMentionsByUser", r#"{"userId":1}"#),
        call("call_c", "getTeamMembersByTeamName", r#"{"teamName":"beta"}"#),
    ]));
    mock.add_tool_response(ToolCompletionResponse::text(r#"{"items": []}"#));

    let users = service(&mock)
        .search(&SearchRequest::new("who did John mention").with_user_id(1))
        .await
        .unwrap();
    assert!(users.is_empty());

    let messages = &mock.requests()[1].request.messages;
    let tool_ids: Vec<&str> = messages
        .iter()
        .filter(|m| m.role == MessageRole::Tool)
        .filter_map(|m| m.tool_call_id.as_deref())
        .collect();
    assert_eq!(tool_ids, vec!["call_a", "call_b", "call_c"]);
}

#[tokio::test]
async fn test_unknown_tool_lets_model_recover() {
    let directory = seed::demo_directory(today());

    let mock = MockProvider::new();
    mock.add_tool_response(ToolCompletionResponse::tool_calls(vec![call(
        "call_0",
        "getUserByEmail",
        r#"{"email":"john@techhub.com"}"#,
    )]));
    mock.add_tool_response(ToolCompletionResponse::tool_calls(vec![call(
        "call_1",
        "getUsersByName",
        r#"{"name":"john@techhub.com"}"#,
    )]));
    mock.add_tool_response(answer_with(&directory.users_by_name("john@techhub.com")));

    let users = service(&mock)
        .search(&SearchRequest::new("john@techhub.com"))
        .await
        .unwrap();
    assert_eq!(ids(&users), vec![1]);

    let feedback = mock.requests()[1].request.messages.last().unwrap().clone();
    assert!(feedback.content.contains("unknown tool: getUserByEmail"));
}

#[tokio::test]
async fn test_scope_filter_drops_other_orgs() {
    let directory = seed::demo_directory(today());
    // "brown" matches Robert Brown (org 10) and Olivia Brown (org 20)
    let browns = directory.users_by_name("brown");
    assert_eq!(ids(&browns), vec![3, 12]);

    let mock = MockProvider::new();
    mock.add_tool_response(answer_with(&browns));

    let users = service(&mock)
        .search(&SearchRequest::new("brown").with_org_id(20))
        .await
        .unwrap();
    assert_eq!(ids(&users), vec![12]);

    let prompt = &mock.requests()[0].request.messages[1].content;
    assert!(prompt.starts_with("brown within organization ID 20"));
}

#[tokio::test]
async fn test_org_zero_means_any_organization() {
    let directory = seed::demo_directory(today());
    let browns = directory.users_by_name("brown");

    let mock = MockProvider::new();
    mock.add_tool_response(answer_with(&browns));

    let users = service(&mock)
        .search(&SearchRequest::new("brown").with_org_id(0))
        .await
        .unwrap();
    assert_eq!(ids(&users), vec![3, 12]);
}

// ============================================================================
// Terminal failures
// ============================================================================

#[tokio::test]
async fn test_round_limit_exceeded() {
    let mock = MockProvider::new();
    mock.set_fallback(ToolCompletionResponse::tool_calls(vec![call(
        "call_n",
        "getUsersByName",
        r#"{"name":"a"}"#,
    )]));

    let result = service_with(&mock, OrchestratorConfig::new().with_max_rounds(4))
        .search(&SearchRequest::new("everyone"))
        .await;

    assert!(matches!(result, Err(Error::RoundLimitExceeded { rounds: 4 })));
    assert_eq!(mock.call_count(), 4);
}

#[tokio::test]
async fn test_transport_failure() {
    let mock = MockProvider::new();
    mock.add_error(eagle_llm::Error::Api("model not found".to_string()));

    let result = service(&mock).search(&SearchRequest::new("john")).await;

    let err = result.unwrap_err();
    assert!(err.is_transport());
    assert!(err.to_string().contains("model not found"));
}

#[tokio::test]
async fn test_undecodable_answer() {
    let mock = MockProvider::new();
    mock.add_tool_response(ToolCompletionResponse::text(
        r#"{"items": [], "explanation": "nobody matched"}"#,
    ));

    let result = service(&mock).search(&SearchRequest::new("zed")).await;

    match result {
        Err(Error::OutputDecoding { raw, .. }) => assert!(raw.contains("nobody matched")),
        other => panic!("expected OutputDecoding, got {:?}", other),
    }
}

#[tokio::test]
async fn test_cancellation_stops_rounds() {
    let mock = MockProvider::new().with_delay(Duration::from_millis(50));
    mock.set_fallback(ToolCompletionResponse::tool_calls(vec![call(
        "call_n",
        "getUsersByName",
        r#"{"name":"a"}"#,
    )]));
    let service = service(&mock);

    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(120)).await;
        trigger.cancel();
    });

    let result = service
        .search_with_cancel(&SearchRequest::new("everyone"), &cancel)
        .await;

    assert!(matches!(result, Err(Error::Cancelled)));
    assert!(mock.call_count() < 8);
}
