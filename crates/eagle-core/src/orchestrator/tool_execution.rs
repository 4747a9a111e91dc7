//! Orchestrator tool execution
//!
//! Runs every tool call of one round concurrently and turns each outcome,
//! good or bad, into a tool response correlated to its call id. Failures
//! are reported to the model instead of aborting the search, so it can
//! correct itself on the next round.

use eagle_llm::{Message, ToolCall};
use eagle_tools::ExecutionResult;
use serde_json::Value;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::core::Orchestrator;
use super::types::ToolCallRecord;

struct CallOutcome {
    output: Value,
    success: bool,
    duration_ms: u64,
}

impl CallOutcome {
    fn failed(reason: impl Into<String>, duration_ms: u64) -> Self {
        Self {
            output: serde_json::json!({ "error": reason.into() }),
            success: false,
            duration_ms,
        }
    }

    fn from_runner(result: eagle_tools::Result<ExecutionResult>) -> Self {
        match result {
            Ok(exec) if exec.result.success => Self {
                output: exec.result.output,
                success: true,
                duration_ms: exec.result.duration_ms,
            },
            Ok(exec) => Self::failed(
                exec.result
                    .error
                    .unwrap_or_else(|| format!("{} failed", exec.tool_name)),
                exec.result.duration_ms,
            ),
            Err(e) => {
                let duration_ms = match &e {
                    eagle_tools::Error::Timeout(ms) => *ms,
                    _ => 0,
                };
                Self::failed(e.to_string(), duration_ms)
            }
        }
    }
}

/// Decode a raw argument payload. Some models send the JSON object as an
/// encoded string; that is unwrapped once.
fn parse_arguments(arguments: &str) -> std::result::Result<Value, String> {
    if arguments.trim().is_empty() {
        return Ok(serde_json::json!({}));
    }

    match serde_json::from_str::<Value>(arguments) {
        Ok(Value::String(inner)) => serde_json::from_str(&inner)
            .map_err(|e| format!("arguments are not valid JSON: {}", e)),
        Ok(value) => Ok(value),
        Err(e) => Err(format!("arguments are not valid JSON: {}", e)),
    }
}

impl Orchestrator {
    /// Execute one round of tool calls, returning one tool message per call
    /// in the order the calls were requested.
    pub(crate) async fn execute_tool_calls(
        &self,
        session_id: Uuid,
        calls: &[ToolCall],
        records: &mut Vec<ToolCallRecord>,
    ) -> Vec<Message> {
        let mut inputs = Vec::with_capacity(calls.len());
        let mut outcomes: Vec<Option<CallOutcome>> = Vec::with_capacity(calls.len());
        let mut dispatch = Vec::new();
        let mut dispatched = Vec::new();

        for (index, call) in calls.iter().enumerate() {
            info!(
                session_id = %session_id,
                tool = %call.name,
                call_id = %call.id,
                args = %call.arguments,
                "Executing tool"
            );

            match parse_arguments(&call.arguments) {
                Ok(input) => {
                    dispatch.push((call.name.clone(), input.clone()));
                    dispatched.push(index);
                    inputs.push(input);
                    outcomes.push(None);
                }
                Err(reason) => {
                    warn!(tool = %call.name, error = %reason, "Rejected tool arguments");
                    inputs.push(Value::Null);
                    outcomes.push(Some(CallOutcome::failed(reason, 0)));
                }
            }
        }

        let results = self.runner.execute_parallel(dispatch).await;
        for (index, result) in dispatched.into_iter().zip(results) {
            outcomes[index] = Some(CallOutcome::from_runner(result));
        }

        let mut messages = Vec::with_capacity(calls.len());
        for ((call, input), outcome) in calls.iter().zip(inputs).zip(outcomes) {
            let outcome =
                outcome.unwrap_or_else(|| CallOutcome::failed("tool call was not dispatched", 0));

            if outcome.success {
                debug!(tool = %call.name, duration_ms = outcome.duration_ms, "Tool succeeded");
            } else {
                warn!(tool = %call.name, output = %outcome.output, "Tool failed; reporting to model");
            }

            messages.push(Message::tool_response_named(
                &call.id,
                &call.name,
                outcome.output.to_string(),
            ));
            records.push(ToolCallRecord {
                call_id: call.id.clone(),
                tool_name: call.name.clone(),
                input,
                output: outcome.output,
                success: outcome.success,
                duration_ms: outcome.duration_ms,
            });
        }

        messages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::OrchestratorConfig;
    use chrono::NaiveDate;
    use eagle_directory::seed;
    use eagle_llm::{MessageRole, MockProvider};
    use eagle_tools::{register_builtins, ToolRegistry};
    use std::sync::Arc;

    fn orchestrator() -> Orchestrator {
        let directory = Arc::new(seed::demo_directory(
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        ));
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry, directory);
        Orchestrator::new(
            Arc::new(MockProvider::new()),
            Arc::new(registry),
            OrchestratorConfig::default(),
        )
    }

    async fn run(calls: Vec<ToolCall>) -> (Vec<Message>, Vec<ToolCallRecord>) {
        let mut records = Vec::new();
        let messages = orchestrator()
            .execute_tool_calls(Uuid::new_v4(), &calls, &mut records)
            .await;
        (messages, records)
    }

    #[test]
    fn test_parse_arguments() {
        assert_eq!(parse_arguments("").unwrap(), serde_json::json!({}));
        assert_eq!(
            parse_arguments(r#"{"name":"john"}"#).unwrap()["name"],
            "john"
        );
        assert_eq!(
            parse_arguments(r#""{\"userId\": 3}""#).unwrap()["userId"],
            3
        );
        assert!(parse_arguments("{name: john").is_err());
    }

    #[tokio::test]
    async fn test_results_correlated_in_call_order() {
        let (messages, records) = run(vec![
            ToolCall::new("call_0", "getProjectMembersByProjectName", r#"{"projectName":"Mars"}"#),
            ToolCall::new("call_1", "getUserByUserId", r#"{"userId":7}"#),
        ])
        .await;

        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, MessageRole::Tool);
        assert_eq!(messages[0].tool_call_id.as_deref(), Some("call_0"));
        assert_eq!(
            messages[0].name.as_deref(),
            Some("getProjectMembersByProjectName")
        );
        let members: Value = serde_json::from_str(&messages[0].content).unwrap();
        assert_eq!(members[0]["userId"], 3);
        assert_eq!(members.as_array().unwrap().len(), 3);

        assert_eq!(messages[1].tool_call_id.as_deref(), Some("call_1"));
        assert!(messages[1].content.contains("David Lee"));

        assert!(records.iter().all(|r| r.success));
        assert_eq!(records[1].input["userId"], 7);
    }

    #[tokio::test]
    async fn test_unknown_tool_fed_back() {
        let (messages, records) = run(vec![
            ToolCall::new("call_0", "getWeather", "{}"),
            ToolCall::new("call_1", "getUsersByName", r#"{"name":"lisa"}"#),
        ])
        .await;

        let error: Value = serde_json::from_str(&messages[0].content).unwrap();
        assert_eq!(error["error"], "unknown tool: getWeather");
        assert!(!records[0].success);

        assert!(records[1].success);
        assert!(messages[1].content.contains("Lisa Chen"));
    }

    #[tokio::test]
    async fn test_malformed_arguments_fed_back() {
        let (messages, records) = run(vec![ToolCall::new(
            "call_0",
            "getUsersByName",
            "{name: lisa",
        )])
        .await;

        assert!(messages[0].content.contains("not valid JSON"));
        assert!(records[0].input.is_null());
        assert!(!records[0].success);
    }

    #[tokio::test]
    async fn test_wrong_argument_shape_fed_back() {
        let (messages, records) = run(vec![ToolCall::new(
            "call_0",
            "getTeamMembersByTeamName",
            r#"{"team":"Alpha"}"#,
        )])
        .await;

        let error: Value = serde_json::from_str(&messages[0].content).unwrap();
        assert!(error["error"].as_str().unwrap().contains("teamName"));
        assert!(!records[0].success);
    }

    #[tokio::test]
    async fn test_absent_user_is_null() {
        let (messages, records) = run(vec![ToolCall::new(
            "call_0",
            "getUserByUserId",
            r#"{"userId":999}"#,
        )])
        .await;

        assert_eq!(messages[0].content, "null");
        assert!(records[0].success);
    }
}
