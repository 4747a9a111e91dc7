//! Orchestrator main execution loop
//!
//! Contains the `run` method: submit the conversation, run any requested
//! tools, append their responses and resubmit, until the model answers
//! with text.

use crate::error::{Error, Result};
use eagle_llm::{CompletionRequest, Message, ModelTurn, ToolCompletionRequest, ToolDefinition};
use std::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use uuid::Uuid;

use super::core::Orchestrator;
use super::types::{LoopOutcome, LoopState, ToolCallRecord};

/// State of one run; never shared between searches
struct SessionState {
    id: Uuid,
    state: LoopState,
    messages: Vec<Message>,
    records: Vec<ToolCallRecord>,
    rounds: usize,
}

impl SessionState {
    fn new(messages: Vec<Message>) -> Self {
        Self {
            id: Uuid::new_v4(),
            state: LoopState::AwaitingModel,
            messages,
            records: Vec::new(),
            rounds: 0,
        }
    }

    fn transition(&mut self, next: LoopState) {
        debug!(
            session_id = %self.id,
            round = self.rounds,
            from = %self.state,
            to = %next,
            "Loop state change"
        );
        self.state = next;
    }
}

impl Orchestrator {
    /// Run the loop over an initial conversation (system prompt and user
    /// turn) until the model produces final text.
    ///
    /// Fails with `Transport` when a model call errors or times out,
    /// `RoundLimitExceeded` when the round limit is reached and `Cancelled` when
    /// `cancel` fires. Tool failures never end the loop.
    #[tracing::instrument(skip_all, fields(messages = messages.len()))]
    pub async fn run(
        &self,
        messages: Vec<Message>,
        cancel: &CancellationToken,
    ) -> Result<LoopOutcome> {
        let start = Instant::now();
        let tools = self.runner.registry().to_llm_tools();
        let model = self.model().to_string();
        let mut session = SessionState::new(messages);

        if !self.provider.supports_tools() {
            return Err(Error::Configuration(format!(
                "provider {} does not support tool calling",
                self.provider.name()
            )));
        }

        info!(
            session_id = %session.id,
            model = %model,
            tools = tools.len(),
            "Starting orchestration"
        );

        while session.rounds < self.config.max_rounds {
            if cancel.is_cancelled() {
                info!(session_id = %session.id, round = session.rounds, "Search cancelled");
                return Err(Error::Cancelled);
            }

            session.rounds += 1;
            let request = self.build_request(&model, &session.messages, &tools);
            let timeout = self.config.model_timeout;

            let response = tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    info!(session_id = %session.id, round = session.rounds, "Search cancelled while awaiting model");
                    return Err(Error::Cancelled);
                }
                result = tokio::time::timeout(timeout, self.provider.complete_with_tools(request)) => {
                    match result {
                        Ok(response) => response?,
                        Err(_) => {
                            warn!(
                                session_id = %session.id,
                                round = session.rounds,
                                timeout_ms = %timeout.as_millis(),
                                "Model call timed out"
                            );
                            return Err(Error::Transport(eagle_llm::Error::Timeout(
                                timeout.as_millis() as u64,
                            )));
                        }
                    }
                }
            };

            let model_used = Some(response.model.clone()).filter(|m| !m.is_empty());
            if let Some(usage) = &response.usage {
                debug!(
                    session_id = %session.id,
                    round = session.rounds,
                    prompt_tokens = usage.prompt_tokens,
                    completion_tokens = usage.completion_tokens,
                    finish_reason = response.finish_reason.as_deref().unwrap_or("unknown"),
                    "Model responded"
                );
            }

            match response.into_turn() {
                ModelTurn::FinalText(text) => {
                    session.transition(LoopState::FinalResponseReceived);
                    let duration_ms = start.elapsed().as_millis() as u64;
                    info!(
                        session_id = %session.id,
                        rounds = session.rounds,
                        tool_calls = session.records.len(),
                        duration_ms = duration_ms,
                        "Model produced final answer"
                    );

                    return Ok(LoopOutcome {
                        session_id: session.id,
                        final_text: text,
                        rounds: session.rounds,
                        tool_calls: session.records,
                        duration_ms,
                        model: model_used,
                    });
                }
                ModelTurn::ToolCallsRequested { calls, narration } => {
                    session.transition(LoopState::ToolCallPending);
                    debug!(
                        session_id = %session.id,
                        calls = calls.len(),
                        "Model requested tools"
                    );

                    session.messages.push(Message::assistant_with_tool_calls(
                        narration.unwrap_or_default(),
                        calls.clone(),
                    ));

                    let session_id = session.id;
                    let responses = tokio::select! {
                        biased;
                        _ = cancel.cancelled() => {
                            info!(session_id = %session_id, "Search cancelled during tool calls");
                            return Err(Error::Cancelled);
                        }
                        responses = self.execute_tool_calls(session_id, &calls, &mut session.records) => responses,
                    };

                    session.messages.extend(responses);
                    session.transition(LoopState::AwaitingModel);
                }
            }
        }

        warn!(
            session_id = %session.id,
            rounds = session.rounds,
            tool_calls = session.records.len(),
            "Round limit reached without a final answer"
        );
        Err(Error::RoundLimitExceeded {
            rounds: session.rounds,
        })
    }

    fn build_request(
        &self,
        model: &str,
        messages: &[Message],
        tools: &[ToolDefinition],
    ) -> ToolCompletionRequest {
        let mut request = CompletionRequest::new(model).with_messages(messages.to_vec());
        if let Some(temperature) = self.config.temperature {
            request = request.with_temperature(temperature);
        }
        ToolCompletionRequest::new(request, tools.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::orchestrator::OrchestratorConfig;
    use chrono::NaiveDate;
    use eagle_directory::seed;
    use eagle_llm::{MessageRole, MockProvider, ToolCall, ToolCompletionResponse};
    use eagle_tools::{register_builtins, ToolRegistry};
    use std::sync::Arc;
    use std::time::Duration;

    fn orchestrator(mock: &MockProvider, config: OrchestratorConfig) -> Orchestrator {
        let directory = Arc::new(seed::demo_directory(
            NaiveDate::from_ymd_opt(2024, 6, 15).unwrap(),
        ));
        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry, directory);
        Orchestrator::new(Arc::new(mock.clone()), Arc::new(registry), config)
    }

    fn conversation() -> Vec<Message> {
        vec![
            Message::system("You are Eagle"),
            Message::user("who is on the Mars project"),
        ]
    }

    fn project_call() -> ToolCompletionResponse {
        ToolCompletionResponse::tool_calls(vec![ToolCall::new(
            "call_0",
            "getProjectMembersByProjectName",
            r#"{"projectName":"Mars"}"#,
        )])
    }

    #[tokio::test]
    async fn test_final_text_first_round() {
        let mock = MockProvider::new();
        mock.add_tool_response(ToolCompletionResponse::text(r#"{"items": []}"#));
        let orchestrator = orchestrator(&mock, OrchestratorConfig::default());

        let outcome = orchestrator
            .run(conversation(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome.final_text, r#"{"items": []}"#);
        assert_eq!(outcome.rounds, 1);
        assert!(outcome.tool_calls.is_empty());
        assert_eq!(outcome.model.as_deref(), Some("mock-model"));

        let requests = mock.requests();
        assert_eq!(requests[0].tools.len(), 5);
        assert_eq!(requests[0].request.messages.len(), 2);
        assert_eq!(requests[0].request.model, "mock-model");
    }

    #[tokio::test]
    async fn test_tool_round_then_final() {
        let mock = MockProvider::new();
        mock.add_tool_response(project_call());
        mock.add_tool_response(ToolCompletionResponse::text("[]"));
        let orchestrator = orchestrator(
            &mock,
            OrchestratorConfig::new()
                .with_model("llama3.1")
                .with_temperature(0.0),
        );

        let outcome = orchestrator
            .run(conversation(), &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(outcome.rounds, 2);
        assert_eq!(outcome.tool_calls.len(), 1);
        assert_eq!(
            outcome.tool_calls[0].tool_name,
            "getProjectMembersByProjectName"
        );
        assert!(outcome.tool_calls[0].success);

        let second = &mock.requests()[1];
        assert_eq!(second.request.model, "llama3.1");
        assert_eq!(second.request.temperature, Some(0.0));

        let messages = &second.request.messages;
        assert_eq!(messages.len(), 4);
        assert_eq!(messages[2].role, MessageRole::Assistant);
        assert_eq!(messages[2].tool_calls[0].id, "call_0");
        assert_eq!(messages[3].role, MessageRole::Tool);
        assert_eq!(messages[3].tool_call_id.as_deref(), Some("call_0"));
        assert!(messages[3].content.contains("Robert Brown"));
    }

    #[tokio::test]
    async fn test_round_limit() {
        let mock = MockProvider::new();
        mock.set_fallback(project_call());
        let orchestrator = orchestrator(&mock, OrchestratorConfig::new().with_max_rounds(3));

        let result = orchestrator
            .run(conversation(), &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(Error::RoundLimitExceeded { rounds: 3 })));
        assert_eq!(mock.call_count(), 3);
    }

    #[tokio::test]
    async fn test_transport_error_is_terminal() {
        let mock = MockProvider::new();
        mock.add_tool_response(project_call());
        mock.add_error(eagle_llm::Error::Network("connection refused".to_string()));
        let orchestrator = orchestrator(&mock, OrchestratorConfig::default());

        let result = orchestrator
            .run(conversation(), &CancellationToken::new())
            .await;

        assert!(matches!(
            result,
            Err(Error::Transport(eagle_llm::Error::Network(_)))
        ));
        assert_eq!(mock.call_count(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_model_timeout() {
        let mock = MockProvider::new().with_delay(Duration::from_secs(5));
        let orchestrator = orchestrator(
            &mock,
            OrchestratorConfig::new().with_model_timeout(Duration::from_millis(50)),
        );

        let result = orchestrator
            .run(conversation(), &CancellationToken::new())
            .await;

        assert!(matches!(
            result,
            Err(Error::Transport(eagle_llm::Error::Timeout(50)))
        ));
    }

    #[tokio::test]
    async fn test_cancelled_before_start() {
        let mock = MockProvider::new();
        let orchestrator = orchestrator(&mock, OrchestratorConfig::default());
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = orchestrator.run(conversation(), &cancel).await;

        assert!(matches!(result, Err(Error::Cancelled)));
        assert_eq!(mock.call_count(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancelled_while_awaiting_model() {
        let mock = MockProvider::new().with_delay(Duration::from_secs(5));
        let orchestrator = orchestrator(&mock, OrchestratorConfig::default());
        let cancel = CancellationToken::new();

        let trigger = cancel.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            trigger.cancel();
        });

        let result = orchestrator.run(conversation(), &cancel).await;

        assert!(matches!(result, Err(Error::Cancelled)));
        assert_eq!(mock.call_count(), 1);
    }
}
