//! Mock LLM Provider for testing
//!
//! Responses are scripted up front and handed out in order. Every request the
//! provider receives is recorded so tests can inspect the conversation the
//! orchestrator built.

use super::provider::LlmProvider;
use crate::completion::{ToolCompletionRequest, ToolCompletionResponse};
use crate::error::{Error, Result};

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A mock LLM provider that returns queued responses.
///
/// When the queue runs dry the fallback response is returned, or a
/// `"mock response"` final text if no fallback was set.
#[derive(Clone)]
pub struct MockProvider {
    responses: Arc<Mutex<VecDeque<Result<ToolCompletionResponse>>>>,
    fallback: Arc<Mutex<Option<ToolCompletionResponse>>>,
    requests: Arc<Mutex<Vec<ToolCompletionRequest>>>,
    delay: Option<Duration>,
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockProvider {
    /// Create a new mock provider.
    #[must_use]
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(VecDeque::new())),
            fallback: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
            delay: None,
        }
    }

    /// Sleep this long before answering each request.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a response to the queue.
    pub fn add_tool_response(&self, response: ToolCompletionResponse) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Ok(response));
    }

    /// Queue a transport failure.
    pub fn add_error(&self, error: Error) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(Err(error));
    }

    /// Response returned once the queue is empty.
    pub fn set_fallback(&self, response: ToolCompletionResponse) {
        *self.fallback.lock().unwrap_or_else(|e| e.into_inner()) = Some(response);
    }

    /// Requests received so far, oldest first.
    #[must_use]
    pub fn requests(&self) -> Vec<ToolCompletionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }

    /// Number of requests received so far.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

#[async_trait::async_trait]
impl LlmProvider for MockProvider {
    fn name(&self) -> &str {
        "mock"
    }

    fn supports_tools(&self) -> bool {
        true
    }

    fn default_model(&self) -> &str {
        "mock-model"
    }

    async fn complete_with_tools(
        &self,
        request: ToolCompletionRequest,
    ) -> Result<ToolCompletionResponse> {
        self.requests
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(request);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let next = self
            .responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front();
        match next {
            Some(result) => result.map(|r| r.with_model("mock-model")),
            None => {
                let fallback = self
                    .fallback
                    .lock()
                    .unwrap_or_else(|e| e.into_inner())
                    .clone();
                Ok(fallback
                    .unwrap_or_else(|| ToolCompletionResponse::text("mock response"))
                    .with_model("mock-model"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::completion::CompletionRequest;
    use crate::message::Message;
    use crate::tools::ToolCall;

    fn request(text: &str) -> ToolCompletionRequest {
        ToolCompletionRequest::new(
            CompletionRequest::new("").with_messages(vec![Message::user(text)]),
            vec![],
        )
    }

    #[tokio::test]
    async fn test_queued_responses_in_order() {
        let mock = MockProvider::new();
        mock.add_tool_response(ToolCompletionResponse::tool_calls(vec![ToolCall::new(
            "call_0", "getUsersByName", "{}",
        )]));
        mock.add_tool_response(ToolCompletionResponse::text("done"));

        let first = mock.complete_with_tools(request("a")).await.unwrap();
        assert!(first.has_tool_calls());
        let second = mock.complete_with_tools(request("b")).await.unwrap();
        assert_eq!(second.content.as_deref(), Some("done"));
        assert_eq!(second.model, "mock-model");

        let seen = mock.requests();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].request.messages[0].content, "b");
    }

    #[tokio::test]
    async fn test_queued_error() {
        let mock = MockProvider::new();
        mock.add_error(Error::Network("connection refused".to_string()));
        let result = mock.complete_with_tools(request("a")).await;
        assert!(matches!(result, Err(Error::Network(_))));
    }

    #[tokio::test]
    async fn test_fallback_when_empty() {
        let mock = MockProvider::new();
        let default = mock.complete_with_tools(request("a")).await.unwrap();
        assert_eq!(default.content.as_deref(), Some("mock response"));

        mock.set_fallback(ToolCompletionResponse::text("again"));
        let fallback = mock.complete_with_tools(request("b")).await.unwrap();
        assert_eq!(fallback.content.as_deref(), Some("again"));
        assert_eq!(mock.call_count(), 2);
    }
}
