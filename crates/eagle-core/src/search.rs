//! Search service
//!
//! The single entry point of the pipeline:
//! query + scope → contextualize → orchestrate → decode → scope filter → limit.

use crate::contextualize::contextualize;
use crate::decoder;
use crate::error::Result;
use crate::orchestrator::{Orchestrator, OrchestratorConfig};
use crate::prompt;
use crate::scope;
use chrono::NaiveDate;
use eagle_directory::{Directory, User};
use eagle_llm::{LlmProvider, Message};
use eagle_tools::{register_builtins, ToolRegistry};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Result count used when the caller does not ask for one
pub const DEFAULT_LIMIT: usize = 5;

fn default_limit() -> usize {
    DEFAULT_LIMIT
}

/// A people search.
///
/// The scope hints are woven into the prompt; `org_id` is also enforced on
/// the decoded answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    /// Natural-language query
    pub query: String,
    /// Maximum number of users returned
    #[serde(default = "default_limit")]
    pub limit: usize,
    /// Organization scope
    #[serde(default)]
    pub org_id: Option<i64>,
    /// Team hint
    #[serde(default)]
    pub team_id: Option<i64>,
    /// User the query is relative to
    #[serde(default)]
    pub user_id: Option<i64>,
}

impl SearchRequest {
    /// Create a request with the default limit and no scope
    #[must_use]
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: DEFAULT_LIMIT,
            org_id: None,
            team_id: None,
            user_id: None,
        }
    }

    /// Set the limit
    #[must_use]
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Set the organization scope
    #[must_use]
    pub fn with_org_id(mut self, org_id: i64) -> Self {
        self.org_id = Some(org_id);
        self
    }

    /// Set the team hint
    #[must_use]
    pub fn with_team_id(mut self, team_id: i64) -> Self {
        self.team_id = Some(team_id);
        self
    }

    /// Set the user hint
    #[must_use]
    pub fn with_user_id(mut self, user_id: i64) -> Self {
        self.user_id = Some(user_id);
        self
    }

    /// The query with its scope hints folded in
    #[must_use]
    pub fn contextualized_query(&self) -> String {
        contextualize(&self.query, self.org_id, self.team_id, self.user_id)
    }
}

/// Resolves people searches against a directory through the model
pub struct SearchService {
    orchestrator: Orchestrator,
    today: Option<NaiveDate>,
}

impl SearchService {
    /// Create a service around an existing orchestrator
    #[must_use]
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator,
            today: None,
        }
    }

    /// Wire a provider to the directory tools.
    ///
    /// Fails if `config` is not runnable.
    pub fn with_directory(
        provider: Arc<dyn LlmProvider>,
        directory: Arc<Directory>,
        config: OrchestratorConfig,
    ) -> Result<Self> {
        config.validate()?;

        let mut registry = ToolRegistry::new();
        register_builtins(&mut registry, directory);

        Ok(Self::new(Orchestrator::new(
            provider,
            Arc::new(registry),
            config,
        )))
    }

    /// Pin the date given to the model instead of the local date
    #[must_use]
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.today = Some(today);
        self
    }

    /// Get the orchestrator
    #[must_use]
    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    /// Run a search to completion
    pub async fn search(&self, request: &SearchRequest) -> Result<Vec<User>> {
        self.search_with_cancel(request, &CancellationToken::new())
            .await
    }

    /// Run a search that stops submitting rounds once `cancel` fires
    #[tracing::instrument(skip(self, cancel), fields(query = %request.query, limit = request.limit))]
    pub async fn search_with_cancel(
        &self,
        request: &SearchRequest,
        cancel: &CancellationToken,
    ) -> Result<Vec<User>> {
        let contextualized = request.contextualized_query();
        info!(query = %contextualized, "Contextualized query");

        let today = self
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive());
        let messages = vec![
            Message::system(prompt::system_prompt(today)),
            Message::user(prompt::user_prompt(&contextualized)),
        ];

        let outcome = self.orchestrator.run(messages, cancel).await?;
        for record in &outcome.tool_calls {
            debug!(
                tool = %record.tool_name,
                input = %record.input,
                success = record.success,
                duration_ms = record.duration_ms,
                "Tool call"
            );
        }

        let decoded = decoder::decode(&outcome.final_text)?;
        info!(
            decoded = decoded.len(),
            rounds = outcome.rounds,
            "Structured response"
        );

        let results = scope::apply(decoded, request.org_id, request.limit);
        info!(returned = results.len(), "Search completed");
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use eagle_directory::seed;
    use eagle_llm::{MockProvider, ToolCall, ToolCompletionResponse};

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn service(mock: &MockProvider) -> SearchService {
        SearchService::with_directory(
            Arc::new(mock.clone()),
            Arc::new(seed::demo_directory(today())),
            OrchestratorConfig::default(),
        )
        .unwrap()
        .with_today(today())
    }

    #[test]
    fn test_request_builder() {
        let request = SearchRequest::new("find bob")
            .with_limit(3)
            .with_org_id(1)
            .with_team_id(2)
            .with_user_id(3);

        assert_eq!(request.limit, 3);
        assert_eq!(
            request.contextualized_query(),
            "find bob within organization ID 1 for team ID 2 relevant to user ID 3"
        );
        assert_eq!(SearchRequest::new("x").limit, DEFAULT_LIMIT);
    }

    #[test]
    fn test_request_from_query_params() {
        let request: SearchRequest =
            serde_json::from_value(serde_json::json!({"query": "john", "orgId": 10})).unwrap();
        assert_eq!(request.limit, 5);
        assert_eq!(request.org_id, Some(10));
        assert_eq!(request.team_id, None);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let result = SearchService::with_directory(
            Arc::new(MockProvider::new()),
            Arc::new(seed::demo_directory(today())),
            OrchestratorConfig::new().with_max_rounds(0),
        );
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[tokio::test]
    async fn test_prompt_carries_date_and_context() {
        let mock = MockProvider::new();
        mock.add_tool_response(ToolCompletionResponse::text(r#"{"items": []}"#));

        let users = service(&mock)
            .search(&SearchRequest::new("find bob").with_org_id(1))
            .await
            .unwrap();
        assert!(users.is_empty());

        let messages = &mock.requests()[0].request.messages;
        assert!(messages[0].content.contains("Today is 2024-06-15."));
        assert!(messages[1]
            .content
            .starts_with("find bob within organization ID 1\n\n"));
        assert!(messages[1].content.contains(r#"{"items": []}"#));
    }

    #[tokio::test]
    async fn test_search_filters_and_limits() {
        let mock = MockProvider::new();
        mock.add_tool_response(ToolCompletionResponse::tool_calls(vec![ToolCall::new(
            "call_0",
            "getUsersByName",
            r#"{"name":"brown"}"#,
        )]));
        mock.add_tool_response(ToolCompletionResponse::text(
            r#"```json
{"items": [
  {"userId": 12, "name": "Olivia Brown", "email": "olivia.br@globalcorp.com", "teamId": 4, "orgId": 20},
  {"userId": 3, "name": "Robert Brown", "email": "robert.brown@techhub.com", "teamId": 1, "orgId": 10}
]}
```"#,
        ));

        let users = service(&mock)
            .search(&SearchRequest::new("brown").with_org_id(10))
            .await
            .unwrap();

        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user_id, 3);
    }

    #[tokio::test]
    async fn test_undecodable_answer_is_an_error() {
        let mock = MockProvider::new();
        mock.add_tool_response(ToolCompletionResponse::text("No user found"));

        let result = service(&mock).search(&SearchRequest::new("zed")).await;

        match result {
            Err(Error::OutputDecoding { raw, .. }) => assert_eq!(raw, "No user found"),
            other => panic!("expected OutputDecoding, got {:?}", other),
        }
    }
}
