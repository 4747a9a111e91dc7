//! Orchestrator core structure

use eagle_llm::LlmProvider;
use eagle_tools::{ToolRegistry, ToolRunner};
use std::sync::Arc;
use tracing::info;

use super::config::OrchestratorConfig;

/// Drives the model/tool exchange for one search at a time.
///
/// Holds no per-search state, so one instance serves concurrent searches.
pub struct Orchestrator {
    pub(crate) provider: Arc<dyn LlmProvider>,
    pub(crate) runner: ToolRunner,
    pub(crate) config: OrchestratorConfig,
}

impl Orchestrator {
    /// Create a new orchestrator
    #[must_use]
    pub fn new(
        provider: Arc<dyn LlmProvider>,
        tool_registry: Arc<ToolRegistry>,
        config: OrchestratorConfig,
    ) -> Self {
        info!(
            provider = %provider.name(),
            tools = tool_registry.len(),
            max_rounds = config.max_rounds,
            "Orchestrator created"
        );
        let runner = ToolRunner::new(tool_registry, config.runner_config.clone());

        Self {
            provider,
            runner,
            config,
        }
    }

    /// Get the LLM provider name
    #[must_use]
    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    /// Model requests are sent with
    #[must_use]
    pub fn model(&self) -> &str {
        if self.config.model.is_empty() {
            self.provider.default_model()
        } else {
            &self.config.model
        }
    }

    /// List all registered tool names
    #[must_use]
    pub fn list_tools(&self) -> Vec<&str> {
        self.runner.registry().list_names()
    }
}
