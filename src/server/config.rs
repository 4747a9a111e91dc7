//! Server configuration types

use anyhow::{bail, Result};
use eagle_core::OrchestratorConfig;
use eagle_tools::RunnerConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
        }
    }
}

/// Language model configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Ollama base URL
    pub base_url: String,
    /// Model name
    pub model: String,
    /// Sampling temperature (unset = model default)
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Timeout for one model call
    pub timeout_secs: u64,
    /// Upper bound on tokens generated per model call
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
}

fn default_max_tokens() -> u32 {
    4096
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            model: "llama3.1".to_string(),
            temperature: None,
            timeout_secs: 120,
            max_tokens: default_max_tokens(),
        }
    }
}

/// Search pipeline configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Limit used when the caller gives none
    pub default_limit: usize,
    /// Maximum model round trips per search
    pub max_rounds: usize,
    /// Timeout for one tool call
    pub tool_timeout_secs: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: eagle_core::DEFAULT_LIMIT,
            max_rounds: 8,
            tool_timeout_secs: 10,
        }
    }
}

impl AppConfig {
    /// Reject settings the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.search.max_rounds == 0 {
            bail!("search.max_rounds must be at least 1");
        }
        if self.llm.timeout_secs == 0 {
            bail!("llm.timeout_secs must be positive");
        }
        if self.search.tool_timeout_secs == 0 {
            bail!("search.tool_timeout_secs must be positive");
        }
        if self.llm.base_url.trim().is_empty() {
            bail!("llm.base_url is empty");
        }
        if self.llm.max_tokens == 0 {
            bail!("llm.max_tokens must be positive");
        }
        Ok(())
    }

    /// Orchestrator settings derived from this configuration
    #[must_use]
    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        let config = OrchestratorConfig::new()
            .with_max_rounds(self.search.max_rounds)
            .with_model_timeout(Duration::from_secs(self.llm.timeout_secs))
            .with_model(&self.llm.model)
            .with_runner_config(RunnerConfig::new(Duration::from_secs(
                self.search.tool_timeout_secs,
            )));

        match self.llm.temperature {
            Some(temperature) => config.with_temperature(temperature),
            None => config,
        }
    }
}
