//! Orchestrator configuration

use crate::error::{Error, Result};
use eagle_tools::RunnerConfig;
use std::time::Duration;

/// Configuration for the orchestrator
#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    /// Maximum model round trips before giving up
    pub max_rounds: usize,
    /// Timeout for a single model call
    pub model_timeout: Duration,
    /// Model name (empty = provider default)
    pub model: String,
    /// Sampling temperature
    pub temperature: Option<f32>,
    /// Runner configuration
    pub runner_config: RunnerConfig,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            max_rounds: 8,
            model_timeout: Duration::from_secs(120),
            model: String::new(),
            temperature: None,
            runner_config: RunnerConfig::default(),
        }
    }
}

impl OrchestratorConfig {
    /// Create a new configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set maximum rounds
    #[must_use]
    pub fn with_max_rounds(mut self, max: usize) -> Self {
        self.max_rounds = max;
        self
    }

    /// Set the model call timeout
    #[must_use]
    pub fn with_model_timeout(mut self, timeout: Duration) -> Self {
        self.model_timeout = timeout;
        self
    }

    /// Set the model name
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Set the sampling temperature
    #[must_use]
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set runner configuration
    #[must_use]
    pub fn with_runner_config(mut self, config: RunnerConfig) -> Self {
        self.runner_config = config;
        self
    }

    /// Reject settings the loop cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(Error::Configuration(
                "max_rounds must be at least 1".to_string(),
            ));
        }
        if self.model_timeout.is_zero() {
            return Err(Error::Configuration(
                "model timeout must be positive".to_string(),
            ));
        }
        if self.runner_config.default_timeout.is_zero() {
            return Err(Error::Configuration(
                "tool timeout must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
