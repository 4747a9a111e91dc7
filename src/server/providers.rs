//! Search service wiring
//!
//! Builds the Ollama provider and the seeded directory from configuration.

use super::config::AppConfig;
use anyhow::{Context, Result};
use chrono::Local;
use eagle_core::SearchService;
use eagle_directory::seed;
use eagle_llm::{LlmProvider, OllamaConfig, OllamaProvider};
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Build the search service described by `config`
pub fn build_search_service(config: &AppConfig) -> Result<SearchService> {
    let ollama = OllamaConfig::new()
        .with_base_url(&config.llm.base_url)
        .with_model(&config.llm.model)
        .with_max_tokens(config.llm.max_tokens)
        .with_timeout(Duration::from_secs(config.llm.timeout_secs));
    let provider: Arc<dyn LlmProvider> =
        Arc::new(OllamaProvider::new(ollama).context("Failed to create Ollama provider")?);

    let directory = Arc::new(seed::demo_directory(Local::now().date_naive()));
    info!(
        users = directory.users().len(),
        teams = directory.teams().len(),
        projects = directory.projects().len(),
        mentions = directory.mentions().len(),
        "Directory loaded"
    );

    let service =
        SearchService::with_directory(provider, directory, config.orchestrator_config())
            .context("Invalid search configuration")?;

    let orchestrator = service.orchestrator();
    info!(
        provider = %orchestrator.provider_name(),
        base_url = %config.llm.base_url,
        model = %orchestrator.model(),
        tools = %orchestrator.list_tools().join(", "),
        "Search service ready"
    );
    Ok(service)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_search_service() {
        let service = build_search_service(&AppConfig::default()).unwrap();
        assert_eq!(service.orchestrator().provider_name(), "ollama");
        assert_eq!(service.orchestrator().model(), "llama3.1");
        assert_eq!(service.orchestrator().list_tools().len(), 5);
    }

    #[test]
    fn test_empty_base_url_rejected() {
        let mut config = AppConfig::default();
        config.llm.base_url = String::new();
        assert!(build_search_service(&config).is_err());
    }
}
