use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::providers::{LlmProvider, OpenAIProvider};
use std::sync::Arc;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create the provider named in `config.llm.provider`
    pub fn create(config: &PipelineConfig) -> Result<Arc<dyn LlmProvider>> {
        match config.llm.provider.as_str() {
            "openai" => Ok(Arc::new(OpenAIProvider::new(&config.llm, config.timeout())?)),
            other => Err(PipelineError::InvalidConfig(format!(
                "Unknown provider: {other} (available: {})",
                Self::available_providers().join(", ")
            ))),
        }
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["openai"]
    }
}
