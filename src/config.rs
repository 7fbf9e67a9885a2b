use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

use crate::error::{PipelineError, Result};

/// Main pipeline configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct PipelineConfig {
    /// YouTube Data API and transcript settings
    #[serde(default)]
    pub youtube: YouTubeConfig,
    /// Chat-completion model settings
    #[serde(default)]
    pub llm: LlmConfig,
    /// Per-model prices in USD per 1K tokens
    #[serde(default = "default_pricing")]
    pub pricing: HashMap<String, ModelPricing>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

/// Configuration for the video platform collaborators
#[derive(Debug, Deserialize, Clone)]
pub struct YouTubeConfig {
    /// API key for the Data API (can also be set via YOUTUBE_API_KEY)
    pub api_key: Option<String>,
    /// Base URL of the Data API
    #[serde(default = "default_youtube_base_url")]
    pub base_url: String,
    /// Preferred transcript languages, most preferred first
    #[serde(default = "default_languages")]
    pub languages: Vec<String>,
}

impl Default for YouTubeConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_youtube_base_url(),
            languages: default_languages(),
        }
    }
}

/// Configuration for the chat-completion provider
#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    /// Provider identifier
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Model identifier, must have an entry in the pricing table
    #[serde(default = "default_model")]
    pub model: String,
    /// Temperature for generation (0.0-2.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via OPENAI_API_KEY)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Price of a model in USD per 1K tokens
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
pub struct ModelPricing {
    pub input: f64,
    pub output: f64,
}

// Default value functions
fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4-turbo-preview".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    1500
}

fn default_youtube_base_url() -> String {
    "https://www.googleapis.com".to_string()
}

fn default_languages() -> Vec<String> {
    vec!["en".to_string()]
}

fn default_pricing() -> HashMap<String, ModelPricing> {
    HashMap::from([(
        "gpt-4-turbo-preview".to_string(),
        ModelPricing {
            input: 0.01,
            output: 0.03,
        },
    )])
}

fn default_timeout() -> u64 {
    30
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            youtube: YouTubeConfig::default(),
            llm: LlmConfig::default(),
            pricing: default_pricing(),
            timeout: default_timeout(),
        }
    }
}

impl PipelineConfig {
    /// Load configuration from file and environment variables, then validate it
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with YTOPT__ prefix
    /// 2. config.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: YTOPT__LLM__MODEL
    pub fn load() -> Result<Self> {
        let config = load_config()?;
        config.validate()?;
        Ok(config)
    }

    /// Check the settings the pipeline relies on at call time
    pub fn validate(&self) -> Result<()> {
        if !self.pricing.contains_key(&self.llm.model) {
            return Err(PipelineError::UnknownModelPricing(self.llm.model.clone()));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(PipelineError::InvalidConfig(format!(
                "llm.temperature must be within 0.0..=2.0, got {}",
                self.llm.temperature
            )));
        }
        if self.llm.max_tokens == 0 {
            return Err(PipelineError::InvalidConfig(
                "llm.max_tokens must be greater than zero".to_string(),
            ));
        }
        if self.youtube.languages.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "youtube.languages must list at least one language".to_string(),
            ));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout)
    }
}

/// Load configuration from file and environment variables without validating it
pub fn load_config() -> Result<PipelineConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("config").required(false))
        // Use double underscore for nested: YTOPT__LLM__API_KEY
        .add_source(
            Environment::with_prefix("YTOPT")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
