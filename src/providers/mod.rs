mod factory;
mod open_ai;
mod prompt;

pub use factory::ProviderFactory;
pub use open_ai::OpenAIProvider;
pub use prompt::{render_prompt, PROMPT_TEMPLATE, SYSTEM_PROMPT};

use async_trait::async_trait;
use serde::Serialize;

use crate::error::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

/// A single chat-completion call
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub model: String,
    pub temperature: f32,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
}

impl CompletionRequest {
    /// System instruction plus the rendered prompt as the user turn
    pub fn for_prompt(model: &str, temperature: f32, max_tokens: u32, prompt_text: &str) -> Self {
        CompletionRequest {
            model: model.to_string(),
            temperature,
            max_tokens,
            messages: vec![
                ChatMessage {
                    role: Role::System,
                    content: SYSTEM_PROMPT.to_string(),
                },
                ChatMessage {
                    role: Role::User,
                    content: prompt_text.to_string(),
                },
            ],
        }
    }
}

/// Unified trait for chat-completion providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai")
    fn provider_name(&self) -> &str;

    /// Run the request and return the raw text of the first completion
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}
