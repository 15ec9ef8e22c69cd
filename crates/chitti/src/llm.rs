use std::sync::Arc;

use async_trait::async_trait;
use chitti_common::openai::{ChatCompletionRequest, Message, OpenAiClient, OpenAiClientError};
use tracing::debug;

/// A single-prompt completion backend.
///
/// `Ok(None)` means the backend answered but produced no text.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, OpenAiClientError>;
}

/// [`LanguageModel`] backed by an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct OpenAiChat {
    client: Arc<OpenAiClient>,
    model: String,
    temperature: f32,
}

impl OpenAiChat {
    pub fn new(client: Arc<OpenAiClient>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
            temperature: 0.0,
        }
    }
}

#[async_trait]
impl LanguageModel for OpenAiChat {
    async fn complete(&self, prompt: &str) -> Result<Option<String>, OpenAiClientError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![Message::user(prompt)],
            temperature: Some(self.temperature),
            max_tokens: None,
        };
        let response = self.client.chat_completions(request, None).await?;
        if let Some(usage) = &response.usage {
            debug!(
                model = %self.model,
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "chat completion usage"
            );
        }
        Ok(response.first_content().map(str::to_string))
    }
}
