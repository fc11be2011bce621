//! services/api/src/adapters/content_llm.rs
//!
//! This module contains the adapter for the content-writing LLM.
//! It implements the `ContentGenerationService` port from the `core` crate.

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestUserMessageArgs,
        CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use content_studio_core::{
    domain::{Platform, Tone},
    ports::{ContentGenerationService, PortError, PortResult},
    prompt::{build_prompt, SYSTEM_INSTRUCTIONS},
};
use tracing::debug;

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `ContentGenerationService` using an OpenAI-compatible LLM.
#[derive(Clone)]
pub struct OpenAiContentAdapter {
    client: Client<OpenAIConfig>,
    model: String,
    max_tokens: u32,
}

impl OpenAiContentAdapter {
    /// Creates a new `OpenAiContentAdapter`.
    pub fn new(client: Client<OpenAIConfig>, model: String, max_tokens: u32) -> Self {
        Self {
            client,
            model,
            max_tokens,
        }
    }
}

//=========================================================================================
// `ContentGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl ContentGenerationService for OpenAiContentAdapter {
    async fn generate_content(
        &self,
        core_message: &str,
        platform: Platform,
        tone: Tone,
    ) -> PortResult<String> {
        let prompt = build_prompt(core_message, platform, tone);
        debug!(%platform, %tone, model = %self.model, "Sending generation request.");

        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(SYSTEM_INSTRUCTIONS)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(prompt)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .max_completion_tokens(self.max_tokens)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e: OpenAIError| PortError::Unexpected(e.to_string()))?;

        response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| {
                PortError::Unexpected(
                    "Content generation LLM returned no choices in its response.".to_string(),
                )
            })?
            .message
            .content
            .ok_or_else(|| {
                PortError::Unexpected(
                    "Content generation LLM response contained no text content.".to_string(),
                )
            })
    }
}
