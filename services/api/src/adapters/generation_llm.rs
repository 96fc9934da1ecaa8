//! services/api/src/adapters/generation_llm.rs
//!
//! This module contains the adapter for the generative-text model.
//! It implements the `TextGenerationService` port from the `core` crate.

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

use study_assistant_core::ports::{PortError, PortResult, TextGenerationService};

//=========================================================================================
// The Main Adapter Struct
//=========================================================================================

/// An adapter that implements `TextGenerationService` using an
/// OpenAI-compatible chat-completion LLM.
///
/// The client is only built when a credential was configured; a missing key
/// is reported at the first generation call, never at construction, so the
/// rest of the API works without one.
#[derive(Clone)]
pub struct OpenAiTextAdapter {
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl OpenAiTextAdapter {
    /// Creates a new `OpenAiTextAdapter`. `api_key` comes straight from
    /// configuration and may be absent.
    pub fn new(api_key: Option<String>, model: String) -> Self {
        let client = api_key
            .filter(|key| !key.trim().is_empty())
            .map(|key| Client::with_config(OpenAIConfig::new().with_api_key(key)));
        Self { client, model }
    }
}

/// An invalid credential is a configuration problem, not a generation
/// problem; everything else from the backend propagates as unexpected.
fn map_backend_error(err: OpenAIError) -> PortError {
    let invalid_key = match &err {
        OpenAIError::ApiError(api) => {
            let message = api.message.to_lowercase();
            message.contains("api key") || message.contains("unauthorized")
        }
        _ => false,
    };

    if invalid_key {
        PortError::ServiceUnavailable(
            "OpenAI API key is invalid or missing. Add a valid OPENAI_API_KEY to \
             services/api/.env and restart the server."
                .to_string(),
        )
    } else {
        PortError::Unexpected(err.to_string())
    }
}

//=========================================================================================
// `TextGenerationService` Trait Implementation
//=========================================================================================

#[async_trait]
impl TextGenerationService for OpenAiTextAdapter {
    /// Sends the system and user prompts as ordered chat messages and
    /// returns the model's reply text with no post-processing. No retries.
    async fn generate_text(&self, system_prompt: &str, user_prompt: &str) -> PortResult<String> {
        let client = self.client.as_ref().ok_or_else(|| {
            PortError::ServiceUnavailable(
                "OpenAI API key is not set. Add OPENAI_API_KEY to services/api/.env and \
                 restart the server."
                    .to_string(),
            )
        })?;

        let messages = vec![
            ChatCompletionRequestSystemMessageArgs::default()
                .content(system_prompt)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
            ChatCompletionRequestUserMessageArgs::default()
                .content(user_prompt)
                .build()
                .map_err(|e| PortError::Unexpected(e.to_string()))?
                .into(),
        ];

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .messages(messages)
            .n(1)
            .build()
            .map_err(|e| PortError::Unexpected(e.to_string()))?;

        // Call the API and manually map the error if it occurs, which respects the orphan rule.
        let response = client
            .chat()
            .create(request)
            .await
            .map_err(map_backend_error)?;

        // Extract the text content from the first choice in the response.
        if let Some(choice) = response.choices.into_iter().next() {
            if let Some(content) = choice.message.content {
                Ok(content)
            } else {
                Err(PortError::Unexpected(
                    "Model response contained no text content.".to_string(),
                ))
            }
        } else {
            Err(PortError::Unexpected(
                "Model returned no choices in its response.".to_string(),
            ))
        }
    }
}
