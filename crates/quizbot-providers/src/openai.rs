//! OpenAI-compatible chat backend.
//!
//! Talks to any `/chat/completions` endpoint: the real OpenAI API or a
//! compatible proxy selected via the entry's `endpoint` field.

use async_trait::async_trait;
use tracing::debug;

use quizbot_core::types::{
    ChatCompletionRequest, ChatCompletionResponse, ChatExchange, ChatReply, FinishReason, Message,
};

use crate::traits::{ChatClient, ChatError};

/// Standard OpenAI API base, used when no endpoint override is given.
const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// A chat backend speaking the OpenAI chat completions protocol.
pub struct OpenAiClient {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL (e.g. `"https://api.openai.com/v1"`).
    api_base: String,
    /// API key for Bearer authentication.
    api_key: String,
    /// Model identifier for every request from this client.
    model: String,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiClient {
    /// Create a new client bound to one key/model pair.
    ///
    /// A non-empty `endpoint` overrides the default API base.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        endpoint: Option<&str>,
    ) -> Self {
        let api_base = match endpoint {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => DEFAULT_API_BASE.to_string(),
        };

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to build HTTP client");

        OpenAiClient {
            client,
            api_base,
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Build the full chat completions URL.
    fn completions_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/chat/completions", base)
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn chat(&self, exchange: &ChatExchange) -> Result<ChatReply, ChatError> {
        let request_body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                Message::system(exchange.system_prompt.clone()),
                Message::user(exchange.user_message.clone()),
            ],
            max_tokens: Some(exchange.max_output_tokens),
        };

        debug!(model = %self.model, api_base = %self.api_base, "calling chat completions");

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(ChatError::Api { status, body });
        }

        let parsed: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Malformed(e.to_string()))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::Malformed("no choices in response".to_string()))?;

        Ok(ChatReply {
            text: choice.message.content.unwrap_or_default(),
            finish: choice.finish_reason.as_deref().map(FinishReason::from_openai),
        })
    }

    fn name(&self) -> &str {
        "OpenAi"
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
