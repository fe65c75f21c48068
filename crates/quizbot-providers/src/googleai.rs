//! Google Generative Language chat backend (Gemini).
//!
//! Uses the REST `generateContent` method rather than streaming; answers
//! here are a handful of short lines, so one round trip is enough.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use quizbot_core::types::{ChatExchange, ChatReply, FinishReason};

use crate::traits::{ChatClient, ChatError};

/// Model used when a `GoogleAi` entry doesn't name one.
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// A chat backend speaking the Gemini `generateContent` protocol.
pub struct GoogleAiClient {
    client: reqwest::Client,
    api_base: String,
    /// API key, sent via the `x-goog-api-key` header.
    api_key: String,
    model: String,
}

impl std::fmt::Debug for GoogleAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleAiClient")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .finish()
    }
}

// ─────────────────────────────────────────────
// Wire structs (generateContent)
// ─────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    system_instruction: Content<'a>,
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

// ─────────────────────────────────────────────
// Client
// ─────────────────────────────────────────────

impl GoogleAiClient {
    /// Create a new client bound to one key/model pair.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .expect("Failed to build HTTP client");

        GoogleAiClient {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            api_key: api_key.into(),
            model: model.into(),
        }
    }

    /// Point the client at a different API base (mock server).
    #[cfg(test)]
    fn with_api_base(mut self, base: impl Into<String>) -> Self {
        self.api_base = base.into();
        self
    }

    fn generate_url(&self) -> String {
        let base = self.api_base.trim_end_matches('/');
        format!("{}/models/{}:generateContent", base, self.model)
    }
}

#[async_trait]
impl ChatClient for GoogleAiClient {
    async fn chat(&self, exchange: &ChatExchange) -> Result<ChatReply, ChatError> {
        let request_body = GenerateContentRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: &exchange.system_prompt,
                }],
            },
            contents: vec![Content {
                role: Some("user"),
                parts: vec![Part {
                    text: &exchange.user_message,
                }],
            }],
            generation_config: GenerationConfig {
                max_output_tokens: exchange.max_output_tokens,
            },
        };

        debug!(model = %self.model, "calling generateContent");

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
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

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| ChatError::Malformed(e.to_string()))?;

        let candidate = parsed
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ChatError::Malformed("no candidates in response".to_string()))?;

        let text = candidate
            .content
            .map(|c| {
                c.parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .concat()
            })
            .unwrap_or_default();

        Ok(ChatReply {
            text,
            finish: candidate.finish_reason.as_deref().map(FinishReason::from_google),
        })
    }

    fn name(&self) -> &str {
        "GoogleAi"
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
