//! Chat types shared by every backend client.
//!
//! The wire structs model the OpenAI chat completions format. On top of
//! that sits a small backend-neutral layer — [`ChatExchange`] going out,
//! [`ChatReply`] coming back — so the solver never sees provider quirks.

use serde::{Deserialize, Serialize};

// ─────────────────────────────────────────────
// Messages (OpenAI chat completions format)
// ─────────────────────────────────────────────

/// A chat message in the OpenAI format.
///
/// Each variant maps to a `role` field value. Quizbot exchanges are
/// single-shot, so only the system and user roles are ever sent.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "role")]
pub enum Message {
    #[serde(rename = "system")]
    System { content: String },

    #[serde(rename = "user")]
    User { content: String },
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Message::System {
            content: content.into(),
        }
    }

    /// Create a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Message::User {
            content: content.into(),
        }
    }
}

// ─────────────────────────────────────────────
// Chat completion request/response (wire structs)
// ─────────────────────────────────────────────

/// Request body for an OpenAI-compatible chat completion API.
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
}

/// Raw chat completion response from an OpenAI-compatible API.
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub id: Option<String>,
    pub choices: Vec<ChatChoice>,
}

/// A single choice in a chat completion response.
#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: AssistantMessage,
    pub finish_reason: Option<String>,
}

/// The assistant message within a chat completion choice.
#[derive(Debug, Deserialize)]
pub struct AssistantMessage {
    pub content: Option<String>,
}

// ─────────────────────────────────────────────
// Finish reasons
// ─────────────────────────────────────────────

/// Why the backend stopped generating.
///
/// Only [`FinishReason::Stop`] marks a reply as usable; every other
/// reason (or an absent one) makes the solver fall through to the next
/// configured backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FinishReason {
    /// Ordinary completion.
    Stop,
    /// Output truncated at the token limit.
    Length,
    /// Generation blocked by a content filter.
    ContentFilter,
    /// The model tried to call a tool.
    ToolCalls,
    /// Anything the backend reports that we don't classify.
    Other(String),
}

impl FinishReason {
    /// Map an OpenAI-style `finish_reason` string.
    pub fn from_openai(reason: &str) -> Self {
        match reason {
            "stop" => FinishReason::Stop,
            "length" => FinishReason::Length,
            "content_filter" => FinishReason::ContentFilter,
            "tool_calls" | "function_call" => FinishReason::ToolCalls,
            other => FinishReason::Other(other.to_string()),
        }
    }

    /// Map a Gemini `finishReason` string.
    pub fn from_google(reason: &str) -> Self {
        match reason {
            "STOP" => FinishReason::Stop,
            "MAX_TOKENS" => FinishReason::Length,
            "SAFETY" | "RECITATION" | "BLOCKLIST" | "PROHIBITED_CONTENT" | "SPII" => {
                FinishReason::ContentFilter
            }
            other => FinishReason::Other(other.to_string()),
        }
    }
}

// ─────────────────────────────────────────────
// Exchange / reply (backend-neutral)
// ─────────────────────────────────────────────

/// A single prompt exchange sent to a backend: one system message, one
/// user message, fixed generation options. Built fresh per request and
/// never persisted.
#[derive(Clone, Debug)]
pub struct ChatExchange {
    pub system_prompt: String,
    pub user_message: String,
    pub max_output_tokens: u32,
}

/// What a backend returned for one exchange.
#[derive(Clone, Debug)]
pub struct ChatReply {
    /// The response text (may be empty when generation was blocked).
    pub text: String,
    /// Backend-reported finish classification, if any.
    pub finish: Option<FinishReason>,
}

impl ChatReply {
    /// Whether the backend reported an ordinary completion.
    pub fn finished_cleanly(&self) -> bool {
        self.finish == Some(FinishReason::Stop)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
