//! Chat backend layer for Quizbot.
//!
//! # Architecture
//!
//! - [`traits::ChatClient`] — trait every chat backend implements
//! - [`openai::OpenAiClient`] — OpenAI-compatible `/chat/completions` client
//! - [`googleai::GoogleAiClient`] — Gemini `generateContent` client
//! - [`registry::ProviderRegistry`] — ordered fallback list built from config

pub mod googleai;
pub mod openai;
pub mod registry;
pub mod traits;

// Re-export main types for convenience
pub use googleai::GoogleAiClient;
pub use openai::OpenAiClient;
pub use registry::ProviderRegistry;
pub use traits::{ChatClient, ChatError};
