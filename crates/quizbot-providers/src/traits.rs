//! Chat backend trait — the seam between the solver and the providers.

use async_trait::async_trait;
use thiserror::Error;

use quizbot_core::types::{ChatExchange, ChatReply};

/// Failure of a single backend exchange.
///
/// These stay inside the solver's fallback loop: logged, then the next
/// backend is tried. They are never surfaced to the HTTP layer and never
/// retried against the same backend.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Transport-level failure (connect, timeout, TLS, ...).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("api error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The backend answered 2xx but the body wasn't what we expect.
    #[error("malformed response: {0}")]
    Malformed(String),
}

/// A configured chat backend, able to answer one exchange at a time.
///
/// Implementations issue exactly one network call per `chat` invocation
/// and never retry internally; retrying and falling back is the solver's
/// job.
#[async_trait]
pub trait ChatClient: Send + Sync {
    /// Send one chat exchange and return the backend's reply.
    async fn chat(&self, exchange: &ChatExchange) -> Result<ChatReply, ChatError>;

    /// Display name for logging.
    fn name(&self) -> &str;
}
