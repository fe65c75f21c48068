//! Sequential fallback over the configured chat backends.
//!
//! One exchange per backend, in registry order, first complete reply
//! wins. Backends are unreliable and heterogeneous (rate limits, auth
//! failures, truncation); a linear best-effort pass keeps the service
//! usable without retry machinery.

use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, error, warn};

use quizbot_providers::ProviderRegistry;

use crate::prompt::{build_exchange, extract_answer_lines};

/// Aggregate outcome of a solve call.
///
/// Per-backend failures never appear here — they are contained inside
/// the fallback loop. Request cancellation isn't a variant either: a
/// dropped solve future simply stops at its current await point.
#[derive(Debug, Error)]
pub enum SolveError {
    /// Every configured backend was exhausted without a usable reply
    /// (including the case of zero configured backends).
    #[error("no usable AI service")]
    NoAnswer,

    /// Failure outside the per-backend containment of the fallback loop.
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// Answers study questions by falling back across the registry.
pub struct Solver {
    registry: Arc<ProviderRegistry>,
}

impl Solver {
    pub fn new(registry: Arc<ProviderRegistry>) -> Self {
        Self { registry }
    }

    /// Answer one question.
    ///
    /// Tries each backend in configured order with a single exchange:
    /// a reply that finished cleanly is split into answer lines and
    /// returned immediately; an incomplete reply or an error falls
    /// through to the next backend. Attempts are strictly sequential.
    pub async fn solve(
        &self,
        title: &str,
        kind: Option<&str>,
        options: Option<&str>,
    ) -> Result<Vec<String>, SolveError> {
        let exchange = build_exchange(title, kind, options);

        for client in self.registry.clients() {
            debug!(
                client = client.name(),
                kind = kind.unwrap_or(""),
                question = title,
                "dispatching question"
            );

            match client.chat(&exchange).await {
                Ok(reply) if reply.finished_cleanly() => {
                    debug!(client = client.name(), text = %reply.text, "complete reply");
                    return Ok(extract_answer_lines(&reply.text));
                }
                Ok(reply) => {
                    warn!(
                        client = client.name(),
                        finish = ?reply.finish,
                        text = %reply.text,
                        "backend did not finish cleanly, trying next"
                    );
                }
                Err(err) => {
                    error!(
                        client = client.name(),
                        error = %err,
                        "exchange failed, trying next"
                    );
                }
            }
        }

        Err(SolveError::NoAnswer)
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
