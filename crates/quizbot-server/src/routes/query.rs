//! The query route — forward a question, return the extracted answer.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use quizbot_solver::SolveError;

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/query", post(query))
}

/// Inbound question payload.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionModel {
    pub title: String,
    /// Question kind (`single`, `multiple`, `judgement`, `completion`, ...).
    /// Opaque text, forwarded to the backend as-is.
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub options: Option<String>,
}

/// Outbound payload: the question echoed back plus answer lines or an
/// error message. Exactly one of `answer`/`error` is set.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseModel {
    pub question: String,
    pub answer: Option<Vec<String>>,
    pub error: Option<String>,
}

/// `POST /query`
///
/// A client that disconnects mid-solve drops this handler's future,
/// which cancels the in-flight backend exchange; no payload is produced
/// in that case.
async fn query(
    State(state): State<Arc<AppState>>,
    Json(question): Json<QuestionModel>,
) -> Json<ResponseModel> {
    let result = state
        .solver
        .solve(
            &question.title,
            question.kind.as_deref(),
            question.options.as_deref(),
        )
        .await;

    Json(to_response(question.title, result))
}

/// Map a solve outcome onto the wire payload. Must not panic — a single
/// failed request never takes the process down.
fn to_response(question: String, result: Result<Vec<String>, SolveError>) -> ResponseModel {
    match result {
        Ok(lines) => ResponseModel {
            question,
            answer: Some(lines),
            error: None,
        },
        Err(err @ SolveError::NoAnswer) => ResponseModel {
            question,
            answer: None,
            error: Some(err.to_string()),
        },
        Err(err) => ResponseModel {
            question,
            answer: None,
            error: Some(format!("unexpected error: {err}")),
        },
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
