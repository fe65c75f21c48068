//! HTTP route handlers.

pub mod query;

use std::sync::Arc;

use axum::Router;

use crate::cors::cors_layer;
use crate::state::AppState;

/// Build the axum router: the query route plus the CORS policy.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(query::routes())
        .layer(cors_layer())
        .with_state(state)
}
