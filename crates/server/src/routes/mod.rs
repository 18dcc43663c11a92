//! API route handlers for the tabitha server.

pub mod filter;
pub mod health;
pub mod insights;
pub mod parse;
pub mod recommendations;

use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

/// Create the combined API router with all routes under /api prefix.
///
/// Routes:
/// - GET  /api/health - Health check
/// - POST /api/parse - Parse a natural-language query into filter criteria
/// - POST /api/filter - Parse a query and filter a history batch
/// - POST /api/insights - Batch analytics over a history batch
/// - POST /api/recommendations - Behavior-based bookmark recommendations
pub fn api_routes(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api", health::router())
        .nest("/api", parse::router())
        .nest("/api", filter::router())
        .nest("/api", insights::router())
        .nest("/api", recommendations::router())
        .with_state(state)
}
