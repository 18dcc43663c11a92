// crates/server/src/routes/parse.rs
//! Natural-language query parsing endpoint.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tabitha_core::FilterCriteria;

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    #[serde(default)]
    pub query: String,
}

/// POST /api/parse - Turn a natural-language query into filter criteria.
///
/// The collaborator does the parsing; this handler only validates input
/// and maps failures.
pub async fn parse_query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ParseRequest>,
) -> ApiResult<Json<FilterCriteria>> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::MissingInput("query".to_string()));
    }

    tracing::info!(query_chars = query.len(), "parsing search query");
    let criteria = state
        .llm
        .parse_query(query)
        .await
        .map_err(ApiError::ParseFailure)?;

    Ok(Json(criteria))
}

/// Create the parse routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/parse", post(parse_query))
}
