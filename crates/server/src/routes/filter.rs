// crates/server/src/routes/filter.rs
//! Query-driven history filtering endpoint.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tabitha_core::{filter_and_rank, PageSummary, PageVisit};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    #[serde(default)]
    pub query: String,
    /// Absent is a 400; an explicitly empty list is a valid request.
    pub pages: Option<Vec<PageVisit>>,
}

/// POST /api/filter - Parse a query and return the matching pages,
/// newest first, capped at 10 summaries.
///
/// A collaborator failure fails the whole request; an empty page list is
/// a valid request with an empty result.
pub async fn filter_history(
    State(state): State<Arc<AppState>>,
    Json(request): Json<FilterRequest>,
) -> ApiResult<Json<Vec<PageSummary>>> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::MissingInput("query".to_string()));
    }
    let pages = request
        .pages
        .ok_or_else(|| ApiError::MissingInput("pages".to_string()))?;

    let criteria = state
        .llm
        .parse_query(query)
        .await
        .map_err(ApiError::ParseFailure)?;

    let results = filter_and_rank(&criteria, &pages, &state.filter_config);
    tracing::info!(
        pages = pages.len(),
        matched = results.len(),
        "filtered history"
    );

    Ok(Json(results))
}

/// Create the filter routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/filter", post(filter_history))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_request_distinguishes_absent_from_empty_pages() {
        let request: FilterRequest = serde_json::from_str(r#"{"query":"funny videos"}"#).unwrap();
        assert_eq!(request.query, "funny videos");
        assert!(request.pages.is_none());

        let request: FilterRequest =
            serde_json::from_str(r#"{"query":"funny videos","pages":[]}"#).unwrap();
        assert_eq!(request.pages.map(|p| p.len()), Some(0));
    }

    #[test]
    fn test_filter_request_accepts_chrome_field_names() {
        let request: FilterRequest = serde_json::from_str(
            r#"{"query":"q","pages":[{"url":"https://x.com","title":"t","lastVisitTime":1234.5}]}"#,
        )
        .unwrap();
        assert_eq!(request.pages.unwrap()[0].time, Some(1234));
    }
}
