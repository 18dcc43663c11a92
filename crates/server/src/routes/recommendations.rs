// crates/server/src/routes/recommendations.rs
//! Bookmark recommendation endpoint: behavior summary in, filtered
//! recommender reply out.

use std::collections::HashSet;
use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tabitha_core::{
    build_behavior_summary, extract_domain, now_pacific, strip_bookmarked, visits_from_pages,
    PageVisit, RecommenderReply,
};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationsRequest {
    /// Absent is a 400; an explicitly empty list is a valid request.
    pub pages: Option<Vec<PageVisit>>,
    /// Domains or URLs the user has already bookmarked.
    #[serde(default)]
    pub bookmarked_domains: Vec<String>,
}

/// POST /api/recommendations - Summarize behavior, ask the recommender,
/// and drop suggestions the user already bookmarked.
pub async fn recommendations(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecommendationsRequest>,
) -> ApiResult<Json<RecommenderReply>> {
    let pages = request
        .pages
        .ok_or_else(|| ApiError::MissingInput("pages".to_string()))?;
    let visits = visits_from_pages(&pages);
    let summary = build_behavior_summary(&visits, &state.categories, now_pacific());

    tracing::info!(
        pages = pages.len(),
        visits = visits.len(),
        bookmarked = request.bookmarked_domains.len(),
        "requesting recommendations"
    );

    let reply = state
        .llm
        .recommend(&summary)
        .await
        .map_err(ApiError::RecommenderFailure)?;

    // Bookmarks may arrive as full URLs; normalize to canonical domains
    // before comparing.
    let bookmarked: HashSet<String> = request
        .bookmarked_domains
        .iter()
        .map(|raw| {
            let domain = extract_domain(raw);
            if domain.is_empty() {
                raw.trim().to_lowercase()
            } else {
                domain
            }
        })
        .collect();

    Ok(Json(strip_bookmarked(reply, &bookmarked)))
}

/// Create the recommendations routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/recommendations", post(recommendations))
}
