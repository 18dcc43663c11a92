// crates/server/src/routes/insights.rs
//! Batch history analytics endpoint. Pure computation, no collaborator.

use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tabitha_core::{compute_insights, visits_from_pages, InsightsReport, PageVisit};

use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct InsightsRequest {
    /// Absent is a 400; an explicitly empty list is a valid request.
    pub pages: Option<Vec<PageVisit>>,
}

/// POST /api/insights - Compute the analytics report over a history batch.
///
/// Unusable records are skipped, never fatal; an empty batch yields an
/// empty report.
pub async fn history_insights(
    State(_state): State<Arc<AppState>>,
    Json(request): Json<InsightsRequest>,
) -> ApiResult<Json<InsightsReport>> {
    let pages = request
        .pages
        .ok_or_else(|| ApiError::MissingInput("pages".to_string()))?;
    let visits = visits_from_pages(&pages);
    tracing::info!(
        pages = pages.len(),
        visits = visits.len(),
        "computing insights"
    );
    Ok(Json(compute_insights(&visits)))
}

/// Create the insights routes router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/insights", post(history_insights))
}
