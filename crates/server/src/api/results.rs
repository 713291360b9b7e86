//! Search result filtering API handlers.

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use sickle_core::filter::{
    FilterOutcome, ProviderCapabilities, ScoredCandidate, SearchHit, WantedEpisode,
};
use tracing::info;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct FilterRequest {
    pub hits: Vec<SearchHit>,
    pub wanted: WantedEpisode,
    /// What the provider of the hits reports. Defaults to a seed-aware
    /// provider.
    #[serde(default)]
    pub capabilities: ProviderCapabilities,
}

#[derive(Debug, Serialize)]
pub struct FilterResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best: Option<ScoredCandidate>,
    #[serde(flatten)]
    pub outcome: FilterOutcome,
}

/// POST /api/v1/results/filter
///
/// Judge, rank and de-duplicate hits with the configured search policy. An
/// empty `wanted.show_names` skips the show name check.
pub async fn filter_results(
    State(state): State<Arc<AppState>>,
    Json(body): Json<FilterRequest>,
) -> Json<FilterResponse> {
    let total = body.hits.len();
    let outcome = state
        .filter()
        .filter(body.hits, &body.wanted, &body.capabilities);
    info!(
        hits = total,
        accepted = outcome.accepted.len(),
        rejected = outcome.rejected.len(),
        "Filtered search results"
    );

    Json(FilterResponse {
        best: outcome.best().cloned(),
        outcome,
    })
}
