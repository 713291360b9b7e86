//! Naming pattern API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use sickle_core::metrics::NAMING_VALIDATIONS;
use sickle_core::naming::{
    check_valid_abd_naming, check_valid_naming, derive_legacy_pattern, test_name,
    validate_detailed, AnimeNumbering, EpisodeContext, LegacyNamingSettings, MultiEpStyle,
    NameRenderer, RenderedName, ValidateOptions, NAME_ABD_PRESETS, NAME_ANIME_PRESETS,
    NAME_PRESETS, NAME_SPORTS_PRESETS,
};

use super::handlers::{api_error, ApiError};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct PresetsResponse {
    pub standard: &'static [&'static str],
    pub anime: &'static [&'static str],
    pub air_by_date: &'static [&'static str],
    pub sports: &'static [&'static str],
}

#[derive(Debug, Deserialize)]
pub struct TestPatternRequest {
    pub pattern: String,
    /// Test a multi-episode file joined with this style.
    #[serde(default)]
    pub multi_ep_style: Option<MultiEpStyle>,
    #[serde(default)]
    pub anime_numbering: Option<AnimeNumbering>,
    #[serde(default)]
    pub air_by_date: bool,
    #[serde(default)]
    pub sports: bool,
    /// Ignore folders in the pattern.
    #[serde(default)]
    pub file_only: bool,
}

#[derive(Debug, Serialize)]
pub struct TestPatternResponse {
    pub valid: bool,
    /// Kind of failure, e.g. `episode_mismatch`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// The sample episode rendered through the pattern.
    pub sample: RenderResponse,
}

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    /// Defaults to the configured pattern for the episode's kind.
    #[serde(default)]
    pub pattern: Option<String>,
    pub episode: EpisodeContext,
    #[serde(default)]
    pub multi_ep_style: Option<MultiEpStyle>,
    #[serde(default)]
    pub anime_numbering: Option<AnimeNumbering>,
}

#[derive(Debug, Serialize)]
pub struct RenderResponse {
    pub filename: String,
    pub directory: String,
    pub path: String,
}

impl From<RenderedName> for RenderResponse {
    fn from(rendered: RenderedName) -> Self {
        let path = rendered.path();
        Self {
            filename: rendered.filename,
            directory: rendered.directory,
            path,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LegacyPatternResponse {
    pub pattern: String,
    pub valid: bool,
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/naming/presets
pub async fn presets() -> Json<PresetsResponse> {
    Json(PresetsResponse {
        standard: NAME_PRESETS,
        anime: NAME_ANIME_PRESETS,
        air_by_date: NAME_ABD_PRESETS,
        sports: NAME_SPORTS_PRESETS,
    })
}

/// POST /api/v1/naming/test
///
/// Render the sample episode through a pattern and check that the result
/// parses back to the same numbering.
pub async fn test_pattern(
    Json(body): Json<TestPatternRequest>,
) -> Result<Json<TestPatternResponse>, ApiError> {
    if body.pattern.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Pattern is empty"));
    }

    let opts = ValidateOptions {
        multi: body.multi_ep_style,
        anime_type: body.anime_numbering,
        file_only: body.file_only,
        air_by_date: body.air_by_date,
        sports: body.sports,
    };
    let sample = test_name(&body.pattern, &opts);
    let result = validate_detailed(&body.pattern, &opts);
    let outcome = if result.is_ok() { "valid" } else { "invalid" };
    NAMING_VALIDATIONS.with_label_values(&[outcome]).inc();

    let (reason, error) = match result {
        Ok(()) => (None, None),
        Err(failure) => (Some(failure.kind()), Some(failure.to_string())),
    };
    Ok(Json(TestPatternResponse {
        valid: reason.is_none(),
        reason,
        error,
        sample: sample.into(),
    }))
}

/// POST /api/v1/naming/render
///
/// Render a supplied episode. Unset options fall back to the configured
/// naming settings.
pub async fn render_episode(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RenderRequest>,
) -> Result<Json<RenderResponse>, ApiError> {
    let naming = &state.config().naming;
    let ep = &body.episode;
    let pattern = match &body.pattern {
        Some(pattern) => pattern.as_str(),
        None => naming.pattern_for(ep.air_by_date, ep.sports, ep.is_anime),
    };
    if pattern.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Pattern is empty"));
    }

    let anime_numbering = body.anime_numbering.unwrap_or(if ep.is_anime {
        naming.anime_numbering
    } else {
        AnimeNumbering::Standard
    });
    let renderer = NameRenderer::new(
        body.multi_ep_style.unwrap_or(naming.multi_ep_style),
        anime_numbering,
    )
    .with_strip_year(naming.strip_year);

    Ok(Json(renderer.render(pattern, ep).into()))
}

/// POST /api/v1/naming/legacy
///
/// Convert old discrete naming options into a pattern.
pub async fn legacy_pattern(
    State(state): State<Arc<AppState>>,
    Json(settings): Json<LegacyNamingSettings>,
) -> Json<LegacyPatternResponse> {
    let pattern = derive_legacy_pattern(&settings);
    let valid = if settings.air_by_date {
        check_valid_abd_naming(&pattern)
    } else {
        check_valid_naming(
            &pattern,
            state.config().naming.multi_ep_style,
            AnimeNumbering::Standard,
        )
    };
    Json(LegacyPatternResponse { pattern, valid })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_pattern_reports_reason() {
        let Json(response) = test_pattern(Json(TestPatternRequest {
            pattern: "%SN - %EN".to_string(),
            multi_ep_style: None,
            anime_numbering: None,
            air_by_date: false,
            sports: false,
            file_only: false,
        }))
        .await
        .unwrap();

        assert!(!response.valid);
        assert_eq!(response.reason, Some("unparseable"));
        assert_eq!(response.sample.filename, "Show Name - Ep Name");
    }

    #[tokio::test]
    async fn test_empty_pattern_is_bad_request() {
        let result = test_pattern(Json(TestPatternRequest {
            pattern: "  ".to_string(),
            multi_ep_style: None,
            anime_numbering: None,
            air_by_date: false,
            sports: false,
            file_only: false,
        }))
        .await;

        let (status, _) = result.unwrap_err();
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
