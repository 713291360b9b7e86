//! Release name parsing API handlers.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use sickle_core::{ParseError, ParsedRelease};
use tracing::debug;

use super::handlers::{api_error, ApiError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ParseRequest {
    /// Release name or file path.
    pub name: String,
    /// Parse with anime conventions.
    #[serde(default)]
    pub anime: bool,
}

/// POST /api/v1/parse
///
/// Parse a release name. Names without recognisable numbering are a 422.
pub async fn parse_release(
    State(state): State<Arc<AppState>>,
    Json(body): Json<ParseRequest>,
) -> Result<Json<ParsedRelease>, ApiError> {
    match state.parser(body.anime).parse(&body.name) {
        Ok(parsed) => Ok(Json(parsed)),
        Err(ParseError::Empty) => Err(api_error(
            StatusCode::BAD_REQUEST,
            ParseError::Empty.to_string(),
        )),
        Err(e) => {
            debug!(name = %body.name, error = %e, "Release name not parseable");
            Err(api_error(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))
        }
    }
}
