//! Collaborator contracts for searching.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

use crate::filter::{ProviderCapabilities, SearchHit};
use crate::naming::EpisodeContext;

/// Errors a search provider can report.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Provider API error: {0}")]
    ApiError(String),

    #[error("Rate limited, retry in {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    #[error("Request timeout")]
    Timeout,

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Errors from the show metadata source.
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Show not found: {0}")]
    ShowNotFound(String),

    #[error("Episode not found: {show} {season}x{episode}")]
    EpisodeNotFound {
        show: String,
        season: u32,
        episode: u32,
    },

    #[error("Metadata source unavailable: {0}")]
    Unavailable(String),
}

/// Errors from a coordinated search.
#[derive(Debug, Error)]
pub enum SearchError {
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error("No search providers configured")]
    NoProviders,

    #[error("All providers failed")]
    AllProvidersFailed(HashMap<String, String>),
}

/// How a show's episodes are numbered and named.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowNamingDefaults {
    #[serde(default)]
    pub air_by_date: bool,
    #[serde(default)]
    pub is_anime: bool,
    #[serde(default)]
    pub is_sports: bool,
    /// Releases use scene numbering rather than the indexer's.
    #[serde(default)]
    pub is_scene: bool,
    /// Other names releases may use for the show.
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// A source of search results (indexer, tracker, NZB site).
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Provider name for logging/metrics.
    fn name(&self) -> &str;

    /// What the provider reports about its results.
    fn capabilities(&self) -> ProviderCapabilities;

    /// Run the search strings and return every hit.
    async fn search(&self, queries: &[String]) -> Result<Vec<SearchHit>, ProviderError>;
}

/// Show and episode lookups.
#[async_trait]
pub trait ShowMetadata: Send + Sync {
    async fn naming_defaults(&self, show: &str) -> Result<ShowNamingDefaults, MetadataError>;

    async fn episode(
        &self,
        show: &str,
        season: u32,
        episode: u32,
    ) -> Result<EpisodeContext, MetadataError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ProviderError::ConnectionFailed("refused".to_string());
        assert_eq!(err.to_string(), "Provider connection failed: refused");

        let err = MetadataError::EpisodeNotFound {
            show: "Show Name".to_string(),
            season: 2,
            episode: 3,
        };
        assert_eq!(err.to_string(), "Episode not found: Show Name 2x3");

        let err = SearchError::from(MetadataError::ShowNotFound("Nope".to_string()));
        assert_eq!(err.to_string(), "Show not found: Nope");
    }

    #[test]
    fn test_naming_defaults_deserialize() {
        let defaults: ShowNamingDefaults = serde_json::from_str(r#"{"is_anime": true}"#).unwrap();
        assert!(defaults.is_anime);
        assert!(!defaults.air_by_date);
        assert!(defaults.aliases.is_empty());
    }
}
