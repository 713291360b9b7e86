//! Search coordinator: metadata lookup, provider fan-out and filtering.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info, warn};

use super::query::{episode_search_strings, season_search_strings};
use super::traits::{ProviderError, SearchError, SearchProvider, ShowMetadata};
use crate::filter::{FilterOutcome, ResultFilter, ScoredCandidate, WantedEpisode, WantedNumbering};
use crate::metrics::PROVIDER_SEARCH_DURATION;

/// Result of a coordinated search.
#[derive(Debug, Clone, Serialize)]
pub struct SearchReport {
    pub wanted: WantedEpisode,
    /// Search strings sent to providers.
    pub queries: Vec<String>,
    pub outcome: FilterOutcome,
    /// Providers that failed (name -> error message).
    #[serde(skip_serializing_if = "HashMap::is_empty")]
    pub provider_errors: HashMap<String, String>,
    pub duration_ms: u64,
}

impl SearchReport {
    pub fn best(&self) -> Option<&ScoredCandidate> {
        self.outcome.best()
    }
}

/// Fans searches out to every provider and funnels the hits through the
/// result filter.
pub struct SearchCoordinator {
    providers: Vec<Arc<dyn SearchProvider>>,
    metadata: Arc<dyn ShowMetadata>,
    filter: ResultFilter,
    timeout: Duration,
}

impl SearchCoordinator {
    pub fn new(metadata: Arc<dyn ShowMetadata>, filter: ResultFilter) -> Self {
        let timeout = Duration::from_secs(filter.policy().provider_timeout_secs);
        Self {
            providers: Vec::new(),
            metadata,
            filter,
            timeout,
        }
    }

    /// Add a search provider.
    pub fn with_provider(mut self, provider: Arc<dyn SearchProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Override the per-provider timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name()).collect()
    }

    /// Search for a single episode of `show`.
    pub async fn search_episode(
        &self,
        show: &str,
        season: u32,
        episode: u32,
    ) -> Result<SearchReport, SearchError> {
        let defaults = self.metadata.naming_defaults(show).await?;
        let mut ep = self.metadata.episode(show, season, episode).await?;
        ep.air_by_date = defaults.air_by_date;
        ep.sports = defaults.is_sports;
        ep.is_anime = defaults.is_anime;

        let show_names: Vec<String> = std::iter::once(show.to_string())
            .chain(defaults.aliases.iter().cloned())
            .collect();

        let numbering = if ep.air_by_date || ep.sports {
            WantedNumbering::AirDate { date: ep.air_date }
        } else if ep.is_anime && ep.absolute_number > 0 {
            WantedNumbering::Absolute {
                numbers: vec![ep.absolute_number],
            }
        } else {
            WantedNumbering::Season {
                season: ep.season,
                episodes: vec![ep.episode],
            }
        };
        let wanted = WantedEpisode {
            show_names: show_names.clone(),
            numbering,
            qualities: Vec::new(),
            anime: ep.is_anime,
        };

        let queries = episode_search_strings(&show_names, &ep);
        self.search(wanted, queries, false).await
    }

    /// Search for a whole season of `show`.
    pub async fn search_season(&self, show: &str, season: u32) -> Result<SearchReport, SearchError> {
        let defaults = self.metadata.naming_defaults(show).await?;
        let show_names: Vec<String> = std::iter::once(show.to_string())
            .chain(defaults.aliases.iter().cloned())
            .collect();
        let wanted = WantedEpisode {
            show_names: show_names.clone(),
            numbering: WantedNumbering::Season {
                season,
                episodes: Vec::new(),
            },
            qualities: Vec::new(),
            anime: defaults.is_anime,
        };
        let queries = season_search_strings(&show_names, season);
        self.search(wanted, queries, true).await
    }

    /// Run `queries` on every provider concurrently and filter the hits
    /// against `wanted`. Failing providers are reported, not fatal, unless
    /// every provider fails.
    pub async fn search(
        &self,
        wanted: WantedEpisode,
        queries: Vec<String>,
        season_search: bool,
    ) -> Result<SearchReport, SearchError> {
        let start = Instant::now();
        let providers: Vec<&Arc<dyn SearchProvider>> = self
            .providers
            .iter()
            .filter(|p| !season_search || p.capabilities().season_search)
            .collect();
        if providers.is_empty() {
            return Err(SearchError::NoProviders);
        }

        let searches = providers.iter().map(|provider| {
            let queries = &queries;
            async move {
                let started = Instant::now();
                let result = match tokio::time::timeout(self.timeout, provider.search(queries)).await {
                    Ok(result) => result,
                    Err(_) => Err(ProviderError::Timeout),
                };
                let label = match &result {
                    Ok(_) => "ok",
                    Err(ProviderError::Timeout) => "timeout",
                    Err(_) => "error",
                };
                PROVIDER_SEARCH_DURATION
                    .with_label_values(&[provider.name(), label])
                    .observe(started.elapsed().as_secs_f64());
                (provider, result)
            }
        });
        let results = join_all(searches).await;

        let mut provider_errors = HashMap::new();
        let mut candidates = Vec::new();
        for (provider, result) in results {
            match result {
                Ok(mut hits) => {
                    debug!(provider = %provider.name(), hits = hits.len(), "Provider returned results");
                    for hit in &mut hits {
                        if hit.provider.is_empty() {
                            hit.provider = provider.name().to_string();
                        }
                    }
                    candidates.extend(self.filter.evaluate(hits, &wanted, &provider.capabilities()));
                }
                Err(e) => {
                    warn!(provider = %provider.name(), error = %e, "Provider search failed");
                    provider_errors.insert(provider.name().to_string(), e.to_string());
                }
            }
        }

        if provider_errors.len() == providers.len() {
            return Err(SearchError::AllProvidersFailed(provider_errors));
        }

        let outcome = self.filter.finish(candidates);
        let duration_ms = start.elapsed().as_millis() as u64;
        info!(
            queries = ?queries,
            accepted = outcome.accepted.len(),
            rejected = outcome.rejected.len(),
            failed_providers = provider_errors.len(),
            duration_ms,
            "Search completed"
        );

        Ok(SearchReport {
            wanted,
            queries,
            outcome,
            provider_errors,
            duration_ms,
        })
    }
}
