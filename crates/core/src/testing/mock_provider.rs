//! Mock search provider for testing.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::filter::{ProviderCapabilities, SearchHit};
use crate::search::{ProviderError, SearchProvider};

/// A recorded search for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedSearch {
    /// The search strings that were sent.
    pub queries: Vec<String>,
    /// When the search was made.
    pub timestamp: Instant,
}

/// Mock implementation of the SearchProvider trait.
///
/// Provides controllable behavior for testing:
/// - Return configurable hits
/// - Track search strings for assertions
/// - Simulate failures and slow responses
///
/// # Example
///
/// ```rust,ignore
/// use sickle_core::testing::{MockProvider, fixtures};
///
/// let provider = MockProvider::new("tracker");
/// provider.set_results(vec![
///     fixtures::search_hit("Show.Name.S02E03.720p.HDTV.x264-GRP", 20),
/// ]).await;
///
/// let hits = provider.search(&["Show.Name.S02E03".to_string()]).await?;
/// assert_eq!(hits.len(), 1);
/// assert_eq!(provider.search_count().await, 1);
/// ```
pub struct MockProvider {
    name: String,
    capabilities: ProviderCapabilities,
    /// Configured hits to return.
    results: Arc<RwLock<Vec<SearchHit>>>,
    /// Recorded searches.
    searches: Arc<RwLock<Vec<RecordedSearch>>>,
    /// If set, the next search will fail with this error.
    next_error: Arc<RwLock<Option<ProviderError>>>,
    /// If set, every search fails with a connection error.
    always_fail: Arc<RwLock<Option<String>>>,
    /// Delay before answering.
    delay: Arc<RwLock<Option<Duration>>>,
}

impl std::fmt::Debug for MockProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockProvider")
            .field("name", &self.name)
            .field("capabilities", &self.capabilities)
            .field("results", &"<results>")
            .field("searches", &"<searches>")
            .field("next_error", &"<next_error>")
            .field("delay", &"<delay>")
            .finish()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new("mock")
    }
}

impl MockProvider {
    /// Create a new mock provider with no hits.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            capabilities: ProviderCapabilities::default(),
            results: Arc::new(RwLock::new(Vec::new())),
            searches: Arc::new(RwLock::new(Vec::new())),
            next_error: Arc::new(RwLock::new(None)),
            always_fail: Arc::new(RwLock::new(None)),
            delay: Arc::new(RwLock::new(None)),
        }
    }

    /// Create a mock provider with predefined hits.
    pub fn with_results(name: impl Into<String>, results: Vec<SearchHit>) -> Self {
        let provider = Self::new(name);
        *provider.results.blocking_write() = results;
        provider
    }

    /// Override the reported capabilities.
    pub fn with_capabilities(mut self, capabilities: ProviderCapabilities) -> Self {
        self.capabilities = capabilities;
        self
    }

    /// Set the hits returned by searches.
    pub async fn set_results(&self, results: Vec<SearchHit>) {
        *self.results.write().await = results;
    }

    /// Add a hit to the results.
    pub async fn add_result(&self, hit: SearchHit) {
        self.results.write().await.push(hit);
    }

    /// Make the next search fail.
    pub async fn set_next_error(&self, error: ProviderError) {
        *self.next_error.write().await = Some(error);
    }

    /// Make every search fail until cleared.
    pub async fn set_always_fail(&self, message: Option<String>) {
        *self.always_fail.write().await = message;
    }

    /// Delay every answer by `delay`.
    pub async fn set_delay(&self, delay: Option<Duration>) {
        *self.delay.write().await = delay;
    }

    /// Get all recorded searches.
    pub async fn recorded_searches(&self) -> Vec<RecordedSearch> {
        self.searches.read().await.clone()
    }

    /// Number of searches made.
    pub async fn search_count(&self) -> usize {
        self.searches.read().await.len()
    }

    /// Clear recorded searches.
    pub async fn clear_searches(&self) {
        self.searches.write().await.clear();
    }
}

#[async_trait]
impl SearchProvider for MockProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn capabilities(&self) -> ProviderCapabilities {
        self.capabilities
    }

    async fn search(&self, queries: &[String]) -> Result<Vec<SearchHit>, ProviderError> {
        self.searches.write().await.push(RecordedSearch {
            queries: queries.to_vec(),
            timestamp: Instant::now(),
        });

        let delay = *self.delay.read().await;
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if let Some(err) = self.next_error.write().await.take() {
            return Err(err);
        }
        if let Some(message) = self.always_fail.read().await.clone() {
            return Err(ProviderError::ConnectionFailed(message));
        }

        Ok(self.results.read().await.clone())
    }
}
