//! Mock show metadata source for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::naming::EpisodeContext;
use crate::search::{MetadataError, ShowMetadata, ShowNamingDefaults};

/// Mock implementation of the ShowMetadata trait.
///
/// Shows must be registered with [`MockShowMetadata::add_show`] before their
/// episodes can be looked up.
pub struct MockShowMetadata {
    /// Naming defaults by lowercased show name.
    shows: Arc<RwLock<HashMap<String, ShowNamingDefaults>>>,
    /// Episodes by (lowercased show name, season, episode).
    episodes: Arc<RwLock<HashMap<(String, u32, u32), EpisodeContext>>>,
    /// If set, the next lookup will fail with this error.
    next_error: Arc<RwLock<Option<MetadataError>>>,
}

impl std::fmt::Debug for MockShowMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MockShowMetadata")
            .field("shows", &"<shows>")
            .field("episodes", &"<episodes>")
            .field("next_error", &"<next_error>")
            .finish()
    }
}

impl Default for MockShowMetadata {
    fn default() -> Self {
        Self::new()
    }
}

impl MockShowMetadata {
    pub fn new() -> Self {
        Self {
            shows: Arc::new(RwLock::new(HashMap::new())),
            episodes: Arc::new(RwLock::new(HashMap::new())),
            next_error: Arc::new(RwLock::new(None)),
        }
    }

    /// Register a show.
    pub async fn add_show(&self, show: &str, defaults: ShowNamingDefaults) {
        self.shows.write().await.insert(show.to_lowercase(), defaults);
    }

    /// Register an episode under its show name and indexer numbering.
    pub async fn add_episode(&self, episode: EpisodeContext) {
        let key = (
            episode.show_name.to_lowercase(),
            episode.season,
            episode.episode,
        );
        self.episodes.write().await.insert(key, episode);
    }

    /// Make the next lookup fail.
    pub async fn set_next_error(&self, error: MetadataError) {
        *self.next_error.write().await = Some(error);
    }

    async fn take_error(&self) -> Option<MetadataError> {
        self.next_error.write().await.take()
    }
}

#[async_trait]
impl ShowMetadata for MockShowMetadata {
    async fn naming_defaults(&self, show: &str) -> Result<ShowNamingDefaults, MetadataError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        self.shows
            .read()
            .await
            .get(&show.to_lowercase())
            .cloned()
            .ok_or_else(|| MetadataError::ShowNotFound(show.to_string()))
    }

    async fn episode(
        &self,
        show: &str,
        season: u32,
        episode: u32,
    ) -> Result<EpisodeContext, MetadataError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        self.episodes
            .read()
            .await
            .get(&(show.to_lowercase(), season, episode))
            .cloned()
            .ok_or_else(|| MetadataError::EpisodeNotFound {
                show: show.to_string(),
                season,
                episode,
            })
    }
}
