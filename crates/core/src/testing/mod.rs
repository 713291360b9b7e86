//! Testing utilities and mock implementations.
//!
//! This module provides mock implementations of the search collaborator
//! traits, allowing search tests without real providers or metadata sources.
//!
//! # Example
//!
//! ```rust,ignore
//! use sickle_core::testing::{MockProvider, MockShowMetadata, fixtures};
//!
//! let provider = MockProvider::new("tracker");
//! let metadata = MockShowMetadata::new();
//!
//! // Configure mock responses
//! metadata.add_show("Show Name", Default::default()).await;
//! metadata.add_episode(fixtures::sample_episode()).await;
//! provider.set_results(vec![/* hits */]).await;
//!
//! // Use in a SearchCoordinator...
//! ```

mod mock_provider;
mod mock_show_metadata;

pub use mock_provider::{MockProvider, RecordedSearch};
pub use mock_show_metadata::MockShowMetadata;

/// Test fixtures and helper functions.
pub mod fixtures {
    use chrono::NaiveDate;

    use crate::filter::{SearchHit, WantedEpisode, WantedNumbering};
    use crate::naming::EpisodeContext;
    use crate::quality::Quality;

    /// Create a search hit with reasonable defaults.
    pub fn search_hit(title: &str, seeders: u32) -> SearchHit {
        let mut hit = SearchHit::new(
            title,
            format!("magnet:?xt=urn:btih:{}", title.to_lowercase().replace('.', "")),
        )
        .with_peers(seeders, 2);
        hit.size_bytes = Some(1024 * 1024 * 350); // 350 MB
        hit
    }

    /// Show Name 2x03 "Ep Name", aired 2011-03-09, absolute number 3.
    pub fn sample_episode() -> EpisodeContext {
        let mut ep = EpisodeContext::new("Show Name", 2, 3, "Ep Name");
        ep.absolute_number = 3;
        ep.scene_absolute_number = 3;
        ep.air_date = NaiveDate::from_ymd_opt(2011, 3, 9).unwrap_or_default();
        ep.quality = Quality::HdTv;
        ep.release_name = "Show.Name.S02E03.HDTV.XviD-RLSGROUP".to_string();
        ep
    }

    /// The sample episode with episodes 4 and 5 in the same file.
    pub fn multi_episode() -> EpisodeContext {
        let mut ep = sample_episode();
        for number in [4, 5] {
            let mut related = EpisodeContext::new("Show Name", 2, number, format!("Ep Name ({})", number - 2));
            related.absolute_number = number;
            related.scene_absolute_number = number;
            related.air_date = ep.air_date;
            related.quality = ep.quality;
            ep.related.push(related);
        }
        ep.name = "Ep Name (1)".to_string();
        ep
    }

    /// The sample episode of an anime show.
    pub fn anime_episode() -> EpisodeContext {
        let mut ep = sample_episode();
        ep.is_anime = true;
        ep.release_name = "[RlsGroup] Show Name - 003 [720p]".to_string();
        ep
    }

    /// A wanted single episode.
    pub fn wanted_episode(show: &str, season: u32, episode: u32) -> WantedEpisode {
        WantedEpisode {
            show_names: vec![show.to_string()],
            numbering: WantedNumbering::Season {
                season,
                episodes: vec![episode],
            },
            qualities: Vec::new(),
            anime: false,
        }
    }

    /// A wanted whole season.
    pub fn wanted_season(show: &str, season: u32) -> WantedEpisode {
        WantedEpisode {
            show_names: vec![show.to_string()],
            numbering: WantedNumbering::Season {
                season,
                episodes: Vec::new(),
            },
            qualities: Vec::new(),
            anime: false,
        }
    }
}
