//! Episode search.
//!
//! Providers and show metadata are collaborators behind the
//! [`SearchProvider`] and [`ShowMetadata`] traits. The [`SearchCoordinator`]
//! builds search strings, queries all providers concurrently and hands every
//! hit to the result filter.

mod coordinator;
mod query;
mod traits;

pub use coordinator::{SearchCoordinator, SearchReport};
pub use query::{
    episode_numbering, episode_search_strings, scene_show_names, season_search_strings, url_encode,
};
pub use traits::{
    MetadataError, ProviderError, SearchError, SearchProvider, ShowMetadata, ShowNamingDefaults,
};
