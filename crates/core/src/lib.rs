pub mod config;
pub mod filter;
pub mod metrics;
pub mod naming;
pub mod parser;
pub mod quality;
pub mod regex_atom;
pub mod search;
pub mod testing;

pub use config::{
    load_config, load_config_from_str, validate_config, Config, ConfigError, NamingConfig,
    SearchConfig, ServerConfig,
};
pub use filter::{FilterOutcome, ResultFilter, ScoredCandidate, SearchHit, WantedEpisode};
pub use naming::{EpisodeContext, MultiEpStyle, AnimeNumbering, NameRenderer, RenderedName};
pub use parser::{NameParser, ParseError, ParsedRelease, ParserConfig};
pub use quality::Quality;
pub use search::{SearchCoordinator, SearchError, SearchProvider, SearchReport, ShowMetadata};
