use sickle_core::filter::{ResultFilter, WordFilterError};
use sickle_core::{Config, NameParser, ParserConfig};

/// Shared application state
pub struct AppState {
    config: Config,
    parser: NameParser,
    anime_parser: NameParser,
    filter: ResultFilter,
}

impl AppState {
    /// Build the state from a validated config. Fails only if the word
    /// filters do not compile.
    pub fn new(config: Config) -> Result<Self, WordFilterError> {
        let filter = ResultFilter::new(&config.search, &config.parser)?;
        let parser = NameParser::new(ParserConfig {
            anime: false,
            ..config.parser.clone()
        });
        let anime_parser = NameParser::new(ParserConfig {
            anime: true,
            ..config.parser.clone()
        });
        Ok(Self {
            config,
            parser,
            anime_parser,
            filter,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn parser(&self, anime: bool) -> &NameParser {
        if anime {
            &self.anime_parser
        } else {
            &self.parser
        }
    }

    pub fn filter(&self) -> &ResultFilter {
        &self.filter
    }
}
