use super::{types::Config, ConfigError};
use crate::filter::WordFilter;
use crate::naming::{
    check_valid_abd_naming, check_valid_naming, check_valid_sports_naming, AnimeNumbering,
};
use crate::quality::Quality;

/// Validate configuration
/// Currently validates:
/// - Server port is not 0
/// - Naming patterns round-trip through the parser
/// - Quality preference is non-empty and never lists `unknown`
/// - Word filters compile
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    // Server validation
    if config.server.port == 0 {
        return Err(ConfigError::ValidationError(
            "server.port cannot be 0".to_string(),
        ));
    }

    // Naming validation
    let naming = &config.naming;
    if !check_valid_naming(&naming.pattern, naming.multi_ep_style, AnimeNumbering::Standard) {
        return Err(ConfigError::ValidationError(format!(
            "naming.pattern `{}` does not produce parseable names",
            naming.pattern
        )));
    }
    if naming.custom_anime
        && !check_valid_naming(&naming.anime_pattern, naming.multi_ep_style, naming.anime_numbering)
    {
        return Err(ConfigError::ValidationError(format!(
            "naming.anime_pattern `{}` does not produce parseable names",
            naming.anime_pattern
        )));
    }
    if naming.custom_abd && !check_valid_abd_naming(&naming.abd_pattern) {
        return Err(ConfigError::ValidationError(format!(
            "naming.abd_pattern `{}` does not produce parseable air dates",
            naming.abd_pattern
        )));
    }
    if naming.custom_sports && !check_valid_sports_naming(&naming.sports_pattern) {
        return Err(ConfigError::ValidationError(format!(
            "naming.sports_pattern `{}` does not produce parseable air dates",
            naming.sports_pattern
        )));
    }

    // Search validation
    let search = &config.search;
    if search.quality_preference.is_empty() {
        return Err(ConfigError::ValidationError(
            "search.quality_preference cannot be empty".to_string(),
        ));
    }
    if search.quality_preference.contains(&Quality::Unknown) {
        return Err(ConfigError::ValidationError(
            "search.quality_preference cannot contain unknown".to_string(),
        ));
    }
    WordFilter::new(&search.ignore_words, &search.require_words)
        .map_err(|e| ConfigError::ValidationError(format!("search: {}", e)))?;

    Ok(())
}
