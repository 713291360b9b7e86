//! Episode naming patterns.
//!
//! A pattern is a template such as `%SN - S%0SE%0E - %EN` whose `%` tokens
//! are replaced with values from an [`EpisodeContext`]. `/` splits the
//! rendered result into folders and a file name. Patterns are validated by
//! rendering a fixed sample episode and parsing the result back with the
//! release-name parser.

mod compiler;
mod legacy;
mod presets;
mod tokens;
mod types;
mod validate;

pub use compiler::{render, NameRenderer};
pub use legacy::{derive_legacy_pattern, LegacyNamingSettings};
pub use presets::{NAME_ABD_PRESETS, NAME_ANIME_PRESETS, NAME_PRESETS, NAME_SPORTS_PRESETS};
pub use tokens::{combined_episode_name, sanitize_filename, sanitize_scene_name, ReplaceMap};
pub use types::{AnimeNumbering, EpisodeContext, MultiEpStyle, RenderedName};
pub use validate::{
    check_force_season_folders, check_valid_abd_naming, check_valid_naming,
    check_valid_sports_naming, generate_sample_ep, test_name, validate, validate_detailed,
    ValidateOptions, ValidationFailure,
};
