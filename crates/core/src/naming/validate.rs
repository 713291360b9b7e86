//! Round-trip checks for naming patterns: render a sample episode, parse the
//! result back and compare the numbering.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use super::compiler::NameRenderer;
use super::types::{AnimeNumbering, EpisodeContext, MultiEpStyle, RenderedName};
use crate::metrics::NAMING_VALIDATIONS;
use crate::parser::{NameParser, ParseError};
use crate::quality::Quality;

/// Why a pattern does not survive a render/parse round trip.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("pattern `{0}` renders to an empty name")]
    EmptyName(String),

    #[error("unable to parse `{name}`: {source}")]
    Unparseable {
        name: String,
        #[source]
        source: ParseError,
    },

    #[error("air date parsed as {found:?}, expected {expected}")]
    AirDateMismatch {
        expected: NaiveDate,
        found: Option<NaiveDate>,
    },

    #[error("season parsed as {found:?}, expected {expected}")]
    SeasonMismatch { expected: u32, found: Option<u32> },

    #[error("episodes parsed as {found:?}, expected {expected:?}")]
    EpisodeMismatch { expected: Vec<u32>, found: Vec<u32> },

    #[error("absolute numbers parsed as {found:?}, expected {expected:?}")]
    AbsoluteMismatch { expected: Vec<u32>, found: Vec<u32> },
}

impl ValidationFailure {
    /// Short label used for metrics and API responses.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidationFailure::EmptyName(_) => "empty_name",
            ValidationFailure::Unparseable { .. } => "unparseable",
            ValidationFailure::AirDateMismatch { .. } => "air_date_mismatch",
            ValidationFailure::SeasonMismatch { .. } => "season_mismatch",
            ValidationFailure::EpisodeMismatch { .. } => "episode_mismatch",
            ValidationFailure::AbsoluteMismatch { .. } => "absolute_mismatch",
        }
    }
}

/// Which kind of sample episode to validate a pattern against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Validate a three-episode file joined with this style.
    pub multi: Option<MultiEpStyle>,
    /// `None` means standard numbering.
    pub anime_type: Option<AnimeNumbering>,
    /// Ignore the directory part of the pattern.
    pub file_only: bool,
    pub air_by_date: bool,
    pub sports: bool,
}

impl ValidateOptions {
    fn uses_absolute(&self) -> bool {
        self.anime_type.is_some_and(AnimeNumbering::uses_absolute)
    }
}

/// Build the fixed sample episode used to test patterns.
pub fn generate_sample_ep(opts: &ValidateOptions) -> EpisodeContext {
    let anime = opts.uses_absolute();
    let mut ep = EpisodeContext::new("Show Name", 2, 3, "Ep Name");
    ep.absolute_number = 3;
    ep.scene_absolute_number = 3;
    ep.air_date = NaiveDate::from_ymd_opt(2011, 3, 9).unwrap_or_default();
    ep.quality = Quality::HdTv;
    ep.is_proper = true;
    ep.version = 2;
    ep.air_by_date = opts.air_by_date;
    ep.sports = opts.sports;
    ep.is_anime = anime;

    ep.release_name = if opts.air_by_date || opts.sports {
        "Show.Name.2011.03.09.HDTV.XviD-RLSGROUP"
    } else if anime {
        "Show.Name.003.HDTV.XviD-RLSGROUP"
    } else {
        "Show.Name.S02E03.HDTV.XviD-RLSGROUP"
    }
    .to_string();

    if opts.multi.is_some() {
        ep.name = "Ep Name (1)".to_string();
        ep.release_name = if anime {
            "Show.Name.003-005.HDTV.XviD-RLSGROUP"
        } else {
            "Show.Name.S02E03E04E05.HDTV.XviD-RLSGROUP"
        }
        .to_string();
        for (number, name) in [(4, "Ep Name (2)"), (5, "Ep Name (3)")] {
            let mut other = ep.clone();
            other.related.clear();
            other.episode = number;
            other.scene_episode = number;
            other.absolute_number = number;
            other.scene_absolute_number = number;
            other.name = name.to_string();
            ep.related.push(other);
        }
    }
    ep
}

fn renderer(opts: &ValidateOptions) -> NameRenderer {
    NameRenderer::new(
        opts.multi.unwrap_or_default(),
        opts.anime_type.unwrap_or_default(),
    )
}

/// Render `pattern` for the sample episode described by `opts`.
pub fn test_name(pattern: &str, opts: &ValidateOptions) -> RenderedName {
    let ep = generate_sample_ep(opts);
    renderer(opts).render(pattern, &ep)
}

/// Check that `pattern` round-trips, reporting the first mismatch.
pub fn validate_detailed(pattern: &str, opts: &ValidateOptions) -> Result<(), ValidationFailure> {
    let sample = generate_sample_ep(opts);
    let rendered = renderer(opts).render(pattern, &sample);
    if rendered.filename.trim().is_empty() {
        return Err(ValidationFailure::EmptyName(pattern.to_string()));
    }

    let file = format!("{}.mkv", rendered.filename);
    let name = if opts.file_only || rendered.directory.is_empty() {
        file
    } else {
        format!("{}/{}", rendered.directory, file)
    };
    debug!(name = %name, "Trying to parse rendered sample");

    let parser = if opts.uses_absolute() {
        NameParser::anime()
    } else {
        NameParser::standard()
    };
    let parsed = parser
        .parse(&name)
        .map_err(|source| ValidationFailure::Unparseable {
            name: name.clone(),
            source,
        })?;

    if opts.air_by_date || opts.sports {
        if parsed.air_date() != Some(sample.air_date) {
            return Err(ValidationFailure::AirDateMismatch {
                expected: sample.air_date,
                found: parsed.air_date(),
            });
        }
        return Ok(());
    }

    if opts.uses_absolute() && !parsed.absolute_numbers().is_empty() {
        let expected = sample.absolute_numbers();
        if parsed.absolute_numbers() != expected.as_slice() {
            return Err(ValidationFailure::AbsoluteMismatch {
                expected,
                found: parsed.absolute_numbers().to_vec(),
            });
        }
        return Ok(());
    }

    if parsed.season_number() != Some(sample.season) {
        return Err(ValidationFailure::SeasonMismatch {
            expected: sample.season,
            found: parsed.season_number(),
        });
    }
    let expected = sample.episode_numbers();
    if parsed.episode_numbers() != expected.as_slice() {
        return Err(ValidationFailure::EpisodeMismatch {
            expected,
            found: parsed.episode_numbers().to_vec(),
        });
    }
    Ok(())
}

/// `true` when `pattern` round-trips. Failures are logged, never returned.
pub fn validate(pattern: &str, opts: &ValidateOptions) -> bool {
    match validate_detailed(pattern, opts) {
        Ok(()) => {
            NAMING_VALIDATIONS.with_label_values(&["valid"]).inc();
            true
        }
        Err(failure) => {
            NAMING_VALIDATIONS.with_label_values(&["invalid"]).inc();
            debug!(pattern = %pattern, reason = failure.kind(), error = %failure, "Naming pattern is not valid");
            false
        }
    }
}

/// Whether `pattern` works for single and multi-episode files.
pub fn check_valid_naming(pattern: &str, multi: MultiEpStyle, anime_type: AnimeNumbering) -> bool {
    debug!(pattern = %pattern, "Checking whether the pattern is valid");
    let single = ValidateOptions {
        anime_type: Some(anime_type),
        ..Default::default()
    };
    let multiple = ValidateOptions {
        multi: Some(multi),
        ..single
    };
    validate(pattern, &single) && validate(pattern, &multiple)
}

/// Whether `pattern` works for air-by-date shows.
pub fn check_valid_abd_naming(pattern: &str) -> bool {
    validate(
        pattern,
        &ValidateOptions {
            air_by_date: true,
            ..Default::default()
        },
    )
}

/// Whether `pattern` works for sports shows.
pub fn check_valid_sports_naming(pattern: &str) -> bool {
    validate(
        pattern,
        &ValidateOptions {
            sports: true,
            ..Default::default()
        },
    )
}

/// `true` when the file name alone loses the numbering, so season folders
/// have to be kept on.
pub fn check_force_season_folders(pattern: &str, multi: MultiEpStyle, anime_type: AnimeNumbering) -> bool {
    let file_only = ValidateOptions {
        anime_type: Some(anime_type),
        file_only: true,
        ..Default::default()
    };
    let multiple = ValidateOptions {
        multi: Some(multi),
        ..file_only
    };
    !(validate(pattern, &file_only) && validate(pattern, &multiple))
}
