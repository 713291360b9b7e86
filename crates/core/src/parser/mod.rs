//! Release name parser.
//!
//! Turns scene, P2P, and anime release names (or file paths) into a
//! [`ParsedRelease`]: show name, episode numbering, quality, release group,
//! and proper/version flags.

mod clean;
mod numbering;
mod types;

pub use clean::{clean_series_name, remove_extension, DEFAULT_JUNK_SUFFIXES};
pub use types::{Numbering, ParseError, ParsedRelease};

use once_cell::sync::Lazy;
use regex_lite::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::metrics::RELEASES_PARSED;
use crate::quality::Quality;
use clean::{junk_suffix_regex, split_path, split_release_group, strip_junk};
use numbering::{detect, Detection};

static PROPER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|[\W_])(?:proper|repack)(?:$|[\W_])").unwrap());

static ANIME_GROUP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[([^\]]+)\][ ._-]*(.*)$").unwrap());

static RELEASE_MARKER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)^(?:\d{3,4}[pi]|\d{3,4}x\d{3,4}|hdtv|pdtv|sdtv|dsr|hr|ws|web|webrip|web-?dl|blu-?ray|bd|bdrip|brrip|dvd|dvdrip|hddvd|remux|itunes|xvid|divx|[xh]26[45]|hevc|avc|aac|ac3|proper|repack|real|internal|limited|multi|subbed|dubbed|uncut|extended)$",
    )
    .unwrap()
});

/// Parser behaviour switches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Parse with anime conventions: leading `[Group]` tags and absolute
    /// numbering take precedence.
    pub anime: bool,
    /// Extra trailing junk words to strip, on top of the built-in list.
    pub junk_suffixes: Vec<String>,
    /// Treat anime releases of undetectable quality as HDTV.
    pub anime_unknown_as_hdtv: bool,
}

/// Parses release names.
///
/// Construction compiles the junk-word matcher once; parsing is read-only, so
/// a parser can be shared freely between tasks.
#[derive(Debug, Clone)]
pub struct NameParser {
    config: ParserConfig,
    junk: Regex,
}

/// What a single path component yielded.
#[derive(Debug, Clone)]
struct Component {
    numbering: Numbering,
    series_name: Option<String>,
    release_group: Option<String>,
    extra_info: Option<String>,
    episode_name: Option<String>,
    quality: Quality,
    is_proper: bool,
    version: Option<u32>,
}

impl NameParser {
    pub fn new(config: ParserConfig) -> Self {
        let junk = junk_suffix_regex(&config.junk_suffixes);
        Self { config, junk }
    }

    /// A parser for regular (non-anime) shows.
    pub fn standard() -> Self {
        Self::new(ParserConfig::default())
    }

    /// A parser using anime conventions.
    pub fn anime() -> Self {
        Self::new(ParserConfig {
            anime: true,
            ..ParserConfig::default()
        })
    }

    pub fn is_anime(&self) -> bool {
        self.config.anime
    }

    pub fn config(&self) -> &ParserConfig {
        &self.config
    }

    /// Parse a release name or file path.
    ///
    /// For paths, the file name and its parent directory are both parsed and
    /// the results combined: numbering and quality prefer the file, naming
    /// details prefer the directory.
    pub fn parse(&self, name: &str) -> Result<ParsedRelease, ParseError> {
        let result = self.parse_inner(name);
        let outcome = match &result {
            Ok(_) => "ok",
            Err(ParseError::Empty) => "empty",
            Err(ParseError::NoNumbering(_)) => "no_numbering",
            Err(ParseError::InvalidDate { .. }) => "invalid_date",
        };
        RELEASES_PARSED.with_label_values(&[outcome]).inc();

        match &result {
            Ok(parsed) => debug!(
                name = %name,
                numbering = ?parsed.numbering,
                quality = %parsed.quality,
                "Parsed release name"
            ),
            Err(e) => debug!(name = %name, error = %e, "Release name not parsed"),
        }
        result
    }

    fn parse_inner(&self, name: &str) -> Result<ParsedRelease, ParseError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ParseError::Empty);
        }

        let (file, dir) = split_path(trimmed);
        let file_result = self.parse_component(file);
        let dir_result = dir.map(|dir| self.parse_component(dir));

        let component = match (file_result, dir_result) {
            (Ok(file), Some(Ok(dir))) => combine(file, dir),
            (Ok(file), _) => file,
            (Err(_), Some(Ok(dir))) => dir,
            (Err(e), _) => return Err(e),
        };

        let version = component
            .version
            .unwrap_or(if component.is_proper { 2 } else { 1 });
        let show_name_tokens = component
            .series_name
            .as_deref()
            .map(|s| s.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        Ok(ParsedRelease {
            original_name: name.to_string(),
            series_name: component.series_name,
            show_name_tokens,
            numbering: component.numbering,
            quality: component.quality,
            is_proper: component.is_proper,
            version,
            release_group: component.release_group,
            extra_info: component.extra_info,
            episode_name: component.episode_name,
        })
    }

    fn parse_component(&self, raw: &str) -> Result<Component, ParseError> {
        let anime = self.config.anime;
        let raw = raw.trim();
        if raw.is_empty() {
            return Err(ParseError::Empty);
        }
        let name = remove_extension(raw);
        let stripped = strip_junk(name, &self.junk, anime);

        let (bracket_group, body) = match ANIME_GROUP.captures(&stripped) {
            Some(caps) if anime => (
                caps.get(1).map(|m| m.as_str().trim().to_string()),
                caps.get(2).map_or("", |m| m.as_str()).to_string(),
            ),
            _ => (None, stripped.clone()),
        };
        let body = body.trim_matches(|c: char| matches!(c, ' ' | '.' | '_' | '-'));

        let found = match detect(body, anime) {
            Detection::Found(found) => found,
            Detection::InvalidDate(bad) => {
                return Err(ParseError::InvalidDate {
                    name: raw.to_string(),
                    year: bad.year,
                    month: bad.month,
                    day: bad.day,
                });
            }
            Detection::Nothing => return Err(ParseError::NoNumbering(raw.to_string())),
        };

        let series_name = Some(clean_series_name(&body[..found.start])).filter(|s| !s.is_empty());
        let tail = body[found.end..]
            .trim_start_matches(|c: char| matches!(c, ' ' | '.' | '_' | '-' | ']' | ')'));

        let (extra_info, release_group) = match bracket_group {
            Some(group) => {
                let extra = tail.trim();
                ((!extra.is_empty()).then(|| extra.to_string()), Some(group))
            }
            None => split_release_group(tail),
        };
        let episode_name = extra_info.as_deref().and_then(guess_episode_name);

        let mut quality = Quality::from_name(raw, anime);
        if anime && self.config.anime_unknown_as_hdtv && quality == Quality::Unknown {
            quality = Quality::HdTv;
        }

        Ok(Component {
            numbering: found.numbering,
            series_name,
            release_group: release_group.filter(|g| !g.is_empty()),
            extra_info,
            episode_name,
            quality,
            is_proper: PROPER.is_match(&stripped),
            version: found.version,
        })
    }
}

/// Remove a media extension and trailing junk tags from a release name,
/// leaving the release group in place.
pub fn strip_non_release_groups(name: &str, anime: bool) -> String {
    static DEFAULT_JUNK: Lazy<Regex> = Lazy::new(|| junk_suffix_regex::<&str>(&[]));
    strip_junk(remove_extension(name.trim()), &DEFAULT_JUNK, anime)
}

impl Default for NameParser {
    fn default() -> Self {
        Self::standard()
    }
}

fn combine(file: Component, dir: Component) -> Component {
    Component {
        numbering: file.numbering,
        series_name: dir.series_name.or(file.series_name),
        release_group: dir.release_group.or(file.release_group),
        extra_info: dir.extra_info.or(file.extra_info),
        episode_name: file.episode_name.or(dir.episode_name),
        quality: if file.quality == Quality::Unknown {
            dir.quality
        } else {
            file.quality
        },
        is_proper: file.is_proper || dir.is_proper,
        version: file.version.or(dir.version),
    }
}

/// The words of the extra info up to the first quality, codec, or release
/// marker.
fn guess_episode_name(extra: &str) -> Option<String> {
    let words: Vec<&str> = extra
        .split(['.', ' ', '_'])
        .filter(|w| !w.is_empty() && *w != "-")
        .take_while(|w| !w.starts_with(['[', '(']) && !RELEASE_MARKER.is_match(w))
        .collect();
    (!words.is_empty()).then(|| words.join(" "))
}
