//! Naming token values and substitution.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use super::types::EpisodeContext;
use crate::parser::{strip_non_release_groups, NameParser};

static MULTI_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(.*) \(\d{1,2}\)").unwrap());
static TRAILING_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\d+\)$").unwrap());
static REPEATED_DOTS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\.+").unwrap());
static FILENAME_SLASHES: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\\/*]").unwrap());
static FILENAME_FORBIDDEN: Lazy<Regex> = Lazy::new(|| Regex::new(r#"[:"<>|?]"#).unwrap());

static STANDARD_PARSER: Lazy<NameParser> = Lazy::new(NameParser::standard);
static ANIME_PARSER: Lazy<NameParser> = Lazy::new(NameParser::anime);

/// Dotted scene form of a name: `Show Name: Part 2!` becomes `Show.Name.Part.2`.
pub fn sanitize_scene_name(name: &str) -> String {
    if name.is_empty() {
        return String::new();
    }
    let mut out: String = name
        .chars()
        .filter(|c| !matches!(c, ',' | ':' | '(' | ')' | '£' | '\'' | '!' | '?' | '\u{2019}'))
        .collect();
    out = out
        .replace("- ", ".")
        .replace(' ', ".")
        .replace('&', "and")
        .replace('/', ".");
    out = REPEATED_DOTS.replace_all(&out, ".").into_owned();
    if out.ends_with('.') {
        out.pop();
    }
    out
}

/// Make a value safe to use inside a file name.
pub fn sanitize_filename(name: &str) -> String {
    let name = FILENAME_SLASHES.replace_all(name, "-");
    let name = FILENAME_FORBIDDEN.replace_all(&name, "");
    name.trim_matches(|c| c == ' ' || c == '.').to_string()
}

fn underscored(name: &str) -> String {
    name.replace([' ', '-'], "_")
}

/// Episode title for a file, combining related episodes.
///
/// `Ep Name (1)` and `Ep Name (2)` collapse to `Ep Name`; differing titles
/// are joined with ` & `.
pub fn combined_episode_name(ep: &EpisodeContext) -> String {
    let mut related: Vec<&EpisodeContext> = ep.related.iter().collect();
    related.sort_by_key(|r| r.episode);

    let name = if related.is_empty() {
        ep.name.clone()
    } else {
        let names: Vec<&str> = std::iter::once(ep.name.as_str())
            .chain(related.iter().map(|r| r.name.as_str()))
            .collect();
        let mut common: Option<&str> = None;
        let mut single = true;
        for name in &names {
            let base = MULTI_NAME
                .captures(name)
                .and_then(|caps| caps.get(1))
                .map(|m| m.as_str());
            match (base, common) {
                (None, _) => {
                    single = false;
                    break;
                }
                (Some(base), None) => common = Some(base),
                (Some(base), Some(known)) if base != known => {
                    single = false;
                    break;
                }
                _ => {}
            }
        }
        match (single, common) {
            (true, Some(common)) => common.to_string(),
            _ => names.join(" & "),
        }
    };

    if name.is_empty() {
        "tba".to_string()
    } else {
        name
    }
}

fn release_group(ep: &EpisodeContext) -> String {
    if ep.release_name.is_empty() {
        return String::new();
    }
    let name = strip_non_release_groups(&ep.release_name, ep.is_anime);
    let parser: &NameParser = if ep.is_anime {
        &ANIME_PARSER
    } else {
        &STANDARD_PARSER
    };
    parser
        .parse(&name)
        .ok()
        .and_then(|parsed| parsed.release_group)
        .unwrap_or_default()
}

/// Token values for an episode, ordered so that longer codes sharing a
/// prefix come before shorter ones.
#[derive(Debug, Clone)]
pub struct ReplaceMap {
    entries: Vec<(&'static str, String)>,
}

impl ReplaceMap {
    pub fn for_episode(ep: &EpisodeContext, strip_year: bool) -> Self {
        let ep_name = combined_episode_name(ep);
        let show_name = if strip_year {
            TRAILING_YEAR
                .replace(&ep.show_name, "")
                .trim_end()
                .to_string()
        } else {
            ep.show_name.clone()
        };
        let quality = ep.quality.label();
        let date = ep.air_date.format("%Y-%m-%d").to_string();
        let release_name = if ep.release_name.is_empty() {
            String::new()
        } else {
            strip_non_release_groups(&ep.release_name, ep.is_anime)
        };
        let version = if ep.is_anime && ep.version > 1 {
            format!("v{}", ep.version)
        } else {
            String::new()
        };

        let mut entries = vec![
            ("%SN", show_name.clone()),
            ("%S.N", sanitize_scene_name(&show_name)),
            ("%S_N", underscored(&show_name)),
            ("%EN", ep_name.clone()),
            ("%E.N", sanitize_scene_name(&ep_name)),
            ("%E_N", underscored(&ep_name)),
            ("%QN", quality.to_string()),
            ("%Q.N", sanitize_scene_name(quality)),
            ("%Q_N", underscored(quality)),
            ("%S", ep.season.to_string()),
            ("%0S", format!("{:02}", ep.season)),
            ("%E", ep.episode.to_string()),
            ("%0E", format!("{:02}", ep.episode)),
            ("%XS", ep.scene_season.to_string()),
            ("%0XS", format!("{:02}", ep.scene_season)),
            ("%XE", ep.scene_episode.to_string()),
            ("%0XE", format!("{:02}", ep.scene_episode)),
            ("%AB", format!("{:03}", ep.absolute_number)),
            ("%XAB", format!("{:03}", ep.scene_absolute_number)),
            ("%RN", release_name),
            ("%RG", release_group(ep)),
            ("%AD", date.replace('-', " ")),
            ("%A.D", date.replace('-', ".")),
            ("%A_D", underscored(&date)),
            ("%A-D", date.clone()),
            ("%Y", ep.air_date.format("%Y").to_string()),
            ("%M", ep.air_date.format("%-m").to_string()),
            ("%D", ep.air_date.format("%-d").to_string()),
            ("%0M", ep.air_date.format("%m").to_string()),
            ("%0D", ep.air_date.format("%d").to_string()),
            ("%RT", if ep.is_proper { "PROPER" } else { "" }.to_string()),
            ("%V", version),
        ];
        entries.sort_by(|a, b| b.0.cmp(a.0));
        Self { entries }
    }

    pub fn get(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(key, _)| *key == code)
            .map(|(_, value)| value.as_str())
    }

    /// Substitute every token in `pattern`, upper- and lower-case forms alike.
    pub fn format(&self, pattern: &str) -> String {
        let mut result = pattern.to_string();
        for (code, value) in &self.entries {
            result = result.replace(code, &sanitize_filename(value));
            result = result.replace(
                &code.to_lowercase(),
                &sanitize_filename(&value.to_lowercase()),
            );
        }
        result
    }
}
