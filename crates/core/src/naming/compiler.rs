//! Pattern expansion.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use tracing::debug;

use super::tokens::ReplaceMap;
use super::types::{AnimeNumbering, EpisodeContext, MultiEpStyle, RenderedName};

static PROPER_TOKEN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"([ _.\-]*)%RT([ _.\-]*)").unwrap());

/// Stand-in group written when an episode has no known release name.
const GENERIC_GROUP: &str = "Sickle";

/// Expands naming patterns for episodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameRenderer {
    multi: MultiEpStyle,
    anime: AnimeNumbering,
    strip_year: bool,
}

impl NameRenderer {
    pub fn new(multi: MultiEpStyle, anime: AnimeNumbering) -> Self {
        Self {
            multi,
            anime,
            strip_year: false,
        }
    }

    /// Drop a trailing `(year)` from show names.
    pub fn with_strip_year(mut self, strip_year: bool) -> Self {
        self.strip_year = strip_year;
        self
    }

    pub fn multi_ep_style(&self) -> MultiEpStyle {
        self.multi
    }

    pub fn anime_numbering(&self) -> AnimeNumbering {
        self.anime
    }

    /// Render a pattern into a file name and the folders above it.
    pub fn render(&self, pattern: &str, ep: &EpisodeContext) -> RenderedName {
        let groups: Vec<&str> = pattern.split(['/', '\\']).collect();
        let Some((file_pattern, dirs)) = groups.split_last() else {
            return RenderedName::default();
        };

        let filename = self.format_pattern(file_pattern, ep);
        let directory = if dirs.is_empty() {
            String::new()
        } else {
            self.format_pattern(&dirs.join("/"), ep)
        };
        RenderedName {
            filename,
            directory,
        }
    }

    /// Expand every token of `pattern`, including multi-episode and
    /// absolute numbering.
    pub fn format_pattern(&self, pattern: &str, ep: &EpisodeContext) -> String {
        let map = ReplaceMap::for_episode(ep, self.strip_year);
        let mut result = pattern.to_string();

        if map.get("%RN").is_none_or(str::is_empty) {
            let (upper, lower) = if ep.air_by_date || ep.sports {
                ("%S.N.%A.D.%E.N-Sickle", "%s.n.%A.D.%e.n-Sickle")
            } else if self.anime.uses_absolute() {
                ("%S.N.%AB.%E.N-Sickle", "%s.n.%ab.%e.n-Sickle")
            } else {
                ("%S.N.S%0SE%0E.%E.N-Sickle", "%s.n.s%0se%0e.%e.n-Sickle")
            };
            result = result
                .replace("%RN", upper)
                .replace("%rn", lower)
                .replace("%RG", GENERIC_GROUP)
                .replace("%rg", GENERIC_GROUP);
            debug!(pattern = %result, "Episode has no release name, using a generic one");
        }

        if map.get("%RT").is_none_or(str::is_empty) {
            result = PROPER_TOKEN.replace_all(&result, "$2").into_owned();
        }

        let mut related: Vec<&EpisodeContext> = ep.related.iter().collect();
        related.sort_by_key(|r| r.episode);

        let mut expanded = String::with_capacity(result.len());
        let mut rest = result.as_str();
        loop {
            match rest.find(['/', '\\']) {
                Some(idx) => {
                    expanded.push_str(&self.format_group(&rest[..idx], ep, &related, &map));
                    expanded.push_str(&rest[idx..idx + 1]);
                    rest = &rest[idx + 1..];
                }
                None => {
                    expanded.push_str(&self.format_group(rest, ep, &related, &map));
                    break;
                }
            }
        }

        let formatted = map.format(&expanded);
        debug!(pattern = %pattern, result = %formatted, "Formatted naming pattern");
        formatted
    }

    /// Rewrite the numbering tokens of one path component so that related
    /// episodes and absolute numbers are included.
    fn format_group(
        &self,
        group: &str,
        ep: &EpisodeContext,
        related: &[&EpisodeContext],
        map: &ReplaceMap,
    ) -> String {
        let season_matches = find_all(group, season_episode_at);
        let ep_matches = if season_matches.is_empty() {
            find_all(group, episode_only_at)
        } else {
            Vec::new()
        };

        let (season_format, mut ep_sep, ep_format, sep) = match (season_matches.first(), ep_matches.first()) {
            (Some(first), _) => {
                let sep = [first.pre_sep, first.post_sep]
                    .into_iter()
                    .find(|s| !s.is_empty())
                    .unwrap_or(" ");
                (first.season, first.middle, first.episode, sep)
            }
            (None, Some(first)) => ("", "-", first.episode, ""),
            (None, None) => return group.to_string(),
        };
        if !season_matches.is_empty() && self.multi.extends() {
            ep_sep = "-";
        }
        if ep_sep.is_empty() || ep_format.is_empty() {
            return group.to_string();
        }

        let ep_format = ep_format.to_uppercase();
        let mut ep_string = map.format(&ep_format);
        for (idx, other) in related.iter().enumerate() {
            if self.multi.is_limited() && idx + 1 != related.len() {
                continue;
            }
            match self.multi {
                MultiEpStyle::Duplicate => {
                    ep_string.push_str(sep);
                    ep_string.push_str(season_format);
                }
                MultiEpStyle::SeparatedRepeat => ep_string.push_str(sep),
                _ => {}
            }
            ep_string.push_str(ep_sep);
            if self.multi == MultiEpStyle::LimitedExtendEPrefixed {
                ep_string.push('E');
            }
            ep_string.push_str(&ReplaceMap::for_episode(other, self.strip_year).format(&ep_format));
        }

        if self.anime.uses_absolute() && ep.season != 0 {
            let absolute = if ep.absolute_number == 0 {
                ep.episode
            } else {
                ep.absolute_number
            };
            match self.anime {
                AnimeNumbering::Hybrid => {
                    ep_string.push_str(sep);
                    ep_string.push_str(&format!("{:03}", absolute));
                }
                AnimeNumbering::AbsoluteOnly => ep_string = format!("{:03}", absolute),
                AnimeNumbering::Standard => {}
            }
            for other in related {
                let number = if other.absolute_number == 0 {
                    other.episode
                } else {
                    other.absolute_number
                };
                ep_string.push_str(&format!("-{:03}", number));
            }
        }

        let mut out = String::with_capacity(group.len() + ep_string.len());
        let mut last = 0;
        if season_matches.is_empty() {
            for m in &ep_matches {
                out.push_str(&group[last..m.start]);
                out.push_str(&ep_string);
                last = m.end;
            }
        } else {
            for m in &season_matches {
                out.push_str(&group[last..m.start]);
                out.push_str(m.pre_sep);
                if self.anime != AnimeNumbering::AbsoluteOnly {
                    out.push_str(m.season);
                    out.push_str(m.middle);
                }
                out.push_str(&ep_string);
                out.push_str(m.post_sep);
                last = m.end;
            }
        }
        out.push_str(&group[last..]);
        out
    }
}

/// Render `pattern` for `ep` with the given styles.
pub fn render(
    pattern: &str,
    ep: &EpisodeContext,
    multi: MultiEpStyle,
    anime: AnimeNumbering,
) -> RenderedName {
    NameRenderer::new(multi, anime).render(pattern, ep)
}

/// A season token followed, eventually, by an episode token.
#[derive(Debug, Clone, PartialEq, Eq)]
struct TokenMatch<'a> {
    start: usize,
    end: usize,
    pre_sep: &'a str,
    season: &'a str,
    middle: &'a str,
    episode: &'a str,
    post_sep: &'a str,
}

/// All non-overlapping matches, leftmost first.
fn find_all<'a>(s: &'a str, at: fn(&'a str, usize) -> Option<TokenMatch<'a>>) -> Vec<TokenMatch<'a>> {
    let mut matches = Vec::new();
    let mut pos = 0;
    while pos < s.len() {
        let found = (pos..s.len())
            .filter(|&i| s.is_char_boundary(i))
            .find_map(|i| at(s, i));
        match found {
            Some(m) => {
                pos = m.end.max(m.start + 1);
                matches.push(m);
            }
            None => break,
        }
    }
    matches
}

fn separator_run(s: &str) -> usize {
    s.bytes()
        .take_while(|b| matches!(b, b' ' | b'_' | b'.' | b'-'))
        .count()
}

fn starts_with_ignore_case(s: &str, prefix: &str) -> bool {
    s.len() >= prefix.len() && s.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}

/// End of a `%S`/`%0S` (or `%E`/`%0E`) token at `at`, unless it is the start
/// of a name token such as `%SN` or `%E.N`.
fn number_token_end(s: &str, at: usize, letter: u8) -> Option<usize> {
    let bytes = s.as_bytes();
    if bytes.get(at) != Some(&b'%') {
        return None;
    }
    let end = match (bytes.get(at + 1), bytes.get(at + 2)) {
        (Some(b'0'), Some(c)) if c.eq_ignore_ascii_case(&letter) => at + 3,
        (Some(c), _) if c.eq_ignore_ascii_case(&letter) => at + 2,
        _ => return None,
    };
    let names_follow = match bytes.get(end) {
        Some(b'n' | b'N') => true,
        Some(b'.' | b'_') => matches!(bytes.get(end + 1), Some(b'n' | b'N')),
        _ => false,
    };
    (!names_follow).then_some(end)
}

/// Candidate ends of a season token (`Season %0S`, `S%0S`, `%S`) at `at`.
fn season_token_ends(s: &str, at: usize) -> Vec<usize> {
    let mut ends = Vec::new();
    let rest = &s[at..];
    for prefix in ["season", "series", "s"] {
        if starts_with_ignore_case(rest, prefix) {
            let after = at + prefix.len();
            let spaces = s[after..]
                .bytes()
                .take_while(|b| b.is_ascii_whitespace())
                .count();
            if let Some(end) = number_token_end(s, after + spaces, b's') {
                ends.push(end);
            }
        }
    }
    if let Some(end) = number_token_end(s, at, b's') {
        ends.push(end);
    }
    ends
}

fn season_episode_at(s: &str, start: usize) -> Option<TokenMatch<'_>> {
    let season_start = start + separator_run(&s[start..]);
    for season_end in season_token_ends(s, season_start) {
        for ep_start in season_end..=s.len() {
            if !s.is_char_boundary(ep_start) {
                continue;
            }
            if let Some(ep_end) = number_token_end(s, ep_start, b'e') {
                let end = ep_end + separator_run(&s[ep_end..]);
                return Some(TokenMatch {
                    start,
                    end,
                    pre_sep: &s[start..season_start],
                    season: &s[season_start..season_end],
                    middle: &s[season_end..ep_start],
                    episode: &s[ep_start..ep_end],
                    post_sep: &s[ep_end..end],
                });
            }
        }
    }
    None
}

fn episode_only_at(s: &str, start: usize) -> Option<TokenMatch<'_>> {
    let token_start = match s.as_bytes().get(start) {
        Some(b'e' | b'E') => start + 1,
        _ => start,
    };
    let end = number_token_end(s, token_start, b'e')?;
    Some(TokenMatch {
        start,
        end,
        pre_sep: "",
        season: "",
        middle: "",
        episode: &s[start..end],
        post_sep: "",
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::Quality;
    use chrono::NaiveDate;

    fn sample() -> EpisodeContext {
        let mut ep = EpisodeContext::new("Show Name", 2, 3, "Ep Name");
        ep.absolute_number = 3;
        ep.scene_absolute_number = 3;
        ep.air_date = NaiveDate::from_ymd_opt(2011, 3, 9).unwrap();
        ep.quality = Quality::HdTv;
        ep.release_name = "Show.Name.S02E03.HDTV.XviD-RLSGROUP".to_string();
        ep
    }

    fn multi_sample() -> EpisodeContext {
        let mut ep = sample();
        ep.name = "Ep Name (1)".to_string();
        for (number, name) in [(4, "Ep Name (2)"), (5, "Ep Name (3)")] {
            let mut other = EpisodeContext::new("Show Name", 2, number, name);
            other.absolute_number = number;
            ep.related.push(other);
        }
        ep
    }

    fn file(pattern: &str, ep: &EpisodeContext, multi: MultiEpStyle, anime: AnimeNumbering) -> String {
        render(pattern, ep, multi, anime).filename
    }

    #[test]
    fn test_render_single_episode() {
        let ep = sample();
        let std = AnimeNumbering::Standard;
        let multi = MultiEpStyle::Repeat;
        assert_eq!(
            file("%SN - S%0SE%0E - %EN", &ep, multi, std),
            "Show Name - S02E03 - Ep Name"
        );
        assert_eq!(
            file("%SN - %Sx%0E - %EN", &ep, multi, std),
            "Show Name - 2x03 - Ep Name"
        );
        assert_eq!(
            file("%S.N.S%0SE%0E.%E.N", &ep, multi, std),
            "Show.Name.S02E03.Ep.Name"
        );
    }

    #[test]
    fn test_render_directory() {
        let rendered = render(
            "Season %0S/%S.N.S%0SE%0E.%Q.N-%RG",
            &sample(),
            MultiEpStyle::Repeat,
            AnimeNumbering::Standard,
        );
        assert_eq!(rendered.directory, "Season 02");
        assert_eq!(rendered.filename, "Show.Name.S02E03.HD.TV-RLSGROUP");
        assert_eq!(rendered.path(), "Season 02/Show.Name.S02E03.HD.TV-RLSGROUP");
    }

    #[test]
    fn test_render_multi_episode_styles() {
        let ep = multi_sample();
        let std = AnimeNumbering::Standard;
        let cases = [
            (MultiEpStyle::Repeat, "Show.Name.S02E03E04E05.Ep.Name"),
            (MultiEpStyle::Extend, "Show.Name.S02E03-04-05.Ep.Name"),
            (MultiEpStyle::Duplicate, "Show.Name.S02E03.S02E04.S02E05.Ep.Name"),
            (MultiEpStyle::LimitedExtend, "Show.Name.S02E03-05.Ep.Name"),
            (MultiEpStyle::SeparatedRepeat, "Show.Name.S02E03.E04.E05.Ep.Name"),
            (MultiEpStyle::LimitedExtendEPrefixed, "Show.Name.S02E03-E05.Ep.Name"),
        ];
        for (style, expected) in cases {
            assert_eq!(file("%S.N.S%0SE%0E.%E.N", &ep, style, std), expected, "{style:?}");
        }
        assert_eq!(
            file("%SN - %Sx%0E - %EN", &ep, MultiEpStyle::Duplicate, std),
            "Show Name - 2x03 - 2x04 - 2x05 - Ep Name"
        );
    }

    #[test]
    fn test_render_anime_numbering() {
        let ep = sample();
        let multi = MultiEpStyle::Repeat;
        assert_eq!(
            file("%SN - %Sx%0E - %EN", &ep, multi, AnimeNumbering::Hybrid),
            "Show Name - 2x03 - 003 - Ep Name"
        );
        assert_eq!(
            file("%SN - %Sx%0E - %EN", &ep, multi, AnimeNumbering::AbsoluteOnly),
            "Show Name - 003 - Ep Name"
        );
        assert_eq!(
            file("%S.N.S%0SE%0E.%E.N", &multi_sample(), multi, AnimeNumbering::AbsoluteOnly),
            "Show.Name.003-004-005.Ep.Name"
        );
        assert_eq!(
            file("%S.N.S%0SE%0E.%E.N", &multi_sample(), multi, AnimeNumbering::Hybrid),
            "Show.Name.S02E03E04E05.003-004-005.Ep.Name"
        );
    }

    #[test]
    fn test_render_specials_skip_absolute() {
        let mut ep = sample();
        ep.season = 0;
        assert_eq!(
            file("%SN - S%0SE%0E", &ep, MultiEpStyle::Repeat, AnimeNumbering::Hybrid),
            "Show Name - S00E03"
        );
    }

    #[test]
    fn test_render_episode_only_pattern() {
        let ep = multi_sample();
        assert_eq!(
            file("%SN E%0E", &ep, MultiEpStyle::Repeat, AnimeNumbering::Standard),
            "Show Name E03-E04-E05"
        );
    }

    #[test]
    fn test_proper_token() {
        let mut ep = sample();
        let pattern = "%S.N.S%0SE%0E.%RT.%E.N";
        let std = AnimeNumbering::Standard;
        assert_eq!(
            file(pattern, &ep, MultiEpStyle::Repeat, std),
            "Show.Name.S02E03.Ep.Name"
        );
        ep.is_proper = true;
        assert_eq!(
            file(pattern, &ep, MultiEpStyle::Repeat, std),
            "Show.Name.S02E03.PROPER.Ep.Name"
        );
    }

    #[test]
    fn test_generic_release_name() {
        let mut ep = sample();
        ep.release_name.clear();
        let std = AnimeNumbering::Standard;
        assert_eq!(
            file("%RN", &ep, MultiEpStyle::Repeat, std),
            "Show.Name.S02E03.Ep.Name-Sickle"
        );
        assert_eq!(
            file("%rn", &ep, MultiEpStyle::Repeat, std),
            "show.name.s02e03.ep.name-Sickle"
        );

        ep.air_by_date = true;
        assert_eq!(
            file("%RN", &ep, MultiEpStyle::Repeat, std),
            "Show.Name.2011.03.09.Ep.Name-Sickle"
        );
    }

    #[test]
    fn test_air_date_patterns() {
        let ep = sample();
        let rendered = render(
            "%Y/%0M/%S.N.%A.D.%E.N-%RG",
            &ep,
            MultiEpStyle::Repeat,
            AnimeNumbering::Standard,
        );
        assert_eq!(rendered.directory, "2011/03");
        assert_eq!(rendered.filename, "Show.Name.2011.03.09.Ep.Name-RLSGROUP");
    }

    #[test]
    fn test_name_tokens_are_not_numbering() {
        let m = season_episode_at("%SN - %Sx%0E - %EN", 0);
        assert_eq!(m, None);
        let m = season_episode_at("%SN - %Sx%0E - %EN", 3).unwrap();
        assert_eq!(m.pre_sep, " - ");
        assert_eq!(m.season, "%S");
        assert_eq!(m.middle, "x");
        assert_eq!(m.episode, "%0E");
        assert_eq!(m.post_sep, " - ");
        assert!(episode_only_at("%EN", 0).is_none());
        assert!(episode_only_at("%E.N", 0).is_none());
    }

    #[test]
    fn test_verbose_season_token() {
        let m = season_episode_at("Season %S Episode %E", 0).unwrap();
        assert_eq!(m.season, "Season %S");
        assert_eq!(m.middle, " Episode ");
        assert_eq!(m.episode, "%E");
    }
}
