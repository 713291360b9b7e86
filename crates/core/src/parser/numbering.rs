//! Episode numbering detection.
//!
//! Each finder looks for one notation and reports where in the name it
//! matched, so the caller can split off the show name and the tail.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex_lite::{Captures, Regex};

use super::types::Numbering;

/// A numbering notation found in a release name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NumberingMatch {
    pub numbering: Numbering,
    /// Byte offset where the numbering begins.
    pub start: usize,
    /// Byte offset just past the numbering.
    pub end: usize,
    /// Explicit `vN` release version.
    pub version: Option<u32>,
}

/// A date-shaped token that is not a real calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct BadDate {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

/// Outcome of the full detection cascade.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Detection {
    Found(NumberingMatch),
    InvalidDate(BadDate),
    Nothing,
}

static SCENE_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[. _-])((\d{4})[. _-]+(\d{2})[. _-]+(\d{2}))").unwrap()
});

static UK_DATE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(?:^|[. _-])(\(?(\d{2})[. _-]+(\d{2}|jan\w*|feb\w*|mar\w*|apr\w*|may\w*|jun\w*|jul\w*|aug\w*|sep\w*|oct\w*|nov\w*|dec\w*)[. _-]+((?:19|20)?\d{2})\)?)",
    )
    .unwrap()
});

static EPISODE_BEFORE_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)s\d+e\d+|\d+x\d+").unwrap());

static SXXEYY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|[. _-])s(\d{1,4})[. _-]*e(\d{1,4})").unwrap());

static SXXEYY_REPEAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[. _-]+s(\d+)[. _-]*e(\d+)").unwrap());

static SXXEYY_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:[. _-]*e|-|[. _-]*(?:and|&|to)[. _-]*)(\d+)").unwrap()
});

static VERBOSE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[. _-])season[. _-]+(\d+)[. _-]+episode[. _-]+(\d+)").unwrap()
});

static FOV: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|[. _\[-])(\d{1,2})x(\d{1,3})").unwrap());

static FOV_REPEAT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[. _-]+(\d+)x(\d+)").unwrap());

static FOV_LINK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:([. _-]*x)|-e?|[. _-]*(?:and|&|to)[. _-]*)(\d+)").unwrap()
});

static SEASON_ONLY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|[. _-])s(?:eason[. _-]*)?(\d{1,3})").unwrap());

static SPECIALS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)(?:^|[. _-])(special|extra)s?\w*(?:[. _-]|$)").unwrap());

static PART: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[. _-])(?:part|pt)[. _-]?(\d{1,2}|[ivx]+)").unwrap()
});

static PART_EXTRA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[. _-]+and[. _-]+(?:part|pt)[. _-]?(\d{1,2}|[ivx]+)").unwrap()
});

static BARE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?:^|[. _-])(\d{3,4})").unwrap());

static EP_ABSOLUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:^|[. _-])(?:episode|ep|e)[. _-]?(\d{1,4})").unwrap()
});

static EP_ABSOLUTE_EXTRA: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:-|[. _-]*(?:and|&|to)[. _-]*)(\d{1,4})").unwrap()
});

static STANDALONE_ABSOLUTE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d{2,4})((?:-\d{2,4})*)(?:v(\d))?").unwrap());

static TRAILING_ABSOLUTE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(?:[ ._-]{2,}|[ ._]+)(\d{1,4})((?:-\d{1,4})*)(?:v(\d))?").unwrap()
});

/// Run the detection cascade for a single name component.
pub(crate) fn detect(name: &str, anime: bool) -> Detection {
    match find_air_date(name) {
        Ok(Some(found)) => return Detection::Found(found),
        Err(bad) => return Detection::InvalidDate(bad),
        Ok(None) => {}
    }

    let found = if anime {
        find_season_episode(name)
            .map(|m| with_trailing_absolute(name, m))
            .or_else(|| find_ep_absolute(name))
            .or_else(|| find_standalone_absolute(name))
            .or_else(|| find_season_only(name))
            .or_else(|| find_part(name))
    } else {
        find_season_episode(name)
            .or_else(|| find_season_only(name))
            .or_else(|| find_part(name))
            .or_else(|| find_bare(name))
            .or_else(|| find_ep_absolute(name))
            .or_else(|| find_standalone_absolute(name))
    };

    match found {
        Some(found) => Detection::Found(found),
        None => Detection::Nothing,
    }
}

/// Collapse a list of episode numbers into a contiguous range when the
/// first and last are close together; otherwise keep only the first.
pub(crate) fn expand_range(numbers: &[u32]) -> Vec<u32> {
    match (numbers.first(), numbers.last()) {
        (Some(&first), Some(&last)) if last > first && last - first < 10 => {
            (first..=last).collect()
        }
        (Some(&first), _) => vec![first],
        _ => Vec::new(),
    }
}

fn next_char(name: &str, at: usize) -> Option<char> {
    name[at..].chars().next()
}

fn is_separator(c: char) -> bool {
    matches!(c, '.' | ' ' | '_' | '-')
}

fn capture_u32(caps: &Captures<'_>, group: usize) -> Option<u32> {
    caps.get(group)?.as_str().parse().ok()
}

/// A resolution such as `720p` or `1080i`, which must never be read as an
/// episode number.
fn is_resolution(digits: &str, following: Option<char>) -> bool {
    matches!(digits, "2160" | "1080" | "720" | "480")
        && following.is_some_and(|c| matches!(c.to_ascii_lowercase(), 'p' | 'i'))
}

fn is_year(digits: &str) -> bool {
    digits.len() == 4 && (digits.starts_with("19") || digits.starts_with("20"))
}

/// A date-shaped token that fails calendar validation aborts detection.
fn find_air_date(name: &str) -> Result<Option<NumberingMatch>, BadDate> {
    if let Some(found) = find_date_with(&SCENE_DATE, name, |caps| {
        let year = capture_u32(caps, 2)? as i32;
        let month = capture_u32(caps, 3)?;
        let day = capture_u32(caps, 4)?;
        Some((year, month, day))
    })? {
        return Ok(Some(found));
    }
    find_date_with(&UK_DATE, name, |caps| {
        let day = capture_u32(caps, 2)?;
        let month = parse_month(caps.get(3)?.as_str())?;
        let year_text = caps.get(4)?.as_str();
        let mut year = year_text.parse::<i32>().ok()?;
        if year_text.len() == 2 {
            year += if year < 50 { 2000 } else { 1900 };
        }
        Some((year, month, day))
    })
}

fn find_date_with<F>(
    re: &Regex,
    name: &str,
    extract: F,
) -> Result<Option<NumberingMatch>, BadDate>
where
    F: Fn(&Captures<'_>) -> Option<(i32, u32, u32)>,
{
    let mut pos = 0;
    while let Some(caps) = re.captures_at(name, pos) {
        let Some(token) = caps.get(1) else { break };
        pos = token.start() + 1;

        if next_char(name, token.end()).is_some_and(|c| c.is_ascii_digit()) {
            continue;
        }
        if EPISODE_BEFORE_DATE.is_match(&name[..token.start()]) {
            continue;
        }
        let Some((year, mut month, mut day)) = extract(&caps) else {
            continue;
        };
        if month > 12 {
            std::mem::swap(&mut month, &mut day);
        }
        match NaiveDate::from_ymd_opt(year, month, day) {
            Some(date) => {
                return Ok(Some(NumberingMatch {
                    numbering: Numbering::AirDate { date },
                    start: token.start(),
                    end: token.end(),
                    version: None,
                }));
            }
            None => return Err(BadDate { year, month, day }),
        }
    }
    Ok(None)
}

fn parse_month(text: &str) -> Option<u32> {
    if let Ok(month) = text.parse::<u32>() {
        return Some(month);
    }
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];
    let lower = text.to_ascii_lowercase();
    MONTHS
        .iter()
        .position(|m| lower.starts_with(m))
        .map(|idx| idx as u32 + 1)
}

fn find_season_episode(name: &str) -> Option<NumberingMatch> {
    find_sxxeyy(name)
        .or_else(|| find_verbose(name))
        .or_else(|| find_fov(name))
}

fn find_sxxeyy(name: &str) -> Option<NumberingMatch> {
    let mut pos = 0;
    while let Some(caps) = SXXEYY.captures_at(name, pos) {
        let whole = caps.get(0)?;
        pos = whole.start() + 1;
        if next_char(name, whole.end()).is_some_and(|c| c.is_ascii_digit()) {
            continue;
        }
        let (Some(season), Some(first)) = (capture_u32(&caps, 1), capture_u32(&caps, 2)) else {
            continue;
        };

        let mut episodes = vec![first];
        let mut end = whole.end();
        loop {
            let rest = &name[end..];
            if let Some(repeat) = SXXEYY_REPEAT.captures(rest) {
                if capture_u32(&repeat, 1) == Some(season) {
                    if let Some(ep) = capture_u32(&repeat, 2) {
                        episodes.push(ep);
                        end += repeat.get(0).map_or(0, |m| m.end());
                        continue;
                    }
                }
                break;
            }
            if let Some(link) = SXXEYY_LINK.captures(rest) {
                let Some(digits) = link.get(1) else { break };
                if is_resolution(digits.as_str(), next_char(rest, digits.end())) {
                    break;
                }
                let Ok(ep) = digits.as_str().parse::<u32>() else {
                    break;
                };
                episodes.push(ep);
                end += digits.end();
                continue;
            }
            break;
        }

        return Some(NumberingMatch {
            numbering: Numbering::Season {
                season,
                episodes: expand_range(&episodes),
            },
            start: whole.start(),
            end,
            version: None,
        });
    }
    None
}

fn find_verbose(name: &str) -> Option<NumberingMatch> {
    let caps = VERBOSE.captures(name)?;
    let whole = caps.get(0)?;
    Some(NumberingMatch {
        numbering: Numbering::Season {
            season: capture_u32(&caps, 1)?,
            episodes: vec![capture_u32(&caps, 2)?],
        },
        start: whole.start(),
        end: whole.end(),
        version: None,
    })
}

fn find_fov(name: &str) -> Option<NumberingMatch> {
    let mut pos = 0;
    while let Some(caps) = FOV.captures_at(name, pos) {
        let whole = caps.get(0)?;
        pos = whole.start() + 1;
        if next_char(name, whole.end()).is_some_and(|c| c.is_ascii_digit()) {
            continue;
        }
        let (Some(season), Some(first)) = (capture_u32(&caps, 1), capture_u32(&caps, 2)) else {
            continue;
        };

        let mut episodes = vec![first];
        let mut end = whole.end();
        loop {
            let rest = &name[end..];
            if let Some(repeat) = FOV_REPEAT.captures(rest) {
                if capture_u32(&repeat, 1) == Some(season) {
                    if let Some(ep) = capture_u32(&repeat, 2) {
                        episodes.push(ep);
                        end += repeat.get(0).map_or(0, |m| m.end());
                        continue;
                    }
                }
                break;
            }
            if let Some(link) = FOV_LINK.captures(rest) {
                let Some(digits) = link.get(2) else { break };
                let following = next_char(rest, digits.end());
                if link.get(1).is_some() && matches!(digits.as_str(), "264" | "265") {
                    break;
                }
                if following.is_some_and(|c| c.is_ascii_digit())
                    || is_resolution(digits.as_str(), following)
                {
                    break;
                }
                let Ok(ep) = digits.as_str().parse::<u32>() else {
                    break;
                };
                episodes.push(ep);
                end += digits.end();
                continue;
            }
            break;
        }

        return Some(NumberingMatch {
            numbering: Numbering::Season {
                season,
                episodes: expand_range(&episodes),
            },
            start: whole.start(),
            end,
            version: None,
        });
    }
    None
}

fn find_season_only(name: &str) -> Option<NumberingMatch> {
    let mut pos = 0;
    while let Some(caps) = SEASON_ONLY.captures_at(name, pos) {
        let whole = caps.get(0)?;
        pos = whole.start() + 1;
        if next_char(name, whole.end()).is_some_and(|c| !is_separator(c)) {
            continue;
        }
        if SPECIALS.is_match(&name[whole.end()..]) {
            continue;
        }
        let Some(season) = capture_u32(&caps, 1) else {
            continue;
        };
        return Some(NumberingMatch {
            numbering: Numbering::Season {
                season,
                episodes: Vec::new(),
            },
            start: whole.start(),
            end: whole.end(),
            version: None,
        });
    }
    None
}

fn roman_to_u32(text: &str) -> Option<u32> {
    let mut total = 0u32;
    let mut prev = 0u32;
    for c in text.chars().rev() {
        let value = match c.to_ascii_lowercase() {
            'i' => 1,
            'v' => 5,
            'x' => 10,
            _ => return None,
        };
        if value < prev {
            total = total.checked_sub(value)?;
        } else {
            total += value;
            prev = value;
        }
    }
    (total > 0).then_some(total)
}

fn part_number(text: &str) -> Option<u32> {
    text.parse().ok().or_else(|| roman_to_u32(text))
}

fn find_part(name: &str) -> Option<NumberingMatch> {
    let mut pos = 0;
    while let Some(caps) = PART.captures_at(name, pos) {
        let whole = caps.get(0)?;
        pos = whole.start() + 1;
        if next_char(name, whole.end()).is_some_and(|c| !is_separator(c)) {
            continue;
        }
        let Some(first) = caps.get(1).and_then(|m| part_number(m.as_str())) else {
            continue;
        };

        let mut episodes = vec![first];
        let mut end = whole.end();
        if let Some(extra) = PART_EXTRA.captures(&name[end..]) {
            let extra_end = extra.get(0).map_or(0, |m| m.end());
            let boundary = next_char(&name[end..], extra_end).is_none_or(is_separator);
            if let (true, Some(n)) = (boundary, extra.get(1).and_then(|m| part_number(m.as_str())))
            {
                episodes.push(n);
                end += extra_end;
            }
        }

        return Some(NumberingMatch {
            numbering: Numbering::Season {
                season: 1,
                episodes: expand_range(&episodes),
            },
            start: whole.start(),
            end,
            version: None,
        });
    }
    None
}

fn find_bare(name: &str) -> Option<NumberingMatch> {
    let mut pos = 0;
    while let Some(caps) = BARE.captures_at(name, pos) {
        let whole = caps.get(0)?;
        let digits = caps.get(1)?;
        pos = digits.start() + 1;

        if digits.start() == 0 || whole.start() == 0 {
            continue;
        }
        if next_char(name, digits.end()).is_some_and(|c| !is_separator(c)) {
            continue;
        }
        let text = digits.as_str();
        if text.starts_with('0') || is_year(text) {
            continue;
        }
        let Ok(number) = text.parse::<u32>() else {
            continue;
        };
        return Some(NumberingMatch {
            numbering: Numbering::Season {
                season: number / 100,
                episodes: vec![number % 100],
            },
            start: whole.start(),
            end: digits.end(),
            version: None,
        });
    }
    None
}

fn find_ep_absolute(name: &str) -> Option<NumberingMatch> {
    let mut pos = 0;
    while let Some(caps) = EP_ABSOLUTE.captures_at(name, pos) {
        let whole = caps.get(0)?;
        pos = whole.start() + 1;
        if next_char(name, whole.end()).is_some_and(|c| c.is_ascii_alphanumeric()) {
            continue;
        }
        let Some(first) = capture_u32(&caps, 1) else {
            continue;
        };

        let mut numbers = vec![first];
        let mut end = whole.end();
        if let Some(extra) = EP_ABSOLUTE_EXTRA.captures(&name[end..]) {
            if let (Some(m), Some(n)) = (extra.get(1), capture_u32(&extra, 1)) {
                if !next_char(&name[end..], m.end()).is_some_and(|c| c.is_ascii_alphanumeric()) {
                    numbers.push(n);
                    end += m.end();
                }
            }
        }

        return Some(NumberingMatch {
            numbering: Numbering::Absolute {
                numbers: expand_range(&numbers),
            },
            start: whole.start(),
            end,
            version: None,
        });
    }
    None
}

fn find_standalone_absolute(name: &str) -> Option<NumberingMatch> {
    let bytes = name.as_bytes();
    for start in 0..bytes.len() {
        if !bytes[start].is_ascii_digit() {
            continue;
        }
        if start > 0 {
            let prev = bytes[start - 1];
            if prev.is_ascii_digit() || !matches!(prev, b' ' | b'.' | b'_' | b'-' | b'[' | b'(') {
                continue;
            }
            if start >= 2 && bytes[start - 2].eq_ignore_ascii_case(&b'h') && prev == b'.' {
                continue;
            }
        }

        let rest = &name[start..];
        let Some(caps) = STANDALONE_ABSOLUTE.captures(rest) else {
            continue;
        };
        let Some(whole) = caps.get(0) else { continue };
        let following = next_char(rest, whole.end());
        if following.is_some_and(|c| {
            !matches!(c, ' ' | '.' | '_' | '-' | '[' | ']' | '(' | ')' | ',')
        }) {
            continue;
        }

        let Some(first) = caps.get(1) else { continue };
        let chain = caps.get(2).map_or("", |m| m.as_str());
        if chain.is_empty() && is_year(first.as_str()) {
            continue;
        }

        let mut numbers: Vec<u32> = Vec::new();
        for part in std::iter::once(first.as_str()).chain(chain.split('-').filter(|s| !s.is_empty()))
        {
            match part.parse() {
                Ok(n) => numbers.push(n),
                Err(_) => break,
            }
        }
        if numbers.is_empty() {
            continue;
        }

        return Some(NumberingMatch {
            numbering: Numbering::Absolute {
                numbers: expand_range(&numbers),
            },
            start,
            end: start + whole.end(),
            version: capture_u32(&caps, 3),
        });
    }
    None
}

/// Anime releases often carry an absolute number right after the season and
/// episode; when present it becomes the primary numbering.
fn with_trailing_absolute(name: &str, found: NumberingMatch) -> NumberingMatch {
    let rest = &name[found.end..];
    let Some(caps) = TRAILING_ABSOLUTE.captures(rest) else {
        return found;
    };
    let Some(whole) = caps.get(0) else {
        return found;
    };
    if next_char(rest, whole.end()).is_some_and(|c| c.is_ascii_digit() || c == 'p' || c == 'P') {
        return found;
    }

    let mut numbers: Vec<u32> = Vec::new();
    if let Some(first) = capture_u32(&caps, 1) {
        numbers.push(first);
    }
    if let Some(chain) = caps.get(2) {
        numbers.extend(chain.as_str().split('-').filter_map(|s| s.parse::<u32>().ok()));
    }
    if numbers.is_empty() {
        return found;
    }

    NumberingMatch {
        numbering: Numbering::Absolute {
            numbers: expand_range(&numbers),
        },
        start: found.start,
        end: found.end + whole.end(),
        version: capture_u32(&caps, 3),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn found(name: &str, anime: bool) -> NumberingMatch {
        match detect(name, anime) {
            Detection::Found(m) => m,
            other => panic!("no numbering in {name}: {other:?}"),
        }
    }

    fn season(name: &str) -> (u32, Vec<u32>) {
        match found(name, false).numbering {
            Numbering::Season { season, episodes } => (season, episodes),
            other => panic!("expected season numbering for {name}, got {other:?}"),
        }
    }

    fn absolute(name: &str, anime: bool) -> Vec<u32> {
        match found(name, anime).numbering {
            Numbering::Absolute { numbers } => numbers,
            other => panic!("expected absolute numbering for {name}, got {other:?}"),
        }
    }

    #[test]
    fn test_expand_range() {
        assert_eq!(expand_range(&[2, 3]), vec![2, 3]);
        assert_eq!(expand_range(&[2, 4]), vec![2, 3, 4]);
        assert_eq!(expand_range(&[15, 11001001]), vec![15]);
        assert_eq!(expand_range(&[5]), vec![5]);
        assert_eq!(expand_range(&[5, 3]), vec![5]);
        assert!(expand_range(&[]).is_empty());
    }

    #[test]
    fn test_standard_notation() {
        assert_eq!(season("Show.Name.S01E02.HDTV"), (1, vec![2]));
        assert_eq!(season("Show.Name.S01E02E03"), (1, vec![2, 3]));
        assert_eq!(season("Show.Name.S01E02-E03"), (1, vec![2, 3]));
        assert_eq!(season("Show.Name.S01E02.S01E03"), (1, vec![2, 3]));
        assert_eq!(season("Show Name - S01E02&3&4"), (1, vec![2, 3, 4]));
        assert_eq!(season("Show.Name.S01E15-11001001"), (1, vec![15]));
        assert_eq!(season("Show Name s1e3 and 4"), (1, vec![3, 4]));
    }

    #[test]
    fn test_link_does_not_swallow_resolution() {
        assert_eq!(season("Show.Name.S01E02-720p"), (1, vec![2]));
        assert_eq!(season("Show.Name.S01E02.1080p.HDTV"), (1, vec![2]));
    }

    #[test]
    fn test_fov_notation() {
        assert_eq!(season("Show Name [05x12] Ep Name"), (5, vec![12]));
        assert_eq!(season("Show.Name.1x02.x264"), (1, vec![2]));
        assert_eq!(season("Show Name - 1x02-03"), (1, vec![2, 3]));
        assert_eq!(season("Show Name 1x02 1x03"), (1, vec![2, 3]));
    }

    #[test]
    fn test_verbose_notation() {
        assert_eq!(season("Show Name Season 3 Episode 4"), (3, vec![4]));
    }

    #[test]
    fn test_season_pack() {
        assert_eq!(season("Show.Name.S02.720p.HDTV"), (2, vec![]));
        assert_eq!(season("Show Name Season 2"), (2, vec![]));
        assert!(!matches!(
            detect("Show.Name.S02.Specials", false),
            Detection::Found(NumberingMatch {
                numbering: Numbering::Season { season: 2, .. },
                ..
            })
        ));
    }

    #[test]
    fn test_part_notation() {
        assert_eq!(season("Show.Name.Part.3.HDTV"), (1, vec![3]));
        assert_eq!(season("Show.Name.Pt.IV"), (1, vec![4]));
        assert_eq!(season("Show.Name.Part.1.and.Part.2"), (1, vec![1, 2]));
    }

    #[test]
    fn test_bare_number() {
        let m = found("the.event.401.hdtv-lol", false);
        assert_eq!(
            m.numbering,
            Numbering::Season {
                season: 4,
                episodes: vec![1]
            }
        );
        assert_eq!(&"the.event.401.hdtv-lol"[..m.start], "the.event");
        assert_eq!(season("Show.Name.1012.HDTV"), (10, vec![12]));
    }

    #[test]
    fn test_bare_number_skips_years() {
        assert_eq!(season("Show.Name.2010.S01E02"), (1, vec![2]));
        assert_eq!(detect("Show.Name.2010.HDTV", false), Detection::Nothing);
    }

    #[test]
    fn test_air_date() {
        let m = found("Show.Name.2011.03.09.HDTV", false);
        assert_eq!(
            m.numbering,
            Numbering::AirDate {
                date: NaiveDate::from_ymd_opt(2011, 3, 9).unwrap()
            }
        );
    }

    #[test]
    fn test_air_date_swaps_day_and_month() {
        let m = found("Show.Name.2010.23.11", false);
        assert_eq!(
            m.numbering,
            Numbering::AirDate {
                date: NaiveDate::from_ymd_opt(2010, 11, 23).unwrap()
            }
        );
    }

    #[test]
    fn test_uk_date() {
        let m = found("Show Name 09 Mar 11", false);
        assert_eq!(
            m.numbering,
            Numbering::AirDate {
                date: NaiveDate::from_ymd_opt(2011, 3, 9).unwrap()
            }
        );
    }

    #[test]
    fn test_invalid_date_reported() {
        assert_eq!(
            detect("Show.Name.2011.02.30", false),
            Detection::InvalidDate(BadDate {
                year: 2011,
                month: 2,
                day: 30
            })
        );
    }

    #[test]
    fn test_date_after_episode_ignored() {
        assert_eq!(season("Show.Name.S01E02.2011.03.09"), (1, vec![2]));
    }

    #[test]
    fn test_ep_absolute() {
        assert_eq!(absolute("Show Name Ep 12", false), vec![12]);
        assert_eq!(absolute("Show Name - E05-07", false), vec![5, 6, 7]);
    }

    #[test]
    fn test_standalone_absolute() {
        assert_eq!(absolute("Show.Name.003", false), vec![3]);
        assert_eq!(absolute("Bleach - 301 [1280x720][61D1D4EE]", true), vec![301]);
        assert_eq!(absolute("Show - 01-03", true), vec![1, 2, 3]);
        let m = found("Show - 12v2", true);
        assert_eq!(m.version, Some(2));
    }

    #[test]
    fn test_standalone_absolute_skips_codec() {
        assert_eq!(absolute("Show H.264 - 07", true), vec![7]);
    }

    #[test]
    fn test_anime_trailing_absolute() {
        assert_eq!(absolute("Show Name - 2x03 - 003 - Ep Name", true), vec![3]);
        assert_eq!(absolute("Show.Name.S02E03.003.Ep.Name", true), vec![3]);
        assert_eq!(
            absolute("Show.Name.S02E03E04E05.003-004-005", true),
            vec![3, 4, 5]
        );
        match found("Show.Name.S02E03.720p", true).numbering {
            Numbering::Season { season, episodes } => {
                assert_eq!((season, episodes), (2, vec![3]));
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(detect("Just A Movie Title", false), Detection::Nothing);
    }
}
