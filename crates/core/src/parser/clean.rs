//! Release name preprocessing and cleanup helpers.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::regex_atom::{alternate_literals, escape_literal};

/// Container and index-file extensions stripped before parsing.
const MEDIA_EXTENSIONS: &[&str] = &[
    "avi", "mkv", "mpg", "mpeg", "wmv", "ogm", "mp4", "iso", "img", "divx", "m2ts", "m4v", "ts",
    "flv", "f4v", "mov", "rmvb", "vob", "dvr-ms", "wtv", "ogv", "3gp", "webm", "nzb", "torrent",
];

/// Junk words that indexers and posting bots append to release names.
pub const DEFAULT_JUNK_SUFFIXES: &[&str] = &[
    "no-rar",
    "nzbgeek",
    "ripsalot",
    "siklopentan",
    "obfuscated",
    "scrambled",
    "postbot",
    "xpost",
    "junk",
];

static RP_SUFFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)[\s.\-_\[\{\(]rp[\s.\-_\]\}\)]*$").unwrap());

static WEBSITE_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(\w)[\s.\-_]*[\[\{\(][\s.\-_]*www\.\w+.\w+[\s.\-_]*[\]\}\)][\s.\-_]*$")
        .unwrap()
});

static TRACKER_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?i)(\w)[\s.\-_]*[\[\{\(]\s*(?:rar(?:bg|tv)|(?:e[tz]|v)tv)[\s.\-_]*[\]\}\)][\s.\-_]*$",
    )
    .unwrap()
});

static BRACKET_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(\w)[\s.\-_]*[\[\{\(][\s.\-_]*[\w\s.\-_]+[\s.\-_]*[\]\}\)][\s.\-_]*$").unwrap()
});

static BRACKET_PREFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\s.\-_]*[\[\{\(][\s.\-_]*[\w\s.\-_]+[\s.\-_]*[\]\}\)][\s.\-_]*(\w)").unwrap()
});

static LEADING_BRACKET: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\[.*\]").unwrap());

/// Build the trailing junk-word matcher for the given words.
///
/// Words are matched literally and case-insensitively, together with any
/// surrounding separators or brackets.
pub fn junk_suffix_regex<S: AsRef<str>>(extra: &[S]) -> Regex {
    let mut words: Vec<String> = DEFAULT_JUNK_SUFFIXES.iter().map(|w| w.to_string()).collect();
    for word in extra {
        let word = word.as_ref().trim().to_lowercase();
        if !word.is_empty() && !words.contains(&word) {
            words.push(word);
        }
    }
    let alternation = alternate_literals(&words).to_string();
    let pattern = format!(r"(?i)[\s.\-_\[\{{\(]*(?:{alternation})[\s.\-_\]\}}\)]*$");
    match Regex::new(&pattern) {
        Ok(re) => re,
        // Fall back to escaping every word separately.
        Err(_) => {
            let escaped: Vec<String> = words.iter().map(|w| escape_literal(w)).collect();
            let pattern = format!(
                r"(?i)[\s.\-_\[\{{\(]*(?:{})[\s.\-_\]\}}\)]*$",
                escaped.join("|")
            );
            Regex::new(&pattern).unwrap_or_else(|_| RP_SUFFIX.clone())
        }
    }
}

/// Split a path into its last component and the directory component above it.
pub fn split_path(name: &str) -> (&str, Option<&str>) {
    let mut parts = name
        .split(['/', '\\'])
        .filter(|part| !part.trim().is_empty())
        .rev();
    let file = parts.next().unwrap_or(name);
    let dir = parts.next();
    (file, dir)
}

/// Remove a known media or index-file extension.
pub fn remove_extension(name: &str) -> &str {
    if let Some(idx) = name.rfind('.') {
        let (base, ext) = (&name[..idx], &name[idx + 1..]);
        if !base.is_empty()
            && MEDIA_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        {
            return base;
        }
    }
    name
}

/// Strip junk words, tracker tags, and (outside anime mode) bracketed tags
/// from the ends of a name until nothing more changes.
pub fn strip_junk(name: &str, junk: &Regex, anime: bool) -> String {
    let mut current = name.to_string();
    loop {
        let mut next = junk.replace(&current, "").into_owned();
        next = RP_SUFFIX.replace(&next, "").into_owned();
        next = WEBSITE_SUFFIX.replace(&next, "$1").into_owned();
        next = TRACKER_SUFFIX.replace(&next, "$1").into_owned();
        if !anime {
            next = BRACKET_SUFFIX.replace(&next, "$1").into_owned();
            next = BRACKET_PREFIX.replace(&next, "$1").into_owned();
        }
        if next == current || next.trim().is_empty() {
            return current;
        }
        current = next;
    }
}

/// Turn the text before the numbering into a readable show name.
///
/// Dots become spaces except inside things like `1.5` or `Mr.` followed by a
/// space; underscores always become spaces.
pub fn clean_series_name(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    let mut out = String::with_capacity(raw.len());
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '.' => {
                let prev = if i > 0 { chars.get(i - 1).copied() } else { None };
                let next = chars.get(i + 1).copied();
                if dot_is_separator(prev, next, &chars[i + 1..]) {
                    out.push(' ');
                } else {
                    out.push('.');
                }
            }
            '_' => out.push(' '),
            _ => out.push(c),
        }
    }

    let mut name = out.trim().to_string();
    while name.ends_with('-') {
        name.pop();
        name = name.trim_end().to_string();
    }
    name = LEADING_BRACKET.replace(&name, "").into_owned();
    name.trim_matches(|c: char| c.is_whitespace() || matches!(c, '.' | '_' | '-'))
        .to_string()
}

fn dot_is_separator(prev: Option<char>, next: Option<char>, after: &[char]) -> bool {
    let next_is_word = next.is_some_and(|n| !n.is_ascii_digit() && !n.is_whitespace());
    let Some(prev) = prev else {
        return next_is_word;
    };
    if !prev.is_ascii_digit() && next.is_none_or(|n| !n.is_whitespace()) {
        return true;
    }
    if next_is_word {
        return true;
    }
    prev.is_ascii_digit() && after.len() >= 4 && after[..4].iter().all(|c| c.is_ascii_digit())
}

/// Split the text after the numbering into extra info and release group.
pub fn split_release_group(tail: &str) -> (Option<String>, Option<String>) {
    let tail = tail.trim_start_matches(|c: char| matches!(c, '.' | ' ' | '_' | '-'));
    if tail.is_empty() {
        return (None, None);
    }

    if let Some(p) = tail.rfind('-') {
        let group = &tail[p + 1..];
        let before = &tail[..p];
        let boundary_ok = p > 0
            && !before
                .chars()
                .last()
                .is_some_and(|c| matches!(c, '.' | ' ' | '_' | '-'));
        let web_dl = before.to_ascii_lowercase().ends_with("web");
        if !group.is_empty() && !group.contains(' ') && boundary_ok && !web_dl {
            let extra = non_empty(before);
            return (extra, Some(group.to_string()));
        }
    }

    (non_empty(tail), None)
}

fn non_empty(s: &str) -> Option<String> {
    let s = s.trim_matches(|c: char| matches!(c, '.' | ' ' | '_' | '-'));
    (!s.is_empty()).then(|| s.to_string())
}
