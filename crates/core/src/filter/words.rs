//! Ignore and require word lists, checked against raw titles before parsing.

use once_cell::sync::Lazy;
use regex_lite::Regex;
use thiserror::Error;
use tracing::debug;

use crate::regex_atom::{alternate_literals, escape_literal, RenderStyle};

const WORD_START: &str = r"(?:^|[\W_])";
const WORD_END: &str = r"(?:$|[\W_])";
const REGEX_PREFIX: &str = "regex:";

/// Releases nobody wants: subbed, fix-ups, samples, extras and dubs.
pub const BUILTIN_IGNORE_PATTERNS: &[&str] = &[
    r"sub(?:bed|ed|pack|s)",
    r"(?:dk|fin|heb|kor|nor|nordic|pl|swe)sub(?:bed|ed|s)?",
    r"(?:dir|sample|sub|nfo)fix",
    r"sample",
    r"(?:dvd)?extras",
    r"dub(?:bed)?",
];

static BUILTIN_IGNORE: Lazy<Vec<Regex>> = Lazy::new(|| {
    BUILTIN_IGNORE_PATTERNS
        .iter()
        .map(|p| Regex::new(&bounded(p)).unwrap())
        .collect()
});

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WordFilterError {
    #[error("invalid word filter `{word}`: {message}")]
    InvalidPattern { word: String, message: String },
}

/// Outcome of a failed word check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WordRejection {
    Ignored,
    MissingRequired,
}

/// Compiled ignore/require lists.
///
/// Plain ignore words are merged into a single alternation. Entries starting
/// with `regex:` are compiled as given. Every entry must match on word
/// boundaries, case-insensitively.
#[derive(Debug, Clone, Default)]
pub struct WordFilter {
    ignore: Vec<Regex>,
    require: Vec<Regex>,
}

impl WordFilter {
    pub fn new<S: AsRef<str>>(ignore: &[S], require: &[S]) -> Result<Self, WordFilterError> {
        let (plain, patterns) = split_entries(ignore);
        let mut ignore_res = Vec::with_capacity(patterns.len() + 1);
        if !plain.is_empty() {
            let lowered: Vec<String> = plain.iter().map(|w| w.to_lowercase()).collect();
            let alternation = alternate_literals(&lowered).render(RenderStyle::NonCapturing);
            ignore_res.push(compile(&plain.join(","), &format!("(?:{alternation})"))?);
        }
        for pattern in patterns {
            ignore_res.push(compile(pattern, pattern)?);
        }

        let (plain, patterns) = split_entries(require);
        let mut require_res = Vec::with_capacity(plain.len() + patterns.len());
        for word in plain {
            require_res.push(compile(word, &escape_literal(word))?);
        }
        for pattern in patterns {
            require_res.push(compile(pattern, pattern)?);
        }

        Ok(Self {
            ignore: ignore_res,
            require: require_res,
        })
    }

    /// Check a title against the built-in and configured lists.
    pub fn check(&self, title: &str) -> Result<(), WordRejection> {
        if let Some(re) = BUILTIN_IGNORE
            .iter()
            .chain(self.ignore.iter())
            .find(|re| re.is_match(title))
        {
            debug!(title = %title, pattern = %re.as_str(), "Ignored for containing ignore word");
            return Err(WordRejection::Ignored);
        }
        if let Some(re) = self.require.iter().find(|re| !re.is_match(title)) {
            debug!(title = %title, pattern = %re.as_str(), "Ignored for missing required word");
            return Err(WordRejection::MissingRequired);
        }
        Ok(())
    }

    pub fn passes(&self, title: &str) -> bool {
        self.check(title).is_ok()
    }
}

/// Split entries into plain words and `regex:` patterns, dropping blanks.
fn split_entries<S: AsRef<str>>(entries: &[S]) -> (Vec<&str>, Vec<&str>) {
    let mut plain = Vec::new();
    let mut patterns = Vec::new();
    for entry in entries {
        let entry = entry.as_ref().trim();
        match entry.strip_prefix(REGEX_PREFIX) {
            Some(pattern) if !pattern.trim().is_empty() => patterns.push(pattern.trim()),
            Some(_) => {}
            None if !entry.is_empty() => plain.push(entry),
            None => {}
        }
    }
    (plain, patterns)
}

fn bounded(pattern: &str) -> String {
    format!("(?i){WORD_START}{pattern}{WORD_END}")
}

fn compile(word: &str, pattern: &str) -> Result<Regex, WordFilterError> {
    Regex::new(&bounded(pattern)).map_err(|e| WordFilterError::InvalidPattern {
        word: word.to_string(),
        message: e.to_string(),
    })
}
