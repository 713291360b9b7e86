//! Matching parsed show names against the wanted show.

use once_cell::sync::Lazy;
use regex_lite::Regex;

use crate::regex_atom::{alternate_literals, RegexAtom, RegexError};

static NON_ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9]+").unwrap());
static TRAILING_YEAR: Lazy<Regex> = Lazy::new(|| Regex::new(r" ((?:19|20)\d{2})$").unwrap());
static TRAILING_COUNTRY: Lazy<Regex> = Lazy::new(|| Regex::new(r" (us|uk|au|nz|ca)$").unwrap());

/// Reduce a show name to lower-case words separated by single spaces.
pub fn normalize_show_name(name: &str) -> String {
    let lowered = name.to_lowercase().replace('&', " and ").replace('\'', "");
    NON_ALNUM.replace_all(&lowered, " ").trim().to_string()
}

/// A compiled alternation of every accepted spelling of a show.
#[derive(Debug, Clone)]
pub struct ShowNameMatcher {
    regex: Regex,
}

impl ShowNameMatcher {
    /// Build a matcher from a show's name and aliases. Each name is also
    /// accepted without a trailing year or country code.
    pub fn new<S: AsRef<str>>(names: &[S]) -> Result<Self, RegexError> {
        let mut variants: Vec<String> = Vec::new();
        for name in names {
            let normalized = normalize_show_name(name.as_ref());
            if normalized.is_empty() {
                continue;
            }
            for variant in [
                TRAILING_YEAR.replace(&normalized, "").into_owned(),
                TRAILING_COUNTRY.replace(&normalized, "").into_owned(),
                normalized,
            ] {
                if !variant.is_empty() && !variants.contains(&variant) {
                    variants.push(variant);
                }
            }
        }
        let atom = RegexAtom::Start
            .concat(&alternate_literals(&variants))
            .concat(&RegexAtom::End);
        Ok(Self {
            regex: atom.compile()?,
        })
    }

    pub fn is_match(&self, series_name: &str) -> bool {
        self.regex.is_match(&normalize_show_name(series_name))
    }

    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize_show_name("Show.Name"), "show name");
        assert_eq!(normalize_show_name("Mr. & Mrs. Smith"), "mr and mrs smith");
        assert_eq!(normalize_show_name("Grey's Anatomy"), "greys anatomy");
        assert_eq!(normalize_show_name("  The_Office (US) "), "the office us");
    }

    #[test]
    fn test_matcher() {
        let m = ShowNameMatcher::new(&["The Office (US)", "The Office"]).unwrap();
        assert!(m.is_match("The Office US"));
        assert!(m.is_match("the.office"));
        assert!(!m.is_match("The Office UK Christmas"));
        assert!(!m.is_match("Office"));
    }

    #[test]
    fn test_year_variant() {
        let m = ShowNameMatcher::new(&["Doctor Who (2005)"]).unwrap();
        assert!(m.is_match("Doctor Who 2005"));
        assert!(m.is_match("Doctor.Who"));
        assert!(!m.is_match("Doctor Who Confidential"));
    }

    #[test]
    fn test_empty_names_match_nothing() {
        let m = ShowNameMatcher::new::<&str>(&[]).unwrap();
        assert!(!m.is_match("Anything"));
    }
}
