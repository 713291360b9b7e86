//! Regex assembly.
//!
//! Builds compact regular expressions out of literal alternatives. Atoms are
//! immutable values combined with [`RegexAtom::concat`] (`&`) and
//! [`RegexAtom::alternate`] (`|`); each combination applies local rewrite
//! rules so that, for example, `"cat" | "car"` becomes `ca[rt]` and
//! `"color red" | "color blue"` becomes `color (red|blue)`.

mod atom;
mod range;
mod render;
mod repeat;

pub use atom::RegexAtom;
pub use range::{CharRange, RangeItem};
pub use render::{escape_literal, RenderStyle};
pub use repeat::Repeat;

use thiserror::Error;

/// Errors raised while assembling atoms.
///
/// These indicate a caller assembled an impossible pattern and are not
/// expected at runtime for well-formed input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegexError {
    #[error("invalid range: {start:?} is greater than {end:?}")]
    InvalidRange { start: char, end: char },

    #[error("invalid repeat: minimum {min} is greater than maximum {max}")]
    InvalidRepeat { min: u32, max: u32 },

    #[error("trivial repeat bounds {{{min},{max}}}")]
    TrivialRepeat { min: u32, max: u32 },

    #[error("repeat bounds overflow: {inner} times {outer}")]
    RepeatOverflow { inner: u32, outer: u32 },

    #[error("literal text must not be empty")]
    EmptyLiteral,

    #[error("failed to compile {pattern}: {message}")]
    Compile { pattern: String, message: String },
}

/// Build an atom matching `text` exactly. Empty text yields [`RegexAtom::Empty`].
pub fn make_literal(text: &str) -> RegexAtom {
    if text.is_empty() {
        RegexAtom::Empty
    } else {
        RegexAtom::Literal(text.to_string())
    }
}

/// Build a character set from individual characters.
///
/// Adjacent and duplicate characters are merged into runs and the runs are
/// sorted by code point. No characters yields [`RegexAtom::Empty`].
pub fn make_char_set<I>(chars: I, exclude: bool) -> RegexAtom
where
    I: IntoIterator<Item = char>,
{
    let items: Vec<RangeItem> = chars.into_iter().map(RangeItem::single).collect();
    if items.is_empty() {
        return RegexAtom::Empty;
    }
    RegexAtom::Range(CharRange::new(items, exclude))
}

/// Alternate every atom in order: `a | b | c | ...`.
pub fn alternate_all<'a, I>(atoms: I) -> RegexAtom
where
    I: IntoIterator<Item = &'a RegexAtom>,
{
    let mut iter = atoms.into_iter();
    match iter.next() {
        Some(first) => iter.fold(first.clone(), |acc, atom| acc.alternate(atom)),
        None => RegexAtom::Empty,
    }
}

/// Concatenate every atom in order: `a & b & c & ...`.
pub fn concat_all<'a, I>(atoms: I) -> RegexAtom
where
    I: IntoIterator<Item = &'a RegexAtom>,
{
    atoms
        .into_iter()
        .fold(RegexAtom::Empty, |acc, atom| acc.concat(atom))
}

/// Alternate a list of literal strings. Empty strings match the empty atom.
pub fn alternate_literals<S: AsRef<str>>(texts: &[S]) -> RegexAtom {
    let atoms: Vec<RegexAtom> = texts.iter().map(|t| make_literal(t.as_ref())).collect();
    alternate_all(&atoms)
}
