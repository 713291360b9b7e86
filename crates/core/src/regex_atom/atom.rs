//! The atom sum type and its combination rules.

use std::mem::discriminant;
use std::ops::{BitAnd, BitOr};

use regex_lite::Regex;

use super::{concat_all, make_literal, CharRange, RangeItem, RegexError, RenderStyle, Repeat};

/// One fragment of a regular expression.
///
/// Atoms are immutable; combining two atoms always yields a new one.
/// Equality is structural.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegexAtom {
    /// Matches the empty string.
    Empty,
    /// Word boundary, `\b`.
    Word,
    /// Start anchor, `^`.
    Start,
    /// End anchor, `$`.
    End,
    /// Any single character.
    Dot,
    /// A non-empty literal string.
    Literal(String),
    /// A character set.
    Range(CharRange),
    /// A sequence of at least two atoms.
    And(Vec<RegexAtom>),
    /// An alternation of at least two atoms.
    Or(Vec<RegexAtom>),
    Repeat(Box<Repeat>),
}

impl RegexAtom {
    /// A literal atom; unlike [`make_literal`] this rejects empty text.
    pub fn literal(text: &str) -> Result<Self, RegexError> {
        if text.is_empty() {
            return Err(RegexError::EmptyLiteral);
        }
        Ok(RegexAtom::Literal(text.to_string()))
    }

    /// A character interval `[start-end]`.
    pub fn range(start: char, end: char, exclude: bool) -> Result<Self, RegexError> {
        let item = RangeItem::new(start, end)?;
        Ok(RegexAtom::Range(CharRange::new(vec![item], exclude)))
    }

    /// `self` followed by `other`.
    pub fn concat(&self, other: &RegexAtom) -> RegexAtom {
        if matches!(other, RegexAtom::Empty) {
            return self.clone();
        }
        self.try_concat(other)
            .unwrap_or_else(|| RegexAtom::And(vec![self.clone(), other.clone()]))
    }

    fn try_concat(&self, other: &RegexAtom) -> Option<RegexAtom> {
        match (self, other) {
            (RegexAtom::Empty, _) => Some(other.clone()),
            (RegexAtom::Word, RegexAtom::Word)
            | (RegexAtom::Start, RegexAtom::Start)
            | (RegexAtom::End, RegexAtom::End) => Some(self.clone()),
            (RegexAtom::Literal(a), RegexAtom::Literal(b)) => {
                Some(RegexAtom::Literal(format!("{}{}", a, b)))
            }
            (_, RegexAtom::And(items)) => {
                Some(items.iter().fold(self.clone(), |acc, item| acc.concat(item)))
            }
            (RegexAtom::And(items), _) => {
                let mut items = items.clone();
                let merged = items.last().and_then(|last| last.try_concat(other));
                match merged {
                    Some(merged) => {
                        if let Some(last) = items.last_mut() {
                            *last = merged;
                        }
                    }
                    None => items.push(other.clone()),
                }
                Some(RegexAtom::And(items))
            }
            _ => None,
        }
    }

    /// `self` or `other`.
    ///
    /// Rules, in order: identical atoms collapse; a more general atom absorbs
    /// a more specific one; variant-specific factoring (common prefixes,
    /// range merging, sequence prefixes, alternation folding); otherwise a
    /// plain two-member alternation.
    pub fn alternate(&self, other: &RegexAtom) -> RegexAtom {
        self.try_alternate(other)
            .unwrap_or_else(|| RegexAtom::Or(vec![self.clone(), other.clone()]))
    }

    fn try_alternate(&self, other: &RegexAtom) -> Option<RegexAtom> {
        if self == other || self.subsumes(other) {
            return Some(self.clone());
        }
        if other.subsumes(self) {
            return Some(other.clone());
        }
        if discriminant(self) != discriminant(other) {
            self.or_special(other, false)
                .or_else(|| other.or_special(self, true))
        } else {
            self.or_special(other, false)
        }
    }

    /// Whether `self` matches everything `other` matches (best effort).
    fn subsumes(&self, other: &RegexAtom) -> bool {
        match self {
            RegexAtom::Dot => match other {
                RegexAtom::Range(_) => true,
                RegexAtom::Literal(text) => text.chars().count() == 1,
                _ => false,
            },
            RegexAtom::Range(range) => match range_items_of(range, other) {
                Some(items) => range.covers(&items),
                None => false,
            },
            _ => false,
        }
    }

    /// Variant-specific alternation. `reverse` means the result represents
    /// `other | self` and ordering must follow.
    fn or_special(&self, other: &RegexAtom, reverse: bool) -> Option<RegexAtom> {
        match self {
            RegexAtom::Literal(_) => {
                if !matches!(other, RegexAtom::Literal(_)) {
                    return None;
                }
                let (prefix, rest_a, rest_b) = self.contains_prefix(other)?;
                let alt = if reverse {
                    rest_b.alternate(&rest_a)
                } else {
                    rest_a.alternate(&rest_b)
                };
                Some(prefix.concat(&alt))
            }
            RegexAtom::Range(range) => {
                let items = range_items_of(range, other)?;
                Some(RegexAtom::Range(range.union(&items)))
            }
            RegexAtom::And(items) => {
                let theirs: Vec<RegexAtom> = match other {
                    RegexAtom::Literal(_) => vec![other.clone()],
                    RegexAtom::And(items) => items.clone(),
                    _ => return None,
                };
                let (a, b) = if reverse {
                    (theirs, items.clone())
                } else {
                    (items.clone(), theirs)
                };
                factor_sequences(&a, &b)
            }
            RegexAtom::Or(members) => {
                if let RegexAtom::Or(theirs) = other {
                    return Some(
                        theirs
                            .iter()
                            .fold(self.clone(), |acc, item| acc.alternate(item)),
                    );
                }
                for (index, member) in members.iter().enumerate() {
                    if let Some(merged) = member.try_alternate(other) {
                        let mut members = members.clone();
                        members[index] = merged;
                        return Some(RegexAtom::Or(members));
                    }
                }
                let mut members = members.clone();
                if reverse {
                    members.insert(0, other.clone());
                } else {
                    members.push(other.clone());
                }
                Some(RegexAtom::Or(members))
            }
            _ => None,
        }
    }

    /// Factor a common leading part out of two literals.
    ///
    /// Returns `(prefix, rest_of_self, rest_of_other)` such that
    /// `prefix & (rest_of_self | rest_of_other)` is equivalent to
    /// `self | other`. Two single characters become a character set with
    /// empty remainders.
    pub fn contains_prefix(&self, other: &RegexAtom) -> Option<(RegexAtom, RegexAtom, RegexAtom)> {
        let (RegexAtom::Literal(a), RegexAtom::Literal(b)) = (self, other) else {
            return None;
        };

        let mut a_chars = a.chars();
        let mut b_chars = b.chars();
        if let (Some(ca), None, Some(cb), None) =
            (a_chars.next(), a_chars.next(), b_chars.next(), b_chars.next())
        {
            let range = CharRange::new(vec![RangeItem::single(ca), RangeItem::single(cb)], false);
            return Some((RegexAtom::Range(range), RegexAtom::Empty, RegexAtom::Empty));
        }

        let common: usize = a
            .chars()
            .zip(b.chars())
            .take_while(|(x, y)| x == y)
            .map(|(x, _)| x.len_utf8())
            .sum();
        if common == 0 {
            return None;
        }
        Some((
            RegexAtom::Literal(a[..common].to_string()),
            make_literal(&a[common..]),
            make_literal(&b[common..]),
        ))
    }

    /// True when the atom matches exactly one string.
    pub fn matches_single_value(&self) -> bool {
        match self {
            RegexAtom::Empty | RegexAtom::Literal(_) | RegexAtom::Start | RegexAtom::End => true,
            RegexAtom::And(items) => items.iter().all(|item| item.matches_single_value()),
            RegexAtom::Range(range) => range.is_single_char(),
            _ => false,
        }
    }

    /// Shortest match length in characters; `None` when unbounded.
    pub fn min_length(&self) -> Option<usize> {
        match self {
            RegexAtom::Empty | RegexAtom::Word | RegexAtom::Start | RegexAtom::End => Some(0),
            RegexAtom::Dot | RegexAtom::Range(_) => Some(1),
            RegexAtom::Literal(text) => Some(text.chars().count()),
            RegexAtom::And(items) => items.iter().map(|i| i.min_length()).sum(),
            RegexAtom::Or(items) => fold_bound(items.iter().map(|i| i.min_length()), usize::min),
            RegexAtom::Repeat(r) => r.atom.min_length().map(|len| len * r.min as usize),
        }
    }

    /// Longest match length in characters; `None` when unbounded.
    pub fn max_length(&self) -> Option<usize> {
        match self {
            RegexAtom::And(items) => items.iter().map(|i| i.max_length()).sum(),
            RegexAtom::Or(items) => fold_bound(items.iter().map(|i| i.max_length()), usize::max),
            RegexAtom::Repeat(r) => {
                let max = r.max?;
                r.atom.max_length().map(|len| len * max as usize)
            }
            _ => self.min_length(),
        }
    }

    /// Compile with non-capturing groups.
    pub fn compile(&self) -> Result<Regex, RegexError> {
        self.compile_with_flags("")
    }

    /// Compile case-insensitively with non-capturing groups.
    pub fn compile_case_insensitive(&self) -> Result<Regex, RegexError> {
        self.compile_with_flags("(?i)")
    }

    fn compile_with_flags(&self, flags: &str) -> Result<Regex, RegexError> {
        let pattern = format!("{}{}", flags, self.render(RenderStyle::NonCapturing));
        Regex::new(&pattern).map_err(|e| RegexError::Compile {
            pattern,
            message: e.to_string(),
        })
    }
}

fn range_items_of(range: &CharRange, other: &RegexAtom) -> Option<Vec<RangeItem>> {
    match other {
        RegexAtom::Literal(text) if !range.exclude => {
            let mut chars = text.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => Some(vec![RangeItem::single(c)]),
                _ => None,
            }
        }
        RegexAtom::Range(theirs) if theirs.exclude == range.exclude => Some(theirs.items.clone()),
        _ => None,
    }
}

/// Alternate two sequences by factoring their shared head.
fn factor_sequences(a: &[RegexAtom], b: &[RegexAtom]) -> Option<RegexAtom> {
    let shared = a.iter().zip(b).take_while(|(x, y)| x == y).count();
    if shared > 0 {
        let alt = concat_all(&a[shared..]).alternate(&concat_all(&b[shared..]));
        return Some(concat_all(&a[..shared]).concat(&alt));
    }

    let (prefix, rest_a, rest_b) = a.first()?.contains_prefix(b.first()?)?;
    let rest_a = rest_a.concat(&concat_all(&a[1..]));
    let rest_b = rest_b.concat(&concat_all(&b[1..]));
    let alt = rest_a.alternate(&rest_b);
    if prefix.matches_single_value() || alt.matches_single_value() {
        Some(prefix.concat(&alt))
    } else {
        None
    }
}

fn fold_bound<I>(lengths: I, pick: fn(usize, usize) -> usize) -> Option<usize>
where
    I: Iterator<Item = Option<usize>>,
{
    let mut value: Option<usize> = None;
    for length in lengths {
        let length = length?;
        value = Some(match value {
            Some(v) => pick(v, length),
            None => length,
        });
    }
    value
}

impl BitOr for RegexAtom {
    type Output = RegexAtom;

    fn bitor(self, rhs: RegexAtom) -> RegexAtom {
        self.alternate(&rhs)
    }
}

impl BitOr for &RegexAtom {
    type Output = RegexAtom;

    fn bitor(self, rhs: &RegexAtom) -> RegexAtom {
        self.alternate(rhs)
    }
}

impl BitAnd for RegexAtom {
    type Output = RegexAtom;

    fn bitand(self, rhs: RegexAtom) -> RegexAtom {
        self.concat(&rhs)
    }
}

impl BitAnd for &RegexAtom {
    type Output = RegexAtom;

    fn bitand(self, rhs: &RegexAtom) -> RegexAtom {
        self.concat(rhs)
    }
}
