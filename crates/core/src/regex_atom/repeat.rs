//! Bounded and unbounded repetition.

use super::{alternate_all, RegexAtom, RegexError};

/// `atom{min,max}`; `max == None` is unbounded.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Repeat {
    pub atom: RegexAtom,
    pub min: u32,
    pub max: Option<u32>,
}

impl RegexAtom {
    /// Repeat this atom between `min` and `max` times.
    ///
    /// Repeating a repeat multiplies the bounds, except when the outer bound
    /// is exactly `{0,1}`. Repeating an alternation normalizes members that are
    /// themselves optional. Fails when `max < min`, `max == 0` or the bounds
    /// are the no-op `{1,1}`, and when multiplied bounds overflow. Repeating
    /// `Empty` is still `Empty`.
    pub fn repeat(&self, min: u32, max: Option<u32>) -> Result<RegexAtom, RegexError> {
        check_bounds(min, max)?;

        let (min, max, atom) = match self {
            RegexAtom::Repeat(inner) if !(min == 0 && max == Some(1)) => {
                let max = match (inner.max, max) {
                    (Some(a), Some(b)) => Some(
                        a.checked_mul(b)
                            .ok_or(RegexError::RepeatOverflow { inner: a, outer: b })?,
                    ),
                    _ => None,
                };
                let min = min
                    .checked_mul(inner.min)
                    .ok_or(RegexError::RepeatOverflow { inner: inner.min, outer: min })?;
                (min, max, inner.atom.clone())
            }
            RegexAtom::Or(members) => optimize_repeat_or(min, max, members),
            _ => (min, max, self.clone()),
        };

        if atom == RegexAtom::Empty {
            return Ok(RegexAtom::Empty);
        }
        check_bounds(min, max)?;
        Ok(RegexAtom::Repeat(Box::new(Repeat { atom, min, max })))
    }
}

fn check_bounds(min: u32, max: Option<u32>) -> Result<(), RegexError> {
    if let Some(max) = max {
        if max < min {
            return Err(RegexError::InvalidRepeat { min, max });
        }
        if max == 0 || (min == 1 && max == 1) {
            return Err(RegexError::TrivialRepeat { min, max });
        }
    }
    Ok(())
}

/// Build a repeat without bound normalization, collapsing `{1,1}`.
fn raw_repeat(atom: RegexAtom, min: u32, max: Option<u32>) -> RegexAtom {
    if min == 1 && max == Some(1) {
        return atom;
    }
    RegexAtom::Repeat(Box::new(Repeat { atom, min, max }))
}

/// Hoist optional members out of a repeated alternation.
///
/// An empty member, or an optional member under a `{1,..}` bound, relaxes the
/// outer minimum to zero; members whose own bounds become redundant are
/// unwrapped.
fn optimize_repeat_or(
    mut min: u32,
    max: Option<u32>,
    members: &[RegexAtom],
) -> (u32, Option<u32>, RegexAtom) {
    for member in members {
        match member {
            RegexAtom::Empty => min = 0,
            RegexAtom::Repeat(r) if r.min == 0 && min == 1 => min = 0,
            _ => {}
        }
    }

    let both_unbounded = |item_max: Option<u32>| max.is_none() && item_max.is_none();

    let content: Vec<RegexAtom> = members
        .iter()
        .filter(|m| !matches!(m, RegexAtom::Empty))
        .map(|member| match member {
            RegexAtom::Repeat(r) => match r.min {
                0 if min <= 1 => {
                    if both_unbounded(r.max) {
                        r.atom.clone()
                    } else {
                        raw_repeat(r.atom.clone(), 1, r.max)
                    }
                }
                0 => member.clone(),
                1 if both_unbounded(r.max) => r.atom.clone(),
                1 => member.clone(),
                n if both_unbounded(r.max) => raw_repeat(r.atom.clone(), n, Some(n)),
                _ => member.clone(),
            },
            other => other.clone(),
        })
        .collect();

    (min, max, alternate_all(&content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::regex_atom::make_literal;

    fn a() -> RegexAtom {
        make_literal("a")
    }

    #[test]
    fn test_invalid_bounds() {
        assert_eq!(
            a().repeat(3, Some(2)),
            Err(RegexError::InvalidRepeat { min: 3, max: 2 })
        );
        assert_eq!(
            a().repeat(0, Some(0)),
            Err(RegexError::TrivialRepeat { min: 0, max: 0 })
        );
        assert_eq!(
            a().repeat(1, Some(1)),
            Err(RegexError::TrivialRepeat { min: 1, max: 1 })
        );
    }

    #[test]
    fn test_invalid_bounds_on_nested_repeat() {
        let inner = a().repeat(1, Some(3)).unwrap();
        assert_eq!(
            inner.repeat(2, Some(1)),
            Err(RegexError::InvalidRepeat { min: 2, max: 1 })
        );

        let optional = a().repeat(0, Some(1)).unwrap();
        assert_eq!(
            optional.repeat(1, Some(1)),
            Err(RegexError::TrivialRepeat { min: 1, max: 1 })
        );
        assert_eq!(
            optional.repeat(0, Some(0)),
            Err(RegexError::TrivialRepeat { min: 0, max: 0 })
        );
    }

    #[test]
    fn test_repeat_bound_overflow_is_error() {
        let big = a().repeat(70_000, Some(70_000)).unwrap();
        assert_eq!(
            big.repeat(70_000, Some(70_000)),
            Err(RegexError::RepeatOverflow {
                inner: 70_000,
                outer: 70_000
            })
        );

        let unbounded = a().repeat(70_000, None).unwrap();
        assert!(matches!(
            unbounded.repeat(70_000, None),
            Err(RegexError::RepeatOverflow { .. })
        ));
    }

    #[test]
    fn test_repeat_of_empty_is_empty() {
        assert_eq!(RegexAtom::Empty.repeat(0, None), Ok(RegexAtom::Empty));
        assert_eq!(RegexAtom::Empty.repeat(2, Some(3)), Ok(RegexAtom::Empty));
        assert_eq!(
            RegexAtom::Empty.repeat(3, Some(2)),
            Err(RegexError::InvalidRepeat { min: 3, max: 2 })
        );

        let all_empty = RegexAtom::Or(vec![RegexAtom::Empty]);
        assert_eq!(all_empty.repeat(1, None), Ok(RegexAtom::Empty));
    }

    #[test]
    fn test_repeat_of_repeat_multiplies() {
        let inner = a().repeat(1, Some(3)).unwrap();
        let outer = inner.repeat(2, Some(2)).unwrap();
        assert_eq!(outer.to_string(), "a{2,6}");
        assert_eq!(outer.min_length(), Some(2));
        assert_eq!(outer.max_length(), Some(6));

        let unbounded = a().repeat(1, None).unwrap().repeat(2, Some(3)).unwrap();
        assert_eq!(unbounded.to_string(), "a{2,}");
        assert_eq!(unbounded.max_length(), None);
    }

    #[test]
    fn test_optional_repeat_is_not_multiplied() {
        let inner = a().repeat(2, Some(3)).unwrap();
        let outer = inner.repeat(0, Some(1)).unwrap();
        assert_eq!(outer.to_string(), "(a{2,3})?");
        assert_eq!(outer.min_length(), Some(0));
        assert_eq!(outer.max_length(), Some(3));
    }

    #[test]
    fn test_repeat_or_with_empty_member_relaxes_min() {
        let alt = make_literal("ab").alternate(&make_literal("a"));
        // "ab" | "a" factors to a(b|) whose repeat is an And, not an Or
        assert!(matches!(alt, RegexAtom::And(_)));

        let alt = RegexAtom::Or(vec![RegexAtom::Empty, make_literal("xy")]);
        let rep = alt.repeat(1, None).unwrap();
        assert_eq!(rep.to_string(), "(xy)*");
    }

    #[test]
    fn test_repeat_or_unwraps_unbounded_member() {
        let star = a().repeat(0, None).unwrap();
        let alt = RegexAtom::Or(vec![star, make_literal("b")]);
        let rep = alt.repeat(1, None).unwrap();
        assert_eq!(rep.to_string(), "[ab]*");
    }

    #[test]
    fn test_repeat_or_collapsing_to_single_pass() {
        let optional = a().repeat(0, Some(1)).unwrap();
        let alt = RegexAtom::Or(vec![optional, make_literal("bc")]);
        // {0,1} stays the outer bound; members keep their own bounds
        let rep = alt.repeat(0, Some(1)).unwrap();
        assert_eq!(rep.to_string(), "(a|bc)?");
    }

    #[test]
    fn test_length_of_unbounded_repeat() {
        let rep = make_literal("ab").repeat(2, None).unwrap();
        assert_eq!(rep.min_length(), Some(4));
        assert_eq!(rep.max_length(), None);
    }
}
