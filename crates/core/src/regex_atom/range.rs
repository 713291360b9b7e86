//! Character ranges (`[a-z]`, `[^0-9]`).

use super::RegexError;

/// An inclusive interval of characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RangeItem {
    pub start: char,
    pub end: char,
}

impl RangeItem {
    /// Create an interval, failing when `start > end`.
    pub fn new(start: char, end: char) -> Result<Self, RegexError> {
        if end < start {
            return Err(RegexError::InvalidRange { start, end });
        }
        Ok(Self { start, end })
    }

    /// A single-character interval.
    pub fn single(c: char) -> Self {
        Self { start: c, end: c }
    }

    /// Number of characters covered.
    pub fn len(&self) -> u32 {
        self.end as u32 - self.start as u32 + 1
    }

    pub fn is_single(&self) -> bool {
        self.start == self.end
    }

    /// Whether `other` lies entirely inside this interval.
    pub fn contains(&self, other: &RangeItem) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Merge with `other` when the two overlap or touch.
    fn merge(&self, other: &RangeItem) -> Option<RangeItem> {
        let (lo, hi) = if self.start <= other.start {
            (self, other)
        } else {
            (other, self)
        };
        if hi.start as u32 <= lo.end as u32 + 1 {
            Some(RangeItem {
                start: lo.start,
                end: lo.end.max(hi.end),
            })
        } else {
            None
        }
    }
}

/// A set of character intervals, optionally negated.
///
/// Items are kept sorted by start, with no two items overlapping or adjacent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CharRange {
    pub items: Vec<RangeItem>,
    pub exclude: bool,
}

impl CharRange {
    /// Build a normalized range from arbitrary intervals.
    pub fn new(items: Vec<RangeItem>, exclude: bool) -> Self {
        let merged = items
            .into_iter()
            .fold(Vec::new(), |acc, item| range_add(&acc, item));
        Self {
            items: sorted(merged),
            exclude,
        }
    }

    /// A copy of this range with `extra` intervals folded in.
    pub fn union(&self, extra: &[RangeItem]) -> Self {
        let merged = extra
            .iter()
            .fold(self.items.clone(), |acc, item| range_add(&acc, *item));
        Self {
            items: sorted(merged),
            exclude: self.exclude,
        }
    }

    /// Whether every interval in `items` is covered by one of ours.
    pub fn covers(&self, items: &[RangeItem]) -> bool {
        items
            .iter()
            .all(|b| self.items.iter().any(|a| a.contains(b)))
    }

    /// True when exactly one character is matched.
    pub fn is_single_char(&self) -> bool {
        !self.exclude && self.items.len() == 1 && self.items[0].is_single()
    }
}

/// Add `item` to `items`, merging with any interval it overlaps or touches.
///
/// Returns a fresh list; the input is never modified.
pub(crate) fn range_add(items: &[RangeItem], item: RangeItem) -> Vec<RangeItem> {
    for (index, existing) in items.iter().enumerate() {
        if existing.contains(&item) {
            return items.to_vec();
        }
        if let Some(merged) = existing.merge(&item) {
            let rest: Vec<RangeItem> = items
                .iter()
                .enumerate()
                .filter(|(i, _)| *i != index)
                .map(|(_, it)| *it)
                .collect();
            return range_add(&rest, merged);
        }
    }
    let mut out = items.to_vec();
    out.push(item);
    out
}

fn sorted(mut items: Vec<RangeItem>) -> Vec<RangeItem> {
    items.sort_by_key(|item| item.start);
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(a: char, b: char) -> RangeItem {
        RangeItem::new(a, b).unwrap()
    }

    #[test]
    fn test_invalid_item() {
        assert_eq!(
            RangeItem::new('z', 'a'),
            Err(RegexError::InvalidRange {
                start: 'z',
                end: 'a'
            })
        );
    }

    #[test]
    fn test_range_add_merges_adjacent() {
        let items = range_add(&[item('a', 'c')], RangeItem::single('d'));
        assert_eq!(items, vec![item('a', 'd')]);

        let items = range_add(&[item('b', 'c')], RangeItem::single('a'));
        assert_eq!(items, vec![item('a', 'c')]);
    }

    #[test]
    fn test_range_add_merges_overlap_and_contained() {
        let items = range_add(&[item('a', 'c')], item('b', 'f'));
        assert_eq!(items, vec![item('a', 'f')]);

        let items = range_add(&[item('a', 'z')], item('b', 'f'));
        assert_eq!(items, vec![item('a', 'z')]);

        let items = range_add(&[item('c', 'd')], item('a', 'z'));
        assert_eq!(items, vec![item('a', 'z')]);
    }

    #[test]
    fn test_range_add_chains_merges() {
        // 'b' joins a and c, which must then collapse into one run
        let items = range_add(&[item('a', 'a'), item('c', 'c')], RangeItem::single('b'));
        assert_eq!(items, vec![item('a', 'c')]);
    }

    #[test]
    fn test_range_add_leaves_input_untouched() {
        let original = vec![item('a', 'c'), item('x', 'z')];
        let _ = range_add(&original, item('d', 'e'));
        assert_eq!(original, vec![item('a', 'c'), item('x', 'z')]);
    }

    #[test]
    fn test_char_range_sorted() {
        let range = CharRange::new(
            vec![
                RangeItem::single('z'),
                RangeItem::single('a'),
                RangeItem::single('m'),
            ],
            false,
        );
        let starts: Vec<char> = range.items.iter().map(|i| i.start).collect();
        assert_eq!(starts, vec!['a', 'm', 'z']);
    }

    #[test]
    fn test_covers() {
        let range = CharRange::new(vec![item('a', 'z')], false);
        assert!(range.covers(&[item('b', 'd'), RangeItem::single('q')]));
        assert!(!range.covers(&[item('x', '~')]));
    }
}
