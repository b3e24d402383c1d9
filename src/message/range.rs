//! Sparse lower-bound tables: `{0: a, 1000: b}` maps 0..=999 to `a` and everything from 1000 up to `b`.

use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RangeMap<T> {
    bounds: BTreeMap<i64, T>,
}

impl<T> Default for RangeMap<T> {
    fn default() -> Self {
        Self {
            bounds: BTreeMap::new(),
        }
    }
}

impl<T> RangeMap<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces any value already registered for `lower_bound`.
    pub fn insert(&mut self, lower_bound: i64, value: T) {
        self.bounds.insert(lower_bound, value);
    }

    /// Value of the largest lower bound `<= message_number`.
    #[must_use]
    pub fn get(&self, message_number: i64) -> Option<&T> {
        self.bounds
            .range(..=message_number)
            .next_back()
            .map(|(_, value)| value)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bounds.len()
    }
}

impl<T> FromIterator<(i64, T)> for RangeMap<T> {
    fn from_iter<I: IntoIterator<Item = (i64, T)>>(iter: I) -> Self {
        Self {
            bounds: iter.into_iter().collect(),
        }
    }
}

impl<T, const N: usize> From<[(i64, T); N]> for RangeMap<T> {
    fn from(entries: [(i64, T); N]) -> Self {
        entries.into_iter().collect()
    }
}
