use alloc::vec::Vec;

use super::TallyTree;
use crate::{Counter, Key};

impl TallyTree {
    /// Returns the entry with the smallest key strictly greater than `key`.
    ///
    /// `key` itself need not be present.
    ///
    /// # Complexity
    ///
    /// O(h) for tree height h.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_tree::TallyTree;
    ///
    /// let tally: TallyTree = [(5, 10), (3, 7), (8, 2)].into_iter().collect();
    /// assert_eq!(tally.next(5), Some((8, 2)));
    /// assert_eq!(tally.next(4), Some((5, 10)));
    /// assert_eq!(tally.next(8), None);
    /// ```
    #[must_use]
    pub fn next(&self, key: Key) -> Option<(Key, Counter)> {
        self.raw.next(key)
    }

    /// Returns the entry with the largest key strictly less than `key`.
    ///
    /// `key` itself need not be present.
    ///
    /// # Complexity
    ///
    /// O(h) for tree height h.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_tree::TallyTree;
    ///
    /// let tally: TallyTree = [(5, 10), (3, 7), (8, 2)].into_iter().collect();
    /// assert_eq!(tally.previous(5), Some((3, 7)));
    /// assert_eq!(tally.previous(100), Some((8, 2)));
    /// assert_eq!(tally.previous(3), None);
    /// ```
    #[must_use]
    pub fn previous(&self, key: Key) -> Option<(Key, Counter)> {
        self.raw.previous(key)
    }

    /// Returns the counters of every key in `low..=high`, ordered by key.
    ///
    /// The result is empty when no key qualifies, including when `low > high`.
    /// Counters are listed, not summed.
    ///
    /// # Complexity
    ///
    /// O(h + k) for tree height h and k keys in range.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_tree::TallyTree;
    ///
    /// let tally: TallyTree = [(5, 10), (3, 7), (8, 2)].into_iter().collect();
    /// assert_eq!(tally.range_counters(3, 8), [7, 10, 2]);
    /// assert_eq!(tally.range_counters(4, 7), [10]);
    /// assert!(tally.range_counters(100, 200).is_empty());
    /// ```
    #[must_use]
    pub fn range_counters(&self, low: Key, high: Key) -> Vec<Counter> {
        self.raw.range_counters(low, high)
    }
}
