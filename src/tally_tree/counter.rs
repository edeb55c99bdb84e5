use super::TallyTree;
use crate::{Counter, Key};

impl TallyTree {
    /// Adds `amount` to the counter of `key` and returns the new counter.
    ///
    /// An absent key is inserted with `amount` as its counter. The sign of `amount`
    /// is not checked.
    ///
    /// The sum saturates at the bounds of [`Counter`] instead of wrapping around:
    /// increasing `Counter::MAX` by one leaves `Counter::MAX`, never a negative counter.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_tree::TallyTree;
    ///
    /// let mut tally = TallyTree::new();
    /// assert_eq!(tally.increase(20, 4), 4);
    /// assert_eq!(tally.increase(20, 5), 9);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn increase(&mut self, key: Key, amount: Counter) -> Counter {
        if let Some(counter) = self.raw.get_mut(key) {
            *counter = counter.saturating_add(amount);
            return *counter;
        }

        self.raw.insert(key, amount);
        amount
    }

    /// Subtracts `amount` from the counter of `key` and returns the new counter.
    ///
    /// Returns `0` without changing anything if `key` is absent. If the counter
    /// would drop below `1`, the key is removed and `0` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_tree::TallyTree;
    ///
    /// let mut tally = TallyTree::new();
    /// tally.insert(8, 5);
    /// assert_eq!(tally.reduce(8, 2), 3);
    /// assert_eq!(tally.reduce(8, 3), 0);
    /// assert!(!tally.contains_key(8));
    /// assert_eq!(tally.reduce(8, 1), 0);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h) for tree height h.
    pub fn reduce(&mut self, key: Key, amount: Counter) -> Counter {
        let Some(counter) = self.raw.get_mut(key) else {
            return 0;
        };

        let remaining = i64::from(*counter) - i64::from(amount);
        if remaining < 1 {
            self.raw.remove(key);
            return 0;
        }

        // `remaining` is in `1..=Counter::MAX` unless `amount` was negative.
        *counter = Counter::try_from(remaining).unwrap_or(Counter::MAX);
        *counter
    }
}
