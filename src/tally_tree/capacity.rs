use super::TallyTree;
use crate::raw::RawTallyTree;

impl TallyTree {
    /// Creates an empty tree with node storage for at least `capacity` keys.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_tree::TallyTree;
    ///
    /// let tally = TallyTree::with_capacity(32);
    /// assert!(tally.is_empty());
    /// assert!(tally.capacity() >= 32);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(capacity) for memory allocation.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        TallyTree {
            raw: RawTallyTree::with_capacity(capacity),
        }
    }

    /// Returns how many keys the tree can hold before its node storage grows.
    ///
    /// Slots freed by removals are reused before new storage is allocated.
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.raw.capacity()
    }
}
