use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::raw::{Handle, RawTallyTree};
use crate::{Counter, Key};

mod capacity;
mod counter;
mod order_statistic;

/// An ordered index from `i32` keys to `i32` counters, based on an [AVL tree].
///
/// Keys are unique. Lookups, neighbour queries and insertions take O(log n) time;
/// range collection takes O(log n + k) for `k` matching keys.
///
/// Inserting a key that is already present does nothing: the first counter stored
/// for a key wins until the key is removed or its counter is changed through
/// [`increase`](TallyTree::increase) or [`reduce`](TallyTree::reduce).
///
/// Removal does not rotate. After removals the tree remains correctly ordered and
/// every operation remains correct, but its height may exceed the AVL bound until
/// the affected region is rebuilt by further insertions.
///
/// # Examples
///
/// ```
/// use tally_tree::TallyTree;
///
/// let mut stock = TallyTree::new();
///
/// // receive some deliveries.
/// stock.increase(1001, 40);
/// stock.increase(1002, 15);
/// stock.increase(1001, 10);
///
/// assert_eq!(stock.count(1001), 50);
/// assert_eq!(stock.count(1003), 0);
///
/// // ship everything of 1002.
/// assert_eq!(stock.reduce(1002, 15), 0);
/// assert!(!stock.contains_key(1002));
///
/// // iterate over everything, in key order.
/// for (sku, units) in &stock {
///     println!("{sku}: {units}");
/// }
/// ```
///
/// A `TallyTree` can be collected from `(key, counter)` pairs; duplicate keys keep
/// their first counter:
///
/// ```
/// use tally_tree::TallyTree;
///
/// let tally: TallyTree = [(5, 10), (3, 7), (5, 99)].into_iter().collect();
/// assert_eq!(tally.len(), 2);
/// assert_eq!(tally.count(5), 10);
/// ```
///
/// [AVL tree]: https://en.wikipedia.org/wiki/AVL_tree
#[derive(Clone)]
pub struct TallyTree {
    raw: RawTallyTree,
}

impl TallyTree {
    /// Makes a new, empty `TallyTree`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_tree::TallyTree;
    ///
    /// let mut tally = TallyTree::new();
    /// tally.insert(1, 1);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        TallyTree {
            raw: RawTallyTree::new(),
        }
    }

    /// Returns the number of keys in the tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_tree::TallyTree;
    ///
    /// let mut tally = TallyTree::new();
    /// assert_eq!(tally.len(), 0);
    /// tally.insert(1, 1);
    /// assert_eq!(tally.len(), 1);
    /// ```
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the tree contains no keys.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Removes every key, keeping the allocated node storage.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the height of the tree: `-1` when empty, `0` for a single key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_tree::TallyTree;
    ///
    /// let tally: TallyTree = (1..=7).map(|key| (key, 1)).collect();
    /// assert_eq!(tally.height(), 2);
    /// ```
    #[must_use]
    pub fn height(&self) -> i32 {
        self.raw.height_of(self.raw.root())
    }

    /// Returns the counter stored for `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_tree::TallyTree;
    ///
    /// let mut tally = TallyTree::new();
    /// tally.insert(3, 7);
    /// assert_eq!(tally.get(3), Some(7));
    /// assert_eq!(tally.get(4), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn get(&self, key: Key) -> Option<Counter> {
        self.raw.get(key)
    }

    /// Returns the counter stored for `key`, or `0` if the key is absent.
    #[must_use]
    pub fn count(&self, key: Key) -> Counter {
        self.raw.get(key).unwrap_or(0)
    }

    /// Returns `true` if the tree holds `key`.
    #[must_use]
    pub fn contains_key(&self, key: Key) -> bool {
        self.raw.search(key).is_some()
    }

    /// Inserts `key` with `counter` if `key` is absent.
    ///
    /// Returns `false`, leaving the stored counter unchanged, if `key` is already
    /// present. Use [`increase`](TallyTree::increase) to add to an existing counter.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_tree::TallyTree;
    ///
    /// let mut tally = TallyTree::new();
    /// assert!(tally.insert(37, 1));
    /// assert!(!tally.insert(37, 5));
    /// assert_eq!(tally.count(37), 1);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, key: Key, counter: Counter) -> bool {
        self.raw.insert(key, counter)
    }

    /// Removes `key`, returning its counter if it was present.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_tree::TallyTree;
    ///
    /// let mut tally = TallyTree::new();
    /// tally.insert(1, 10);
    /// assert_eq!(tally.remove(1), Some(10));
    /// assert_eq!(tally.remove(1), None);
    /// ```
    ///
    /// # Complexity
    ///
    /// O(h) for tree height h.
    pub fn remove(&mut self, key: Key) -> Option<Counter> {
        self.raw.remove(key)
    }

    /// Gets an iterator over the `(key, counter)` pairs, sorted by key.
    ///
    /// # Examples
    ///
    /// ```
    /// use tally_tree::TallyTree;
    ///
    /// let tally: TallyTree = [(3, 30), (1, 10), (2, 20)].into_iter().collect();
    /// let entries: Vec<_> = tally.iter().collect();
    /// assert_eq!(entries, [(1, 10), (2, 20), (3, 30)]);
    /// ```
    #[must_use]
    pub fn iter(&self) -> Iter<'_> {
        Iter {
            raw: &self.raw,
            stack: SmallVec::new(),
            cursor: self.raw.root(),
            remaining: self.raw.len(),
        }
    }

    /// Gets an iterator over the keys, in ascending order.
    pub fn keys(&self) -> impl Iterator<Item = Key> + '_ {
        self.iter().map(|(key, _)| key)
    }
}

impl Default for TallyTree {
    /// Creates an empty `TallyTree`.
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for TallyTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl PartialEq for TallyTree {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl Eq for TallyTree {}

impl FromIterator<(Key, Counter)> for TallyTree {
    fn from_iter<I: IntoIterator<Item = (Key, Counter)>>(iter: I) -> Self {
        let mut tree = TallyTree::new();
        tree.extend(iter);
        tree
    }
}

impl Extend<(Key, Counter)> for TallyTree {
    /// Inserts every pair; keys already present keep their counter.
    fn extend<I: IntoIterator<Item = (Key, Counter)>>(&mut self, iter: I) {
        for (key, counter) in iter {
            self.insert(key, counter);
        }
    }
}

impl<'a> IntoIterator for &'a TallyTree {
    type Item = (Key, Counter);
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Iter<'a> {
        self.iter()
    }
}

/// An iterator over the entries of a `TallyTree`, in key order.
///
/// This `struct` is created by the [`iter`] method on [`TallyTree`].
///
/// [`iter`]: TallyTree::iter
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct Iter<'a> {
    raw: &'a RawTallyTree,
    // Ancestors whose entry has not been yielded yet.
    stack: SmallVec<[Handle; 32]>,
    cursor: Option<Handle>,
    remaining: usize,
}

impl Iterator for Iter<'_> {
    type Item = (Key, Counter);

    fn next(&mut self) -> Option<(Key, Counter)> {
        while let Some(handle) = self.cursor {
            self.stack.push(handle);
            self.cursor = self.raw.node(handle).left();
        }

        let handle = self.stack.pop()?;
        let node = self.raw.node(handle);
        self.cursor = node.right();
        self.remaining -= 1;
        Some((node.key(), node.counter()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl FusedIterator for Iter<'_> {}

impl Clone for Iter<'_> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw,
            stack: self.stack.clone(),
            cursor: self.cursor,
            remaining: self.remaining,
        }
    }
}

impl fmt::Debug for Iter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
