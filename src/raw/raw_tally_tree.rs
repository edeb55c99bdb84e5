use alloc::vec::Vec;
use core::cmp::Ordering;

use smallvec::SmallVec;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{EMPTY_HEIGHT, Node, Side};
use crate::{Counter, Key};

/// The AVL engine backing `TallyTree`.
#[derive(Clone, Debug)]
pub(crate) struct RawTallyTree {
    /// Arena storing all tree nodes.
    nodes: Arena,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
}

/// Path element for tracking traversal during mutations.
struct PathElement {
    /// Handle to the node at this level.
    node: Handle,
    /// Child link we descended through.
    side: Side,
}

/// Ancestors of the node being inserted or removed, root first.
type Path = SmallVec<[PathElement; 32]>;

impl RawTallyTree {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
        }
    }

    /// Returns the number of entries in the tree.
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree contains no entries.
    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Clears all entries from the tree.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) fn node(&self, handle: Handle) -> &Node {
        self.nodes.get(handle)
    }

    /// Height of the subtree behind `link`; an empty subtree is `EMPTY_HEIGHT`.
    #[inline]
    pub(crate) fn height_of(&self, link: Option<Handle>) -> i32 {
        link.map_or(EMPTY_HEIGHT, |handle| self.nodes.get(handle).height())
    }

    fn update_height(&mut self, handle: Handle) {
        let node = self.nodes.get(handle);
        let height = 1 + self.height_of(node.left()).max(self.height_of(node.right()));
        self.nodes.get_mut(handle).set_height(height);
    }

    fn entry(&self, handle: Handle) -> (Key, Counter) {
        let node = self.nodes.get(handle);
        (node.key(), node.counter())
    }

    fn min_of(&self, mut handle: Handle) -> Handle {
        while let Some(left) = self.nodes.get(handle).left() {
            handle = left;
        }
        handle
    }

    fn max_of(&self, mut handle: Handle) -> Handle {
        while let Some(right) = self.nodes.get(handle).right() {
            handle = right;
        }
        handle
    }

    /// Searches for a key and returns its node handle if found.
    pub(crate) fn search(&self, key: Key) -> Option<Handle> {
        let mut cursor = self.root;
        while let Some(handle) = cursor {
            let node = self.nodes.get(handle);
            cursor = match key.cmp(&node.key()) {
                Ordering::Equal => return Some(handle),
                Ordering::Greater => node.right(),
                Ordering::Less => node.left(),
            };
        }
        None
    }

    pub(crate) fn get(&self, key: Key) -> Option<Counter> {
        self.search(key).map(|handle| self.nodes.get(handle).counter())
    }

    pub(crate) fn get_mut(&mut self, key: Key) -> Option<&mut Counter> {
        let handle = self.search(key)?;
        Some(self.nodes.get_mut(handle).counter_mut())
    }

    /// Inserts `key` with `counter` unless `key` is already present.
    ///
    /// Returns `false` and leaves the stored counter untouched for a duplicate key.
    pub(crate) fn insert(&mut self, key: Key, counter: Counter) -> bool {
        let mut path = Path::new();
        let mut cursor = self.root;

        while let Some(handle) = cursor {
            let node = self.nodes.get(handle);
            let side = match key.cmp(&node.key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => return false,
            };
            path.push(PathElement { node: handle, side });
            cursor = node.child(side);
        }

        let mut subtree = self.nodes.alloc(Node::leaf(key, counter));
        while let Some(PathElement { node, side }) = path.pop() {
            self.nodes.get_mut(node).set_child(side, Some(subtree));
            subtree = self.rebalance_after_insert(node, side, key);
        }
        self.root = Some(subtree);
        true
    }

    /// Restores balance at `handle` after `key` was inserted below its `side` child.
    /// Returns the root of the (possibly rotated) subtree.
    fn rebalance_after_insert(&mut self, handle: Handle, side: Side, key: Key) -> Handle {
        let node = self.nodes.get(handle);
        let grown = node.child(side);
        let other = match side {
            Side::Left => node.right(),
            Side::Right => node.left(),
        };

        let root = match grown {
            Some(child) if self.height_of(grown) - self.height_of(other) == 2 => {
                let child_key = self.nodes.get(child).key();
                match side {
                    Side::Left if key < child_key => self.rotate_with_left_child(handle),
                    Side::Left => self.double_rotate_with_left_child(handle),
                    Side::Right if key > child_key => self.rotate_with_right_child(handle),
                    Side::Right => self.double_rotate_with_right_child(handle),
                }
            }
            _ => handle,
        };

        self.update_height(root);
        root
    }

    // Single right rotation: the left child becomes the subtree root.
    fn rotate_with_left_child(&mut self, handle: Handle) -> Handle {
        let pivot = self
            .nodes
            .get(handle)
            .left()
            .expect("`rotate_with_left_child()` - node has no left child");
        let inner = self.nodes.get(pivot).right();

        self.nodes.get_mut(handle).set_left(inner);
        self.nodes.get_mut(pivot).set_right(Some(handle));
        self.update_height(handle);
        self.update_height(pivot);

        tracing::trace!(from = self.nodes.get(handle).key(), to = self.nodes.get(pivot).key(), "rotated right");
        pivot
    }

    // Single left rotation: the right child becomes the subtree root.
    fn rotate_with_right_child(&mut self, handle: Handle) -> Handle {
        let pivot = self
            .nodes
            .get(handle)
            .right()
            .expect("`rotate_with_right_child()` - node has no right child");
        let inner = self.nodes.get(pivot).left();

        self.nodes.get_mut(handle).set_right(inner);
        self.nodes.get_mut(pivot).set_left(Some(handle));
        self.update_height(handle);
        self.update_height(pivot);

        tracing::trace!(from = self.nodes.get(handle).key(), to = self.nodes.get(pivot).key(), "rotated left");
        pivot
    }

    // Left-right case.
    fn double_rotate_with_left_child(&mut self, handle: Handle) -> Handle {
        let left = self
            .nodes
            .get(handle)
            .left()
            .expect("`double_rotate_with_left_child()` - node has no left child");
        let left = self.rotate_with_right_child(left);
        self.nodes.get_mut(handle).set_left(Some(left));
        self.rotate_with_left_child(handle)
    }

    // Right-left case.
    fn double_rotate_with_right_child(&mut self, handle: Handle) -> Handle {
        let right = self
            .nodes
            .get(handle)
            .right()
            .expect("`double_rotate_with_right_child()` - node has no right child");
        let right = self.rotate_with_left_child(right);
        self.nodes.get_mut(handle).set_right(Some(right));
        self.rotate_with_right_child(handle)
    }

    /// Removes `key`, returning its counter.
    ///
    /// Only heights are maintained on the way back up; no rotations are performed,
    /// so a long run of removals can leave subtrees more than one level out of balance.
    pub(crate) fn remove(&mut self, key: Key) -> Option<Counter> {
        let mut path = Path::new();
        let mut cursor = self.root;

        let target = loop {
            let handle = cursor?;
            let node = self.nodes.get(handle);
            let side = match key.cmp(&node.key()) {
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
                Ordering::Equal => break handle,
            };
            path.push(PathElement { node: handle, side });
            cursor = node.child(side);
        };

        let removed = self.nodes.get(target).counter();
        let links = {
            let node = self.nodes.get(target);
            (node.left(), node.right())
        };

        let replacement = match links {
            (Some(_), Some(right)) => {
                // Promote the in-order successor's entry, then unlink the successor,
                // which has no left child.
                path.push(PathElement {
                    node: target,
                    side: Side::Right,
                });
                let mut successor = right;
                while let Some(left) = self.nodes.get(successor).left() {
                    path.push(PathElement {
                        node: successor,
                        side: Side::Left,
                    });
                    successor = left;
                }

                let promoted = self.nodes.release(successor);
                tracing::trace!(removed = key, promoted = promoted.key(), "promoted successor");
                self.nodes.get_mut(target).promote(promoted.key(), promoted.counter());
                promoted.right()
            }
            (only, None) | (None, only) => {
                self.nodes.release(target);
                only
            }
        };

        let mut subtree = replacement;
        while let Some(PathElement { node, side }) = path.pop() {
            self.nodes.get_mut(node).set_child(side, subtree);
            self.update_height(node);
            subtree = Some(node);
        }
        self.root = subtree;

        Some(removed)
    }

    /// Returns the entry with the smallest key strictly greater than `key`.
    pub(crate) fn next(&self, key: Key) -> Option<(Key, Counter)> {
        let mut candidate = None;
        let mut cursor = self.root;

        while let Some(handle) = cursor {
            let node = self.nodes.get(handle);
            match node.key().cmp(&key) {
                Ordering::Greater => {
                    candidate = Some(handle);
                    cursor = node.left();
                }
                Ordering::Less => cursor = node.right(),
                Ordering::Equal => {
                    if let Some(right) = node.right() {
                        candidate = Some(self.min_of(right));
                    }
                    break;
                }
            }
        }

        candidate.map(|handle| self.entry(handle))
    }

    /// Returns the entry with the largest key strictly less than `key`.
    pub(crate) fn previous(&self, key: Key) -> Option<(Key, Counter)> {
        let mut candidate = None;
        let mut cursor = self.root;

        while let Some(handle) = cursor {
            let node = self.nodes.get(handle);
            match node.key().cmp(&key) {
                Ordering::Less => {
                    candidate = Some(handle);
                    cursor = node.right();
                }
                Ordering::Greater => cursor = node.left(),
                Ordering::Equal => {
                    if let Some(left) = node.left() {
                        candidate = Some(self.max_of(left));
                    }
                    break;
                }
            }
        }

        candidate.map(|handle| self.entry(handle))
    }

    /// Collects the counters of all keys in `low..=high`, in ascending key order.
    ///
    /// Subtrees that cannot hold a key in range are never entered.
    pub(crate) fn range_counters(&self, low: Key, high: Key) -> Vec<Counter> {
        let mut counters = Vec::new();
        let mut stack: SmallVec<[Handle; 32]> = SmallVec::new();
        let mut cursor = self.root;

        loop {
            while let Some(handle) = cursor {
                let node = self.nodes.get(handle);
                stack.push(handle);
                cursor = if low <= node.key() { node.left() } else { None };
            }

            let Some(handle) = stack.pop() else {
                break;
            };
            let node = self.nodes.get(handle);
            if low <= node.key() && node.key() <= high {
                counters.push(node.counter());
            }
            cursor = if high > node.key() { node.right() } else { None };
        }

        counters
    }
}
