use super::handle::Handle;
use crate::{Counter, Key};

/// Height of an empty subtree.
pub(crate) const EMPTY_HEIGHT: i32 = -1;

/// Which child link of a node a descent followed.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

// AVL node: one entry plus its cached subtree height. No parent link; the
// mutating algorithms carry their ancestors in an explicit path.
#[derive(Clone, Debug)]
pub(crate) struct Node {
    key: Key,
    counter: Counter,
    // 0 for a leaf; children that do not exist count as `EMPTY_HEIGHT`.
    height: i32,
    left: Option<Handle>,
    right: Option<Handle>,
}

impl Node {
    /// Creates a leaf holding a single entry.
    pub(crate) const fn leaf(key: Key, counter: Counter) -> Self {
        Self {
            key,
            counter,
            height: 0,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> Key {
        self.key
    }

    #[inline]
    pub(crate) const fn counter(&self) -> Counter {
        self.counter
    }

    #[inline]
    pub(crate) fn counter_mut(&mut self) -> &mut Counter {
        &mut self.counter
    }

    #[inline]
    pub(crate) const fn height(&self) -> i32 {
        self.height
    }

    pub(crate) fn set_height(&mut self, height: i32) {
        self.height = height;
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    pub(crate) fn set_left(&mut self, child: Option<Handle>) {
        self.left = child;
    }

    pub(crate) fn set_right(&mut self, child: Option<Handle>) {
        self.right = child;
    }

    pub(crate) fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    /// Overwrites this node's entry with another's, leaving links and height alone.
    ///
    /// Used when a node with two children is deleted: its in-order successor's
    /// entry is promoted into it before the successor node itself is removed.
    pub(crate) fn promote(&mut self, key: Key, counter: Counter) {
        self.key = key;
        self.counter = counter;
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn leaf_has_no_children() {
        let node = Node::leaf(5, 10);
        assert_eq!(node.key(), 5);
        assert_eq!(node.counter(), 10);
        assert_eq!(node.height(), 0);
        assert!(node.left().is_none());
        assert!(node.right().is_none());
    }

    #[test]
    fn child_follows_side() {
        let a = Handle::from_slot(1);
        let b = Handle::from_slot(2);

        let mut node = Node::leaf(0, 0);
        node.set_child(Side::Right, Some(a));
        assert_eq!(node.child(Side::Right), Some(a));
        assert_eq!(node.child(Side::Left), None);

        node.set_left(Some(b));
        assert_eq!(node.left(), Some(b));
        node.set_right(None);
        assert_eq!(node.child(Side::Right), None);
    }

    #[test]
    fn promote_keeps_structure() {
        let child = Handle::from_slot(3);
        let mut node = Node::leaf(1, 1);
        node.set_right(Some(child));
        node.set_height(1);

        node.promote(7, 70);
        assert_eq!((node.key(), node.counter()), (7, 70));
        assert_eq!(node.right(), Some(child));
        assert_eq!(node.height(), 1);
    }
}
