use alloc::vec::Vec;

use super::handle::Handle;
use super::node::Node;

/// Slot storage for tree nodes. Released slots are recycled before the
/// backing vector grows, so handles stay small under churn.
#[derive(Clone, Debug)]
pub(crate) struct Arena {
    slots: Vec<Option<Node>>,
    vacant: Vec<Handle>,
}

impl Arena {
    pub(crate) const fn new() -> Self {
        Self {
            slots: Vec::new(),
            vacant: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            vacant: Vec::new(),
        }
    }

    pub(crate) fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    /// Number of live nodes.
    pub(crate) fn len(&self) -> usize {
        self.slots.len().saturating_sub(self.vacant.len())
    }

    pub(crate) fn alloc(&mut self, node: Node) -> Handle {
        if let Some(handle) = self.vacant.pop() {
            self.slots[handle.slot()] = Some(node);
            return handle;
        }

        assert!(
            self.slots.len() <= Handle::MAX,
            "`Arena::alloc()` - arena is full ({} nodes)",
            Handle::MAX + 1
        );
        self.slots.push(Some(node));
        Handle::from_slot(self.slots.len() - 1)
    }

    #[inline]
    pub(crate) fn get(&self, handle: Handle) -> &Node {
        self.slots[handle.slot()].as_ref().expect("`Arena::get()` - stale handle")
    }

    #[inline]
    pub(crate) fn get_mut(&mut self, handle: Handle) -> &mut Node {
        self.slots[handle.slot()].as_mut().expect("`Arena::get_mut()` - stale handle")
    }

    /// Removes the node and makes its slot available for reuse.
    pub(crate) fn release(&mut self, handle: Handle) -> Node {
        let node = self.slots[handle.slot()].take().expect("`Arena::release()` - stale handle");
        self.vacant.push(handle);
        node
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.vacant.clear();
    }
}
