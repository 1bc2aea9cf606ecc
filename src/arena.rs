//! Slot storage for tree nodes. Nodes never move once allocated, so a [`NodeId`] stays valid
//! until the node is released. Released slots are reused, and each reuse bumps the slot's
//! generation so that an old handle to the slot is recognised as stale. A slot whose generation
//! runs out is retired instead of reused.

use std::ops::{Index, IndexMut};

/// A handle to a node owned by a [`Tree`][crate::Tree].
///
/// Handles are cheap to copy and compare. Two handles are equal only if they refer to the same
/// node, regardless of the keys stored in those nodes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: usize,
    generation: u32,
}

/// A single key and its links. `parent` is a back-reference only; the node "owns" whatever its
/// `left` and `right` slots point at.
#[derive(Clone, Debug)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
    /// Whether the node is currently linked into the tree.
    pub(crate) attached: bool,
}

impl<K> Node<K> {
    fn new(key: K) -> Self {
        Self {
            key,
            parent: None,
            left: None,
            right: None,
            attached: false,
        }
    }

    /// Drops every relation of this node. Used when the node leaves the tree.
    pub(crate) fn unlink(&mut self) {
        self.parent = None;
        self.left = None;
        self.right = None;
        self.attached = false;
    }
}

#[derive(Clone, Debug)]
struct Slot<K> {
    generation: u32,
    node: Option<Node<K>>,
}

#[derive(Clone, Debug)]
pub(crate) struct Arena<K> {
    slots: Vec<Slot<K>>,
    /// Indices of empty slots, reused before the `Vec` grows.
    free: Vec<usize>,
}

impl<K> Arena<K> {
    pub(crate) fn new() -> Self {
        Self::with_capacity(0)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Stores a new, detached node and returns its handle.
    pub(crate) fn alloc(&mut self, key: K) -> NodeId {
        match self.free.pop() {
            Some(index) => {
                let slot = &mut self.slots[index];
                debug_assert!(slot.node.is_none());
                slot.node = Some(Node::new(key));
                NodeId {
                    index,
                    generation: slot.generation,
                }
            }
            None => {
                let index = self.slots.len();
                self.slots.push(Slot {
                    generation: 0,
                    node: Some(Node::new(key)),
                });
                NodeId {
                    index,
                    generation: 0,
                }
            }
        }
    }

    /// Removes the node behind `id` from storage, returning its key. Stale handles yield `None`.
    pub(crate) fn free(&mut self, id: NodeId) -> Option<K> {
        let slot = self.slots.get_mut(id.index)?;
        if slot.generation != id.generation {
            return None;
        }
        let node = slot.node.take()?;
        if bump_generation(&mut slot.generation) {
            self.free.push(id.index);
        }
        Some(node.key)
    }

    pub(crate) fn get(&self, id: NodeId) -> Option<&Node<K>> {
        self.slots
            .get(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_ref())
    }

    pub(crate) fn get_mut(&mut self, id: NodeId) -> Option<&mut Node<K>> {
        self.slots
            .get_mut(id.index)
            .filter(|slot| slot.generation == id.generation)
            .and_then(|slot| slot.node.as_mut())
    }

    pub(crate) fn clear(&mut self) {
        for (index, slot) in self.slots.iter_mut().enumerate() {
            if slot.node.take().is_some() && bump_generation(&mut slot.generation) {
                self.free.push(index);
            }
        }
    }
}

/// Advances a vacated slot's generation. Returns `false` once the counter is exhausted; such a
/// slot must never be reused.
fn bump_generation(generation: &mut u32) -> bool {
    match generation.checked_add(1) {
        Some(next) => {
            *generation = next;
            true
        }
        None => false,
    }
}

// Indexing is reserved for handles reached through the tree's own links, which are live by
// construction. Public entry points go through `get`/`get_mut` first.
impl<K> Index<NodeId> for Arena<K> {
    type Output = Node<K>;

    fn index(&self, id: NodeId) -> &Node<K> {
        self.get(id).expect("Linked handle refers to a live node")
    }
}

impl<K> IndexMut<NodeId> for Arena<K> {
    fn index_mut(&mut self, id: NodeId) -> &mut Node<K> {
        self.get_mut(id).expect("Linked handle refers to a live node")
    }
}
