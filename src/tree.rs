//! An unbalanced BST whose nodes live in an arena owned by the tree. Nodes are addressed by
//! [`NodeId`] handles, so a caller can hold on to a node, remove it, re-insert it, or walk to its
//! neighbours without searching by key again.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::Tree;
//!
//! let mut tree = Tree::new();
//! for key in [5, 3, 8, 1, 4, 7, 9] {
//!     tree.insert_key(key);
//! }
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 3, 4, 5, 7, 8, 9]);
//!
//! // Handles let us navigate in order.
//! let four = tree.find(&4).unwrap();
//! let five = tree.successor(four).unwrap().unwrap();
//! assert_eq!(tree.key(five), Some(&5));
//!
//! // Removing a node unlinks it but keeps it around for re-use.
//! tree.remove(five).unwrap();
//! assert_eq!(tree.to_string(), "1 3 4 7 8 9");
//! tree.insert(five).unwrap();
//! assert_eq!(tree.to_string(), "1 3 4 5 7 8 9");
//! ```

use std::cmp::Ordering;
use std::collections::HashSet;
use std::iter::FromIterator;

use crate::arena::{Arena, Node};
use crate::{NodeId, TreeError};

/// A Binary Search Tree over keys of type `K`. No rebalancing is done, so the height of the tree
/// depends on the order in which keys are inserted. Equal keys are allowed and are placed to the
/// left of the nodes they compare equal to.
#[derive(Clone)]
pub struct Tree<K> {
    nodes: Arena<K>,
    root: Option<NodeId>,
    /// Number of nodes linked into the tree. Detached nodes are not counted.
    len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// Generates a new, empty `Tree` with room for `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            len: 0,
        }
    }

    /// The number of nodes linked into the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no nodes are linked into the tree.
    pub fn is_empty(&self) -> bool {
        debug_assert!(self.len != 0 || self.root.is_none());
        self.len == 0
    }

    /// The top node of the tree, if there is one.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Removes and drops every node, linked or not. All existing handles become stale.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.len = 0;
    }

    /// Creates a detached node holding `key`. The node is not part of the tree until it is passed
    /// to [`insert`][Tree::insert].
    pub fn alloc(&mut self, key: K) -> NodeId {
        self.nodes.alloc(key)
    }

    /// Destroys a detached node and hands its key back.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    /// let id = tree.insert_key(1);
    ///
    /// // Still linked.
    /// assert_eq!(tree.release(id), Err(TreeError::Attached(id)));
    ///
    /// tree.remove(id).unwrap();
    /// assert_eq!(tree.release(id), Ok(1));
    ///
    /// // The handle is now stale.
    /// assert_eq!(tree.release(id), Err(TreeError::UnknownNode(id)));
    /// ```
    pub fn release(&mut self, id: NodeId) -> Result<K, TreeError> {
        let node = self.nodes.get(id).ok_or(TreeError::UnknownNode(id))?;
        if node.attached {
            return Err(TreeError::Attached(id));
        }
        log::trace!("releasing node {:?}", id);
        self.nodes.free(id).ok_or(TreeError::UnknownNode(id))
    }

    /// The key stored in the node, or `None` for a stale handle. Works for detached nodes too.
    pub fn key(&self, id: NodeId) -> Option<&K> {
        self.nodes.get(id).map(|node| &node.key)
    }

    /// The node's parent, or `None` for the root, a detached node, or a stale handle.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.parent)
    }

    /// The node's left child, if any.
    pub fn left(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.left)
    }

    /// The node's right child, if any.
    pub fn right(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id).and_then(|node| node.right)
    }

    /// Returns `true` if `id` refers to a live node that is linked into the tree.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.get(id).map_or(false, |node| node.attached)
    }

    /// Unlinks the node from the tree. The node keeps its key and can be inserted again or
    /// [released][Tree::release].
    ///
    /// A node with two children is replaced by its in-order successor, so no other node changes
    /// its key.
    pub fn remove(&mut self, id: NodeId) -> Result<(), TreeError> {
        self.attached(id)?;
        self.detach(id);
        Ok(())
    }

    /// The node holding the smallest key, or `None` if the tree is empty.
    pub fn minimum(&self) -> Option<NodeId> {
        self.root.map(|root| self.leftmost(root))
    }

    /// The node holding the largest key, or `None` if the tree is empty.
    pub fn maximum(&self) -> Option<NodeId> {
        self.root.map(|root| self.rightmost(root))
    }

    /// The node holding the smallest key in the subtree rooted at `id`.
    pub fn subtree_minimum(&self, id: NodeId) -> Result<NodeId, TreeError> {
        self.attached(id)?;
        Ok(self.leftmost(id))
    }

    /// The node holding the largest key in the subtree rooted at `id`.
    pub fn subtree_maximum(&self, id: NodeId) -> Result<NodeId, TreeError> {
        self.attached(id)?;
        Ok(self.rightmost(id))
    }

    /// The node that follows `id` in key order. `Ok(None)` means `id` is the maximum.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree: Tree<_> = vec![2, 1, 3].into_iter().collect();
    /// let two = tree.find(&2).unwrap();
    /// let three = tree.successor(two).unwrap().unwrap();
    ///
    /// assert_eq!(tree.key(three), Some(&3));
    /// assert_eq!(tree.successor(three), Ok(None));
    /// ```
    pub fn successor(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        self.attached(id)?;
        Ok(self.next_node(id))
    }

    /// The node that precedes `id` in key order. `Ok(None)` means `id` is the minimum.
    pub fn predecessor(&self, id: NodeId) -> Result<Option<NodeId>, TreeError> {
        self.attached(id)?;
        Ok(self.prev_node(id))
    }

    /// The node holding the `k`-th smallest key, counting from 1. Returns `None` when `k` is 0 or
    /// larger than the number of nodes.
    ///
    /// This walks `k - 1` successors from the minimum so it is `O(k + height)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
    ///
    /// assert_eq!(tree.kth(3).and_then(|id| tree.key(id)), Some(&4));
    /// assert_eq!(tree.kth(0), None);
    /// assert_eq!(tree.kth(8), None);
    /// ```
    pub fn kth(&self, k: usize) -> Option<NodeId> {
        if k == 0 {
            return None;
        }
        let first = self.minimum()?;
        (1..k).try_fold(first, |node, _| self.next_node(node))
    }

    /// Checks that `id` is live and linked, returning its node.
    fn attached(&self, id: NodeId) -> Result<&Node<K>, TreeError> {
        let node = self.nodes.get(id).ok_or(TreeError::UnknownNode(id))?;
        if node.attached {
            Ok(node)
        } else {
            Err(TreeError::Detached(id))
        }
    }

    fn leftmost(&self, mut id: NodeId) -> NodeId {
        while let Some(left) = self.nodes[id].left {
            id = left;
        }
        id
    }

    fn rightmost(&self, mut id: NodeId) -> NodeId {
        while let Some(right) = self.nodes[id].right {
            id = right;
        }
        id
    }

    /// In-order successor of a linked node.
    pub(crate) fn next_node(&self, id: NodeId) -> Option<NodeId> {
        if let Some(right) = self.nodes[id].right {
            return Some(self.leftmost(right));
        }

        // Climb while we're coming up from a right child. The first parent we reach from its left
        // side is next in order.
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            if self.nodes[parent].right != Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// In-order predecessor of a linked node.
    pub(crate) fn prev_node(&self, id: NodeId) -> Option<NodeId> {
        if let Some(left) = self.nodes[id].left {
            return Some(self.rightmost(left));
        }

        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            if self.nodes[parent].left != Some(current) {
                return Some(parent);
            }
            current = parent;
        }
        None
    }

    /// Unlinks a node known to be in the tree and returns the node that took its place.
    fn detach(&mut self, id: NodeId) -> Option<NodeId> {
        let (left, right) = {
            let node = &self.nodes[id];
            (node.left, node.right)
        };

        let replacement = match (left, right) {
            (None, None) => {
                self.transplant(id, None);
                None
            }
            (Some(child), None) | (None, Some(child)) => {
                self.transplant(id, Some(child));
                Some(child)
            }
            (Some(left), Some(right)) => {
                // The successor is the minimum of the right subtree, so it has no left child and
                // every key in `left` is still smaller than it.
                let successor = self.leftmost(right);
                if successor != right {
                    let successor_right = self.nodes[successor].right;
                    self.transplant(successor, successor_right);
                    self.nodes[successor].right = Some(right);
                    self.nodes[right].parent = Some(successor);
                }
                self.transplant(id, Some(successor));
                self.nodes[successor].left = Some(left);
                self.nodes[left].parent = Some(successor);
                Some(successor)
            }
        };

        self.nodes[id].unlink();
        self.len -= 1;
        log::trace!("removed node {:?}, replaced by {:?}", id, replacement);

        if cfg!(debug_assertions) {
            if let Some(replacement) = replacement {
                self.check_links(replacement);
            }
            if let Some(root) = self.root {
                self.check_links(root);
            }
        }
        replacement
    }

    /// Puts the subtree rooted at `replacement` where the subtree rooted at `target` hangs.
    /// `replacement` is first cut loose from its own parent. `target` keeps its stale `parent`
    /// link, which the caller overwrites or clears.
    fn transplant(&mut self, target: NodeId, replacement: Option<NodeId>) {
        if let Some(replacement) = replacement {
            if let Some(old_parent) = self.nodes[replacement].parent {
                self.replace_child(old_parent, replacement, None);
            }
        }

        let parent = self.nodes[target].parent;
        match parent {
            Some(parent) => self.replace_child(parent, target, replacement),
            None => self.root = replacement,
        }

        if let Some(replacement) = replacement {
            self.nodes[replacement].parent = parent;
        }
    }

    /// Points whichever child slot of `parent` holds `old` at `new` instead. Slots are matched by
    /// handle rather than by key so that equal keys can't confuse left and right.
    fn replace_child(&mut self, parent: NodeId, old: NodeId, new: Option<NodeId>) {
        let parent = &mut self.nodes[parent];
        if parent.left == Some(old) {
            parent.left = new;
        } else if parent.right == Some(old) {
            parent.right = new;
        }
    }

    /// Asserts that a linked node and its direct neighbours agree on their relations.
    fn check_links(&self, id: NodeId) {
        let node = &self.nodes[id];
        assert!(node.attached);
        match node.parent {
            Some(parent) => {
                let parent = &self.nodes[parent];
                assert!(parent.left == Some(id) || parent.right == Some(id));
            }
            None => assert_eq!(self.root, Some(id)),
        }
        for child in [node.left, node.right].iter().flatten() {
            assert_eq!(self.nodes[*child].parent, Some(id));
        }
    }
}

impl<K> Tree<K>
where
    K: Ord,
{
    /// Builds a tree of the given keys inserted in median order, so the tree starts out as
    /// shallow as possible. Later inserts and removes do not keep it balanced.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree = Tree::balanced(vec![6, 2, 4, 1, 3, 5, 7]);
    ///
    /// assert_eq!(tree.root().and_then(|id| tree.key(id)), Some(&4));
    /// assert_eq!(tree.to_string(), "1 2 3 4 5 6 7");
    /// ```
    pub fn balanced<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
    {
        let mut keys: Vec<K> = keys.into_iter().collect();
        keys.sort();

        let mut tree = Self::with_capacity(keys.len());
        let ids: Vec<_> = keys.into_iter().map(|key| tree.nodes.alloc(key)).collect();
        tree.link_balanced(&ids);
        log::trace!("built balanced tree of {} nodes", ids.len());
        tree
    }

    /// Links the given detached nodes by inserting the middle one first and then recursing on
    /// each half. When `ids` is sorted by key and the tree starts empty, the result has minimal
    /// height.
    ///
    /// All handles are checked before anything is linked: a stale handle, a linked node, or a
    /// handle listed twice fails the whole call.
    pub fn build_balanced(&mut self, ids: &[NodeId]) -> Result<(), TreeError> {
        let mut seen = HashSet::with_capacity(ids.len());
        for &id in ids {
            let node = self.nodes.get(id).ok_or(TreeError::UnknownNode(id))?;
            if node.attached || !seen.insert(id) {
                return Err(TreeError::Attached(id));
            }
        }

        self.link_balanced(ids);
        log::trace!("inserted {} nodes in median order", ids.len());
        Ok(())
    }

    /// Links a detached node into the tree.
    ///
    /// The node goes right of every node whose key is strictly smaller, and left otherwise, so
    /// a duplicate lands to the left of the existing copies.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::{Tree, TreeError};
    ///
    /// let mut tree = Tree::new();
    /// let id = tree.alloc(1);
    /// assert!(!tree.contains(id));
    ///
    /// tree.insert(id).unwrap();
    /// assert_eq!(tree.find(&1), Some(id));
    ///
    /// // A node can only be linked once.
    /// assert_eq!(tree.insert(id), Err(TreeError::Attached(id)));
    /// ```
    pub fn insert(&mut self, id: NodeId) -> Result<(), TreeError> {
        let node = self.nodes.get(id).ok_or(TreeError::UnknownNode(id))?;
        if node.attached {
            return Err(TreeError::Attached(id));
        }
        self.link(id);
        Ok(())
    }

    /// Allocates a node for `key` and links it into the tree.
    pub fn insert_key(&mut self, key: K) -> NodeId {
        let id = self.nodes.alloc(key);
        self.link(id);
        id
    }

    /// Removes and destroys one node holding `key`, returning the key. If the key appears more
    /// than once, the node [`find`][Tree::find] would return goes.
    pub fn remove_key(&mut self, key: &K) -> Option<K> {
        let id = self.find(key)?;
        self.detach(id);
        log::trace!("releasing node {:?}", id);
        self.nodes.free(id)
    }

    /// Finds a node holding `key`, or `None` if there is no such node.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree: Tree<_> = vec![5, 3, 8].into_iter().collect();
    ///
    /// assert_eq!(tree.find(&3).and_then(|id| tree.key(id)), Some(&3));
    /// assert_eq!(tree.find(&6), None);
    /// ```
    pub fn find(&self, key: &K) -> Option<NodeId> {
        self.descend(key, self.root)
    }

    /// Like [`find`][Tree::find] but only searches the subtree rooted at `subtree`.
    pub fn find_in(&self, key: &K, subtree: NodeId) -> Result<Option<NodeId>, TreeError> {
        self.attached(subtree)?;
        Ok(self.descend(key, Some(subtree)))
    }

    fn descend(&self, key: &K, mut current: Option<NodeId>) -> Option<NodeId> {
        while let Some(id) = current {
            let node = &self.nodes[id];
            current = match node.key.cmp(key) {
                Ordering::Less => node.right,
                Ordering::Equal => return Some(id),
                Ordering::Greater => node.left,
            };
        }
        None
    }

    fn link_balanced(&mut self, ids: &[NodeId]) {
        if !ids.is_empty() {
            let mid = ids.len() / 2;
            self.link(ids[mid]);
            self.link_balanced(&ids[..mid]);
            self.link_balanced(&ids[mid + 1..]);
        }
    }

    /// Descends to the first empty slot for a detached node and links it there.
    fn link(&mut self, id: NodeId) {
        let mut parent = None;
        let mut go_right = false;
        let mut child = self.root;
        while let Some(current) = child {
            let node = &self.nodes[current];
            go_right = node.key < self.nodes[id].key;
            parent = Some(current);
            child = if go_right { node.right } else { node.left };
        }

        match parent {
            None => self.root = Some(id),
            Some(parent) if go_right => self.nodes[parent].right = Some(id),
            Some(parent) => self.nodes[parent].left = Some(id),
        }
        let node = &mut self.nodes[id];
        node.parent = parent;
        node.attached = true;
        self.len += 1;
        log::trace!("inserted node {:?} under {:?}", id, parent);

        if cfg!(debug_assertions) {
            self.check_links(id);
            if let Some(parent) = parent {
                let (node, parent) = (&self.nodes[id], &self.nodes[parent]);
                if parent.left == Some(id) {
                    assert!(node.key <= parent.key);
                } else {
                    assert!(node.key > parent.key);
                }
            }
        }
    }
}

impl<K> FromIterator<K> for Tree<K>
where
    K: Ord,
{
    /// Inserts the keys in iteration order. Use [`Tree::balanced`] for a shallow tree.
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K> Extend<K> for Tree<K>
where
    K: Ord,
{
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert_key(key);
        }
    }
}
