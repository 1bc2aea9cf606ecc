//! In-order traversal. The iterators follow parent links from node to node, so they need no
//! stack and can be cloned and restarted freely.

use std::fmt;
use std::iter::FusedIterator;

use crate::{NodeId, Tree};

/// An iterator over the node handles of a [`Tree`] in ascending key order.
///
/// Created by [`Tree::nodes`].
pub struct Nodes<'a, K> {
    tree: &'a Tree<K>,
    next: Option<NodeId>,
    remaining: usize,
}

// Manual implementation so that `K` doesn't need to be `Clone`.
impl<K> Clone for Nodes<'_, K> {
    fn clone(&self) -> Self {
        Self {
            tree: self.tree,
            next: self.next,
            remaining: self.remaining,
        }
    }
}

impl<'a, K> Iterator for Nodes<'a, K> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.tree.next_node(current);
        self.remaining -= 1;
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K> ExactSizeIterator for Nodes<'_, K> {}
impl<K> FusedIterator for Nodes<'_, K> {}

/// An iterator over the keys of a [`Tree`] in ascending order.
///
/// Created by [`Tree::iter`].
pub struct Iter<'a, K> {
    nodes: Nodes<'a, K>,
}

impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self {
            nodes: self.nodes.clone(),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        let tree = self.nodes.tree;
        self.nodes.next().and_then(|id| tree.key(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.nodes.size_hint()
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}
impl<K> FusedIterator for Iter<'_, K> {}

impl<K> Tree<K> {
    /// Iterates over the keys in ascending order. Equal keys are all visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use ordered_tree::Tree;
    ///
    /// let tree: Tree<_> = vec![3, 1, 2, 1].into_iter().collect();
    ///
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [1, 1, 2, 3]);
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter {
            nodes: self.nodes(),
        }
    }

    /// Iterates over the node handles in ascending key order.
    pub fn nodes(&self) -> Nodes<'_, K> {
        Nodes {
            tree: self,
            next: self.minimum(),
            remaining: self.len(),
        }
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

/// Writes the keys in ascending order separated by single spaces.
impl<K> fmt::Display for Tree<K>
where
    K: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut keys = self.iter();
        if let Some(first) = keys.next() {
            write!(f, "{}", first)?;
            for key in keys {
                write!(f, " {}", key)?;
            }
        }
        Ok(())
    }
}

impl<K> fmt::Debug for Tree<K>
where
    K: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
