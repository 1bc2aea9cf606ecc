//! This crate provides an unbalanced Binary Search Tree (BST) with parent links, supporting
//! navigation between neighbouring nodes and order-statistic lookups.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to insert, find, and delete
//! stored records. Each `Node` stores a key and has up to two child `Node`s. The most important
//! invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a key less than or
//!    equal to its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a key greater than or
//!    equal to its own key.
//!
//! Searching takes `O(height)`. This tree does not rebalance itself, so its height depends on
//! insertion order: sorted input produces a tree that is really a linked list.
//! [`Tree::balanced`] builds a tree of minimal height up front, but later inserts and removes
//! are free to unbalance it.
//!
//! ## Nodes and handles
//!
//! Nodes are stored inside the tree and addressed by [`NodeId`]. Because each node also knows its
//! parent, a handle is enough to step to the in-order [successor][Tree::successor] or
//! [predecessor][Tree::predecessor] without searching from the root. A node may also exist
//! *detached*: allocated with [`Tree::alloc`] (or unlinked by [`Tree::remove`]) but not part of
//! the tree until it is [inserted][Tree::insert].
//!
//! Operations that are handed a handle they can't use (a released node, or a node that is
//! linked when it should be detached or vice versa) return a [`TreeError`] without changing the
//! tree.
//!
//! # Examples
//!
//! ```
//! use ordered_tree::Tree;
//!
//! let tree: Tree<_> = vec![5, 3, 8, 1, 4, 7, 9].into_iter().collect();
//!
//! let min = tree.minimum().unwrap();
//! assert_eq!(tree.key(min), Some(&1));
//! assert_eq!(tree.kth(3).and_then(|id| tree.key(id)), Some(&4));
//! assert_eq!(tree.find(&6), None);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
mod error;
mod iter;
mod tree;


pub use arena::NodeId;
pub use error::TreeError;
pub use iter::{Iter, Nodes};
pub use tree::Tree;
