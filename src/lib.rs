//! An ordered Binary Search Tree (BST) that can be walked in three
//! traversal orders.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. The defining invariant is that
//! for every node, all keys in its left subtree compare less than or
//! equal to its own key and all keys in its right subtree compare
//! greater than or equal to it. Equal keys are allowed: this container
//! is a multiset, and duplicates accumulate in the left subtree of
//! their first occurrence.
//!
//! This tree does **not** self-balance. A sorted insertion sequence
//! degrades it to a linked list with `O(n)` operations. The interesting
//! parts live elsewhere:
//!
//! ## Cursors and traversal orders
//!
//! Every position in the tree can be navigated forwards and backwards
//! in any of the three classic traversal orders ([`Traversal::InOrder`],
//! [`Traversal::PreOrder`], [`Traversal::PostOrder`]) without any
//! auxiliary stack: successor and predecessor are computed by chasing
//! parent/child links alone. [`Cursor`] and [`CursorMut`] expose that
//! navigation directly, including the "one past the last" and "one
//! before the first" boundary positions, and [`Iter`] builds
//! double-ended iterators on top of it.
//!
//! Nodes live in an index arena, so a handle to a node stays valid for
//! as long as the node itself does. In particular, deleting a node
//! with two children relinks its in-order successor in place instead of
//! copying its key, so cursors pointing at the successor keep meaning
//! the same element.
//!
//! # Examples
//!
//! ```
//! use bstree::{Traversal, Tree};
//!
//! let mut tree = Tree::new();
//! for key in [5, 3, 7, 1, 4, 6, 9] {
//!     tree.insert(key);
//! }
//!
//! let in_order: Vec<i32> = tree.iter().copied().collect();
//! assert_eq!(in_order, [1, 3, 4, 5, 6, 7, 9]);
//!
//! let pre_order: Vec<i32> = tree.traverse(Traversal::PreOrder).copied().collect();
//! assert_eq!(pre_order, [5, 3, 1, 4, 7, 6, 9]);
//!
//! assert_eq!(tree.remove(&7), 1);
//! assert!(!tree.contains(&7));
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
mod cursor;
mod iter;
mod traverse;
mod tree;

pub use cursor::{Cursor, CursorMut};
pub use iter::{IntoIter, Iter};
pub use traverse::Traversal;
pub use tree::Tree;
