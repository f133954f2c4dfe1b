//! An unbalanced Binary Search Tree whose nodes know their parents.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored elements. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores an element
//! and will sometimes have child `Node`s. The most important invariants
//! of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have an
//!    element less than its own element.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have an
//!    element greater than its own element.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching for an element takes `O(height)`. This tree does no balancing so
//! inserting already-sorted elements builds a chain and every operation
//! degrades to `O(N)`.
//!
//! ## Parent links
//!
//! Every `Node` in this crate also links to its parent, and for every child
//! `C` of a node `N`, `C`'s parent is `N`. The root has no parent. Nodes live
//! in storage owned by the [`Tree`] and link to each other by slot, so the
//! parent link never owns its target.
//!
//! Deletion handles three cases, chosen by how many children the deleted node has:
//!
//! - no children: the parent's slot for it is cleared.
//! - one child: the child is spliced into the deleted node's place.
//! - two children: the in-order successor (the smallest element of the right
//!   subtree) is unlinked and its element moves into the deleted node.
//!
//! # Examples
//!
//! ```
//! use parent_bst::Tree;
//!
//! let mut tree: Tree<_> = vec![4, 10, 8, 12, 11, 13].into_iter().collect();
//! assert_eq!(tree.count(), 6);
//!
//! tree.delete(&10);
//!
//! let root = tree.root().unwrap();
//! let eleven = root.right().unwrap();
//! assert_eq!(*eleven.element(), 11);
//! assert_eq!(eleven.parent(), Some(root));
//!
//! let twelve = eleven.right().unwrap();
//! assert!(twelve.left().is_none());
//! assert_eq!(*twelve.right().unwrap().element(), 13);
//!
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), [4, 8, 11, 12, 13]);
//! ```

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

mod arena;
mod invariant;
mod iter;
mod node;
mod tree;

pub use invariant::InvariantViolation;
pub use iter::Iter;
pub use node::{ChildState, NodeRef};
pub use tree::Tree;
