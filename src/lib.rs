//! This crate exposes a Binary Search Tree (BST) that is kept balanced by
//! rebuilding it rather than by rotating nodes.
//!
//! ## Binary Search Tree
//!
//! A Binary Search Tree is a data structure supporting operations to
//! insert, find, and delete stored keys. BSTs are typically defined
//! recursively using the notion of a `Node`. A `Node` stores a key and
//! sometimes has child `Node`s. The most important invariants of a BST are:
//!
//! 1. For every `Node` in a BST, all the `Node`s in its left subtree have a
//!    key less than its own key.
//! 2. For every `Node` in a BST, all the `Node`s in its right subtree have a
//!    key greater than its own key.
//!
//! > Note that some `Node`s have no children. These `Node`s are called "leaf nodes".
//!
//! Searching takes `O(height)` where `height` is the longest path from the
//! root `Node` to a leaf `Node`. A tree built from `N` sorted keys by always
//! picking the middle key as the root has a height of `floor(lg N)`.
//!
//! ## Balancing by reconstruction
//!
//! [`Tree`] builds that perfectly shaped tree up front but then leaves the
//! shape alone: inserts and deletes go straight to the right spot without
//! any rotations, and the tree can drift out of balance. [`Tree::is_balanced`]
//! reports when that has happened and [`Tree::rebalance`] rebuilds the whole
//! tree from its in-order keys.
//!
//! Keys can be visited in pre-, in-, post- and level order, either through
//! the iterators in [`traverse`] or with a visitor via [`Tree::traverse`].

#![deny(missing_docs, clippy::clone_on_ref_ptr)]

pub mod display;
pub mod error;
pub mod traverse;
pub mod tree;

pub use error::{Error, Result};
pub use traverse::Order;
pub use tree::{Node, Tree};

#[cfg(test)]
mod test {
    pub(crate) mod quick;
}
