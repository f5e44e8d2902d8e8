//! Walking a [`Tree`] in one of the four classic orders.
//!
//! Every traversal is a lazy iterator over borrowed keys. They keep their own
//! stack (or queue, for level order) instead of recursing so that walking a
//! degenerate tree doesn't depend on the call stack.
//!
//! # Examples
//!
//! ```
//! use rebuild_bst::{Order, Tree};
//!
//! let tree = Tree::from_keys(vec![5, 3, 3, 8, 1]);
//!
//! assert_eq!(tree.pre_order().copied().collect::<Vec<_>>(), [5, 3, 1, 8]);
//! assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), [1, 3, 5, 8]);
//! assert_eq!(tree.post_order().copied().collect::<Vec<_>>(), [1, 3, 8, 5]);
//! assert_eq!(tree.level_order().copied().collect::<Vec<_>>(), [5, 3, 8, 1]);
//!
//! // Or with a visitor.
//! let mut seen = Vec::new();
//! tree.traverse(Order::Level, Some(&mut |k: &i32| seen.push(*k))).unwrap();
//! assert_eq!(seen, [5, 3, 8, 1]);
//! ```

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;

use tracing::trace;

use crate::error::{Error, Result};
use crate::tree::{Link, Node, Tree};

/// The order in which a traversal visits keys.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Order {
    /// Node, then left subtree, then right subtree.
    Pre,
    /// Left subtree, then node, then right subtree. Keys come out sorted.
    In,
    /// Left subtree, then right subtree, then node.
    Post,
    /// Breadth first, left to right within each level.
    Level,
}

impl Order {
    /// All four orders, level order first.
    pub const ALL: [Order; 4] = [Order::Level, Order::Pre, Order::In, Order::Post];
}

impl fmt::Display for Order {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Order::Pre => "pre-order",
            Order::In => "in-order",
            Order::Post => "post-order",
            Order::Level => "level-order",
        };
        f.write_str(name)
    }
}

impl<K> Tree<K> {
    /// Iterates over keys visiting each node before its subtrees.
    pub fn pre_order(&self) -> PreOrder<'_, K> {
        PreOrder {
            stack: self.root().into_iter().collect(),
        }
    }

    /// Iterates over keys in ascending order.
    pub fn in_order(&self) -> InOrder<'_, K> {
        let mut iter = InOrder { stack: Vec::new() };
        iter.push_left_spine(self.root());
        iter
    }

    /// Iterates over keys visiting each node after its subtrees.
    pub fn post_order(&self) -> PostOrder<'_, K> {
        PostOrder {
            stack: self.root().map(|n| (n, false)).into_iter().collect(),
        }
    }

    /// Iterates over keys level by level, starting at the root.
    pub fn level_order(&self) -> LevelOrder<'_, K> {
        LevelOrder {
            queue: self.root().into_iter().collect(),
        }
    }

    /// Same as [`in_order`][Tree::in_order].
    pub fn iter(&self) -> InOrder<'_, K> {
        self.in_order()
    }

    /// Iterates over keys in the given `order`.
    pub fn traversal(&self, order: Order) -> Traversal<'_, K> {
        match order {
            Order::Pre => Traversal::Pre(self.pre_order()),
            Order::In => Traversal::In(self.in_order()),
            Order::Post => Traversal::Post(self.post_order()),
            Order::Level => Traversal::Level(self.level_order()),
        }
    }

    /// Calls `visitor` once per key in the given `order`.
    ///
    /// A missing visitor is rejected with [`Error::InvalidArgument`] before
    /// any node is visited.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::{Error, Order, Tree};
    ///
    /// let tree = Tree::from_keys(vec![2, 1, 3]);
    ///
    /// let mut sum = 0;
    /// tree.traverse(Order::Post, Some(&mut |k: &i32| sum += k)).unwrap();
    /// assert_eq!(sum, 6);
    ///
    /// assert!(matches!(
    ///     tree.traverse(Order::In, None),
    ///     Err(Error::InvalidArgument(_))
    /// ));
    /// ```
    pub fn traverse(&self, order: Order, visitor: Option<&mut dyn FnMut(&K)>) -> Result<()> {
        let visitor = visitor.ok_or(Error::InvalidArgument("a visitor is required"))?;
        trace!(%order, len = self.len(), "traversing tree");
        self.traversal(order).for_each(visitor);

        Ok(())
    }
}

/// Pre-order iterator returned by [`Tree::pre_order`].
#[derive(Debug)]
pub struct PreOrder<'a, K> {
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> Iterator for PreOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Right goes on first so that left comes off first.
        self.stack.extend(node.right());
        self.stack.extend(node.left());
        Some(node.key())
    }
}

impl<K> FusedIterator for PreOrder<'_, K> {}

/// Manual implementations of `Clone` so cloning an iterator only copies its
/// references and doesn't require `K: Clone`.
///
/// Note the comment on generic structs in
/// [the docs][<https://doc.rust-lang.org/std/clone/trait.Clone.html#derivable>].
impl<K> Clone for PreOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

/// In-order iterator returned by [`Tree::in_order`].
#[derive(Debug)]
pub struct InOrder<'a, K> {
    /// Nodes whose left subtree is (being) visited but which haven't been
    /// yielded yet.
    stack: Vec<&'a Node<K>>,
}

impl<'a, K> InOrder<'a, K> {
    fn push_left_spine(&mut self, mut node: Option<&'a Node<K>>) {
        while let Some(n) = node {
            self.stack.push(n);
            node = n.left();
        }
    }
}

impl<'a, K> Iterator for InOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left_spine(node.right());
        Some(node.key())
    }
}

impl<K> FusedIterator for InOrder<'_, K> {}

impl<K> Clone for InOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

/// Post-order iterator returned by [`Tree::post_order`].
#[derive(Debug)]
pub struct PostOrder<'a, K> {
    /// Each node is pushed twice: once unexpanded and, once its children are
    /// queued up above it, expanded and ready to be yielded.
    stack: Vec<(&'a Node<K>, bool)>,
}

impl<'a, K> Iterator for PostOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (node, expanded) = self.stack.pop()?;
            if expanded {
                return Some(node.key());
            }

            self.stack.push((node, true));
            self.stack.extend(node.right().map(|n| (n, false)));
            self.stack.extend(node.left().map(|n| (n, false)));
        }
    }
}

impl<K> FusedIterator for PostOrder<'_, K> {}

impl<K> Clone for PostOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            stack: self.stack.clone(),
        }
    }
}

/// Level-order iterator returned by [`Tree::level_order`].
#[derive(Debug)]
pub struct LevelOrder<'a, K> {
    queue: VecDeque<&'a Node<K>>,
}

impl<'a, K> Iterator for LevelOrder<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.queue.pop_front()?;
        self.queue.extend(node.left());
        self.queue.extend(node.right());
        Some(node.key())
    }
}

impl<K> FusedIterator for LevelOrder<'_, K> {}

impl<K> Clone for LevelOrder<'_, K> {
    fn clone(&self) -> Self {
        Self {
            queue: self.queue.clone(),
        }
    }
}

/// Any one of the four traversals, as returned by [`Tree::traversal`].
#[derive(Debug)]
pub enum Traversal<'a, K> {
    /// See [`PreOrder`].
    Pre(PreOrder<'a, K>),
    /// See [`InOrder`].
    In(InOrder<'a, K>),
    /// See [`PostOrder`].
    Post(PostOrder<'a, K>),
    /// See [`LevelOrder`].
    Level(LevelOrder<'a, K>),
}

impl<'a, K> Iterator for Traversal<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            Self::Pre(iter) => iter.next(),
            Self::In(iter) => iter.next(),
            Self::Post(iter) => iter.next(),
            Self::Level(iter) => iter.next(),
        }
    }
}

impl<K> FusedIterator for Traversal<'_, K> {}

impl<K> Clone for Traversal<'_, K> {
    fn clone(&self) -> Self {
        match self {
            Self::Pre(iter) => Self::Pre(iter.clone()),
            Self::In(iter) => Self::In(iter.clone()),
            Self::Post(iter) => Self::Post(iter.clone()),
            Self::Level(iter) => Self::Level(iter.clone()),
        }
    }
}

impl<'a, K> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = InOrder<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.in_order()
    }
}

/// Consuming in-order iterator over a tree's keys. Nodes are freed as the
/// iterator walks past them.
#[derive(Debug)]
pub struct IntoIter<K> {
    stack: Vec<Box<Node<K>>>,
}

impl<K> IntoIter<K> {
    fn push_left_spine(&mut self, mut link: Link<K>) {
        while let Some(mut node) = link {
            link = node.left.take();
            self.stack.push(node);
        }
    }
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<Self::Item> {
        let mut node = self.stack.pop()?;
        self.push_left_spine(node.right.take());
        Some(node.key)
    }
}

impl<K> FusedIterator for IntoIter<K> {}

impl<K> Drop for IntoIter<K> {
    // Drain instead of dropping the stack so that unvisited right subtrees
    // are freed without recursing.
    fn drop(&mut self) {
        self.for_each(drop);
    }
}

impl<K> IntoIterator for Tree<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(mut self) -> Self::IntoIter {
        let mut iter = IntoIter { stack: Vec::new() };
        iter.push_left_spine(self.root.take());
        iter
    }
}
