//! Rendering a tree's shape for humans.
//!
//! ```
//! use rebuild_bst::Tree;
//!
//! let tree = Tree::from_keys(vec![5, 3, 3, 8, 1]);
//!
//! assert_eq!(
//!     tree.to_string(),
//!     "5\n├── 3\n│   ├── 1\n│   └── ∅\n└── 8\n",
//! );
//! ```

use std::fmt;

use termtree::Tree as TermTree;
use tracing::instrument;

use crate::tree::{Node, Tree};

/// Stands in for a missing child when its sibling exists, so left and right
/// can always be told apart.
const EMPTY_CHILD: &str = "∅";

impl<K: fmt::Display> Node<K> {
    /// Converts the subtree rooted here into a [`termtree::Tree`] with the
    /// left child listed before the right one.
    #[instrument(level = "trace", skip(self))]
    pub fn to_termtree(&self) -> TermTree<String> {
        let root = TermTree::new(self.key().to_string());
        if self.is_leaf() {
            return root;
        }

        let leaves = [self.left(), self.right()].into_iter().map(|child| {
            child.map_or_else(|| TermTree::new(EMPTY_CHILD.to_string()), Node::to_termtree)
        });
        root.with_leaves(leaves)
    }
}

impl<K: fmt::Display> fmt::Display for Tree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.root() {
            Some(root) => write!(f, "{}", root.to_termtree()),
            None => writeln!(f, "(empty)"),
        }
    }
}
