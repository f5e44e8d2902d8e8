//! A BST that is balanced by reconstruction. Building a tree from a
//! collection always produces a height-balanced tree, but [`insert`] and
//! [`delete`] never rotate or otherwise fix the shape up. Balance is only
//! restored when [`rebalance`] is called, which throws away every node and
//! rebuilds the tree from its sorted keys.
//!
//! [`insert`]: Tree::insert
//! [`delete`]: Tree::delete
//! [`rebalance`]: Tree::rebalance
//!
//! # Examples
//!
//! ```
//! use rebuild_bst::Tree;
//!
//! // Duplicates collapse and order doesn't matter.
//! let mut tree = Tree::from_keys(vec![5, 3, 3, 8, 1]);
//! assert_eq!(tree.len(), 4);
//! assert!(tree.is_balanced());
//!
//! // Inserting in ascending order quickly unbalances the tree...
//! for key in 9..20 {
//!     tree.insert(key);
//! }
//! assert!(!tree.is_balanced());
//!
//! // ...until it is rebuilt.
//! tree.rebalance();
//! assert!(tree.is_balanced());
//! assert_eq!(tree.find(&13), Some(&13));
//! ```

use std::cmp::Ordering;
use std::mem;

use tracing::{debug, trace};

/// An owned, optional child slot.
pub(crate) type Link<K> = Option<Box<Node<K>>>;

/// A Binary Search Tree over unique keys. See the [module docs][self] for
/// how and when it is balanced.
#[derive(Clone, Debug)]
pub struct Tree<K> {
    pub(crate) root: Link<K>,
    len: usize,
}

/// A single key in a [`Tree`] along with the (possibly empty) subtrees to
/// its left and right. Nodes can only be inspected from outside this crate;
/// the shape of a tree is changed through [`Tree`]'s methods.
#[derive(Clone, Debug)]
pub struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Drop for Tree<K> {
    // Tear down with an explicit stack. A tree built from ascending inserts
    // is a linked list and the recursive `Box` drop would blow the stack.
    fn drop(&mut self) {
        let mut stack: Vec<Box<Node<K>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = stack.pop() {
            stack.extend(node.left.take());
            stack.extend(node.right.take());
        }
    }
}

impl<K: Ord> FromIterator<K> for Tree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        Self::from_keys(iter)
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Builds a balanced tree out of `keys`. The keys may come in any order
    /// and may contain duplicates; equal keys collapse into one node.
    ///
    /// The middle key (index `len / 2`) of the sorted keys becomes the root
    /// and each half is built the same way, so a tree of `n` keys has a
    /// height of `floor(log2(n))`.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let tree = Tree::from_keys(vec![5, 3, 3, 8, 1]);
    ///
    /// assert_eq!(tree.root().map(|n| *n.key()), Some(5));
    /// assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), [1, 3, 5, 8]);
    /// assert_eq!(tree.height(), 2);
    /// ```
    pub fn from_keys<I>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Ord,
    {
        let mut keys: Vec<K> = keys.into_iter().collect();
        keys.sort_unstable();
        keys.dedup();
        debug!(len = keys.len(), "building tree from sorted keys");

        Self::from_sorted(keys)
    }

    /// Builds a tree from keys that are already sorted and unique.
    fn from_sorted(keys: Vec<K>) -> Self {
        let len = keys.len();
        Self {
            root: Node::build(keys),
            len,
        }
    }

    /// The number of keys in the tree.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// The root node, if the tree isn't empty. This is read-only access for
    /// things like renderers which need to walk the tree's shape.
    pub fn root(&self) -> Option<&Node<K>> {
        self.root.as_deref()
    }

    /// Potentially finds the given key in this tree. If no node has the key,
    /// `None` is returned.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let tree = Tree::from_keys(vec![1, 2, 3]);
    ///
    /// assert_eq!(tree.find(&2), Some(&2));
    /// assert_eq!(tree.find(&42), None);
    /// ```
    pub fn find(&self, key: &K) -> Option<&K>
    where
        K: Ord,
    {
        self.root().and_then(|n| n.find(key))
    }

    /// Whether a node holds `key`.
    pub fn contains(&self, key: &K) -> bool
    where
        K: Ord,
    {
        self.find(key).is_some()
    }

    /// Inserts `key` as a new leaf and returns `true`. If the key is already
    /// present the tree is left untouched and `false` is returned.
    ///
    /// The tree is not rebalanced afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    ///
    /// assert!(tree.insert(1));
    /// assert!(!tree.insert(1));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool
    where
        K: Ord,
    {
        let inserted = Node::insert(&mut self.root, key);
        if inserted {
            self.len += 1;
        } else {
            trace!("ignoring duplicate key");
        }

        inserted
    }

    /// Deletes the node containing the given key from the tree and returns
    /// the key. If the tree does not contain the key, nothing happens.
    ///
    /// A node with two children takes on the key of its in-order successor
    /// and the successor's node is removed instead. The tree is not
    /// rebalanced afterwards.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let mut tree = Tree::from_keys(vec![1, 3, 5, 8]);
    ///
    /// assert_eq!(tree.delete(&5), Some(5));
    /// assert_eq!(tree.delete(&5), None);
    /// assert_eq!(tree.root().map(|n| *n.key()), Some(8));
    /// ```
    pub fn delete(&mut self, key: &K) -> Option<K>
    where
        K: Ord,
    {
        let deleted = Node::delete(&mut self.root, key);
        if deleted.is_some() {
            self.len -= 1;
        } else {
            trace!("key to delete not found");
        }

        deleted
    }

    /// The height of the whole tree: `-1` when empty, `0` for a lone root.
    pub fn height(&self) -> isize {
        Self::height_of(self.root())
    }

    /// The number of edges on the longest path from `node` down to a leaf,
    /// or `-1` if there is no node.
    pub fn height_of(node: Option<&Node<K>>) -> isize {
        node.map_or(-1, Node::height)
    }

    /// The number of edges between the root and the node in this tree
    /// holding the same key as `node`. Returns `-1` if `node` is `None` or
    /// its key isn't in this tree.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let tree = Tree::from_keys(vec![1, 3, 5, 8]);
    /// let root = tree.root();
    ///
    /// assert_eq!(tree.depth(root), 0);
    /// assert_eq!(tree.depth(root.and_then(|n| n.left())), 1);
    /// assert_eq!(tree.depth(None), -1);
    /// ```
    pub fn depth(&self, node: Option<&Node<K>>) -> isize
    where
        K: Ord,
    {
        node.map_or(-1, |n| self.depth_of(&n.key))
    }

    /// Like [`depth`][Tree::depth] but looks the node up by key.
    pub fn depth_of(&self, key: &K) -> isize
    where
        K: Ord,
    {
        let mut depth = 0;
        let mut current = self.root();
        while let Some(node) = current {
            current = match key.cmp(&node.key) {
                Ordering::Less => node.left(),
                Ordering::Equal => return depth,
                Ordering::Greater => node.right(),
            };
            depth += 1;
        }

        -1
    }

    /// Whether, for every node, the heights of its two subtrees differ by at
    /// most one. Each subtree's height is computed exactly once.
    pub fn is_balanced(&self) -> bool {
        Node::balanced_height(self.root()).is_some()
    }

    /// Discards every node and rebuilds a balanced tree from the current
    /// keys. Nodes borrowed before the call can't outlive it, so no node
    /// identity survives a rebuild.
    ///
    /// # Examples
    ///
    /// ```
    /// use rebuild_bst::Tree;
    ///
    /// let mut tree = Tree::new();
    /// for key in 0..7 {
    ///     tree.insert(key);
    /// }
    /// assert_eq!(tree.height(), 6);
    ///
    /// tree.rebalance();
    /// assert_eq!(tree.height(), 2);
    /// assert_eq!(tree.in_order().copied().collect::<Vec<_>>(), (0..7).collect::<Vec<_>>());
    /// ```
    pub fn rebalance(&mut self) {
        let height_before = self.height();
        // In-order keys are sorted and unique so they can go straight back in.
        let keys: Vec<K> = mem::take(self).into_iter().collect();
        *self = Self::from_sorted(keys);

        debug!(
            len = self.len,
            height_before,
            height_after = self.height(),
            "rebalanced tree"
        );
    }
}

impl<K> Node<K> {
    fn new_boxed(key: K) -> Box<Self> {
        Box::new(Self {
            key,
            left: None,
            right: None,
        })
    }

    /// This node's key.
    pub fn key(&self) -> &K {
        &self.key
    }

    /// The root of the left subtree, which only holds smaller keys.
    pub fn left(&self) -> Option<&Self> {
        self.left.as_deref()
    }

    /// The root of the right subtree, which only holds larger keys.
    pub fn right(&self) -> Option<&Self> {
        self.right.as_deref()
    }

    /// Whether this node has no children.
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    /// The number of edges on the longest path from this node to a leaf. A
    /// leaf has a height of `0`.
    pub fn height(&self) -> isize {
        1 + Tree::height_of(self.left()).max(Tree::height_of(self.right()))
    }

    /// Recursive helper for [`Tree::from_keys`]. `keys` must be sorted and
    /// unique.
    fn build(mut keys: Vec<K>) -> Link<K> {
        if keys.is_empty() {
            return None;
        }

        let mid = keys.len() / 2;
        let right = keys.split_off(mid + 1);
        // `mid` is now the last index so `keys` is left with the left half.
        let key = keys.pop()?;

        Some(Box::new(Self {
            key,
            left: Self::build(keys),
            right: Self::build(right),
        }))
    }

    fn find(&self, key: &K) -> Option<&K>
    where
        K: Ord,
    {
        match key.cmp(&self.key) {
            Ordering::Less => self.left().and_then(|n| n.find(key)),
            Ordering::Equal => Some(&self.key),
            Ordering::Greater => self.right().and_then(|n| n.find(key)),
        }
    }

    /// Inserts `key` into the subtree in `link`, filling the first empty slot
    /// on its search path. Returns `false` if the key was already there.
    fn insert(link: &mut Link<K>, key: K) -> bool
    where
        K: Ord,
    {
        match link {
            Some(node) => match key.cmp(&node.key) {
                Ordering::Less => Self::insert(&mut node.left, key),
                Ordering::Equal => false,
                Ordering::Greater => Self::insert(&mut node.right, key),
            },
            None => {
                *link = Some(Self::new_boxed(key));
                true
            }
        }
    }

    /// Deletes `key` from the subtree in `link` and returns it.
    fn delete(link: &mut Link<K>, key: &K) -> Option<K>
    where
        K: Ord,
    {
        let node = link.as_mut()?;
        match key.cmp(&node.key) {
            Ordering::Less => Self::delete(&mut node.left, key),
            Ordering::Greater => Self::delete(&mut node.right, key),
            // If we have two children the in-order successor, i.e. the
            // smallest key on the right, moves up into this node.
            Ordering::Equal if node.left.is_some() && node.right.is_some() => {
                let successor = Self::take_min(&mut node.right)?;
                Some(mem::replace(&mut node.key, successor))
            }
            // Otherwise whichever child exists (if any) takes our place.
            Ordering::Equal => {
                let removed = link.take()?;
                let Node {
                    key: removed_key,
                    left,
                    right,
                } = *removed;
                *link = left.or(right);
                Some(removed_key)
            }
        }
    }

    /// Unlinks the leftmost node in `link` and returns its key. That node has
    /// no left child so its right child (if any) takes its place.
    fn take_min(link: &mut Link<K>) -> Option<K> {
        let node = link.as_mut()?;
        if node.left.is_some() {
            return Self::take_min(&mut node.left);
        }

        let min = link.take()?;
        let Node { key, right, .. } = *min;
        *link = right;
        Some(key)
    }

    /// The height of the subtree at `node`, or `None` if any node in it has
    /// children whose heights differ by more than one.
    fn balanced_height(node: Option<&Self>) -> Option<isize> {
        let Some(node) = node else {
            return Some(-1);
        };
        let left = Self::balanced_height(node.left())?;
        let right = Self::balanced_height(node.right())?;

        (left.abs_diff(right) <= 1).then_some(1 + left.max(right))
    }
}
