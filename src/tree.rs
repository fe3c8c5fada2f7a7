use std::borrow::Borrow;
use std::cmp::Ordering;
use std::collections::VecDeque;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::iter::FromIterator;
use std::mem;

use log::debug;

use crate::iter::{IntoIter, Iter};
use crate::node::{self, Link, Node};

/// An ordered set implemented with an AVL tree.
///
/// Every node is owned by its parent, the root by the tree itself.
/// Insertion and removal descend recursively and restore the AVL condition
/// on the way back up, so the height stays logarithmic in the number of keys
/// for any sequence of operations.
///
/// ```
/// use avl_search_tree::AvlTree;
/// let mut tree = AvlTree::new();
/// assert!(tree.insert(2));
/// assert!(tree.insert(1));
/// assert!(!tree.insert(2));
/// assert!(tree.contains(&1));
/// assert!(tree.remove(&1));
/// assert!(!tree.contains(&1));
/// assert_eq!(tree.len(), 1);
/// ```
#[derive(Clone)]
pub struct AvlTree<K> {
    root: Link<K>,
    num_nodes: usize,
}

impl<K> AvlTree<K> {
    /// Creates an empty tree.
    /// No memory is allocated until the first key is inserted.
    pub fn new() -> Self {
        Self {
            root: None,
            num_nodes: 0,
        }
    }

    /// Returns true if the tree contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of keys in the tree.
    pub fn len(&self) -> usize {
        self.num_nodes
    }

    /// Returns the height of the tree.
    ///
    /// A single node has height 0, an empty tree has height -1.
    pub fn height(&self) -> i32 {
        node::height(&self.root)
    }

    /// Clears the tree, deallocating all nodes.
    pub fn clear(&mut self) {
        if self.num_nodes > 0 {
            debug!("clearing tree with {} keys", self.num_nodes);
        }
        self.release();
    }

    /// Returns the smallest key in the tree.
    pub fn first(&self) -> Option<&K> {
        self.root.as_deref().map(Node::first)
    }

    /// Returns the largest key in the tree.
    pub fn last(&self) -> Option<&K> {
        self.root.as_deref().map(Node::last)
    }

    /// Removes and returns the smallest key in the tree.
    pub fn pop_first(&mut self) -> Option<K> {
        let mut first = None;
        self.root = node::pop_first(self.root.take(), &mut first);
        if first.is_some() {
            self.num_nodes -= 1;
        }
        first
    }

    /// Removes and returns the largest key in the tree.
    pub fn pop_last(&mut self) -> Option<K> {
        let mut last = None;
        self.root = node::pop_last(self.root.take(), &mut last);
        if last.is_some() {
            self.num_nodes -= 1;
        }
        last
    }

    /// Gets an iterator over the keys of the tree in ascending order.
    ///
    /// ```
    /// use avl_search_tree::AvlTree;
    /// let tree: AvlTree<_> = [3, 1, 2].into();
    /// assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    /// assert_eq!(tree.iter().rev().next(), Some(&3));
    /// ```
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(&self.root, self.num_nodes)
    }

    /// Visits the keys of the tree level by level, from the root downwards
    /// and from left to right within a level.
    pub fn traverse_level_order<F: FnMut(&K)>(&self, mut f: F) {
        let mut queue: VecDeque<&Node<K>> = VecDeque::new();
        queue.extend(self.root.as_deref());
        while let Some(node) = queue.pop_front() {
            f(&node.key);
            queue.extend(node.left.as_deref());
            queue.extend(node.right.as_deref());
        }
    }

    /// Detaches all nodes one by one, so that dropping never recurses.
    fn release(&mut self) {
        let root = self.root.take();
        let num_nodes = mem::replace(&mut self.num_nodes, 0);
        IntoIter::new(root, num_nodes).for_each(drop);
    }
}

impl<K: Ord> AvlTree<K> {
    /// Returns true if the tree contains the key.
    ///
    /// The key may be any borrowed form of the tree's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    pub fn contains<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).is_some()
    }

    /// Returns a reference to the key in the tree that is equal to the given key.
    pub fn get<Q>(&self, key: &Q) -> Option<&K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.find(key).map(|node| &node.key)
    }

    /// Inserts a key into the tree.
    ///
    /// Returns false and leaves the tree untouched if an equal key is already present.
    pub fn insert(&mut self, key: K) -> bool {
        let mut inserted = false;
        self.root = Some(node::insert_into(self.root.take(), key, &mut inserted));
        if inserted {
            self.num_nodes += 1;
        }
        inserted
    }

    /// Removes a key from the tree.
    /// Returns whether the key was previously in the tree.
    ///
    /// The key may be any borrowed form of the tree's key type, but the ordering
    /// on the borrowed form *must* match the ordering on the key type.
    pub fn remove<Q>(&mut self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.take(key).is_some()
    }

    /// Removes a key from the tree.
    /// Returns the stored key if it was previously in the tree.
    pub fn take<Q>(&mut self, key: &Q) -> Option<K>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut removed = None;
        self.root = node::remove_from(self.root.take(), key, &mut removed);
        if removed.is_some() {
            debug_assert!(self.num_nodes >= 1);
            self.num_nodes -= 1;
        }
        removed
    }

    /// Checks all tree invariants: search order, cached heights and balance
    /// factors, the AVL condition and the cached number of keys.
    #[cfg(any(test, feature = "consistency_check"))]
    pub fn check_consistency(&self) -> Result<(), crate::ConsistencyError> {
        let mut counted = 0;
        check_subtree(&self.root, None, None, 0, &mut counted)?;
        if counted != self.num_nodes {
            return Err(crate::ConsistencyError::LengthMismatch {
                cached: self.num_nodes,
                counted,
            });
        }
        Ok(())
    }

    fn find<Q>(&self, key: &Q) -> Option<&Node<K>>
    where
        K: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            current = match key.cmp(node.key.borrow()) {
                Ordering::Equal => break,
                Ordering::Less => node.left.as_deref(),
                Ordering::Greater => node.right.as_deref(),
            }
        }
        current
    }
}

/// Verifies the subtree behind `link` against exclusive key bounds and returns its height.
#[cfg(any(test, feature = "consistency_check"))]
fn check_subtree<K: Ord>(
    link: &Link<K>,
    lower: Option<&K>,
    upper: Option<&K>,
    depth: usize,
    counted: &mut usize,
) -> Result<i32, crate::ConsistencyError> {
    use crate::ConsistencyError;

    let node = match link {
        None => return Ok(-1),
        Some(node) => node,
    };
    *counted += 1;

    if lower.map_or(false, |lower| node.key <= *lower)
        || upper.map_or(false, |upper| node.key >= *upper)
    {
        return Err(ConsistencyError::OutOfOrder { depth });
    }

    let left_height = check_subtree(&node.left, lower, Some(&node.key), depth + 1, counted)?;
    let right_height = check_subtree(&node.right, Some(&node.key), upper, depth + 1, counted)?;

    let computed = 1 + left_height.max(right_height);
    if node.height != computed {
        return Err(ConsistencyError::HeightMismatch {
            depth,
            cached: node.height,
            computed,
        });
    }
    let balance = right_height - left_height;
    if i32::from(node.balance) != balance {
        return Err(ConsistencyError::BalanceMismatch {
            depth,
            cached: node.balance,
            computed: balance,
        });
    }
    if balance.abs() > 1 {
        return Err(ConsistencyError::Unbalanced { depth, balance });
    }
    Ok(computed)
}

impl<K> Drop for AvlTree<K> {
    fn drop(&mut self) {
        self.release();
    }
}

impl<K> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug> fmt::Debug for AvlTree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<K: PartialEq> PartialEq for AvlTree<K> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<K: Eq> Eq for AvlTree<K> {}

impl<K: PartialOrd> PartialOrd for AvlTree<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.iter().partial_cmp(other.iter())
    }
}

impl<K: Ord> Ord for AvlTree<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.iter().cmp(other.iter())
    }
}

impl<K: Hash> Hash for AvlTree<K> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.len().hash(state);
        for key in self.iter() {
            key.hash(state);
        }
    }
}

impl<K: Ord> FromIterator<K> for AvlTree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Self::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord, const N: usize> From<[K; N]> for AvlTree<K> {
    fn from(keys: [K; N]) -> Self {
        Self::from_iter(keys)
    }
}

impl<K: Ord> Extend<K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<'a, K: 'a + Ord + Copy> Extend<&'a K> for AvlTree<K> {
    fn extend<I: IntoIterator<Item = &'a K>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<'a, K> IntoIterator for &'a AvlTree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K> IntoIterator for AvlTree<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    fn into_iter(mut self) -> Self::IntoIter {
        let root = self.root.take();
        let num_nodes = mem::replace(&mut self.num_nodes, 0);
        IntoIter::new(root, num_nodes)
    }
}
