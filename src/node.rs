use std::borrow::Borrow;
use std::cmp::{self, Ordering};
use std::mem;

use log::trace;

pub(crate) type Link<K> = Option<Box<Node<K>>>;

#[derive(Clone)]
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) left: Link<K>,
    pub(crate) right: Link<K>,
    /// Height of the subtree rooted here. A leaf has height 0.
    pub(crate) height: i32,
    /// Height of the right subtree minus height of the left subtree.
    pub(crate) balance: i8,
}

/// Height of the subtree behind a link, -1 for an absent child.
pub(crate) fn height<K>(link: &Link<K>) -> i32 {
    match link {
        None => -1,
        Some(node) => node.height,
    }
}

impl<K> Node<K> {
    fn create(key: K) -> Box<Self> {
        Box::new(Node {
            key,
            left: None,
            right: None,
            height: 0,
            balance: 0,
        })
    }

    /// Smallest key in the subtree rooted at this node.
    pub(crate) fn first(&self) -> &K {
        let mut node = self;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        &node.key
    }

    /// Largest key in the subtree rooted at this node.
    pub(crate) fn last(&self) -> &K {
        let mut node = self;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        &node.key
    }

    /// Recomputes cached height and balance from the children.
    fn adjust(&mut self) {
        let left_height = height(&self.left);
        let right_height = height(&self.right);
        let balance = right_height - left_height;
        debug_assert!((-2..=2).contains(&balance));
        self.height = 1 + cmp::max(left_height, right_height);
        self.balance = balance as i8;
    }

    fn rotate_left(mut node: Box<Self>) -> Box<Self> {
        match node.right.take() {
            None => node,
            Some(mut right) => {
                node.right = right.left.take();
                node.adjust();
                right.left = Some(node);
                right.adjust();
                right
            }
        }
    }

    fn rotate_right(mut node: Box<Self>) -> Box<Self> {
        match node.left.take() {
            None => node,
            Some(mut left) => {
                node.left = left.right.take();
                node.adjust();
                left.right = Some(node);
                left.adjust();
                left
            }
        }
    }

    /// Adjusts cached metadata and restores the AVL condition at given node.
    /// Children must already be balanced and differ in height by at most 2.
    /// Returns the new root of the subtree.
    fn rebalance(mut node: Box<Self>) -> Box<Self> {
        node.adjust();
        match node.balance {
            -2 => {
                let left_balance = node.left.as_ref().map_or(0, |left| left.balance);
                if left_balance > 0 {
                    trace!("left-right rotation at height {}", node.height);
                    node.left = node.left.take().map(Self::rotate_left);
                } else {
                    trace!("right rotation at height {}", node.height);
                }
                Self::rotate_right(node)
            }
            2 => {
                let right_balance = node.right.as_ref().map_or(0, |right| right.balance);
                if right_balance < 0 {
                    trace!("right-left rotation at height {}", node.height);
                    node.right = node.right.take().map(Self::rotate_right);
                } else {
                    trace!("left rotation at height {}", node.height);
                }
                Self::rotate_left(node)
            }
            _ => node,
        }
    }
}

/// Inserts a key into the subtree behind `link` and returns the new subtree root.
/// Sets `inserted` unless an equal key is already present, in which case
/// the subtree is returned untouched and the given key is dropped.
pub(crate) fn insert_into<K: Ord>(link: Link<K>, key: K, inserted: &mut bool) -> Box<Node<K>> {
    let mut node = match link {
        None => {
            *inserted = true;
            return Node::create(key);
        }
        Some(node) => node,
    };
    match key.cmp(&node.key) {
        Ordering::Less => node.left = Some(insert_into(node.left.take(), key, inserted)),
        Ordering::Greater => node.right = Some(insert_into(node.right.take(), key, inserted)),
        Ordering::Equal => return node,
    }
    if *inserted {
        Node::rebalance(node)
    } else {
        node
    }
}

/// Removes the key equal to `key` from the subtree behind `link` and returns
/// the new subtree root. The removed key is handed out through `removed`.
///
/// A node with two children keeps its place and takes over the key of a donor
/// node from its taller subtree: the largest key on the left if the left
/// subtree is strictly taller, the smallest key on the right otherwise.
pub(crate) fn remove_from<K, Q>(link: Link<K>, key: &Q, removed: &mut Option<K>) -> Link<K>
where
    K: Borrow<Q>,
    Q: Ord + ?Sized,
{
    let mut node = link?;
    match key.cmp(node.key.borrow()) {
        Ordering::Less => node.left = remove_from(node.left.take(), key, removed),
        Ordering::Greater => node.right = remove_from(node.right.take(), key, removed),
        Ordering::Equal => {
            if node.left.is_none() || node.right.is_none() {
                let Node {
                    key, left, right, ..
                } = *node;
                *removed = Some(key);
                return left.or(right);
            }
            let mut donor = None;
            if height(&node.left) > height(&node.right) {
                trace!("replacing removed key with predecessor");
                node.left = pop_last(node.left.take(), &mut donor);
            } else {
                trace!("replacing removed key with successor");
                node.right = pop_first(node.right.take(), &mut donor);
            }
            if let Some(donor) = donor {
                *removed = Some(mem::replace(&mut node.key, donor));
            }
        }
    }
    if removed.is_some() {
        Some(Node::rebalance(node))
    } else {
        Some(node)
    }
}

/// Detaches the smallest key of the subtree behind `link` into `first`
/// and returns the new subtree root.
pub(crate) fn pop_first<K>(link: Link<K>, first: &mut Option<K>) -> Link<K> {
    let mut node = link?;
    match node.left.take() {
        None => {
            let Node { key, right, .. } = *node;
            *first = Some(key);
            right
        }
        left => {
            node.left = pop_first(left, first);
            Some(Node::rebalance(node))
        }
    }
}

/// Detaches the largest key of the subtree behind `link` into `last`
/// and returns the new subtree root.
pub(crate) fn pop_last<K>(link: Link<K>, last: &mut Option<K>) -> Link<K> {
    let mut node = link?;
    match node.right.take() {
        None => {
            let Node { key, left, .. } = *node;
            *last = Some(key);
            left
        }
        right => {
            node.right = pop_last(right, last);
            Some(Node::rebalance(node))
        }
    }
}
