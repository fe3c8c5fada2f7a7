//! An ordered set implemented with an AVL tree.
//!
//! [`AvlTree`] stores totally ordered keys in a binary search tree whose
//! subtrees never differ in height by more than one. Lookup, insertion and
//! removal therefore take logarithmic time for any sequence of operations,
//! including sorted input that would degenerate an unbalanced tree into a list.
//!
//! ```
//! use avl_search_tree::AvlTree;
//!
//! let mut tree = AvlTree::new();
//! for key in 1..=7 {
//!     tree.insert(key);
//! }
//! assert_eq!(tree.height(), 2);
//! assert_eq!(tree.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4, 5, 6, 7]);
//!
//! assert!(tree.remove(&4));
//! assert!(!tree.remove(&4));
//! assert_eq!(tree.len(), 6);
//! ```
//!
//! Rotations and removal decisions are reported through the [`log`] facade
//! at trace level.
//!
//! With the `consistency_check` feature enabled, `AvlTree::check_consistency`
//! verifies all tree invariants and reports the first violation as a
//! [`ConsistencyError`].

mod error;
mod iter;
mod node;
mod tree;

pub use error::ConsistencyError;
pub use iter::{IntoIter, Iter};
pub use tree::AvlTree;
