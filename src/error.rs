use thiserror::Error;

/// A violated tree invariant, as reported by `AvlTree::check_consistency`.
///
/// Depths are counted from the root, which has depth 0.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConsistencyError {
    #[error("key at depth {depth} is out of search order")]
    OutOfOrder { depth: usize },
    #[error("cached height {cached} at depth {depth} differs from computed height {computed}")]
    HeightMismatch {
        depth: usize,
        cached: i32,
        computed: i32,
    },
    #[error("cached balance {cached} at depth {depth} differs from computed balance {computed}")]
    BalanceMismatch {
        depth: usize,
        cached: i8,
        computed: i32,
    },
    #[error("node at depth {depth} is out of balance ({balance})")]
    Unbalanced { depth: usize, balance: i32 },
    #[error("cached length {cached} differs from {counted} reachable nodes")]
    LengthMismatch { cached: usize, counted: usize },
}
