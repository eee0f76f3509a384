use alloc::collections::TryReserveError;

/// The ways a [`Deque`](crate::Deque) operation can fail.
///
/// Only checked accesses ([`at`](crate::Deque::at), [`at_mut`](crate::Deque::at_mut)) and the
/// `try_` family of growth methods report errors. Everything else either cannot fail or panics
/// on a violated precondition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A checked access named a position at or past the end of the deque.
    #[error("index out of range: the len is {len} but the index is {index}")]
    OutOfRange {
        /// The requested logical index.
        index: usize,
        /// The length of the deque at the time of the access.
        len: usize,
    },

    /// The number of map slots (or element positions) needed would overflow `usize`.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// The allocator could not provide memory for the block map or for a block.
    #[error("memory allocation failed: {0}")]
    Alloc(TryReserveError),
}
