use std::result;
use thiserror::Error;

/// Convenience `Result` type for fallible treap operations.
pub type Result<T> = result::Result<T, Error>;

/// An error returned by a checked treap operation.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The keys of the receiving treap are not all less than the keys of the appended treap.
    #[error("key ranges overlap: every key on the left must be less than every key on the right")]
    OverlappingRanges,
}
