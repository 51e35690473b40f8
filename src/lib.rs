//! An ordered set implemented by a treap.
//!
//! A treap keeps its keys in binary search tree order while each node also carries a randomly
//! drawn priority that is kept in max-heap order. The random priorities keep the expected height
//! logarithmic without any rebalancing metadata. Besides membership tests, insertion, and
//! deletion, a treap can be split into two treaps around a key, two key-disjoint treaps can be
//! merged, and inclusive ranges of keys can be retrieved in ascending order.

mod error;
pub mod treap;

pub use crate::error::{Error, Result};
pub use crate::treap::Treap;
