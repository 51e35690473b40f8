//! Probabilistic binary search tree where each node also maintains the heap invariant.

mod node;
mod ser;
mod set;
mod tree;

pub use self::set::{Treap, TreapIntoIter, TreapIter};
