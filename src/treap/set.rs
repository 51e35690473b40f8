use crate::error::{Error, Result};
use crate::treap::node::Node;
use crate::treap::tree;
use log::{debug, trace};
use std::fmt;
use std::iter::FromIterator;

/// An ordered set implemented by a treap.
///
/// A treap is a tree that satisfies both the binary search tree property and a heap property. Each
/// node has a key and a priority. The key of any node is greater than all keys in its left
/// subtree and less than all keys occuring in its right subtree. The priority of a node is
/// greater than or equal to the priority of all nodes in its subtrees. By randomly generating
/// priorities, the expected height of the tree is proportional to the logarithm of the number of
/// keys.
///
/// # Examples
/// ```
/// use treap_collections::Treap;
///
/// let mut t = Treap::new();
/// t.insert(0);
/// t.insert(3);
///
/// assert_eq!(t.len(), 2);
/// assert!(t.contains(&3));
///
/// let (left, right) = t.split(&1);
/// assert_eq!(left.iter().collect::<Vec<&u32>>(), vec![&0]);
/// assert_eq!(right.iter().collect::<Vec<&u32>>(), vec![&3]);
///
/// let t = Treap::merge(left, right);
/// assert_eq!(t.range(&0, &2), vec![&0]);
/// ```
#[derive(Clone)]
pub struct Treap<T> {
    root: tree::Tree<T>,
}

impl<T> Treap<T> {
    /// Constructs a new, empty `Treap<T>`.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::Treap;
    ///
    /// let t: Treap<u32> = Treap::new();
    /// assert!(t.is_empty());
    /// ```
    pub fn new() -> Self {
        Treap { root: None }
    }

    fn from_tree(root: tree::Tree<T>) -> Self {
        Treap { root }
    }

    /// Returns the number of keys in the treap.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1);
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        tree::len(&self.root)
    }

    /// Returns `true` if the treap contains no keys.
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the minimum key of the treap. Returns `None` if the treap is empty.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1);
    /// t.insert(3);
    /// assert_eq!(t.min(), Some(&1));
    /// ```
    pub fn min(&self) -> Option<&T> {
        tree::min(&self.root)
    }

    /// Returns the maximum key of the treap. Returns `None` if the treap is empty.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1);
    /// t.insert(3);
    /// assert_eq!(t.max(), Some(&3));
    /// ```
    pub fn max(&self) -> Option<&T> {
        tree::max(&self.root)
    }

    /// Merges two treaps into one. Both treaps are consumed and their nodes are relinked into the
    /// returned treap.
    ///
    /// Every key in `left` must be less than every key in `right`. This is not checked; if it
    /// does not hold, the returned treap is no longer ordered and lookups on it are unreliable.
    /// Use [`Treap::append`] for a checked merge.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::Treap;
    ///
    /// let left: Treap<u32> = vec![10, 20, 30].into_iter().collect();
    /// let right: Treap<u32> = vec![50, 60, 70].into_iter().collect();
    ///
    /// let t = Treap::merge(left, right);
    /// assert_eq!(
    ///     t.iter().collect::<Vec<&u32>>(),
    ///     vec![&10, &20, &30, &50, &60, &70],
    /// );
    /// ```
    pub fn merge(left: Self, right: Self) -> Self {
        trace!("merging treaps of {} and {} keys", left.len(), right.len());
        Treap::from_tree(tree::merge(left.root, right.root))
    }

    /// Returns an iterator over the treap. The iterator will yield keys using in-order traversal.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(3);
    /// t.insert(1);
    ///
    /// let mut iterator = t.iter();
    /// assert_eq!(iterator.next(), Some(&1));
    /// assert_eq!(iterator.next(), Some(&3));
    /// assert_eq!(iterator.next(), None);
    /// ```
    pub fn iter(&self) -> TreapIter<'_, T> {
        TreapIter {
            current: &self.root,
            stack: Vec::new(),
        }
    }
}

impl<T: Ord> Treap<T> {
    /// Inserts a key into the treap and returns `true` if it was not already present. Inserting
    /// a key that already exists leaves the treap unchanged.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::Treap;
    ///
    /// let mut t = Treap::new();
    /// assert!(t.insert(1));
    /// assert!(!t.insert(1));
    /// assert_eq!(t.len(), 1);
    /// ```
    pub fn insert(&mut self, key: T) -> bool {
        let (root, inserted) = tree::insert(self.root.take(), key, rand::random::<u32>());
        self.root = root;
        inserted
    }

    /// Removes a key from the treap and returns `true` if it was present.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1);
    /// assert!(t.remove(&1));
    /// assert!(!t.remove(&1));
    /// ```
    pub fn remove(&mut self, key: &T) -> bool {
        let (root, removed) = tree::remove(self.root.take(), key);
        self.root = root;
        removed
    }

    /// Checks if a key exists in the treap.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::Treap;
    ///
    /// let mut t = Treap::new();
    /// t.insert(1);
    /// assert!(!t.contains(&0));
    /// assert!(t.contains(&1));
    /// ```
    pub fn contains(&self, key: &T) -> bool {
        tree::contains(&self.root, key)
    }

    /// Splits the treap into two treaps. The first contains every key less than or equal to
    /// `key` and the second contains every key greater than `key`. The treap is consumed and its
    /// nodes are redistributed between the two halves.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::Treap;
    ///
    /// let t: Treap<u32> = vec![50, 20, 70, 10, 30, 60, 80].into_iter().collect();
    /// let (left, right) = t.split(&40);
    ///
    /// assert_eq!(left.iter().collect::<Vec<&u32>>(), vec![&10, &20, &30]);
    /// assert_eq!(right.iter().collect::<Vec<&u32>>(), vec![&50, &60, &70, &80]);
    /// ```
    pub fn split(self, key: &T) -> (Self, Self) {
        let (left, right) = tree::split(self.root, key);
        trace!(
            "split treap into {} and {} keys",
            tree::len(&left),
            tree::len(&right)
        );
        (Treap::from_tree(left), Treap::from_tree(right))
    }

    /// Moves every key of `other` into `self`, leaving `other` empty. Every key in `self` must be
    /// less than every key in `other`; otherwise `Error::OverlappingRanges` is returned and
    /// neither treap is modified.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::{Error, Treap};
    ///
    /// let mut n: Treap<u32> = vec![1, 2].into_iter().collect();
    /// let mut m: Treap<u32> = vec![3, 4].into_iter().collect();
    ///
    /// assert_eq!(n.append(&mut m), Ok(()));
    /// assert_eq!(n.len(), 4);
    /// assert!(m.is_empty());
    ///
    /// let mut o: Treap<u32> = vec![0].into_iter().collect();
    /// assert_eq!(n.append(&mut o), Err(Error::OverlappingRanges));
    /// assert_eq!(o.len(), 1);
    /// ```
    pub fn append(&mut self, other: &mut Self) -> Result<()> {
        if let (Some(max), Some(min)) = (self.max(), other.min()) {
            if max >= min {
                debug!(
                    "rejected append of {} keys onto {} keys with overlapping ranges",
                    other.len(),
                    self.len()
                );
                return Err(Error::OverlappingRanges);
            }
        }
        trace!("appending {} keys onto {} keys", other.len(), self.len());
        self.root = tree::merge(self.root.take(), other.root.take());
        Ok(())
    }

    /// Returns the keys in the inclusive range `[low, high]` in ascending order. Returns an empty
    /// vector if `low` is greater than `high`.
    ///
    /// # Examples
    /// ```
    /// use treap_collections::Treap;
    ///
    /// let t: Treap<u32> = vec![50, 20, 70, 10, 30, 60, 80, 25, 35, 65].into_iter().collect();
    /// assert_eq!(t.range(&25, &60), vec![&25, &30, &35, &50, &60]);
    /// ```
    pub fn range(&self, low: &T, high: &T) -> Vec<&T> {
        let mut keys = Vec::new();
        tree::range(&self.root, low, high, &mut keys);
        keys
    }
}

impl<T> Default for Treap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Treap<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for Treap<T> {
    fn eq(&self, other: &Treap<T>) -> bool {
        self.len() == other.len() && self.iter().eq(other.iter())
    }
}

impl<T: Eq> Eq for Treap<T> {}

impl<T: Ord> FromIterator<T> for Treap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut treap = Treap::new();
        treap.extend(iter);
        treap
    }
}

impl<T: Ord> Extend<T> for Treap<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<T> IntoIterator for Treap<T> {
    type Item = T;
    type IntoIter = TreapIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        TreapIntoIter {
            current: self.root,
            stack: Vec::new(),
        }
    }
}

impl<'a, T: 'a> IntoIterator for &'a Treap<T> {
    type Item = &'a T;
    type IntoIter = TreapIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// An owning iterator for `Treap<T>`.
///
/// This iterator traverses the keys of a treap in-order and yields owned keys.
pub struct TreapIntoIter<T> {
    current: tree::Tree<T>,
    stack: Vec<Node<T>>,
}

impl<T> Iterator for TreapIntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(mut node) = self.current.take() {
            self.current = node.left.take();
            self.stack.push(*node);
        }
        self.stack.pop().map(|node| {
            let Node { key, right, .. } = node;
            self.current = right;
            key
        })
    }
}

/// An iterator for `Treap<T>`.
///
/// This iterator traverses the keys of a treap in-order and yields immutable references.
pub struct TreapIter<'a, T> {
    current: &'a tree::Tree<T>,
    stack: Vec<&'a Node<T>>,
}

impl<'a, T: 'a> Iterator for TreapIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(ref node) = *self.current {
            self.current = &node.left;
            self.stack.push(node);
        }
        self.stack.pop().map(|node| {
            self.current = &node.right;
            &node.key
        })
    }
}

#[cfg(test)]
mod tests {
    use super::Treap;
    use crate::error::Error;
    use crate::treap::tree;
    use rand::{Rng, SeedableRng, XorShiftRng};

    fn from_keys(keys: &[u32]) -> Treap<u32> {
        keys.iter().cloned().collect()
    }

    fn to_vec(treap: &Treap<u32>) -> Vec<u32> {
        treap.iter().cloned().collect()
    }

    #[test]
    fn test_len_empty() {
        let treap: Treap<u32> = Treap::new();
        assert_eq!(treap.len(), 0);
        assert!(treap.is_empty());
    }

    #[test]
    fn test_min_max_empty() {
        let treap: Treap<u32> = Treap::new();
        assert_eq!(treap.min(), None);
        assert_eq!(treap.max(), None);
    }

    #[test]
    fn test_empty_operations() {
        let mut treap: Treap<u32> = Treap::new();
        assert!(!treap.contains(&10));
        assert!(!treap.remove(&10));
        assert!(treap.range(&0, &100).is_empty());

        let (left, right) = treap.split(&50);
        assert!(left.is_empty());
        assert!(right.is_empty());
    }

    #[test]
    fn test_insert_search() {
        let treap = from_keys(&[50, 20, 70, 10, 30, 60, 80]);
        assert!(treap.contains(&50));
        assert!(treap.contains(&60));
        assert!(!treap.contains(&99));
        assert_eq!(treap.len(), 7);
    }

    #[test]
    fn test_insert_duplicate() {
        let mut treap = from_keys(&[1, 2, 3]);
        assert!(!treap.insert(2));
        assert_eq!(treap.len(), 3);
        assert_eq!(to_vec(&treap), vec![1, 2, 3]);
        tree::assert_invariants(&treap.root);
    }

    #[test]
    fn test_remove() {
        let mut treap = from_keys(&[50, 20, 70, 10, 30, 60, 80]);
        assert!(treap.remove(&10));
        assert!(!treap.contains(&10));
        assert!(treap.remove(&20));
        assert!(!treap.contains(&20));
        assert!(!treap.remove(&999));
        assert_eq!(treap.len(), 5);
        tree::assert_invariants(&treap.root);
    }

    #[test]
    fn test_split() {
        let treap = from_keys(&[50, 20, 70, 10, 30, 60, 80]);
        let (left, right) = treap.split(&40);
        assert_eq!(to_vec(&left), vec![10, 20, 30]);
        assert_eq!(to_vec(&right), vec![50, 60, 70, 80]);
        assert_eq!(left.len(), 3);
        assert_eq!(right.len(), 4);
        tree::assert_invariants(&left.root);
        tree::assert_invariants(&right.root);
    }

    #[test]
    fn test_merge() {
        let left = from_keys(&[10, 20, 30]);
        let right = from_keys(&[50, 60, 70]);
        let treap = Treap::merge(left, right);
        assert_eq!(to_vec(&treap), vec![10, 20, 30, 50, 60, 70]);
        assert_eq!(treap.len(), 6);
        tree::assert_invariants(&treap.root);
    }

    #[test]
    fn test_append() {
        let mut left = from_keys(&[1, 2, 3]);
        let mut right = from_keys(&[4, 5]);
        assert_eq!(left.append(&mut right), Ok(()));
        assert_eq!(to_vec(&left), vec![1, 2, 3, 4, 5]);
        assert!(right.is_empty());
        tree::assert_invariants(&left.root);

        let mut empty = Treap::new();
        assert_eq!(left.append(&mut empty), Ok(()));
        assert_eq!(empty.append(&mut left), Ok(()));
        assert_eq!(to_vec(&empty), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_append_overlapping() {
        let mut left = from_keys(&[1, 5]);
        let mut right = from_keys(&[3, 7]);
        assert_eq!(left.append(&mut right), Err(Error::OverlappingRanges));
        assert_eq!(to_vec(&left), vec![1, 5]);
        assert_eq!(to_vec(&right), vec![3, 7]);

        let mut touching = from_keys(&[5]);
        assert_eq!(left.append(&mut touching), Err(Error::OverlappingRanges));
    }

    #[test]
    fn test_range() {
        let treap = from_keys(&[50, 20, 70, 10, 30, 60, 80, 25, 35, 65]);
        assert_eq!(treap.range(&25, &60), vec![&25, &30, &35, &50, &60]);
        assert_eq!(treap.range(&26, &29), Vec::<&u32>::new());
        assert_eq!(treap.range(&80, &80), vec![&80]);
        assert_eq!(treap.range(&60, &25), Vec::<&u32>::new());
    }

    #[test]
    fn test_min_max() {
        let treap = from_keys(&[3, 1, 5]);
        assert_eq!(treap.min(), Some(&1));
        assert_eq!(treap.max(), Some(&5));
    }

    #[test]
    fn test_into_iter() {
        let treap = from_keys(&[1, 5, 3]);
        assert_eq!(treap.into_iter().collect::<Vec<u32>>(), vec![1, 3, 5]);
    }

    #[test]
    fn test_iter() {
        let treap = from_keys(&[1, 5, 3]);
        assert_eq!(treap.iter().collect::<Vec<&u32>>(), vec![&1, &3, &5]);
        assert_eq!((&treap).into_iter().count(), 3);
    }

    #[test]
    fn test_eq_ignores_shape() {
        let n = from_keys(&[1, 2, 3, 4]);
        let m = from_keys(&[4, 3, 2, 1]);
        assert_eq!(n, m);
        assert_ne!(n, from_keys(&[1, 2, 3]));
    }

    #[test]
    fn test_debug() {
        let treap = from_keys(&[2, 1]);
        assert_eq!(format!("{:?}", treap), "{1, 2}");
    }

    #[test]
    fn test_clone() {
        let treap = from_keys(&[2, 1, 3]);
        let mut copy = treap.clone();
        copy.remove(&2);
        assert_eq!(to_vec(&treap), vec![1, 2, 3]);
        assert_eq!(to_vec(&copy), vec![1, 3]);
    }

    #[test]
    fn test_invariants_random() {
        let mut rng: XorShiftRng = SeedableRng::from_seed([1, 1, 1, 1]);
        let mut treap = Treap::new();
        for _ in 0..2_000 {
            let key = rng.gen_range(0, 500u32);
            if rng.gen::<bool>() {
                treap.insert(key);
            } else {
                treap.remove(&key);
            }
            assert_eq!(tree::assert_invariants(&treap.root), treap.len());
        }

        let before = to_vec(&treap);
        let (left, right) = treap.split(&250);
        tree::assert_invariants(&left.root);
        tree::assert_invariants(&right.root);
        let treap = Treap::merge(left, right);
        tree::assert_invariants(&treap.root);
        assert_eq!(to_vec(&treap), before);
    }
}
