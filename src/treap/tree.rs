use crate::treap::node::Node;
use std::cmp::Ordering;

pub type Tree<T> = Option<Box<Node<T>>>;

pub fn len<T>(tree: &Tree<T>) -> usize {
    match *tree {
        Some(ref node) => node.len,
        None => 0,
    }
}

fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.right.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.right = child.left.take();
    node.update();
    child.left = Some(node);
    child.update();
    child
}

fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let mut child = match node.left.take() {
        Some(child) => child,
        None => unreachable!(),
    };
    node.left = child.right.take();
    node.update();
    child.right = Some(node);
    child.update();
    child
}

fn is_heap_property_violated<T>(node: &Node<T>, child: &Tree<T>) -> bool {
    match *child {
        Some(ref child_node) => child_node.priority > node.priority,
        None => false,
    }
}

/// Inserts `key` with `priority` and returns the new root along with whether a node was created.
/// The priority is only used if `key` is not already in the tree.
pub fn insert<T: Ord>(tree: Tree<T>, key: T, priority: u32) -> (Tree<T>, bool) {
    let mut node = match tree {
        Some(node) => node,
        None => return (Some(Box::new(Node::new(key, priority))), true),
    };

    let inserted = match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, inserted) = insert(node.left.take(), key, priority);
            node.left = left;
            node.update();
            if is_heap_property_violated(&node, &node.left) {
                node = rotate_right(node);
            }
            inserted
        },
        Ordering::Greater => {
            let (right, inserted) = insert(node.right.take(), key, priority);
            node.right = right;
            node.update();
            if is_heap_property_violated(&node, &node.right) {
                node = rotate_left(node);
            }
            inserted
        },
        Ordering::Equal => false,
    };

    (Some(node), inserted)
}

// Pushes the root down towards its higher priority child until it has at most one child, then
// splices it out.
fn remove_root<T>(mut node: Box<Node<T>>) -> Tree<T> {
    match (node.left.take(), node.right.take()) {
        (None, None) => None,
        (Some(child), None) | (None, Some(child)) => Some(child),
        (Some(left_node), Some(right_node)) => {
            let rotate_right_first = left_node.priority > right_node.priority;
            node.left = Some(left_node);
            node.right = Some(right_node);
            let mut root = if rotate_right_first {
                let mut root = rotate_right(node);
                root.right = root.right.take().and_then(remove_root);
                root
            } else {
                let mut root = rotate_left(node);
                root.left = root.left.take().and_then(remove_root);
                root
            };
            root.update();
            Some(root)
        },
    }
}

/// Removes `key` and returns the new root along with whether a node was removed.
pub fn remove<T: Ord>(tree: Tree<T>, key: &T) -> (Tree<T>, bool) {
    let mut node = match tree {
        Some(node) => node,
        None => return (None, false),
    };

    match key.cmp(&node.key) {
        Ordering::Less => {
            let (left, removed) = remove(node.left.take(), key);
            node.left = left;
            node.update();
            (Some(node), removed)
        },
        Ordering::Greater => {
            let (right, removed) = remove(node.right.take(), key);
            node.right = right;
            node.update();
            (Some(node), removed)
        },
        Ordering::Equal => (remove_root(node), true),
    }
}

pub fn contains<T: Ord>(tree: &Tree<T>, key: &T) -> bool {
    let mut curr = tree;
    while let Some(ref node) = *curr {
        match key.cmp(&node.key) {
            Ordering::Less => curr = &node.left,
            Ordering::Greater => curr = &node.right,
            Ordering::Equal => return true,
        }
    }
    false
}

/// Splits a tree into the keys less than or equal to `key` and the keys greater than `key`.
pub fn split<T: Ord>(tree: Tree<T>, key: &T) -> (Tree<T>, Tree<T>) {
    match tree {
        Some(mut node) => {
            if node.key <= *key {
                let (left, right) = split(node.right.take(), key);
                node.right = left;
                node.update();
                (Some(node), right)
            } else {
                let (left, right) = split(node.left.take(), key);
                node.left = right;
                node.update();
                (left, Some(node))
            }
        },
        None => (None, None),
    }
}

/// Merges two trees. Every key in `l_tree` must be less than every key in `r_tree`.
pub fn merge<T>(l_tree: Tree<T>, r_tree: Tree<T>) -> Tree<T> {
    match (l_tree, r_tree) {
        (Some(mut l_node), Some(mut r_node)) => {
            if l_node.priority > r_node.priority {
                l_node.right = merge(l_node.right.take(), Some(r_node));
                l_node.update();
                Some(l_node)
            } else {
                r_node.left = merge(Some(l_node), r_node.left.take());
                r_node.update();
                Some(r_node)
            }
        },
        (new_tree, None) | (None, new_tree) => new_tree,
    }
}

/// Appends the keys in `[low, high]` to `keys` in ascending order. Subtrees that lie entirely
/// outside the range are not visited.
pub fn range<'a, T: Ord>(tree: &'a Tree<T>, low: &T, high: &T, keys: &mut Vec<&'a T>) {
    if let Some(ref node) = *tree {
        if *low < node.key {
            range(&node.left, low, high, keys);
        }
        if *low <= node.key && node.key <= *high {
            keys.push(&node.key);
        }
        if node.key < *high {
            range(&node.right, low, high, keys);
        }
    }
}

pub fn min<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref left_node) = curr.left {
            curr = left_node;
        }
        &curr.key
    })
}

pub fn max<T>(tree: &Tree<T>) -> Option<&T> {
    tree.as_ref().map(|node| {
        let mut curr = node;
        while let Some(ref right_node) = curr.right {
            curr = right_node;
        }
        &curr.key
    })
}

/// Asserts the binary search tree property, the heap property, and the cached lengths of every
/// node. Returns the number of nodes in the tree.
#[cfg(test)]
pub fn assert_invariants<T: Ord>(tree: &Tree<T>) -> usize {
    fn check<T: Ord>(tree: &Tree<T>, low: Option<&T>, high: Option<&T>) -> usize {
        match *tree {
            Some(ref node) => {
                if let Some(low) = low {
                    assert!(*low < node.key);
                }
                if let Some(high) = high {
                    assert!(node.key < *high);
                }
                assert!(!is_heap_property_violated(node, &node.left));
                assert!(!is_heap_property_violated(node, &node.right));
                let len = 1
                    + check(&node.left, low, Some(&node.key))
                    + check(&node.right, Some(&node.key), high);
                assert_eq!(node.len, len);
                len
            },
            None => 0,
        }
    }
    check(tree, None, None)
}
