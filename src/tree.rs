//! The tree container: BST placement, deletion by successor substitution,
//! lookup, and bound queries.

use std::cmp::Ordering;
use std::fmt;

use crate::arena::{Arena, NodeId};
use crate::cursor::{Cursor, CursorMut, Position};
use crate::iter::Iter;
use crate::traverse::{self, Traversal};

/// An ordered binary search tree storing keys in `Ord` order.
///
/// Duplicate keys are allowed; every [`insert`](Self::insert) adds a node.
/// The tree does not rebalance itself, so operations are `O(height)` with a
/// worst case of `O(n)` for degenerate insertion orders.
///
/// # Examples
///
/// ```
/// use bstree::Tree;
///
/// let mut tree = Tree::new();
///
/// // Nothing in here yet.
/// assert!(!tree.contains(&1));
///
/// tree.insert(1);
/// tree.insert(1);
/// tree.insert(2);
/// assert_eq!(tree.len(), 3);
/// assert_eq!(tree.count(&1), 2);
///
/// // Removing a key removes every duplicate of it.
/// assert_eq!(tree.remove(&1), 2);
/// assert!(!tree.contains(&1));
/// ```
pub struct Tree<K> {
    arena: Arena<K>,
    root: Option<NodeId>,
    len: usize,
}

impl<K> Default for Tree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Tree<K> {
    /// Generates a new, empty `Tree`.
    pub fn new() -> Self {
        Self {
            arena: Arena::new(),
            root: None,
            len: 0,
        }
    }

    /// The number of keys stored, duplicates included.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the tree holds no keys at all.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Drops every node, leaving an empty tree.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.len = 0;
    }

    /// Exchanges the entire contents of two trees.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut a: Tree<i32> = [1, 2].into_iter().collect();
    /// let mut b: Tree<i32> = [9].into_iter().collect();
    /// a.swap(&mut b);
    /// assert_eq!(a.len(), 1);
    /// assert!(b.contains(&2));
    /// ```
    pub fn swap(&mut self, other: &mut Self) {
        std::mem::swap(self, other);
    }

    pub(crate) fn parts(&self) -> (&Arena<K>, Option<NodeId>) {
        (&self.arena, self.root)
    }

    pub(crate) fn into_arena(self) -> Arena<K> {
        self.arena
    }
}

impl<K: Ord> Tree<K> {
    /// Inserts a key and returns a cursor standing on the new node.
    ///
    /// Every call adds a node and grows [`len`](Self::len) by one, even for
    /// keys already present. A duplicate descends into the left subtree of
    /// its equal, so equal keys sit next to each other in in-order walks.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree = Tree::new();
    /// let cursor = tree.insert(7);
    /// assert_eq!(cursor.key(), Some(&7));
    /// ```
    pub fn insert(&mut self, key: K) -> Cursor<'_, K> {
        let id = match self.root {
            None => {
                let id = self.arena.alloc(key, None);
                self.root = Some(id);
                id
            }
            Some(root) => {
                let mut current = root;
                loop {
                    // Strictly-less goes right; equal-or-greater goes left,
                    // which is what buckets duplicates together.
                    if self.arena.key(current) < &key {
                        match self.arena.node(current).right {
                            Some(right) => current = right,
                            None => {
                                let id = self.arena.alloc(key, Some(current));
                                self.arena.node_mut(current).right = Some(id);
                                break id;
                            }
                        }
                    } else {
                        match self.arena.node(current).left {
                            Some(left) => current = left,
                            None => {
                                let id = self.arena.alloc(key, Some(current));
                                self.arena.node_mut(current).left = Some(id);
                                break id;
                            }
                        }
                    }
                }
            }
        };
        self.len += 1;
        Cursor::new(self, Traversal::InOrder, Position::At(id))
    }

    /// Potentially finds a node with the given key, returning an in-order
    /// cursor standing on it, or an end cursor if no node matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let tree: Tree<i32> = [2, 1, 3].into_iter().collect();
    /// assert_eq!(tree.find(&3).key(), Some(&3));
    /// assert!(tree.find(&42).is_end());
    /// ```
    pub fn find(&self, key: &K) -> Cursor<'_, K> {
        let at = match self.find_node(key) {
            Some(id) => Position::At(id),
            None => Position::End,
        };
        Cursor::new(self, Traversal::InOrder, at)
    }

    /// Like [`find`](Self::find) but returns a mutable cursor, able to remove
    /// the node it stands on.
    pub fn find_mut(&mut self, key: &K) -> CursorMut<'_, K> {
        let at = match self.find_node(key) {
            Some(id) => Position::At(id),
            None => Position::End,
        };
        CursorMut::new(self, Traversal::InOrder, at)
    }

    /// Whether at least one node holds this key.
    pub fn contains(&self, key: &K) -> bool {
        self.find_node(key).is_some()
    }

    /// Counts every node holding this key.
    ///
    /// This scans both subtrees of each equal node it passes, so duplicates
    /// are all found no matter what shape erasures have left the tree in.
    pub fn count(&self, key: &K) -> usize {
        fn count_in<K: Ord>(arena: &Arena<K>, at: Option<NodeId>, key: &K) -> usize {
            let Some(id) = at else {
                return 0;
            };
            let node = arena.node(id);
            match key.cmp(&node.key) {
                Ordering::Less => count_in(arena, node.left, key),
                Ordering::Greater => count_in(arena, node.right, key),
                Ordering::Equal => {
                    1 + count_in(arena, node.left, key) + count_in(arena, node.right, key)
                }
            }
        }
        count_in(&self.arena, self.root, key)
    }

    /// Removes every node holding this key and returns how many were removed.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree: Tree<i32> = [4, 2, 4, 6].into_iter().collect();
    /// assert_eq!(tree.remove(&4), 2);
    /// assert_eq!(tree.remove(&5), 0);
    /// assert_eq!(tree.len(), 2);
    /// ```
    pub fn remove(&mut self, key: &K) -> usize {
        let mut removed = 0;
        while let Some(id) = self.find_node(key) {
            self.detach(id);
            removed += 1;
        }
        removed
    }

    /// Removes one node holding this key, handing its key back to the
    /// caller. Returns `None` if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let mut tree: Tree<String> = ["a", "b"].into_iter().map(String::from).collect();
    /// assert_eq!(tree.take(&"b".to_string()), Some("b".to_string()));
    /// assert_eq!(tree.take(&"b".to_string()), None);
    /// ```
    pub fn take(&mut self, key: &K) -> Option<K> {
        let id = self.find_node(key)?;
        Some(self.detach(id))
    }

    /// An in-order cursor on the first element not less than `key`, or an
    /// end cursor when every element is less.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let tree: Tree<i32> = [5, 3, 7, 1, 4, 6, 9].into_iter().collect();
    /// assert_eq!(tree.lower_bound(&2).key(), Some(&3));
    /// assert_eq!(tree.lower_bound(&3).key(), Some(&3));
    /// assert!(tree.lower_bound(&10).is_end());
    /// ```
    pub fn lower_bound(&self, key: &K) -> Cursor<'_, K> {
        let Some(root) = self.root else {
            return Cursor::new(self, Traversal::InOrder, Position::End);
        };
        // Descend leftward while the current node is still an acceptable
        // answer; stopping early would overshoot past smaller candidates.
        let mut current = root;
        while let Some(left) = self.arena.node(current).left {
            if self.arena.key(current) < key {
                break;
            }
            current = left;
        }
        // Then walk forward over the elements that are too small.
        while self.arena.key(current) < key {
            match traverse::successor(&self.arena, Traversal::InOrder, current) {
                Some(next) => current = next,
                None => return Cursor::new(self, Traversal::InOrder, Position::End),
            }
        }
        Cursor::new(self, Traversal::InOrder, Position::At(current))
    }

    /// An in-order cursor on the first element strictly greater than `key`,
    /// or an end cursor when no element is greater.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let tree: Tree<i32> = [5, 3, 7, 1, 4, 6, 9].into_iter().collect();
    /// assert_eq!(tree.upper_bound(&3).key(), Some(&4));
    /// assert_eq!(tree.upper_bound(&2).key(), Some(&3));
    /// assert!(tree.upper_bound(&9).is_end());
    /// ```
    pub fn upper_bound(&self, key: &K) -> Cursor<'_, K> {
        let Some(root) = self.root else {
            return Cursor::new(self, Traversal::InOrder, Position::End);
        };
        let mut current = root;
        while let Some(left) = self.arena.node(current).left {
            if key >= self.arena.key(current) {
                break;
            }
            current = left;
        }
        while key >= self.arena.key(current) {
            match traverse::successor(&self.arena, Traversal::InOrder, current) {
                Some(next) => current = next,
                None => return Cursor::new(self, Traversal::InOrder, Position::End),
            }
        }
        Cursor::new(self, Traversal::InOrder, Position::At(current))
    }

    /// The pair `(lower_bound(key), upper_bound(key))`, bracketing every
    /// element equal to `key`.
    pub fn equal_range(&self, key: &K) -> (Cursor<'_, K>, Cursor<'_, K>) {
        (self.lower_bound(key), self.upper_bound(key))
    }

    /// An iterator over borrowed keys in ascending (in-order) order.
    pub fn iter(&self) -> Iter<'_, K> {
        Iter::new(self, Traversal::InOrder)
    }

    /// An iterator over borrowed keys in the given traversal order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::{Traversal, Tree};
    ///
    /// let tree: Tree<i32> = [2, 1, 3].into_iter().collect();
    /// let pre: Vec<i32> = tree.traverse(Traversal::PreOrder).copied().collect();
    /// assert_eq!(pre, [2, 1, 3]);
    /// ```
    pub fn traverse(&self, order: Traversal) -> Iter<'_, K> {
        Iter::new(self, order)
    }

    /// A cursor standing on the first element of the given traversal order,
    /// or on the end boundary when the tree is empty.
    pub fn cursor_front(&self, order: Traversal) -> Cursor<'_, K> {
        let at = match self.root {
            Some(root) => Position::At(traverse::subtree_first(&self.arena, order, root)),
            None => Position::End,
        };
        Cursor::new(self, order, at)
    }

    /// A cursor standing on the last element of the given traversal order,
    /// or on the start boundary when the tree is empty.
    pub fn cursor_back(&self, order: Traversal) -> Cursor<'_, K> {
        let at = match self.root {
            Some(root) => Position::At(traverse::subtree_last(&self.arena, order, root)),
            None => Position::Start,
        };
        Cursor::new(self, order, at)
    }

    /// Like [`cursor_front`](Self::cursor_front) but mutable, so elements
    /// can be removed while walking.
    pub fn cursor_front_mut(&mut self, order: Traversal) -> CursorMut<'_, K> {
        let at = match self.root {
            Some(root) => Position::At(traverse::subtree_first(&self.arena, order, root)),
            None => Position::End,
        };
        CursorMut::new(self, order, at)
    }

    /// Standard BST descent; stops at the first node comparing equal.
    fn find_node(&self, key: &K) -> Option<NodeId> {
        let mut current = self.root;
        while let Some(id) = current {
            current = match key.cmp(self.arena.key(id)) {
                Ordering::Equal => return Some(id),
                Ordering::Greater => self.arena.node(id).right,
                Ordering::Less => self.arena.node(id).left,
            };
        }
        None
    }

    /// Structurally removes one node and returns its key. `len` shrinks by
    /// exactly one.
    ///
    /// A node with two children is first link-swapped with its in-order
    /// successor (the leftmost node of its right subtree, which carries at
    /// most a right child) and then removed through the zero/one-child
    /// cases. Swapping links instead of keys keeps the successor's `NodeId`
    /// (and with it any outstanding handle) attached to the same element.
    pub(crate) fn detach(&mut self, id: NodeId) -> K {
        let (left, right, parent) = self.links(id);
        match (left, right) {
            (Some(_), Some(right)) => {
                let successor = traverse::minimum(&self.arena, right);
                self.swap_links(id, successor);
                // `id` now sits where the successor was, with at most one
                // child.
                self.detach(id)
            }
            (None, None) => {
                self.replace_child(parent, id, None);
                self.len -= 1;
                self.arena.release(id)
            }
            (Some(child), None) | (None, Some(child)) => {
                // Splice the lone child up into the erased node's position.
                self.arena.node_mut(child).parent = parent;
                self.replace_child(parent, id, Some(child));
                self.len -= 1;
                self.arena.release(id)
            }
        }
    }

    fn links(&self, id: NodeId) -> (Option<NodeId>, Option<NodeId>, Option<NodeId>) {
        let node = self.arena.node(id);
        (node.left, node.right, node.parent)
    }

    /// Points `parent`'s child slot (or the root slot) away from `old` and
    /// onto `new`.
    fn replace_child(&mut self, parent: Option<NodeId>, old: NodeId, new: Option<NodeId>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let node = self.arena.node_mut(parent);
                if node.left == Some(old) {
                    node.left = new;
                } else {
                    node.right = new;
                }
            }
        }
    }

    /// Exchanges the tree positions of two nodes by rewiring every link that
    /// touches them, leaving their keys (and ids) in place.
    fn swap_links(&mut self, x: NodeId, y: NodeId) {
        let (_, _, x_parent) = self.links(x);
        let (_, _, y_parent) = self.links(y);
        if x_parent == Some(y) {
            self.swap_with_parent(y, x);
        } else if y_parent == Some(x) {
            self.swap_with_parent(x, y);
        } else {
            self.swap_disjoint(x, y);
        }
    }

    /// Swaps a node with its direct parent. The simple exchange in
    /// [`swap_disjoint`](Self::swap_disjoint) would write self-referencing
    /// links here, so the parent/child edge is rebuilt by hand.
    fn swap_with_parent(&mut self, parent: NodeId, child: NodeId) {
        let (p_left, p_right, grandparent) = self.links(parent);
        let (c_left, c_right, _) = self.links(child);

        self.replace_child(grandparent, parent, Some(child));
        self.arena.node_mut(child).parent = grandparent;

        // The child's subtrees hang off the old parent now.
        if let Some(left) = c_left {
            self.arena.node_mut(left).parent = Some(parent);
        }
        if let Some(right) = c_right {
            self.arena.node_mut(right).parent = Some(parent);
        }
        {
            let node = self.arena.node_mut(parent);
            node.left = c_left;
            node.right = c_right;
            node.parent = Some(child);
        }

        // The old parent takes the child's slot; its other subtree moves
        // across unchanged.
        if p_left == Some(child) {
            if let Some(right) = p_right {
                self.arena.node_mut(right).parent = Some(child);
            }
            let node = self.arena.node_mut(child);
            node.left = Some(parent);
            node.right = p_right;
        } else {
            if let Some(left) = p_left {
                self.arena.node_mut(left).parent = Some(child);
            }
            let node = self.arena.node_mut(child);
            node.left = p_left;
            node.right = Some(parent);
        }
    }

    /// Swaps two nodes that are not parent and child of each other.
    fn swap_disjoint(&mut self, x: NodeId, y: NodeId) {
        let (x_left, x_right, x_parent) = self.links(x);
        let (y_left, y_right, y_parent) = self.links(y);

        self.replace_child(x_parent, x, Some(y));
        if let Some(left) = x_left {
            self.arena.node_mut(left).parent = Some(y);
        }
        if let Some(right) = x_right {
            self.arena.node_mut(right).parent = Some(y);
        }
        {
            let node = self.arena.node_mut(y);
            node.parent = x_parent;
            node.left = x_left;
            node.right = x_right;
        }

        self.replace_child(y_parent, y, Some(x));
        if let Some(left) = y_left {
            self.arena.node_mut(left).parent = Some(x);
        }
        if let Some(right) = y_right {
            self.arena.node_mut(right).parent = Some(x);
        }
        {
            let node = self.arena.node_mut(x);
            node.parent = y_parent;
            node.left = y_left;
            node.right = y_right;
        }
    }
}

/// Structural equality: two trees are equal only when their shapes match
/// node for node and the keys at corresponding nodes compare equal. Trees
/// holding the same multiset of keys in different shapes are *not* equal.
impl<K: Ord> PartialEq for Tree<K> {
    fn eq(&self, other: &Self) -> bool {
        fn subtree_eq<K: Ord>(
            a: &Arena<K>,
            at_a: Option<NodeId>,
            b: &Arena<K>,
            at_b: Option<NodeId>,
        ) -> bool {
            match (at_a, at_b) {
                (None, None) => true,
                (Some(x), Some(y)) => {
                    let nx = a.node(x);
                    let ny = b.node(y);
                    nx.key.cmp(&ny.key) == Ordering::Equal
                        && subtree_eq(a, nx.left, b, ny.left)
                        && subtree_eq(a, nx.right, b, ny.right)
                }
                _ => false,
            }
        }
        self.len == other.len && subtree_eq(&self.arena, self.root, &other.arena, other.root)
    }
}

impl<K: Ord> Eq for Tree<K> {}

impl<K: Ord> Extend<K> for Tree<K> {
    fn extend<I: IntoIterator<Item = K>>(&mut self, iter: I) {
        for key in iter {
            self.insert(key);
        }
    }
}

impl<K: Ord> FromIterator<K> for Tree<K> {
    fn from_iter<I: IntoIterator<Item = K>>(iter: I) -> Self {
        let mut tree = Tree::new();
        tree.extend(iter);
        tree
    }
}

impl<K: Ord + fmt::Debug> fmt::Debug for Tree<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}


#[cfg(test)]
mod quicktests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::test::quick::Op;

    /// Applies a set of operations to a tree and a count map. This way we
    /// can ensure that after a random smattering of inserts and removes we
    /// hold the same multiset of keys as the model.
    fn do_ops<K>(ops: &[Op<K>], tree: &mut Tree<K>, model: &mut BTreeMap<K, usize>)
    where
        K: Ord + Clone,
    {
        for op in ops {
            match op {
                Op::Insert(key) => {
                    tree.insert(key.clone());
                    *model.entry(key.clone()).or_insert(0) += 1;
                }
                Op::Remove(key) => {
                    let expected = model.remove(key).unwrap_or(0);
                    assert_eq!(tree.remove(key), expected);
                }
                Op::Take(key) => {
                    let model_took = match model.get_mut(key) {
                        Some(count) => {
                            *count -= 1;
                            if *count == 0 {
                                model.remove(key);
                            }
                            true
                        }
                        None => false,
                    };
                    assert_eq!(tree.take(key).is_some(), model_took);
                }
            }
        }
    }

    fn model_keys<K: Ord + Clone>(model: &BTreeMap<K, usize>) -> Vec<K> {
        model
            .iter()
            .flat_map(|(key, &count)| std::iter::repeat(key.clone()).take(count))
            .collect()
    }

    quickcheck::quickcheck! {
        fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
            let mut tree = Tree::new();
            let mut model = BTreeMap::new();

            do_ops(&ops, &mut tree, &mut model);

            tree.len() == model.values().sum::<usize>()
                && tree.iter().copied().collect::<Vec<_>>() == model_keys(&model)
        }
    }

    quickcheck::quickcheck! {
        fn in_order_is_sorted(xs: Vec<i8>) -> bool {
            let tree: Tree<i8> = xs.iter().copied().collect();
            let walked: Vec<i8> = tree.iter().copied().collect();
            let mut sorted = xs;
            sorted.sort_unstable();
            walked == sorted
        }
    }

    quickcheck::quickcheck! {
        fn contains_every_inserted_key(xs: Vec<i8>) -> bool {
            let tree: Tree<i8> = xs.iter().copied().collect();
            xs.iter().all(|x| tree.contains(x))
        }
    }

    quickcheck::quickcheck! {
        fn count_matches_insertions(xs: Vec<i8>) -> bool {
            let tree: Tree<i8> = xs.iter().copied().collect();
            xs.iter().all(|x| {
                tree.count(x) == xs.iter().filter(|y| *y == x).count()
            })
        }
    }

    quickcheck::quickcheck! {
        fn bounds_agree_with_sorted_model(xs: Vec<i8>, probes: Vec<i8>) -> bool {
            let tree: Tree<i8> = xs.iter().copied().collect();
            let mut sorted = xs;
            sorted.sort_unstable();

            probes.iter().all(|probe| {
                let low = sorted.iter().find(|x| *x >= probe).copied();
                let high = sorted.iter().find(|x| *x > probe).copied();
                tree.lower_bound(probe).key().copied() == low
                    && tree.upper_bound(probe).key().copied() == high
            })
        }
    }
}
