//! Iterators over a [`Tree`].
//!
//! [`Iter`] walks borrowed keys in any traversal order and is double-ended:
//! the back end runs the same traversal in reverse, so `.rev()` gives the
//! reverse-iterator family for free. [`IntoIter`] consumes the tree in
//! ascending key order.

use std::iter::FusedIterator;

use crate::arena::{Arena, NodeId};
use crate::traverse::{self, Traversal};
use crate::tree::Tree;

/// A double-ended iterator over the keys of a [`Tree`] in one traversal
/// order.
///
/// # Examples
///
/// ```
/// use bstree::{Traversal, Tree};
///
/// let tree: Tree<i32> = [5, 3, 7].into_iter().collect();
///
/// let post: Vec<i32> = tree.traverse(Traversal::PostOrder).copied().collect();
/// assert_eq!(post, [3, 7, 5]);
///
/// let reverse_post: Vec<i32> = tree.traverse(Traversal::PostOrder).rev().copied().collect();
/// assert_eq!(reverse_post, [5, 7, 3]);
/// ```
pub struct Iter<'a, K> {
    tree: &'a Tree<K>,
    order: Traversal,
    /// Next node the front end will yield, `None` once exhausted.
    front: Option<NodeId>,
    /// Next node the back end will yield, `None` once exhausted.
    back: Option<NodeId>,
    /// Elements not yet yielded from either end.
    remaining: usize,
}

// Manual impl so iterators of non-`Clone` keys can still be cloned.
impl<K> Clone for Iter<'_, K> {
    fn clone(&self) -> Self {
        Self { ..*self }
    }
}

impl<'a, K> Iter<'a, K> {
    pub(crate) fn new(tree: &'a Tree<K>, order: Traversal) -> Self {
        let (arena, root) = tree.parts();
        let (front, back) = match root {
            Some(root) => (
                Some(traverse::subtree_first(arena, order, root)),
                Some(traverse::subtree_last(arena, order, root)),
            ),
            None => (None, None),
        };
        Self {
            tree,
            order,
            front,
            back,
            remaining: tree.len(),
        }
    }
}

impl<'a, K> Iterator for Iter<'a, K> {
    type Item = &'a K;

    fn next(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.front?;
        self.remaining -= 1;
        let arena = self.tree.parts().0;
        if self.remaining == 0 {
            // The two ends met; both are spent.
            self.front = None;
            self.back = None;
        } else {
            self.front = traverse::successor(arena, self.order, id);
        }
        Some(arena.key(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, K> DoubleEndedIterator for Iter<'a, K> {
    fn next_back(&mut self) -> Option<&'a K> {
        if self.remaining == 0 {
            return None;
        }
        let id = self.back?;
        self.remaining -= 1;
        let arena = self.tree.parts().0;
        if self.remaining == 0 {
            self.front = None;
            self.back = None;
        } else {
            self.back = traverse::predecessor(arena, self.order, id);
        }
        Some(arena.key(id))
    }
}

impl<K> ExactSizeIterator for Iter<'_, K> {}
impl<K> FusedIterator for Iter<'_, K> {}

impl<'a, K: Ord> IntoIterator for &'a Tree<K> {
    type Item = &'a K;
    type IntoIter = Iter<'a, K>;

    fn into_iter(self) -> Iter<'a, K> {
        self.iter()
    }
}

/// An owning iterator over the keys of a [`Tree`], in ascending key order.
///
/// The in-order node sequence is pinned down once at construction; keys are
/// then taken out of the arena one by one from either end.
pub struct IntoIter<K> {
    arena: Arena<K>,
    ids: std::vec::IntoIter<NodeId>,
}

impl<K> Iterator for IntoIter<K> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let id = self.ids.next()?;
        Some(self.arena.release(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.ids.size_hint()
    }
}

impl<K> DoubleEndedIterator for IntoIter<K> {
    fn next_back(&mut self) -> Option<K> {
        let id = self.ids.next_back()?;
        Some(self.arena.release(id))
    }
}

impl<K> ExactSizeIterator for IntoIter<K> {}
impl<K> FusedIterator for IntoIter<K> {}

impl<K: Ord> IntoIterator for Tree<K> {
    type Item = K;
    type IntoIter = IntoIter<K>;

    /// Consumes the tree, yielding keys in ascending order.
    ///
    /// # Examples
    ///
    /// ```
    /// use bstree::Tree;
    ///
    /// let tree: Tree<i32> = [3, 1, 2].into_iter().collect();
    /// let sorted: Vec<i32> = tree.into_iter().collect();
    /// assert_eq!(sorted, [1, 2, 3]);
    /// ```
    fn into_iter(self) -> IntoIter<K> {
        let (arena, root) = self.parts();
        let mut ids = Vec::with_capacity(self.len());
        if let Some(root) = root {
            let mut current = Some(traverse::subtree_first(arena, Traversal::InOrder, root));
            while let Some(id) = current {
                ids.push(id);
                current = traverse::successor(arena, Traversal::InOrder, id);
            }
        }
        IntoIter {
            arena: self.into_arena(),
            ids: ids.into_iter(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Tree<i32> {
        [5, 3, 7, 1, 4, 6, 9].into_iter().collect()
    }

    #[test]
    fn forward_orders() {
        let tree = sample_tree();
        let collect = |order| -> Vec<i32> { tree.traverse(order).copied().collect() };
        assert_eq!(collect(Traversal::InOrder), [1, 3, 4, 5, 6, 7, 9]);
        assert_eq!(collect(Traversal::PreOrder), [5, 3, 1, 4, 7, 6, 9]);
        assert_eq!(collect(Traversal::PostOrder), [1, 4, 3, 6, 9, 7, 5]);
    }

    #[test]
    fn rev_matches_forward_reversed() {
        let tree = sample_tree();
        for order in [Traversal::InOrder, Traversal::PreOrder, Traversal::PostOrder] {
            let forward: Vec<i32> = tree.traverse(order).copied().collect();
            let mut reversed: Vec<i32> = tree.traverse(order).rev().copied().collect();
            reversed.reverse();
            assert_eq!(forward, reversed, "order {order:?}");
        }
    }

    #[test]
    fn ends_meet_in_the_middle() {
        let tree = sample_tree();
        let mut iter = tree.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&9));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next_back(), Some(&7));
        assert_eq!(iter.len(), 3);
        assert_eq!(iter.next(), Some(&4));
        assert_eq!(iter.next_back(), Some(&6));
        assert_eq!(iter.next(), Some(&5));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
        assert_eq!(iter.len(), 0);
    }

    #[test]
    fn exact_size_counts_down() {
        let tree = sample_tree();
        let mut iter = tree.traverse(Traversal::PreOrder);
        for expected_len in (0..7).rev() {
            iter.next();
            assert_eq!(iter.len(), expected_len);
        }
    }

    #[test]
    fn empty_tree_iterates_nothing() {
        let tree: Tree<i32> = Tree::new();
        assert_eq!(tree.iter().next(), None);
        assert_eq!(tree.iter().next_back(), None);
        assert_eq!(tree.into_iter().next(), None);
    }

    #[test]
    fn into_iter_yields_sorted_owned_keys() {
        let tree: Tree<String> = ["pear", "apple", "quince", "apple"]
            .into_iter()
            .map(String::from)
            .collect();
        let keys: Vec<String> = tree.into_iter().collect();
        assert_eq!(keys, ["apple", "apple", "pear", "quince"]);
    }

    #[test]
    fn into_iter_back_end() {
        let tree: Tree<i32> = [2, 1, 3].into_iter().collect();
        let mut iter = tree.into_iter();
        assert_eq!(iter.next_back(), Some(3));
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(2));
        assert_eq!(iter.next(), None);
    }
}
