//! Bidirectional cursors over a [`Tree`].
//!
//! A cursor is one of three states: before the first element, on an element,
//! or past the last element of its traversal order. The boundary states play
//! the role classically filled by heap-allocated sentinel nodes; here they
//! are plain enum variants, so boundary positions cost nothing to create,
//! compare by value, and cannot be leaked.
//!
//! [`Cursor`] borrows the tree shared; the borrow checker guarantees the
//! tree cannot change underneath it. [`CursorMut`] holds the tree
//! exclusively and supports removing the element it points at while staying
//! valid itself.

use crate::arena::NodeId;
use crate::traverse::{self, Traversal};
use crate::tree::Tree;

/// Where a cursor currently stands in its traversal sequence.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Position {
    /// One before the first element.
    Start,
    /// On the element stored in this node.
    At(NodeId),
    /// One past the last element.
    End,
}

/// Advances one step in traversal order, saturating at [`Position::End`].
fn step_forward<K>(tree: &Tree<K>, order: Traversal, at: Position) -> Position {
    let (arena, root) = tree.parts();
    match at {
        Position::Start => match root {
            Some(root) => Position::At(traverse::subtree_first(arena, order, root)),
            None => Position::End,
        },
        Position::At(id) => match traverse::successor(arena, order, id) {
            Some(next) => Position::At(next),
            None => Position::End,
        },
        Position::End => Position::End,
    }
}

/// Retreats one step in traversal order, saturating at [`Position::Start`].
fn step_back<K>(tree: &Tree<K>, order: Traversal, at: Position) -> Position {
    let (arena, root) = tree.parts();
    match at {
        Position::End => match root {
            Some(root) => Position::At(traverse::subtree_last(arena, order, root)),
            None => Position::Start,
        },
        Position::At(id) => match traverse::predecessor(arena, order, id) {
            Some(prev) => Position::At(prev),
            None => Position::Start,
        },
        Position::Start => Position::Start,
    }
}

/// A read-only cursor into a [`Tree`], tied to one traversal order.
///
/// # Examples
///
/// ```
/// use bstree::{Traversal, Tree};
///
/// let tree: Tree<i32> = [2, 1, 3].into_iter().collect();
///
/// let mut cursor = tree.cursor_front(Traversal::InOrder);
/// assert_eq!(cursor.key(), Some(&1));
/// cursor.move_next();
/// assert_eq!(cursor.key(), Some(&2));
/// cursor.move_prev();
/// assert_eq!(cursor.key(), Some(&1));
/// ```
pub struct Cursor<'a, K> {
    tree: &'a Tree<K>,
    order: Traversal,
    at: Position,
}

// Manual impls so we don't require `K: Clone` for copying a borrow. See the
// note on generic structs in the std `Clone` docs.
impl<K> Clone for Cursor<'_, K> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<K> Copy for Cursor<'_, K> {}

/// Two cursors are equal when they come from the same tree, use the same
/// traversal order, and stand on the same position. All `End` cursors of one
/// tree and order are equal to each other regardless of how they got there.
impl<K> PartialEq for Cursor<'_, K> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.order == other.order && self.at == other.at
    }
}
impl<K> Eq for Cursor<'_, K> {}

impl<'a, K> Cursor<'a, K> {
    pub(crate) fn new(tree: &'a Tree<K>, order: Traversal, at: Position) -> Self {
        Self { tree, order, at }
    }

    /// The key under the cursor, or `None` on a boundary position.
    pub fn key(&self) -> Option<&'a K> {
        match self.at {
            Position::At(id) => Some(self.tree.parts().0.key(id)),
            Position::Start | Position::End => None,
        }
    }

    /// The traversal order this cursor navigates in.
    pub fn order(&self) -> Traversal {
        self.order
    }

    /// Whether the cursor stands before the first element.
    pub fn is_start(&self) -> bool {
        self.at == Position::Start
    }

    /// Whether the cursor stands past the last element.
    pub fn is_end(&self) -> bool {
        self.at == Position::End
    }

    /// Moves one step forward in traversal order.
    ///
    /// Returns `true` when the cursor lands on an element. From the start
    /// boundary this lands on the first element; walking off the last element
    /// parks the cursor at the end boundary; at the end boundary it stays put.
    pub fn move_next(&mut self) -> bool {
        self.at = step_forward(self.tree, self.order, self.at);
        matches!(self.at, Position::At(_))
    }

    /// Moves one step backward in traversal order.
    ///
    /// The mirror of [`move_next`](Self::move_next): stepping back off the
    /// end boundary lands on the last element in this traversal order.
    pub fn move_prev(&mut self) -> bool {
        self.at = step_back(self.tree, self.order, self.at);
        matches!(self.at, Position::At(_))
    }
}

impl<K: std::fmt::Debug> std::fmt::Debug for Cursor<'_, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Cursor")
            .field("order", &self.order)
            .field("key", &self.key())
            .finish()
    }
}

/// A cursor with exclusive access to the tree, able to remove the element it
/// stands on.
///
/// # Examples
///
/// ```
/// use bstree::{Traversal, Tree};
///
/// let mut tree: Tree<i32> = [5, 3, 7, 1, 4, 6, 9].into_iter().collect();
///
/// // Erase the root, which has two children; the cursor lands on the
/// // in-order successor.
/// let mut cursor = tree.find_mut(&5);
/// assert_eq!(cursor.remove_current(), Some(5));
/// assert_eq!(cursor.key(), Some(&6));
/// assert_eq!(tree.len(), 6);
/// ```
pub struct CursorMut<'a, K: Ord> {
    tree: &'a mut Tree<K>,
    order: Traversal,
    at: Position,
}

impl<'a, K: Ord> CursorMut<'a, K> {
    pub(crate) fn new(tree: &'a mut Tree<K>, order: Traversal, at: Position) -> Self {
        Self { tree, order, at }
    }

    /// The key under the cursor, or `None` on a boundary position.
    pub fn key(&self) -> Option<&K> {
        match self.at {
            Position::At(id) => Some(self.tree.parts().0.key(id)),
            Position::Start | Position::End => None,
        }
    }

    /// The traversal order this cursor navigates in.
    pub fn order(&self) -> Traversal {
        self.order
    }

    /// Whether the cursor stands before the first element.
    pub fn is_start(&self) -> bool {
        self.at == Position::Start
    }

    /// Whether the cursor stands past the last element.
    pub fn is_end(&self) -> bool {
        self.at == Position::End
    }

    /// Moves one step forward in traversal order. See [`Cursor::move_next`].
    pub fn move_next(&mut self) -> bool {
        self.at = step_forward(self.tree, self.order, self.at);
        matches!(self.at, Position::At(_))
    }

    /// Moves one step backward in traversal order. See [`Cursor::move_prev`].
    pub fn move_prev(&mut self) -> bool {
        self.at = step_back(self.tree, self.order, self.at);
        matches!(self.at, Position::At(_))
    }

    /// Removes the element under the cursor and returns its key, leaving the
    /// cursor on the removed element's successor in the cursor's traversal
    /// order (or on the end boundary if it was the last element).
    ///
    /// The successor position is computed *before* the tree is restructured.
    /// Erasing a node with two children swaps it link-by-link with its
    /// in-order successor instead of moving keys between nodes, so the
    /// precomputed successor keeps naming the same element afterwards.
    ///
    /// On a boundary position this is a no-op returning `None`.
    pub fn remove_current(&mut self) -> Option<K> {
        let Position::At(id) = self.at else {
            return None;
        };
        let next = step_forward(self.tree, self.order, self.at);
        let key = self.tree.detach(id);
        self.at = next;
        Some(key)
    }

    /// A read-only snapshot of this cursor's position.
    pub fn as_cursor(&self) -> Cursor<'_, K> {
        Cursor::new(self.tree, self.order, self.at)
    }
}

impl<K: Ord + std::fmt::Debug> std::fmt::Debug for CursorMut<'_, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CursorMut")
            .field("order", &self.order)
            .field("key", &self.key())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tree() -> Tree<i32> {
        [5, 3, 7, 1, 4, 6, 9].into_iter().collect()
    }

    #[test]
    fn boundary_round_trip_in_order() {
        let tree = sample_tree();
        let mut cursor = tree.cursor_front(Traversal::InOrder);

        for expected in [1, 3, 4, 5, 6, 7, 9] {
            assert_eq!(cursor.key(), Some(&expected));
            cursor.move_next();
        }
        assert!(cursor.is_end());

        // Stepping back off the end boundary lands on the last element.
        assert!(cursor.move_prev());
        assert_eq!(cursor.key(), Some(&9));

        for expected in [7, 6, 5, 4, 3, 1] {
            assert!(cursor.move_prev());
            assert_eq!(cursor.key(), Some(&expected));
        }
        assert!(!cursor.move_prev());
        assert!(cursor.is_start());

        // And forward off the start boundary lands on the first.
        assert!(cursor.move_next());
        assert_eq!(cursor.key(), Some(&1));
    }

    #[test]
    fn boundary_round_trip_pre_and_post_order() {
        let tree = sample_tree();
        for (order, last) in [(Traversal::PreOrder, 9), (Traversal::PostOrder, 5)] {
            let mut cursor = tree.cursor_front(order);
            while !cursor.is_end() {
                cursor.move_next();
            }
            assert!(cursor.move_prev());
            assert_eq!(cursor.key(), Some(&last), "last element in {order:?}");
        }
    }

    #[test]
    fn end_cursors_compare_equal() {
        let tree = sample_tree();
        let mut a = tree.cursor_front(Traversal::InOrder);
        while !a.is_end() {
            a.move_next();
        }
        let mut b = tree.cursor_back(Traversal::InOrder);
        b.move_next();
        assert!(b.is_end());
        // Reached by different routes, still the same boundary.
        assert_eq!(a, b);

        // A different traversal order is a different boundary.
        let mut c = tree.cursor_front(Traversal::PostOrder);
        while !c.is_end() {
            c.move_next();
        }
        assert_ne!(a, c);
    }

    #[test]
    fn saturates_at_boundaries() {
        let tree = sample_tree();
        let mut cursor = tree.cursor_front(Traversal::InOrder);
        while !cursor.is_end() {
            cursor.move_next();
        }
        assert!(!cursor.move_next());
        assert!(cursor.is_end());

        let mut cursor = tree.cursor_back(Traversal::InOrder);
        while !cursor.is_start() {
            cursor.move_prev();
        }
        assert!(!cursor.move_prev());
        assert!(cursor.is_start());
    }

    #[test]
    fn empty_tree_cursors() {
        let tree: Tree<i32> = Tree::new();
        let mut cursor = tree.cursor_front(Traversal::InOrder);
        assert!(cursor.is_end());
        assert_eq!(cursor.key(), None);
        assert!(!cursor.move_next());

        let mut cursor = tree.cursor_back(Traversal::PreOrder);
        assert!(cursor.is_start());
        assert!(!cursor.move_prev());
    }

    #[test]
    fn remove_current_walks_the_whole_tree() {
        let mut tree = sample_tree();
        let mut removed = Vec::new();
        let mut cursor = tree.cursor_front_mut(Traversal::InOrder);
        while let Some(key) = cursor.remove_current() {
            removed.push(key);
        }
        assert_eq!(removed, [1, 3, 4, 5, 6, 7, 9]);
        assert!(tree.is_empty());
    }

    #[test]
    fn remove_current_in_post_order() {
        let mut tree = sample_tree();
        let mut cursor = tree.cursor_front_mut(Traversal::PostOrder);
        // Post-order first is the leaf 1; after removing it the cursor sits
        // on the precomputed successor 4.
        assert_eq!(cursor.remove_current(), Some(1));
        assert_eq!(cursor.key(), Some(&4));
        assert_eq!(cursor.remove_current(), Some(4));
        assert_eq!(cursor.key(), Some(&3));
    }

    #[test]
    fn remove_current_at_boundary_is_a_noop() {
        let mut tree = sample_tree();
        let mut cursor = tree.cursor_front_mut(Traversal::InOrder);
        while !cursor.is_end() {
            cursor.move_next();
        }
        assert_eq!(cursor.remove_current(), None);
        assert_eq!(tree.len(), 7);
    }

    #[test]
    fn successor_handle_survives_two_child_removal() {
        let mut tree = sample_tree();
        let mut cursor = tree.find_mut(&5);
        assert_eq!(cursor.key(), Some(&5));
        // 5 has two children; its in-order successor 6 is relinked in place.
        assert_eq!(cursor.remove_current(), Some(5));
        assert_eq!(cursor.key(), Some(&6));
        // The cursor keeps navigating normally from the successor.
        assert!(cursor.move_next());
        assert_eq!(cursor.key(), Some(&7));
        assert!(cursor.move_prev());
        assert!(cursor.move_prev());
        assert_eq!(cursor.key(), Some(&4));
    }
}
