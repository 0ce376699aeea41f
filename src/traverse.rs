//! Stack-free navigation primitives.
//!
//! Successor and predecessor in each traversal order are computed purely by
//! chasing `parent`/`left`/`right` links; nothing here allocates or keeps
//! per-traversal state. All functions return `None` at the global boundary of
//! the sequence; materializing a boundary position out of that `None` is the
//! cursor's job, not ours.

use crate::arena::{Arena, NodeId};

/// The order in which a traversal visits tree nodes.
///
/// - `InOrder`: left subtree, node, right subtree (ascending key order).
/// - `PreOrder`: node, left subtree, right subtree.
/// - `PostOrder`: left subtree, right subtree, node.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Traversal {
    /// Visit the left subtree, then the node, then the right subtree.
    #[default]
    InOrder,
    /// Visit the node, then the left subtree, then the right subtree.
    PreOrder,
    /// Visit the left subtree, then the right subtree, then the node.
    PostOrder,
}

/// Leftmost node of the subtree rooted at `id` (the in-order first).
pub(crate) fn minimum<K>(arena: &Arena<K>, mut id: NodeId) -> NodeId {
    while let Some(left) = arena.node(id).left {
        id = left;
    }
    id
}

/// Rightmost node of the subtree rooted at `id` (the in-order last).
pub(crate) fn maximum<K>(arena: &Arena<K>, mut id: NodeId) -> NodeId {
    while let Some(right) = arena.node(id).right {
        id = right;
    }
    id
}

/// First node of the subtree rooted at `id` in the given order.
pub(crate) fn subtree_first<K>(arena: &Arena<K>, order: Traversal, id: NodeId) -> NodeId {
    match order {
        Traversal::InOrder => minimum(arena, id),
        Traversal::PreOrder => id,
        // Deepest left-else-right descent: the first leaf post-order reaches.
        Traversal::PostOrder => {
            let mut current = id;
            loop {
                let node = arena.node(current);
                match node.left.or(node.right) {
                    Some(child) => current = child,
                    None => return current,
                }
            }
        }
    }
}

/// Last node of the subtree rooted at `id` in the given order.
pub(crate) fn subtree_last<K>(arena: &Arena<K>, order: Traversal, id: NodeId) -> NodeId {
    match order {
        Traversal::InOrder => maximum(arena, id),
        // Deepest right-else-left descent: the last node pre-order reaches.
        Traversal::PreOrder => {
            let mut current = id;
            loop {
                let node = arena.node(current);
                match node.right.or(node.left) {
                    Some(child) => current = child,
                    None => return current,
                }
            }
        }
        Traversal::PostOrder => id,
    }
}

/// The node visited immediately after `id`, or `None` if `id` is the last
/// node of the whole tree in this order.
pub(crate) fn successor<K>(arena: &Arena<K>, order: Traversal, id: NodeId) -> Option<NodeId> {
    match order {
        Traversal::InOrder => inorder_successor(arena, id),
        Traversal::PreOrder => preorder_successor(arena, id),
        Traversal::PostOrder => postorder_successor(arena, id),
    }
}

/// The node visited immediately before `id`, or `None` if `id` is the first
/// node of the whole tree in this order.
pub(crate) fn predecessor<K>(arena: &Arena<K>, order: Traversal, id: NodeId) -> Option<NodeId> {
    match order {
        Traversal::InOrder => inorder_predecessor(arena, id),
        Traversal::PreOrder => preorder_predecessor(arena, id),
        Traversal::PostOrder => postorder_predecessor(arena, id),
    }
}

fn inorder_successor<K>(arena: &Arena<K>, id: NodeId) -> Option<NodeId> {
    if let Some(right) = arena.node(id).right {
        return Some(minimum(arena, right));
    }
    // Ascend while coming up a right edge; the first ancestor reached from
    // its left child is the successor. Running out of ancestors means `id`
    // was the maximum.
    let mut current = id;
    while let Some(parent) = arena.node(current).parent {
        if arena.node(parent).left == Some(current) {
            return Some(parent);
        }
        current = parent;
    }
    None
}

fn inorder_predecessor<K>(arena: &Arena<K>, id: NodeId) -> Option<NodeId> {
    if let Some(left) = arena.node(id).left {
        return Some(maximum(arena, left));
    }
    let mut current = id;
    while let Some(parent) = arena.node(current).parent {
        if arena.node(parent).right == Some(current) {
            return Some(parent);
        }
        current = parent;
    }
    None
}

fn preorder_successor<K>(arena: &Arena<K>, id: NodeId) -> Option<NodeId> {
    let node = arena.node(id);
    if let Some(left) = node.left {
        return Some(left);
    }
    if let Some(right) = node.right {
        return Some(right);
    }
    // Leaf: ascend to the first ancestor entered through its left edge that
    // still has an unvisited right subtree, then enter that subtree.
    let mut current = id;
    while let Some(parent) = arena.node(current).parent {
        let parent_node = arena.node(parent);
        if parent_node.left == Some(current) {
            if let Some(right) = parent_node.right {
                return Some(right);
            }
        }
        current = parent;
    }
    None
}

fn preorder_predecessor<K>(arena: &Arena<K>, id: NodeId) -> Option<NodeId> {
    let parent = arena.node(id).parent?;
    let parent_node = arena.node(parent);
    if parent_node.right == Some(id) {
        if let Some(left) = parent_node.left {
            // The whole left sibling subtree was visited between the parent
            // and us; its pre-order last node comes right before `id`.
            return Some(subtree_last(arena, Traversal::PreOrder, left));
        }
    }
    Some(parent)
}

fn postorder_successor<K>(arena: &Arena<K>, id: NodeId) -> Option<NodeId> {
    let parent = arena.node(id).parent?;
    let parent_node = arena.node(parent);
    if parent_node.left == Some(id) {
        if let Some(right) = parent_node.right {
            // The right sibling subtree is visited in full before the parent.
            return Some(subtree_first(arena, Traversal::PostOrder, right));
        }
    }
    Some(parent)
}

fn postorder_predecessor<K>(arena: &Arena<K>, id: NodeId) -> Option<NodeId> {
    let node = arena.node(id);
    if let Some(right) = node.right {
        return Some(right);
    }
    if let Some(left) = node.left {
        return Some(left);
    }
    // Mirror of the pre-order leaf ascent: find the first ancestor entered
    // through its right edge whose left subtree exists.
    let mut current = id;
    while let Some(parent) = arena.node(current).parent {
        let parent_node = arena.node(parent);
        if parent_node.right == Some(current) {
            if let Some(left) = parent_node.left {
                return Some(left);
            }
        }
        current = parent;
    }
    None
}
