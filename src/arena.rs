//! Slab storage for tree nodes.
//!
//! Links between nodes are [`NodeId`] indices into an [`Arena`] rather than
//! pointers. An id stays stable for the whole lifetime of its node: inserting
//! other nodes, erasing other nodes, and the link rewiring done during
//! two-child deletion never move a node between slots. Freed slots are
//! recycled through a free list.

/// A stable handle to one node slot inside a tree's arena.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) struct NodeId(u32);

impl NodeId {
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// One tree vertex: a key plus its parent/child links.
///
/// The `parent` link is a non-owning back-reference. There are no sentinel
/// nodes; boundary positions are represented by the cursor, so every `Node`
/// in the arena carries a real key.
pub(crate) struct Node<K> {
    pub(crate) key: K,
    pub(crate) parent: Option<NodeId>,
    pub(crate) left: Option<NodeId>,
    pub(crate) right: Option<NodeId>,
}

pub(crate) struct Arena<K> {
    slots: Vec<Option<Node<K>>>,
    free: Vec<NodeId>,
}

impl<K> Arena<K> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Stores a fresh leaf node and returns its id, reusing a vacated slot
    /// when one is available.
    pub(crate) fn alloc(&mut self, key: K, parent: Option<NodeId>) -> NodeId {
        let node = Node {
            key,
            parent,
            left: None,
            right: None,
        };
        match self.free.pop() {
            Some(id) => {
                self.slots[id.index()] = Some(node);
                id
            }
            None => {
                let raw = u32::try_from(self.slots.len()).expect("more than u32::MAX live nodes");
                self.slots.push(Some(node));
                NodeId(raw)
            }
        }
    }

    /// Vacates a slot and hands its key back. The id becomes eligible for
    /// reuse by a later [`alloc`](Self::alloc).
    pub(crate) fn release(&mut self, id: NodeId) -> K {
        let node = self.slots[id.index()]
            .take()
            .expect("released the same node twice");
        self.free.push(id);
        node.key
    }

    pub(crate) fn node(&self, id: NodeId) -> &Node<K> {
        self.slots[id.index()].as_ref().expect("vacated node slot")
    }

    pub(crate) fn node_mut(&mut self, id: NodeId) -> &mut Node<K> {
        self.slots[id.index()].as_mut().expect("vacated node slot")
    }

    pub(crate) fn key(&self, id: NodeId) -> &K {
        &self.node(id).key
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}
