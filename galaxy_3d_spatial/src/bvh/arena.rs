/// NodeArena — sole owner of every node in a tree.
///
/// Backed by a generational slot map: keys stay valid while other nodes come
/// and go, and a key whose node was freed never resolves to a newer node.
///
/// Each allocation is stamped with a creation order, used by the tree as a
/// deterministic ordering between nodes.

use std::ops::{Index, IndexMut};
use slotmap::SlotMap;
use super::node::{Node, NodeKey, NodeKind};
use super::volume::Volume;

pub(crate) struct NodeArena<T> {
    nodes: SlotMap<NodeKey, Node<T>>,
    next_order: u64,
}

impl<T> NodeArena<T> {
    pub(crate) fn new() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            next_order: 0,
        }
    }

    fn stamp(&mut self) -> u64 {
        let order = self.next_order;
        self.next_order += 1;
        order
    }

    /// Allocate a detached leaf.
    pub(crate) fn alloc_leaf(&mut self, volume: Volume, data: T) -> NodeKey {
        let order = self.stamp();
        self.nodes.insert(Node {
            volume,
            parent: None,
            order,
            kind: NodeKind::Leaf { data },
        })
    }

    /// Allocate an internal node over two existing subtrees and re-parent
    /// both of them to it. The new node itself has no parent yet.
    pub(crate) fn alloc_internal(&mut self, volume: Volume, children: [NodeKey; 2]) -> NodeKey {
        let order = self.stamp();
        let key = self.nodes.insert(Node {
            volume,
            parent: None,
            order,
            kind: NodeKind::Internal { children },
        });
        for child in children {
            self.nodes[child].parent = Some(key);
        }
        key
    }

    /// Free a node. Its links are not touched; the caller rewires first.
    pub(crate) fn free(&mut self, key: NodeKey) -> Option<Node<T>> {
        self.nodes.remove(key)
    }

    pub(crate) fn get(&self, key: NodeKey) -> Option<&Node<T>> {
        self.nodes.get(key)
    }

    pub(crate) fn get_mut(&mut self, key: NodeKey) -> Option<&mut Node<T>> {
        self.nodes.get_mut(key)
    }

    /// Slot (0 or 1) that `key` occupies in its parent.
    ///
    /// Returns 0 for the root.
    pub(crate) fn index_in_parent(&self, key: NodeKey) -> usize {
        self.nodes[key]
            .parent
            .and_then(|p| self.nodes[p].children())
            .map_or(0, |children| (children[1] == key) as usize)
    }

    /// Recompute an internal node's volume from its children.
    ///
    /// Returns the new volume; leaves keep theirs.
    pub(crate) fn refit(&mut self, key: NodeKey) -> Volume {
        if let Some([a, b]) = self.nodes[key].children() {
            let merged = self.nodes[a].volume.merge(&self.nodes[b].volume);
            self.nodes[key].volume = merged;
        }
        self.nodes[key].volume
    }

    /// Drop every internal node, keeping leaves (their parent links are
    /// cleared).
    pub(crate) fn retain_leaves(&mut self) {
        self.nodes.retain(|_, node| node.is_leaf());
        for node in self.nodes.values_mut() {
            node.parent = None;
        }
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
    }
}

impl<T> Index<NodeKey> for NodeArena<T> {
    type Output = Node<T>;

    fn index(&self, key: NodeKey) -> &Node<T> {
        &self.nodes[key]
    }
}

impl<T> IndexMut<NodeKey> for NodeArena<T> {
    fn index_mut(&mut self, key: NodeKey) -> &mut Node<T> {
        &mut self.nodes[key]
    }
}

#[cfg(test)]
#[path = "arena_tests.rs"]
mod tests;
