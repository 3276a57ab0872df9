/// DynamicBvh — self-balancing bounding-volume hierarchy.
///
/// Binary tree of axis-aligned boxes. Leaves carry a caller payload, internal
/// nodes carry the merge of their two children. Objects can be inserted,
/// moved and removed at any time; the tree is kept balanced by a cheap
/// proximity heuristic on insertion, by incremental rotations
/// (`optimize_incremental`) and by full rebuilds (`optimize_top_down`,
/// `optimize_bottom_up`).
///
/// All nodes live in a generational arena. The `BvhId` returned by `insert`
/// is the leaf's arena key, so a stale handle (leaf already removed) is
/// detected instead of aliasing a newer object.

use slotmap::Key;
use crate::bounds::AABB;
use crate::error::{Error, Result};
use crate::{spatial_debug, spatial_err, spatial_trace};
use super::arena::NodeArena;
use super::config::BvhConfig;
use super::node::{Node, NodeKey};
use super::volume::Volume;

pub(super) const SOURCE: &str = "galaxy3d::DynamicBvh";

/// Opaque handle to an object stored in a `DynamicBvh`.
///
/// `BvhId::default()` is the null handle: never returned by `insert`,
/// rejected by every operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BvhId(pub(crate) NodeKey);

impl BvhId {
    /// True for the null handle.
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }
}

/// Dynamic bounding-volume hierarchy over payloads of type `T`.
pub struct DynamicBvh<T> {
    pub(super) arena: NodeArena<T>,
    pub(super) root: Option<NodeKey>,
    pub(super) leaf_count: usize,
    pub(super) config: BvhConfig,
    /// Rotation cursor: selects the descent path of each incremental pass
    opath: u32,
    index: u32,
}

impl<T> Default for DynamicBvh<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DynamicBvh<T> {
    /// Create an empty tree with the default configuration.
    pub fn new() -> Self {
        Self {
            arena: NodeArena::new(),
            root: None,
            leaf_count: 0,
            config: BvhConfig::default(),
            opath: 0,
            index: 0,
        }
    }

    /// Create an empty tree with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the configuration fails
    /// `BvhConfig::validate`.
    pub fn with_config(config: BvhConfig) -> Result<Self> {
        config.validate().map_err(|e| spatial_err!(SOURCE, e))?;
        Ok(Self {
            config,
            ..Self::new()
        })
    }

    // ===== PUBLIC API =====

    /// Insert an object and return its handle.
    pub fn insert(&mut self, aabb: AABB, data: T) -> BvhId {
        let leaf = self.arena.alloc_leaf(Volume::new(aabb), data);
        self.insert_leaf(self.root, leaf);
        self.leaf_count += 1;
        BvhId(leaf)
    }

    /// Move an object to a new box.
    ///
    /// Returns `false` without touching the tree when the handle is null or
    /// stale, or when the new box is within `update_tolerance` of the
    /// current one.
    pub fn update(&mut self, id: BvhId, aabb: AABB) -> bool {
        let Some(node) = self.live_leaf(id) else {
            spatial_debug!(SOURCE, "update ignored: {:?} is not a live object", id);
            return false;
        };
        if node.volume.aabb.near_equals(&aabb, self.config.update_tolerance) {
            return false;
        }

        self.arena[id.0].volume = Volume::new(aabb);
        self.update_internal(id.0, self.config.lookahead);
        true
    }

    /// Remove an object and hand its payload back.
    ///
    /// Returns `None` when the handle is null or stale.
    pub fn remove(&mut self, id: BvhId) -> Option<T> {
        if self.live_leaf(id).is_none() {
            spatial_debug!(SOURCE, "remove ignored: {:?} is not a live object", id);
            return None;
        }

        self.remove_leaf(id.0);
        self.leaf_count -= 1;
        self.arena.free(id.0).and_then(|node| node.into_data())
    }

    /// Drop every object. The configuration and index are kept.
    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.leaf_count = 0;
        self.opath = 0;
    }

    /// Payload of a live object
    pub fn get(&self, id: BvhId) -> Option<&T> {
        self.live_leaf(id).and_then(|node| node.data())
    }

    /// Mutable payload of a live object
    pub fn get_mut(&mut self, id: BvhId) -> Option<&mut T> {
        self.arena
            .get_mut(id.0)
            .and_then(|node| node.data_mut())
    }

    /// Current box of a live object
    pub fn aabb(&self, id: BvhId) -> Option<AABB> {
        self.live_leaf(id).map(|node| node.volume.aabb)
    }

    /// Append the handle of every object, in depth-first order.
    pub fn elements(&self, out: &mut Vec<BvhId>) {
        let Some(root) = self.root else { return };
        let mut stack = vec![root];
        while let Some(key) = stack.pop() {
            match self.arena[key].children() {
                Some([a, b]) => {
                    stack.push(b);
                    stack.push(a);
                }
                None => out.push(BvhId(key)),
            }
        }
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Depth of the deepest leaf, the root counting as 1 (0 when empty).
    pub fn max_depth(&self) -> usize {
        let Some(root) = self.root else { return 0 };
        let mut deepest = 0;
        let mut stack = vec![(root, 1usize)];
        while let Some((key, depth)) = stack.pop() {
            deepest = deepest.max(depth);
            if let Some([a, b]) = self.arena[key].children() {
                stack.push((a, depth + 1));
                stack.push((b, depth + 1));
            }
        }
        deepest
    }

    pub fn config(&self) -> &BvhConfig {
        &self.config
    }

    pub fn lookahead(&self) -> Option<u32> {
        self.config.lookahead
    }

    /// How many parents an update climbs before reinserting
    /// (`None`: reinsert from the root).
    pub fn set_lookahead(&mut self, lookahead: Option<u32>) {
        self.config.lookahead = lookahead;
    }

    /// User tag of this tree
    pub fn index(&self) -> u32 {
        self.index
    }

    /// Assign the user tag.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidState` if the tree holds any object.
    pub fn set_index(&mut self, index: u32) -> Result<()> {
        if !self.is_empty() {
            return Err(spatial_err!(SOURCE, Error::InvalidState(format!(
                "cannot change the index of a tree holding {} objects",
                self.leaf_count
            ))));
        }
        self.index = index;
        Ok(())
    }

    /// Run incremental rebalancing passes.
    ///
    /// Each pass walks from the root to one leaf, rotating nodes on the way,
    /// and reinserts that leaf from the root. The path changes from one pass
    /// to the next. `None` runs one pass per object.
    pub fn optimize_incremental(&mut self, passes: Option<usize>) {
        let passes = passes.unwrap_or(self.leaf_count);
        for _ in 0..passes {
            let Some(mut node) = self.root else { return };
            let mut bit = 0u32;
            loop {
                node = self.node_sort(node);
                match self.arena[node].children() {
                    Some(children) => {
                        node = children[((self.opath >> bit) & 1) as usize];
                        bit = (bit + 1) & 31;
                    }
                    None => break,
                }
            }
            self.update_internal(node, None);
            self.opath = self.opath.wrapping_add(1);
        }
        spatial_trace!(SOURCE, "{} incremental passes over {} objects", passes, self.leaf_count);
    }

    // ===== INTERNAL ALGORITHMS =====

    fn live_leaf(&self, id: BvhId) -> Option<&Node<T>> {
        self.arena.get(id.0).filter(|node| node.is_leaf())
    }

    /// Attach a detached leaf, descending from `start` (or the root).
    pub(super) fn insert_leaf(&mut self, start: Option<NodeKey>, leaf: NodeKey) {
        let Some(mut node) = start.or(self.root) else {
            self.arena[leaf].parent = None;
            self.root = Some(leaf);
            return;
        };

        let leaf_volume = self.arena[leaf].volume;
        while let Some([a, b]) = self.arena[node].children() {
            let pick = leaf_volume.select_by_proximity(&self.arena[a].volume, &self.arena[b].volume);
            node = if pick == 0 { a } else { b };
        }

        let parent = self.arena[node].parent;
        let slot = self.arena.index_in_parent(node);
        let merged = leaf_volume.merge(&self.arena[node].volume);
        let joint = self.arena.alloc_internal(merged, [node, leaf]);
        self.arena[joint].parent = parent;

        let Some(parent) = parent else {
            self.root = Some(joint);
            return;
        };
        if let Some(children) = self.arena[parent].children_mut() {
            children[slot] = joint;
        }

        let mut child_volume = merged;
        let mut current = Some(parent);
        while let Some(ancestor) = current {
            if self.arena[ancestor].volume.contains(&child_volume) {
                break;
            }
            child_volume = self.arena.refit(ancestor);
            current = self.arena[ancestor].parent;
        }
    }

    /// Detach a leaf (without freeing it) and collapse its parent.
    ///
    /// Returns the node where refitting stopped, the root if it reached the
    /// top, or `None` if the tree is now empty.
    pub(super) fn remove_leaf(&mut self, leaf: NodeKey) -> Option<NodeKey> {
        if self.root == Some(leaf) {
            self.root = None;
            return None;
        }

        let parent = self.arena[leaf].parent?;
        let slot = self.arena.index_in_parent(leaf);
        let sibling = self.arena[parent].children()?[1 - slot];
        let grandparent = self.arena[parent].parent;
        let parent_slot = self.arena.index_in_parent(parent);

        self.arena[leaf].parent = None;
        self.arena[sibling].parent = grandparent;
        self.arena.free(parent);

        let Some(grandparent) = grandparent else {
            self.root = Some(sibling);
            return Some(sibling);
        };
        if let Some(children) = self.arena[grandparent].children_mut() {
            children[parent_slot] = sibling;
        }

        let mut current = Some(grandparent);
        while let Some(node) = current {
            let previous = self.arena[node].volume;
            if self.arena.refit(node) == previous {
                return Some(node);
            }
            current = self.arena[node].parent;
        }
        self.root
    }

    /// Reinsert a leaf whose box changed.
    pub(super) fn update_internal(&mut self, leaf: NodeKey, lookahead: Option<u32>) {
        let mut base = self.remove_leaf(leaf);
        if base.is_some() {
            match lookahead {
                Some(steps) => {
                    for _ in 0..steps {
                        match base.and_then(|key| self.arena[key].parent) {
                            Some(parent) => base = Some(parent),
                            None => break,
                        }
                    }
                }
                None => base = self.root,
            }
        }
        self.insert_leaf(base, leaf);
    }

    /// Rotate `node` above its parent if it was created before it.
    ///
    /// Returns the node now occupying `node`'s former position: the former
    /// parent after a rotation, `node` itself otherwise. Leaves and the root
    /// are never rotated.
    pub(super) fn node_sort(&mut self, node: NodeKey) -> NodeKey {
        let Some(parent) = self.arena[node].parent else { return node };
        let Some(node_children) = self.arena[node].children() else { return node };
        if self.arena[node].order >= self.arena[parent].order {
            return node;
        }
        let Some(parent_children) = self.arena[parent].children() else { return node };

        let i = self.arena.index_in_parent(node);
        let j = 1 - i;
        let sibling = parent_children[j];
        let grandparent = self.arena[parent].parent;

        match grandparent {
            Some(q) => {
                let slot = self.arena.index_in_parent(parent);
                if let Some(children) = self.arena[q].children_mut() {
                    children[slot] = node;
                }
            }
            None => self.root = Some(node),
        }

        self.arena[sibling].parent = Some(node);
        self.arena[parent].parent = Some(node);
        self.arena[node].parent = grandparent;

        if let Some(children) = self.arena[parent].children_mut() {
            *children = node_children;
        }
        for child in node_children {
            self.arena[child].parent = Some(parent);
        }

        if let Some(children) = self.arena[node].children_mut() {
            children[i] = parent;
            children[j] = sibling;
        }

        let node_volume = self.arena[node].volume;
        self.arena[node].volume = self.arena[parent].volume;
        self.arena[parent].volume = node_volume;

        parent
    }
}

// ===== TEST SUPPORT =====

#[cfg(test)]
impl<T> DynamicBvh<T> {
    /// Panic unless every structural invariant holds.
    pub(crate) fn assert_invariants(&self) {
        let Some(root) = self.root else {
            assert_eq!(self.leaf_count, 0, "empty tree must have no leaves");
            assert_eq!(self.arena.len(), 0, "empty tree must own no nodes");
            return;
        };
        assert_eq!(self.arena[root].parent, None, "root has a parent");

        let mut leaves = 0;
        let mut nodes = 0;
        let mut stack = vec![root];
        while let Some(key) = stack.pop() {
            nodes += 1;
            let node = &self.arena[key];
            match node.children() {
                Some([a, b]) => {
                    assert_ne!(a, b, "both children are the same node");
                    assert_eq!(self.arena[a].parent, Some(key), "child 0 parent link");
                    assert_eq!(self.arena[b].parent, Some(key), "child 1 parent link");
                    let merged = self.arena[a].volume.merge(&self.arena[b].volume);
                    assert_eq!(node.volume, merged, "internal volume is not the merge of its children");
                    stack.push(a);
                    stack.push(b);
                }
                None => leaves += 1,
            }
        }
        assert_eq!(leaves, self.leaf_count, "leaf count mismatch");
        assert_eq!(nodes, self.arena.len(), "unreachable nodes in the arena");
        if leaves > 0 {
            assert_eq!(nodes, 2 * leaves - 1, "tree is not a full binary tree");
        }
    }
}

#[cfg(test)]
#[path = "tree_tests.rs"]
mod tests;
