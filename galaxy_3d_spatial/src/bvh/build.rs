/// Full rebuilds of a `DynamicBvh`.
///
/// Both rebuilds first detach every leaf and free every internal node,
/// then build a fresh hierarchy over the leaves:
/// - bottom-up: greedy pairing by smallest merged size, O(n²)
/// - top-down: recursive median-ish split on the most balanced axis,
///   switching to bottom-up under a leaf-count threshold

use glam::Vec3;
use crate::{spatial_debug, spatial_warn};
use super::node::NodeKey;
use super::tree::{DynamicBvh, SOURCE};

const SPLIT_AXES: [Vec3; 3] = [Vec3::X, Vec3::Y, Vec3::Z];

impl<T> DynamicBvh<T> {
    /// Rebuild the whole tree bottom-up.
    ///
    /// Produces tight trees but costs O(n²): intended for small trees or
    /// offline use.
    pub fn optimize_bottom_up(&mut self) {
        if self.root.is_none() {
            return;
        }
        let mut leaves = self.fetch_leaves();
        self.root = self.bottom_up(&mut leaves);
        spatial_debug!(SOURCE, "Rebuilt {} objects bottom-up", self.leaf_count);
    }

    /// Rebuild the whole tree top-down.
    ///
    /// Groups of at most `threshold` leaves are finished bottom-up. If the
    /// leaves cannot be split (e.g. all centers coincide) the whole tree is
    /// rebuilt bottom-up instead.
    pub fn optimize_top_down(&mut self, threshold: usize) {
        if self.root.is_none() {
            return;
        }
        let mut leaves = self.fetch_leaves();
        self.root = match self.top_down(&mut leaves, threshold) {
            Some(root) => Some(root),
            None => {
                spatial_warn!(
                    SOURCE,
                    "No split axis for {} objects, falling back to bottom-up rebuild",
                    leaves.len()
                );
                self.arena.retain_leaves();
                self.bottom_up(&mut leaves)
            }
        };
        spatial_debug!(SOURCE, "Rebuilt {} objects top-down (threshold {})", self.leaf_count, threshold);
    }

    /// `optimize_top_down` with the configured `top_down_threshold`.
    pub fn optimize_top_down_default(&mut self) {
        self.optimize_top_down(self.config.top_down_threshold);
    }

    /// Detach every leaf (depth-first order) and free all internal nodes.
    /// The tree is left without a root.
    fn fetch_leaves(&mut self) -> Vec<NodeKey> {
        let mut leaves = Vec::with_capacity(self.leaf_count);
        if let Some(root) = self.root.take() {
            let mut stack = vec![root];
            while let Some(key) = stack.pop() {
                match self.arena[key].children() {
                    Some([a, b]) => {
                        stack.push(b);
                        stack.push(a);
                    }
                    None => leaves.push(key),
                }
            }
        }
        self.arena.retain_leaves();
        leaves
    }

    /// Merge the cheapest pair until a single subtree remains.
    ///
    /// `nodes` is consumed down to that one subtree, which is returned.
    pub(super) fn bottom_up(&mut self, nodes: &mut Vec<NodeKey>) -> Option<NodeKey> {
        while nodes.len() > 1 {
            let mut best = (f32::INFINITY, 0, 1);
            for i in 0..nodes.len() {
                for j in (i + 1)..nodes.len() {
                    let size = self.arena[nodes[i]].volume.merge(&self.arena[nodes[j]].volume).size();
                    if size < best.0 {
                        best = (size, i, j);
                    }
                }
            }

            let (_, i, j) = best;
            let merged = self.arena[nodes[i]].volume.merge(&self.arena[nodes[j]].volume);
            nodes[i] = self.arena.alloc_internal(merged, [nodes[i], nodes[j]]);
            nodes.swap_remove(j);
        }
        nodes.first().copied()
    }

    /// Build a subtree over `nodes`, reordering the slice in place.
    ///
    /// Returns `None` when some group larger than `threshold` has no axis
    /// that splits it. Internal nodes built before the failure stay in the
    /// arena; the caller discards them.
    pub(super) fn top_down(&mut self, nodes: &mut [NodeKey], threshold: usize) -> Option<NodeKey> {
        match nodes.len() {
            0 => return None,
            1 => return Some(nodes[0]),
            len if len <= threshold => return self.bottom_up(&mut nodes.to_vec()),
            _ => {}
        }

        let bounds = nodes[1..]
            .iter()
            .fold(self.arena[nodes[0]].volume, |acc, key| acc.merge(&self.arena[*key].volume));
        let origin = bounds.center();

        // [axis][0]: centers at or behind the origin, [axis][1]: in front
        let mut split_count = [[0usize; 2]; 3];
        for key in nodes.iter() {
            let offset = self.arena[*key].volume.center() - origin;
            for (axis, direction) in SPLIT_AXES.iter().enumerate() {
                split_count[axis][(offset.dot(*direction) > 0.0) as usize] += 1;
            }
        }

        let best_axis = split_count
            .iter()
            .enumerate()
            .filter(|(_, counts)| counts[0] > 0 && counts[1] > 0)
            .min_by_key(|(_, counts)| counts[0].abs_diff(counts[1]))
            .map(|(axis, _)| axis)?;

        let pivot = self.partition(nodes, origin, SPLIT_AXES[best_axis]);
        if pivot == 0 || pivot == nodes.len() {
            return None;
        }

        let (left, right) = nodes.split_at_mut(pivot);
        let a = self.top_down(left, threshold)?;
        let b = self.top_down(right, threshold)?;
        let merged = self.arena[a].volume.merge(&self.arena[b].volume);
        Some(self.arena.alloc_internal(merged, [a, b]))
    }

    /// Two-pointer partition: nodes whose center is at or behind `origin`
    /// along `axis` go first. Returns how many there are.
    fn partition(&self, nodes: &mut [NodeKey], origin: Vec3, axis: Vec3) -> usize {
        let behind = |key: NodeKey| (self.arena[key].volume.center() - origin).dot(axis) <= 0.0;
        let mut begin = 0;
        let mut end = nodes.len();
        loop {
            while begin != end && behind(nodes[begin]) {
                begin += 1;
            }
            if begin == end {
                break;
            }
            while begin != end && !behind(nodes[end - 1]) {
                end -= 1;
            }
            if begin == end {
                break;
            }
            nodes.swap(begin, end - 1);
            begin += 1;
            end -= 1;
        }
        begin
    }
}

#[cfg(test)]
#[path = "build_tests.rs"]
mod tests;
