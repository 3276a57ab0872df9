/// Spatial queries on a `DynamicBvh`.
///
/// Every query is the same depth-first traversal with a different overlap
/// test. Subtrees whose volume fails the test are skipped; each leaf that
/// passes is handed to the callback together with its box. The callback
/// returns `false` to stop the query early.
///
/// The traversal stack lives inline for the first 128 entries and moves to
/// the heap beyond that, so arbitrarily deep (degenerate) trees are still
/// fully traversed.

use glam::Vec3;
use smallvec::SmallVec;
use crate::bounds::{AABB, BoundingSphere, Frustum, Plane, Ray, SlabTest};
use crate::spatial_trace;
use super::node::{NodeKey, NodeKind};
use super::tree::{DynamicBvh, SOURCE};
use super::volume::Volume;

/// Inline capacity of the traversal stack
const INLINE_STACK: usize = 128;

type QueryStack = SmallVec<[NodeKey; INLINE_STACK]>;

impl<T> DynamicBvh<T> {
    /// Visit every object whose box overlaps `aabb` (touching counts).
    pub fn query_aabb<F>(&self, aabb: &AABB, callback: F)
    where
        F: FnMut(&T, &AABB) -> bool,
    {
        let bounds = Volume::new(*aabb);
        self.traverse(|volume| volume.intersects(&bounds), callback);
    }

    /// Visit every object whose box is not fully outside the frustum.
    pub fn query_frustum<F>(&self, frustum: &Frustum, callback: F)
    where
        F: FnMut(&T, &AABB) -> bool,
    {
        // Infinite frusta have no bounding box; the planes alone decide
        let bounds = frustum.bounding_box().map(Volume::new);
        self.traverse(
            |volume| {
                bounds.map_or(true, |b| b.intersects(volume)) && frustum.intersects_aabb(&volume.aabb)
            },
            callback,
        );
    }

    /// Visit every object whose box may overlap a convex shape.
    ///
    /// `planes` face out of the shape; `points` are its vertices. Either may
    /// be empty, in which case that half of the test is skipped.
    pub fn query_convex<F>(&self, planes: &[Plane], points: &[Vec3], callback: F)
    where
        F: FnMut(&T, &AABB) -> bool,
    {
        let bounds = AABB::from_points(points).map(Volume::new);
        self.traverse(
            |volume| {
                bounds.map_or(true, |b| b.intersects(volume)) && volume.intersects_convex(planes, points)
            },
            callback,
        );
    }

    /// Visit every object whose box the ray crosses within its length.
    ///
    /// Objects are visited in traversal order, not by distance.
    pub fn query_ray<F>(&self, ray: &Ray, callback: F)
    where
        F: FnMut(&T, &AABB) -> bool,
    {
        let slab = SlabTest::new(ray);
        self.traverse(|volume| slab.hits(&volume.aabb), callback);
    }

    /// Visit every object whose box overlaps the sphere.
    pub fn query_sphere<F>(&self, sphere: &BoundingSphere, callback: F)
    where
        F: FnMut(&T, &AABB) -> bool,
    {
        let bounds = Volume::new(sphere.bounding_box());
        self.traverse(
            |volume| bounds.intersects(volume) && sphere.intersects_aabb(&volume.aabb),
            callback,
        );
    }

    fn traverse<S, F>(&self, mut overlaps: S, mut callback: F)
    where
        S: FnMut(&Volume) -> bool,
        F: FnMut(&T, &AABB) -> bool,
    {
        let Some(root) = self.root else { return };

        let mut stack = QueryStack::new();
        stack.push(root);
        let mut spilled = false;

        while let Some(key) = stack.pop() {
            let node = &self.arena[key];
            if !overlaps(&node.volume) {
                continue;
            }
            match &node.kind {
                NodeKind::Internal { children } => {
                    stack.extend_from_slice(children);
                    if !spilled && stack.spilled() {
                        spilled = true;
                        spatial_trace!(
                            SOURCE,
                            "Query stack exceeded {} entries, continuing on the heap",
                            INLINE_STACK
                        );
                    }
                }
                NodeKind::Leaf { data } => {
                    if !callback(data, &node.volume.aabb) {
                        return;
                    }
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "query_tests.rs"]
mod tests;
