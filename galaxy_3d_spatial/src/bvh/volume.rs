/// Volume — the bounding volume stored in every BVH node.
///
/// Wraps an AABB and adds the heuristics the tree algorithms need. All
/// operations are pure functions of the wrapped box(es).

use glam::Vec3;
use crate::bounds::{AABB, Plane};

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Volume {
    pub(crate) aabb: AABB,
}

impl Volume {
    pub(crate) fn new(aabb: AABB) -> Self {
        Self { aabb }
    }

    pub(crate) fn center(&self) -> Vec3 {
        self.aabb.center()
    }

    /// Union of both volumes.
    pub(crate) fn merge(&self, other: &Volume) -> Volume {
        Volume { aabb: self.aabb.union(&other.aabb) }
    }

    /// True if `other` lies fully inside `self`.
    pub(crate) fn contains(&self, other: &Volume) -> bool {
        self.aabb.contains(&other.aabb)
    }

    pub(crate) fn intersects(&self, other: &Volume) -> bool {
        self.aabb.intersects(&other.aabb)
    }

    /// Rebalancing cost: sum of the edge lengths plus their product.
    ///
    /// Only meaningful for comparing two volumes against each other.
    pub(crate) fn size(&self) -> f32 {
        let edges = self.aabb.dimensions();
        edges.element_sum() + edges.element_product()
    }

    /// Twice the L1 distance between both centers.
    pub(crate) fn proximity_to(&self, other: &Volume) -> f32 {
        (self.center() - other.center()).abs().element_sum() * 2.0
    }

    /// Index (0 or 1) of whichever of `a` / `b` is closer to `self`.
    /// Ties go to `a`.
    pub(crate) fn select_by_proximity(&self, a: &Volume, b: &Volume) -> usize {
        if self.proximity_to(a) <= self.proximity_to(b) { 0 } else { 1 }
    }

    /// Conservative overlap test against a convex shape given by its
    /// outward-facing planes and its vertices.
    ///
    /// 1. The box corner least advanced along each plane normal must not be
    ///    in front of the plane.
    /// 2. On each axis, the points must not all lie on one side of the box.
    ///
    /// May report false positives, never false negatives.
    pub(crate) fn intersects_convex(&self, planes: &[Plane], points: &[Vec3]) -> bool {
        let center = self.center();
        let extents = self.aabb.extents();

        for plane in planes {
            let n = plane.normal;
            let nearest = center + Vec3::new(
                if n.x > 0.0 { -extents.x } else { extents.x },
                if n.y > 0.0 { -extents.y } else { extents.y },
                if n.z > 0.0 { -extents.z } else { extents.z },
            );
            if plane.is_point_over(nearest) {
                return false;
            }
        }

        if points.is_empty() {
            return true;
        }

        for axis in 0..3 {
            let min = self.aabb.min[axis];
            let max = self.aabb.max[axis];
            if points.iter().all(|p| p[axis] > max) || points.iter().all(|p| p[axis] < min) {
                return false;
            }
        }

        true
    }
}

#[cfg(test)]
#[path = "volume_tests.rs"]
mod tests;
