/// Axis-aligned bounding box.
///
/// The box type consumed by the BVH and by every spatial query. Stored as
/// min/max corners; center/extent accessors are derived on demand.

use glam::{Mat4, Vec3};

/// Axis-Aligned Bounding Box
///
/// A box is well-formed when `min <= max` on every axis. A degenerate box
/// (min == max) is a valid point-sized box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AABB {
    /// Minimum corner (x, y, z)
    pub min: Vec3,
    /// Maximum corner (x, y, z)
    pub max: Vec3,
}

impl AABB {
    /// Create a box from its two corners.
    ///
    /// The corners are sorted per axis, so `new(a, b)` and `new(b, a)`
    /// describe the same box.
    pub fn new(a: Vec3, b: Vec3) -> Self {
        Self { min: a.min(b), max: a.max(b) }
    }

    /// Create a box from a center point and half-extents.
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        let extents = extents.abs();
        Self { min: center - extents, max: center + extents }
    }

    /// Point-sized box.
    pub fn from_point(point: Vec3) -> Self {
        Self { min: point, max: point }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    pub fn from_points(points: &[Vec3]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let mut aabb = Self::from_point(*first);
        for point in rest {
            aabb.add_point(*point);
        }
        Some(aabb)
    }

    /// Grow the box so that it contains `point`.
    pub fn add_point(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Center point of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    /// Half-extents of the box (half the size along each axis).
    pub fn extents(&self) -> Vec3 {
        (self.max - self.min) * 0.5
    }

    /// Full size of the box along each axis.
    pub fn dimensions(&self) -> Vec3 {
        self.max - self.min
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &AABB) -> AABB {
        AABB {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Transform this box by a matrix, returning a new axis-aligned box.
    ///
    /// Uses the Arvo method: projects each matrix axis onto the box extents
    /// for a tight result without transforming all 8 corners.
    pub fn transformed(&self, matrix: &Mat4) -> AABB {
        let translation = matrix.col(3).truncate();
        let mut new_min = translation;
        let mut new_max = translation;

        for i in 0..3 {
            let axis = matrix.col(i).truncate();
            let a = axis * self.min[i];
            let b = axis * self.max[i];
            new_min += a.min(b);
            new_max += a.max(b);
        }

        AABB { min: new_min, max: new_max }
    }

    /// Test if this box fully contains another box.
    ///
    /// Boxes sharing a face still count as contained.
    pub fn contains(&self, other: &AABB) -> bool {
        self.min.x <= other.min.x && self.max.x >= other.max.x
        && self.min.y <= other.min.y && self.max.y >= other.max.y
        && self.min.z <= other.min.z && self.max.z >= other.max.z
    }

    /// Test if a point lies inside the box (boundary included).
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Test if this box intersects (overlaps or touches) another box.
    pub fn intersects(&self, other: &AABB) -> bool {
        self.min.x <= other.max.x && self.max.x >= other.min.x
        && self.min.y <= other.max.y && self.max.y >= other.min.y
        && self.min.z <= other.max.z && self.max.z >= other.min.z
    }

    /// Approximate equality: centers and extents agree within `epsilon`
    /// on every axis.
    pub fn near_equals(&self, other: &AABB, epsilon: f32) -> bool {
        self.center().abs_diff_eq(other.center(), epsilon)
            && self.extents().abs_diff_eq(other.extents(), epsilon)
    }
}

#[cfg(test)]
#[path = "aabb_tests.rs"]
mod tests;
