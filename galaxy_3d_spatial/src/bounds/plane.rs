/// Plane — `dot(normal, p) + d = 0`.
///
/// Used to describe convex shapes for `DynamicBvh::query_convex`. For convex
/// shapes the normals point OUT of the shape: a point is outside when it lies
/// over (in front of) any plane.

use glam::{Vec3, Vec4};

/// An infinite plane in Hessian normal form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    /// Plane normal (not required to be unit length, but distances are
    /// only metric when it is)
    pub normal: Vec3,
    /// Signed offset: `dot(normal, p) + d == 0` for points on the plane
    pub d: f32,
}

impl Plane {
    /// Create a plane from a normal and offset.
    pub fn new(normal: Vec3, d: f32) -> Self {
        Self { normal, d }
    }

    /// Create a plane through `point` with the given normal.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self { normal, d: -normal.dot(point) }
    }

    /// Build a plane from a packed (A, B, C, D) vector.
    pub fn from_vec4(v: Vec4) -> Self {
        Self { normal: v.truncate(), d: v.w }
    }

    /// Signed distance from `point` to the plane (positive in front).
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.d
    }

    /// True if `point` lies strictly in front of the plane.
    pub fn is_point_over(&self, point: Vec3) -> bool {
        self.signed_distance(point) > 0.0
    }

    /// Same plane facing the other way.
    pub fn flipped(&self) -> Self {
        Self { normal: -self.normal, d: -self.d }
    }
}
