use glam::Vec3;
use super::aabb::AABB;

/// Bounding sphere, used for range queries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// Sphere center
    pub center: Vec3,
    /// Sphere radius (negative radii are treated as 0)
    pub radius: f32,
}

impl BoundingSphere {
    /// Create a sphere from center and radius.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Smallest axis-aligned box enclosing the sphere.
    pub fn bounding_box(&self) -> AABB {
        AABB::from_center_extents(self.center, Vec3::splat(self.radius.max(0.0)))
    }

    /// Sphere/box overlap: the box point closest to the center lies within
    /// the radius.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        let closest = self.center.clamp(aabb.min, aabb.max);
        let radius = self.radius.max(0.0);
        closest.distance_squared(self.center) <= radius * radius
    }
}
