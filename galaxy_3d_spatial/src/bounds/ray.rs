/// Ray — origin, unit direction and a maximum travel distance.
///
/// A finite `length` turns the ray into a segment; `f32::INFINITY` is a
/// regular half-line.

use glam::Vec3;
use super::aabb::AABB;

/// Ray or segment used by `DynamicBvh::query_ray`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Start point
    pub origin: Vec3,
    /// Unit direction (zero for a degenerate ray)
    pub direction: Vec3,
    /// Maximum distance along `direction`
    pub length: f32,
}

impl Ray {
    /// Unbounded ray. The direction is normalized; a zero direction stays zero.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            length: f32::INFINITY,
        }
    }

    /// Segment from `from` to `to`.
    pub fn segment(from: Vec3, to: Vec3) -> Self {
        let delta = to - from;
        Self {
            origin: from,
            direction: delta.normalize_or_zero(),
            length: delta.length(),
        }
    }

    /// Ray limited to `length` units.
    pub fn with_length(mut self, length: f32) -> Self {
        self.length = length;
        self
    }

    /// Point at distance `t` along the ray.
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Distance along the ray at which it enters `aabb`, if it hits within
    /// `[0, length]`. Returns 0 when the origin is inside the box.
    pub fn intersect_aabb(&self, aabb: &AABB) -> Option<f32> {
        SlabTest::new(self).entry_distance(aabb)
    }
}

/// Reciprocal used for axis-parallel rays instead of infinity.
const LARGE_RECIPROCAL: f32 = 1e20;

/// Precomputed ray data for repeated slab tests against many boxes.
///
/// The per-axis sign selects which box corner is the near bound, so the test
/// itself has no direction-dependent branches.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SlabTest {
    origin: Vec3,
    inv_direction: Vec3,
    sign: [usize; 3],
    length: f32,
}

impl SlabTest {
    pub(crate) fn new(ray: &Ray) -> Self {
        let d = ray.direction;
        let inv = |c: f32| if c == 0.0 { LARGE_RECIPROCAL } else { 1.0 / c };
        let inv_direction = Vec3::new(inv(d.x), inv(d.y), inv(d.z));
        Self {
            origin: ray.origin,
            inv_direction,
            sign: [
                (inv_direction.x < 0.0) as usize,
                (inv_direction.y < 0.0) as usize,
                (inv_direction.z < 0.0) as usize,
            ],
            length: ray.length,
        }
    }

    /// Parametric `[tmin, tmax]` of the ray inside the box slabs, or `None`
    /// when the slabs do not overlap.
    fn interval(&self, aabb: &AABB) -> Option<(f32, f32)> {
        let bounds = [aabb.min, aabb.max];
        let o = self.origin;
        let inv = self.inv_direction;

        let mut tmin = (bounds[self.sign[0]].x - o.x) * inv.x;
        let mut tmax = (bounds[1 - self.sign[0]].x - o.x) * inv.x;
        let tymin = (bounds[self.sign[1]].y - o.y) * inv.y;
        let tymax = (bounds[1 - self.sign[1]].y - o.y) * inv.y;

        if tmin > tymax || tymin > tmax {
            return None;
        }
        tmin = tmin.max(tymin);
        tmax = tmax.min(tymax);

        let tzmin = (bounds[self.sign[2]].z - o.z) * inv.z;
        let tzmax = (bounds[1 - self.sign[2]].z - o.z) * inv.z;

        if tmin > tzmax || tzmin > tmax {
            return None;
        }
        Some((tmin.max(tzmin), tmax.min(tzmax)))
    }

    /// True if the ray passes through the box within `[0, length]`.
    pub(crate) fn hits(&self, aabb: &AABB) -> bool {
        match self.interval(aabb) {
            Some((tmin, tmax)) => tmin < self.length && tmax > 0.0,
            None => false,
        }
    }

    pub(crate) fn entry_distance(&self, aabb: &AABB) -> Option<f32> {
        let (tmin, tmax) = self.interval(aabb)?;
        (tmin < self.length && tmax > 0.0).then(|| tmin.max(0.0))
    }
}
