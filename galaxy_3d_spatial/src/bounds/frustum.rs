/// Frustum — six clipping planes for visibility culling.
///
/// Each plane is represented as a Vec4 (A, B, C, D) where:
/// - (A, B, C) is the inward-pointing normal
/// - D is the signed distance
/// - A point P is inside the frustum if dot(plane, P_homogeneous) >= 0 for all planes
///
/// The caller is responsible for computing the frustum. `from_view_projection()`
/// is provided as a utility, but planes may be filled in by other means.

use glam::{Mat4, Vec3, Vec4};
use super::aabb::AABB;
use super::plane::Plane;

/// Result of a 3-way frustum/AABB classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumTest {
    /// AABB is entirely outside the frustum
    Outside,
    /// AABB is entirely inside the frustum
    Inside,
    /// AABB partially overlaps the frustum
    Partial,
}

/// Frustum plane indices
pub const PLANE_LEFT: usize = 0;
pub const PLANE_RIGHT: usize = 1;
pub const PLANE_BOTTOM: usize = 2;
pub const PLANE_TOP: usize = 3;
pub const PLANE_NEAR: usize = 4;
pub const PLANE_FAR: usize = 5;

/// Six frustum planes for culling.
///
/// Each plane is (A, B, C, D) where Ax + By + Cz + D = 0.
/// Normal (A, B, C) points inward (toward the visible volume).
/// Works with both perspective and orthographic projections.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// Frustum planes: left, right, bottom, top, near, far
    pub planes: [Vec4; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Uses the Gribb & Hartmann method. Works for both perspective
    /// and orthographic projections. Clip-space depth is expected in [0, 1]
    /// (glam's `*_rh` / `*_lh` projections), so the near plane is row 2 alone.
    pub fn from_view_projection(vp: &Mat4) -> Self {
        let m = vp.to_cols_array_2d();

        let mut planes = [
            // Left:   row3 + row0
            Vec4::new(m[0][3] + m[0][0], m[1][3] + m[1][0], m[2][3] + m[2][0], m[3][3] + m[3][0]),
            // Right:  row3 - row0
            Vec4::new(m[0][3] - m[0][0], m[1][3] - m[1][0], m[2][3] - m[2][0], m[3][3] - m[3][0]),
            // Bottom: row3 + row1
            Vec4::new(m[0][3] + m[0][1], m[1][3] + m[1][1], m[2][3] + m[2][1], m[3][3] + m[3][1]),
            // Top:    row3 - row1
            Vec4::new(m[0][3] - m[0][1], m[1][3] - m[1][1], m[2][3] - m[2][1], m[3][3] - m[3][1]),
            // Near:   row2
            Vec4::new(m[0][2], m[1][2], m[2][2], m[3][2]),
            // Far:    row3 - row2
            Vec4::new(m[0][3] - m[0][2], m[1][3] - m[1][2], m[2][3] - m[2][2], m[3][3] - m[3][2]),
        ];

        for plane in &mut planes {
            let normal_len = plane.truncate().length();
            if normal_len > 0.0 {
                *plane /= normal_len;
            }
        }

        Self { planes }
    }

    /// Test if an AABB intersects this frustum.
    ///
    /// "Positive vertex" test: for each plane, find the AABB corner most in
    /// the direction of the plane normal. If that corner is outside, the
    /// AABB is fully outside.
    ///
    /// May return false positives (conservative), never false negatives.
    pub fn intersects_aabb(&self, aabb: &AABB) -> bool {
        self.planes.iter().all(|plane| {
            let normal = plane.truncate();
            normal.dot(Self::positive_vertex(aabb, normal)) + plane.w >= 0.0
        })
    }

    /// Classify an AABB against the frustum (3-way test).
    ///
    /// - p-vertex outside any plane → `Outside` (early out)
    /// - n-vertex outside any plane → at least `Partial`
    /// - otherwise → `Inside`
    pub fn classify_aabb(&self, aabb: &AABB) -> FrustumTest {
        let mut all_inside = true;

        for plane in &self.planes {
            let normal = plane.truncate();

            if normal.dot(Self::positive_vertex(aabb, normal)) + plane.w < 0.0 {
                return FrustumTest::Outside;
            }

            // Negative vertex: corner least in the direction of the normal
            let n_vertex = Self::positive_vertex(aabb, -normal);
            if normal.dot(n_vertex) + plane.w < 0.0 {
                all_inside = false;
            }
        }

        if all_inside { FrustumTest::Inside } else { FrustumTest::Partial }
    }

    /// The eight frustum corners, near plane first.
    ///
    /// Order: near (left-bottom, right-bottom, left-top, right-top), then the
    /// same for the far plane. Returns `None` if any corner is degenerate
    /// (parallel planes, e.g. an infinite far plane).
    pub fn corners(&self) -> Option<[Vec3; 8]> {
        let mut corners = [Vec3::ZERO; 8];
        let mut i = 0;
        for depth in [PLANE_NEAR, PLANE_FAR] {
            for vertical in [PLANE_BOTTOM, PLANE_TOP] {
                for horizontal in [PLANE_LEFT, PLANE_RIGHT] {
                    corners[i] = Self::intersect_planes(
                        self.planes[depth],
                        self.planes[horizontal],
                        self.planes[vertical],
                    )?;
                    i += 1;
                }
            }
        }
        Some(corners)
    }

    /// Axis-aligned box enclosing the frustum, if it is finite.
    pub fn bounding_box(&self) -> Option<AABB> {
        AABB::from_points(&self.corners()?)
    }

    /// The six planes facing outward, as expected by convex queries.
    pub fn to_convex_planes(&self) -> [Plane; 6] {
        self.planes.map(|p| Plane::from_vec4(p).flipped())
    }

    /// Corner of `aabb` furthest along `direction`.
    fn positive_vertex(aabb: &AABB, direction: Vec3) -> Vec3 {
        Vec3::new(
            if direction.x >= 0.0 { aabb.max.x } else { aabb.min.x },
            if direction.y >= 0.0 { aabb.max.y } else { aabb.min.y },
            if direction.z >= 0.0 { aabb.max.z } else { aabb.min.z },
        )
    }

    /// Intersection point of three planes.
    fn intersect_planes(a: Vec4, b: Vec4, c: Vec4) -> Option<Vec3> {
        let (na, nb, nc) = (a.truncate(), b.truncate(), c.truncate());
        let bc = nb.cross(nc);
        let denom = na.dot(bc);
        if denom.abs() <= f32::EPSILON {
            return None;
        }
        let point = -(bc * a.w + nc.cross(na) * b.w + na.cross(nb) * c.w) / denom;
        point.is_finite().then_some(point)
    }
}

#[cfg(test)]
#[path = "frustum_tests.rs"]
mod tests;
