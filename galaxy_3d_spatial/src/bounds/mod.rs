//! Bounds module — geometric primitives consumed by the spatial index.
//!
//! Passive value types: boxes, planes, spheres, rays and frustums. They carry
//! no identity and are copied freely.

mod aabb;
mod frustum;
mod plane;
mod ray;
mod sphere;

pub use aabb::AABB;
pub use frustum::{
    Frustum, FrustumTest,
    PLANE_LEFT, PLANE_RIGHT, PLANE_BOTTOM, PLANE_TOP, PLANE_NEAR, PLANE_FAR,
};
pub use plane::Plane;
pub use ray::Ray;
pub(crate) use ray::SlabTest;
pub use sphere::BoundingSphere;

#[cfg(test)]
#[path = "shapes_tests.rs"]
mod shapes_tests;
