//! Unit tests for plane.rs, sphere.rs and ray.rs

use glam::Vec3;
use super::*;

fn unit_box() -> AABB {
    AABB { min: Vec3::ZERO, max: Vec3::ONE }
}

// ============================================================================
// PLANE
// ============================================================================

#[test]
fn test_plane_signed_distance() {
    let plane = Plane::from_point_normal(Vec3::new(0.0, 2.0, 0.0), Vec3::Y);
    assert_eq!(plane.signed_distance(Vec3::new(5.0, 3.0, -1.0)), 1.0);
    assert_eq!(plane.signed_distance(Vec3::ZERO), -2.0);
    assert!(plane.is_point_over(Vec3::new(0.0, 2.5, 0.0)));
    assert!(!plane.is_point_over(Vec3::new(0.0, 2.0, 0.0)));
}

#[test]
fn test_plane_flipped() {
    let plane = Plane::new(Vec3::X, -1.0);
    let flipped = plane.flipped();
    let p = Vec3::new(3.0, 0.0, 0.0);
    assert_eq!(flipped.signed_distance(p), -plane.signed_distance(p));
}

// ============================================================================
// SPHERE
// ============================================================================

#[test]
fn test_sphere_intersects_aabb() {
    let aabb = unit_box();
    assert!(BoundingSphere::new(Vec3::splat(0.5), 0.1).intersects_aabb(&aabb));
    assert!(BoundingSphere::new(Vec3::new(2.0, 0.5, 0.5), 1.0).intersects_aabb(&aabb));
    assert!(!BoundingSphere::new(Vec3::new(2.0, 0.5, 0.5), 0.9).intersects_aabb(&aabb));

    // Near the corner the box-of-sphere overlaps but the sphere does not
    let corner = BoundingSphere::new(Vec3::splat(1.6), 1.0);
    assert!(corner.bounding_box().intersects(&aabb));
    assert!(!corner.intersects_aabb(&aabb));
}

#[test]
fn test_sphere_bounding_box() {
    let bounds = BoundingSphere::new(Vec3::new(1.0, 2.0, 3.0), 2.0).bounding_box();
    assert_eq!(bounds.min, Vec3::new(-1.0, 0.0, 1.0));
    assert_eq!(bounds.max, Vec3::new(3.0, 4.0, 5.0));
}

// ============================================================================
// RAY
// ============================================================================

#[test]
fn test_ray_hits_box_along_axis() {
    let ray = Ray::new(Vec3::new(-5.0, 0.5, 0.5), Vec3::X);
    let distance = ray.intersect_aabb(&unit_box()).expect("ray should hit");
    assert!((distance - 5.0).abs() < 1e-5);
}

#[test]
fn test_ray_misses_box_along_axis() {
    let ray = Ray::new(Vec3::new(-5.0, 5.0, 5.0), Vec3::X);
    assert!(ray.intersect_aabb(&unit_box()).is_none());
}

#[test]
fn test_ray_pointing_away_misses() {
    let ray = Ray::new(Vec3::new(-5.0, 0.5, 0.5), -Vec3::X);
    assert!(ray.intersect_aabb(&unit_box()).is_none());
}

#[test]
fn test_ray_origin_inside_box() {
    let ray = Ray::new(Vec3::splat(0.5), Vec3::new(1.0, 1.0, 0.0));
    assert_eq!(ray.intersect_aabb(&unit_box()), Some(0.0));
}

#[test]
fn test_segment_too_short_misses() {
    let segment = Ray::segment(Vec3::new(-5.0, 0.5, 0.5), Vec3::new(-1.0, 0.5, 0.5));
    assert!(segment.intersect_aabb(&unit_box()).is_none());

    let longer = Ray::segment(Vec3::new(-5.0, 0.5, 0.5), Vec3::new(0.5, 0.5, 0.5));
    assert!(longer.intersect_aabb(&unit_box()).is_some());
}

#[test]
fn test_diagonal_ray() {
    let ray = Ray::new(Vec3::new(-1.0, -1.0, -1.0), Vec3::ONE);
    let distance = ray.intersect_aabb(&unit_box()).unwrap();
    assert!((distance - 3.0_f32.sqrt()).abs() < 1e-4);
    assert!((ray.point_at(distance) - Vec3::ZERO).length() < 1e-4);
}
