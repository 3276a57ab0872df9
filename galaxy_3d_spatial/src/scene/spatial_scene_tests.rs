/// Tests for SpatialScene
///
/// These tests validate object lifecycle via SlotMap keys, world box
/// tracking through transforms, and the culling / range / picking queries.

use super::*;
use glam::{Mat4, Quat, Vec3};

// ============================================================================
// Helper Functions
// ============================================================================

fn unit_box() -> AABB {
    AABB { min: Vec3::splat(-0.5), max: Vec3::splat(0.5) }
}

fn at(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

fn sorted(mut keys: Vec<SceneObjectKey>) -> Vec<SceneObjectKey> {
    keys.sort();
    keys
}

// ============================================================================
// Object lifecycle
// ============================================================================

#[test]
fn test_new_scene_is_empty() {
    let scene = SpatialScene::new();
    assert_eq!(scene.object_count(), 0);
    assert!(scene.index().is_empty());
    assert_eq!(scene.frame_count(), 0);
}

#[test]
fn test_add_object_indexes_world_box() {
    let mut scene = SpatialScene::new();
    let key = scene.add_object(unit_box(), at(10.0, 0.0, 0.0));

    let expected = AABB { min: Vec3::new(9.5, -0.5, -0.5), max: Vec3::new(10.5, 0.5, 0.5) };
    assert_eq!(scene.world_aabb(key), Some(expected));
    assert_eq!(scene.index().world_aabb(key), Some(expected));
    assert_eq!(scene.object(key).map(|o| *o.local_aabb()), Some(unit_box()));
    assert_eq!(scene.object_count(), 1);
}

#[test]
fn test_remove_object() {
    let mut scene = SpatialScene::new();
    let a = scene.add_object(unit_box(), at(0.0, 0.0, 0.0));
    let b = scene.add_object(unit_box(), at(5.0, 0.0, 0.0));

    assert!(scene.remove_object(a));
    assert!(!scene.remove_object(a));
    assert_eq!(scene.object_count(), 1);
    assert!(!scene.index().contains(a));
    assert!(scene.index().contains(b));
    assert_eq!(scene.object_keys().collect::<Vec<_>>(), vec![b]);
}

#[test]
fn test_stale_key_operations_fail() {
    let mut scene = SpatialScene::new();
    let a = scene.add_object(unit_box(), Mat4::IDENTITY);
    scene.remove_object(a);

    assert!(!scene.set_world_matrix(a, at(1.0, 1.0, 1.0)));
    assert!(!scene.set_local_aabb(a, unit_box()));
    assert!(scene.world_aabb(a).is_none());
    assert!(scene.object(a).is_none());
}

#[test]
fn test_clear() {
    let mut scene = SpatialScene::new();
    for i in 0..10 {
        scene.add_object(unit_box(), at(i as f32, 0.0, 0.0));
    }
    scene.clear();
    assert_eq!(scene.object_count(), 0);
    assert!(scene.index().is_empty());
    assert!(scene.objects_in_range(Vec3::ZERO, 100.0).is_empty());
}

// ============================================================================
// Transforms
// ============================================================================

#[test]
fn test_set_world_matrix_moves_world_box() {
    let mut scene = SpatialScene::new();
    let key = scene.add_object(unit_box(), Mat4::IDENTITY);

    assert!(scene.set_world_matrix(key, at(0.0, 20.0, 0.0)));
    let world = scene.world_aabb(key).unwrap();
    assert_eq!(world.center(), Vec3::new(0.0, 20.0, 0.0));
    assert_eq!(scene.index().world_aabb(key), Some(world));
    assert!(scene.objects_in_range(Vec3::ZERO, 2.0).is_empty());
    assert_eq!(scene.objects_in_range(Vec3::new(0.0, 20.0, 0.0), 1.0), vec![key]);
}

#[test]
fn test_rotation_grows_world_box() {
    let mut scene = SpatialScene::new();
    let key = scene.add_object(unit_box(), Mat4::IDENTITY);

    let rotated = Mat4::from_quat(Quat::from_rotation_z(std::f32::consts::FRAC_PI_4));
    scene.set_world_matrix(key, rotated);
    let world = scene.world_aabb(key).unwrap();
    let half_diagonal = 0.5 * std::f32::consts::SQRT_2;
    assert!((world.max.x - half_diagonal).abs() < 1e-5);
    assert!((world.max.y - half_diagonal).abs() < 1e-5);
    assert!((world.max.z - 0.5).abs() < 1e-5);
}

#[test]
fn test_set_local_aabb_scales_with_transform() {
    let mut scene = SpatialScene::new();
    let key = scene.add_object(unit_box(), Mat4::from_scale(Vec3::splat(2.0)));

    let bigger = AABB { min: Vec3::splat(-1.0), max: Vec3::splat(1.0) };
    assert!(scene.set_local_aabb(key, bigger));
    assert_eq!(
        scene.world_aabb(key),
        Some(AABB { min: Vec3::splat(-2.0), max: Vec3::splat(2.0) })
    );
}

// ============================================================================
// Frame update
// ============================================================================

#[test]
fn test_update_counts_frames_and_time() {
    let mut scene = SpatialScene::new();
    scene.add_object(unit_box(), Mat4::IDENTITY);
    scene.update(0.5);
    scene.update(0.25);
    assert_eq!(scene.frame_count(), 2);
    assert!((scene.elapsed() - 0.75).abs() < 1e-9);
}

#[test]
fn test_update_keeps_index_consistent() {
    let config = BvhConfig { incremental_passes_per_frame: 4, ..Default::default() };
    let mut scene = SpatialScene::with_config(config).unwrap();
    let keys: Vec<SceneObjectKey> = (0..50)
        .map(|i| scene.add_object(unit_box(), at((i % 10) as f32 * 3.0, (i / 10) as f32 * 3.0, 0.0)))
        .collect();

    for frame in 0..20 {
        let key = keys[frame % keys.len()];
        scene.set_world_matrix(key, at(frame as f32, -10.0, 0.0));
        scene.update(1.0 / 60.0);
    }

    assert_eq!(scene.index().len(), 50);
    assert_eq!(scene.index().bvh().leaf_count(), 50);
    for key in &keys {
        assert_eq!(scene.index().world_aabb(*key), scene.world_aabb(*key));
    }
}

#[test]
fn test_update_empty_scene() {
    let mut scene = SpatialScene::new();
    scene.update(0.016);
    assert_eq!(scene.frame_count(), 1);
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn test_cull_returns_visible_objects() {
    let mut scene = SpatialScene::new();
    let in_front = scene.add_object(unit_box(), at(0.0, 0.0, -10.0));
    let behind = scene.add_object(unit_box(), at(0.0, 0.0, 10.0));
    let far_left = scene.add_object(unit_box(), at(-100.0, 0.0, -10.0));

    let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
    let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
    let frustum = Frustum::from_view_projection(&(proj * view));

    let visible = scene.cull(&frustum);
    assert_eq!(visible, vec![in_front]);
    assert!(!visible.contains(&behind));
    assert!(!visible.contains(&far_left));
}

#[test]
fn test_objects_in_range() {
    let mut scene = SpatialScene::new();
    let near = scene.add_object(unit_box(), at(2.0, 0.0, 0.0));
    let edge = scene.add_object(unit_box(), at(0.0, 5.4, 0.0));
    scene.add_object(unit_box(), at(30.0, 0.0, 0.0));

    let found = sorted(scene.objects_in_range(Vec3::ZERO, 5.0));
    assert_eq!(found, sorted(vec![near, edge]));
}

#[test]
fn test_pick_returns_nearest() {
    let mut scene = SpatialScene::new();
    let far = scene.add_object(unit_box(), at(0.0, 0.0, -20.0));
    let near = scene.add_object(unit_box(), at(0.0, 0.0, -5.0));
    scene.add_object(unit_box(), at(10.0, 0.0, -5.0));

    let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(scene.pick(&ray), Some(near));

    scene.remove_object(near);
    assert_eq!(scene.pick(&ray), Some(far));

    let up = Ray::new(Vec3::ZERO, Vec3::Y);
    assert_eq!(scene.pick(&up), None);
}
