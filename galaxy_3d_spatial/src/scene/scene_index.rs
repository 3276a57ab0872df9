/// Spatial acceleration structures for scene queries.
///
/// A SceneIndex indexes scene objects by their world-space AABB
/// for efficient frustum culling and spatial queries.
/// Implementations include BVH, octree, grid, etc.
///
/// Ownership: the caller creates and owns the SceneIndex.
/// SpatialScene owns a BvhSceneIndex and keeps it in sync.

use crate::bounds::{AABB, Frustum};
use super::spatial_object::SceneObjectKey;

/// Trait for spatial indexing of scene objects.
pub trait SceneIndex: Send + Sync {
    /// Insert an object with its world-space AABB.
    fn insert(&mut self, key: SceneObjectKey, world_aabb: &AABB);

    /// Remove an object from the index.
    fn remove(&mut self, key: SceneObjectKey);

    /// Update an object's world-space AABB (e.g. after transform change).
    fn update(&mut self, key: SceneObjectKey, world_aabb: &AABB);

    /// Query all objects whose world AABB intersects the frustum.
    /// Results are appended to `results`.
    fn query_frustum(&self, frustum: &Frustum, results: &mut Vec<SceneObjectKey>);

    /// Remove all objects from the index.
    fn clear(&mut self);
}
