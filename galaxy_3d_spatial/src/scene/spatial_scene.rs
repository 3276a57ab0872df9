/// SpatialScene — a collection of SpatialObjects with a live spatial index.
///
/// Uses a SlotMap for O(1) insert/remove with stable keys. Every change to
/// an object's transform or bounds is pushed to the BvhSceneIndex right away,
/// so queries always see the current world boxes. `update()` is meant to be
/// called once per frame and spends a small, fixed rebalancing budget.

use slotmap::SlotMap;
use glam::{Mat4, Vec3};
use crate::bounds::{AABB, BoundingSphere, Frustum, Ray};
use crate::bvh::BvhConfig;
use crate::error::Result;
use crate::{spatial_debug, spatial_info, spatial_trace};
use super::bvh_scene_index::BvhSceneIndex;
use super::scene_index::SceneIndex;
use super::spatial_object::{SceneObjectKey, SpatialObject};

const SOURCE: &str = "galaxy3d::SpatialScene";

/// Spatial objects plus the index that answers queries about them.
pub struct SpatialScene {
    /// Objects stored in a slot map for O(1) insert/remove
    objects: SlotMap<SceneObjectKey, SpatialObject>,
    /// BVH over the world boxes of `objects`
    index: BvhSceneIndex,
    /// Frames processed by `update()`
    frame_count: u64,
    /// Accumulated `dt` of all frames, in seconds
    elapsed: f64,
}

impl Default for SpatialScene {
    fn default() -> Self {
        Self::new()
    }
}

impl SpatialScene {
    /// Create an empty scene with the default BVH configuration.
    pub fn new() -> Self {
        Self {
            objects: SlotMap::with_key(),
            index: BvhSceneIndex::new(),
            frame_count: 0,
            elapsed: 0.0,
        }
    }

    /// Create an empty scene with a custom BVH configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the configuration is out of range.
    pub fn with_config(config: BvhConfig) -> Result<Self> {
        Ok(Self {
            index: BvhSceneIndex::with_config(config)?,
            ..Self::new()
        })
    }

    // ===== OBJECTS =====

    /// Add an object and index it.
    ///
    /// # Arguments
    ///
    /// * `local_aabb` - Bounds in local space
    /// * `world_matrix` - World transform matrix
    pub fn add_object(&mut self, local_aabb: AABB, world_matrix: Mat4) -> SceneObjectKey {
        let object = SpatialObject::new(local_aabb, world_matrix);
        let world_aabb = *object.world_aabb();
        let key = self.objects.insert(object);
        self.index.insert(key, &world_aabb);
        key
    }

    /// Remove an object. Returns false if the key is invalid.
    pub fn remove_object(&mut self, key: SceneObjectKey) -> bool {
        if self.objects.remove(key).is_none() {
            spatial_debug!(SOURCE, "remove_object ignored: unknown key {:?}", key);
            return false;
        }
        self.index.remove(key);
        true
    }

    /// Move an object. Returns false if the key is invalid.
    pub fn set_world_matrix(&mut self, key: SceneObjectKey, world_matrix: Mat4) -> bool {
        let Some(object) = self.objects.get_mut(key) else {
            spatial_debug!(SOURCE, "set_world_matrix ignored: unknown key {:?}", key);
            return false;
        };
        let world_aabb = object.set_world_matrix(world_matrix);
        self.index.update(key, &world_aabb);
        true
    }

    /// Resize an object. Returns false if the key is invalid.
    pub fn set_local_aabb(&mut self, key: SceneObjectKey, local_aabb: AABB) -> bool {
        let Some(object) = self.objects.get_mut(key) else {
            spatial_debug!(SOURCE, "set_local_aabb ignored: unknown key {:?}", key);
            return false;
        };
        let world_aabb = object.set_local_aabb(local_aabb);
        self.index.update(key, &world_aabb);
        true
    }

    pub fn object(&self, key: SceneObjectKey) -> Option<&SpatialObject> {
        self.objects.get(key)
    }

    /// Current world-space box of an object
    pub fn world_aabb(&self, key: SceneObjectKey) -> Option<AABB> {
        self.objects.get(key).map(|object| *object.world_aabb())
    }

    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Iterate over all object keys.
    pub fn object_keys(&self) -> impl Iterator<Item = SceneObjectKey> + '_ {
        self.objects.keys()
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        spatial_info!(SOURCE, "Clearing scene ({} objects)", self.objects.len());
        self.objects.clear();
        self.index.clear();
    }

    pub fn index(&self) -> &BvhSceneIndex {
        &self.index
    }

    // ===== FRAME =====

    /// Per-frame maintenance: runs `incremental_passes_per_frame`
    /// rebalancing passes on the index.
    pub fn update(&mut self, dt: f32) {
        self.frame_count += 1;
        self.elapsed += f64::from(dt);

        let passes = self.index.config().incremental_passes_per_frame;
        if passes > 0 && !self.index.is_empty() {
            self.index.optimize(Some(passes));
        }
        spatial_trace!(SOURCE, "Frame {}: {} objects, {} passes", self.frame_count, self.objects.len(), passes);
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Accumulated frame time in seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    // ===== QUERIES =====

    /// Keys of every object whose world box is not fully outside the frustum.
    pub fn cull(&self, frustum: &Frustum) -> Vec<SceneObjectKey> {
        let mut visible = Vec::new();
        self.index.query_frustum(frustum, &mut visible);
        visible
    }

    /// Keys of every object whose world box is within `radius` of `center`.
    pub fn objects_in_range(&self, center: Vec3, radius: f32) -> Vec<SceneObjectKey> {
        let mut found = Vec::new();
        self.index.query_sphere(&BoundingSphere::new(center, radius), &mut found);
        found
    }

    /// Nearest object whose world box the ray crosses.
    pub fn pick(&self, ray: &Ray) -> Option<SceneObjectKey> {
        let mut hits = Vec::new();
        self.index.query_ray(ray, &mut hits);
        hits.first().copied()
    }
}

#[cfg(test)]
#[path = "spatial_scene_tests.rs"]
mod tests;
