/// BvhSceneIndex — dynamic BVH spatial index for scene queries.
///
/// Each object is one leaf of a `DynamicBvh`, so moving an object only
/// touches the path from its leaf to the root. A reverse map from object key
/// to BVH handle makes remove and update O(1) lookups before the tree work.
///
/// Unlike a static octree there are no world bounds to configure: the tree
/// grows and shrinks with the objects.

use rustc_hash::FxHashMap;
use crate::bounds::{AABB, BoundingSphere, Frustum, Ray};
use crate::bvh::{BvhConfig, BvhId, DynamicBvh};
use crate::error::Result;
use super::scene_index::SceneIndex;
use super::spatial_object::SceneObjectKey;

/// Dynamic BVH spatial index.
pub struct BvhSceneIndex {
    bvh: DynamicBvh<SceneObjectKey>,
    /// Reverse lookup: object key → BVH leaf handle
    handles: FxHashMap<SceneObjectKey, BvhId>,
}

impl Default for BvhSceneIndex {
    fn default() -> Self {
        Self::new()
    }
}

impl BvhSceneIndex {
    /// Create an empty index with the default BVH configuration.
    pub fn new() -> Self {
        Self {
            bvh: DynamicBvh::new(),
            handles: FxHashMap::default(),
        }
    }

    /// Create an empty index with a custom BVH configuration.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if the configuration is out of range.
    pub fn with_config(config: BvhConfig) -> Result<Self> {
        Ok(Self {
            bvh: DynamicBvh::with_config(config)?,
            handles: FxHashMap::default(),
        })
    }

    /// Number of indexed objects
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    pub fn contains(&self, key: SceneObjectKey) -> bool {
        self.handles.contains_key(&key)
    }

    /// World box an object was last indexed with
    pub fn world_aabb(&self, key: SceneObjectKey) -> Option<AABB> {
        self.handles.get(&key).and_then(|id| self.bvh.aabb(*id))
    }

    pub fn config(&self) -> &BvhConfig {
        self.bvh.config()
    }

    /// Underlying tree, for statistics and custom queries.
    pub fn bvh(&self) -> &DynamicBvh<SceneObjectKey> {
        &self.bvh
    }

    /// Query all objects whose world AABB overlaps `aabb`.
    pub fn query_aabb(&self, aabb: &AABB, results: &mut Vec<SceneObjectKey>) {
        self.bvh.query_aabb(aabb, |key, _| {
            results.push(*key);
            true
        });
    }

    /// Query all objects whose world AABB overlaps the sphere.
    pub fn query_sphere(&self, sphere: &BoundingSphere, results: &mut Vec<SceneObjectKey>) {
        self.bvh.query_sphere(sphere, |key, _| {
            results.push(*key);
            true
        });
    }

    /// Query all objects whose world AABB the ray crosses, nearest first.
    ///
    /// Objects are ordered by the distance at which the ray enters their box
    /// (0 when the origin is inside).
    pub fn query_ray(&self, ray: &Ray, results: &mut Vec<SceneObjectKey>) {
        let mut hits: Vec<(f32, SceneObjectKey)> = Vec::new();
        self.bvh.query_ray(ray, |key, aabb| {
            if let Some(distance) = ray.intersect_aabb(aabb) {
                hits.push((distance, *key));
            }
            true
        });
        hits.sort_by(|a, b| a.0.total_cmp(&b.0));
        results.extend(hits.into_iter().map(|(_, key)| key));
    }

    /// Run incremental rebalancing passes (`None`: one per object).
    pub fn optimize(&mut self, passes: Option<usize>) {
        self.bvh.optimize_incremental(passes);
    }

    /// Rebuild the whole tree top-down.
    pub fn rebuild(&mut self) {
        self.bvh.optimize_top_down_default();
    }
}

// ===== SCENE INDEX TRAIT =====

impl SceneIndex for BvhSceneIndex {
    fn insert(&mut self, key: SceneObjectKey, world_aabb: &AABB) {
        if let Some(id) = self.handles.get(&key) {
            // Already indexed: treat as a move
            self.bvh.update(*id, *world_aabb);
            return;
        }
        let id = self.bvh.insert(*world_aabb, key);
        self.handles.insert(key, id);
    }

    fn remove(&mut self, key: SceneObjectKey) {
        if let Some(id) = self.handles.remove(&key) {
            self.bvh.remove(id);
        }
    }

    fn update(&mut self, key: SceneObjectKey, world_aabb: &AABB) {
        match self.handles.get(&key).copied() {
            Some(id) => {
                self.bvh.update(id, *world_aabb);
            }
            None => self.insert(key, world_aabb),
        }
    }

    fn query_frustum(&self, frustum: &Frustum, results: &mut Vec<SceneObjectKey>) {
        self.bvh.query_frustum(frustum, |key, _| {
            results.push(*key);
            true
        });
    }

    fn clear(&mut self) {
        self.bvh.clear();
        self.handles.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};
    use slotmap::SlotMap;

    fn make_aabb(min: Vec3, max: Vec3) -> AABB {
        AABB { min, max }
    }

    fn make_keys(count: usize) -> Vec<SceneObjectKey> {
        let mut map: SlotMap<SceneObjectKey, ()> = SlotMap::with_key();
        (0..count).map(|_| map.insert(())).collect()
    }

    /// Camera at +Z looking down -Z, 90° fov, sees z in [-999, 0.9]
    fn forward_frustum() -> Frustum {
        let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 1000.0);
        let view = Mat4::look_at_rh(Vec3::new(0.0, 0.0, 1.0), Vec3::ZERO, Vec3::Y);
        Frustum::from_view_projection(&(proj * view))
    }

    #[test]
    fn test_insert_and_query_frustum() {
        let keys = make_keys(2);
        let mut index = BvhSceneIndex::new();
        index.insert(keys[0], &make_aabb(Vec3::new(-1.0, -1.0, -10.0), Vec3::new(1.0, 1.0, -8.0)));
        // Behind the camera
        index.insert(keys[1], &make_aabb(Vec3::new(-1.0, -1.0, 10.0), Vec3::new(1.0, 1.0, 12.0)));

        let mut results = Vec::new();
        index.query_frustum(&forward_frustum(), &mut results);
        assert_eq!(results, vec![keys[0]]);
        assert_eq!(index.len(), 2);
    }

    #[test]
    fn test_double_insert_moves_object() {
        let keys = make_keys(1);
        let mut index = BvhSceneIndex::new();
        index.insert(keys[0], &make_aabb(Vec3::ZERO, Vec3::ONE));
        index.insert(keys[0], &make_aabb(Vec3::splat(5.0), Vec3::splat(6.0)));

        assert_eq!(index.len(), 1);
        assert_eq!(index.bvh().leaf_count(), 1);
        assert_eq!(index.world_aabb(keys[0]), Some(make_aabb(Vec3::splat(5.0), Vec3::splat(6.0))));
    }

    #[test]
    fn test_update_unknown_key_inserts() {
        let keys = make_keys(1);
        let mut index = BvhSceneIndex::new();
        index.update(keys[0], &make_aabb(Vec3::ZERO, Vec3::ONE));
        assert!(index.contains(keys[0]));
    }

    #[test]
    fn test_remove_and_clear() {
        let keys = make_keys(3);
        let mut index = BvhSceneIndex::new();
        for (i, key) in keys.iter().enumerate() {
            let x = i as f32 * 3.0;
            index.insert(*key, &make_aabb(Vec3::new(x, 0.0, 0.0), Vec3::new(x + 1.0, 1.0, 1.0)));
        }

        index.remove(keys[1]);
        index.remove(keys[1]);
        assert_eq!(index.len(), 2);
        assert!(!index.contains(keys[1]));

        let mut results = Vec::new();
        index.query_aabb(&make_aabb(Vec3::splat(-10.0), Vec3::splat(10.0)), &mut results);
        results.sort();
        let mut expected = vec![keys[0], keys[2]];
        expected.sort();
        assert_eq!(results, expected);

        index.clear();
        assert!(index.is_empty());
        assert!(index.bvh().is_empty());
    }

    #[test]
    fn test_query_ray_nearest_first() {
        let keys = make_keys(3);
        let mut index = BvhSceneIndex::new();
        index.insert(keys[0], &make_aabb(Vec3::new(10.0, 0.0, 0.0), Vec3::new(11.0, 1.0, 1.0)));
        index.insert(keys[1], &make_aabb(Vec3::new(2.0, 0.0, 0.0), Vec3::new(3.0, 1.0, 1.0)));
        index.insert(keys[2], &make_aabb(Vec3::new(6.0, 0.0, 0.0), Vec3::new(7.0, 1.0, 1.0)));

        let mut results = Vec::new();
        index.query_ray(&Ray::new(Vec3::new(0.0, 0.5, 0.5), Vec3::X), &mut results);
        assert_eq!(results, vec![keys[1], keys[2], keys[0]]);
    }

    #[test]
    fn test_query_sphere() {
        let keys = make_keys(2);
        let mut index = BvhSceneIndex::new();
        index.insert(keys[0], &make_aabb(Vec3::splat(1.0), Vec3::splat(2.0)));
        index.insert(keys[1], &make_aabb(Vec3::splat(20.0), Vec3::splat(21.0)));

        let mut results = Vec::new();
        index.query_sphere(&BoundingSphere::new(Vec3::ZERO, 2.0), &mut results);
        assert_eq!(results, vec![keys[0]]);
    }

    #[test]
    fn test_optimize_and_rebuild_keep_objects() {
        let keys = make_keys(64);
        let mut index = BvhSceneIndex::new();
        for (i, key) in keys.iter().enumerate() {
            let p = Vec3::new((i % 8) as f32 * 4.0, (i / 8) as f32 * 4.0, 0.0);
            index.insert(*key, &make_aabb(p, p + Vec3::ONE));
        }

        index.optimize(None);
        index.rebuild();
        assert_eq!(index.len(), 64);
        assert_eq!(index.bvh().leaf_count(), 64);

        let mut results = Vec::new();
        index.query_aabb(&make_aabb(Vec3::splat(-1.0), Vec3::splat(100.0)), &mut results);
        assert_eq!(results.len(), 64);
    }

    #[test]
    fn test_with_config_propagates_error() {
        let config = BvhConfig { top_down_threshold: 0, ..Default::default() };
        assert!(BvhSceneIndex::with_config(config).is_err());
    }
}
