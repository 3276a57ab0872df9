/// Spatial object types for the scene system.
///
/// A SpatialObject is the spatial part of a scene entity: a box in local
/// space and the transform that places it in the world. The world-space box
/// is derived from both and kept up to date by the owning SpatialScene.

use glam::Mat4;
use slotmap::new_key_type;
use crate::bounds::AABB;

// ===== SLOT MAP KEY =====

new_key_type! {
    /// Stable key for a SpatialObject within a SpatialScene.
    ///
    /// Keys remain valid even after other objects are removed.
    /// A key becomes invalid only when its own object is removed.
    pub struct SceneObjectKey;
}

// ===== SPATIAL OBJECT =====

/// Local bounds plus world transform of one scene object.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialObject {
    local_aabb: AABB,
    world_matrix: Mat4,
    /// `local_aabb` transformed by `world_matrix`
    world_aabb: AABB,
}

impl SpatialObject {
    pub fn new(local_aabb: AABB, world_matrix: Mat4) -> Self {
        Self {
            local_aabb,
            world_matrix,
            world_aabb: local_aabb.transformed(&world_matrix),
        }
    }

    pub fn local_aabb(&self) -> &AABB {
        &self.local_aabb
    }

    pub fn world_matrix(&self) -> &Mat4 {
        &self.world_matrix
    }

    pub fn world_aabb(&self) -> &AABB {
        &self.world_aabb
    }

    /// Replace the transform; returns the new world box.
    pub(crate) fn set_world_matrix(&mut self, world_matrix: Mat4) -> AABB {
        self.world_matrix = world_matrix;
        self.world_aabb = self.local_aabb.transformed(&world_matrix);
        self.world_aabb
    }

    /// Replace the local box; returns the new world box.
    pub(crate) fn set_local_aabb(&mut self, local_aabb: AABB) -> AABB {
        self.local_aabb = local_aabb;
        self.world_aabb = local_aabb.transformed(&self.world_matrix);
        self.world_aabb
    }
}
