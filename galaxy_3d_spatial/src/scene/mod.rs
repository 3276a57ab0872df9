//! Scene spatial module
//!
//! Provides spatial objects with stable keys, the SceneIndex abstraction,
//! its BVH implementation, and a SpatialScene tying them together.

mod spatial_object;
mod scene_index;
mod bvh_scene_index;
mod spatial_scene;

pub use spatial_object::{SceneObjectKey, SpatialObject};
pub use scene_index::SceneIndex;
pub use bvh_scene_index::BvhSceneIndex;
pub use spatial_scene::SpatialScene;
