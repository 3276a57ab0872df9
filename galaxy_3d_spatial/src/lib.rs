/*!
# Galaxy 3D Spatial

Spatial indexing for the Galaxy 3D engine.

The core is a dynamic bounding-volume hierarchy: a self-balancing binary
tree of axis-aligned boxes that supports inserting, moving and removing
objects at any time, and answers box, frustum, convex, ray and sphere
queries through callbacks.

## Architecture

- **bounds**: geometric primitives (`AABB`, `Plane`, `BoundingSphere`, `Ray`, `Frustum`)
- **bvh**: `DynamicBvh<T>` and its `BvhId` handles, plus `BvhConfig`
- **scene**: `SceneIndex` trait, `BvhSceneIndex`, and `SpatialScene`
- **log**: pluggable logger shared by every component
*/

// Internal modules
mod error;
pub mod log;
pub mod bounds;
pub mod bvh;
pub mod scene;

// Main galaxy3d namespace module
pub mod galaxy3d {
    // Error types
    pub use crate::error::{Error, Result};

    // Core index
    pub use crate::bvh::{BvhConfig, BvhId, DynamicBvh};

    // Logging sub-module (types and functions, NOT macros)
    pub mod log {
        pub use crate::log::{
            Logger, LogEntry, LogSeverity, DefaultLogger,
            set_logger, reset_logger, log, log_detailed,
        };
        // Note: spatial_* macros are NOT re-exported here - they are internal only
    }

    // Bounds sub-module with all geometric primitives
    pub mod bounds {
        pub use crate::bounds::*;
    }

    // BVH sub-module
    pub mod bvh {
        pub use crate::bvh::*;
    }

    // Scene sub-module
    pub mod scene {
        pub use crate::scene::*;
    }
}

// Re-export math library at crate root
pub use glam;
