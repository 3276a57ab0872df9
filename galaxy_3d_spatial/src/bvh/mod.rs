//! Dynamic bounding-volume hierarchy
//!
//! `DynamicBvh<T>` indexes objects by their axis-aligned box and answers
//! box, frustum, convex, ray and sphere queries. Objects are addressed by
//! the `BvhId` returned on insertion.

mod arena;
mod build;
mod config;
mod node;
mod query;
mod tree;
mod volume;

pub use config::{BvhConfig, DEFAULT_TOP_DOWN_THRESHOLD, DEFAULT_UPDATE_TOLERANCE};
pub use tree::{BvhId, DynamicBvh};
