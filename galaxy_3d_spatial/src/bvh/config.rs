/// Tuning parameters for `DynamicBvh`.
///
/// All fields have sensible defaults; most callers only ever touch
/// `lookahead` (cheaper, less accurate updates) and
/// `incremental_passes_per_frame` (rebalancing budget).

use crate::error::{Error, Result};

/// Default leaf count at or below which top-down rebuilds switch to bottom-up.
pub const DEFAULT_TOP_DOWN_THRESHOLD: usize = 128;

/// Default tolerance under which an update is considered a no-op.
pub const DEFAULT_UPDATE_TOLERANCE: f32 = 1e-5;

/// Configuration for a `DynamicBvh`.
#[derive(Debug, Clone, PartialEq)]
pub struct BvhConfig {
    /// How many parents an update climbs from the perturbed subtree before
    /// reinserting. `None` always reinserts from the root (most accurate).
    pub lookahead: Option<u32>,
    /// Leaf count at or below which `optimize_top_down_default` uses bottom-up
    pub top_down_threshold: usize,
    /// Updates whose box is within this tolerance of the current box are ignored
    pub update_tolerance: f32,
    /// Incremental optimization passes run by `SpatialScene::update` per frame
    pub incremental_passes_per_frame: usize,
}

impl Default for BvhConfig {
    fn default() -> Self {
        Self {
            lookahead: None,
            top_down_threshold: DEFAULT_TOP_DOWN_THRESHOLD,
            update_tolerance: DEFAULT_UPDATE_TOLERANCE,
            incremental_passes_per_frame: 1,
        }
    }
}

impl BvhConfig {
    /// Check that every value is in range.
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if:
    /// - `update_tolerance` is negative or not finite
    /// - `top_down_threshold` is 0
    pub fn validate(&self) -> Result<()> {
        if !self.update_tolerance.is_finite() || self.update_tolerance < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "update_tolerance must be finite and >= 0 (got {})",
                self.update_tolerance
            )));
        }
        if self.top_down_threshold == 0 {
            return Err(Error::InvalidConfig(
                "top_down_threshold must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
