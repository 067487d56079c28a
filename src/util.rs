//! Small geometry helpers.
//!
//! This module provides:
//! - Grid snapping toward zero
//! - Scene origin computation for reference models and mirror planes

use glam::Vec3;

// ============================================================================
// Grid snapping
// ============================================================================

/// Snaps each component toward zero onto a grid of size `step`.
///
/// Uses the truncating remainder, so negative components move up toward
/// zero rather than down: `-0.3` on a `0.25` grid becomes `-0.25`.
pub fn snap_toward_zero(value: Vec3, step: f32) -> Vec3 {
    if step <= 0.0 {
        return value;
    }
    Vec3::new(
        value.x - value.x % step,
        value.y - value.y % step,
        value.z - value.z % step,
    )
}

/// Scene origin for models, examples and mirror planes.
///
/// The anchor is a point in front of the participant's starting position;
/// snapping it keeps the model aligned with the displayed grid.
pub fn scene_origin(anchor: [f32; 3], grid_step: f32) -> Vec3 {
    snap_toward_zero(Vec3::from_array(anchor), grid_step)
}
