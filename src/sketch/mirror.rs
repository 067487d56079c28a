//! Symmetry mirror plane state.

use glam::Vec3;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A symmetry plane given by its normal and a point on it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Plane {
    #[schemars(with = "[f32; 3]")]
    pub normal: Vec3,
    #[schemars(with = "[f32; 3]")]
    pub point: Vec3,
}

impl Plane {
    /// Returns the same plane moved by `offset`.
    pub fn offset_by(&self, offset: Vec3) -> Self {
        Self {
            normal: self.normal,
            point: self.point + offset,
        }
    }
}

/// Mirror availability and activation.
///
/// `active` can only be true while `available` is true. Availability is
/// decided by the current model; activation by the user toggle.
#[derive(Debug, Clone, Default)]
pub struct MirrorState {
    available: bool,
    active: bool,
    plane: Option<Plane>,
}

impl MirrorState {
    /// Creates an unavailable, inactive mirror.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn available(&self) -> bool {
        self.available
    }

    pub fn active(&self) -> bool {
        self.active
    }

    pub fn plane(&self) -> Option<&Plane> {
        self.plane.as_ref()
    }

    /// Installs a plane for the current model; mirroring starts active.
    pub fn install(&mut self, plane: Plane) {
        self.plane = Some(plane);
        self.available = true;
        self.active = true;
    }

    /// Forces the mirror unavailable and inactive and drops the plane.
    pub fn clear(&mut self) {
        self.plane = None;
        self.available = false;
        self.active = false;
    }

    /// Flips activation if a plane is available.
    ///
    /// Returns the new activation state, or `None` when the toggle had no
    /// effect because no plane is available.
    pub fn toggle(&mut self) -> Option<bool> {
        if !self.available {
            return None;
        }
        self.active = !self.active;
        Some(self.active)
    }
}
