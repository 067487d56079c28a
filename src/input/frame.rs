//! Per-tick values from the action layer.

use super::buttons::{Button, ButtonSet};
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Action-layer input for one tick.
///
/// Pressure and velocity are bound to the primary hand in the action layer
/// rather than read from the device, so they keep flowing while the
/// primary device is briefly lost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ActionFrame {
    /// Analog draw trigger depth
    #[serde(default)]
    pub pressure: f32,
    /// Primary hand pose velocity
    #[serde(default)]
    pub velocity: Vec3,
    /// Buttons held this tick
    #[serde(default)]
    pub buttons: ButtonSet,
}

impl ActionFrame {
    pub fn with_pressure(pressure: f32) -> Self {
        Self {
            pressure,
            ..Self::default()
        }
    }

    pub fn holding(button: Button) -> Self {
        Self {
            buttons: ButtonSet::empty().with(button),
            ..Self::default()
        }
    }
}
