//! Tracked device access.
//!
//! The controller never talks to a runtime directly. It resolves which
//! physical node backs each logical hand once ([`HandBinding`]), then every
//! tick asks a [`TrackingSystem`] for whatever device currently reports at
//! those nodes ([`PoseSampler`]).

pub mod binding;
pub mod sampler;

pub use binding::HandBinding;
pub use sampler::{Pose, PoseSampler, PoseSnapshot};

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Physical tracking node reported by the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrackingNode {
    Head,
    LeftHand,
    RightHand,
}

impl TrackingNode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Head => "head",
            Self::LeftHand => "left-hand",
            Self::RightHand => "right-hand",
        }
    }
}

/// Role a hand plays in the interaction, independent of left/right.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicalHand {
    /// Dominant hand: draws, erases, adds patches
    Primary,
    /// Non-dominant hand: grabs the canvas
    Secondary,
}

/// One device sample at a tracking node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceReading {
    pub position: Vec3,
    #[serde(default = "identity")]
    pub rotation: Quat,
    /// Primary face button (A/X or the menu button depending on hardware)
    #[serde(default)]
    pub primary_button: bool,
}

fn identity() -> Quat {
    Quat::IDENTITY
}

impl DeviceReading {
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            primary_button: false,
        }
    }
}

/// A haptic impulse request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HapticPulse {
    pub channel: u32,
    pub amplitude: f32,
    pub duration: Duration,
}

impl HapticPulse {
    pub fn new(amplitude: f32, duration: Duration) -> Self {
        Self {
            channel: 0,
            amplitude,
            duration,
        }
    }
}

/// Access to the tracking runtime.
///
/// Devices may come and go at any time; implementations report whatever is
/// present at a node right now and must not cache handles on behalf of the
/// caller.
pub trait TrackingSystem {
    /// Returns the first device currently reporting at `node`, if any.
    fn device_at(&self, node: TrackingNode) -> Option<DeviceReading>;

    /// Sends a haptic pulse to the device at `node`. No-op when absent.
    fn send_haptic(&mut self, node: TrackingNode, pulse: HapticPulse);
}
