//! Per-tick pose sampling.

use super::{DeviceReading, HandBinding, LogicalHand, TrackingNode, TrackingSystem};
use crate::input::ActionFrame;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Position and orientation, as surfaced to loggers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Default for Pose {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
        }
    }
}

/// Everything the dispatcher reads about the hands on one tick.
///
/// Absent devices stay `None` here so tests can tell "no input" from
/// "input at the origin"; the accessors surface absence as a zero pose and
/// released buttons.
#[derive(Debug, Clone, Default)]
pub struct PoseSnapshot {
    pub head: Option<DeviceReading>,
    pub primary: Option<DeviceReading>,
    pub secondary: Option<DeviceReading>,
    /// Analog draw trigger depth in [0, 1]
    pub pressure: f32,
    /// Pose velocity of the primary hand from the action layer
    pub velocity: Vec3,
}

impl PoseSnapshot {
    pub fn reading(&self, hand: LogicalHand) -> Option<&DeviceReading> {
        match hand {
            LogicalHand::Primary => self.primary.as_ref(),
            LogicalHand::Secondary => self.secondary.as_ref(),
        }
    }

    pub fn position(&self, hand: LogicalHand) -> Vec3 {
        self.reading(hand).map_or(Vec3::ZERO, |r| r.position)
    }

    pub fn rotation(&self, hand: LogicalHand) -> Quat {
        self.reading(hand).map_or(Quat::IDENTITY, |r| r.rotation)
    }

    /// Primary face button of a hand; an absent device reads released.
    pub fn primary_button(&self, hand: LogicalHand) -> bool {
        self.reading(hand).is_some_and(|r| r.primary_button)
    }

    pub fn head(&self) -> Pose {
        self.head.map_or_else(Pose::default, |r| Pose {
            position: r.position,
            rotation: r.rotation,
        })
    }

    /// Distance between the two hands' surfaced positions.
    pub fn hands_distance(&self) -> f32 {
        self.position(LogicalHand::Primary)
            .distance(self.position(LogicalHand::Secondary))
    }
}

/// Reads the bound nodes every tick.
#[derive(Debug, Clone)]
pub struct PoseSampler {
    binding: HandBinding,
}

impl PoseSampler {
    pub fn new(binding: HandBinding) -> Self {
        Self { binding }
    }

    pub fn binding(&self) -> &HandBinding {
        &self.binding
    }

    /// Produces the snapshot for this tick.
    ///
    /// Devices are looked up by node on every call rather than cached, so a
    /// controller that drops out and reconnects is picked up again.
    pub fn sample(&self, tracking: &dyn TrackingSystem, actions: &ActionFrame) -> PoseSnapshot {
        PoseSnapshot {
            head: tracking.device_at(TrackingNode::Head),
            primary: tracking.device_at(self.binding.node(LogicalHand::Primary)),
            secondary: tracking.device_at(self.binding.node(LogicalHand::Secondary)),
            pressure: actions.pressure.clamp(0.0, 1.0),
            velocity: actions.velocity,
        }
    }
}
