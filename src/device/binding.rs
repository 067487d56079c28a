//! Logical hand to tracking node binding.

use super::{LogicalHand, TrackingNode, TrackingSystem};
use crate::config::Handedness;

/// Immutable mapping of logical hands to tracking nodes.
///
/// Resolved once at session start from the handedness setting and never
/// re-derived afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HandBinding {
    handedness: Handedness,
    primary: TrackingNode,
    secondary: TrackingNode,
    primary_present: bool,
    secondary_present: bool,
}

impl HandBinding {
    /// Builds the node mapping for a handedness without probing devices.
    pub fn for_handedness(handedness: Handedness) -> Self {
        let (primary, secondary) = match handedness {
            Handedness::Right => (TrackingNode::RightHand, TrackingNode::LeftHand),
            Handedness::Left => (TrackingNode::LeftHand, TrackingNode::RightHand),
        };
        Self {
            handedness,
            primary,
            secondary,
            primary_present: true,
            secondary_present: true,
        }
    }

    /// Resolves the binding and records which devices were present.
    ///
    /// A missing device is logged but not fatal: the sampler looks the node
    /// up again every tick, so the hand starts working once it appears.
    pub fn resolve(handedness: Handedness, tracking: &dyn TrackingSystem) -> Self {
        let mut binding = Self::for_handedness(handedness);
        log::info!(
            "{} handed: primary={}, secondary={}",
            handedness.as_str(),
            binding.primary.as_str(),
            binding.secondary.as_str()
        );

        binding.primary_present = tracking.device_at(binding.primary).is_some();
        if !binding.primary_present {
            log::error!("Failed to get primary device");
        }

        binding.secondary_present = tracking.device_at(binding.secondary).is_some();
        if !binding.secondary_present {
            log::error!("Failed to get secondary device");
        }

        binding
    }

    pub fn handedness(&self) -> Handedness {
        self.handedness
    }

    /// Tracking node backing a logical hand.
    pub fn node(&self, hand: LogicalHand) -> TrackingNode {
        match hand {
            LogicalHand::Primary => self.primary,
            LogicalHand::Secondary => self.secondary,
        }
    }

    /// Whether a device reported at the hand's node when the binding was resolved.
    pub fn was_present_at_start(&self, hand: LogicalHand) -> bool {
        match hand {
            LogicalHand::Primary => self.primary_present,
            LogicalHand::Secondary => self.secondary_present,
        }
    }
}
