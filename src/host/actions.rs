//! Action collaborators: the systems that actually build geometry.

use crate::sketch::InteractionType;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Serialized stroke handed back by the stroke builder on commit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeData {
    pub id: u32,
    pub points: Vec<Vec3>,
}

/// Serialized surface patch reported by the patch system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatchData {
    pub id: u32,
    pub stroke_ids: Vec<u32>,
}

/// Element removed by the eraser.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeletedElement {
    pub interaction: InteractionType,
    pub element_id: u32,
}

/// Result of one zoom update.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomUpdate {
    pub success: bool,
    pub scale: f32,
}

/// Builds strokes from the primary hand's motion.
pub trait StrokeBuilder {
    fn begin(&mut self, position: Vec3);
    fn update(&mut self, position: Vec3, rotation: Quat, velocity: Vec3, pressure: f32);
    /// Finishes the current stroke. `None` means the stroke was rejected.
    fn commit(&mut self, position: Vec3, mirror: bool) -> Option<StrokeData>;
    fn set_beautification(&mut self, enabled: bool);
    /// Resets the canvas for a new step.
    fn reinit(&mut self, surfacing: bool);
    /// Changes the pipeline without clearing existing geometry.
    fn switch_system(&mut self, surfacing: bool);
}

pub trait EraseCollaborator {
    fn try_delete(&mut self, position: Vec3, mirror: bool) -> Option<DeletedElement>;
    fn clear_all(&mut self);
}

pub trait GrabCollaborator {
    fn begin(&mut self, position: Vec3, rotation: Quat);
    fn update(&mut self, position: Vec3, rotation: Quat);
}

pub trait ZoomCollaborator {
    fn begin(&mut self, hands_distance: f32);
    fn update(&mut self, position: Vec3, hands_distance: f32) -> ZoomUpdate;
    fn reset_scale(&mut self);
}

pub trait AddPatchCollaborator {
    fn try_add(&mut self, position: Vec3, mirror: bool) -> bool;
}
