//! Collaborators the interaction controller drives.
//!
//! The controller owns a single [`SketchHost`] and reaches every external
//! system through it: geometry builders, appearance, the study scenario and
//! its logs, and the tracking runtime.

pub mod actions;
pub mod feedback;
pub mod study;

pub use actions::{
    AddPatchCollaborator, DeletedElement, EraseCollaborator, GrabCollaborator, PatchData,
    StrokeBuilder, StrokeData, ZoomCollaborator, ZoomUpdate,
};
pub use feedback::{
    CanvasTransform, CanvasView, Exporter, Grid, HandAppearance, InstructionsDisplay,
    MirrorPlaneView, ModelViewer, ZoomAppearance,
};
pub use study::{LogContext, ScenarioDriver, StepContext, StepLog};

use crate::device::{LogicalHand, TrackingSystem};

/// Bundle of collaborators.
///
/// Each accessor hands out one collaborator at a time; an implementation
/// may return the same object for several of them.
pub trait SketchHost {
    fn tracking(&mut self) -> &mut dyn TrackingSystem;
    fn strokes(&mut self) -> &mut dyn StrokeBuilder;
    fn eraser(&mut self) -> &mut dyn EraseCollaborator;
    fn grab(&mut self) -> &mut dyn GrabCollaborator;
    fn zoom(&mut self) -> &mut dyn ZoomCollaborator;
    fn patches(&mut self) -> &mut dyn AddPatchCollaborator;
    fn hand_appearance(&mut self, hand: LogicalHand) -> &mut dyn HandAppearance;
    fn zoom_appearance(&mut self) -> &mut dyn ZoomAppearance;
    fn grid(&mut self) -> &mut dyn Grid;
    fn mirror_plane(&mut self) -> &mut dyn MirrorPlaneView;
    fn instructions(&mut self) -> &mut dyn InstructionsDisplay;
    fn canvas(&mut self) -> &mut dyn CanvasView;
    fn models(&mut self) -> &mut dyn ModelViewer;
    fn exporter(&mut self) -> &mut dyn Exporter;
    fn scenario(&mut self) -> &mut dyn ScenarioDriver;
    fn step_log(&mut self) -> &mut dyn StepLog;
}
