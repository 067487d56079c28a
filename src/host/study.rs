//! Study scenario collaborators: step sequencing and step logs.

use super::actions::{PatchData, StrokeData};
use super::feedback::CanvasTransform;
use crate::device::Pose;
use crate::sketch::{InteractionMode, InteractionType, SketchModel, SketchSystem};
use glam::Vec3;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Settings of the step the scenario is currently on. Read-only to the controller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepContext {
    /// Name used for exports and logs
    pub label: String,
    /// Countdown length in seconds; absent means untimed
    #[serde(default)]
    pub time_limit_secs: Option<f32>,
    #[serde(default)]
    pub break_after_step: bool,
    #[serde(default)]
    pub show_example_before: bool,
    #[serde(default)]
    pub mode: InteractionMode,
    #[serde(default)]
    pub system: SketchSystem,
    #[serde(default)]
    pub model: SketchModel,
}

impl StepContext {
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit_secs
            .filter(|secs| *secs > 0.0)
            .and_then(|secs| Duration::try_from_secs_f32(secs).ok())
    }
}

/// Drives the sequence of study steps.
///
/// Step changes caused by `next_step`/`redo_step` are followed by the
/// controller's own step-change handler; drivers that change step on their
/// own must call `InteractionController::on_step_change`.
pub trait ScenarioDriver {
    fn current_step(&self) -> &StepContext;
    fn end_step(&mut self);
    /// Advances; false when there is no step left.
    fn next_step(&mut self) -> bool;
    fn redo_step(&mut self);
}

/// Shared fields of every step log entry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LogContext {
    pub head: Pose,
    pub hand_position: Vec3,
    pub canvas: CanvasTransform,
    pub mirror: bool,
}

/// Logging sink of the current step.
pub trait StepLog {
    fn idle(&mut self, ctx: &LogContext);
    fn delete(&mut self, ctx: &LogContext, interaction: InteractionType, element_id: u32);
    fn stroke_add(&mut self, ctx: &LogContext, stroke: &StrokeData);
    fn surface_add(&mut self, ctx: &LogContext, patch: &PatchData);
    fn canvas_transform(&mut self, ctx: &LogContext);
    fn save_mid_step_and_continue(&mut self);
}
