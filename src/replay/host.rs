//! Stand-in collaborators for replaying traces without a VR runtime.
//!
//! Geometry is kept deliberately small: strokes are point lists, erasing
//! removes the nearest stroke, patches join the three strokes closest to
//! the hand. Every call the controller makes is written to the journal,
//! except per-tick feeds (stroke, grab and zoom updates, grid refresh).

use super::journal::Journal;
use super::trace::TraceFrame;
use crate::config::{ControllerType, Handedness};
use crate::device::{DeviceReading, HapticPulse, LogicalHand, TrackingNode, TrackingSystem};
use crate::host::*;
use crate::sketch::{InteractionType, Plane, SketchModel, SketchSystem};
use glam::{Quat, Vec3};
use serde::Serialize;
use serde_json::json;
use std::time::Duration;

/// Erasing reaches strokes with a point within this distance of the hand.
const ERASE_RADIUS: f32 = 0.05;
/// Patches join strokes with a point within this distance of the hand.
const PATCH_RADIUS: f32 = 0.25;
const PATCH_STROKES: usize = 3;
const MIN_ZOOM: f32 = 0.1;
const MAX_ZOOM: f32 = 10.0;

/// Counters reported in the replay summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReplayStats {
    pub strokes: usize,
    pub deletes: usize,
    pub patches: usize,
    pub idle_samples: usize,
    pub canvas_transforms: usize,
    pub exports: usize,
}

/// Hand appearance; cues are moved into the journal at the end of a frame.
#[derive(Debug, Default)]
struct ReplayHand {
    cues: Vec<&'static str>,
}

impl HandAppearance for ReplayHand {
    fn on_draw_start(&mut self) {
        self.cues.push("draw_start");
    }
    fn on_draw_end(&mut self) {
        self.cues.push("draw_end");
    }
    fn on_zoom_start(&mut self) {
        self.cues.push("zoom_start");
    }
    fn on_zoom_end(&mut self) {
        self.cues.push("zoom_end");
    }
    fn on_grab_start(&mut self) {
        self.cues.push("grab_start");
    }
    fn on_grab_end(&mut self) {
        self.cues.push("grab_end");
    }
    fn on_no_op(&mut self) {
        self.cues.push("no_op");
    }
    fn on_system_change(&mut self, _system: SketchSystem) {
        self.cues.push("system_change");
    }
}

#[derive(Debug, Clone, Copy)]
struct GrabAnchor {
    position: Vec3,
    rotation: Quat,
    canvas: CanvasTransform,
}

#[derive(Debug, Clone, Copy)]
struct ZoomAnchor {
    distance: f32,
    scale: f32,
}

pub struct ReplayHost {
    journal: Journal,
    frame: TraceFrame,
    primary_hand: ReplayHand,
    secondary_hand: ReplayHand,

    current_stroke: Option<Vec<Vec3>>,
    strokes: Vec<StrokeData>,
    patches: Vec<PatchData>,
    added_patches: Vec<PatchData>,
    next_id: u32,
    surfacing: bool,

    grab: Option<GrabAnchor>,
    zoom: Option<ZoomAnchor>,
    canvas: CanvasTransform,
    canvas_visible: bool,
    plane: Option<Plane>,
    instructions: String,

    examples: Vec<String>,
    steps: Vec<StepContext>,
    step_index: usize,
    stats: ReplayStats,
}

impl ReplayHost {
    /// `steps` must not be empty.
    pub fn new(steps: Vec<StepContext>, examples: Vec<String>) -> Self {
        Self {
            journal: Journal::new(),
            frame: TraceFrame::default(),
            primary_hand: ReplayHand::default(),
            secondary_hand: ReplayHand::default(),
            current_stroke: None,
            strokes: Vec::new(),
            patches: Vec::new(),
            added_patches: Vec::new(),
            next_id: 0,
            surfacing: false,
            grab: None,
            zoom: None,
            canvas: CanvasTransform::default(),
            canvas_visible: true,
            plane: None,
            instructions: String::new(),
            examples,
            steps,
            step_index: 0,
            stats: ReplayStats::default(),
        }
    }

    /// Makes `frame`'s device readings current.
    pub fn set_frame(&mut self, frame: &TraceFrame) {
        self.journal.set_time(frame.t);
        self.frame = frame.clone();
    }

    /// Moves this frame's appearance cues into the journal.
    pub fn end_frame(&mut self) {
        for cue in self.primary_hand.cues.drain(..) {
            self.journal.record_with("hand.cue", json!({ "hand": "primary", "cue": cue }));
        }
        for cue in self.secondary_hand.cues.drain(..) {
            self.journal
                .record_with("hand.cue", json!({ "hand": "secondary", "cue": cue }));
        }
    }

    /// Patches created since the last call, for the patch-add notification.
    pub fn take_added_patches(&mut self) -> Vec<PatchData> {
        std::mem::take(&mut self.added_patches)
    }

    pub fn journal(&self) -> &Journal {
        &self.journal
    }

    pub fn into_journal(self) -> Journal {
        self.journal
    }

    pub fn stats(&self) -> ReplayStats {
        self.stats
    }

    pub fn strokes(&self) -> &[StrokeData] {
        &self.strokes
    }

    pub fn canvas_transform(&self) -> CanvasTransform {
        self.canvas
    }

    pub fn canvas_visible(&self) -> bool {
        self.canvas_visible
    }

    pub fn instructions_text(&self) -> &str {
        &self.instructions
    }

    pub fn step_label(&self) -> &str {
        &self.steps[self.step_index].label
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    fn distance_to_stroke(stroke: &StrokeData, position: Vec3) -> f32 {
        stroke
            .points
            .iter()
            .map(|p| p.distance(position))
            .fold(f32::INFINITY, f32::min)
    }
}

fn reflect(point: Vec3, plane: &Plane) -> Vec3 {
    point - 2.0 * (point - plane.point).dot(plane.normal) * plane.normal
}

// ============================================================================
// Tracking
// ============================================================================

impl TrackingSystem for ReplayHost {
    fn device_at(&self, node: TrackingNode) -> Option<DeviceReading> {
        self.frame.reading(node)
    }

    fn send_haptic(&mut self, node: TrackingNode, pulse: HapticPulse) {
        if self.frame.reading(node).is_none() {
            return;
        }
        self.journal.record_with(
            "haptic",
            json!({
                "node": node.as_str(),
                "amplitude": pulse.amplitude,
                "duration_secs": pulse.duration.as_secs_f32(),
            }),
        );
    }
}

// ============================================================================
// Actions
// ============================================================================

impl StrokeBuilder for ReplayHost {
    fn begin(&mut self, position: Vec3) {
        self.journal.record("strokes.begin");
        self.current_stroke = Some(vec![position]);
    }

    fn update(&mut self, position: Vec3, _rotation: Quat, _velocity: Vec3, _pressure: f32) {
        if let Some(points) = self.current_stroke.as_mut() {
            points.push(position);
        }
    }

    fn commit(&mut self, position: Vec3, mirror: bool) -> Option<StrokeData> {
        let mut points = self.current_stroke.take()?;
        points.push(position);

        if mirror {
            if let Some(plane) = self.plane {
                let reflected = points.iter().map(|p| reflect(*p, &plane)).collect();
                let id = self.next_id();
                self.strokes.push(StrokeData {
                    id,
                    points: reflected,
                });
            }
        }

        let stroke = StrokeData {
            id: self.next_id(),
            points,
        };
        self.journal.record_with(
            "strokes.commit",
            json!({ "id": stroke.id, "points": stroke.points.len(), "mirror": mirror }),
        );
        self.strokes.push(stroke.clone());
        Some(stroke)
    }

    fn set_beautification(&mut self, enabled: bool) {
        self.journal
            .record_with("strokes.beautification", json!({ "enabled": enabled }));
    }

    fn reinit(&mut self, surfacing: bool) {
        self.journal
            .record_with("strokes.reinit", json!({ "surfacing": surfacing }));
        self.current_stroke = None;
        self.strokes.clear();
        self.patches.clear();
        self.surfacing = surfacing;
    }

    fn switch_system(&mut self, surfacing: bool) {
        self.journal
            .record_with("strokes.switch_system", json!({ "surfacing": surfacing }));
        self.surfacing = surfacing;
    }
}

impl EraseCollaborator for ReplayHost {
    fn try_delete(&mut self, position: Vec3, _mirror: bool) -> Option<DeletedElement> {
        let nearest = self
            .strokes
            .iter()
            .enumerate()
            .map(|(i, s)| (i, Self::distance_to_stroke(s, position)))
            .filter(|(_, d)| *d <= ERASE_RADIUS)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i);

        let Some(index) = nearest else {
            self.journal.record("eraser.miss");
            return None;
        };

        let stroke = self.strokes.remove(index);
        self.patches.retain(|p| !p.stroke_ids.contains(&stroke.id));
        self.journal
            .record_with("eraser.delete", json!({ "id": stroke.id }));
        Some(DeletedElement {
            interaction: InteractionType::StrokeDelete,
            element_id: stroke.id,
        })
    }

    fn clear_all(&mut self) {
        self.journal.record("eraser.clear_all");
        self.current_stroke = None;
        self.strokes.clear();
        self.patches.clear();
    }
}

impl GrabCollaborator for ReplayHost {
    fn begin(&mut self, position: Vec3, rotation: Quat) {
        self.journal.record("grab.begin");
        self.grab = Some(GrabAnchor {
            position,
            rotation,
            canvas: self.canvas,
        });
    }

    fn update(&mut self, position: Vec3, rotation: Quat) {
        let Some(anchor) = self.grab else {
            return;
        };
        let delta = rotation * anchor.rotation.inverse();
        self.canvas.position = anchor.canvas.position + (position - anchor.position);
        self.canvas.rotation = (delta * anchor.canvas.rotation).normalize();
    }
}

impl ZoomCollaborator for ReplayHost {
    fn begin(&mut self, hands_distance: f32) {
        self.journal
            .record_with("zoom.begin", json!({ "distance": hands_distance }));
        self.zoom = Some(ZoomAnchor {
            distance: hands_distance,
            scale: self.canvas.scale,
        });
    }

    fn update(&mut self, _position: Vec3, hands_distance: f32) -> ZoomUpdate {
        let Some(anchor) = self.zoom else {
            return ZoomUpdate {
                success: false,
                scale: self.canvas.scale,
            };
        };
        if anchor.distance <= f32::EPSILON {
            return ZoomUpdate {
                success: false,
                scale: self.canvas.scale,
            };
        }

        let wanted = anchor.scale * hands_distance / anchor.distance;
        let scale = wanted.clamp(MIN_ZOOM, MAX_ZOOM);
        self.canvas.scale = scale;
        ZoomUpdate {
            success: scale == wanted,
            scale,
        }
    }

    fn reset_scale(&mut self) {
        self.journal.record("zoom.reset_scale");
        self.canvas.scale = 1.0;
    }
}

impl AddPatchCollaborator for ReplayHost {
    fn try_add(&mut self, position: Vec3, mirror: bool) -> bool {
        if !self.surfacing {
            self.journal.record("patches.unavailable");
            return false;
        }

        let mut nearby: Vec<(u32, f32)> = self
            .strokes
            .iter()
            .map(|s| (s.id, Self::distance_to_stroke(s, position)))
            .filter(|(_, d)| *d <= PATCH_RADIUS)
            .collect();
        if nearby.len() < PATCH_STROKES {
            self.journal
                .record_with("patches.miss", json!({ "nearby": nearby.len() }));
            return false;
        }

        nearby.sort_by(|a, b| a.1.total_cmp(&b.1));
        let patch = PatchData {
            id: self.next_id(),
            stroke_ids: nearby.iter().take(PATCH_STROKES).map(|(id, _)| *id).collect(),
        };
        self.journal.record_with(
            "patches.add",
            json!({ "id": patch.id, "strokes": patch.stroke_ids, "mirror": mirror }),
        );
        self.patches.push(patch.clone());
        self.added_patches.push(patch);
        true
    }
}

// ============================================================================
// Appearance
// ============================================================================

impl ZoomAppearance for ReplayHost {
    fn on_zoom_end(&mut self) {
        self.zoom = None;
    }
}

impl Grid for ReplayHost {
    fn toggle_state(&mut self) {
        self.journal.record("grid.toggle");
    }

    fn on_transform_end(&mut self) {
        self.grab = None;
    }
}

impl MirrorPlaneView for ReplayHost {
    fn set_plane(&mut self, plane: &Plane) {
        self.journal.record_with(
            "mirror.set_plane",
            json!({ "normal": plane.normal.to_array(), "point": plane.point.to_array() }),
        );
        self.plane = Some(*plane);
    }

    fn show(&mut self) {
        self.journal.record("mirror.show");
    }

    fn hide(&mut self) {
        self.journal.record("mirror.hide");
    }

    fn clear(&mut self) {
        self.plane = None;
    }
}

impl InstructionsDisplay for ReplayHost {
    fn set_controllers(&mut self, controller: ControllerType, handedness: Handedness) {
        self.journal.record_with(
            "instructions.controllers",
            json!({ "controller": controller.next_button(), "handedness": handedness.as_str() }),
        );
    }

    fn set_text(&mut self, text: &str, modal: bool) {
        if self.instructions != text {
            self.journal
                .record_with("instructions.text", json!({ "text": text, "modal": modal }));
            self.instructions = text.to_string();
        }
    }

    fn set_countdown(&mut self, limit: Option<Duration>) {
        self.journal.record_with(
            "countdown.set",
            json!({ "secs": limit.map(|d| d.as_secs_f32()) }),
        );
    }

    fn pause_countdown(&mut self) {
        self.journal.record("countdown.pause");
    }

    fn unpause_countdown(&mut self, paused_for: Duration) {
        self.journal.record_with(
            "countdown.unpause",
            json!({ "paused_secs": paused_for.as_secs_f32() }),
        );
    }
}

impl CanvasView for ReplayHost {
    fn set_visible(&mut self, visible: bool) {
        if self.canvas_visible != visible {
            self.journal
                .record_with("canvas.visible", json!({ "visible": visible }));
            self.canvas_visible = visible;
        }
    }

    fn reset_transform(&mut self) {
        self.journal.record("canvas.reset");
        self.canvas = CanvasTransform::default();
    }

    fn transform(&self) -> CanvasTransform {
        self.canvas
    }
}

impl ModelViewer for ReplayHost {
    fn set_model(&mut self, model: &SketchModel, origin: Vec3) {
        self.journal.record_with(
            "models.set",
            json!({ "model": model.name(), "origin": origin.to_array() }),
        );
    }

    fn show_example(&mut self, model: &SketchModel, _origin: Vec3) -> bool {
        let available = self.examples.iter().any(|name| name == model.name());
        if available {
            self.journal
                .record_with("models.show_example", json!({ "model": model.name() }));
        }
        available
    }

    fn hide_example(&mut self) {
        self.journal.record("models.hide_example");
    }
}

impl Exporter for ReplayHost {
    fn export_sketch(&mut self, name: &str) {
        self.stats.exports += 1;
        self.journal.record_with(
            "export.sketch",
            json!({ "name": name, "strokes": self.strokes.len() }),
        );
    }

    fn export_obj(&mut self, name: &str) {
        self.stats.exports += 1;
        self.journal.record_with(
            "export.obj",
            json!({ "name": name, "strokes": self.strokes.len(), "patches": self.patches.len() }),
        );
    }
}

// ============================================================================
// Study
// ============================================================================

impl ScenarioDriver for ReplayHost {
    fn current_step(&self) -> &StepContext {
        &self.steps[self.step_index]
    }

    fn end_step(&mut self) {
        let label = self.steps[self.step_index].label.clone();
        self.journal
            .record_with("scenario.end_step", json!({ "step": label }));
    }

    fn next_step(&mut self) -> bool {
        if self.step_index + 1 >= self.steps.len() {
            self.journal.record("scenario.finished");
            return false;
        }
        self.step_index += 1;
        let label = self.steps[self.step_index].label.clone();
        self.journal
            .record_with("scenario.next_step", json!({ "step": label }));
        true
    }

    fn redo_step(&mut self) {
        self.journal.record("scenario.redo_step");
    }
}

impl StepLog for ReplayHost {
    fn idle(&mut self, _ctx: &LogContext) {
        self.stats.idle_samples += 1;
    }

    fn delete(&mut self, ctx: &LogContext, interaction: InteractionType, element_id: u32) {
        self.stats.deletes += 1;
        self.journal.record_with(
            "log.delete",
            json!({ "interaction": interaction, "id": element_id, "context": ctx }),
        );
    }

    fn stroke_add(&mut self, ctx: &LogContext, stroke: &StrokeData) {
        self.stats.strokes += 1;
        self.journal.record_with(
            "log.stroke_add",
            json!({ "id": stroke.id, "context": ctx }),
        );
    }

    fn surface_add(&mut self, ctx: &LogContext, patch: &PatchData) {
        self.stats.patches += 1;
        self.journal.record_with(
            "log.surface_add",
            json!({ "id": patch.id, "context": ctx }),
        );
    }

    fn canvas_transform(&mut self, ctx: &LogContext) {
        self.stats.canvas_transforms += 1;
        self.journal
            .record_with("log.canvas_transform", json!({ "context": ctx }));
    }

    fn save_mid_step_and_continue(&mut self) {
        self.journal.record("log.save_mid_step");
    }
}

impl SketchHost for ReplayHost {
    fn tracking(&mut self) -> &mut dyn TrackingSystem {
        self
    }
    fn strokes(&mut self) -> &mut dyn StrokeBuilder {
        self
    }
    fn eraser(&mut self) -> &mut dyn EraseCollaborator {
        self
    }
    fn grab(&mut self) -> &mut dyn GrabCollaborator {
        self
    }
    fn zoom(&mut self) -> &mut dyn ZoomCollaborator {
        self
    }
    fn patches(&mut self) -> &mut dyn AddPatchCollaborator {
        self
    }
    fn hand_appearance(&mut self, hand: LogicalHand) -> &mut dyn HandAppearance {
        match hand {
            LogicalHand::Primary => &mut self.primary_hand,
            LogicalHand::Secondary => &mut self.secondary_hand,
        }
    }
    fn zoom_appearance(&mut self) -> &mut dyn ZoomAppearance {
        self
    }
    fn grid(&mut self) -> &mut dyn Grid {
        self
    }
    fn mirror_plane(&mut self) -> &mut dyn MirrorPlaneView {
        self
    }
    fn instructions(&mut self) -> &mut dyn InstructionsDisplay {
        self
    }
    fn canvas(&mut self) -> &mut dyn CanvasView {
        self
    }
    fn models(&mut self) -> &mut dyn ModelViewer {
        self
    }
    fn exporter(&mut self) -> &mut dyn Exporter {
        self
    }
    fn scenario(&mut self) -> &mut dyn ScenarioDriver {
        self
    }
    fn step_log(&mut self) -> &mut dyn StepLog {
        self
    }
}
