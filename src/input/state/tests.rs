use super::*;
use crate::config::{Config, Handedness, MirrorPlaneConfig, ModelConfig};
use crate::device::{DeviceReading, HapticPulse, TrackingNode, TrackingSystem};
use crate::host::*;
use crate::input::{ActionFrame, Button, ButtonSet, ModalState};
use crate::sketch::{InteractionMode, InteractionType, Plane, SketchModel, SketchSystem};
use glam::{Quat, Vec3};
use std::collections::HashMap;
use std::time::Duration;

// ============================================================================
// Recording host
// ============================================================================

#[derive(Default)]
struct HandRecorder {
    calls: Vec<&'static str>,
}

impl HandAppearance for HandRecorder {
    fn on_draw_start(&mut self) {
        self.calls.push("draw_start");
    }
    fn on_draw_end(&mut self) {
        self.calls.push("draw_end");
    }
    fn on_zoom_start(&mut self) {
        self.calls.push("zoom_start");
    }
    fn on_zoom_end(&mut self) {
        self.calls.push("zoom_end");
    }
    fn on_grab_start(&mut self) {
        self.calls.push("grab_start");
    }
    fn on_grab_end(&mut self) {
        self.calls.push("grab_end");
    }
    fn on_no_op(&mut self) {
        self.calls.push("no_op");
    }
    fn on_system_change(&mut self, _system: SketchSystem) {
        self.calls.push("system_change");
    }
}

struct MockHost {
    devices: HashMap<TrackingNode, DeviceReading>,
    haptics: Vec<(TrackingNode, HapticPulse)>,
    primary_hand: HandRecorder,
    secondary_hand: HandRecorder,
    calls: Vec<String>,
    log: Vec<&'static str>,
    stroke_updates: Vec<Vec3>,
    next_id: u32,
    delete_result: Option<DeletedElement>,
    patch_result: bool,
    example_available: bool,
    canvas_visible: bool,
    plane: Option<Plane>,
    text: String,
    steps: Vec<StepContext>,
    step_index: usize,
}

impl MockHost {
    fn new(steps: Vec<StepContext>) -> Self {
        let mut devices = HashMap::new();
        devices.insert(TrackingNode::Head, DeviceReading::at(Vec3::new(0.0, 1.7, 0.0)));
        devices.insert(
            TrackingNode::RightHand,
            DeviceReading::at(Vec3::new(0.3, 1.2, 0.4)),
        );
        devices.insert(
            TrackingNode::LeftHand,
            DeviceReading::at(Vec3::new(-0.3, 1.2, 0.4)),
        );
        Self {
            devices,
            haptics: Vec::new(),
            primary_hand: HandRecorder::default(),
            secondary_hand: HandRecorder::default(),
            calls: Vec::new(),
            log: Vec::new(),
            stroke_updates: Vec::new(),
            next_id: 0,
            delete_result: None,
            patch_result: false,
            example_available: false,
            canvas_visible: true,
            plane: None,
            text: String::new(),
            steps,
            step_index: 0,
        }
    }

    fn record(&mut self, call: impl Into<String>) {
        self.calls.push(call.into());
    }

    fn count(&self, call: &str) -> usize {
        self.calls.iter().filter(|c| c.as_str() == call).count()
    }

    fn logged(&self, entry: &str) -> usize {
        self.log.iter().filter(|e| **e == entry).count()
    }

    fn set_primary_buttons(&mut self, held: bool) {
        for node in [TrackingNode::LeftHand, TrackingNode::RightHand] {
            if let Some(reading) = self.devices.get_mut(&node) {
                reading.primary_button = held;
            }
        }
    }
}

impl TrackingSystem for MockHost {
    fn device_at(&self, node: TrackingNode) -> Option<DeviceReading> {
        self.devices.get(&node).copied()
    }

    fn send_haptic(&mut self, node: TrackingNode, pulse: HapticPulse) {
        if self.devices.contains_key(&node) {
            self.haptics.push((node, pulse));
        }
    }
}

impl StrokeBuilder for MockHost {
    fn begin(&mut self, _position: Vec3) {
        self.record("strokes.begin");
        self.stroke_updates.clear();
    }
    fn update(&mut self, position: Vec3, _rotation: Quat, _velocity: Vec3, _pressure: f32) {
        self.stroke_updates.push(position);
    }
    fn commit(&mut self, _position: Vec3, mirror: bool) -> Option<StrokeData> {
        self.record(format!("strokes.commit(mirror={mirror})"));
        self.next_id += 1;
        Some(StrokeData {
            id: self.next_id,
            points: self.stroke_updates.clone(),
        })
    }
    fn set_beautification(&mut self, enabled: bool) {
        self.record(format!("strokes.beautification({enabled})"));
    }
    fn reinit(&mut self, _surfacing: bool) {
        self.record("strokes.reinit");
    }
    fn switch_system(&mut self, surfacing: bool) {
        self.record(format!("strokes.switch_system({surfacing})"));
    }
}

impl EraseCollaborator for MockHost {
    fn try_delete(&mut self, _position: Vec3, _mirror: bool) -> Option<DeletedElement> {
        self.record("eraser.try_delete");
        self.delete_result
    }
    fn clear_all(&mut self) {
        self.record("eraser.clear_all");
    }
}

impl GrabCollaborator for MockHost {
    fn begin(&mut self, _position: Vec3, _rotation: Quat) {
        self.record("grab.begin");
    }
    fn update(&mut self, _position: Vec3, _rotation: Quat) {
        self.record("grab.update");
    }
}

impl ZoomCollaborator for MockHost {
    fn begin(&mut self, _hands_distance: f32) {
        self.record("zoom.begin");
    }
    fn update(&mut self, _position: Vec3, _hands_distance: f32) -> ZoomUpdate {
        self.record("zoom.update");
        ZoomUpdate {
            success: true,
            scale: 1.0,
        }
    }
    fn reset_scale(&mut self) {
        self.record("zoom.reset_scale");
    }
}

impl AddPatchCollaborator for MockHost {
    fn try_add(&mut self, _position: Vec3, _mirror: bool) -> bool {
        self.record("patches.try_add");
        self.patch_result
    }
}

impl ZoomAppearance for MockHost {}

impl Grid for MockHost {
    fn refresh(&mut self, _hand_position: Vec3) {
        self.record("grid.refresh");
    }
    fn toggle_state(&mut self) {
        self.record("grid.toggle");
    }
}

impl MirrorPlaneView for MockHost {
    fn set_plane(&mut self, plane: &Plane) {
        self.plane = Some(*plane);
    }
    fn show(&mut self) {
        self.record("mirror.show");
    }
    fn hide(&mut self) {
        self.record("mirror.hide");
    }
}

impl InstructionsDisplay for MockHost {
    fn set_text(&mut self, text: &str, _modal: bool) {
        self.text = text.to_string();
    }
    fn set_countdown(&mut self, limit: Option<Duration>) {
        match limit {
            Some(limit) => self.record(format!("countdown.set({}s)", limit.as_secs())),
            None => self.record("countdown.set(none)"),
        }
    }
    fn pause_countdown(&mut self) {
        self.record("countdown.pause");
    }
    fn unpause_countdown(&mut self, paused_for: Duration) {
        self.record(format!("countdown.unpause({}ms)", paused_for.as_millis()));
    }
}

impl CanvasView for MockHost {
    fn set_visible(&mut self, visible: bool) {
        self.canvas_visible = visible;
    }
    fn reset_transform(&mut self) {
        self.record("canvas.reset");
    }
    fn transform(&self) -> CanvasTransform {
        CanvasTransform::default()
    }
}

impl ModelViewer for MockHost {
    fn set_model(&mut self, model: &SketchModel, _origin: Vec3) {
        self.record(format!("models.set({model})"));
    }
    fn show_example(&mut self, _model: &SketchModel, _origin: Vec3) -> bool {
        self.record("models.show_example");
        self.example_available
    }
    fn hide_example(&mut self) {
        self.record("models.hide_example");
    }
}

impl Exporter for MockHost {
    fn export_sketch(&mut self, name: &str) {
        self.record(format!("export_sketch({name})"));
    }
    fn export_obj(&mut self, name: &str) {
        self.record(format!("export_obj({name})"));
    }
}

impl ScenarioDriver for MockHost {
    fn current_step(&self) -> &StepContext {
        &self.steps[self.step_index]
    }
    fn end_step(&mut self) {
        self.record("scenario.end_step");
    }
    fn next_step(&mut self) -> bool {
        if self.step_index + 1 < self.steps.len() {
            self.step_index += 1;
            true
        } else {
            false
        }
    }
    fn redo_step(&mut self) {
        self.record("scenario.redo_step");
    }
}

impl StepLog for MockHost {
    fn idle(&mut self, _ctx: &LogContext) {
        self.log.push("idle");
    }
    fn delete(&mut self, _ctx: &LogContext, _interaction: InteractionType, _element_id: u32) {
        self.log.push("delete");
    }
    fn stroke_add(&mut self, _ctx: &LogContext, _stroke: &StrokeData) {
        self.log.push("stroke_add");
    }
    fn surface_add(&mut self, _ctx: &LogContext, _patch: &PatchData) {
        self.log.push("surface_add");
    }
    fn canvas_transform(&mut self, _ctx: &LogContext) {
        self.log.push("canvas_transform");
    }
    fn save_mid_step_and_continue(&mut self) {
        self.log.push("save_mid_step");
    }
}

impl SketchHost for MockHost {
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
    fn hand_appearance(&mut self, hand: crate::device::LogicalHand) -> &mut dyn HandAppearance {
        match hand {
            crate::device::LogicalHand::Primary => &mut self.primary_hand,
            crate::device::LogicalHand::Secondary => &mut self.secondary_hand,
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

// ============================================================================
// Helpers
// ============================================================================

fn ms(millis: u64) -> Duration {
    Duration::from_millis(millis)
}

fn step(label: &str, mode: InteractionMode, model: &str) -> StepContext {
    StepContext {
        label: label.to_string(),
        time_limit_secs: Some(300.0),
        break_after_step: false,
        show_example_before: false,
        mode,
        system: SketchSystem::SnapSurface,
        model: SketchModel::new(model),
    }
}

fn free_step() -> StepContext {
    StepContext {
        system: SketchSystem::Baseline,
        ..step("free", InteractionMode::FreeCreation, "")
    }
}

fn chair_config() -> Config {
    let mut config = Config::default();
    config.models.insert(
        "chair".into(),
        ModelConfig {
            display_name: Some("Chair".into()),
            mirror: Some(MirrorPlaneConfig {
                normal: [1.0, 0.0, 0.0],
                point: [0.0, 0.0, 0.0],
            }),
        },
    );
    config
}

fn controller_with(steps: Vec<StepContext>, config: Config) -> InteractionController<MockHost> {
    let mut controller = InteractionController::new(MockHost::new(steps), config);
    controller.on_step_change(Duration::ZERO);
    controller
}

fn controller(steps: Vec<StepContext>) -> InteractionController<MockHost> {
    controller_with(steps, chair_config())
}

fn press(button: Button) -> ActionFrame {
    ActionFrame::holding(button)
}

fn idle() -> ActionFrame {
    ActionFrame::default()
}

/// Presses StudyNext at `at` and releases it on the next tick.
fn tap_next(controller: &mut InteractionController<MockHost>, at: u64) {
    controller.tick(ms(at), &press(Button::StudyNext));
    controller.tick(ms(at + 50), &idle());
}

// ============================================================================
// Drawing
// ============================================================================

#[test]
fn draw_commits_one_stroke_on_release() {
    let mut controller = controller(vec![free_step()]);

    controller.tick(ms(0), &ActionFrame::with_pressure(0.3));
    assert_eq!(controller.state(), InteractionState::Drawing);
    controller.tick(ms(100), &ActionFrame::with_pressure(0.3));
    controller.tick(ms(200), &ActionFrame::with_pressure(0.3));
    controller.tick(ms(300), &ActionFrame::with_pressure(0.0));

    assert_eq!(controller.state(), InteractionState::Idle);
    let host = controller.host();
    assert_eq!(host.count("strokes.begin"), 1);
    assert_eq!(host.stroke_updates.len(), 2);
    assert_eq!(host.count("strokes.commit(mirror=false)"), 1);
    assert_eq!(host.logged("stroke_add"), 1);
    assert_eq!(host.primary_hand.calls, vec!["system_change", "draw_start", "draw_end"]);
}

#[test]
fn pressure_at_threshold_does_not_draw() {
    let mut controller = controller(vec![free_step()]);
    controller.tick(ms(0), &ActionFrame::with_pressure(0.1));
    assert_eq!(controller.state(), InteractionState::Idle);
    assert_eq!(controller.host().count("strokes.begin"), 0);
}

#[test]
fn vanished_device_feeds_zero_pose_and_keeps_drawing() {
    let mut controller = controller(vec![free_step()]);
    controller.tick(ms(0), &ActionFrame::with_pressure(0.3));

    controller.host_mut().devices.remove(&TrackingNode::RightHand);
    controller.tick(ms(100), &ActionFrame::with_pressure(0.3));
    assert_eq!(controller.state(), InteractionState::Drawing);
    assert_eq!(controller.host().stroke_updates, vec![Vec3::ZERO]);

    controller
        .host_mut()
        .devices
        .insert(TrackingNode::RightHand, DeviceReading::at(Vec3::ONE));
    controller.tick(ms(200), &ActionFrame::with_pressure(0.3));
    assert_eq!(controller.host().stroke_updates, vec![Vec3::ZERO, Vec3::ONE]);
}

#[test]
fn untracked_primary_hand_cannot_start_a_stroke() {
    let mut controller = controller(vec![free_step()]);
    controller.host_mut().devices.remove(&TrackingNode::RightHand);

    controller.tick(ms(0), &ActionFrame::with_pressure(0.3));
    assert_eq!(controller.state(), InteractionState::Idle);
    assert_eq!(controller.host().count("strokes.begin"), 0);

    controller
        .host_mut()
        .devices
        .insert(TrackingNode::RightHand, DeviceReading::at(Vec3::ONE));
    controller.tick(ms(100), &ActionFrame::with_pressure(0.3));
    assert_eq!(controller.state(), InteractionState::Drawing);
    assert_eq!(controller.host().count("strokes.begin"), 1);
}

#[test]
fn stroke_after_commit_starts_fresh() {
    let mut controller = controller(vec![free_step()]);

    controller.tick(ms(0), &ActionFrame::with_pressure(0.3));
    controller.tick(ms(100), &ActionFrame::with_pressure(0.3));
    controller.tick(ms(200), &ActionFrame::with_pressure(0.0));
    assert_eq!(controller.state(), InteractionState::Idle);

    controller
        .host_mut()
        .devices
        .insert(TrackingNode::RightHand, DeviceReading::at(Vec3::ONE));
    controller.tick(ms(300), &ActionFrame::with_pressure(0.3));
    assert_eq!(controller.state(), InteractionState::Drawing);
    controller.tick(ms(400), &ActionFrame::with_pressure(0.3));
    controller.tick(ms(500), &ActionFrame::with_pressure(0.0));

    let host = controller.host();
    assert_eq!(host.count("strokes.begin"), 2);
    assert_eq!(host.count("strokes.commit(mirror=false)"), 2);
    assert_eq!(host.logged("stroke_add"), 2);
    assert_eq!(host.stroke_updates, vec![Vec3::ONE]);
}

#[test]
fn oversized_time_limit_leaves_step_untimed() {
    let mut timed = free_step();
    timed.time_limit_secs = Some(1e30);
    let controller = controller(vec![timed]);
    assert_eq!(controller.host().count("countdown.set(none)"), 1);
}

#[test]
fn first_matching_trigger_wins() {
    let mut controller = controller(vec![free_step()]);
    let frame = ActionFrame {
        buttons: ButtonSet::empty().with(Button::Zoom).with(Button::Erase),
        ..ActionFrame::default()
    };
    controller.tick(ms(0), &frame);

    assert_eq!(controller.state(), InteractionState::Zooming);
    assert_eq!(controller.host().count("eraser.try_delete"), 0);
}

#[test]
fn idle_samples_are_logged_every_two_seconds() {
    let mut controller = controller(vec![free_step()]);
    for i in 0..=10 {
        controller.tick(ms(i * 500), &idle());
    }
    assert_eq!(controller.host().logged("idle"), 2);
}

// ============================================================================
// Grab and zoom
// ============================================================================

#[test]
fn zoom_lasts_while_button_held() {
    let mut controller = controller(vec![free_step()]);
    controller.tick(ms(0), &press(Button::Zoom));
    controller.tick(ms(100), &press(Button::Zoom));
    controller.tick(ms(200), &press(Button::Zoom));
    assert_eq!(controller.state(), InteractionState::Zooming);

    controller.tick(ms(300), &idle());
    assert_eq!(controller.state(), InteractionState::Idle);

    let host = controller.host();
    assert_eq!(host.count("zoom.begin"), 1);
    assert_eq!(host.count("zoom.update"), 2);
    assert_eq!(host.logged("canvas_transform"), 1);
    assert_eq!(host.secondary_hand.calls, vec!["zoom_start", "zoom_end"]);
}

#[test]
fn grab_ends_on_secondary_primary_button() {
    let mut controller = controller(vec![free_step()]);
    controller.tick(ms(0), &press(Button::Grab));
    controller.tick(ms(100), &press(Button::Grab));
    assert_eq!(controller.state(), InteractionState::Grabbing);

    controller
        .host_mut()
        .devices
        .get_mut(&TrackingNode::LeftHand)
        .unwrap()
        .primary_button = true;
    controller.tick(ms(200), &idle());

    assert_eq!(controller.state(), InteractionState::Idle);
    let host = controller.host();
    assert_eq!(host.count("grab.update"), 1);
    assert_eq!(host.logged("canvas_transform"), 1);
    assert_eq!(host.secondary_hand.calls, vec!["grab_start", "grab_end"]);
}

// ============================================================================
// One-shot actions
// ============================================================================

#[test]
fn add_patch_pulses_primary_or_shows_no_op() {
    let mut controller = controller(vec![free_step()]);
    controller.tick(ms(0), &press(Button::AddPatch));
    assert_eq!(controller.host().primary_hand.calls.last(), Some(&"no_op"));
    assert!(controller.host().haptics.is_empty());

    controller.host_mut().patch_result = true;
    controller.tick(ms(100), &idle());
    controller.tick(ms(200), &press(Button::AddPatch));
    let (node, pulse) = controller.host().haptics[0];
    assert_eq!(node, TrackingNode::RightHand);
    assert!((pulse.duration.as_secs_f32() - 0.1).abs() < 1e-6);
    assert_eq!(controller.state(), InteractionState::Idle);
}

#[test]
fn erase_pulses_secondary_and_logs_delete() {
    let mut controller = controller(vec![free_step()]);
    controller.tick(ms(0), &press(Button::Erase));
    assert_eq!(controller.host().primary_hand.calls.last(), Some(&"no_op"));
    assert_eq!(controller.host().logged("delete"), 0);

    controller.host_mut().delete_result = Some(DeletedElement {
        interaction: InteractionType::StrokeDelete,
        element_id: 4,
    });
    controller.tick(ms(100), &idle());
    controller.tick(ms(200), &press(Button::Erase));
    assert_eq!(controller.host().logged("delete"), 1);
    assert_eq!(controller.host().haptics[0].0, TrackingNode::LeftHand);
}

#[test]
fn left_handed_binding_swaps_haptic_targets() {
    let mut config = chair_config();
    config.hands.handedness = Handedness::Left;
    let mut controller = controller_with(vec![free_step()], config);
    controller.host_mut().patch_result = true;

    controller.tick(ms(0), &press(Button::AddPatch));
    assert_eq!(controller.host().haptics[0].0, TrackingNode::LeftHand);
}

#[test]
fn system_switch_only_in_free_creation() {
    let mut controller = controller(vec![free_step()]);
    assert_eq!(controller.system(), SketchSystem::Baseline);

    controller.tick(ms(0), &press(Button::SwitchSystem));
    assert_eq!(controller.system(), SketchSystem::SnapSurface);
    let host = controller.host();
    assert_eq!(host.count("strokes.switch_system(true)"), 1);
    let (node, pulse) = host.haptics[0];
    assert_eq!(node, TrackingNode::LeftHand);
    assert_eq!(pulse.duration, Duration::from_secs(1));

    controller.tick(ms(100), &idle());
    controller.tick(ms(200), &press(Button::SwitchSystem));
    assert_eq!(controller.system(), SketchSystem::Baseline);

    let mut study = controller_with(
        vec![step("t1", InteractionMode::Observational, "chair")],
        chair_config(),
    );
    study.tick(ms(0), &press(Button::SwitchSystem));
    assert_eq!(study.system(), SketchSystem::SnapSurface);
    assert_eq!(study.host().count("strokes.switch_system(true)"), 0);
}

// ============================================================================
// Mirror
// ============================================================================

#[test]
fn model_with_plane_enables_mirroring() {
    let mut controller = controller(vec![step("t1", InteractionMode::Observational, "chair")]);
    assert!(controller.mirror().available());
    assert!(controller.mirror().active());

    let plane = controller.host().plane.unwrap();
    assert_eq!(plane.normal, Vec3::X);
    assert!((plane.point - Vec3::new(0.0, 1.0, 0.75)).length() < 1e-5);

    controller.tick(ms(0), &press(Button::ToggleMirror));
    assert!(!controller.mirror().active());
    assert_eq!(controller.host().count("mirror.hide"), 1);

    controller.tick(ms(100), &ActionFrame::with_pressure(0.5));
    controller.tick(ms(200), &idle());
    assert_eq!(controller.host().count("strokes.commit(mirror=false)"), 1);
}

#[test]
fn model_without_plane_ignores_mirror_toggle() {
    let mut controller = controller(vec![step("t1", InteractionMode::Observational, "lamp")]);
    assert!(!controller.mirror().available());
    assert!(!controller.mirror().active());

    let shows = controller.host().count("mirror.show");
    controller.tick(ms(0), &press(Button::ToggleMirror));
    assert!(!controller.mirror().active());
    assert_eq!(controller.host().count("mirror.show"), shows);
}

#[test]
fn model_shown_only_outside_free_creation() {
    let study = controller(vec![step("t1", InteractionMode::Memory, "chair")]);
    assert_eq!(study.host().count("models.set(chair)"), 1);
    assert!(study.host().text.ends_with("Model: Chair"));

    let free = controller(vec![free_step()]);
    assert!(!free.host().calls.iter().any(|c| c.starts_with("models.set")));
}

// ============================================================================
// Modal workflow
// ============================================================================

#[test]
fn end_step_confirmation_is_debounced() {
    let mut controller = controller(vec![
        step("t1", InteractionMode::Observational, "chair"),
        step("t2", InteractionMode::Observational, "lamp"),
    ]);

    tap_next(&mut controller, 10_000);
    assert_eq!(controller.modal_state(), Some(ModalState::ConfirmEndStep));
    assert!(!controller.host().canvas_visible);
    assert!(controller.host().text.contains("Press MENU"));

    // Inside the debounce window
    tap_next(&mut controller, 10_200);
    assert_eq!(controller.modal_state(), Some(ModalState::ConfirmEndStep));

    tap_next(&mut controller, 10_600);
    assert_eq!(controller.modal_state(), None);

    let host = controller.host();
    assert_eq!(host.count("scenario.end_step"), 1);
    assert_eq!(host.count("export_obj(t1)"), 1);
    assert_eq!(host.count("eraser.clear_all"), 1);
    assert_eq!(host.step_index, 1);
    assert!(host.canvas_visible);
    assert!(!controller.mirror().available());
}

#[test]
fn trigger_cancels_confirmation_without_drawing() {
    let mut controller = controller(vec![step("t1", InteractionMode::Observational, "chair")]);
    tap_next(&mut controller, 1_000);

    controller.tick(ms(1_600), &ActionFrame::with_pressure(0.8));
    assert_eq!(controller.modal_state(), None);
    assert!(controller.host().canvas_visible);
    assert_eq!(controller.host().count("countdown.unpause(600ms)"), 1);

    controller.tick(ms(1_700), &ActionFrame::with_pressure(0.8));
    assert_eq!(controller.state(), InteractionState::Idle);

    controller.tick(ms(1_800), &idle());
    controller.tick(ms(1_900), &ActionFrame::with_pressure(0.3));
    assert_eq!(controller.state(), InteractionState::Drawing);
}

#[test]
fn modal_state_suspends_dispatch() {
    let mut controller = controller(vec![step("t1", InteractionMode::Observational, "chair")]);
    tap_next(&mut controller, 0);
    let refreshes = controller.host().count("grid.refresh");

    controller.tick(ms(100), &ActionFrame::with_pressure(0.3));
    controller.tick(ms(200), &press(Button::Erase));
    assert_eq!(controller.state(), InteractionState::Idle);
    assert_eq!(controller.host().count("strokes.begin"), 0);
    assert_eq!(controller.host().count("eraser.try_delete"), 0);
    assert_eq!(controller.host().count("grid.refresh"), refreshes);
}

#[test]
fn study_next_ignored_mid_gesture() {
    let mut controller = controller(vec![step("t1", InteractionMode::Observational, "chair")]);
    controller.tick(ms(0), &ActionFrame::with_pressure(0.3));

    let frame = ActionFrame {
        pressure: 0.3,
        buttons: ButtonSet::empty().with(Button::StudyNext),
        ..ActionFrame::default()
    };
    controller.tick(ms(100), &frame);
    assert_eq!(controller.state(), InteractionState::Drawing);
    assert_eq!(controller.modal_state(), None);
}

#[test]
fn break_then_confirm_starts_next_step() {
    let mut first = step("t1", InteractionMode::Observational, "chair");
    first.break_after_step = true;
    let mut controller = controller(vec![first, step("t2", InteractionMode::Memory, "chair")]);

    tap_next(&mut controller, 1_000);
    tap_next(&mut controller, 1_600);
    assert_eq!(controller.modal_state(), Some(ModalState::Break));
    assert!(!controller.host().canvas_visible);
    assert_eq!(controller.host().step_index, 0);
    assert_eq!(controller.host().count("countdown.pause"), 2);

    // Trigger does nothing during a break
    controller.tick(ms(2_200), &ActionFrame::with_pressure(0.9));
    assert_eq!(controller.modal_state(), Some(ModalState::Break));
    controller.tick(ms(2_250), &idle());

    tap_next(&mut controller, 2_300);
    assert_eq!(controller.modal_state(), Some(ModalState::ConfirmBreakEnd));

    tap_next(&mut controller, 2_400);
    assert_eq!(controller.modal_state(), Some(ModalState::ConfirmBreakEnd));

    tap_next(&mut controller, 2_900);
    assert_eq!(controller.modal_state(), None);
    assert_eq!(controller.host().step_index, 1);
    assert_eq!(controller.mode(), InteractionMode::Memory);
    assert!(controller.host().canvas_visible);
}

#[test]
fn last_step_finishes_study() {
    let mut controller = controller(vec![step("t1", InteractionMode::Observational, "chair")]);
    tap_next(&mut controller, 0);
    tap_next(&mut controller, 600);
    assert_eq!(controller.modal_state(), Some(ModalState::FinishStudy));
    assert!(controller.host().text.contains("completed all tasks"));

    controller.host_mut().set_primary_buttons(true);
    controller.tick(ms(1_200), &idle());
    assert!(!controller.should_exit());

    controller.host_mut().set_primary_buttons(false);
    controller.tick(ms(1_300), &idle());
    assert!(controller.should_exit());
    assert_eq!(controller.modal_state(), None);
}

#[test]
fn free_creation_end_step_restarts_step() {
    let mut controller = controller(vec![free_step()]);
    tap_next(&mut controller, 0);
    tap_next(&mut controller, 600);

    assert_eq!(controller.modal_state(), None);
    let host = controller.host();
    assert_eq!(host.count("export_sketch(free)"), 1);
    assert_eq!(host.count("scenario.end_step"), 1);
    assert_eq!(host.count("scenario.redo_step"), 1);
    assert_eq!(host.count("strokes.reinit"), 2);
    assert_eq!(host.count("export_obj(free)"), 0);
}

#[test]
fn example_is_viewed_before_step() {
    let mut first = step("t1", InteractionMode::Memory, "chair");
    first.show_example_before = true;
    let mut host = MockHost::new(vec![first]);
    host.example_available = true;
    let mut controller = InteractionController::new(host, chair_config());
    controller.on_step_change(Duration::ZERO);

    assert_eq!(controller.modal_state(), Some(ModalState::ViewExample));
    assert!(controller.host().text.contains("example sketch"));

    controller.host_mut().set_primary_buttons(true);
    controller.tick(ms(600), &idle());
    assert_eq!(controller.modal_state(), Some(ModalState::ViewExample));

    controller.host_mut().set_primary_buttons(false);
    controller.tick(ms(700), &idle());
    assert_eq!(controller.modal_state(), None);
    assert_eq!(controller.host().count("models.hide_example"), 1);
    assert_eq!(controller.host().count("countdown.unpause(700ms)"), 1);
    assert!(controller.host().text.ends_with("Model: Chair"));
}

#[test]
fn missing_example_skips_view() {
    let mut first = step("t1", InteractionMode::Memory, "chair");
    first.show_example_before = true;
    let controller = controller(vec![first]);
    assert_eq!(controller.host().count("models.show_example"), 1);
    assert_eq!(controller.modal_state(), None);
}

#[test]
fn step_change_mid_gesture_defers_example() {
    let mut first = step("t1", InteractionMode::Memory, "chair");
    first.show_example_before = true;
    let mut controller = controller(vec![first]);
    controller.host_mut().example_available = true;

    controller.tick(ms(0), &ActionFrame::with_pressure(0.3));
    controller.on_step_change(ms(50));
    assert_eq!(controller.modal_state(), None);
    assert_eq!(controller.pending_modal(), Some(ModalState::ViewExample));

    controller.tick(ms(100), &idle());
    assert_eq!(controller.state(), InteractionState::Idle);
    controller.tick(ms(200), &idle());
    assert_eq!(controller.modal_state(), Some(ModalState::ViewExample));
    assert_eq!(controller.pending_modal(), None);
}

// ============================================================================
// Shortcuts and patch notifications
// ============================================================================

#[test]
fn quit_only_in_free_creation() {
    let mut study = controller(vec![step("t1", InteractionMode::Observational, "chair")]);
    study.tick(ms(0), &press(Button::Quit));
    assert!(!study.should_exit());

    let mut free = controller(vec![free_step()]);
    free.tick(ms(0), &press(Button::Quit));
    assert!(free.should_exit());
}

#[test]
fn save_shortcut_exports_and_saves_log() {
    let mut controller = controller(vec![step("t1", InteractionMode::Observational, "chair")]);
    controller.tick(ms(0), &ActionFrame::with_pressure(0.3));
    let frame = ActionFrame {
        pressure: 0.3,
        buttons: ButtonSet::empty().with(Button::SaveStudyLog),
        ..ActionFrame::default()
    };
    controller.tick(ms(100), &frame);

    assert_eq!(controller.state(), InteractionState::Drawing);
    assert_eq!(controller.host().count("export_sketch(t1)"), 1);
    assert_eq!(controller.host().logged("save_mid_step"), 1);
}

#[test]
fn patch_notification_is_logged() {
    let mut controller = controller(vec![free_step()]);
    controller.on_patch_add(&PatchData {
        id: 1,
        stroke_ids: vec![1, 2, 3],
    });
    assert_eq!(controller.host().logged("surface_add"), 1);
}
