//! Interaction controller and the per-tick loop.

use crate::config::Config;
use crate::device::{HandBinding, LogicalHand, PoseSampler, PoseSnapshot};
use crate::host::{LogContext, SketchHost};
use crate::input::buttons::{Button, ButtonEdges};
use crate::input::frame::ActionFrame;
use crate::input::modal::{ModalInputs, ModalState, ModalTimings, ModalWorkflow};
use crate::sketch::{InteractionMode, MirrorState, SketchModel, SketchSystem};
use glam::Vec3;
use std::time::Duration;

/// Primary interaction state.
///
/// Exactly one is current at any time. Continuous gestures (drawing,
/// grabbing, zooming) last until their own end condition; while one is in
/// flight no other gesture or modal state can start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InteractionState {
    /// Waiting for input; the only state one-shot actions fire from
    #[default]
    Idle,
    /// Trigger held past the draw threshold, feeding the stroke builder
    Drawing,
    /// Moving the canvas with the secondary hand
    Grabbing,
    /// Scaling the canvas by the distance between both hands
    Zooming,
}

impl InteractionState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Drawing => "drawing",
            Self::Grabbing => "grabbing",
            Self::Zooming => "zooming",
        }
    }
}

/// Two-handed sketching controller.
///
/// Owns every collaborator through `H` and is driven by [`tick`](Self::tick)
/// once per frame with the current clock value and action-layer inputs.
/// All handlers are infallible: collaborator failures surface as feedback
/// cues, never as errors.
pub struct InteractionController<H: SketchHost> {
    pub(super) host: H,
    pub(super) config: Config,
    pub(super) timings: ModalTimings,
    pub(super) sampler: PoseSampler,
    pub(super) edges: ButtonEdges,
    pub(super) state: InteractionState,
    pub(super) modal: ModalWorkflow,
    pub(super) mirror: MirrorState,
    pub(super) system: SketchSystem,
    pub(super) mode: InteractionMode,
    pub(super) model: SketchModel,
    /// Scene origin of the current model, example and mirror plane
    pub(super) origin: Vec3,
    /// Clock value of the last idle log sample
    pub(super) last_idle_record: Duration,
    /// False after a trigger-cancelled confirmation until the trigger is let go
    pub(super) draw_armed: bool,
    pub(super) should_exit: bool,
}

impl<H: SketchHost> InteractionController<H> {
    /// Creates a controller, resolving the hand binding once.
    ///
    /// Call [`on_step_change`](Self::on_step_change) afterwards to apply the
    /// scenario's first step.
    pub fn new(mut host: H, config: Config) -> Self {
        let binding = HandBinding::resolve(config.hands.handedness, host.tracking());
        host.instructions()
            .set_controllers(config.hands.controller_type, config.hands.handedness);

        let timings = config.modal_timings();
        Self {
            host,
            config,
            timings,
            sampler: PoseSampler::new(binding),
            edges: ButtonEdges::new(),
            state: InteractionState::Idle,
            modal: ModalWorkflow::new(),
            mirror: MirrorState::new(),
            system: SketchSystem::default(),
            mode: InteractionMode::default(),
            model: SketchModel::default(),
            origin: Vec3::ZERO,
            last_idle_record: Duration::ZERO,
            draw_armed: true,
            should_exit: false,
        }
    }

    /// Advances the controller by one frame.
    ///
    /// While a modal state is active only its exit condition is checked;
    /// otherwise the interaction dispatcher runs followed by the step and
    /// file shortcuts.
    pub fn tick(&mut self, now: Duration, actions: &ActionFrame) {
        self.edges.update(actions.buttons);
        let snapshot = self.sampler.sample(self.host.tracking(), actions);

        if snapshot.pressure <= self.config.interaction.draw_threshold {
            self.draw_armed = true;
        }

        if self.modal.is_active() {
            self.tick_modal(now, &snapshot);
            return;
        }

        let idle = self.state == InteractionState::Idle;
        if let Some(state) = self.modal.activate_pending(now, idle) {
            self.enter_modal(state);
            return;
        }

        self.dispatch(now, &snapshot);

        if self.state == InteractionState::Idle && self.edges.pressed(Button::StudyNext) {
            self.request_modal(ModalState::ConfirmEndStep, now);
        }
        self.handle_shortcuts();
    }

    fn tick_modal(&mut self, now: Duration, snapshot: &PoseSnapshot) {
        let inputs = ModalInputs {
            confirm_pressed: self.edges.pressed(Button::StudyNext),
            pressure: snapshot.pressure,
            both_primary_held: snapshot.primary_button(LogicalHand::Primary)
                && snapshot.primary_button(LogicalHand::Secondary),
        };
        if let Some((active, outcome)) = self.modal.poll(now, &inputs, &self.timings) {
            self.exit_modal(active, outcome, now);
        }
    }

    fn handle_shortcuts(&mut self) {
        if self.edges.pressed(Button::SaveStudyLog) {
            let label = self.host.scenario().current_step().label.clone();
            log::info!("Saving study log mid-step ({label})");
            self.host.exporter().export_sketch(&label);
            self.host.step_log().save_mid_step_and_continue();
        }

        if self.edges.pressed(Button::ExportSketch) {
            let label = self.host.scenario().current_step().label.clone();
            self.host.exporter().export_sketch(&label);
        }

        if self.edges.pressed(Button::Quit) && self.mode == InteractionMode::FreeCreation {
            log::info!("Quit requested");
            self.should_exit = true;
        }
    }

    /// Shared fields of a step log entry for this tick.
    pub(super) fn log_context(&mut self, snapshot: &PoseSnapshot) -> LogContext {
        LogContext {
            head: snapshot.head(),
            hand_position: snapshot.position(LogicalHand::Primary),
            canvas: self.host.canvas().transform(),
            mirror: self.mirror.active(),
        }
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn into_host(self) -> H {
        self.host
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn binding(&self) -> &HandBinding {
        self.sampler.binding()
    }

    pub fn state(&self) -> InteractionState {
        self.state
    }

    /// Active modal state, if any.
    pub fn modal_state(&self) -> Option<ModalState> {
        self.modal.state()
    }

    /// Modal state parked until the controller is idle, if any.
    pub fn pending_modal(&self) -> Option<ModalState> {
        self.modal.pending()
    }

    pub fn mirror(&self) -> &MirrorState {
        &self.mirror
    }

    pub fn system(&self) -> SketchSystem {
        self.system
    }

    pub fn mode(&self) -> InteractionMode {
        self.mode
    }

    pub fn model(&self) -> &SketchModel {
        &self.model
    }

    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Whether quitting was requested or the study is over.
    pub fn should_exit(&self) -> bool {
        self.should_exit
    }
}
