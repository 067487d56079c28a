use crate::device::LogicalHand;
use crate::host::{LogContext, PatchData, SketchHost, StepContext};
use crate::input::frame::ActionFrame;
use crate::input::modal::ModalState;
use crate::prompts;
use crate::sketch::{InteractionMode, SketchSystem};
use crate::util;
use log::{debug, info};
use std::time::Duration;

use super::InteractionController;

impl<H: SketchHost> InteractionController<H> {
    /// Applies the scenario's current step.
    ///
    /// Resets the canvas and zoom, starts the step countdown, then applies
    /// the step's system (clearing the canvas), mode and model. When the
    /// step asks for it and the model has one, the example sketch is shown
    /// before the step starts.
    pub fn on_step_change(&mut self, now: Duration) {
        let step = self.host.scenario().current_step().clone();
        info!(
            "Step '{}': mode={} system={} model='{}'",
            step.label,
            step.mode.as_str(),
            step.system.as_str(),
            step.model
        );

        self.host.canvas().reset_transform();
        self.host.zoom().reset_scale();
        self.host.instructions().set_countdown(step.time_limit());

        self.apply_system(step.system, true);
        self.mode = step.mode;
        self.apply_model(&step);
        self.update_instructions();

        if step.show_example_before {
            let origin = self.origin;
            if self.host.models().show_example(&step.model, origin) {
                self.request_modal(ModalState::ViewExample, now);
            } else {
                debug!("No example sketch for '{}'", step.model);
            }
        }
    }

    /// Logs a patch the add-patch collaborator created outside the tick.
    pub fn on_patch_add(&mut self, patch: &PatchData) {
        let snapshot = self
            .sampler
            .sample(self.host.tracking(), &ActionFrame::default());
        let ctx = LogContext {
            head: snapshot.head(),
            hand_position: snapshot.position(LogicalHand::Primary),
            canvas: self.host.canvas().transform(),
            mirror: self.mirror.active(),
        };
        self.host.step_log().surface_add(&ctx, patch);
    }

    /// Switches the sketching system.
    ///
    /// With `clear_canvas` the stroke builder is re-initialised, otherwise
    /// existing strokes are kept and only the system switches.
    pub(super) fn apply_system(&mut self, system: SketchSystem, clear_canvas: bool) {
        self.system = system;
        self.host
            .hand_appearance(LogicalHand::Primary)
            .on_system_change(system);

        let strokes = self.host.strokes();
        strokes.set_beautification(system.beautification());
        if clear_canvas {
            strokes.reinit(system.surfacing());
        } else {
            strokes.switch_system(system.surfacing());
        }
    }

    fn apply_model(&mut self, step: &StepContext) {
        self.model = step.model.clone();
        self.origin = util::scene_origin(
            self.config.study.workspace_anchor,
            self.config.study.origin_grid_step,
        );

        if self.config.study.show_model && self.mode != InteractionMode::FreeCreation {
            let origin = self.origin;
            self.host.models().set_model(&self.model, origin);
        }

        match self.config.mirror_plane(&self.model) {
            Some(plane) => {
                let plane = plane.offset_by(self.origin);
                self.mirror.install(plane);
                let view = self.host.mirror_plane();
                view.set_plane(&plane);
                view.show();
                info!("Mirror available for '{}'", self.model);
            }
            None => {
                if self.mirror.available() {
                    info!("Mirror unavailable for '{}'", self.model);
                }
                self.mirror.clear();
                let view = self.host.mirror_plane();
                view.hide();
                view.clear();
            }
        }
    }

    /// Refreshes the instruction panel for the current system, mode and model.
    pub(super) fn update_instructions(&mut self) {
        let show = self.config.study.show_instructions;
        let text = if show {
            let name = self.config.model_display_name(&self.model);
            prompts::task_instructions(self.system, self.mode, Some(&name))
        } else {
            String::new()
        };

        let instructions = self.host.instructions();
        instructions.set_text(&text, false);
        instructions.set_cheat_sheets_visible(show);
    }
}
