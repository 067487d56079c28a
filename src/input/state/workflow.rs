use crate::host::SketchHost;
use crate::input::modal::{ActiveModal, ModalOutcome, ModalRequest, ModalState};
use crate::prompts;
use crate::sketch::InteractionMode;
use log::info;
use std::time::Duration;

use super::{InteractionController, InteractionState};

impl<H: SketchHost> InteractionController<H> {
    /// Enters `state` now, or parks it until the controller is idle.
    pub(super) fn request_modal(&mut self, state: ModalState, now: Duration) {
        let idle = self.state == InteractionState::Idle;
        if self.modal.request(state, now, idle) == ModalRequest::Entered {
            self.enter_modal(state);
        }
    }

    /// Entry effects of a modal state that just became active.
    pub(super) fn enter_modal(&mut self, state: ModalState) {
        info!("Entering {}", state.as_str());
        let controller = self.config.hands.controller_type;

        match state {
            ModalState::ConfirmEndStep => {
                let text = prompts::confirm_end_step(controller);
                let instructions = self.host.instructions();
                instructions.set_text(&text, true);
                instructions.pause_countdown();
                self.host.canvas().set_visible(false);
            }
            ModalState::Break => {
                let text = prompts::break_time(controller);
                let instructions = self.host.instructions();
                instructions.set_text(&text, true);
                instructions.pause_countdown();
                self.host.canvas().set_visible(false);
            }
            ModalState::ConfirmBreakEnd => {
                let text = prompts::confirm_break_end(controller);
                self.host.instructions().set_text(&text, true);
            }
            ModalState::ViewExample => {
                let text = prompts::view_example(controller);
                let instructions = self.host.instructions();
                instructions.set_text(&text, false);
                instructions.pause_countdown();
            }
            ModalState::FinishStudy => {
                let text = prompts::finish_study(controller);
                self.host.instructions().set_text(&text, false);
                self.host.canvas().set_visible(false);
            }
        }
    }

    /// Exit effects. The workflow is already cleared, so these may enter
    /// the next modal state directly.
    pub(super) fn exit_modal(&mut self, active: ActiveModal, outcome: ModalOutcome, now: Duration) {
        info!("Leaving {} ({:?})", active.state.as_str(), outcome);

        match (active.state, outcome) {
            (ModalState::ConfirmEndStep, ModalOutcome::Cancelled) => {
                self.host.canvas().set_visible(true);
                self.host
                    .instructions()
                    .unpause_countdown(now.saturating_sub(active.entered_at));
                self.update_instructions();
                // The cancelling trigger pull must not start a stroke
                self.draw_armed = false;
            }
            (ModalState::ConfirmEndStep, _) => {
                self.host.canvas().set_visible(true);
                self.end_step(now);
            }
            (ModalState::Break, _) => self.request_modal(ModalState::ConfirmBreakEnd, now),
            (ModalState::ConfirmBreakEnd, _) => {
                self.host.canvas().set_visible(true);
                self.advance_step(now);
            }
            (ModalState::ViewExample, _) => {
                self.host.models().hide_example();
                self.host
                    .instructions()
                    .unpause_countdown(now.saturating_sub(active.entered_at));
                self.update_instructions();
            }
            (ModalState::FinishStudy, _) => {
                info!("Study finished");
                self.should_exit = true;
            }
        }
    }

    /// Closes the current step after a confirmed end-of-step.
    ///
    /// Free creation restarts the same step; study steps export the sketch
    /// and move on, through a break when the step asks for one.
    fn end_step(&mut self, now: Duration) {
        let step = self.host.scenario().current_step().clone();
        info!("Ending step '{}'", step.label);

        if self.mode == InteractionMode::FreeCreation {
            self.host.exporter().export_sketch(&step.label);
            self.host.eraser().clear_all();
            let scenario = self.host.scenario();
            scenario.end_step();
            scenario.redo_step();
            self.on_step_change(now);
            return;
        }

        self.host.scenario().end_step();
        self.host.exporter().export_obj(&step.label);
        self.host.eraser().clear_all();

        if step.break_after_step {
            self.request_modal(ModalState::Break, now);
        } else {
            self.advance_step(now);
        }
    }

    /// Moves to the next step, or to the end of the study when none is left.
    fn advance_step(&mut self, now: Duration) {
        if self.host.scenario().next_step() {
            self.on_step_change(now);
        } else {
            self.request_modal(ModalState::FinishStudy, now);
        }
    }
}
