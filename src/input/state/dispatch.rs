use crate::device::{LogicalHand, PoseSnapshot};
use crate::input::buttons::Button;
use crate::sketch::InteractionMode;
use log::debug;
use std::time::Duration;

use super::{InteractionController, InteractionState};
use crate::host::SketchHost;

impl<H: SketchHost> InteractionController<H> {
    /// Runs the interaction state machine for one non-modal tick.
    pub(super) fn dispatch(&mut self, now: Duration, snapshot: &PoseSnapshot) {
        let primary = snapshot.position(LogicalHand::Primary);
        self.host.grid().refresh(primary);
        self.host.models().update_hand_position(primary);

        match self.state {
            InteractionState::Idle => self.tick_idle(now, snapshot),
            InteractionState::Drawing => self.tick_drawing(snapshot),
            InteractionState::Grabbing => self.tick_grabbing(snapshot),
            InteractionState::Zooming => self.tick_zooming(snapshot),
        }
    }

    fn set_state(&mut self, state: InteractionState) {
        debug!("Interaction {} -> {}", self.state.as_str(), state.as_str());
        self.state = state;
    }

    // ------------------------------------------------------------------------
    // Idle
    // ------------------------------------------------------------------------

    /// First matching trigger wins; at most one action per tick.
    fn tick_idle(&mut self, now: Duration, snapshot: &PoseSnapshot) {
        if now.saturating_sub(self.last_idle_record) >= self.config.idle_record_interval() {
            self.last_idle_record = now;
            let ctx = self.log_context(snapshot);
            self.host.step_log().idle(&ctx);
        }

        let primary_tracked = snapshot.reading(LogicalHand::Primary).is_some();
        if self.draw_armed
            && primary_tracked
            && snapshot.pressure > self.config.interaction.draw_threshold
        {
            self.start_drawing(snapshot);
        } else if self.edges.pressed(Button::Zoom) {
            self.start_zooming(snapshot);
        } else if self.edges.pressed(Button::AddPatch) {
            self.add_patch(snapshot);
        } else if self.edges.pressed(Button::Erase) {
            self.erase(snapshot);
        } else if self.edges.pressed(Button::Grab) {
            self.start_grabbing(snapshot);
        } else if self.edges.pressed(Button::ToggleGrid) {
            self.host.grid().toggle_state();
        } else if self.edges.pressed(Button::ToggleMirror) && self.mirror.available() {
            self.toggle_mirror();
        } else if self.edges.pressed(Button::SwitchSystem)
            && self.mode == InteractionMode::FreeCreation
        {
            self.switch_system();
        }
    }

    // ------------------------------------------------------------------------
    // Drawing
    // ------------------------------------------------------------------------

    fn start_drawing(&mut self, snapshot: &PoseSnapshot) {
        self.set_state(InteractionState::Drawing);
        self.host
            .hand_appearance(LogicalHand::Primary)
            .on_draw_start();
        self.host
            .strokes()
            .begin(snapshot.position(LogicalHand::Primary));
    }

    fn tick_drawing(&mut self, snapshot: &PoseSnapshot) {
        let position = snapshot.position(LogicalHand::Primary);
        if snapshot.pressure > self.config.interaction.draw_threshold {
            self.host.strokes().update(
                position,
                snapshot.rotation(LogicalHand::Primary),
                snapshot.velocity,
                snapshot.pressure,
            );
            return;
        }

        self.set_state(InteractionState::Idle);
        self.host.hand_appearance(LogicalHand::Primary).on_draw_end();
        let mirror = self.mirror.active();
        match self.host.strokes().commit(position, mirror) {
            Some(stroke) => {
                debug!("Committed stroke {} ({} points)", stroke.id, stroke.points.len());
                let ctx = self.log_context(snapshot);
                self.host.step_log().stroke_add(&ctx, &stroke);
            }
            None => debug!("Stroke rejected by the builder"),
        }
    }

    // ------------------------------------------------------------------------
    // Grabbing
    // ------------------------------------------------------------------------

    /// Grabbing is driven by the secondary hand.
    fn start_grabbing(&mut self, snapshot: &PoseSnapshot) {
        self.set_state(InteractionState::Grabbing);
        self.host
            .hand_appearance(LogicalHand::Secondary)
            .on_grab_start();
        self.host.grid().on_transform_start();
        self.host.grab().begin(
            snapshot.position(LogicalHand::Secondary),
            snapshot.rotation(LogicalHand::Secondary),
        );
    }

    fn tick_grabbing(&mut self, snapshot: &PoseSnapshot) {
        if snapshot.primary_button(LogicalHand::Secondary) {
            self.set_state(InteractionState::Idle);
            self.host
                .hand_appearance(LogicalHand::Secondary)
                .on_grab_end();
            self.host.grid().on_transform_end();
            let ctx = self.log_context(snapshot);
            self.host.step_log().canvas_transform(&ctx);
            return;
        }

        self.host.grab().update(
            snapshot.position(LogicalHand::Secondary),
            snapshot.rotation(LogicalHand::Secondary),
        );
        self.host.grid().on_canvas_move();
    }

    // ------------------------------------------------------------------------
    // Zooming
    // ------------------------------------------------------------------------

    fn start_zooming(&mut self, snapshot: &PoseSnapshot) {
        self.set_state(InteractionState::Zooming);
        for hand in [LogicalHand::Primary, LogicalHand::Secondary] {
            self.host.hand_appearance(hand).on_zoom_start();
        }
        self.host.zoom_appearance().on_zoom_start(
            snapshot.position(LogicalHand::Primary),
            snapshot.position(LogicalHand::Secondary),
        );
        self.host.grid().on_transform_start();
        self.host.zoom().begin(snapshot.hands_distance());
    }

    fn tick_zooming(&mut self, snapshot: &PoseSnapshot) {
        if !self.edges.held(Button::Zoom) {
            self.set_state(InteractionState::Idle);
            for hand in [LogicalHand::Primary, LogicalHand::Secondary] {
                self.host.hand_appearance(hand).on_zoom_end();
            }
            self.host.zoom_appearance().on_zoom_end();
            self.host.grid().on_transform_end();
            let ctx = self.log_context(snapshot);
            self.host.step_log().canvas_transform(&ctx);
            return;
        }

        let primary = snapshot.position(LogicalHand::Primary);
        let secondary = snapshot.position(LogicalHand::Secondary);
        let update = self.host.zoom().update(primary, snapshot.hands_distance());
        self.host
            .zoom_appearance()
            .on_zoom_update(primary, secondary, update.success, update.scale);
    }

    // ------------------------------------------------------------------------
    // One-shot actions
    // ------------------------------------------------------------------------

    fn add_patch(&mut self, snapshot: &PoseSnapshot) {
        let mirror = self.mirror.active();
        let added = self
            .host
            .patches()
            .try_add(snapshot.position(LogicalHand::Primary), mirror);

        if added {
            debug!("Patch added");
            self.pulse(LogicalHand::Primary, false);
        } else {
            self.host.hand_appearance(LogicalHand::Primary).on_no_op();
        }
    }

    fn erase(&mut self, snapshot: &PoseSnapshot) {
        let mirror = self.mirror.active();
        let deleted = self
            .host
            .eraser()
            .try_delete(snapshot.position(LogicalHand::Primary), mirror);

        match deleted {
            Some(element) => {
                debug!("Deleted {:?} {}", element.interaction, element.element_id);
                self.pulse(LogicalHand::Secondary, false);
                let ctx = self.log_context(snapshot);
                self.host
                    .step_log()
                    .delete(&ctx, element.interaction, element.element_id);
            }
            None => self.host.hand_appearance(LogicalHand::Primary).on_no_op(),
        }
    }

    fn toggle_mirror(&mut self) {
        match self.mirror.toggle() {
            Some(true) => self.host.mirror_plane().show(),
            Some(false) => self.host.mirror_plane().hide(),
            None => return,
        }
        debug!("Mirror active: {}", self.mirror.active());
    }

    fn switch_system(&mut self) {
        let next = self.system.toggled();
        log::info!("Switching system {} -> {}", self.system.as_str(), next.as_str());
        self.apply_system(next, false);
        self.update_instructions();
        self.pulse(LogicalHand::Secondary, true);
    }

    fn pulse(&mut self, hand: LogicalHand, system_switch: bool) {
        let node = self.sampler.binding().node(hand);
        let pulse = if system_switch {
            self.config.system_switch_pulse()
        } else {
            self.config.action_pulse()
        };
        self.host.tracking().send_haptic(node, pulse);
    }
}
