//! Appearance collaborators.
//!
//! These only reflect state back to the participant. Every notification
//! has an empty default so implementations override what they render.

use crate::config::{ControllerType, Handedness};
use crate::sketch::{Plane, SketchModel, SketchSystem};
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Placement of the drawing canvas in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CanvasTransform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for CanvasTransform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

/// Brush/hand visuals for one logical hand.
pub trait HandAppearance {
    fn on_draw_start(&mut self) {}
    fn on_draw_end(&mut self) {}
    fn on_zoom_start(&mut self) {}
    fn on_zoom_end(&mut self) {}
    fn on_grab_start(&mut self) {}
    fn on_grab_end(&mut self) {}
    /// An action was attempted and had no effect
    fn on_no_op(&mut self) {}
    fn on_system_change(&mut self, _system: SketchSystem) {}
}

pub trait ZoomAppearance {
    fn on_zoom_start(&mut self, _primary: Vec3, _secondary: Vec3) {}
    fn on_zoom_update(&mut self, _primary: Vec3, _secondary: Vec3, _success: bool, _scale: f32) {}
    fn on_zoom_end(&mut self) {}
}

pub trait Grid {
    fn refresh(&mut self, _hand_position: Vec3) {}
    fn toggle_state(&mut self) {}
    fn on_transform_start(&mut self) {}
    fn on_transform_end(&mut self) {}
    fn on_canvas_move(&mut self) {}
}

pub trait MirrorPlaneView {
    /// Installs and shows a plane.
    fn set_plane(&mut self, _plane: &Plane) {}
    fn show(&mut self) {}
    fn hide(&mut self) {}
    fn clear(&mut self) {}
}

/// Instruction panel and countdown timer.
pub trait InstructionsDisplay {
    fn set_controllers(&mut self, _controller: ControllerType, _handedness: Handedness) {}
    fn set_text(&mut self, _text: &str, _modal: bool) {}
    fn set_cheat_sheets_visible(&mut self, _visible: bool) {}
    fn set_countdown(&mut self, _limit: Option<Duration>) {}
    fn pause_countdown(&mut self) {}
    /// Resumes the countdown, discounting time spent paused.
    fn unpause_countdown(&mut self, _paused_for: Duration) {}
}

pub trait CanvasView {
    fn set_visible(&mut self, visible: bool);
    fn reset_transform(&mut self);
    fn transform(&self) -> CanvasTransform;
}

/// Reference model and example sketch display.
pub trait ModelViewer {
    fn update_hand_position(&mut self, _position: Vec3) {}
    fn set_model(&mut self, _model: &SketchModel, _origin: Vec3) {}
    /// Shows the example sketch for `model`; false when none exists.
    fn show_example(&mut self, model: &SketchModel, origin: Vec3) -> bool;
    fn hide_example(&mut self) {}
}

pub trait Exporter {
    fn export_sketch(&mut self, name: &str);
    fn export_obj(&mut self, name: &str);
}
