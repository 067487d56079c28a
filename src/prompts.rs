//! Instruction and modal prompt text shown on the instruction panel.

use crate::config::ControllerType;
use crate::sketch::{InteractionMode, SketchSystem};

// ============================================================================
// Modal prompts
// ============================================================================

pub fn confirm_end_step(controller: ControllerType) -> String {
    format!(
        "You are about to end the task.\nPress {} to confirm, \n or the TRIGGER to go back to the task.",
        controller.next_button()
    )
}

pub fn break_time(controller: ControllerType) -> String {
    format!(
        "Break time\n\nTake a break for as long as you like \n (without closing the application)\nPress {} when you are ready to start the next task.",
        controller.next_button()
    )
}

pub fn confirm_break_end(controller: ControllerType) -> String {
    format!(
        "You are about to start the next task.\nPress {} to confirm.",
        controller.next_button()
    )
}

pub fn view_example(controller: ControllerType) -> String {
    format!(
        "Here is an example sketch for the task that you're about to do.\nTake your time to look at how the 3D object is represented using a sparse set of curves.\nPress {} when you're done.",
        controller.next_button()
    )
}

pub fn finish_study(controller: ControllerType) -> String {
    format!(
        "You have completed all tasks.\nThanks for participating in the study!\nPress {} to exit the application.",
        controller.next_button()
    )
}

// ============================================================================
// Task instructions
// ============================================================================

fn system_instructions(system: SketchSystem) -> &'static str {
    match system {
        SketchSystem::Baseline | SketchSystem::Reserved => {
            "Freehand: strokes are kept exactly as drawn."
        }
        SketchSystem::Snap => "Snapping: strokes are straightened and snapped to nearby strokes.",
        SketchSystem::SnapSurface => {
            "Snapping + surfaces: strokes snap, and closed loops of strokes can be filled with a surface patch."
        }
    }
}

fn mode_instructions(mode: InteractionMode) -> &'static str {
    match mode {
        InteractionMode::FreeCreation => {
            "Free creation: sketch anything you like. Use the system button to switch between freehand and surfaces."
        }
        InteractionMode::Observational => "Sketch the object displayed next to you.",
        InteractionMode::Memory => "Sketch the object you were shown, from memory.",
    }
}

/// Full instruction panel text for a step.
///
/// `model_name` is only shown for tasks built around a reference model.
pub fn task_instructions(
    system: SketchSystem,
    mode: InteractionMode,
    model_name: Option<&str>,
) -> String {
    let mut text = String::new();
    text.push_str(system_instructions(system));
    text.push_str("\n\n");
    text.push_str(mode_instructions(mode));

    if mode != InteractionMode::FreeCreation {
        if let Some(name) = model_name {
            text.push_str("\n\nModel: ");
            text.push_str(name);
        }
    }

    text
}
