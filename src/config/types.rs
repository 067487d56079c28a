//! Configuration type definitions.

use super::enums::{ControllerType, Handedness};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Hand and controller setup.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct HandsConfig {
    /// Dominant hand; decides which controller draws (right, left)
    #[serde(default)]
    pub handedness: Handedness,

    /// Controller family, used for button names in prompts (vive, oculus, other)
    #[serde(default)]
    pub controller_type: ControllerType,
}

impl Default for HandsConfig {
    fn default() -> Self {
        Self {
            handedness: Handedness::default(),
            controller_type: ControllerType::default(),
        }
    }
}

/// Thresholds of the primary interaction dispatcher.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct InteractionConfig {
    /// Trigger depth above which a stroke starts and continues (valid range: 0.01 - 0.9)
    #[serde(default = "default_draw_threshold")]
    pub draw_threshold: f32,

    /// Trigger depth that cancels the end-of-step confirmation (valid range: 0.1 - 1.0)
    #[serde(default = "default_cancel_threshold")]
    pub cancel_threshold: f32,

    /// Seconds between idle log samples (valid range: 0.1 - 60.0)
    #[serde(default = "default_idle_record_interval")]
    pub idle_record_interval_secs: f32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            draw_threshold: default_draw_threshold(),
            cancel_threshold: default_cancel_threshold(),
            idle_record_interval_secs: default_idle_record_interval(),
        }
    }
}

/// Modal workflow timing.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ModalConfig {
    /// Seconds after entering a modal state before its exit is checked (valid range: 0.0 - 5.0)
    /// Keeps the press that opened a dialog from also confirming it
    #[serde(default = "default_debounce")]
    pub debounce_secs: f32,
}

impl Default for ModalConfig {
    fn default() -> Self {
        Self {
            debounce_secs: default_debounce(),
        }
    }
}

/// Haptic pulse settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct HapticsConfig {
    /// Amplitude of the add-patch/erase confirmation pulse (valid range: 0.0 - 1.0)
    #[serde(default = "default_action_amplitude")]
    pub action_amplitude: f32,

    /// Duration in seconds of the add-patch/erase pulse
    #[serde(default = "default_action_duration")]
    pub action_duration_secs: f32,

    /// Amplitude of the system switch pulse (valid range: 0.0 - 1.0)
    #[serde(default = "default_system_switch_amplitude")]
    pub system_switch_amplitude: f32,

    /// Duration in seconds of the system switch pulse
    #[serde(default = "default_system_switch_duration")]
    pub system_switch_duration_secs: f32,
}

impl Default for HapticsConfig {
    fn default() -> Self {
        Self {
            action_amplitude: default_action_amplitude(),
            action_duration_secs: default_action_duration(),
            system_switch_amplitude: default_system_switch_amplitude(),
            system_switch_duration_secs: default_system_switch_duration(),
        }
    }
}

/// Study presentation settings.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct StudyConfig {
    /// Show task instructions and controller cheat sheets
    #[serde(default = "default_true")]
    pub show_instructions: bool,

    /// Show the reference model for non free-creation steps
    #[serde(default = "default_true")]
    pub show_model: bool,

    /// Point in front of the participant the scene origin is derived from [x, y, z]
    #[serde(default = "default_workspace_anchor")]
    pub workspace_anchor: [f32; 3],

    /// Grid step the scene origin is snapped to (valid range: 0.01 - 1.0)
    #[serde(default = "default_origin_grid_step")]
    pub origin_grid_step: f32,
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            show_instructions: default_true(),
            show_model: default_true(),
            workspace_anchor: default_workspace_anchor(),
            origin_grid_step: default_origin_grid_step(),
        }
    }
}

/// Symmetry plane of a model, relative to the scene origin.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MirrorPlaneConfig {
    /// Plane normal [x, y, z]
    pub normal: [f32; 3],
    /// A point on the plane [x, y, z]
    #[serde(default)]
    pub point: [f32; 3],
}

/// Catalog entry for a reference model.
///
/// ```toml
/// [models.chair]
/// display_name = "Chair"
/// mirror = { normal = [1.0, 0.0, 0.0], point = [0.0, 0.0, 0.0] }
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct ModelConfig {
    /// Name shown in instructions; defaults to the catalog key
    #[serde(default)]
    pub display_name: Option<String>,

    /// Mirror plane; models without one cannot be mirrored
    #[serde(default)]
    pub mirror: Option<MirrorPlaneConfig>,
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_true() -> bool {
    true
}

fn default_draw_threshold() -> f32 {
    0.1
}

fn default_cancel_threshold() -> f32 {
    0.5
}

fn default_idle_record_interval() -> f32 {
    2.0
}

fn default_debounce() -> f32 {
    0.5
}

fn default_action_amplitude() -> f32 {
    0.5
}

fn default_action_duration() -> f32 {
    0.1
}

fn default_system_switch_amplitude() -> f32 {
    0.5
}

fn default_system_switch_duration() -> f32 {
    1.0
}

fn default_workspace_anchor() -> [f32; 3] {
    [0.0, 1.2, 0.8]
}

fn default_origin_grid_step() -> f32 {
    0.25
}
