//! Sketching domain types shared by the controller and its collaborators.
//!
//! This module defines the study-facing vocabulary:
//! - [`SketchSystem`]: which beautification/surfacing pipeline is active
//! - [`InteractionMode`]: what kind of task the current step asks for
//! - [`SketchModel`]: the reference object for a step
//! - [`InteractionType`]: tags attached to step log entries
//! - [`MirrorState`]: symmetry plane availability and toggle state

pub mod mirror;

pub use mirror::{MirrorState, Plane};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sketching system selected for a step.
///
/// The numeric order matches the study protocol: baseline freehand, snapping,
/// snapping with surface patches, and one reserved slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum SketchSystem {
    /// Raw freehand strokes, no beautification
    Baseline,
    /// Strokes are beautified and snapped
    Snap,
    /// Snapping plus surface patch creation
    SnapSurface,
    /// Reserved protocol slot; behaves like baseline
    Reserved,
}

impl Default for SketchSystem {
    fn default() -> Self {
        Self::Baseline
    }
}

impl SketchSystem {
    /// Whether the stroke builder should beautify strokes under this system.
    pub fn beautification(self) -> bool {
        matches!(self, Self::Snap | Self::SnapSurface)
    }

    /// Whether surface patches can be created under this system.
    pub fn surfacing(self) -> bool {
        matches!(self, Self::SnapSurface)
    }

    /// System selected by the in-session switch toggle.
    ///
    /// The toggle only alternates between freehand and patch sketching, so
    /// anything other than `SnapSurface` goes to `SnapSurface`.
    pub fn toggled(self) -> Self {
        match self {
            Self::SnapSurface => Self::Baseline,
            _ => Self::SnapSurface,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Baseline => "baseline",
            Self::Snap => "snap",
            Self::SnapSurface => "snap-surface",
            Self::Reserved => "reserved",
        }
    }
}

/// Kind of task a study step asks the participant to perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum InteractionMode {
    /// Open-ended sketching; the system toggle and quit key are enabled
    FreeCreation,
    /// Sketch a model that is displayed next to the canvas
    Observational,
    /// Sketch a model from memory
    Memory,
}

impl Default for InteractionMode {
    fn default() -> Self {
        Self::FreeCreation
    }
}

impl InteractionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::FreeCreation => "free-creation",
            Self::Observational => "observational",
            Self::Memory => "memory",
        }
    }
}

/// Identifier of a reference model, as named in the model catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct SketchModel(pub String);

impl SketchModel {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SketchModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Interaction tag recorded with step log entries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionType {
    Idle,
    StrokeAdd,
    StrokeDelete,
    SurfaceAdd,
    SurfaceDelete,
    CanvasTransform,
}
