//! Configuration enum types.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Which physical hand is the participant's dominant (primary) hand.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum Handedness {
    /// Primary = right controller (default)
    #[default]
    Right,
    /// Primary = left controller
    Left,
}

impl Handedness {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Right => "right",
            Self::Left => "left",
        }
    }
}

/// Controller hardware family, used to name buttons in prompts.
///
/// # Examples
/// ```toml
/// [hands]
/// controller_type = "oculus"
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub enum ControllerType {
    /// HTC Vive wands
    #[default]
    Vive,
    /// Oculus Touch
    Oculus,
    /// Anything else (Index, WMR, ...)
    Other,
}

impl ControllerType {
    /// Label of the "next"/confirm button on this hardware.
    pub fn next_button(&self) -> &'static str {
        match self {
            Self::Vive => "MENU",
            Self::Oculus => "B/Y",
            Self::Other => "B",
        }
    }
}
