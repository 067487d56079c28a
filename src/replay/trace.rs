//! Recorded input traces.

use crate::config::Config;
use crate::device::{DeviceReading, TrackingNode};
use crate::host::StepContext;
use crate::input::ActionFrame;
use crate::sketch::InteractionMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while loading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    #[error("Failed to read trace {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid trace JSON: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Trace has no steps")]
    NoSteps,

    #[error("Trace has no frames")]
    NoFrames,

    #[error("Frame {index} at {t}s is earlier than the frame before it")]
    NonMonotonic { index: usize, t: f64 },

    #[error("Frame {index} at {t}s is beyond the replayable time range")]
    TimeOutOfRange { index: usize, t: f64 },

    #[error("Step '{step}' uses model '{model}' which is not in the model catalog")]
    UnknownModel { step: String, model: String },
}

/// One recorded tick.
///
/// Missing device readings replay as an absent device.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TraceFrame {
    /// Seconds since the start of the recording
    pub t: f64,
    #[serde(default)]
    pub head: Option<DeviceReading>,
    #[serde(default)]
    pub left: Option<DeviceReading>,
    #[serde(default)]
    pub right: Option<DeviceReading>,
    #[serde(flatten)]
    pub actions: ActionFrame,
}

impl TraceFrame {
    pub fn reading(&self, node: TrackingNode) -> Option<DeviceReading> {
        match node {
            TrackingNode::Head => self.head,
            TrackingNode::LeftHand => self.left,
            TrackingNode::RightHand => self.right,
        }
    }
}

/// A study scenario plus the frames recorded while running it.
///
/// ```json
/// {
///   "steps": [{ "label": "free", "mode": "free-creation" }],
///   "examples": ["chair"],
///   "frames": [
///     { "t": 0.0, "right": { "position": [0.3, 1.2, 0.4] }, "pressure": 0.4 },
///     { "t": 0.1, "buttons": ["study_next"] }
///   ]
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Trace {
    pub steps: Vec<StepContext>,
    /// Models that have an example sketch
    #[serde(default)]
    pub examples: Vec<String>,
    pub frames: Vec<TraceFrame>,
}

impl Trace {
    pub fn load(path: &Path) -> Result<Self, TraceError> {
        let json = fs::read_to_string(path).map_err(|source| TraceError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Parses a trace and checks that it can be replayed.
    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        let trace: Trace = serde_json::from_str(json)?;

        if trace.steps.is_empty() {
            return Err(TraceError::NoSteps);
        }
        if trace.frames.is_empty() {
            return Err(TraceError::NoFrames);
        }

        let mut previous = f64::NEG_INFINITY;
        for (index, frame) in trace.frames.iter().enumerate() {
            if !frame.t.is_finite() || frame.t < previous || frame.t < 0.0 {
                return Err(TraceError::NonMonotonic { index, t: frame.t });
            }
            if Duration::try_from_secs_f64(frame.t).is_err() {
                return Err(TraceError::TimeOutOfRange { index, t: frame.t });
            }
            previous = frame.t;
        }

        Ok(trace)
    }

    /// Checks that every model a study step relies on is in the catalog.
    pub fn check_models(&self, config: &Config) -> Result<(), TraceError> {
        for step in &self.steps {
            let name = step.model.name();
            if step.mode == InteractionMode::FreeCreation || name.is_empty() {
                continue;
            }
            if !config.models.contains_key(name) {
                return Err(TraceError::UnknownModel {
                    step: step.label.clone(),
                    model: name.to_string(),
                });
            }
        }
        Ok(())
    }

    /// Recording length in seconds.
    pub fn duration(&self) -> f64 {
        self.frames.last().map_or(0.0, |frame| frame.t)
    }
}
