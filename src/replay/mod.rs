//! Trace replay: drives the interaction controller from a recorded trace.
//!
//! This module provides:
//! - The JSON trace format ([`Trace`]) and its loading errors
//! - Stand-in collaborators ([`ReplayHost`]) that journal every call
//! - [`run`], which plays a trace through an [`InteractionController`]

pub mod host;
pub mod journal;
pub mod trace;

pub use host::{ReplayHost, ReplayStats};
pub use journal::{Journal, JournalEntry};
pub use trace::{Trace, TraceError, TraceFrame};

use crate::config::Config;
use crate::input::InteractionController;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

/// Outcome of a replay, printed by the CLI and stored in the journal.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReplaySummary {
    /// Frames fed to the controller
    pub frames: usize,
    #[serde(flatten)]
    pub stats: ReplayStats,
    /// Label of the step the scenario ended on
    pub step: String,
    /// Interaction or modal state after the last frame
    pub state: String,
    /// Whether the controller asked to exit
    pub exited: bool,
}

impl fmt::Display for ReplaySummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "frames={} strokes={} deletes={} patches={} exports={} step={} state={}",
            self.frames,
            self.stats.strokes,
            self.stats.deletes,
            self.stats.patches,
            self.stats.exports,
            self.step,
            self.state
        )?;
        if self.exited {
            write!(f, " (exited)")?;
        }
        Ok(())
    }
}

/// Frame times are validated on load; anything else saturates.
fn trace_time(t: f64) -> Duration {
    match Duration::try_from_secs_f64(t) {
        Ok(time) => time,
        Err(_) if t > 0.0 => Duration::MAX,
        Err(_) => Duration::ZERO,
    }
}

pub struct Replay {
    pub summary: ReplaySummary,
    pub journal: Journal,
}

/// Plays `trace` through a controller built from `config`.
///
/// Devices of the first frame are current when the hand binding is
/// resolved. Stops early once the controller asks to exit.
pub fn run(trace: &Trace, config: Config) -> Replay {
    let mut host = ReplayHost::new(trace.steps.clone(), trace.examples.clone());
    if let Some(first) = trace.frames.first() {
        host.set_frame(first);
    }

    let mut controller = InteractionController::new(host, config);
    let start = trace.frames.first().map_or(0.0, |frame| frame.t);
    controller.on_step_change(trace_time(start));
    controller.host_mut().end_frame();

    let mut frames = 0;
    for frame in &trace.frames {
        controller.host_mut().set_frame(frame);
        controller.tick(trace_time(frame.t), &frame.actions);
        frames += 1;

        for patch in controller.host_mut().take_added_patches() {
            controller.on_patch_add(&patch);
        }
        controller.host_mut().end_frame();

        if controller.should_exit() {
            log::info!("Controller requested exit at {:.3}s", frame.t);
            break;
        }
    }

    let state = match controller.modal_state() {
        Some(modal) => modal.as_str().to_string(),
        None => controller.state().as_str().to_string(),
    };
    let exited = controller.should_exit();
    let host = controller.into_host();
    let summary = ReplaySummary {
        frames,
        stats: host.stats(),
        step: host.step_label().to_string(),
        state,
        exited,
    };
    log::info!("Replay finished: {summary}");

    Replay {
        summary,
        journal: host.into_journal(),
    }
}
