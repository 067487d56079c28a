//! Modal workflow state machine.
//!
//! Modal states interrupt normal interaction: while one is active the
//! dispatcher does nothing and only the active state's exit condition is
//! checked. Exit predicates are pure functions of the clock, the entry time
//! and this tick's inputs, so the debounce window and mutual exclusion can be
//! tested without a running frame loop.

use std::time::Duration;

/// Workflow interruptions. "No modal state" is `Option::None` at the use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalState {
    /// "You are about to end the task", confirm or go back
    ConfirmEndStep,
    /// Pause between steps
    Break,
    /// Confirmation before leaving a break
    ConfirmBreakEnd,
    /// Example sketch shown before a step
    ViewExample,
    /// All steps done
    FinishStudy,
}

impl ModalState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ConfirmEndStep => "confirm-end-step",
            Self::Break => "break",
            Self::ConfirmBreakEnd => "confirm-break-end",
            Self::ViewExample => "view-example",
            Self::FinishStudy => "finish-study",
        }
    }
}

/// How an active modal state ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalOutcome {
    /// The confirm button was pressed
    Confirmed,
    /// The draw trigger was pulled past the cancel threshold
    Cancelled,
    /// The participant stopped holding both primary buttons
    Released,
}

/// Inputs the exit predicates look at.
#[derive(Debug, Clone, Copy, Default)]
pub struct ModalInputs {
    /// Confirm ("next") button went down this tick
    pub confirm_pressed: bool,
    /// Analog draw trigger depth
    pub pressure: f32,
    /// Both hands' primary face buttons are held
    pub both_primary_held: bool,
}

/// Timing and threshold constants for exits.
#[derive(Debug, Clone, Copy)]
pub struct ModalTimings {
    pub debounce: Duration,
    pub cancel_threshold: f32,
}

impl Default for ModalTimings {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(500),
            cancel_threshold: 0.5,
        }
    }
}

/// Exit predicate for `state`, entered at `entered_at`.
///
/// Nothing can exit before `entered_at + debounce`, even if the qualifying
/// input was already present on entry.
pub fn exit_outcome(
    state: ModalState,
    entered_at: Duration,
    now: Duration,
    inputs: &ModalInputs,
    timings: &ModalTimings,
) -> Option<ModalOutcome> {
    if now < entered_at + timings.debounce {
        return None;
    }

    match state {
        ModalState::ConfirmEndStep => {
            if inputs.confirm_pressed {
                Some(ModalOutcome::Confirmed)
            } else if inputs.pressure > timings.cancel_threshold {
                Some(ModalOutcome::Cancelled)
            } else {
                None
            }
        }
        ModalState::Break | ModalState::ConfirmBreakEnd => inputs
            .confirm_pressed
            .then_some(ModalOutcome::Confirmed),
        ModalState::ViewExample | ModalState::FinishStudy => {
            (!inputs.both_primary_held).then_some(ModalOutcome::Released)
        }
    }
}

/// The modal state currently suspending the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveModal {
    pub state: ModalState,
    pub entered_at: Duration,
}

/// Result of asking to enter a modal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalRequest {
    /// The state is now active
    Entered,
    /// Parked until the controller is idle and no modal state is active
    Deferred,
    /// A request was already parked; this one was discarded
    Dropped,
}

/// Holds the single active modal state and at most one parked request.
#[derive(Debug, Clone, Default)]
pub struct ModalWorkflow {
    current: Option<ActiveModal>,
    pending: Option<ModalState>,
}

impl ModalWorkflow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<ModalState> {
        self.current.map(|m| m.state)
    }

    pub fn active(&self) -> Option<&ActiveModal> {
        self.current.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.current.is_some()
    }

    pub fn pending(&self) -> Option<ModalState> {
        self.pending
    }

    /// Enters `state` now if allowed, otherwise parks it.
    ///
    /// `idle` tells whether the dispatcher is between gestures; a modal
    /// state never starts while a draw, grab or zoom is in flight.
    pub fn request(&mut self, state: ModalState, now: Duration, idle: bool) -> ModalRequest {
        if idle && self.current.is_none() {
            self.current = Some(ActiveModal {
                state,
                entered_at: now,
            });
            return ModalRequest::Entered;
        }

        if self.pending.is_some() {
            log::warn!(
                "Dropping {} request: {:?} already waiting",
                state.as_str(),
                self.pending
            );
            return ModalRequest::Dropped;
        }

        log::warn!("Deferring {} until the controller is idle", state.as_str());
        self.pending = Some(state);
        ModalRequest::Deferred
    }

    /// Enters the parked request if it can start now.
    pub fn activate_pending(&mut self, now: Duration, idle: bool) -> Option<ModalState> {
        if !idle || self.current.is_some() {
            return None;
        }
        let state = self.pending.take()?;
        self.current = Some(ActiveModal {
            state,
            entered_at: now,
        });
        Some(state)
    }

    /// Checks the active state's exit condition and leaves it if met.
    ///
    /// On exit the workflow is already cleared when this returns, so exit
    /// effects are free to request the next modal state.
    pub fn poll(
        &mut self,
        now: Duration,
        inputs: &ModalInputs,
        timings: &ModalTimings,
    ) -> Option<(ActiveModal, ModalOutcome)> {
        let active = self.current?;
        let outcome = exit_outcome(active.state, active.entered_at, now, inputs, timings)?;
        self.current = None;
        Some((active, outcome))
    }
}
