//! Input handling and interaction state machines.
//!
//! This module turns sampled hand poses and action-layer inputs into sketching
//! actions. It owns the primary interaction dispatcher (idle, drawing, grabbing,
//! zooming) and the modal workflow that suspends it for dialogs, breaks,
//! example previews and the end of the study.

pub mod buttons;
pub mod frame;
pub mod modal;
pub mod state;

// Re-export commonly used types at module level
pub use buttons::{Button, ButtonEdges, ButtonSet};
pub use frame::ActionFrame;
pub use modal::{ModalOutcome, ModalState, ModalTimings, ModalWorkflow};
pub use state::{InteractionController, InteractionState};
