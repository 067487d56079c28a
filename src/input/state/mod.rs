mod core;
mod dispatch;
mod step;
#[cfg(test)]
mod tests;
mod workflow;

pub use core::{InteractionController, InteractionState};
