//! Library exports for the vrscriber interaction controller.
//!
//! Exposes the controller, its collaborator traits and the configuration
//! types so that a VR runtime integration, the trace replay binary and
//! tooling such as the schema dumper share one implementation.

pub mod config;
pub mod device;
pub mod host;
pub mod input;
pub mod prompts;
pub mod replay;
pub mod sketch;
pub mod util;

pub use config::Config;
pub use input::{InteractionController, InteractionState};
