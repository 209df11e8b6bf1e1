//! Clockwork Runner -- the file-level pipeline around the adjustment core.
//!
//! [`runner::run`] reads a blueprint file pair, applies a batch of clock-speed
//! specs and writes the modified pair under a new name. Nothing is written
//! unless every step succeeded and at least one machine was adjusted.

pub mod error;
pub mod logging;
pub mod report;
pub mod runner;

pub use error::RunError;
pub use logging::init_tracing;
pub use runner::{RunConfig, RunSummary, run};
