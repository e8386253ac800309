//! Simulation loop and program loading.
//!
//! Provides the clock schedule, the program image loader, and the cycle
//! sequencer that drives a core model through a run.

pub mod clock;
pub mod loader;
pub mod sequencer;

pub use clock::ClockSchedule;
pub use sequencer::{Harness, RunSummary};
