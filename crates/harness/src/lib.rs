//! Cycle-driven co-simulation harness library.
//!
//! This crate drives an opaque processor core model over a synchronous,
//! word-addressable memory bus. It provides the following:
//! 1. **Core interface:** The signal-level contract any simulated model implements.
//! 2. **Memory:** The instruction word store and the strobe/mask bus responder.
//! 3. **Sequencing:** Reset, clock, and run phases with per-edge bus servicing and trap monitoring.
//! 4. **Observability:** A diagnostic instruction classifier, VCD waveform tracing, and run statistics.
//! 5. **Models:** A sequential fetch stream plus two counter demos.

/// Synchronous memory bus responder.
pub mod bus;
/// Common constants and error types.
pub mod common;
/// Harness configuration (defaults, hierarchical config structures).
pub mod config;
/// Core model signal interface.
pub mod core;
/// Instruction field extraction and diagnostic classification.
pub mod isa;
/// Instruction word store.
pub mod mem;
/// Built-in simulated models.
pub mod models;
/// Clock schedule, program loader, and cycle sequencer.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;
/// Waveform trace sinks.
pub mod trace;
/// Trap monitor.
pub mod trap;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Instruction word store backing the bus.
pub use crate::mem::WordStore;
/// Cycle sequencer; construct with `Harness::new` or `Harness::with_trace`.
pub use crate::sim::sequencer::Harness;
