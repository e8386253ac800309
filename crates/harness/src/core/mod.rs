//! Core model trait for the co-simulated processor.
//!
//! This module defines the `Core` trait implemented by every evaluatable core
//! model driven by the harness. It provides:
//! 1. **Input application:** Clock, reset, read-data, and busy levels driven by the harness.
//! 2. **Evaluation:** One combinational settle step after a signal change.
//! 3. **Output sampling:** Address, strobe, mask, write-data, and trap pins.
//!
//! The harness treats the model as opaque beyond these three capabilities, so
//! any compatible simulated core can be substituted without changing the
//! sequencer.

use crate::common::constants::FILLER_WORD;

/// Input pins driven by the harness before each evaluation step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSignals {
    /// Clock level for this time unit.
    pub clock: bool,
    /// Reset level; `true` while the core is held in reset.
    pub reset: bool,
    /// Read data presented by the memory model; updated after each completed
    /// read, holds its previous value otherwise.
    pub read_data: u32,
    /// Read-side busy line. The always-ready memory model drives this low for
    /// the whole run.
    pub read_busy: bool,
    /// Write-side busy line; driven low like [`read_busy`](Self::read_busy).
    pub write_busy: bool,
}

impl Default for InputSignals {
    /// Power-on levels: clock low, reset asserted, filler word on the read
    /// data lines, both busy lines low.
    fn default() -> Self {
        Self {
            clock: false,
            reset: true,
            read_data: FILLER_WORD,
            read_busy: false,
            write_busy: false,
        }
    }
}

/// Output pins sampled from the core after each evaluation step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutputSignals {
    /// Byte address driven by the core; doubles as the program-counter
    /// surrogate in diagnostics.
    pub address: u32,
    /// Core requests a read this cycle.
    pub read_strobe: bool,
    /// Value to write, lane-selected by [`write_mask`](Self::write_mask).
    pub write_data: u32,
    /// One bit per byte lane to be written; 0 means no write.
    pub write_mask: u8,
    /// Fault indicator; terminal once asserted.
    pub trap: bool,
    /// Opaque cause code sampled alongside [`trap`](Self::trap).
    pub trap_cause: u32,
}

/// An evaluatable processor core model.
///
/// The sequencer drives one iteration as `apply` then `eval` then `sample`;
/// outputs must reflect all inputs applied before the evaluation step.
pub trait Core {
    /// Latches the input pin levels for the next evaluation step.
    fn apply(&mut self, inputs: &InputSignals);

    /// Settles combinational and clocked state for the latched inputs.
    fn eval(&mut self);

    /// Samples the current output pin levels.
    fn sample(&self) -> OutputSignals;
}
