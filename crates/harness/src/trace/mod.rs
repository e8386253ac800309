//! Waveform trace sinks.
//!
//! Once per simulated-time unit the sequencer forwards a snapshot of every
//! interface signal to a trace sink. The sink owns the on-disk encoding;
//! the harness only guarantees that snapshots arrive keyed by a strictly
//! increasing time value. [`NullTrace`] discards snapshots for runs that do
//! not need a waveform; [`vcd::VcdTrace`] writes a VCD file.

use std::io;

use crate::core::{InputSignals, OutputSignals};

pub mod vcd;

pub use vcd::VcdTrace;

/// All interface signal levels at one simulated-time unit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SignalSnapshot {
    /// Clock level driven into the core.
    pub clock: bool,
    /// Reset level driven into the core (high while asserted).
    pub reset: bool,
    /// Read data presented on the core's input line.
    pub read_data: u32,
    /// Read-busy level driven into the core.
    pub read_busy: bool,
    /// Write-busy level driven into the core.
    pub write_busy: bool,
    /// Byte address driven by the core.
    pub address: u32,
    /// Read strobe driven by the core.
    pub read_strobe: bool,
    /// Write data driven by the core.
    pub write_data: u32,
    /// Write byte-lane mask driven by the core.
    pub write_mask: u8,
    /// Fault indicator driven by the core.
    pub trap: bool,
    /// Fault cause driven by the core.
    pub trap_cause: u32,
}

impl SignalSnapshot {
    /// Captures the current levels of both signal directions.
    pub fn capture(inputs: &InputSignals, outputs: &OutputSignals) -> Self {
        Self {
            clock: inputs.clock,
            reset: inputs.reset,
            read_data: inputs.read_data,
            read_busy: inputs.read_busy,
            write_busy: inputs.write_busy,
            address: outputs.address,
            read_strobe: outputs.read_strobe,
            write_data: outputs.write_data,
            write_mask: outputs.write_mask,
            trap: outputs.trap,
            trap_cause: outputs.trap_cause,
        }
    }
}

/// Receives one snapshot per simulated-time unit.
pub trait TraceSink {
    /// Records the signal levels at `time`.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    fn record(&mut self, time: u64, snapshot: &SignalSnapshot) -> io::Result<()>;

    /// Completes the trace after the final snapshot.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from flushing the underlying writer.
    fn finish(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// Discards every snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTrace;

impl TraceSink for NullTrace {
    fn record(&mut self, _time: u64, _snapshot: &SignalSnapshot) -> io::Result<()> {
        Ok(())
    }
}
