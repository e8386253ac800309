//! Cycle sequencer.
//!
//! This module owns the simulation loop that drives a core model. Each run
//! moves through three phases:
//! 1. **Reset phase:** Toggles the clock for a fixed number of half-periods with reset held asserted, so the core settles into a known state.
//! 2. **Release phase:** Deasserts reset once; it never re-asserts for the remainder of the run.
//! 3. **Run phase:** Advances one time unit per iteration until the time budget runs out or the core traps.
//!
//! Every iteration derives the clock level from the time counter, applies
//! the input signals, evaluates the core, and forwards a snapshot to the
//! trace sink. On a rising edge the sampled outputs additionally pass
//! through the bus responder, then the trap monitor, then the diagnostic
//! classifier, in that order. A trap finishes the current iteration
//! normally; the loop exits at the iteration boundary.

use tracing::warn;

use crate::bus::{self, BusRequest};
use crate::common::error::HarnessError;
use crate::config::Config;
use crate::core::{Core, InputSignals};
use crate::isa;
use crate::mem::WordStore;
use crate::sim::clock::ClockSchedule;
use crate::stats::HarnessStats;
use crate::trace::{NullTrace, SignalSnapshot, TraceSink};
use crate::trap::{self, TrapEvent};

/// Result of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Simulated time after the final iteration.
    pub end_time: u64,
    /// Positive clock edges observed in the run phase.
    pub posedges: u64,
    /// The trap that ended the run early, if any.
    pub trap: Option<TrapEvent>,
}

impl RunSummary {
    /// Whether the run ended on a core trap rather than the time budget.
    pub fn trapped(&self) -> bool {
        self.trap.is_some()
    }
}

/// Drives one core model over the memory bus for one run.
///
/// The harness owns every piece of run state: the word store, the input
/// signal levels, the time counter, and the accumulated statistics. Nothing
/// is process-global, so independent harnesses can run side by side in one
/// test process.
#[derive(Debug)]
pub struct Harness<C: Core, T: TraceSink = NullTrace> {
    core: C,
    store: WordStore,
    trace: T,
    clock: ClockSchedule,
    inputs: InputSignals,
    prev_level: bool,
    time: u64,
    max_time: u64,
    reset_toggles: u64,
    console_trace: bool,
    trap: Option<TrapEvent>,
    stats: HarnessStats,
}

impl<C: Core> Harness<C, NullTrace> {
    /// Builds a harness with no waveform output.
    pub fn new(core: C, store: WordStore, config: &Config) -> Self {
        Self::with_trace(core, store, config, NullTrace)
    }
}

impl<C: Core, T: TraceSink> Harness<C, T> {
    /// Builds a harness that forwards snapshots to `trace`.
    pub fn with_trace(core: C, store: WordStore, config: &Config, trace: T) -> Self {
        Self {
            core,
            store,
            trace,
            clock: ClockSchedule::new(config.clock.period),
            inputs: InputSignals::default(),
            prev_level: false,
            time: 0,
            max_time: config.general.max_time,
            reset_toggles: config.general.reset_toggles,
            console_trace: config.general.console_trace,
            trap: None,
            stats: HarnessStats::default(),
        }
    }

    /// Runs the three phases to completion.
    ///
    /// Returns a summary whether the run ended on the time budget or on a
    /// trap; a trap is a property of the core under test, not a harness
    /// failure.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError::Trace`] when the trace sink fails.
    pub fn run(&mut self) -> Result<RunSummary, HarnessError> {
        for _ in 0..self.reset_toggles {
            self.step(false)?;
        }
        self.inputs.reset = false;

        while self.time < self.max_time {
            self.step(true)?;
            if self.trap.is_some() {
                break;
            }
        }

        self.trace.finish()?;
        self.stats.time_units = self.time;
        Ok(RunSummary {
            end_time: self.time,
            posedges: self.stats.posedges,
            trap: self.trap,
        })
    }

    /// One sequencer iteration: drive the clock level, evaluate the core,
    /// service the edge when requested, snapshot, advance time.
    fn step(&mut self, service_edges: bool) -> Result<(), HarnessError> {
        let level = self.clock.level(self.time);
        let rising = level && !self.prev_level;
        self.prev_level = level;

        self.inputs.clock = level;
        self.core.apply(&self.inputs);
        self.core.eval();

        if rising && service_edges {
            self.service_edge();
        }

        let snapshot = SignalSnapshot::capture(&self.inputs, &self.core.sample());
        self.trace.record(self.time, &snapshot)?;
        self.time += 1;
        Ok(())
    }

    /// Rising-edge pipeline: bus responder, trap monitor, then the
    /// diagnostic classifier on any word just fetched in range.
    fn service_edge(&mut self) {
        self.stats.record_posedge();
        let outputs = self.core.sample();

        if self.console_trace {
            println!("\nCycle {} (sim_time={}):", self.stats.posedges, self.time);
            println!("  PC: 0x{:x}", outputs.address);
            println!("  Reset: {}", i32::from(self.inputs.reset));
            println!("  mem_rstrb: {}", i32::from(outputs.read_strobe));
        }

        let request = BusRequest::sample(&outputs);
        let response = bus::respond(&mut self.store, &request);

        let mut fetched = None;
        if let Some(read) = response.read {
            self.stats.record_read(read.out_of_range);
            self.inputs.read_data = read.value;
            if read.out_of_range {
                if self.console_trace {
                    println!(
                        "  Memory read out of bounds at 0x{:x}, returning NOP",
                        read.address
                    );
                }
            } else {
                if self.console_trace {
                    println!("  Memory read at 0x{:x} = 0x{:08x}", read.address, read.value);
                }
                fetched = Some(read.value);
            }
        }

        if let Some(write) = response.write {
            self.stats.record_write(write.dropped);
            if self.console_trace && !write.dropped {
                println!(
                    "  Memory write at 0x{:x} = 0x{:08x} (mask: 0x{:x})",
                    write.address, write.value, write.mask
                );
            }
        }

        self.trap = trap::check(&outputs);
        if let Some(event) = self.trap {
            warn!(
                cause = event.cause,
                location = event.location,
                "core signaled a trap"
            );
            if self.console_trace {
                println!("\nTrap occurred at cycle {}", self.stats.posedges);
                println!("Trap Cause: 0x{:x}", event.cause);
                println!("Current PC: 0x{:x}", event.location);
            }
        } else if let Some(word) = fetched {
            if self.console_trace {
                println!("Instruction: 0x{word:08x} ({})", isa::classify(word));
            }
        }
    }

    /// The core under test.
    pub fn core(&self) -> &C {
        &self.core
    }

    /// The word store, reflecting any writes the core has performed.
    pub fn store(&self) -> &WordStore {
        &self.store
    }

    /// The trace sink.
    pub fn trace(&self) -> &T {
        &self.trace
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> &HarnessStats {
        &self.stats
    }
}
