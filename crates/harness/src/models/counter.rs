//! Enable-gated counter demo.
//!
//! An 8-bit counter with synchronous reset and an enable input, advanced on
//! rising clock edges. [`run_demo`] drives it on the fixed schedule the
//! hardware testbench used: a ten-unit clock period, reset for the first 20
//! time units, enable from time 30, printing the count at every rising edge
//! once enabled.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use crate::common::error::HarnessError;
use crate::sim::clock::ClockSchedule;
use crate::trace::vcd::{VarId, VcdWriter};

/// Clock period for the counter demos, in time units.
pub const DEMO_CLOCK_PERIOD: u64 = 10;
/// Reset holds for this many initial time units.
pub const DEMO_RESET_WINDOW: u64 = 20;
/// Enable asserts from this time unit onward.
pub const DEMO_ENABLE_TIME: u64 = 30;

/// 8-bit counter with synchronous reset and enable.
#[derive(Debug, Clone, Default)]
pub struct Counter {
    clk: bool,
    reset: bool,
    enable: bool,
    prev_clk: bool,
    count: u8,
}

impl Counter {
    /// A counter in its power-on state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drives the input levels for the next evaluation.
    pub fn set_inputs(&mut self, clk: bool, reset: bool, enable: bool) {
        self.clk = clk;
        self.reset = reset;
        self.enable = enable;
    }

    /// Settles state after an input change. On a rising clock edge the
    /// count clears under reset, increments under enable, and otherwise
    /// holds; the count wraps at 256.
    pub fn eval(&mut self) {
        let rising = self.clk && !self.prev_clk;
        self.prev_clk = self.clk;
        if !rising {
            return;
        }
        if self.reset {
            self.count = 0;
        } else if self.enable {
            self.count = self.count.wrapping_add(1);
        }
    }

    /// Current count value.
    pub fn count(&self) -> u8 {
        self.count
    }
}

struct DemoTrace {
    writer: VcdWriter<BufWriter<File>>,
    clk: VarId,
    reset: VarId,
    enable: VarId,
    count: VarId,
}

impl DemoTrace {
    fn create(path: &Path) -> io::Result<Self> {
        let mut writer = VcdWriter::new(BufWriter::new(File::create(path)?))?;
        writer.scope("counter")?;
        let clk = writer.add_wire(1, "clk")?;
        let reset = writer.add_wire(1, "reset")?;
        let enable = writer.add_wire(1, "enable")?;
        let count = writer.add_wire(8, "count")?;
        writer.upscope()?;
        writer.enddefinitions()?;
        Ok(Self {
            writer,
            clk,
            reset,
            enable,
            count,
        })
    }

    fn record(&mut self, time: u64, model: &Counter) -> io::Result<()> {
        self.writer.change(time, self.clk, u64::from(model.clk))?;
        self.writer.change(time, self.reset, u64::from(model.reset))?;
        self.writer.change(time, self.enable, u64::from(model.enable))?;
        self.writer.change(time, self.count, u64::from(model.count))?;
        Ok(())
    }
}

/// Runs the counter on the fixed demo schedule for `max_time` time units.
///
/// Prints the count at every rising edge once enable has asserted, writes a
/// waveform when `trace_path` is given, and returns the final count.
///
/// # Errors
///
/// Returns [`HarnessError::Trace`] when the waveform file cannot be
/// written.
pub fn run_demo(max_time: u64, trace_path: Option<&Path>) -> Result<u8, HarnessError> {
    let clock = ClockSchedule::new(DEMO_CLOCK_PERIOD);
    let mut model = Counter::new();
    let mut trace = match trace_path {
        Some(path) => Some(DemoTrace::create(path)?),
        None => None,
    };

    for time in 0..max_time {
        let clk = clock.level(time);
        let reset = time < DEMO_RESET_WINDOW;
        let enable = time >= DEMO_ENABLE_TIME;
        model.set_inputs(clk, reset, enable);
        model.eval();

        if clock.rising_edge_at(time) && enable {
            println!("Time {time}: count = {}", model.count());
        }

        if let Some(trace) = trace.as_mut() {
            trace.record(time, &model)?;
        }
    }

    if let Some(trace) = trace.as_mut() {
        trace.writer.flush()?;
    }
    println!("Simulation finished.");
    Ok(model.count())
}
