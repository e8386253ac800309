//! Up/down counter demo.
//!
//! The enable-gated counter extended with a direction input. The demo
//! schedule matches [`super::counter`] and additionally flips the direction
//! every 50 time units, so the count climbs, falls back through zero with
//! 8-bit wraparound, and climbs again.

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;

use crate::common::error::HarnessError;
use crate::models::counter::{DEMO_CLOCK_PERIOD, DEMO_ENABLE_TIME, DEMO_RESET_WINDOW};
use crate::sim::clock::ClockSchedule;
use crate::trace::vcd::{VarId, VcdWriter};

/// The direction input flips every this many time units.
pub const DEMO_DIRECTION_WINDOW: u64 = 50;

/// 8-bit counter with synchronous reset, enable, and a direction input.
///
/// Direction low counts up, direction high counts down.
#[derive(Debug, Clone, Default)]
pub struct UpDownCounter {
    clk: bool,
    reset: bool,
    enable: bool,
    up_down: bool,
    prev_clk: bool,
    count: u8,
}

impl UpDownCounter {
    /// A counter in its power-on state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drives the input levels for the next evaluation.
    pub fn set_inputs(&mut self, clk: bool, reset: bool, enable: bool, up_down: bool) {
        self.clk = clk;
        self.reset = reset;
        self.enable = enable;
        self.up_down = up_down;
    }

    /// Settles state after an input change. On a rising clock edge the
    /// count clears under reset, steps by one in the selected direction
    /// under enable, and otherwise holds; the count wraps in both
    /// directions.
    pub fn eval(&mut self) {
        let rising = self.clk && !self.prev_clk;
        self.prev_clk = self.clk;
        if !rising {
            return;
        }
        if self.reset {
            self.count = 0;
        } else if self.enable {
            self.count = if self.up_down {
                self.count.wrapping_sub(1)
            } else {
                self.count.wrapping_add(1)
            };
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
    up_down: VarId,
    count: VarId,
}

impl DemoTrace {
    fn create(path: &Path) -> io::Result<Self> {
        let mut writer = VcdWriter::new(BufWriter::new(File::create(path)?))?;
        writer.scope("updown_counter")?;
        let clk = writer.add_wire(1, "clk")?;
        let reset = writer.add_wire(1, "reset")?;
        let enable = writer.add_wire(1, "enable")?;
        let up_down = writer.add_wire(1, "up_down")?;
        let count = writer.add_wire(8, "count")?;
        writer.upscope()?;
        writer.enddefinitions()?;
        Ok(Self {
            writer,
            clk,
            reset,
            enable,
            up_down,
            count,
        })
    }

    fn record(&mut self, time: u64, model: &UpDownCounter) -> io::Result<()> {
        self.writer.change(time, self.clk, u64::from(model.clk))?;
        self.writer.change(time, self.reset, u64::from(model.reset))?;
        self.writer.change(time, self.enable, u64::from(model.enable))?;
        self.writer
            .change(time, self.up_down, u64::from(model.up_down))?;
        self.writer.change(time, self.count, u64::from(model.count))?;
        Ok(())
    }
}

/// Runs the up/down counter on the fixed demo schedule for `max_time` time
/// units.
///
/// Prints the count and direction at every rising edge once enable has
/// asserted, writes a waveform when `trace_path` is given, and returns the
/// final count.
///
/// # Errors
///
/// Returns [`HarnessError::Trace`] when the waveform file cannot be
/// written.
pub fn run_demo(max_time: u64, trace_path: Option<&Path>) -> Result<u8, HarnessError> {
    let clock = ClockSchedule::new(DEMO_CLOCK_PERIOD);
    let mut model = UpDownCounter::new();
    let mut trace = match trace_path {
        Some(path) => Some(DemoTrace::create(path)?),
        None => None,
    };

    for time in 0..max_time {
        let clk = clock.level(time);
        let reset = time < DEMO_RESET_WINDOW;
        let enable = time >= DEMO_ENABLE_TIME;
        let up_down = (time / DEMO_DIRECTION_WINDOW) % 2 == 1;
        model.set_inputs(clk, reset, enable, up_down);
        model.eval();

        if clock.rising_edge_at(time) && enable {
            println!(
                "Time {time}: count = {} (up_down = {})",
                model.count(),
                i32::from(up_down)
            );
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
