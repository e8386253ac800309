//! VCD waveform output.
//!
//! A small value-change-dump writer sufficient for viewing harness runs in a
//! waveform viewer. [`VcdWriter`] handles the header, identifier codes, and
//! change records over any [`io::Write`] target; [`VcdTrace`] wires it up as
//! a [`TraceSink`] for the core's signal interface.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use super::{SignalSnapshot, TraceSink};

/// Handle to one declared wire, returned by [`VcdWriter::add_wire`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VarId(usize);

#[derive(Debug)]
struct VarState {
    code: String,
    width: u8,
    last: Option<u64>,
}

/// Streaming VCD writer.
///
/// Declaration calls come first (scopes and wires), then
/// [`enddefinitions`](Self::enddefinitions), then change records in
/// nondecreasing time order. Timestamps are emitted lazily, only when some
/// wire actually changes value, and repeated values are suppressed per wire.
#[derive(Debug)]
pub struct VcdWriter<W: Write> {
    out: W,
    vars: Vec<VarState>,
    current_time: Option<u64>,
}

impl<W: Write> VcdWriter<W> {
    /// Starts a VCD stream with a 1 ns timescale.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    pub fn new(mut out: W) -> io::Result<Self> {
        writeln!(out, "$timescale 1ns $end")?;
        Ok(Self {
            out,
            vars: Vec::new(),
            current_time: None,
        })
    }

    /// Opens a module scope.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    pub fn scope(&mut self, name: &str) -> io::Result<()> {
        writeln!(self.out, "$scope module {name} $end")
    }

    /// Closes the innermost open scope.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    pub fn upscope(&mut self) -> io::Result<()> {
        writeln!(self.out, "$upscope $end")
    }

    /// Declares a wire of `width` bits and returns its handle.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    pub fn add_wire(&mut self, width: u8, name: &str) -> io::Result<VarId> {
        let code = identifier_code(self.vars.len());
        writeln!(self.out, "$var wire {width} {code} {name} $end")?;
        self.vars.push(VarState {
            code,
            width,
            last: None,
        });
        Ok(VarId(self.vars.len() - 1))
    }

    /// Ends the declaration section.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    pub fn enddefinitions(&mut self) -> io::Result<()> {
        writeln!(self.out, "$enddefinitions $end")
    }

    /// Records `value` on `var` at `time`.
    ///
    /// A value equal to the wire's last recorded value writes nothing. The
    /// first change at a new time emits the `#time` marker; a wire's first
    /// recorded value is always written.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    pub fn change(&mut self, time: u64, var: VarId, value: u64) -> io::Result<()> {
        let masked = if self.vars[var.0].width >= 64 {
            value
        } else {
            value & ((1u64 << self.vars[var.0].width) - 1)
        };
        if self.vars[var.0].last == Some(masked) {
            return Ok(());
        }
        self.vars[var.0].last = Some(masked);
        if self.current_time != Some(time) {
            writeln!(self.out, "#{time}")?;
            self.current_time = Some(time);
        }
        if self.vars[var.0].width == 1 {
            writeln!(self.out, "{}{}", masked & 1, self.vars[var.0].code)
        } else {
            writeln!(self.out, "b{:b} {}", masked, self.vars[var.0].code)
        }
    }

    /// Flushes the underlying writer.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from the underlying writer.
    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// Maps a wire index to a short printable identifier code.
///
/// Codes draw from the 94 printable ASCII characters starting at `!`,
/// extending to multiple characters once the single-character range is
/// exhausted.
fn identifier_code(index: usize) -> String {
    const BASE: usize = 94;
    let mut code = String::new();
    let mut n = index;
    loop {
        let digit = u8::try_from(n % BASE).unwrap_or(0);
        code.insert(0, char::from(b'!' + digit));
        n /= BASE;
        if n == 0 {
            break;
        }
        n -= 1;
    }
    code
}

/// Trace sink that writes the core's signal interface to a VCD file.
///
/// Wire names match the core's port names so a waveform viewer shows the
/// same interface the console trace reports.
#[derive(Debug)]
pub struct VcdTrace {
    writer: VcdWriter<BufWriter<File>>,
    clock: VarId,
    reset: VarId,
    read_data: VarId,
    read_busy: VarId,
    write_busy: VarId,
    address: VarId,
    read_strobe: VarId,
    write_data: VarId,
    write_mask: VarId,
    trap: VarId,
    trap_cause: VarId,
}

impl VcdTrace {
    /// Creates the VCD file at `path` and writes the declaration header.
    ///
    /// # Errors
    ///
    /// Returns any I/O error from creating or writing the file.
    pub fn create(path: &Path) -> io::Result<Self> {
        let mut writer = VcdWriter::new(BufWriter::new(File::create(path)?))?;
        writer.scope("harness")?;
        let clock = writer.add_wire(1, "clk")?;
        let reset = writer.add_wire(1, "reset")?;
        let read_data = writer.add_wire(32, "mem_rdata")?;
        let read_busy = writer.add_wire(1, "mem_rbusy")?;
        let write_busy = writer.add_wire(1, "mem_wbusy")?;
        let address = writer.add_wire(32, "mem_addr")?;
        let read_strobe = writer.add_wire(1, "mem_rstrb")?;
        let write_data = writer.add_wire(32, "mem_wdata")?;
        let write_mask = writer.add_wire(4, "mem_wmask")?;
        let trap = writer.add_wire(1, "trap")?;
        let trap_cause = writer.add_wire(32, "trap_cause")?;
        writer.upscope()?;
        writer.enddefinitions()?;
        Ok(Self {
            writer,
            clock,
            reset,
            read_data,
            read_busy,
            write_busy,
            address,
            read_strobe,
            write_data,
            write_mask,
            trap,
            trap_cause,
        })
    }
}

impl TraceSink for VcdTrace {
    fn record(&mut self, time: u64, snapshot: &SignalSnapshot) -> io::Result<()> {
        self.writer.change(time, self.clock, u64::from(snapshot.clock))?;
        self.writer.change(time, self.reset, u64::from(snapshot.reset))?;
        self.writer
            .change(time, self.read_data, u64::from(snapshot.read_data))?;
        self.writer
            .change(time, self.read_busy, u64::from(snapshot.read_busy))?;
        self.writer
            .change(time, self.write_busy, u64::from(snapshot.write_busy))?;
        self.writer
            .change(time, self.address, u64::from(snapshot.address))?;
        self.writer
            .change(time, self.read_strobe, u64::from(snapshot.read_strobe))?;
        self.writer
            .change(time, self.write_data, u64::from(snapshot.write_data))?;
        self.writer
            .change(time, self.write_mask, u64::from(snapshot.write_mask))?;
        self.writer.change(time, self.trap, u64::from(snapshot.trap))?;
        self.writer
            .change(time, self.trap_cause, u64::from(snapshot.trap_cause))?;
        Ok(())
    }

    fn finish(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}
