//! Run statistics collection and reporting.
//!
//! This module tracks counters for a harness run. It provides:
//! 1. **Run summary:** Elapsed host time, simulated-time units, and positive clock edges.
//! 2. **Bus activity:** Read and write counts, including out-of-range reads and dropped writes.

use std::time::Instant;

/// Counters accumulated over one harness run.
#[derive(Debug, Clone)]
pub struct HarnessStats {
    start_time: Instant,
    /// Simulated-time units elapsed.
    pub time_units: u64,
    /// Positive clock edges observed in the run phase.
    pub posedges: u64,
    /// Bus reads serviced.
    pub reads: u64,
    /// Bus reads that fell outside the word store.
    pub reads_out_of_range: u64,
    /// Bus writes serviced.
    pub writes: u64,
    /// Bus writes dropped for falling outside the word store.
    pub writes_dropped: u64,
}

impl Default for HarnessStats {
    /// Returns the default value.
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            time_units: 0,
            posedges: 0,
            reads: 0,
            reads_out_of_range: 0,
            writes: 0,
            writes_dropped: 0,
        }
    }
}

/// Section names for selective stats output.
///
/// Valid section identifiers: `"summary"`, `"bus"`. Pass an empty slice to
/// `print_sections` to print all sections.
pub const STATS_SECTIONS: &[&str] = &["summary", "bus"];

impl HarnessStats {
    /// Counts one positive clock edge.
    pub fn record_posedge(&mut self) {
        self.posedges += 1;
    }

    /// Counts one serviced read.
    pub fn record_read(&mut self, out_of_range: bool) {
        self.reads += 1;
        if out_of_range {
            self.reads_out_of_range += 1;
        }
    }

    /// Counts one serviced write.
    pub fn record_write(&mut self, dropped: bool) {
        self.writes += 1;
        if dropped {
            self.writes_dropped += 1;
        }
    }

    /// Prints only the requested statistics sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"` or `"bus"`.
    /// Pass an empty slice to print all sections (same as `print()`).
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);
        let duration = self.start_time.elapsed();
        let seconds = duration.as_secs_f64();
        let reads = if self.reads == 0 { 1 } else { self.reads };
        let writes = if self.writes == 0 { 1 } else { self.writes };

        if want("summary") {
            let khz = (self.posedges as f64 / seconds) / 1000.0;
            println!("\n==========================================================");
            println!("CO-SIMULATION HARNESS STATISTICS");
            println!("==========================================================");
            println!("host_seconds             {seconds:.4} s");
            println!("sim_time_units           {}", self.time_units);
            println!("sim_posedges             {}", self.posedges);
            println!("sim_freq                 {khz:.2} kHz");
            println!("----------------------------------------------------------");
        }
        if want("bus") {
            println!("BUS ACTIVITY");
            println!(
                "  reads                  {} ({:.2}% out of range)",
                self.reads,
                (self.reads_out_of_range as f64 / reads as f64) * 100.0
            );
            println!(
                "  writes                 {} ({:.2}% dropped)",
                self.writes,
                (self.writes_dropped as f64 / writes as f64) * 100.0
            );
        }
        println!("==========================================================");
    }

    /// Prints all statistics sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
