//! Co-simulation harness CLI.
//!
//! This binary provides a single entry point for all simulation modes. It performs:
//! 1. **Core run:** Drive the fetch-stream core model over the memory bus with a loaded program image.
//! 2. **Counter demo:** Run the enable-gated counter on its fixed stimulus schedule.
//! 3. **Up/down demo:** Run the direction-switching counter on its fixed stimulus schedule.

use std::path::{Path, PathBuf};
use std::{fs, process};

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use rvcosim_core::config::Config;
use rvcosim_core::models::{FetchStream, counter, updown};
use rvcosim_core::sim::loader;
use rvcosim_core::sim::sequencer::Harness;
use rvcosim_core::trace::vcd::VcdTrace;

#[derive(Parser, Debug)]
#[command(
    name = "rvcosim",
    author,
    version,
    about = "Cycle-driven co-simulation harness for RISC-V core models",
    long_about = "Drive a core model over the synchronous memory bus, or run one of the counter demos.\n\nThe core run loads a hex program image, services bus reads and writes each rising edge, and writes a VCD waveform.\n\nExamples:\n  rvcosim run\n  rvcosim run -i program.hex -t run.vcd\n  rvcosim run --trap-at 0x40 --trap-cause 0x3\n  rvcosim counter --max-time 100\n  rvcosim updown --max-time 200"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Drive the fetch-stream core model over the memory bus.
    Run {
        /// Program image in hex text format (one 32-bit word per line).
        #[arg(short, long, default_value = "memory.hex")]
        image: PathBuf,

        /// Waveform output path.
        #[arg(short, long, default_value = "waveform.vcd")]
        trace: PathBuf,

        /// JSON configuration file (defaults apply to omitted fields).
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Arm a core trap at this fetch address (hex accepted).
        #[arg(long, value_parser = parse_u32)]
        trap_at: Option<u32>,

        /// Cause code the core reports with --trap-at (hex accepted).
        #[arg(long, value_parser = parse_u32, default_value = "0x3")]
        trap_cause: u32,
    },

    /// Run the enable-gated counter demo.
    Counter {
        /// Simulated-time budget.
        #[arg(long, default_value_t = 100)]
        max_time: u64,

        /// Waveform output path.
        #[arg(short, long, default_value = "waveform.vcd")]
        trace: PathBuf,
    },

    /// Run the up/down counter demo.
    Updown {
        /// Simulated-time budget.
        #[arg(long, default_value_t = 200)]
        max_time: u64,

        /// Waveform output path.
        #[arg(short, long, default_value = "waveform.vcd")]
        trace: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            image,
            trace,
            config,
            trap_at,
            trap_cause,
        } => cmd_run(&image, &trace, config.as_deref(), trap_at, trap_cause),
        Commands::Counter { max_time, trace } => {
            println!("[*] Counter demo: max_time={max_time}");
            if let Err(e) = counter::run_demo(max_time, Some(&trace)) {
                eprintln!("\n[!] FATAL: {e}");
                process::exit(1);
            }
        }
        Commands::Updown { max_time, trace } => {
            println!("[*] Up/down counter demo: max_time={max_time}");
            if let Err(e) = updown::run_demo(max_time, Some(&trace)) {
                eprintln!("\n[!] FATAL: {e}");
                process::exit(1);
            }
        }
    }
}

/// Parses a 32-bit value from a decimal or `0x`-prefixed hex literal.
fn parse_u32(value: &str) -> Result<u32, String> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"));
    match digits {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => value.parse(),
    }
    .map_err(|e| format!("invalid value '{value}': {e}"))
}

/// Loads the configuration file, or the defaults when none is given.
///
/// Exits the process on an unreadable or invalid file.
fn load_config(path: Option<&Path>) -> Config {
    let Some(path) = path else {
        return Config::default();
    };
    let text = fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: Could not read config '{}': {}", path.display(), e);
        process::exit(1);
    });
    serde_json::from_str(&text).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: Invalid config '{}': {}", path.display(), e);
        process::exit(1);
    })
}

/// Runs the harness: loads the program image, then drives the fetch-stream
/// core until the time budget runs out or the core traps.
///
/// A trap ends the run but is still a successful simulation; only startup
/// failures exit nonzero.
fn cmd_run(
    image: &Path,
    trace_path: &Path,
    config_path: Option<&Path>,
    trap_at: Option<u32>,
    trap_cause: u32,
) {
    let config = load_config(config_path);

    println!(
        "Configuration: {}",
        config_path.map_or_else(|| "default".to_string(), |p| p.display().to_string())
    );
    println!(
        "  Console trace: {}  Max time: {}  Reset toggles: {}  Clock period: {}",
        config.general.console_trace,
        config.general.max_time,
        config.general.reset_toggles,
        config.clock.period
    );
    println!();
    println!("[*] Program image: {}", image.display());

    let store = loader::load_store(image).unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    });

    let mut core = FetchStream::new();
    if let Some(address) = trap_at {
        println!("[*] Trap armed at 0x{address:x} (cause 0x{trap_cause:x})");
        core = core.with_trap(address, trap_cause);
    }

    let trace = VcdTrace::create(trace_path).unwrap_or_else(|e| {
        eprintln!(
            "\n[!] FATAL: Could not create waveform '{}': {}",
            trace_path.display(),
            e
        );
        process::exit(1);
    });

    let mut harness = Harness::with_trace(core, store, &config, trace);

    println!("\nStarting simulation...\n");

    let summary = harness.run().unwrap_or_else(|e| {
        eprintln!("\n[!] FATAL: {e}");
        process::exit(1);
    });

    println!("\nSimulation finished after {} cycles", summary.posedges);
    harness.stats().print();
}
