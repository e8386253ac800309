//! Configuration system for the co-simulation harness.
//!
//! This module defines the configuration structures used to parameterize a
//! run. It provides:
//! 1. **Defaults:** Baseline schedule constants (time budget, reset length, clock period).
//! 2. **Structures:** Hierarchical config for general run settings and the clock.
//!
//! Configuration is supplied as JSON (`--config` on the CLI) or use
//! `Config::default()` for the stock schedule.

use serde::Deserialize;

/// Default configuration constants for the harness.
///
/// These values define the baseline schedule when not explicitly overridden
/// in a JSON configuration file.
mod defaults {
    /// Maximum simulated-time budget for a run.
    ///
    /// The run phase stops once simulated time reaches this value, whether
    /// or not the core has trapped.
    pub const MAX_TIME: u64 = 1000;

    /// Number of iterations spent in the reset phase.
    ///
    /// Reset is held asserted while the clock runs for this many time units,
    /// so the core initializes from a known state before any stimulus.
    pub const RESET_TOGGLES: u64 = 10;

    /// Clock period in simulated-time units.
    ///
    /// A period of 2 flips the clock level on every iteration, which is the
    /// finest schedule the sequencer can express.
    pub const CLOCK_PERIOD: u64 = 2;
}

/// Root configuration structure for a harness run.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use rvcosim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.general.max_time, 1000);
/// assert_eq!(config.clock.period, 2);
/// assert!(config.general.console_trace);
/// ```
///
/// Deserializing from JSON with partial overrides:
///
/// ```
/// use rvcosim_core::config::Config;
///
/// let json = r#"{
///     "general": { "max_time": 200, "console_trace": false },
///     "clock": { "period": 10 }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.general.max_time, 200);
/// assert_eq!(config.general.reset_toggles, 10);
/// assert_eq!(config.clock.period, 10);
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// General run settings.
    #[serde(default)]
    pub general: GeneralConfig,
    /// Clock schedule parameters.
    #[serde(default)]
    pub clock: ClockConfig,
}

/// General run settings.
///
/// Controls the time budget, the reset schedule, and per-cycle console
/// reporting.
#[derive(Debug, Clone, Deserialize)]
pub struct GeneralConfig {
    /// Emit the per-cycle console report (cycle banner, bus activity,
    /// instruction classification). Defaults to on, matching interactive use;
    /// tests usually turn it off.
    #[serde(default = "GeneralConfig::default_console_trace")]
    pub console_trace: bool,

    /// Maximum simulated-time budget; the run phase stops at this time.
    #[serde(default = "GeneralConfig::default_max_time")]
    pub max_time: u64,

    /// Iterations spent holding reset asserted before the run phase.
    #[serde(default = "GeneralConfig::default_reset_toggles")]
    pub reset_toggles: u64,
}

impl GeneralConfig {
    /// Console reporting defaults to on.
    fn default_console_trace() -> bool {
        true
    }

    /// Returns the default simulated-time budget.
    fn default_max_time() -> u64 {
        defaults::MAX_TIME
    }

    /// Returns the default reset-phase length in iterations.
    fn default_reset_toggles() -> u64 {
        defaults::RESET_TOGGLES
    }
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            console_trace: true,
            max_time: defaults::MAX_TIME,
            reset_toggles: defaults::RESET_TOGGLES,
        }
    }
}

/// Clock schedule parameters.
#[derive(Debug, Clone, Deserialize)]
pub struct ClockConfig {
    /// Clock period in simulated-time units; the level is high for the first
    /// half of each period. Values below 2 are clamped by the schedule.
    #[serde(default = "ClockConfig::default_period")]
    pub period: u64,
}

impl ClockConfig {
    /// Returns the default clock period.
    fn default_period() -> u64 {
        defaults::CLOCK_PERIOD
    }
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            period: defaults::CLOCK_PERIOD,
        }
    }
}
