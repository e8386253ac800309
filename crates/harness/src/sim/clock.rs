//! Clock schedule.
//!
//! The simulated clock is a pure function of the time counter: the level at
//! time `T` is `(T % period) < half_period`. With the default period of two
//! time units the level flips every iteration; the counter demos use a
//! period of ten. Rising edges fall on multiples of the period.

/// Derives the clock level from the simulated-time counter.
///
/// # Examples
///
/// ```
/// use rvcosim_core::sim::clock::ClockSchedule;
///
/// let clock = ClockSchedule::new(2);
/// assert!(clock.level(0));
/// assert!(!clock.level(1));
/// assert!(clock.rising_edge_at(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockSchedule {
    period: u64,
}

impl ClockSchedule {
    /// Shortest usable period: one high unit, one low unit.
    pub const MIN_PERIOD: u64 = 2;

    /// Builds a schedule with the given full period in time units.
    ///
    /// Periods below [`Self::MIN_PERIOD`] are clamped up to it; a shorter
    /// period cannot express both clock levels.
    pub fn new(period: u64) -> Self {
        Self {
            period: period.max(Self::MIN_PERIOD),
        }
    }

    /// The full period in time units.
    pub fn period(&self) -> u64 {
        self.period
    }

    /// Time units the clock spends high at the start of each period.
    pub fn half_period(&self) -> u64 {
        self.period / 2
    }

    /// Clock level at simulated time `time`.
    pub fn level(&self, time: u64) -> bool {
        (time % self.period) < self.half_period()
    }

    /// Whether `time` sits on a low-to-high transition of the level
    /// function, i.e. on a multiple of the period.
    pub fn rising_edge_at(&self, time: u64) -> bool {
        time % self.period == 0
    }
}

impl Default for ClockSchedule {
    /// The fastest schedule: level flips every time unit.
    fn default() -> Self {
        Self::new(Self::MIN_PERIOD)
    }
}
