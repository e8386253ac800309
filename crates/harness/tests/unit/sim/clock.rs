//! Clock Schedule Tests.
//!
//! Verifies the pure time-to-level function: level shape for the default and
//! the demo period, rising-edge placement, and the minimum-period clamp.

use proptest::prelude::*;
use rvcosim_core::sim::clock::ClockSchedule;

// ══════════════════════════════════════════════════════════
// 1. Default period
// ══════════════════════════════════════════════════════════

#[test]
fn default_period_flips_every_time_unit() {
    let clock = ClockSchedule::default();
    assert_eq!(clock.period(), 2);
    for time in 0..32u64 {
        assert_eq!(clock.level(time), time % 2 == 0, "level at {time}");
    }
}

#[test]
fn default_period_rises_on_even_times() {
    let clock = ClockSchedule::default();
    for time in 0..32u64 {
        assert_eq!(clock.rising_edge_at(time), time % 2 == 0, "edge at {time}");
    }
}

// ══════════════════════════════════════════════════════════
// 2. Demo period
// ══════════════════════════════════════════════════════════

#[test]
fn period_ten_holds_high_for_five_units() {
    let clock = ClockSchedule::new(10);
    assert_eq!(clock.half_period(), 5);
    for time in 0..10u64 {
        assert_eq!(clock.level(time), time < 5, "level at {time}");
    }
    // The pattern repeats every period
    assert!(clock.level(10));
    assert!(!clock.level(17));
}

#[test]
fn period_ten_rises_on_period_multiples() {
    let clock = ClockSchedule::new(10);
    assert!(clock.rising_edge_at(0));
    assert!(clock.rising_edge_at(10));
    assert!(clock.rising_edge_at(250));
    assert!(!clock.rising_edge_at(5));
    assert!(!clock.rising_edge_at(11));
}

// ══════════════════════════════════════════════════════════
// 3. Period clamping
// ══════════════════════════════════════════════════════════

#[test]
fn degenerate_periods_clamp_to_the_minimum() {
    assert_eq!(ClockSchedule::new(0).period(), ClockSchedule::MIN_PERIOD);
    assert_eq!(ClockSchedule::new(1).period(), ClockSchedule::MIN_PERIOD);
    assert_eq!(ClockSchedule::new(2).period(), 2);
    assert_eq!(ClockSchedule::new(3).period(), 3);
}

// ══════════════════════════════════════════════════════════
// 4. Level/edge agreement
// ══════════════════════════════════════════════════════════

proptest! {
    /// An edge is reported exactly where the level function transitions
    /// from low to high.
    #[test]
    fn edges_match_level_transitions(period in 2u64..=64, time in 1u64..=10_000) {
        let clock = ClockSchedule::new(period);
        let transition = clock.level(time) && !clock.level(time - 1);
        prop_assert_eq!(clock.rising_edge_at(time), transition);
    }
}
