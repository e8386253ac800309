//! Cycle Sequencer Tests.
//!
//! Drives the full simulation loop against scripted and mock cores and
//! verifies the per-iteration contract: reset discipline, clock driving,
//! rising-edge bus servicing, the read-data latch, trap termination, and
//! trace forwarding.

use rvcosim_core::common::{FALLBACK_PROGRAM, FILLER_WORD, HarnessError};
use rvcosim_core::core::OutputSignals;
use rvcosim_core::mem::WordStore;
use rvcosim_core::models::FetchStream;
use rvcosim_core::trap::TrapEvent;

use crate::common::harness::{TestContext, program_store};
use crate::common::mocks::core::{MockCore, ScriptedCore, fetch, store, trap};
use crate::common::mocks::trace::{FailingTrace, RecordingTrace};

// ══════════════════════════════════════════════════════════
// 1. Reset phase
// ══════════════════════════════════════════════════════════

#[test]
fn reset_holds_for_the_configured_toggles_then_releases_once() {
    let ctx = TestContext::new().with_reset_toggles(10).with_max_time(50);
    let mut harness = ctx.harness(ScriptedCore::idle(), WordStore::default());
    let summary = harness.run().unwrap();

    let applied = &harness.core().applied;
    assert_eq!(applied.len(), 50);
    assert!(applied[..10].iter().all(|inputs| inputs.reset));
    assert!(applied[10..].iter().all(|inputs| !inputs.reset));
    assert_eq!(summary.end_time, 50);
    assert_eq!(summary.posedges, 20);
}

#[test]
fn reset_phase_services_no_edges() {
    // The budget equals the toggle count, so the run phase never starts
    let ctx = TestContext::new().with_reset_toggles(10).with_max_time(10);
    let mut harness = ctx.harness(ScriptedCore::new(vec![fetch(0)]), WordStore::default());
    let summary = harness.run().unwrap();

    assert_eq!(summary.end_time, 10);
    assert_eq!(summary.posedges, 0);
    assert_eq!(harness.core().consumed(), 0);
    assert_eq!(harness.stats().reads, 0);
}

#[test]
fn reset_phase_completes_even_past_the_budget() {
    let ctx = TestContext::new().with_reset_toggles(10).with_max_time(5);
    let mut harness = ctx.harness(ScriptedCore::idle(), WordStore::default());
    let summary = harness.run().unwrap();

    assert_eq!(summary.end_time, 10);
    assert_eq!(summary.posedges, 0);
}

#[test]
fn zero_toggles_starts_the_run_immediately() {
    let ctx = TestContext::new().with_reset_toggles(0).with_max_time(6);
    let mut harness = ctx.harness(ScriptedCore::new(vec![fetch(0)]), WordStore::default());
    let summary = harness.run().unwrap();

    let applied = &harness.core().applied;
    assert!(applied.iter().all(|inputs| !inputs.reset));
    // Edges at times 0, 2, and 4 are all serviced
    assert_eq!(summary.posedges, 3);
    assert_eq!(harness.core().consumed(), 1);
}

// ══════════════════════════════════════════════════════════
// 2. Clock driving
// ══════════════════════════════════════════════════════════

#[test]
fn clock_input_follows_the_schedule() {
    let ctx = TestContext::new().with_reset_toggles(4).with_max_time(16);
    let mut harness = ctx.harness(ScriptedCore::idle(), WordStore::default());
    harness.run().unwrap();

    for (time, inputs) in harness.core().applied.iter().enumerate() {
        assert_eq!(inputs.clock, time % 2 == 0, "clock level at {time}");
    }
}

#[test]
fn slow_clock_drives_half_period_levels() {
    let ctx = TestContext::new()
        .with_period(10)
        .with_reset_toggles(10)
        .with_max_time(40);
    let mut harness = ctx.harness(ScriptedCore::idle(), WordStore::default());
    let summary = harness.run().unwrap();

    for (time, inputs) in harness.core().applied.iter().enumerate() {
        assert_eq!(inputs.clock, time % 10 < 5, "clock level at {time}");
    }
    // Run-phase edges land at times 10, 20, and 30
    assert_eq!(summary.posedges, 3);
}

#[test]
fn default_run_reaches_the_full_budget() {
    let ctx = TestContext::new();
    let mut harness = ctx.harness(ScriptedCore::idle(), WordStore::default());
    let summary = harness.run().unwrap();

    assert_eq!(summary.end_time, 1000);
    assert_eq!(summary.posedges, 495);
    assert!(!summary.trapped());
    assert_eq!(harness.core().applied.len(), 1000);
    assert_eq!(harness.stats().time_units, 1000);
}

// ══════════════════════════════════════════════════════════
// 3. Read servicing and the read-data latch
// ══════════════════════════════════════════════════════════

#[test]
fn fetched_word_reaches_the_next_apply() {
    let ctx = TestContext::new().with_reset_toggles(2).with_max_time(8);
    let mut harness = ctx.harness(
        ScriptedCore::new(vec![fetch(0)]),
        program_store(&[0xAABB_CCDD]),
    );
    harness.run().unwrap();

    let applied = &harness.core().applied;
    // The edge at time 2 services the read; the latch carries the old
    // value into that iteration's apply and the new value from the next
    assert!(applied[..3].iter().all(|i| i.read_data == FILLER_WORD));
    assert!(applied[3..].iter().all(|i| i.read_data == 0xAABB_CCDD));
    assert_eq!(harness.stats().reads, 1);
    assert_eq!(harness.stats().reads_out_of_range, 0);
}

#[test]
fn out_of_range_fetch_latches_the_filler_word() {
    let ctx = TestContext::new().with_reset_toggles(2).with_max_time(8);
    let mut harness = ctx.harness(
        ScriptedCore::new(vec![fetch(0), fetch(0x1_0000)]),
        program_store(&[0xAABB_CCDD]),
    );
    harness.run().unwrap();

    let applied = &harness.core().applied;
    assert_eq!(applied[3].read_data, 0xAABB_CCDD);
    assert_eq!(applied[4].read_data, 0xAABB_CCDD);
    // The out-of-range read at time 4 answers with the filler word
    assert!(applied[5..].iter().all(|i| i.read_data == FILLER_WORD));
    assert_eq!(harness.stats().reads, 2);
    assert_eq!(harness.stats().reads_out_of_range, 1);
}

#[test]
fn read_completes_before_write_on_the_same_edge() {
    let mut readwrite = fetch(0);
    readwrite.write_data = 0xFFFF_FFFF;
    readwrite.write_mask = 0b1111;

    let ctx = TestContext::new().with_reset_toggles(2).with_max_time(6);
    let mut harness = ctx.harness(
        ScriptedCore::new(vec![readwrite]),
        program_store(&[0x1122_3344]),
    );
    harness.run().unwrap();

    // The read observed the pre-write word; the store holds the new one
    assert_eq!(harness.core().applied[3].read_data, 0x1122_3344);
    assert_eq!(harness.store().read(0), 0xFFFF_FFFF);
    assert_eq!(harness.stats().reads, 1);
    assert_eq!(harness.stats().writes, 1);
}

// ══════════════════════════════════════════════════════════
// 4. Write servicing
// ══════════════════════════════════════════════════════════

#[test]
fn masked_write_merges_only_selected_lanes() {
    let ctx = TestContext::new().with_reset_toggles(2).with_max_time(4);
    let mut harness = ctx.harness(
        ScriptedCore::new(vec![store(0x0, 0xAABB_CCDD, 0b0011)]),
        program_store(&[0x1122_3344]),
    );
    harness.run().unwrap();

    assert_eq!(harness.store().read(0), 0x1122_CCDD);
    assert_eq!(harness.stats().writes, 1);
    assert_eq!(harness.stats().writes_dropped, 0);
}

#[test]
fn out_of_range_write_is_dropped_and_counted() {
    let ctx = TestContext::new().with_reset_toggles(2).with_max_time(4);
    let mut harness = ctx.harness(
        ScriptedCore::new(vec![store(0x1_0000, 0xFFFF_FFFF, 0b1111)]),
        program_store(&[0x1122_3344]),
    );
    harness.run().unwrap();

    assert_eq!(harness.store().read(0), 0x1122_3344);
    assert_eq!(harness.stats().writes, 1);
    assert_eq!(harness.stats().writes_dropped, 1);
}

// ══════════════════════════════════════════════════════════
// 5. Trap termination
// ══════════════════════════════════════════════════════════

#[test]
fn trap_ends_the_run_at_the_iteration_boundary() {
    let ctx = TestContext::new().with_reset_toggles(2).with_max_time(100);
    let mut harness = ctx.harness(
        ScriptedCore::new(vec![fetch(0), fetch(4), trap(0x8, 3)]),
        program_store(&FALLBACK_PROGRAM),
    );
    let summary = harness.run().unwrap();

    assert!(summary.trapped());
    assert_eq!(
        summary.trap,
        Some(TrapEvent {
            cause: 3,
            location: 0x8
        })
    );
    // The trapping iteration at time 6 still completes before the loop exits
    assert_eq!(summary.end_time, 7);
    assert_eq!(summary.posedges, 3);
    assert_eq!(harness.core().applied.len(), 7);
    assert_eq!(harness.stats().time_units, 7);
}

#[test]
fn trap_iteration_still_reaches_the_trace() {
    let ctx = TestContext::new().with_reset_toggles(2).with_max_time(100);
    let mut harness = ctx.harness_with_trace(
        ScriptedCore::new(vec![fetch(0), fetch(4), trap(0x8, 3)]),
        program_store(&FALLBACK_PROGRAM),
        RecordingTrace::new(),
    );
    harness.run().unwrap();

    let trace = harness.trace();
    assert_eq!(trace.records.len(), 7);
    let (last_time, last) = trace.records.last().unwrap();
    assert_eq!(*last_time, 6);
    assert!(last.trap);
    assert_eq!(last.trap_cause, 3);
    assert!(trace.finished);
}

#[test]
fn nothing_is_serviced_after_the_trap_edge() {
    let ctx = TestContext::new().with_reset_toggles(2).with_max_time(100);
    let mut harness = ctx.harness(
        ScriptedCore::new(vec![trap(0x8, 3), store(0x0, 0xFFFF_FFFF, 0b1111)]),
        program_store(&[0x1122_3344]),
    );
    let summary = harness.run().unwrap();

    assert_eq!(summary.end_time, 3);
    assert_eq!(summary.posedges, 1);
    // The scripted write after the trap is never consumed or serviced
    assert_eq!(harness.core().consumed(), 1);
    assert_eq!(harness.stats().reads, 0);
    assert_eq!(harness.stats().writes, 0);
    assert_eq!(harness.store().read(0), 0x1122_3344);
}

// ══════════════════════════════════════════════════════════
// 6. Trace forwarding
// ══════════════════════════════════════════════════════════

#[test]
fn every_time_unit_reaches_the_trace_sink() {
    let ctx = TestContext::new().with_reset_toggles(2).with_max_time(10);
    let mut harness = ctx.harness_with_trace(
        ScriptedCore::idle(),
        WordStore::default(),
        RecordingTrace::new(),
    );
    harness.run().unwrap();

    let trace = harness.trace();
    assert_eq!(trace.records.len(), 10);
    for (expected, (time, _)) in trace.records.iter().enumerate() {
        assert_eq!(*time, expected as u64);
    }
    assert!(trace.records[0].1.clock);
    assert!(trace.records[0].1.reset);
    assert!(!trace.records[1].1.clock);
    assert!(!trace.records[2].1.reset);
    assert!(trace.finished);
}

#[test]
fn trace_failure_surfaces_as_a_harness_error() {
    let ctx = TestContext::new().with_reset_toggles(2).with_max_time(10);
    let mut harness = ctx.harness_with_trace(
        ScriptedCore::idle(),
        WordStore::default(),
        FailingTrace::after(3),
    );
    let err = harness.run().unwrap_err();
    assert!(matches!(err, HarnessError::Trace(_)));
}

// ══════════════════════════════════════════════════════════
// 7. Core invocation shape
// ══════════════════════════════════════════════════════════

#[test]
fn sequencer_applies_evaluates_and_samples_in_shape() {
    let mut core = MockCore::new();
    // One apply and eval per iteration; one sample per iteration for the
    // snapshot plus one per serviced edge (times 2 and 4)
    core.expect_apply().times(6).return_const(());
    core.expect_eval().times(6).return_const(());
    core.expect_sample()
        .times(8)
        .return_const(OutputSignals::default());

    let ctx = TestContext::new().with_reset_toggles(2).with_max_time(6);
    let mut harness = ctx.harness(core, WordStore::default());
    let summary = harness.run().unwrap();

    assert_eq!(summary.end_time, 6);
    assert_eq!(summary.posedges, 2);
}

// ══════════════════════════════════════════════════════════
// 8. End-to-end determinism
// ══════════════════════════════════════════════════════════

#[test]
fn fallback_program_run_is_deterministic() {
    let run = || {
        let ctx = TestContext::new();
        let mut harness = ctx.harness(FetchStream::new(), program_store(&FALLBACK_PROGRAM));
        let summary = harness.run().unwrap();
        let stats = harness.stats().clone();
        (summary, stats)
    };

    let (first, first_stats) = run();
    let (second, second_stats) = run();

    assert_eq!(first.end_time, 1000);
    assert_eq!(first.posedges, 495);
    assert!(!first.trapped());
    assert_eq!(first_stats.reads, 495);
    assert_eq!(first_stats.reads_out_of_range, 0);
    assert_eq!(first_stats.writes, 0);

    assert_eq!(first, second);
    assert_eq!(first_stats.reads, second_stats.reads);
    assert_eq!(first_stats.posedges, second_stats.posedges);
    assert_eq!(first_stats.time_units, second_stats.time_units);
}

#[test]
fn fetch_stream_trap_address_ends_the_run() {
    let ctx = TestContext::new();
    let mut harness = ctx.harness(
        FetchStream::new().with_trap(0x8, 0xb),
        program_store(&FALLBACK_PROGRAM),
    );
    let summary = harness.run().unwrap();

    assert!(summary.trapped());
    assert_eq!(
        summary.trap,
        Some(TrapEvent {
            cause: 0xb,
            location: 0x8
        })
    );
    // Two fetches complete before the armed address traps on the third edge
    assert_eq!(summary.posedges, 3);
    assert_eq!(harness.stats().reads, 2);
}
