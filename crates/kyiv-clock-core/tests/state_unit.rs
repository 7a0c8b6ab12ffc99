// crates/kyiv-clock-core/tests/state_unit.rs
// ============================================================================
// Module: Clock State Unit Tests
// Description: Offset commit, offline marking, and corrected reads.
// Purpose: Verify correction semantics survive failed resyncs unchanged.
// Dependencies: kyiv-clock-core
// ============================================================================

//! ## Overview
//! The correction offset is zero until the first successful sync, overwritten
//! on every success, and never reset by a failure; only the sync flag moves.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

use kyiv_clock_core::ClockState;
use kyiv_clock_core::UnixMillis;

#[test]
fn fresh_state_has_zero_offset_and_is_unsynced() {
    let state = ClockState::new();
    assert_eq!(state.correction_ms(), 0);
    assert!(!state.is_synced());
    let local = UnixMillis::from_millis(1_000_000);
    assert_eq!(state.corrected(local), local);
}

#[test]
fn committed_offset_advances_corrected_reads() {
    let state = ClockState::new();
    state.commit_correction(5_000);
    assert!(state.is_synced());

    // Remote observed 5000 ms ahead of local: every corrected read advances
    // by exactly that delta until the next sync.
    let local = UnixMillis::from_millis(1_705_305_600_000);
    assert_eq!(state.corrected(local).as_millis(), 1_705_305_605_000);
}

#[test]
fn failed_resync_keeps_prior_offset() {
    let state = ClockState::new();
    state.commit_correction(5_000);
    state.mark_offline();

    assert!(!state.is_synced());
    assert_eq!(state.correction_ms(), 5_000);
    let local = UnixMillis::from_millis(0);
    assert_eq!(state.corrected(local).as_millis(), 5_000);
}

#[test]
fn offset_is_overwritten_on_every_success() {
    let state = ClockState::new();
    state.commit_correction(5_000);
    state.commit_correction(-250);
    assert_eq!(state.correction_ms(), -250);
    assert!(state.is_synced());
}

#[test]
fn corrected_reads_saturate_instead_of_wrapping() {
    let state = ClockState::new();
    state.commit_correction(i64::MAX);
    let local = UnixMillis::from_millis(i64::MAX);
    assert_eq!(state.corrected(local).as_millis(), i64::MAX);
}

#[test]
fn delta_from_is_signed() {
    let remote = UnixMillis::from_millis(10_000);
    let local = UnixMillis::from_millis(4_000);
    assert_eq!(remote.delta_from(local), 6_000);
    assert_eq!(local.delta_from(remote), -6_000);
}
