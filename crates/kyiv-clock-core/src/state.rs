// crates/kyiv-clock-core/src/state.rs
// ============================================================================
// Module: Clock State
// Description: Correction offset and sync flag shared by render and resync.
// Purpose: Encapsulate per-instance clock state behind atomic accessors.
// Dependencies: std
// ============================================================================

//! ## Overview
//! One [`ClockState`] exists per clock instance. The resync path is the only
//! writer; the render path only reads. Both values are single-word atomics
//! with last-writer-wins semantics, so overlapping resync attempts and
//! in-flight renders never observe a torn value. Multiple clock instances
//! never share state.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::atomic::AtomicBool;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;

use crate::time::UnixMillis;

// ============================================================================
// SECTION: Clock State
// ============================================================================

/// Correction offset and sync flag for one clock instance.
///
/// # Invariants
/// - The correction offset starts at zero and is only ever overwritten by a
///   successful resync; a failed resync leaves it untouched.
/// - The sync flag reflects the outcome of the most recent resync attempt.
#[derive(Debug)]
pub struct ClockState {
    /// Signed millisecond delta between the last observed remote instant and
    /// the local wall clock at the moment of observation.
    correction_ms: AtomicI64,
    /// Whether the most recent resync attempt succeeded.
    synced: AtomicBool,
}

impl ClockState {
    /// Creates a state with a zero offset and the sync flag cleared.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            correction_ms: AtomicI64::new(0),
            synced: AtomicBool::new(false),
        }
    }

    /// Commits a fresh correction offset and marks the instance synced.
    pub fn commit_correction(&self, correction_ms: i64) {
        self.correction_ms.store(correction_ms, Ordering::Relaxed);
        self.synced.store(true, Ordering::Relaxed);
    }

    /// Marks the most recent resync as failed, keeping the prior offset.
    pub fn mark_offline(&self) {
        self.synced.store(false, Ordering::Relaxed);
    }

    /// Returns the committed correction offset in milliseconds.
    #[must_use]
    pub fn correction_ms(&self) -> i64 {
        self.correction_ms.load(Ordering::Relaxed)
    }

    /// Returns whether the most recent resync attempt succeeded.
    #[must_use]
    pub fn is_synced(&self) -> bool {
        self.synced.load(Ordering::Relaxed)
    }

    /// Applies the committed correction to a local wall-clock sample.
    #[must_use]
    pub fn corrected(&self, local: UnixMillis) -> UnixMillis {
        local.saturating_add(self.correction_ms())
    }

    /// Samples the local wall clock and applies the committed correction.
    #[must_use]
    pub fn now(&self) -> UnixMillis {
        self.corrected(UnixMillis::now())
    }
}

impl Default for ClockState {
    fn default() -> Self {
        Self::new()
    }
}
