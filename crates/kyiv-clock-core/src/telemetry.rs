// crates/kyiv-clock-core/src/telemetry.rs
// ============================================================================
// Module: Sync Telemetry
// Description: Observability hooks for source resolution and sync attempts.
// Purpose: Provide outcome events without hard dependencies.
// Dependencies: crate::source
// ============================================================================

//! ## Overview
//! This module exposes a thin observer interface for sync attempts. Every
//! hook has a no-op default so hosts opt in per event; downstream deployments
//! can plug in their metrics pipeline without redesign. Failures reported
//! here are already recovered or absorbed by the caller; observers must not
//! treat them as fatal.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::source::SourceError;

// ============================================================================
// SECTION: Outcome Labels
// ============================================================================

/// Outcome of one full sync attempt across the source chain.
///
/// # Invariants
/// - Variants are stable for telemetry labeling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// A source yielded a usable reading; the offset was committed.
    Synced,
    /// Every source failed; the clock keeps running on the local clock.
    Fallback,
}

impl SyncOutcome {
    /// Returns a stable label for the outcome.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Synced => "synced",
            Self::Fallback => "fallback",
        }
    }
}

// ============================================================================
// SECTION: Observer
// ============================================================================

/// Observer for sync resolution events.
///
/// All hooks default to no-ops; implementations override what they need.
pub trait SyncObserver: Send + Sync {
    /// Called when one source fails and resolution moves to the next.
    fn source_failed(&self, label: &str, error: &SourceError) {
        let _ = (label, error);
    }

    /// Called when a source yields the winning reading.
    fn source_selected(&self, label: &str) {
        let _ = label;
    }

    /// Called once per sync attempt with the final outcome.
    fn sync_completed(&self, outcome: SyncOutcome) {
        let _ = outcome;
    }
}

/// Observer that ignores every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl SyncObserver for NoopObserver {}
