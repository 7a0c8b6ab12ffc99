// crates/kyiv-clock-core/src/source.rs
// ============================================================================
// Module: Time Sources
// Description: Source trait and ordered first-success-wins resolution.
// Purpose: Resolve one remote instant from a prioritized endpoint list.
// Dependencies: async-trait, thiserror
// ============================================================================

//! ## Overview
//! A [`TimeSource`] is one network authority queried for the current instant.
//! The [`SourceChain`] tries its sources in priority order, first success
//! wins, one attempt per source per sync. Per-source failures are recovered
//! locally by moving on; exhausting the chain is the only failure this module
//! surfaces, and callers absorb even that (it only flips the sync flag).

// ============================================================================
// SECTION: Imports
// ============================================================================

use async_trait::async_trait;
use thiserror::Error;

use crate::telemetry::SyncObserver;
use crate::time::UnixMillis;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Per-source failure modes, recovered by trying the next source.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum SourceError {
    /// The source is misconfigured (bad URL, rejected scheme, client build).
    #[error("time source misconfigured: {0}")]
    Config(String),
    /// The request failed before a response arrived.
    #[error("time source request failed: {0}")]
    Request(String),
    /// The source answered with a non-success HTTP status.
    #[error("time source returned status {0}")]
    Status(u16),
    /// The response body was undecodable or carried no recognizable instant.
    #[error("time source payload unusable: {0}")]
    Payload(String),
}

/// Failure of a full sync attempt.
///
/// # Invariants
/// - Variants are stable for programmatic handling.
#[derive(Debug, Error)]
pub enum SyncError {
    /// Every source in the chain failed to yield a usable reading.
    #[error("all {attempted} time sources exhausted without a usable reading")]
    Exhausted {
        /// Number of sources that were attempted.
        attempted: usize,
    },
}

// ============================================================================
// SECTION: Source Trait
// ============================================================================

/// One network authority for the current instant.
#[async_trait]
pub trait TimeSource: Send + Sync {
    /// Returns a stable label for telemetry and diagnostics.
    fn label(&self) -> &str;

    /// Fetches the current remote instant.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError`] when the request fails, the status is not a
    /// success, or the payload carries no recognizable instant.
    async fn fetch_now(&self) -> Result<UnixMillis, SourceError>;
}

// ============================================================================
// SECTION: Source Chain
// ============================================================================

/// Ordered list of time sources, tried first-to-last.
///
/// # Invariants
/// - Order is a priority list; resolution stops at the first success.
/// - Each source gets exactly one attempt per resolution; retry cadence is
///   the caller's periodic schedule.
pub struct SourceChain {
    /// Sources in priority order.
    sources: Vec<Box<dyn TimeSource>>,
}

impl SourceChain {
    /// Creates a chain from sources in priority order.
    #[must_use]
    pub fn new(sources: Vec<Box<dyn TimeSource>>) -> Self {
        Self {
            sources,
        }
    }

    /// Returns the number of sources in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sources.len()
    }

    /// Returns true when the chain holds no sources.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Resolves the current remote instant from the first source that
    /// delivers a usable reading.
    ///
    /// Sources past the winner are never attempted. Per-source failures are
    /// reported to the observer and recovery continues with the next source.
    ///
    /// # Errors
    ///
    /// Returns [`SyncError::Exhausted`] when every source fails.
    pub async fn resolve(&self, observer: &dyn SyncObserver) -> Result<UnixMillis, SyncError> {
        for source in &self.sources {
            match source.fetch_now().await {
                Ok(instant) => {
                    observer.source_selected(source.label());
                    return Ok(instant);
                }
                Err(error) => observer.source_failed(source.label(), &error),
            }
        }
        Err(SyncError::Exhausted {
            attempted: self.sources.len(),
        })
    }
}
