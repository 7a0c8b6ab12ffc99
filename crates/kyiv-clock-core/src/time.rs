// crates/kyiv-clock-core/src/time.rs
// ============================================================================
// Module: Kyiv Clock Time Model
// Description: Canonical epoch-millisecond instant used across the pipeline.
// Purpose: Carry remote readings and corrected local readings as one type.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Every instant that moves through the clock pipeline (remote readings,
//! local wall-clock samples, corrected display instants) is a [`UnixMillis`].
//! Arithmetic saturates rather than wrapping so an adversarial or broken
//! remote reading can never panic the render path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

// ============================================================================
// SECTION: Instant
// ============================================================================

/// An instant in time as signed milliseconds since the unix epoch.
///
/// # Invariants
/// - Values are finite by construction; parsers reject non-finite numbers.
/// - Arithmetic saturates at the `i64` range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct UnixMillis(i64);

impl UnixMillis {
    /// Wraps a raw epoch-millisecond value.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Returns the raw epoch-millisecond value.
    #[must_use]
    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Samples the local wall clock.
    ///
    /// Instants before the unix epoch are reported as negative values; an
    /// out-of-range system clock saturates instead of failing.
    #[must_use]
    pub fn now() -> Self {
        SystemTime::now().duration_since(UNIX_EPOCH).map_or_else(
            |err| Self(i64::try_from(err.duration().as_millis()).map_or(i64::MIN, |ms| -ms)),
            |elapsed| Self(i64::try_from(elapsed.as_millis()).unwrap_or(i64::MAX)),
        )
    }

    /// Returns this instant shifted by a signed millisecond delta.
    #[must_use]
    pub const fn saturating_add(self, delta_millis: i64) -> Self {
        Self(self.0.saturating_add(delta_millis))
    }

    /// Returns the signed millisecond delta `self - other`.
    #[must_use]
    pub const fn delta_from(self, other: Self) -> i64 {
        self.0.saturating_sub(other.0)
    }
}
