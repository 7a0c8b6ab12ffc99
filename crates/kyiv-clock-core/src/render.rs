// crates/kyiv-clock-core/src/render.rs
// ============================================================================
// Module: Frame Rendering
// Description: Formats a corrected instant into localized display text.
// Purpose: Pure formatting layer between clock state and the host display.
// Dependencies: chrono, chrono-tz, crate::{locale, time}
// ============================================================================

//! ## Overview
//! Rendering is pure string formatting: a corrected instant is projected into
//! the target timezone and turned into a long-form localized date plus a
//! 24-hour `HH:MM` time. No network, no shared state; the render cadence may
//! call this every second without touching the resync path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use chrono::Datelike;
use chrono::TimeZone;
use chrono::Timelike;
use chrono::Utc;
use chrono_tz::Tz;

use crate::locale::ClockLocale;
use crate::time::UnixMillis;

// ============================================================================
// SECTION: Frame
// ============================================================================

/// One rendered clock frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClockFrame {
    /// Long-form localized date, first letter capitalized.
    pub date: String,
    /// Target-timezone time as 24-hour `HH:MM`.
    pub time: String,
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders an instant into a frame for the target timezone.
///
/// Returns `None` when the instant falls outside the representable datetime
/// range; callers skip that repaint and retry on the next tick.
#[must_use]
pub fn render_frame(instant: UnixMillis, zone: Tz, locale: &ClockLocale) -> Option<ClockFrame> {
    let utc = Utc.timestamp_millis_opt(instant.as_millis()).single()?;
    let local = utc.with_timezone(&zone);
    let weekday = usize::try_from(local.weekday().num_days_from_monday()).ok()?;
    let month_index = usize::try_from(local.month0()).ok()?;
    let date = locale.format_date(weekday, local.day(), month_index, local.year());
    let time = format!("{:02}:{:02}", local.hour(), local.minute());
    Some(ClockFrame {
        date,
        time,
    })
}
