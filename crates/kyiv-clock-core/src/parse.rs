// crates/kyiv-clock-core/src/parse.rs
// ============================================================================
// Module: Remote Payload Parsing
// Description: Prioritized candidate chain over heterogeneous time payloads.
// Purpose: Extract one finite epoch-millisecond instant from a JSON body.
// Dependencies: chrono, chrono-tz, serde_json
// ============================================================================

//! ## Overview
//! Remote time authorities disagree on response shape. This module tries a
//! prioritized chain of pure candidate parsers against a JSON payload and
//! returns the first finite instant. Each candidate answers "not applicable"
//! with `None`, which keeps shape detection testable in isolation from any
//! network code.
//!
//! Recognized shapes, in priority order:
//! 1. numeric seconds-since-epoch (`unixtime`)
//! 2. explicit UTC datetime string (`utc_datetime`)
//! 3. generic zoned datetime string (`datetime`)
//! 4. local-looking datetime string (`dateTime`) with companion-offset
//!    discovery (`currentUtcOffset`, `currentUtcOffset.offset`, `utcOffset`)

// ============================================================================
// SECTION: Imports
// ============================================================================

use chrono::DateTime;
use chrono::NaiveDateTime;
use chrono::TimeZone;
use chrono_tz::Tz;
use serde_json::Value;

use crate::time::UnixMillis;

// ============================================================================
// SECTION: Candidate Chain
// ============================================================================

/// A pure shape-detection parser; `None` means "not applicable".
pub type ParseCandidate = fn(&Value, Tz) -> Option<UnixMillis>;

/// Candidate parsers in priority order; the first hit wins.
///
/// # Invariants
/// - Ordering is load-bearing: payloads carrying several recognizable fields
///   (worldtimeapi returns both `unixtime` and `utc_datetime`) must resolve
///   through the highest-priority one.
pub const PARSE_CANDIDATES: &[ParseCandidate] =
    &[unix_seconds, utc_datetime_field, datetime_field, zoned_datetime_field];

/// Extracts the first finite epoch-millisecond instant from a payload.
///
/// The target `zone` is consulted only by the last-resort naive-datetime
/// interpretation; every other candidate is zone-independent.
#[must_use]
pub fn parse_remote_instant(payload: &Value, zone: Tz) -> Option<UnixMillis> {
    if !payload.is_object() {
        return None;
    }
    PARSE_CANDIDATES.iter().find_map(|candidate| candidate(payload, zone))
}

// ============================================================================
// SECTION: Candidates
// ============================================================================

/// Candidate 1: numeric `unixtime` seconds, converted to milliseconds.
fn unix_seconds(payload: &Value, _zone: Tz) -> Option<UnixMillis> {
    let number = payload.get("unixtime")?;
    if let Some(seconds) = number.as_i64() {
        return seconds.checked_mul(1_000).map(UnixMillis::from_millis);
    }
    let seconds = number.as_f64()?;
    float_seconds_to_millis(seconds)
}

/// Candidate 2: explicit UTC datetime string (`utc_datetime`).
fn utc_datetime_field(payload: &Value, _zone: Tz) -> Option<UnixMillis> {
    parse_rfc3339_millis(payload.get("utc_datetime")?.as_str()?.trim())
}

/// Candidate 3: generic zoned datetime string (`datetime`).
fn datetime_field(payload: &Value, _zone: Tz) -> Option<UnixMillis> {
    parse_rfc3339_millis(payload.get("datetime")?.as_str()?.trim())
}

/// Candidate 4: local-looking datetime string (`dateTime`).
///
/// If the raw string already ends in a UTC marker or numeric offset it is
/// parsed as-is (never double-offset). Otherwise a companion `±HH:MM` offset
/// field is searched in the payload and appended before parsing. With no
/// discoverable offset the naive string is interpreted in the target zone,
/// best effort; that reading may be locally ambiguous.
fn zoned_datetime_field(payload: &Value, zone: Tz) -> Option<UnixMillis> {
    let raw = payload.get("dateTime")?.as_str()?.trim();
    if has_explicit_zone(raw) {
        return parse_rfc3339_millis(raw);
    }
    if let Some(offset) = discover_utc_offset(payload) {
        return parse_rfc3339_millis(&format!("{raw}{offset}"));
    }
    let naive: NaiveDateTime = raw.parse().ok()?;
    zone.from_local_datetime(&naive)
        .earliest()
        .map(|instant| UnixMillis::from_millis(instant.timestamp_millis()))
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Parses an RFC 3339 datetime string into epoch milliseconds.
fn parse_rfc3339_millis(raw: &str) -> Option<UnixMillis> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|instant| UnixMillis::from_millis(instant.timestamp_millis()))
}

/// Converts fractional unix seconds to milliseconds, rejecting non-finite
/// and out-of-range values.
fn float_seconds_to_millis(seconds: f64) -> Option<UnixMillis> {
    if !seconds.is_finite() {
        return None;
    }
    let millis = seconds * 1_000.0;
    if !millis.is_finite() || millis < i64::MIN as f64 || millis > i64::MAX as f64 {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        reason = "Fractional milliseconds are truncated after the range check above."
    )]
    Some(UnixMillis::from_millis(millis as i64))
}

/// Returns true when a raw datetime string carries explicit zone information:
/// a trailing `Z`/`z` marker or a trailing numeric `±HH:MM` offset.
fn has_explicit_zone(raw: &str) -> bool {
    raw.ends_with('Z') || raw.ends_with('z') || ends_with_numeric_offset(raw)
}

/// Returns true when the string ends with a `±HH:MM` numeric offset.
fn ends_with_numeric_offset(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    if bytes.len() < 6 {
        return false;
    }
    let tail = &bytes[bytes.len() - 6 ..];
    matches!(tail[0], b'+' | b'-')
        && tail[1].is_ascii_digit()
        && tail[2].is_ascii_digit()
        && tail[3] == b':'
        && tail[4].is_ascii_digit()
        && tail[5].is_ascii_digit()
}

/// Returns true when a value is exactly a `±HH:MM` offset string.
fn is_utc_offset(raw: &str) -> bool {
    raw.len() == 6 && ends_with_numeric_offset(raw)
}

/// Searches the payload for a companion UTC-offset field.
///
/// Candidates, in priority order: `currentUtcOffset` as a string, the nested
/// `currentUtcOffset.offset` string, then `utcOffset` as a string. Values not
/// matching `±HH:MM` exactly are ignored.
fn discover_utc_offset(payload: &Value) -> Option<String> {
    let current = payload.get("currentUtcOffset");
    let candidate = current
        .and_then(Value::as_str)
        .filter(|raw| !raw.is_empty())
        .or_else(|| {
            current
                .and_then(|value| value.get("offset"))
                .and_then(Value::as_str)
                .filter(|raw| !raw.is_empty())
        })
        .or_else(|| payload.get("utcOffset").and_then(Value::as_str))?;
    is_utc_offset(candidate).then(|| candidate.to_string())
}
