// crates/kyiv-clock-core/tests/parse_unit.rs
// ============================================================================
// Module: Parse Chain Unit Tests
// Description: Shape detection and priority tests for the payload parse chain.
// Purpose: Verify every supported payload shape and the offset discovery rules.
// Dependencies: kyiv-clock-core, chrono, serde_json
// ============================================================================

//! ## Overview
//! Covers the prioritized candidate chain: numeric seconds, explicit UTC
//! datetimes, generic zoned datetimes, and local-looking datetimes with
//! companion-offset discovery, including the no-double-offsetting rule and
//! the target-zone best-effort fallback.

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

use chrono::SecondsFormat;
use chrono::TimeZone;
use chrono::Utc;
use chrono_tz::Tz;
use kyiv_clock_core::UnixMillis;
use kyiv_clock_core::parse_remote_instant;
use serde_json::json;

/// 2024-01-15T08:00:00Z in epoch milliseconds.
const MONDAY_0800_UTC_MS: i64 = 1_705_305_600_000;

/// Target zone used across these tests.
fn kyiv() -> Tz {
    chrono_tz::Europe::Kyiv
}

/// Formats an instant back to RFC 3339 UTC for round-trip assertions.
fn to_utc_string(instant: UnixMillis) -> String {
    Utc.timestamp_millis_opt(instant.as_millis())
        .single()
        .unwrap()
        .to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[test]
fn unixtime_integer_seconds_scale_to_millis() {
    let payload = json!({ "unixtime": 1_705_305_600_i64 });
    let parsed = parse_remote_instant(&payload, kyiv()).unwrap();
    assert_eq!(parsed.as_millis(), MONDAY_0800_UTC_MS);
    assert_eq!(to_utc_string(parsed), "2024-01-15T08:00:00.000Z");
}

#[test]
fn unixtime_fractional_seconds_keep_millis() {
    let payload = json!({ "unixtime": 1_705_305_600.5_f64 });
    let parsed = parse_remote_instant(&payload, kyiv()).unwrap();
    assert_eq!(parsed.as_millis(), MONDAY_0800_UTC_MS + 500);
}

#[test]
fn unixtime_out_of_range_float_is_rejected() {
    let payload = json!({ "unixtime": 1.0e300_f64 });
    assert!(parse_remote_instant(&payload, kyiv()).is_none());
}

#[test]
fn unixtime_wins_over_other_fields() {
    // worldtimeapi carries both; the numeric field has priority.
    let payload = json!({
        "unixtime": 1_705_305_600_i64,
        "utc_datetime": "2030-06-01T00:00:00Z",
        "datetime": "2030-06-01T03:00:00+03:00",
    });
    let parsed = parse_remote_instant(&payload, kyiv()).unwrap();
    assert_eq!(parsed.as_millis(), MONDAY_0800_UTC_MS);
}

#[test]
fn utc_datetime_parses_explicit_utc() {
    let payload = json!({ "utc_datetime": "2024-01-15T08:00:00+00:00" });
    let parsed = parse_remote_instant(&payload, kyiv()).unwrap();
    assert_eq!(parsed.as_millis(), MONDAY_0800_UTC_MS);

    let zulu = json!({ "utc_datetime": "2024-01-15T08:00:00Z" });
    assert_eq!(parse_remote_instant(&zulu, kyiv()), Some(parsed));
}

#[test]
fn datetime_parses_zoned_string_with_fraction() {
    let payload = json!({ "datetime": "2024-01-15T10:00:00.123456+02:00" });
    let parsed = parse_remote_instant(&payload, kyiv()).unwrap();
    assert_eq!(parsed.as_millis(), MONDAY_0800_UTC_MS + 123);
    assert_eq!(to_utc_string(parsed), "2024-01-15T08:00:00.123Z");
}

#[test]
fn local_datetime_with_companion_string_offset_matches_explicit_form() {
    let discovered = json!({
        "dateTime": "2024-01-15T10:00:00",
        "currentUtcOffset": "+02:00",
    });
    let explicit = json!({ "datetime": "2024-01-15T10:00:00+02:00" });
    assert_eq!(
        parse_remote_instant(&discovered, kyiv()),
        parse_remote_instant(&explicit, kyiv())
    );
}

#[test]
fn local_datetime_with_nested_offset_object() {
    let payload = json!({
        "dateTime": "2024-01-15T10:00:00",
        "currentUtcOffset": { "offset": "+02:00" },
    });
    let parsed = parse_remote_instant(&payload, kyiv()).unwrap();
    assert_eq!(parsed.as_millis(), MONDAY_0800_UTC_MS);
}

#[test]
fn local_datetime_with_fallback_utc_offset_field() {
    let payload = json!({
        "dateTime": "2024-01-15T10:00:00",
        "utcOffset": "+02:00",
    });
    let parsed = parse_remote_instant(&payload, kyiv()).unwrap();
    assert_eq!(parsed.as_millis(), MONDAY_0800_UTC_MS);
}

#[test]
fn local_datetime_with_seven_digit_fraction_and_offset() {
    // timeapi.io emits seven fractional digits.
    let payload = json!({
        "dateTime": "2024-01-15T10:00:00.1234567",
        "currentUtcOffset": "+02:00",
    });
    let parsed = parse_remote_instant(&payload, kyiv()).unwrap();
    assert_eq!(parsed.as_millis(), MONDAY_0800_UTC_MS + 123);
}

#[test]
fn explicit_zulu_suffix_ignores_companion_offset() {
    // No double-offsetting: the raw string already carries its zone.
    let payload = json!({
        "dateTime": "2024-01-15T10:00:00Z",
        "currentUtcOffset": "+02:00",
    });
    let parsed = parse_remote_instant(&payload, kyiv()).unwrap();
    assert_eq!(parsed.as_millis(), MONDAY_0800_UTC_MS + 2 * 3_600_000);
}

#[test]
fn explicit_numeric_offset_ignores_companion_offset() {
    let payload = json!({
        "dateTime": "2024-01-15T10:00:00+02:00",
        "utcOffset": "+05:00",
    });
    let parsed = parse_remote_instant(&payload, kyiv()).unwrap();
    assert_eq!(parsed.as_millis(), MONDAY_0800_UTC_MS);
}

#[test]
fn malformed_companion_offset_falls_back_to_target_zone() {
    // "GMT+2" fails the ±HH:MM pattern; the naive string is interpreted in
    // the target zone (Kyiv is UTC+2 in January).
    let payload = json!({
        "dateTime": "2024-01-15T10:00:00",
        "currentUtcOffset": "GMT+2",
    });
    let parsed = parse_remote_instant(&payload, kyiv()).unwrap();
    assert_eq!(parsed.as_millis(), MONDAY_0800_UTC_MS);
}

#[test]
fn naive_datetime_without_offset_uses_target_zone() {
    let winter = json!({ "dateTime": "2024-01-15T10:00:00" });
    let parsed = parse_remote_instant(&winter, kyiv()).unwrap();
    assert_eq!(parsed.as_millis(), MONDAY_0800_UTC_MS);

    // Summer reading lands on the DST offset (UTC+3).
    let summer = json!({ "dateTime": "2024-07-15T10:00:00" });
    let explicit = json!({ "datetime": "2024-07-15T10:00:00+03:00" });
    assert_eq!(
        parse_remote_instant(&summer, kyiv()),
        parse_remote_instant(&explicit, kyiv())
    );
}

#[test]
fn surrounding_whitespace_is_trimmed() {
    let payload = json!({ "dateTime": "  2024-01-15T10:00:00+02:00  " });
    let parsed = parse_remote_instant(&payload, kyiv()).unwrap();
    assert_eq!(parsed.as_millis(), MONDAY_0800_UTC_MS);
}

#[test]
fn non_object_payloads_are_rejected() {
    assert!(parse_remote_instant(&json!("2024-01-15T10:00:00Z"), kyiv()).is_none());
    assert!(parse_remote_instant(&json!(1_705_305_600_i64), kyiv()).is_none());
    assert!(parse_remote_instant(&json!(null), kyiv()).is_none());
    assert!(parse_remote_instant(&json!([1, 2, 3]), kyiv()).is_none());
}

#[test]
fn payload_without_recognizable_field_is_rejected() {
    let payload = json!({ "timezone": "Europe/Kyiv", "day_of_week": 1 });
    assert!(parse_remote_instant(&payload, kyiv()).is_none());
}

#[test]
fn unparsable_datetime_strings_are_rejected() {
    assert!(parse_remote_instant(&json!({ "utc_datetime": "yesterday" }), kyiv()).is_none());
    assert!(parse_remote_instant(&json!({ "datetime": "" }), kyiv()).is_none());
    assert!(parse_remote_instant(&json!({ "dateTime": "not-a-date" }), kyiv()).is_none());
}
