// crates/kyiv-clock-core/tests/service_unit.rs
// ============================================================================
// Module: Clock Service Unit Tests
// Description: Display binding, timer scheduling, and status transitions.
// Purpose: Verify the initialization no-op, offset commit, and indicator flip.
// Dependencies: kyiv-clock-core, async-trait, tokio (paused time)
// ============================================================================

//! ## Overview
//! These tests run the service on a paused tokio clock so the 1 s render and
//! 10 min resync cadences elapse instantly. Display slots record into shared
//! buffers; mock sources count fetches, which pins the "missing required slot
//! performs no work" rule.

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

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use kyiv_clock_core::ClockDisplaySlots;
use kyiv_clock_core::ClockLocale;
use kyiv_clock_core::ClockService;
use kyiv_clock_core::ClockServiceConfig;
use kyiv_clock_core::NoopObserver;
use kyiv_clock_core::SourceChain;
use kyiv_clock_core::SourceError;
use kyiv_clock_core::TextSlot;
use kyiv_clock_core::TimeSource;
use kyiv_clock_core::UnixMillis;

/// Shared text buffer recording every slot write in order.
type Buffer = Arc<Mutex<Vec<String>>>;

/// Builds a slot that appends each write to a buffer.
fn recording_slot(buffer: &Buffer) -> TextSlot {
    let buffer = Arc::clone(buffer);
    Box::new(move |text| buffer.lock().unwrap().push(text.to_string()))
}

/// Test config with Kyiv defaults and short, paused-clock-friendly cadences.
fn test_config() -> ClockServiceConfig {
    ClockServiceConfig {
        zone: chrono_tz::Europe::Kyiv,
        locale: ClockLocale::ukrainian(),
        // A long render cadence keeps recorded frames manageable while the
        // paused clock fast-forwards through resync intervals.
        render_interval: Duration::from_secs(3_600),
        resync_interval: Duration::from_secs(600),
        status_online: "online".to_string(),
        status_offline: "offline".to_string(),
    }
}

/// Mock source answering local-now plus a fixed skew.
struct SkewedSource {
    skew_ms: i64,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl TimeSource for SkewedSource {
    fn label(&self) -> &str {
        "skewed"
    }

    async fn fetch_now(&self) -> Result<UnixMillis, SourceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(UnixMillis::now().saturating_add(self.skew_ms))
    }
}

/// Mock source that fails a fixed number of leading attempts, then succeeds.
struct FlakySource {
    fail_first: usize,
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl TimeSource for FlakySource {
    fn label(&self) -> &str {
        "flaky"
    }

    async fn fetch_now(&self) -> Result<UnixMillis, SourceError> {
        let attempt = self.calls.fetch_add(1, Ordering::SeqCst);
        if attempt < self.fail_first {
            return Err(SourceError::Status(503));
        }
        Ok(UnixMillis::now())
    }
}

#[tokio::test(start_paused = true)]
async fn missing_time_slot_is_a_silent_noop() {
    let calls = Arc::new(AtomicUsize::new(0));
    let chain = SourceChain::new(vec![Box::new(SkewedSource {
        skew_ms: 0,
        calls: Arc::clone(&calls),
    })]);
    let date_buffer: Buffer = Arc::new(Mutex::new(Vec::new()));
    let status_buffer: Buffer = Arc::new(Mutex::new(Vec::new()));
    let slots = ClockDisplaySlots {
        date: Some(recording_slot(&date_buffer)),
        time: None,
        status: Some(recording_slot(&status_buffer)),
    };

    let handle = ClockService::start(test_config(), chain, slots, Arc::new(NoopObserver));
    assert!(handle.is_none());

    // Long after both cadences would have fired: nothing fetched, nothing
    // rendered, nothing scheduled.
    tokio::time::sleep(Duration::from_secs(7_200)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 0);
    assert!(date_buffer.lock().unwrap().is_empty());
    assert!(status_buffer.lock().unwrap().is_empty());
}

#[tokio::test(start_paused = true)]
async fn successful_sync_commits_offset_and_reports_online() {
    let calls = Arc::new(AtomicUsize::new(0));
    let chain = SourceChain::new(vec![Box::new(SkewedSource {
        skew_ms: 5_000,
        calls: Arc::clone(&calls),
    })]);
    let date_buffer: Buffer = Arc::new(Mutex::new(Vec::new()));
    let time_buffer: Buffer = Arc::new(Mutex::new(Vec::new()));
    let status_buffer: Buffer = Arc::new(Mutex::new(Vec::new()));
    let slots = ClockDisplaySlots {
        date: Some(recording_slot(&date_buffer)),
        time: Some(recording_slot(&time_buffer)),
        status: Some(recording_slot(&status_buffer)),
    };

    let handle =
        ClockService::start(test_config(), chain, slots, Arc::new(NoopObserver)).unwrap();

    // The first paint happens synchronously with the uncorrected clock.
    assert_eq!(time_buffer.lock().unwrap().len(), 1);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(handle.is_synced());
    let correction = handle.correction_ms();
    assert!(
        (4_000 ..= 6_000).contains(&correction),
        "expected a ~5000 ms correction, got {correction}"
    );
    assert_eq!(status_buffer.lock().unwrap().last().map(String::as_str), Some("online"));
    assert!(!date_buffer.lock().unwrap().is_empty());

    handle.shutdown();
}

#[tokio::test(start_paused = true)]
async fn status_flips_offline_then_online_across_resyncs() {
    let calls = Arc::new(AtomicUsize::new(0));
    let chain = SourceChain::new(vec![Box::new(FlakySource {
        fail_first: 1,
        calls: Arc::clone(&calls),
    })]);
    let status_buffer: Buffer = Arc::new(Mutex::new(Vec::new()));
    let time_buffer: Buffer = Arc::new(Mutex::new(Vec::new()));
    let slots = ClockDisplaySlots {
        date: Some(Box::new(|_text| {})),
        time: Some(recording_slot(&time_buffer)),
        status: Some(recording_slot(&status_buffer)),
    };

    let handle =
        ClockService::start(test_config(), chain, slots, Arc::new(NoopObserver)).unwrap();

    // First attempt fails: offline indicator, no offset movement.
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(!handle.is_synced());
    assert_eq!(handle.correction_ms(), 0);
    assert_eq!(status_buffer.lock().unwrap().last().map(String::as_str), Some("offline"));

    // Next scheduled resync succeeds: indicator flips online.
    tokio::time::sleep(Duration::from_secs(600)).await;
    assert!(handle.is_synced());
    assert_eq!(status_buffer.lock().unwrap().last().map(String::as_str), Some("online"));
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let transitions: Vec<String> = {
        let writes = status_buffer.lock().unwrap();
        let mut deduped: Vec<String> = Vec::new();
        for write in writes.iter() {
            if deduped.last() != Some(write) {
                deduped.push(write.clone());
            }
        }
        deduped
    };
    assert_eq!(transitions, vec!["offline".to_string(), "online".to_string()]);

    handle.shutdown();
}

#[tokio::test(start_paused = true)]
async fn two_instances_do_not_share_state() {
    let first_calls = Arc::new(AtomicUsize::new(0));
    let second_calls = Arc::new(AtomicUsize::new(0));
    let first = ClockService::start(
        test_config(),
        SourceChain::new(vec![Box::new(SkewedSource {
            skew_ms: 5_000,
            calls: Arc::clone(&first_calls),
        })]),
        ClockDisplaySlots {
            date: Some(Box::new(|_text| {})),
            time: Some(Box::new(|_text| {})),
            status: None,
        },
        Arc::new(NoopObserver),
    )
    .unwrap();
    let second = ClockService::start(
        test_config(),
        SourceChain::new(vec![Box::new(FlakySource {
            fail_first: usize::MAX,
            calls: Arc::clone(&second_calls),
        })]),
        ClockDisplaySlots {
            date: Some(Box::new(|_text| {})),
            time: Some(Box::new(|_text| {})),
            status: None,
        },
        Arc::new(NoopObserver),
    )
    .unwrap();

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(first.is_synced());
    assert!(!second.is_synced());
    assert_eq!(second.correction_ms(), 0);

    first.shutdown();
    second.shutdown();
}
