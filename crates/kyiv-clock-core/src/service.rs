// crates/kyiv-clock-core/src/service.rs
// ============================================================================
// Module: Clock Service
// Description: Display binding, immediate render, and the two periodic tasks.
// Purpose: Drive a host display from the clock state on independent cadences.
// Dependencies: chrono-tz, tokio, crate::{locale, render, source, state, telemetry, time}
// ============================================================================

//! ## Overview
//! The clock service is the single initialization entry point of this crate.
//! Given display slots and a source chain it renders immediately with the
//! uncorrected local clock, then runs two independent periodic tasks: a
//! render tick (pure formatting, default every second) and a resync tick
//! (network fetch plus offset commit, default every ten minutes). Render
//! ticks never wait on a resync in flight; they read whatever offset was
//! last committed.
//!
//! Invariants:
//! - A missing date or time slot makes initialization a silent no-op: no
//!   render, no fetch, no scheduled tasks.
//! - A failed resync flips the sync flag and leaves the offset untouched; it
//!   never escapes the service.
//! - Each start call owns its own state and tasks, so multiple clock
//!   instances never interfere.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio::time::interval;

use crate::locale::ClockLocale;
use crate::render::render_frame;
use crate::source::SourceChain;
use crate::state::ClockState;
use crate::telemetry::SyncObserver;
use crate::telemetry::SyncOutcome;
use crate::time::UnixMillis;

// ============================================================================
// SECTION: Display Contract
// ============================================================================

/// Text sink for one display sub-element.
pub type TextSlot = Box<dyn Fn(&str) + Send + Sync>;

/// Display slots supplied by the host.
///
/// # Invariants
/// - `date` and `time` are required; starting without either is a no-op.
/// - `status` is optional; without it the sync indicator is simply not shown.
#[derive(Default)]
pub struct ClockDisplaySlots {
    /// Sink for the long-form date line.
    pub date: Option<TextSlot>,
    /// Sink for the `HH:MM` time text.
    pub time: Option<TextSlot>,
    /// Optional sink for the online/offline indicator.
    pub status: Option<TextSlot>,
}

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for one clock instance.
///
/// # Invariants
/// - `render_interval` performs pure formatting only; `resync_interval`
///   gates network access.
/// - The status strings are fixed literals for the lifetime of the instance.
pub struct ClockServiceConfig {
    /// Target timezone for all rendered text.
    pub zone: Tz,
    /// Locale tables for the date line.
    pub locale: ClockLocale,
    /// Cadence of display repaints.
    pub render_interval: Duration,
    /// Cadence of network resync attempts.
    pub resync_interval: Duration,
    /// Status text shown after a successful resync.
    pub status_online: String,
    /// Status text shown while running on the uncorrected local clock.
    pub status_offline: String,
}

impl Default for ClockServiceConfig {
    fn default() -> Self {
        Self {
            zone: chrono_tz::Europe::Kyiv,
            locale: ClockLocale::ukrainian(),
            render_interval: Duration::from_secs(1),
            resync_interval: Duration::from_secs(10 * 60),
            status_online: "Синхронізовано (онлайн)".to_string(),
            status_offline: "Резервний режим (офлайн)".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Panel
// ============================================================================

/// Bound display slots plus the formatting settings shared by both tasks.
struct Panel {
    /// Sink for the date line.
    date: TextSlot,
    /// Sink for the time text.
    time: TextSlot,
    /// Optional sink for the sync indicator.
    status: Option<TextSlot>,
    /// Target timezone.
    zone: Tz,
    /// Locale tables.
    locale: ClockLocale,
    /// Online status literal.
    status_online: String,
    /// Offline status literal.
    status_offline: String,
}

impl Panel {
    /// Repaints date and time from the corrected clock.
    ///
    /// An instant outside the representable range skips this repaint; the
    /// next tick retries.
    fn repaint(&self, state: &ClockState) {
        if let Some(frame) = render_frame(state.now(), self.zone, &self.locale) {
            (self.date)(&frame.date);
            (self.time)(&frame.time);
        }
    }

    /// Publishes the sync indicator when a status slot is bound.
    fn publish_status(&self, outcome: SyncOutcome) {
        if let Some(slot) = &self.status {
            let text = match outcome {
                SyncOutcome::Synced => self.status_online.as_str(),
                SyncOutcome::Fallback => self.status_offline.as_str(),
            };
            slot(text);
        }
    }
}

// ============================================================================
// SECTION: Service
// ============================================================================

/// The clock service entry point.
pub struct ClockService;

impl ClockService {
    /// Binds the display and starts the render and resync tasks.
    ///
    /// Returns `None` without rendering, fetching, or scheduling anything
    /// when the date or time slot is missing; an incomplete display is an
    /// expected configuration, not an error. Must be called within a tokio
    /// runtime.
    pub fn start(
        config: ClockServiceConfig,
        chain: SourceChain,
        slots: ClockDisplaySlots,
        observer: Arc<dyn SyncObserver>,
    ) -> Option<ClockHandle> {
        let ClockDisplaySlots {
            date,
            time,
            status,
        } = slots;
        let (Some(date), Some(time)) = (date, time) else {
            return None;
        };

        let panel = Arc::new(Panel {
            date,
            time,
            status,
            zone: config.zone,
            locale: config.locale,
            status_online: config.status_online,
            status_offline: config.status_offline,
        });
        let state = Arc::new(ClockState::new());

        // First paint uses the uncorrected local clock; the first resync
        // catches up asynchronously.
        panel.repaint(&state);

        let render_task = tokio::spawn(render_loop(
            Arc::clone(&panel),
            Arc::clone(&state),
            config.render_interval,
        ));
        let resync_task = tokio::spawn(resync_loop(
            panel,
            Arc::clone(&state),
            chain,
            observer,
            config.resync_interval,
        ));

        Some(ClockHandle {
            state,
            render_task,
            resync_task,
        })
    }
}

// ============================================================================
// SECTION: Periodic Tasks
// ============================================================================

/// Repaints the display on the render cadence; pure formatting, no network.
async fn render_loop(panel: Arc<Panel>, state: Arc<ClockState>, every: Duration) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        panel.repaint(&state);
    }
}

/// Attempts a resync on the resync cadence and republishes the display.
///
/// The first tick fires immediately, which yields the asynchronous initial
/// sync right after the uncorrected first paint.
async fn resync_loop(
    panel: Arc<Panel>,
    state: Arc<ClockState>,
    chain: SourceChain,
    observer: Arc<dyn SyncObserver>,
    every: Duration,
) {
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        let outcome = resync_once(&chain, &state, observer.as_ref()).await;
        panel.publish_status(outcome);
        panel.repaint(&state);
    }
}

/// Runs one sync attempt and commits its outcome to the clock state.
///
/// Success commits a fresh correction offset; failure keeps the prior offset
/// and only clears the sync flag. Nothing propagates to the caller.
async fn resync_once(
    chain: &SourceChain,
    state: &ClockState,
    observer: &dyn SyncObserver,
) -> SyncOutcome {
    let outcome = match chain.resolve(observer).await {
        Ok(remote) => {
            state.commit_correction(remote.delta_from(UnixMillis::now()));
            SyncOutcome::Synced
        }
        Err(_) => {
            state.mark_offline();
            SyncOutcome::Fallback
        }
    };
    observer.sync_completed(outcome);
    outcome
}

// ============================================================================
// SECTION: Handle
// ============================================================================

/// Handle to one running clock instance.
///
/// # Invariants
/// - Owns the instance state and both task handles; instances never share.
/// - Dropping the handle leaves the tasks running for the host lifetime;
///   [`ClockHandle::shutdown`] stops them explicitly.
pub struct ClockHandle {
    /// Shared offset and sync flag for this instance.
    state: Arc<ClockState>,
    /// Render cadence task.
    render_task: JoinHandle<()>,
    /// Resync cadence task.
    resync_task: JoinHandle<()>,
}

impl ClockHandle {
    /// Returns the instance clock state.
    #[must_use]
    pub fn state(&self) -> Arc<ClockState> {
        Arc::clone(&self.state)
    }

    /// Returns whether the most recent resync attempt succeeded.
    #[must_use]
    pub fn is_synced(&self) -> bool {
        self.state.is_synced()
    }

    /// Returns the committed correction offset in milliseconds.
    #[must_use]
    pub fn correction_ms(&self) -> i64 {
        self.state.correction_ms()
    }

    /// Stops both periodic tasks.
    pub fn shutdown(self) {
        self.render_task.abort();
        self.resync_task.abort();
    }
}
