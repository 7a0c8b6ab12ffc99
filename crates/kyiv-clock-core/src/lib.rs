// crates/kyiv-clock-core/src/lib.rs
// ============================================================================
// Module: Kyiv Clock Core
// Description: Time-sync model, payload parsing, and the clock service.
// Purpose: Provide a best-effort-accurate wall-clock for a fixed target zone.
// Dependencies: async-trait, chrono, chrono-tz, serde_json, thiserror, tokio
// ============================================================================

//! ## Overview
//! This crate owns the time-synchronization core: heterogeneous remote payload
//! parsing, the correction offset and sync flag, ordered first-success-wins
//! source resolution, localized frame rendering, and the clock service that
//! drives a host display on two independent cadences (render and resync).
//! Invariants:
//! - Displayed time always equals local wall-clock time plus the committed
//!   correction offset; the offset is never reset on a failed resync.
//! - A failed resync never escapes the service; it only flips the sync flag.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod locale;
pub mod parse;
pub mod render;
pub mod service;
pub mod source;
pub mod state;
pub mod telemetry;
pub mod time;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use locale::ClockLocale;
pub use locale::capitalize_first;
pub use parse::parse_remote_instant;
pub use render::ClockFrame;
pub use render::render_frame;
pub use service::ClockDisplaySlots;
pub use service::ClockHandle;
pub use service::ClockService;
pub use service::ClockServiceConfig;
pub use service::TextSlot;
pub use source::SourceChain;
pub use source::SourceError;
pub use source::SyncError;
pub use source::TimeSource;
pub use state::ClockState;
pub use telemetry::NoopObserver;
pub use telemetry::SyncObserver;
pub use telemetry::SyncOutcome;
pub use time::UnixMillis;
