// crates/kyiv-clock-sources/src/lib.rs
// ============================================================================
// Module: Kyiv Clock Sources
// Description: Built-in HTTP time sources for the clock core.
// Purpose: Provide cache-bypassing JSON time endpoints in priority order.
// Dependencies: kyiv-clock-core, reqwest, serde_json
// ============================================================================

//! ## Overview
//! This crate ships the HTTP implementation of the core's [`TimeSource`]
//! trait plus the built-in endpoint list (worldtimeapi.org first, timeapi.io
//! second). Requests always bypass intermediate caches and are bounded by a
//! request timeout; every failure mode maps to a recoverable per-source
//! error so the chain can move on.
//!
//! [`TimeSource`]: kyiv_clock_core::TimeSource

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod endpoints;
pub mod http;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use endpoints::TIME_API_BASE;
pub use endpoints::WORLD_TIME_API_BASE;
pub use endpoints::default_chain;
pub use endpoints::default_sources;
pub use http::HttpSourceConfig;
pub use http::HttpTimeSource;
