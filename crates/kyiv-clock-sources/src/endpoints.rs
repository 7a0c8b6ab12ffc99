// crates/kyiv-clock-sources/src/endpoints.rs
// ============================================================================
// Module: Built-in Endpoints
// Description: Default time authorities for a target zone, in priority order.
// Purpose: Build the standard source chain without host configuration.
// Dependencies: kyiv-clock-core, reqwest, crate::http
// ============================================================================

//! ## Overview
//! The built-in list queries worldtimeapi.org first (zone in the URL path)
//! and timeapi.io second (zone as a query parameter). Order is a priority
//! list; the first usable reading wins.

// ============================================================================
// SECTION: Imports
// ============================================================================

use chrono_tz::Tz;
use kyiv_clock_core::SourceChain;
use kyiv_clock_core::SourceError;
use kyiv_clock_core::TimeSource;
use reqwest::Url;

use crate::http::HttpSourceConfig;
use crate::http::HttpTimeSource;

// ============================================================================
// SECTION: Endpoint Bases
// ============================================================================

/// Base URL of the worldtimeapi.org zone endpoint (zone appended as a path).
pub const WORLD_TIME_API_BASE: &str = "https://worldtimeapi.org/api/timezone";

/// Base URL of the timeapi.io zone endpoint (zone passed as a query).
pub const TIME_API_BASE: &str = "https://timeapi.io/api/Time/current/zone";

// ============================================================================
// SECTION: Builders
// ============================================================================

/// Builds the built-in sources for a zone, in priority order.
///
/// # Errors
///
/// Returns [`SourceError::Config`] when an endpoint URL cannot be built or
/// the HTTP client cannot be constructed.
pub fn default_sources(
    zone: Tz,
    config: &HttpSourceConfig,
) -> Result<Vec<Box<dyn TimeSource>>, SourceError> {
    let zone_name = zone.name();

    let worldtime = format!("{WORLD_TIME_API_BASE}/{zone_name}");
    let worldtime = HttpTimeSource::new("worldtimeapi", &worldtime, zone, config)?;

    let mut timeapi_url = Url::parse(TIME_API_BASE)
        .map_err(|_| SourceError::Config("invalid built-in endpoint base".to_string()))?;
    timeapi_url.query_pairs_mut().append_pair("timeZone", zone_name);
    let timeapi = HttpTimeSource::from_url("timeapi", timeapi_url, zone, config)?;

    Ok(vec![Box::new(worldtime), Box::new(timeapi)])
}

/// Builds the built-in source chain for a zone.
///
/// # Errors
///
/// Returns [`SourceError::Config`] when a built-in source cannot be built.
pub fn default_chain(zone: Tz, config: &HttpSourceConfig) -> Result<SourceChain, SourceError> {
    Ok(SourceChain::new(default_sources(zone, config)?))
}
