// crates/kyiv-clock-sources/src/http.rs
// ============================================================================
// Module: HTTP Time Source
// Description: Cache-bypassing JSON GET against one time endpoint.
// Purpose: Turn one HTTP endpoint into a recoverable TimeSource.
// Dependencies: kyiv-clock-core, reqwest, serde_json
// ============================================================================

//! ## Overview
//! One [`HttpTimeSource`] wraps one endpoint. A fetch is a single bounded GET
//! with cache-bypassing headers; non-success statuses, undecodable bodies,
//! and unrecognizable payloads all map to [`SourceError`] so the chain can
//! continue with the next endpoint. Cleartext HTTP is rejected unless the
//! configuration opts in (local test servers).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use async_trait::async_trait;
use chrono_tz::Tz;
use kyiv_clock_core::SourceError;
use kyiv_clock_core::TimeSource;
use kyiv_clock_core::UnixMillis;
use kyiv_clock_core::parse_remote_instant;
use reqwest::Client;
use reqwest::Url;
use reqwest::header::CACHE_CONTROL;
use reqwest::header::PRAGMA;
use serde_json::Value;

// ============================================================================
// SECTION: Configuration
// ============================================================================

/// Configuration for HTTP time sources.
///
/// # Invariants
/// - `allow_http = false` blocks cleartext `http://` URLs.
/// - `timeout_ms` applies to the full request lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpSourceConfig {
    /// Allow cleartext HTTP (disabled by default).
    pub allow_http: bool,
    /// Request timeout in milliseconds.
    pub timeout_ms: u64,
    /// User agent string for outbound requests.
    pub user_agent: String,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            allow_http: false,
            timeout_ms: 5_000,
            user_agent: "kyiv-clock/0.1".to_string(),
        }
    }
}

// ============================================================================
// SECTION: Source Implementation
// ============================================================================

/// Time source backed by one HTTP endpoint returning a JSON body.
///
/// # Invariants
/// - Requests carry cache-bypassing headers; responses are never cached.
/// - One fetch is one request; retry cadence belongs to the caller.
pub struct HttpTimeSource {
    /// Stable label for telemetry and diagnostics.
    label: String,
    /// Endpoint URL queried on every fetch.
    url: Url,
    /// Target zone consulted by the naive-datetime fallback parse.
    zone: Tz,
    /// HTTP client used for outbound requests.
    client: Client,
}

impl HttpTimeSource {
    /// Creates a source from an endpoint URL string.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Config`] when the URL is invalid, its scheme is
    /// rejected by policy, or the HTTP client cannot be built.
    pub fn new(
        label: impl Into<String>,
        url: &str,
        zone: Tz,
        config: &HttpSourceConfig,
    ) -> Result<Self, SourceError> {
        let url = Url::parse(url)
            .map_err(|_| SourceError::Config(format!("invalid endpoint url: {url}")))?;
        Self::from_url(label, url, zone, config)
    }

    /// Creates a source from a parsed endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns [`SourceError::Config`] when the scheme is rejected by policy
    /// or the HTTP client cannot be built.
    pub fn from_url(
        label: impl Into<String>,
        url: Url,
        zone: Tz,
        config: &HttpSourceConfig,
    ) -> Result<Self, SourceError> {
        validate_scheme(&url, config)?;
        let client = build_client(config)?;
        Ok(Self {
            label: label.into(),
            url,
            zone,
            client,
        })
    }
}

#[async_trait]
impl TimeSource for HttpTimeSource {
    fn label(&self) -> &str {
        &self.label
    }

    async fn fetch_now(&self) -> Result<UnixMillis, SourceError> {
        let response = self
            .client
            .get(self.url.clone())
            .header(CACHE_CONTROL, "no-cache, no-store")
            .header(PRAGMA, "no-cache")
            .send()
            .await
            .map_err(|err| SourceError::Request(err.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Status(status.as_u16()));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|_| SourceError::Payload("body is not valid json".to_string()))?;
        parse_remote_instant(&payload, self.zone)
            .ok_or_else(|| SourceError::Payload("no recognizable time field".to_string()))
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates the endpoint scheme against the cleartext policy.
fn validate_scheme(url: &Url, config: &HttpSourceConfig) -> Result<(), SourceError> {
    match url.scheme() {
        "https" => Ok(()),
        "http" if config.allow_http => Ok(()),
        other => Err(SourceError::Config(format!("unsupported endpoint scheme: {other}"))),
    }
}

/// Builds the bounded HTTP client for one source.
fn build_client(config: &HttpSourceConfig) -> Result<Client, SourceError> {
    Client::builder()
        .timeout(Duration::from_millis(config.timeout_ms))
        .user_agent(config.user_agent.clone())
        .build()
        .map_err(|_| SourceError::Config("http client build failed".to_string()))
}
