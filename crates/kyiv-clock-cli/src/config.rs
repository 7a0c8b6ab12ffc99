// crates/kyiv-clock-cli/src/config.rs
// ============================================================================
// Module: CLI Configuration
// Description: TOML config file loading and flag-over-file settings merge.
// Purpose: Resolve effective clock settings from defaults, file, and flags.
// Dependencies: serde, thiserror, toml
// ============================================================================

//! ## Overview
//! Settings resolve in three layers: built-in defaults, then the optional
//! TOML config file, then command-line flags. Later layers win. The config
//! file is optional; a missing default-path file is not an error, but an
//! explicitly requested file must exist.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Config file consulted when no `--config` flag is given.
pub const DEFAULT_CONFIG_PATH: &str = "kyiv-clock.toml";

/// Default resync cadence in minutes.
const DEFAULT_RESYNC_MINUTES: u64 = 10;

/// Default per-request timeout in milliseconds.
const DEFAULT_TIMEOUT_MS: u64 = 5_000;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while loading the config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config at {path}: {message}")]
    Read {
        /// Path of the file that failed to read.
        path: PathBuf,
        /// Underlying I/O error text.
        message: String,
    },
    /// The config file is not valid TOML for the expected shape.
    #[error("failed to parse config at {path}: {message}")]
    Parse {
        /// Path of the file that failed to parse.
        path: PathBuf,
        /// Underlying parse error text.
        message: String,
    },
}

// ============================================================================
// SECTION: File Shape
// ============================================================================

/// On-disk config file shape. Every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    /// IANA zone name rendered by the clock (e.g. `Europe/Kyiv`).
    pub zone: Option<String>,
    /// Display locale label (`en` or `uk`).
    pub locale: Option<String>,
    /// Endpoint URLs queried in priority order; empty means built-ins.
    pub endpoints: Option<Vec<String>>,
    /// Resync cadence in minutes.
    pub resync_minutes: Option<u64>,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: Option<u64>,
    /// Allow cleartext HTTP endpoints.
    pub allow_http: Option<bool>,
}

/// Loads the config file at `path`, or defaults when the default-path file
/// is absent.
///
/// # Errors
///
/// Returns [`ConfigError`] when the file cannot be read (explicit paths
/// only) or parsed.
pub fn load_file(path: Option<&Path>) -> Result<FileConfig, ConfigError> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_PATH), false),
    };
    let raw = match fs::read_to_string(&path) {
        Ok(raw) => raw,
        Err(_) if !required => return Ok(FileConfig::default()),
        Err(err) => {
            return Err(ConfigError::Read {
                path,
                message: err.to_string(),
            });
        }
    };
    toml::from_str(&raw).map_err(|err| ConfigError::Parse {
        path,
        message: err.to_string(),
    })
}

// ============================================================================
// SECTION: Effective Settings
// ============================================================================

/// Flag values captured from the command line. `None` means not given.
#[derive(Debug, Default)]
pub struct FlagOverrides {
    /// Zone name from `--zone`.
    pub zone: Option<String>,
    /// Locale label from `--locale`.
    pub locale: Option<String>,
    /// Endpoint URLs from repeated `--endpoint` flags.
    pub endpoints: Vec<String>,
    /// Resync cadence from `--resync-minutes`.
    pub resync_minutes: Option<u64>,
    /// Request timeout from `--timeout-ms`.
    pub timeout_ms: Option<u64>,
    /// Cleartext opt-in from `--allow-http`.
    pub allow_http: bool,
}

/// Effective settings after the defaults/file/flags merge.
#[derive(Debug, PartialEq, Eq)]
pub struct Settings {
    /// IANA zone name rendered by the clock.
    pub zone: String,
    /// Display locale label.
    pub locale: String,
    /// Endpoint URLs in priority order; empty means built-ins.
    pub endpoints: Vec<String>,
    /// Resync cadence in minutes.
    pub resync_minutes: u64,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Allow cleartext HTTP endpoints.
    pub allow_http: bool,
}

/// Merges flag values over file values over built-in defaults.
#[must_use]
pub fn resolve(file: FileConfig, flags: FlagOverrides) -> Settings {
    let endpoints = if flags.endpoints.is_empty() {
        file.endpoints.unwrap_or_default()
    } else {
        flags.endpoints
    };
    Settings {
        zone: flags.zone.or(file.zone).unwrap_or_else(|| "Europe/Kyiv".to_string()),
        locale: flags.locale.or(file.locale).unwrap_or_else(|| "uk".to_string()),
        endpoints,
        resync_minutes: flags
            .resync_minutes
            .or(file.resync_minutes)
            .unwrap_or(DEFAULT_RESYNC_MINUTES),
        timeout_ms: flags.timeout_ms.or(file.timeout_ms).unwrap_or(DEFAULT_TIMEOUT_MS),
        allow_http: flags.allow_http || file.allow_http.unwrap_or(false),
    }
}
