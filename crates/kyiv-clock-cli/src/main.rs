// crates/kyiv-clock-cli/src/main.rs
// ============================================================================
// Module: Kyiv Clock CLI Entry Point
// Description: Terminal front end for the synchronized localized clock.
// Purpose: Wire config, sources, and display into a running clock service.
// Dependencies: clap, kyiv-clock-core, kyiv-clock-sources, tokio, toml.
// ============================================================================

//! ## Overview
//! The Kyiv Clock CLI runs the clock service against built-in or configured
//! time endpoints and repaints one terminal line every second. `--once`
//! performs a single resolve-and-render instead of running continuously.
//! All user-facing strings are routed through the i18n catalog.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub(crate) mod config;
pub(crate) mod display;
pub(crate) mod i18n;

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use chrono_tz::Tz;
use clap::ArgAction;
use clap::Parser;
use kyiv_clock_core::ClockLocale;
use kyiv_clock_core::ClockService;
use kyiv_clock_core::ClockServiceConfig;
use kyiv_clock_core::SourceChain;
use kyiv_clock_core::SourceError;
use kyiv_clock_core::SyncObserver;
use kyiv_clock_core::TimeSource;
use kyiv_clock_core::UnixMillis;
use kyiv_clock_core::render_frame;
use kyiv_clock_sources::HttpSourceConfig;
use kyiv_clock_sources::HttpTimeSource;
use kyiv_clock_sources::default_chain;
use thiserror::Error;

use crate::config::ConfigError;
use crate::config::FlagOverrides;
use crate::config::Settings;
use crate::display::TerminalDisplay;
use crate::i18n::Locale;
use crate::i18n::set_locale;
use crate::i18n::t;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Environment variable for CLI locale selection.
const LANG_ENV: &str = "KYIV_CLOCK_LANG";

// ============================================================================
// SECTION: CLI Types
// ============================================================================

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(name = "kyiv-clock", disable_help_subcommand = true, disable_version_flag = true)]
struct Cli {
    /// Print version information and exit.
    #[arg(long = "version", action = ArgAction::SetTrue)]
    show_version: bool,
    /// Path to a TOML config file (defaults to `kyiv-clock.toml` if present).
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// IANA zone to render (e.g. `Europe/Kyiv`).
    #[arg(long, value_name = "ZONE")]
    zone: Option<String>,
    /// Display locale (`en` or `uk`; overrides `KYIV_CLOCK_LANG`).
    #[arg(long, value_name = "LOCALE")]
    locale: Option<String>,
    /// Time endpoint URL; repeat to define the priority order.
    #[arg(long = "endpoint", value_name = "URL", action = ArgAction::Append)]
    endpoints: Vec<String>,
    /// Minutes between network resync attempts.
    #[arg(long, value_name = "MINUTES")]
    resync_minutes: Option<u64>,
    /// Per-request timeout in milliseconds.
    #[arg(long, value_name = "MS")]
    timeout_ms: Option<u64>,
    /// Allow cleartext HTTP endpoints.
    #[arg(long, action = ArgAction::SetTrue)]
    allow_http: bool,
    /// Resolve and print the time once instead of running continuously.
    #[arg(long, action = ArgAction::SetTrue)]
    once: bool,
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// CLI error wrapper for localized error messages.
#[derive(Debug, Error)]
#[error("{message}")]
struct CliError {
    /// Human-readable error message.
    message: String,
}

impl CliError {
    /// Constructs a new [`CliError`] from a localized message.
    const fn new(message: String) -> Self {
        Self {
            message,
        }
    }
}

/// CLI result alias for fallible operations.
type CliResult<T> = Result<T, CliError>;

// ============================================================================
// SECTION: Entry Point
// ============================================================================

/// CLI entry point returning an exit code.
#[tokio::main(flavor = "multi_thread")]
async fn main() -> ExitCode {
    match run().await {
        Ok(code) => code,
        Err(err) => emit_error(&err.to_string()),
    }
}

/// Executes the CLI.
async fn run() -> CliResult<ExitCode> {
    let cli = Cli::parse();

    if cli.show_version {
        let version = env!("CARGO_PKG_VERSION");
        write_stdout_line(&t!("main.version", version = version))
            .map_err(|err| CliError::new(output_error("stdout", &err)))?;
        return Ok(ExitCode::SUCCESS);
    }

    let file = config::load_file(cli.config.as_deref()).map_err(config_error)?;
    let settings = config::resolve(
        file,
        FlagOverrides {
            zone: cli.zone,
            locale: cli.locale,
            endpoints: cli.endpoints,
            resync_minutes: cli.resync_minutes,
            timeout_ms: cli.timeout_ms,
            allow_http: cli.allow_http,
        },
    );

    let env_lang = std::env::var(LANG_ENV).ok();
    let locale = resolve_locale(&settings, env_lang.as_deref())?;
    set_locale(locale);

    if settings.resync_minutes == 0 {
        return Err(CliError::new(t!("config.invalid_resync")));
    }
    let zone: Tz = settings
        .zone
        .parse()
        .map_err(|_| CliError::new(t!("config.invalid_zone", zone = settings.zone)))?;
    let chain = build_chain(&settings, zone)?;

    if cli.once {
        return run_once(chain, zone, locale).await;
    }
    run_clock(&settings, chain, zone, locale).await
}

// ============================================================================
// SECTION: Continuous Mode
// ============================================================================

/// Runs the clock until interrupted.
async fn run_clock(
    settings: &Settings,
    chain: SourceChain,
    zone: Tz,
    locale: Locale,
) -> CliResult<ExitCode> {
    let service_config = ClockServiceConfig {
        zone,
        locale: clock_locale(locale),
        render_interval: Duration::from_secs(1),
        resync_interval: Duration::from_secs(settings.resync_minutes.saturating_mul(60)),
        status_online: t!("clock.status.online"),
        status_offline: t!("clock.status.offline"),
    };

    let display = TerminalDisplay::new();
    let handle = ClockService::start(service_config, chain, display.slots(), Arc::new(StderrObserver))
        .ok_or_else(|| CliError::new(t!("clock.start_failed")))?;

    let _ = tokio::signal::ctrl_c().await;
    handle.shutdown();
    write_stdout_line("").map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Once Mode
// ============================================================================

/// Resolves the time once and prints a snapshot.
///
/// A total sync failure is not fatal: the snapshot falls back to the
/// uncorrected local clock and reports the offline status.
async fn run_once(chain: SourceChain, zone: Tz, locale: Locale) -> CliResult<ExitCode> {
    let (instant, status) = match chain.resolve(&StderrObserver).await {
        Ok(remote) => (remote, t!("clock.status.online")),
        Err(_) => {
            let _ = write_stderr_line(&t!("sync.exhausted"));
            (UnixMillis::now(), t!("clock.status.offline"))
        }
    };
    let frame = render_frame(instant, zone, &clock_locale(locale))
        .ok_or_else(|| CliError::new(t!("once.render_failed")))?;
    let correction = instant.delta_from(UnixMillis::now());

    write_stdout_line(&t!("once.date", date = frame.date))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&t!("once.time", time = frame.time))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&t!("once.correction", millis = correction))
        .map_err(|err| CliError::new(output_error("stdout", &err)))?;
    write_stdout_line(&status).map_err(|err| CliError::new(output_error("stdout", &err)))?;
    Ok(ExitCode::SUCCESS)
}

// ============================================================================
// SECTION: Wiring Helpers
// ============================================================================

/// Builds the source chain from configured endpoints or the built-in list.
fn build_chain(settings: &Settings, zone: Tz) -> CliResult<SourceChain> {
    let http_config = HttpSourceConfig {
        allow_http: settings.allow_http,
        timeout_ms: settings.timeout_ms,
        user_agent: format!("kyiv-clock/{}", env!("CARGO_PKG_VERSION")),
    };

    if settings.endpoints.is_empty() {
        return default_chain(zone, &http_config)
            .map_err(|err| CliError::new(t!("sources.init_failed", error = err)));
    }

    let mut sources: Vec<Box<dyn TimeSource>> = Vec::with_capacity(settings.endpoints.len());
    for (index, url) in settings.endpoints.iter().enumerate() {
        let label = format!("endpoint-{}", index + 1);
        let source = HttpTimeSource::new(label, url, zone, &http_config)
            .map_err(|err| CliError::new(t!("config.invalid_endpoint", url = url, error = err)))?;
        sources.push(Box::new(source));
    }
    Ok(SourceChain::new(sources))
}

/// Maps the CLI locale onto the clock's date tables.
fn clock_locale(locale: Locale) -> ClockLocale {
    match locale {
        Locale::En => ClockLocale::english(),
        Locale::Uk => ClockLocale::ukrainian(),
    }
}

/// Resolves the CLI locale from settings or environment.
fn resolve_locale(settings: &Settings, env_lang: Option<&str>) -> CliResult<Locale> {
    if let Some(value) = env_lang {
        return Locale::parse(value).ok_or_else(|| {
            CliError::new(t!("i18n.lang.invalid_env", env = LANG_ENV, value = value))
        });
    }
    Locale::parse(&settings.locale)
        .ok_or_else(|| CliError::new(t!("config.invalid_locale", locale = settings.locale)))
}

/// Maps config-layer errors onto localized CLI errors.
fn config_error(error: ConfigError) -> CliError {
    match error {
        ConfigError::Read {
            path,
            message,
        } => CliError::new(t!("config.read_failed", path = path.display(), error = message)),
        ConfigError::Parse {
            path,
            message,
        } => CliError::new(t!("config.parse_failed", path = path.display(), error = message)),
    }
}

// ============================================================================
// SECTION: Telemetry
// ============================================================================

/// Observer that reports per-source failures on stderr.
struct StderrObserver;

impl SyncObserver for StderrObserver {
    fn source_failed(&self, label: &str, error: &SourceError) {
        let _ = write_stderr_line(&t!("sync.source_failed", label = label, error = error));
    }
}

// ============================================================================
// SECTION: Output Helpers
// ============================================================================

/// Writes a single line to stdout.
fn write_stdout_line(message: &str) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    writeln!(&mut stdout, "{message}")
}

/// Writes a single line to stderr.
fn write_stderr_line(message: &str) -> std::io::Result<()> {
    let mut stderr = std::io::stderr();
    writeln!(&mut stderr, "{message}")
}

/// Formats a localized output error message.
fn output_error(stream: &str, error: &std::io::Error) -> String {
    let stream_label = match stream {
        "stdout" => t!("output.stream.stdout"),
        "stderr" => t!("output.stream.stderr"),
        _ => t!("output.stream.unknown"),
    };
    t!("output.write_failed", stream = stream_label, error = error)
}

/// Emits an error message to stderr and returns a failure exit code.
fn emit_error(message: &str) -> ExitCode {
    let _ = write_stderr_line(message);
    ExitCode::FAILURE
}
