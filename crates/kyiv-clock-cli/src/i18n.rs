// crates/kyiv-clock-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings for consistent localized output.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The Kyiv Clock CLI stores user-facing strings in a small translation
//! catalog so the same binary can speak English and Ukrainian. All runtime
//! output should be routed through the [`t!`](crate::i18n::t) macro.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - Variants are stable for CLI parsing and catalog lookup.
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default fallback).
    En,
    /// Ukrainian.
    Uk,
}

impl Locale {
    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "uk" | "ua" => Some(Self::Uk),
            _ => None,
        }
    }
}

/// A formatted message argument captured by the [`t!`](crate::i18n::t) macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
/// - `value` is preformatted and should be safe for display.
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries loaded into the localized message bundle.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "kyiv-clock {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("config.read_failed", "Failed to read config at {path}: {error}"),
    ("config.parse_failed", "Failed to parse config at {path}: {error}"),
    ("config.invalid_zone", "Invalid time zone: {zone}"),
    ("config.invalid_locale", "Invalid locale: {locale}. Expected 'en' or 'uk'."),
    ("config.invalid_endpoint", "Invalid endpoint URL {url}: {error}"),
    ("config.invalid_resync", "resync_minutes must be >= 1."),
    ("clock.start_failed", "Failed to start the clock service."),
    ("clock.status.online", "Synchronized (online)"),
    ("clock.status.offline", "Fallback mode (offline)"),
    ("sync.source_failed", "Time source {label} failed: {error}"),
    ("sync.exhausted", "All time sources failed; keeping the local clock."),
    ("sources.init_failed", "Failed to initialize time sources: {error}"),
    ("once.date", "Date: {date}"),
    ("once.time", "Time: {time}"),
    ("once.correction", "Correction: {millis} ms"),
    ("once.render_failed", "Received an out-of-range time reading."),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'uk'."),
];

/// Static Ukrainian catalog entries loaded into the localized message bundle.
const CATALOG_UK: &[(&str, &str)] = &[
    ("main.version", "kyiv-clock {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "вивід"),
    ("output.write_failed", "Не вдалося записати у {stream}: {error}"),
    ("config.read_failed", "Не вдалося прочитати конфігурацію {path}: {error}"),
    ("config.parse_failed", "Не вдалося розібрати конфігурацію {path}: {error}"),
    ("config.invalid_zone", "Некоректний часовий пояс: {zone}"),
    ("config.invalid_locale", "Некоректна локаль: {locale}. Очікується 'en' або 'uk'."),
    ("config.invalid_endpoint", "Некоректна адреса джерела {url}: {error}"),
    ("config.invalid_resync", "resync_minutes має бути >= 1."),
    ("clock.start_failed", "Не вдалося запустити службу годинника."),
    ("clock.status.online", "Синхронізовано (онлайн)"),
    ("clock.status.offline", "Резервний режим (офлайн)"),
    ("sync.source_failed", "Джерело часу {label} недоступне: {error}"),
    ("sync.exhausted", "Усі джерела часу недоступні; використовується локальний годинник."),
    ("sources.init_failed", "Не вдалося ініціалізувати джерела часу: {error}"),
    ("once.date", "Дата: {date}"),
    ("once.time", "Час: {time}"),
    ("once.correction", "Поправка: {millis} мс"),
    ("once.render_failed", "Отримано час поза допустимим діапазоном."),
    ("i18n.lang.invalid_env", "Некоректне значення {env}: {value}. Очікується 'en' або 'uk'."),
];

/// Returns the message catalog for the requested locale.
pub(crate) fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_UK_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Uk => CATALOG_UK_MAP.get_or_init(|| CATALOG_UK.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
///
/// # Returns
///
/// A localized [`String`] with placeholders substituted.
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}

pub(crate) use t;
