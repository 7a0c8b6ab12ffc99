// crates/kyiv-clock-core/src/locale.rs
// ============================================================================
// Module: Clock Locale
// Description: Weekday/month tables and date patterns for frame rendering.
// Purpose: Produce long-form localized date strings without a locale runtime.
// Dependencies: std
// ============================================================================

//! ## Overview
//! The clock displays a long-form date in the host locale. The tables here
//! cover the two shipped locales (Ukrainian, the default, and English); the
//! Ukrainian month names are in the genitive case as date grammar requires.
//! The first letter of a rendered date is always capitalized regardless of
//! locale grammar.

// ============================================================================
// SECTION: Date Pattern
// ============================================================================

/// Ordering and decoration of the long-form date string.
///
/// # Invariants
/// - Variants are stable; each shipped locale maps to exactly one pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DatePattern {
    /// `weekday, D month YYYY р.` (Ukrainian convention).
    DayMonthYearSuffixed,
    /// `Weekday, Month D, YYYY` (English convention).
    MonthDayYear,
}

// ============================================================================
// SECTION: Locale
// ============================================================================

/// Localized tables used to render the date line.
///
/// # Invariants
/// - `weekdays` is Monday-first; `months` is January-first.
#[derive(Debug, Clone)]
pub struct ClockLocale {
    /// Weekday names, Monday first.
    weekdays: [&'static str; 7],
    /// Month names, January first.
    months: [&'static str; 12],
    /// Ordering and decoration of the rendered date.
    pattern: DatePattern,
}

impl ClockLocale {
    /// Ukrainian locale (default); month names in the genitive case.
    #[must_use]
    pub const fn ukrainian() -> Self {
        Self {
            weekdays: [
                "понеділок",
                "вівторок",
                "середа",
                "четвер",
                "п'ятниця",
                "субота",
                "неділя",
            ],
            months: [
                "січня",
                "лютого",
                "березня",
                "квітня",
                "травня",
                "червня",
                "липня",
                "серпня",
                "вересня",
                "жовтня",
                "листопада",
                "грудня",
            ],
            pattern: DatePattern::DayMonthYearSuffixed,
        }
    }

    /// English locale.
    #[must_use]
    pub const fn english() -> Self {
        Self {
            weekdays: [
                "Monday",
                "Tuesday",
                "Wednesday",
                "Thursday",
                "Friday",
                "Saturday",
                "Sunday",
            ],
            months: [
                "January",
                "February",
                "March",
                "April",
                "May",
                "June",
                "July",
                "August",
                "September",
                "October",
                "November",
                "December",
            ],
            pattern: DatePattern::MonthDayYear,
        }
    }

    /// Formats the long-form date line with a capitalized first letter.
    ///
    /// `weekday_from_monday` is zero-based from Monday and `month_index` is
    /// zero-based from January; out-of-range indexes render as empty names.
    #[must_use]
    pub fn format_date(
        &self,
        weekday_from_monday: usize,
        day: u32,
        month_index: usize,
        year: i32,
    ) -> String {
        let weekday = self.weekdays.get(weekday_from_monday).copied().unwrap_or("");
        let month = self.months.get(month_index).copied().unwrap_or("");
        let formatted = match self.pattern {
            DatePattern::DayMonthYearSuffixed => format!("{weekday}, {day} {month} {year} р."),
            DatePattern::MonthDayYear => format!("{weekday}, {month} {day}, {year}"),
        };
        capitalize_first(&formatted)
    }
}

impl Default for ClockLocale {
    fn default() -> Self {
        Self::ukrainian()
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the input with its first letter uppercased (multi-byte aware).
#[must_use]
pub fn capitalize_first(value: &str) -> String {
    let mut chars = value.chars();
    chars.next().map_or_else(String::new, |first| {
        let mut capitalized: String = first.to_uppercase().collect();
        capitalized.push_str(chars.as_str());
        capitalized
    })
}
