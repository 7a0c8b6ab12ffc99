// crates/kyiv-clock-cli/src/display.rs
// ============================================================================
// Module: Terminal Display
// Description: Single-line terminal panel fed by clock display slots.
// Purpose: Adapt the clock's text slots to an in-place stdout line.
// Dependencies: kyiv-clock-core, standard library I/O and synchronization.
// ============================================================================

//! ## Overview
//! The terminal display keeps the latest date, time, and status text behind
//! a mutex and repaints one carriage-returned stdout line whenever any slot
//! receives an update. Slot closures are `Send + Sync` so the clock service
//! can call them from its background tasks.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::io::Write;
use std::sync::Arc;
use std::sync::Mutex;

use kyiv_clock_core::ClockDisplaySlots;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Latest text received on each slot.
#[derive(Debug, Default)]
struct PanelText {
    /// Localized date line.
    date: String,
    /// Zero-padded `HH:MM` time.
    time: String,
    /// Sync status line.
    status: String,
}

/// Terminal panel that renders slot updates in place on one stdout line.
///
/// # Invariants
/// - Repaints are serialized by the interior mutex.
/// - A poisoned lock drops the update instead of panicking.
#[derive(Clone, Default)]
pub struct TerminalDisplay {
    /// Shared panel text updated by slot closures.
    text: Arc<Mutex<PanelText>>,
}

impl TerminalDisplay {
    /// Creates an empty display.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the slot set wired to this display.
    #[must_use]
    pub fn slots(&self) -> ClockDisplaySlots {
        let date_text = Arc::clone(&self.text);
        let time_text = Arc::clone(&self.text);
        let status_text = Arc::clone(&self.text);
        ClockDisplaySlots {
            date: Some(Box::new(move |value: &str| {
                if let Ok(mut text) = date_text.lock() {
                    text.date = value.to_string();
                    repaint(&text);
                }
            })),
            time: Some(Box::new(move |value: &str| {
                if let Ok(mut text) = time_text.lock() {
                    text.time = value.to_string();
                    repaint(&text);
                }
            })),
            status: Some(Box::new(move |value: &str| {
                if let Ok(mut text) = status_text.lock() {
                    text.status = value.to_string();
                    repaint(&text);
                }
            })),
        }
    }

    /// Returns the latest panel line.
    #[cfg(test)]
    #[must_use]
    pub fn current_line(&self) -> String {
        self.text.lock().map(|text| compose(&text)).unwrap_or_default()
    }
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Composes the single panel line from the latest slot text.
fn compose(text: &PanelText) -> String {
    let mut line = String::new();
    for part in [text.time.as_str(), text.date.as_str(), text.status.as_str()] {
        if part.is_empty() {
            continue;
        }
        if !line.is_empty() {
            line.push_str("  ");
        }
        line.push_str(part);
    }
    line
}

/// Rewrites the stdout line in place. Write failures are ignored; the next
/// tick repaints.
fn repaint(text: &PanelText) {
    let line = compose(text);
    let mut stdout = std::io::stdout();
    let _ = write!(&mut stdout, "\r\u{1b}[2K{line}");
    let _ = stdout.flush();
}
