//! Visible status affordances.
//!
//! Each affordance is an owned resource with an explicit create/clear
//! lifecycle, never a process-wide singleton. Components hold their own
//! surface and are responsible for clearing it on teardown.

use std::io::Write;

/// Glyph, color and tooltip of a status affordance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indicator {
    pub glyph: &'static str,
    /// Hex color, e.g. "#00FF00".
    pub color: &'static str,
    pub tooltip: &'static str,
}

/// Render target for a single status affordance.
pub trait StatusSurface {
    /// Replace the visible text.
    fn set(&mut self, text: &str);

    /// Remove the visible text entirely.
    fn clear(&mut self);
}

/// In-place status line on stderr.
///
/// Uses carriage return + erase-line so repeated updates overwrite the
/// same terminal row. Cleared on drop.
#[derive(Debug, Default)]
pub struct TerminalStatus {
    shown: bool,
}

impl TerminalStatus {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StatusSurface for TerminalStatus {
    fn set(&mut self, text: &str) {
        let mut err = std::io::stderr();
        let _ = write!(err, "\r\x1b[2K{text}");
        let _ = err.flush();
        self.shown = true;
    }

    fn clear(&mut self) {
        if self.shown {
            let mut err = std::io::stderr();
            let _ = write!(err, "\r\x1b[2K");
            let _ = err.flush();
            self.shown = false;
        }
    }
}

impl Drop for TerminalStatus {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Surface that renders nowhere. Used by tests and headless commands.
#[derive(Debug, Default)]
pub struct NullSurface;

impl StatusSurface for NullSurface {
    fn set(&mut self, _text: &str) {}
    fn clear(&mut self) {}
}
