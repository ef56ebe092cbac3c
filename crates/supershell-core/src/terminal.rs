#![forbid(unsafe_code)]

//! The terminal contract consumed by the progress overlay.
//!
//! The overlay never touches a real terminal directly. Everything it needs
//! (sizes, prompt state, the last printed line, exclusive access to the
//! output sink) is asked of a [`Terminal`]. This keeps the row accounting
//! testable against a fixed-width fake and lets the host decide how output
//! is actually delivered.

use std::io::{self, Write};

use crate::line_metrics;
use crate::prompt::Prompt;

/// Capabilities of one terminal instance.
///
/// Implementations must be shareable across the log-writing thread and the
/// progress-ticking thread.
pub trait Terminal: Send + Sync {
    /// Current width in columns. `0` means unknown.
    fn width(&self) -> usize;

    /// Rows occupied by `text` at the current width.
    fn line_count(&self, text: &str) -> usize {
        line_metrics::line_count(text, self.width())
    }

    /// `(rows, trailing column)` of the cursor after printing `text`.
    fn line_height_and_width(&self, text: &str) -> (usize, usize) {
        line_metrics::line_height_and_width(text, self.width())
    }

    /// Whether ANSI control sequences are understood.
    fn is_ansi_supported(&self) -> bool;

    /// Master switch for the progress overlay.
    fn is_supershell_enabled(&self) -> bool;

    /// Current prompt state.
    fn prompt(&self) -> Prompt;

    /// Identifier of this terminal, matched against event channel names.
    fn name(&self) -> &str;

    /// The last line printed to this terminal, if any.
    fn last_line(&self) -> Option<String>;

    /// Run `action` with exclusive access to the output sink.
    ///
    /// No other writer may emit bytes while `action` runs. The sink is
    /// released on every exit path, including errors returned by `action`.
    fn with_print_stream(
        &self,
        action: &mut dyn FnMut(&mut dyn Write) -> io::Result<()>,
    ) -> io::Result<()>;
}
