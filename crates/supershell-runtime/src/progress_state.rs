#![forbid(unsafe_code)]

//! Per-terminal progress state and the line accumulator.
//!
//! Every byte written to the terminal passes through [`ProgressState::add_bytes`]
//! first. The accumulator reassembles output into lines so the renderer knows
//! what the cursor is sitting on, records completed lines in a bounded
//! history, and lets real output reclaim the blank rows that were reserved
//! when the progress block last shrank.
//!
//! # Shared state
//!
//! | Field | Cell | Writers |
//! |-------|------|---------|
//! | `progress_lines` | `Mutex<Arc<Vec<String>>>`, swapped wholesale | snapshot updates |
//! | `padding` | `AtomicUsize`, saturating updates | accumulator, snapshot updates |
//! | `current_line_bytes` | `Mutex<Vec<u8>>` | accumulator |
//!
//! Padding updates are read-then-write and may race; a stale value is
//! corrected by the next snapshot.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use supershell_core::config::PLATFORM_LINE_SEPARATOR;
use supershell_core::line_metrics::strip_escapes;
use supershell_core::{SupershellConfig, Terminal};

use crate::line_history::LineHistory;

/// Progress rendering state of one terminal.
#[derive(Debug)]
pub struct ProgressState {
    progress_lines: Mutex<Arc<Vec<String>>>,
    padding: AtomicUsize,
    blank_zone: usize,
    current_line_bytes: Mutex<Vec<u8>>,
    history: LineHistory,
    line_separator: String,
}

impl Default for ProgressState {
    fn default() -> Self {
        Self::from_config(&SupershellConfig::default())
    }
}

impl ProgressState {
    /// State with the given blank zone and default history and separator.
    #[must_use]
    pub fn new(blank_zone: usize) -> Self {
        Self::from_config(&SupershellConfig::default().with_blank_zone(blank_zone))
    }

    /// State configured from `config`.
    ///
    /// An empty line separator falls back to the platform terminator.
    #[must_use]
    pub fn from_config(config: &SupershellConfig) -> Self {
        let line_separator = if config.line_separator.is_empty() {
            PLATFORM_LINE_SEPARATOR.to_owned()
        } else {
            config.line_separator.clone()
        };
        Self {
            progress_lines: Mutex::new(Arc::new(Vec::new())),
            padding: AtomicUsize::new(0),
            blank_zone: config.blank_zone,
            current_line_bytes: Mutex::new(Vec::new()),
            history: LineHistory::new(config.history_capacity),
            line_separator,
        }
    }

    fn buffer(&self) -> MutexGuard<'_, Vec<u8>> {
        self.current_line_bytes
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn lines_cell(&self) -> MutexGuard<'_, Arc<Vec<String>>> {
        self.progress_lines.lock().unwrap_or_else(|e| e.into_inner())
    }

    // ── Accessors ─────────────────────────────────────────────────────

    /// Minimum blank rows reserved above the progress block.
    #[must_use]
    pub fn blank_zone(&self) -> usize {
        self.blank_zone
    }

    /// Blank filler rows currently reserved.
    #[must_use]
    pub fn padding(&self) -> usize {
        self.padding.load(Ordering::Acquire)
    }

    pub(crate) fn set_padding(&self, rows: usize) {
        self.padding.store(rows, Ordering::Release);
    }

    /// The most recently rendered progress block.
    #[must_use]
    pub fn progress_lines(&self) -> Arc<Vec<String>> {
        Arc::clone(&self.lines_cell())
    }

    /// Whether a progress block is currently shown.
    #[must_use]
    pub fn has_progress_lines(&self) -> bool {
        !self.lines_cell().is_empty()
    }

    /// Replace the progress block, returning the previous one.
    pub(crate) fn swap_progress_lines(&self, lines: Vec<String>) -> Arc<Vec<String>> {
        std::mem::replace(&mut *self.lines_cell(), Arc::new(lines))
    }

    /// Terminator that completes a line.
    #[must_use]
    pub fn line_separator(&self) -> &str {
        &self.line_separator
    }

    /// Completed lines, oldest first, escape sequences stripped.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.history.snapshot()
    }

    /// Raw bytes of the unterminated line being accumulated.
    #[must_use]
    pub fn current_line_bytes(&self) -> Vec<u8> {
        self.buffer().clone()
    }

    // ── Line accumulator ──────────────────────────────────────────────

    /// Feed output bytes into the accumulator.
    ///
    /// While padding is reserved, every row the growing line newly occupies
    /// consumes one padding row. Completed lines move into the history; the
    /// unterminated remainder (possibly empty) becomes the new current line.
    /// Malformed UTF-8 is decoded lossily.
    pub fn add_bytes<T: Terminal + ?Sized>(&self, terminal: &T, bytes: &[u8]) {
        let mut current = self.buffer();

        let padding = self.padding();
        let rows_before = if padding > 0 {
            terminal.line_count(&String::from_utf8_lossy(&current))
        } else {
            0
        };
        current.extend_from_slice(bytes);
        if padding > 0 {
            let rows_after = terminal.line_count(&String::from_utf8_lossy(&current));
            let consumed = rows_after.saturating_sub(rows_before);
            if consumed > 0 {
                self.consume_padding(consumed);
            }
        }

        let separator = self.line_separator.as_bytes();
        let Some(last) = current
            .windows(separator.len())
            .rposition(|window| window == separator)
        else {
            return;
        };
        let remainder = current[last + separator.len()..].to_vec();
        current.truncate(last);
        let completed = std::mem::replace(&mut *current, remainder);
        drop(current);

        for line in String::from_utf8_lossy(&completed).split(self.line_separator.as_str()) {
            self.history.push(strip_escapes(line));
        }
    }

    /// Discard the current line.
    ///
    /// When nothing had been accumulated, one reserved padding row is given
    /// back instead.
    pub fn clear_bytes(&self) {
        let mut current = self.buffer();
        if current.is_empty() {
            let _ = self
                .padding
                .fetch_update(Ordering::AcqRel, Ordering::Acquire, |rows| rows.checked_sub(1));
        }
        *current = Vec::new();
    }

    /// Last non-blank line of the current buffer with escapes stripped.
    #[must_use]
    pub fn current_line(&self) -> Option<String> {
        let current = self.buffer();
        if current.is_empty() {
            return None;
        }
        String::from_utf8_lossy(&current)
            .lines()
            .rev()
            .map(strip_escapes)
            .find(|line| !line.trim().is_empty())
    }

    /// Forget the progress block, padding and current line.
    ///
    /// The line history survives.
    pub fn reset(&self) {
        self.swap_progress_lines(Vec::new());
        self.set_padding(0);
        *self.buffer() = Vec::new();
    }

    fn consume_padding(&self, rows: usize) {
        let _ = self
            .padding
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |padding| {
                Some(padding.saturating_sub(rows))
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::FixedTerminal;

    fn state() -> ProgressState {
        ProgressState::from_config(&SupershellConfig::default().with_line_separator("\n"))
    }

    #[test]
    fn reassembles_lines_across_writes() {
        let term = FixedTerminal::new(80);
        let state = state();
        state.add_bytes(&term, b"abc");
        state.add_bytes(&term, b"def\n");
        state.add_bytes(&term, b"ghi");
        assert_eq!(state.lines(), vec!["abcdef"]);
        assert_eq!(state.current_line_bytes(), b"ghi");
    }

    #[test]
    fn terminated_write_empties_buffer() {
        let term = FixedTerminal::new(80);
        let state = state();
        state.add_bytes(&term, b"one\ntwo\n");
        assert_eq!(state.lines(), vec!["one", "two"]);
        assert!(state.current_line_bytes().is_empty());
        assert_eq!(state.current_line(), None);
    }

    #[test]
    fn blank_lines_are_recorded() {
        let term = FixedTerminal::new(80);
        let state = state();
        state.add_bytes(&term, b"a\n\nb\n");
        assert_eq!(state.lines(), vec!["a", "", "b"]);
    }

    #[test]
    fn history_lines_are_stripped() {
        let term = FixedTerminal::new(80);
        let state = state();
        state.add_bytes(&term, b"\x1b[32m[info]\x1b[0m done\n");
        assert_eq!(state.lines(), vec!["[info] done"]);
    }

    #[test]
    fn crlf_separator() {
        let term = FixedTerminal::new(80);
        let state =
            ProgressState::from_config(&SupershellConfig::default().with_line_separator("\r\n"));
        state.add_bytes(&term, b"left\r");
        state.add_bytes(&term, b"\nright");
        assert_eq!(state.lines(), vec!["left"]);
        assert_eq!(state.current_line_bytes(), b"right");
    }

    #[test]
    fn split_utf8_sequence_survives_until_completed() {
        let term = FixedTerminal::new(80);
        let state = state();
        let bytes = "né\n".as_bytes();
        state.add_bytes(&term, &bytes[..2]);
        state.add_bytes(&term, &bytes[2..]);
        assert_eq!(state.lines(), vec!["né"]);
    }

    #[test]
    fn malformed_utf8_does_not_fail() {
        let term = FixedTerminal::new(80);
        let state = state();
        state.add_bytes(&term, b"bad \xff byte\n");
        assert_eq!(state.lines().len(), 1);
        assert!(state.lines()[0].starts_with("bad "));
    }

    #[test]
    fn output_consumes_padding_rows() {
        let term = FixedTerminal::new(10);
        let state = state();
        state.set_padding(3);
        state.add_bytes(&term, b"abc");
        assert_eq!(state.padding(), 2);
        // Still on the same row.
        state.add_bytes(&term, b"def");
        assert_eq!(state.padding(), 2);
        // Wraps onto a second row.
        state.add_bytes(&term, b"ghijk");
        assert_eq!(state.padding(), 1);
    }

    #[test]
    fn carriage_return_rewrite_does_not_consume_padding() {
        let term = FixedTerminal::new(4);
        let state = state();
        state.set_padding(2);
        state.add_bytes(&term, b"50%");
        assert_eq!(state.padding(), 1);
        // Overwrites the same row instead of wrapping onto a new one.
        state.add_bytes(&term, b"\r60%");
        assert_eq!(state.padding(), 1);
    }

    #[test]
    fn padding_floors_at_zero() {
        let term = FixedTerminal::new(5);
        let state = state();
        state.set_padding(1);
        state.add_bytes(&term, &[b'x'; 40]);
        assert_eq!(state.padding(), 0);
    }

    #[test]
    fn clear_bytes_on_empty_buffer_reclaims_padding() {
        let state = state();
        state.set_padding(2);
        state.clear_bytes();
        assert_eq!(state.padding(), 1);
        state.clear_bytes();
        state.clear_bytes();
        assert_eq!(state.padding(), 0);
    }

    #[test]
    fn clear_bytes_with_pending_line_keeps_padding() {
        let term = FixedTerminal::new(80);
        let state = state();
        state.add_bytes(&term, b"partial");
        state.set_padding(2);
        state.clear_bytes();
        assert_eq!(state.padding(), 2);
        assert!(state.current_line_bytes().is_empty());
    }

    #[test]
    fn current_line_strips_and_skips_blank() {
        let term = FixedTerminal::new(80);
        let state = state();
        state.add_bytes(&term, b"\x1b[1G\x1b[31m> compile\x1b[0m");
        assert_eq!(state.current_line().as_deref(), Some("> compile"));

        let blank = self::state();
        blank.add_bytes(&term, b"   ");
        assert_eq!(blank.current_line(), None);
    }

    #[test]
    fn history_is_bounded() {
        let term = FixedTerminal::new(80);
        let state = state();
        for i in 0..500 {
            state.add_bytes(&term, format!("line {i}\n").as_bytes());
        }
        let lines = state.lines();
        assert_eq!(lines.len(), 300);
        assert_eq!(lines.first().map(String::as_str), Some("line 200"));
        assert_eq!(lines.last().map(String::as_str), Some("line 499"));
    }

    #[test]
    fn swap_returns_previous_block() {
        let state = state();
        let previous = state.swap_progress_lines(vec!["a".into()]);
        assert!(previous.is_empty());
        let previous = state.swap_progress_lines(vec!["b".into(), "c".into()]);
        assert_eq!(*previous, vec!["a".to_owned()]);
        assert!(state.has_progress_lines());
    }

    #[test]
    fn reset_clears_state_but_keeps_history() {
        let term = FixedTerminal::new(80);
        let state = state();
        state.add_bytes(&term, b"kept\npending");
        state.swap_progress_lines(vec!["task".into()]);
        state.set_padding(4);
        state.reset();
        assert!(!state.has_progress_lines());
        assert_eq!(state.padding(), 0);
        assert!(state.current_line_bytes().is_empty());
        assert_eq!(state.lines(), vec!["kept"]);
    }

    #[test]
    fn empty_separator_falls_back_to_platform() {
        let config = SupershellConfig::default().with_line_separator("");
        let state = ProgressState::from_config(&config);
        assert_eq!(state.line_separator(), PLATFORM_LINE_SEPARATOR);
    }

    #[test]
    fn new_sets_blank_zone() {
        assert_eq!(ProgressState::new(4).blank_zone(), 4);
        assert_eq!(ProgressState::default().blank_zone(), 1);
    }
}
