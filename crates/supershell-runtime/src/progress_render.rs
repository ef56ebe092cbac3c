#![forbid(unsafe_code)]

//! Progress block composition and augmented output writes.
//!
//! # Block layout
//!
//! The block is drawn below the line the cursor sits on (`last_line`):
//!
//! ```text
//! last_line▌                 <- cursor returns here
//! (blank zone + padding rows, each wiped)
//!   | => compile 3s          <- progress lines, each wiped first
//!   | => test 1s
//! ```
//!
//! Every redraw walks down over the whole reserved area wiping rows, prints
//! the block, then moves back up by exactly the number of rows it descended
//! and reprints `last_line`. The total height only changes when the content
//! does, and shrinking content is compensated by padding, so lines that have
//! already scrolled into history never jump.

use std::io::{self, Write};

use supershell_core::ansi::{
    CLEAR_SCREEN_AFTER_CURSOR, CURSOR_COLUMN_ZERO, DELETE_LINE, blank_rows, cursor_up,
};
use supershell_core::{Prompt, Terminal};

use crate::progress_state::ProgressState;

/// Total rows occupied by `lines` at the terminal's width.
pub(crate) fn total_rows<T: Terminal + ?Sized>(terminal: &T, lines: &[String]) -> usize {
    lines.iter().map(|line| terminal.line_count(line)).sum()
}

impl ProgressState {
    /// Compose the escape sequence that redraws the progress block beneath
    /// `last_line`.
    ///
    /// Pure with respect to the state: identical progress lines, padding,
    /// blank zone and `last_line` produce identical bytes. With no progress
    /// lines the result only clears below the cursor.
    #[must_use]
    pub fn compose_progress_block<T: Terminal + ?Sized>(
        &self,
        terminal: &T,
        last_line: &str,
    ) -> Vec<u8> {
        let lines = self.progress_lines();
        if lines.is_empty() {
            return CLEAR_SCREEN_AFTER_CURSOR.to_vec();
        }

        let current_length = total_rows(terminal, &lines);
        let (height, width) = terminal.line_height_and_width(last_line);
        let offset = width > 0;
        let pad = self.padding().saturating_sub(height);
        let total_size = current_length + self.blank_zone() + pad;

        let mut out = Vec::with_capacity(64 + lines.iter().map(String::len).sum::<usize>());
        if offset {
            out.push(b'\n');
            out.extend_from_slice(CURSOR_COLUMN_ZERO);
        }

        out.extend_from_slice(CURSOR_COLUMN_ZERO);
        blank_rows(&mut out, total_size - current_length);

        out.extend_from_slice(DELETE_LINE);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                out.push(b'\n');
                out.extend_from_slice(DELETE_LINE);
            }
            out.extend_from_slice(line.as_bytes());
        }
        out.push(b'\n');
        out.extend_from_slice(DELETE_LINE);

        cursor_up(&mut out, total_size + usize::from(offset));
        out.extend_from_slice(CURSOR_COLUMN_ZERO);
        out.extend_from_slice(last_line.as_bytes());
        out
    }

    /// Bytes that reprint the interactive prompt, if one is shown.
    ///
    /// Empty while a command runs in the foreground or in batch mode.
    #[must_use]
    pub fn prompt_bytes<T: Terminal + ?Sized>(&self, terminal: &T) -> Vec<u8> {
        let prompt = terminal.prompt();
        if prompt.is_running_or_batch() {
            return Vec::new();
        }
        let text = prompt.render();
        let mut out = Vec::with_capacity(DELETE_LINE.len() + CURSOR_COLUMN_ZERO.len() + text.len());
        if terminal.is_ansi_supported() {
            out.extend_from_slice(DELETE_LINE);
            out.extend_from_slice(CURSOR_COLUMN_ZERO);
        }
        out.extend_from_slice(text.as_bytes());
        out
    }

    /// Write one chunk of ordinary output to `sink`.
    ///
    /// The bytes always pass through the line accumulator. Without progress
    /// they are written unchanged. With progress the chunk is wrapped so the
    /// prompt is lifted out of the way, the block is redrawn after every
    /// completed line, and the prompt is restored, all in a single write.
    ///
    /// The caller must hold the terminal's sink exclusively for the whole
    /// call.
    pub fn write<T, W>(
        &self,
        terminal: &T,
        bytes: &[u8],
        sink: &mut W,
        has_progress: bool,
    ) -> io::Result<()>
    where
        T: Terminal + ?Sized,
        W: Write + ?Sized,
    {
        self.add_bytes(terminal, bytes);
        if !has_progress {
            sink.write_all(bytes)?;
            return sink.flush();
        }

        let prompt = terminal.prompt();
        let asking = match &prompt {
            Prompt::AskUser(text) if !text.is_empty() => Some(text.as_str()),
            _ => None,
        };

        let mut out = Vec::with_capacity(bytes.len() + 128);
        if asking.is_some() {
            out.extend_from_slice(DELETE_LINE);
            out.extend_from_slice(CLEAR_SCREEN_AFTER_CURSOR);
            out.extend_from_slice(CURSOR_COLUMN_ZERO);
        }
        out.extend_from_slice(bytes);
        out.extend_from_slice(CLEAR_SCREEN_AFTER_CURSOR);

        if bytes.ends_with(self.line_separator().as_bytes()) && self.has_progress_lines() {
            let last_line = match asking {
                Some(text) => text.to_owned(),
                None => self.current_line().unwrap_or_default(),
            };
            out.extend_from_slice(CLEAR_SCREEN_AFTER_CURSOR);
            out.extend(self.compose_progress_block(terminal, &last_line));
        }
        out.extend(self.prompt_bytes(terminal));

        sink.write_all(&out)?;
        sink.flush()
    }
}
