#![forbid(unsafe_code)]

//! ANSI escape sequences used by the progress overlay.
//!
//! Every redraw is composed into a single byte buffer before it reaches the
//! terminal, so these helpers append to a `Vec<u8>` instead of writing to a
//! sink directly.
//!
//! # Sequence Reference
//!
//! | Sequence | Name | Effect |
//! |----------|------|--------|
//! | `ESC [ 2 K` | EL | Erase the entire current line |
//! | `ESC [ 1 G` | CHA | Move the cursor to column 0 |
//! | `ESC [ J` | ED | Erase from the cursor to the end of the screen |
//! | `ESC [ n A` | CUU | Move the cursor up `n` rows |

/// Erase entire line: `CSI 2 K`.
pub const DELETE_LINE: &[u8] = b"\x1b[2K";

/// Move cursor to the first column of the current row: `CSI 1 G`.
pub const CURSOR_COLUMN_ZERO: &[u8] = b"\x1b[1G";

/// Erase from cursor to end of screen: `CSI J`.
pub const CLEAR_SCREEN_AFTER_CURSOR: &[u8] = b"\x1b[J";

/// Append a cursor-up (`CSI n A`) sequence.
///
/// `n == 0` appends nothing: terminals treat `CSI 0 A` as a move of one row.
pub fn cursor_up(buf: &mut Vec<u8>, n: usize) {
    match n {
        0 => {}
        1 => buf.extend_from_slice(b"\x1b[A"),
        n => buf.extend_from_slice(format!("\x1b[{n}A").as_bytes()),
    }
}

/// Append `count` repetitions of newline followed by [`DELETE_LINE`].
///
/// Used to walk down over stale rows, wiping each one.
pub fn blank_rows(buf: &mut Vec<u8>, count: usize) {
    buf.reserve(count * (1 + DELETE_LINE.len()));
    for _ in 0..count {
        buf.push(b'\n');
        buf.extend_from_slice(DELETE_LINE);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_up_zero_is_empty() {
        let mut buf = Vec::new();
        cursor_up(&mut buf, 0);
        assert!(buf.is_empty());
    }

    #[test]
    fn cursor_up_single_row_uses_short_form() {
        let mut buf = Vec::new();
        cursor_up(&mut buf, 1);
        assert_eq!(buf, b"\x1b[A");
    }

    #[test]
    fn cursor_up_many_rows() {
        let mut buf = Vec::new();
        cursor_up(&mut buf, 12);
        assert_eq!(buf, b"\x1b[12A");
    }

    #[test]
    fn blank_rows_repeats_newline_and_erase() {
        let mut buf = Vec::new();
        blank_rows(&mut buf, 2);
        assert_eq!(buf, b"\n\x1b[2K\n\x1b[2K");
    }

    #[test]
    fn blank_rows_zero_is_empty() {
        let mut buf = Vec::new();
        blank_rows(&mut buf, 0);
        assert!(buf.is_empty());
    }
}
